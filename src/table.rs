//! # Result Tables
//!
//! This module provides the growable, append-only table used for every kind
//! of collected result: scan rows, trace hops, and monitor samples. Capacity
//! doubles on overflow starting from a small base, and growth failures are
//! reported instead of aborting so callers can keep the rows gathered so far.
//!
//! ## Example
//!
//! ```rust
//! use wirefish::table::ResultTable;
//!
//! let mut table: ResultTable<u16> = ResultTable::new();
//! table.push(80)?;
//! table.push(443)?;
//! assert_eq!(table.rows(), &[80, 443]);
//! # Ok::<(), wirefish::error::WirefishError>(())
//! ```

use crate::error::{Result, WirefishError};
use serde::Serialize;

/// Capacity of a table after its first growth
pub const BASE_CAPACITY: usize = 16;

/// Growable append-only sequence of result rows
///
/// Rows keep insertion order. The table owns its backing storage exclusively
/// and releases it on drop.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ResultTable<T> {
    rows: Vec<T>,
}

impl<T> ResultTable<T> {
    /// Create an empty table with no backing allocation
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append a row, growing the backing storage if needed
    ///
    /// Capacity doubles when full, starting from [`BASE_CAPACITY`]. A failed
    /// growth returns an allocation error and leaves the existing rows
    /// untouched.
    pub fn push(&mut self, row: T) -> Result<()> {
        if self.rows.len() == self.rows.capacity() {
            let additional = if self.rows.capacity() == 0 {
                BASE_CAPACITY
            } else {
                self.rows.capacity()
            };
            self.rows
                .try_reserve_exact(additional)
                .map_err(|e| WirefishError::allocation(e.to_string()))?;
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of rows stored
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows have been stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Iterate over the rows in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// Consume the table, returning the rows
    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}

impl<T> Default for ResultTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a ResultTable<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_empty_and_unallocated() {
        let table: ResultTable<u32> = ResultTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.rows.capacity(), 0);
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut table = ResultTable::new();
        for i in 0..100u32 {
            table.push(i).unwrap();
        }
        assert_eq!(table.len(), 100);
        for (i, row) in table.iter().enumerate() {
            assert_eq!(*row, i as u32);
        }
    }

    #[test]
    fn test_capacity_doubles_from_base() {
        let mut table = ResultTable::new();
        table.push(0u8).unwrap();
        let first = table.rows.capacity();
        assert!(first >= BASE_CAPACITY);

        for i in 0..BASE_CAPACITY {
            table.push(i as u8).unwrap();
        }
        assert!(table.rows.capacity() >= first * 2);
    }

    #[test]
    fn test_into_rows_hands_back_storage() {
        let mut table = ResultTable::new();
        table.push("a").unwrap();
        table.push("b").unwrap();
        assert_eq!(table.into_rows(), vec!["a", "b"]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut table = ResultTable::new();
        table.push(1u8).unwrap();
        table.push(2u8).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, "[1,2]");
    }
}
