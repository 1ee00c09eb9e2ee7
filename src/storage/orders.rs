//! Historical order records
//!
//! Past orders are append-only analytics input stored as JSONL, one order
//! per line. They feed the sales forecast and pin the floor for new gyle
//! numbers. A missing file is simply an empty history; unlike the state
//! store, absent order data has an unambiguous meaning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::Order;

/// Store for historical order records
pub struct OrderBook {
    path: PathBuf,
}

impl OrderBook {
    /// Creates an order book backed by the given JSONL file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the order file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all orders, sorted by required date
    pub fn read_all(&self) -> Result<Vec<Order>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open order book: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on order book")?;

        let reader = BufReader::new(&file);
        let mut orders = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let order: Order = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse order at line {}", line_num + 1))?;

            orders.push(order);
        }

        orders.sort_by_key(|o| o.date_required);
        Ok(orders)
    }

    /// Highest gyle number across all historical orders (0 if none)
    pub fn highest_gyle(&self) -> Result<u32> {
        Ok(self
            .read_all()?
            .iter()
            .map(|o| o.gyle)
            .max()
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Recipe;
    use std::fs;
    use tempfile::TempDir;

    fn write_lines(path: &Path, lines: &[&str]) {
        fs::write(path, lines.join("\n")).unwrap();
    }

    #[test]
    fn missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let book = OrderBook::new(dir.path().join("orders.jsonl"));

        assert!(book.read_all().unwrap().is_empty());
        assert_eq!(book.highest_gyle().unwrap(), 0);
    }

    #[test]
    fn orders_come_back_sorted_by_date() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.jsonl");
        write_lines(
            &path,
            &[
                r#"{"gyle": 120, "recipe": "Organic Pilsner", "quantity": 480, "date_required": "2025-03-10"}"#,
                r#"{"gyle": 118, "recipe": "Organic Dunkel", "quantity": 240, "date_required": "2025-01-05"}"#,
                "",
                r#"{"gyle": 119, "recipe": "Organic Red Helles", "quantity": 600, "date_required": "2025-02-20"}"#,
            ],
        );

        let book = OrderBook::new(path);
        let orders = book.read_all().unwrap();

        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].gyle, 118);
        assert_eq!(orders[1].recipe, Recipe::RedHelles);
        assert_eq!(orders[2].gyle, 120);
    }

    #[test]
    fn highest_gyle_scans_the_whole_book() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.jsonl");
        write_lines(
            &path,
            &[
                r#"{"gyle": 97, "recipe": "Organic Pilsner", "quantity": 100, "date_required": "2025-03-10"}"#,
                r#"{"gyle": 125, "recipe": "Organic Dunkel", "quantity": 100, "date_required": "2025-01-05"}"#,
            ],
        );

        let book = OrderBook::new(path);
        assert_eq!(book.highest_gyle().unwrap(), 125);
    }

    #[test]
    fn malformed_line_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.jsonl");
        write_lines(&path, &[r#"{"gyle": "not a number"}"#]);

        let book = OrderBook::new(path);
        assert!(book.read_all().is_err());
    }
}
