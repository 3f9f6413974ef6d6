//! Roster data types
//!
//! Shared between the partitioner, the CLI and both document writers:
//! - RosterTable: raw tabular input (header row + cells)
//! - Student / Block: one partitioned seating block
//! - SeatingData: the full payload written to and read from JSON

use serde::{Deserialize, Serialize};

/// Raw tabular roster as read from CSV or a spreadsheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RosterTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Index of the first header matching the predicate (headers are compared trimmed)
    pub fn find_column<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&str) -> bool,
    {
        self.headers.iter().position(|h| predicate(h.trim()))
    }

    /// Cell value, or "" when the row is short
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One seated candidate
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Desk number within the block (1-based)
    pub desk_no: u32,

    /// Registration number (trimmed)
    pub prn: String,

    #[serde(default)]
    pub name: String,

    /// Branch label ("Other" for fallback codes)
    #[serde(default)]
    pub branch: String,

    #[serde(default)]
    pub branch_code: String,

    #[serde(default)]
    pub year: i64,
}

/// Seating block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// 1-based block index
    pub block_number: usize,

    /// Base-26 letters ("A", "B", ..., "AA")
    pub block_label: String,

    /// Display name ("Block-A")
    pub block_name: String,

    pub total_students: usize,

    pub prn_from: String,
    pub prn_to: String,

    /// Representative year (first student's, or the configured default)
    pub year: i64,

    /// Single label, or the distinct labels joined by ", "
    pub branch: String,

    /// Sorted distinct branch labels present in the block
    #[serde(default)]
    pub branches: Vec<String>,

    /// Branch code of the first student
    #[serde(default)]
    pub branch_code: String,

    pub students: Vec<Student>,
}

/// Filter counts kept for diagnosing over-aggressive filtering
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebugSummary {
    pub rows_before_filter: usize,
    pub rows_after_filter: usize,
    pub recognized_branch_codes: Vec<String>,
}

/// Full seating payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeatingData {
    pub total_students: usize,
    pub blocks: Vec<Block>,

    /// ISO-8601 processing time
    #[serde(default)]
    pub timestamp: String,

    #[serde(default)]
    pub debug: DebugSummary,
}

impl SeatingData {
    /// Wrap a single block as a one-block roster
    pub fn single_block(block: Block) -> Self {
        Self {
            total_students: block.total_students,
            blocks: vec![block],
            timestamp: String::new(),
            debug: DebugSummary::default(),
        }
    }

    /// Find a block by 1-based number or by letter label ("C", "Block-C")
    pub fn find_block(&self, key: &str) -> Option<&Block> {
        let key = key.trim();
        if let Ok(number) = key.parse::<usize>() {
            return self.blocks.iter().find(|b| b.block_number == number);
        }
        self.blocks.iter().find(|b| {
            b.block_label.eq_ignore_ascii_case(key) || b.block_name.eq_ignore_ascii_case(key)
        })
    }
}
