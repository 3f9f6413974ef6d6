//! Seat Plan Common Library
//!
//! Roster partitioning and the layout model shared by the print and
//! spreadsheet writers.

pub mod types;
pub mod config;
pub mod layout;
pub mod error;
pub mod classifier;
pub mod partitioner;
pub mod export;

pub use types::{Block, DebugSummary, RosterTable, SeatingData, Student};
pub use config::{BranchCode, SeasonRule, SeatingConfig};
pub use layout::{PdfLayout, ExcelLayout};
pub use error::{Error, Result};
pub use classifier::{extract_branch_code, BranchMatch};
pub use partitioner::{block_letters, process_table};
pub use export::block_layout::{build_block_layout, build_document_layout, season_label, strip_tags};
