//! Export core modules shared by the print and spreadsheet writers.

pub mod block_layout;
pub mod pdf_core;

#[cfg(feature = "excel")]
pub mod excel_core;
