//! Excel generation (CLI)
//!
//! Workbook layout lives in seat_plan_common::export::excel_core

use crate::error::{Result, SeatPlanError};
use chrono::NaiveDate;
use seat_plan_common::export::block_layout::build_document_layout;
use seat_plan_common::export::excel_core;
use seat_plan_common::{SeatingConfig, SeatingData};
use std::path::Path;

pub fn generate_excel_buffer(
    data: &SeatingData,
    config: &SeatingConfig,
    date: NaiveDate,
) -> Result<Vec<u8>> {
    let doc = build_document_layout(data, config, date);
    excel_core::generate_excel_buffer(&doc)
        .map_err(|e| SeatPlanError::ExcelGeneration(e.to_string()))
}

pub fn generate_excel(
    data: &SeatingData,
    output_path: &Path,
    config: &SeatingConfig,
    date: NaiveDate,
) -> Result<()> {
    let buffer = generate_excel_buffer(data, config, date)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
