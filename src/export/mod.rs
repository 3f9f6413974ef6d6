pub mod pdf;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::{Result, SeatPlanError};
use chrono::NaiveDate;
use seat_plan_common::{SeatingConfig, SeatingData};
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, stem: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let pdf_path = output.join(format!("{}.pdf", stem));
        let excel_path = output.join(format!("{}.xlsx", stem));
        (pdf_path, excel_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(stem);
        let pdf_path = parent.join(format!("{}.pdf", stem));
        let excel_path = parent.join(format!("{}.xlsx", stem));
        (pdf_path, excel_path)
    }
}

/// Default file stem: seating_arrangement_YYYYmmdd_HHMMSS
pub fn default_stem(now: chrono::NaiveDateTime) -> String {
    format!("seating_arrangement_{}", now.format("%Y%m%d_%H%M%S"))
}

/// File stem for a single-block export: block_Block-A
pub fn block_stem(block_name: &str) -> String {
    format!("block_{}", block_name)
}

/// Narrow the payload to one block when requested
pub fn select_block(data: &SeatingData, block: Option<&str>) -> Result<SeatingData> {
    match block {
        None => Ok(data.clone()),
        Some(key) => data
            .find_block(key)
            .cloned()
            .map(SeatingData::single_block)
            .ok_or_else(|| SeatPlanError::BlockNotFound(key.to_string())),
    }
}

/// Write the requested documents; returns the written paths
pub fn export_seating(
    data: &SeatingData,
    format: &ExportFormat,
    output: &Path,
    stem: &str,
    config: &SeatingConfig,
    date: NaiveDate,
) -> Result<Vec<PathBuf>> {
    if output.extension().is_none() && !output.exists() {
        std::fs::create_dir_all(output)?;
    }

    let mut written = Vec::new();

    match format {
        ExportFormat::Pdf => {
            let output_path = output_path_for_format(output, stem, "pdf");
            println!("- Generating PDF...");
            pdf::generate_pdf(data, &output_path, config, date)?;
            println!("✔ PDF: {}", output_path.display());
            written.push(output_path);
        }
        ExportFormat::Excel => {
            let output_path = output_path_for_format(output, stem, "xlsx");
            println!("- Generating Excel...");
            excel::generate_excel(data, &output_path, config, date)?;
            println!("✔ Excel: {}", output_path.display());
            written.push(output_path);
        }
        ExportFormat::Both => {
            let (pdf_path, excel_path) = output_paths_for_both(output, stem);

            println!("- Generating PDF...");
            pdf::generate_pdf(data, &pdf_path, config, date)?;
            println!("✔ PDF: {}", pdf_path.display());

            println!("- Generating Excel...");
            excel::generate_excel(data, &excel_path, config, date)?;
            println!("✔ Excel: {}", excel_path.display());

            written.push(pdf_path);
            written.push(excel_path);
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_directory_like() {
        let path = output_path_for_format(Path::new("out"), "seating", "pdf");
        assert_eq!(path, PathBuf::from("out/seating.pdf"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for_format(Path::new("out/plan.pdf"), "seating", "pdf");
        assert_eq!(path, PathBuf::from("out/plan.pdf"));
    }

    #[test]
    fn test_both_uses_file_stem() {
        let (pdf, xlsx) = output_paths_for_both(Path::new("out/plan.pdf"), "seating");
        assert_eq!(pdf, PathBuf::from("out/plan.pdf"));
        assert_eq!(xlsx, PathBuf::from("out/plan.xlsx"));
    }

    #[test]
    fn test_default_stem() {
        let now = chrono::NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        assert_eq!(default_stem(now), "seating_arrangement_20261018_090507");
        assert_eq!(block_stem("Block-C"), "block_Block-C");
    }
}
