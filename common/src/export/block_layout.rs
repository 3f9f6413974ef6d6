//! Per-block layout model shared by the PDF and Excel writers.
//!
//! Every text line and the seat grid are derived here once, so the two
//! output forms cannot drift apart.

use crate::config::{SeasonRule, SeatingConfig};
use crate::layout::{DOCUMENT_HEADING, SEAT_PAIRS_PER_ROW};
use crate::types::{Block, SeatingData, Student};
use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// One (desk, PRN) cell pair of the seat grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatCell {
    pub desk_no: u32,
    pub prn: String,
}

/// A grid row; trailing pairs of the last row are None
pub type SeatRow = [Option<SeatCell>; SEAT_PAIRS_PER_ROW];

/// Everything a writer prints for one block
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    pub institution: String,
    pub exam_title: String,
    pub heading: String,
    pub center_line: String,
    pub date_line: String,
    pub block_line: String,
    pub count_line: String,
    pub prn_line: String,
    pub class_line: String,
    pub branch_line: String,
    /// Worksheet name ("Block-{index}")
    pub sheet_name: String,
    pub seat_rows: Vec<SeatRow>,
}

impl BlockLayout {
    /// Header lines in print order, grouped per visual row
    pub fn info_rows(&self) -> [Vec<&str>; 3] {
        [
            vec![
                self.center_line.as_str(),
                self.date_line.as_str(),
                self.block_line.as_str(),
            ],
            vec![self.count_line.as_str(), self.prn_line.as_str()],
            vec![self.class_line.as_str(), self.branch_line.as_str()],
        ]
    }
}

/// Layout of a whole document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub institution: String,
    pub exam_title: String,
    pub heading: String,
    pub blocks: Vec<BlockLayout>,
}

/// Today's local date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// "Winter Examination 2026", "Summer Examination 2026" or "Examination 2026"
pub fn season_label(month: u32, year: i32, seasons: &[SeasonRule]) -> String {
    match seasons.iter().find(|s| s.months.contains(&month)) {
        Some(season) => format!("{} Examination {}", season.label, year),
        None => format!("Examination {}", year),
    }
}

/// Weekday + full date: "Sunday, 18 October 2026"
pub fn format_exam_date(date: NaiveDate) -> String {
    date.format("%A, %d %B %Y").to_string()
}

/// Remove markup-like `<...>` sequences and any stray angle brackets
pub fn strip_tags(text: &str) -> String {
    lazy_static::lazy_static! {
        static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    }
    TAG_RE
        .replace_all(text, "")
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect()
}

/// Fill the seat grid left-to-right, row-major, in desk order
pub fn seat_rows(students: &[Student]) -> Vec<SeatRow> {
    let mut ordered: Vec<&Student> = students.iter().collect();
    ordered.sort_by_key(|s| s.desk_no);

    ordered
        .chunks(SEAT_PAIRS_PER_ROW)
        .map(|chunk| {
            let mut row: SeatRow = Default::default();
            for (slot, student) in row.iter_mut().zip(chunk) {
                *slot = Some(SeatCell {
                    desk_no: student.desk_no,
                    prn: strip_tags(&student.prn),
                });
            }
            row
        })
        .collect()
}

pub fn build_block_layout(block: &Block, config: &SeatingConfig, date: NaiveDate) -> BlockLayout {
    let exam_title = season_label(date.month(), date.year(), &config.seasons);

    BlockLayout {
        institution: strip_tags(&config.institution_name),
        exam_title: strip_tags(&exam_title),
        heading: DOCUMENT_HEADING.to_string(),
        center_line: strip_tags(&format!("Center Code: {}", config.center_code)),
        date_line: strip_tags(&format!("Date: {}", format_exam_date(date))),
        block_line: strip_tags(&format!("Block Name: {}", block.block_name)),
        count_line: strip_tags(&format!("Total Students in Block: {}", block.total_students)),
        prn_line: strip_tags(&format!(
            "PRN No.: From {} to {}",
            block.prn_from, block.prn_to
        )),
        class_line: strip_tags(&format!("Class: {} Year", block.year)),
        branch_line: strip_tags(&format!("Branch: {}", block.branch)),
        sheet_name: format!("Block-{}", block.block_number),
        seat_rows: seat_rows(&block.students),
    }
}

pub fn build_document_layout(
    data: &SeatingData,
    config: &SeatingConfig,
    date: NaiveDate,
) -> DocumentLayout {
    DocumentLayout {
        institution: strip_tags(&config.institution_name),
        exam_title: strip_tags(&season_label(date.month(), date.year(), &config.seasons)),
        heading: DOCUMENT_HEADING.to_string(),
        blocks: data
            .blocks
            .iter()
            .map(|block| build_block_layout(block, config, date))
            .collect(),
    }
}
