//! PDF export core: page planning and positions (mm, origin bottom-left).

use super::block_layout::DocumentLayout;
use crate::layout::{pt_to_mm, PdfLayout, SEAT_PAIRS_PER_ROW};
use std::ops::Range;

/// Positions derived from a PdfLayout
#[derive(Debug, Clone)]
pub struct PdfLayoutCore {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub line_gap_mm: f32,
    pub header_height_mm: f32,
    pub row_height_mm: f32,
    pub table_left_mm: f32,
    pub desk_col_width_mm: f32,
    pub prn_col_width_mm: f32,
    pub rows_per_page: usize,
}

impl PdfLayoutCore {
    pub fn from_layout(layout: &PdfLayout) -> Self {
        Self {
            page_width_mm: layout.page_width_mm,
            page_height_mm: layout.page_height_mm,
            margin_mm: layout.margin_mm,
            line_gap_mm: layout.line_gap_mm,
            header_height_mm: layout.header_height_mm,
            row_height_mm: layout.row_height_mm,
            table_left_mm: layout.table_left_mm(),
            desk_col_width_mm: layout.desk_col_width_mm,
            prn_col_width_mm: layout.prn_col_width_mm,
            rows_per_page: layout.seat_rows_per_page(),
        }
    }

    /// Baseline of the n-th header line from the top
    pub fn line_y_mm(&self, line: usize) -> f32 {
        self.page_height_mm - self.margin_mm - self.line_gap_mm * (line as f32 + 1.0)
    }

    /// Top edge of the seat table
    pub fn table_top_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm - self.header_height_mm
    }

    /// Top edge of table row `row` (row 0 is the column header)
    pub fn row_top_mm(&self, row: usize) -> f32 {
        self.table_top_mm() - self.row_height_mm * row as f32
    }

    /// Left edge of grid column `col` (0..6, desk/PRN alternating)
    pub fn column_left_mm(&self, col: usize) -> f32 {
        let pair = (col / 2) as f32;
        let mut x = self.table_left_mm + pair * (self.desk_col_width_mm + self.prn_col_width_mm);
        if col % 2 == 1 {
            x += self.desk_col_width_mm;
        }
        x
    }

    pub fn column_width_mm(&self, col: usize) -> f32 {
        if col % 2 == 0 {
            self.desk_col_width_mm
        } else {
            self.prn_col_width_mm
        }
    }

    pub fn table_width_mm(&self) -> f32 {
        (self.desk_col_width_mm + self.prn_col_width_mm) * SEAT_PAIRS_PER_ROW as f32
    }

    pub fn usable_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_mm * 2.0
    }

    /// Center x of the page
    pub fn center_x_mm(&self) -> f32 {
        self.page_width_mm / 2.0
    }
}

/// One physical page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPagePlan {
    /// Index into DocumentLayout::blocks; None for the banner-only page of an empty roster
    pub block: Option<usize>,
    /// Seat rows printed on this page
    pub rows: Range<usize>,
    /// Continuation of the previous page's block
    pub continued: bool,
}

/// Split blocks into pages: every block starts a new page, long blocks overflow
pub fn plan_pages(doc: &DocumentLayout, rows_per_page: usize) -> Vec<PdfPagePlan> {
    let rows_per_page = rows_per_page.max(1);
    let mut pages = Vec::new();

    for (index, block) in doc.blocks.iter().enumerate() {
        let total = block.seat_rows.len();
        let mut start = 0;
        loop {
            let end = (start + rows_per_page).min(total);
            pages.push(PdfPagePlan {
                block: Some(index),
                rows: start..end,
                continued: start > 0,
            });
            start = end;
            if start >= total {
                break;
            }
        }
    }

    if pages.is_empty() {
        pages.push(PdfPagePlan {
            block: None,
            rows: 0..0,
            continued: false,
        });
    }

    pages
}

/// Approximate Helvetica text width (mm) for centering
pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    // average glyph advance ≈ 0.5em
    pt_to_mm(text.chars().count() as f32 * font_size_pt * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::block_layout::BlockLayout;

    fn block_with_rows(rows: usize) -> BlockLayout {
        BlockLayout {
            institution: String::new(),
            exam_title: String::new(),
            heading: String::new(),
            center_line: String::new(),
            date_line: String::new(),
            block_line: String::new(),
            count_line: String::new(),
            prn_line: String::new(),
            class_line: String::new(),
            branch_line: String::new(),
            sheet_name: String::new(),
            seat_rows: (0..rows).map(|_| Default::default()).collect(),
        }
    }

    fn doc(blocks: Vec<BlockLayout>) -> DocumentLayout {
        DocumentLayout {
            institution: String::new(),
            exam_title: String::new(),
            heading: String::new(),
            blocks,
        }
    }

    #[test]
    fn test_layout_core_positions() {
        let core = PdfLayoutCore::from_layout(&PdfLayout::a4());
        assert!(core.line_y_mm(0) > core.line_y_mm(1));
        assert!(core.row_top_mm(0) > core.row_top_mm(1));
        assert!(core.column_left_mm(1) > core.column_left_mm(0));
        let right = core.column_left_mm(5) + core.column_width_mm(5);
        assert!(right <= core.page_width_mm - core.margin_mm + 0.01);
        assert!(core.row_top_mm(core.rows_per_page + 1) >= core.margin_mm - 0.01);
    }

    #[test]
    fn test_one_page_per_block() {
        let pages = plan_pages(&doc(vec![block_with_rows(10), block_with_rows(2)]), 25);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].rows, 0..10);
        assert_eq!(pages[1].block, Some(1));
        assert!(!pages[1].continued);
    }

    #[test]
    fn test_long_block_overflows() {
        let pages = plan_pages(&doc(vec![block_with_rows(30)]), 25);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].rows, 25..30);
        assert!(pages[1].continued);
    }

    #[test]
    fn test_empty_document_gets_banner_page() {
        let pages = plan_pages(&doc(vec![]), 25);
        assert_eq!(pages, vec![PdfPagePlan { block: None, rows: 0..0, continued: false }]);
    }

    #[test]
    fn test_block_without_rows_still_gets_page() {
        let pages = plan_pages(&doc(vec![block_with_rows(0)]), 25);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].rows, 0..0);
    }
}
