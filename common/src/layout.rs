//! Layout settings
//!
//! mm-based page geometry for the print form and column/font settings for
//! the spreadsheet form. Both writers read from here.

// ============================================
// mm layout (source of truth)
// ============================================

/// A4 size (mm)
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Page margin (mm, half an inch)
pub const MARGIN_MM: f32 = 12.7;

/// Seat table: (desk, PRN) pairs per row
pub const SEAT_PAIRS_PER_ROW: usize = 3;

/// Seat table column widths (mm)
pub const DESK_COL_WIDTH_MM: f32 = 15.0;
pub const PRN_COL_WIDTH_MM: f32 = 46.0;

/// Seat table row height (mm)
pub const SEAT_ROW_HEIGHT_MM: f32 = 8.0;

/// Header line spacing (mm)
pub const LINE_GAP_MM: f32 = 8.0;

/// Seat table header cells, repeated per pair
pub const DESK_HEADER: &str = "Desk No.";
pub const PRN_HEADER: &str = "PRN No.";

/// Document heading printed under the season label
pub const DOCUMENT_HEADING: &str = "Seating Arrangement";

// ============================================
// Font sizes (pt)
// ============================================

pub const TITLE_FONT_PT: f32 = 18.0;
pub const SUBTITLE_FONT_PT: f32 = 16.0;
pub const TABLE_FONT_PT: f32 = 11.0;
/// Center code / date / block name row, three items across
pub const INFO_FONT_PT: f32 = 10.0;

// ============================================
// Conversion
// ============================================

/// 1mm = 72/25.4 pt ≈ 2.835pt
pub const MM_TO_PT: f32 = 72.0 / 25.4;

// ============================================
// Layout structs
// ============================================

/// Print layout
#[derive(Debug, Clone)]
pub struct PdfLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub desk_col_width_mm: f32,
    pub prn_col_width_mm: f32,
    pub row_height_mm: f32,
    pub line_gap_mm: f32,
    /// Vertical space used by the banner and block header lines
    pub header_height_mm: f32,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self::a4()
    }
}

impl PdfLayout {
    pub fn a4() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm: MARGIN_MM,
            desk_col_width_mm: DESK_COL_WIDTH_MM,
            prn_col_width_mm: PRN_COL_WIDTH_MM,
            row_height_mm: SEAT_ROW_HEIGHT_MM,
            line_gap_mm: LINE_GAP_MM,
            // banner, season, heading, three info lines, gap
            header_height_mm: LINE_GAP_MM * 7.0 + 6.0,
        }
    }

    pub fn usable_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_mm * 2.0
    }

    pub fn usable_height_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm * 2.0
    }

    pub fn table_width_mm(&self) -> f32 {
        (self.desk_col_width_mm + self.prn_col_width_mm) * SEAT_PAIRS_PER_ROW as f32
    }

    /// Left edge of the centered seat table (mm)
    pub fn table_left_mm(&self) -> f32 {
        self.margin_mm + (self.usable_width_mm() - self.table_width_mm()).max(0.0) / 2.0
    }

    /// Seat rows that fit below the header, excluding the table header row
    pub fn seat_rows_per_page(&self) -> usize {
        let available = self.usable_height_mm() - self.header_height_mm - self.row_height_mm;
        ((available / self.row_height_mm).floor() as usize).max(1)
    }
}

/// Spreadsheet layout
#[derive(Debug, Clone)]
pub struct ExcelLayout {
    /// Width of desk columns (A, C, E), Excel character units
    pub desk_col_width: f64,
    /// Width of PRN columns (B, D, F)
    pub prn_col_width: f64,
    pub title_font_size: f64,
    pub exam_font_size: f64,
    pub header_font_size: f64,
    pub body_font_size: f64,
}

impl Default for ExcelLayout {
    fn default() -> Self {
        Self {
            desk_col_width: 20.0,
            prn_col_width: 40.0,
            title_font_size: 20.0,
            exam_font_size: 16.0,
            header_font_size: 12.0,
            body_font_size: 10.0,
        }
    }
}

impl ExcelLayout {
    /// Total columns used by the seat table
    pub fn column_count(&self) -> u16 {
        (SEAT_PAIRS_PER_ROW * 2) as u16
    }
}

// ============================================
// Helpers
// ============================================

/// pt → mm
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_fits_page() {
        let layout = PdfLayout::a4();
        // 183mm table inside 184.6mm usable width
        assert!(layout.table_width_mm() <= layout.usable_width_mm());
        assert!(layout.table_left_mm() >= layout.margin_mm);
        assert!((layout.table_width_mm() - 183.0).abs() < 0.01);
    }

    #[test]
    fn test_default_block_fits_one_page() {
        // 30 students → 10 rows of three pairs
        let layout = PdfLayout::a4();
        assert!(layout.seat_rows_per_page() >= 10);
    }

    #[test]
    fn test_conversion() {
        assert!((MM_TO_PT - 2.835).abs() < 0.01);
        assert!((pt_to_mm(72.0) - 25.4).abs() < 0.001);
    }

    #[test]
    fn test_excel_columns() {
        assert_eq!(ExcelLayout::default().column_count(), 6);
    }
}
