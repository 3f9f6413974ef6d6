//! Excel generation (shared library)
//!
//! One worksheet per block, built from the shared block layout model.

use super::block_layout::{BlockLayout, DocumentLayout};
use crate::error::{Error, Result};
use crate::layout::{ExcelLayout, DESK_HEADER, PRN_HEADER};
use rust_xlsxwriter::*;

/// Sheet name used when the roster has no blocks
pub const EMPTY_SHEET_NAME: &str = "Roster";

const BANNER_ROW: u32 = 0;
const EXAM_ROW: u32 = 2;
const INFO_ROW: u32 = 4;
const TABLE_HEADER_ROW: u32 = 8;

fn xlsx_err(context: &'static str) -> impl Fn(XlsxError) -> Error {
    move |e| Error::Excel(format!("{}: {}", context, e))
}

struct Formats {
    title: Format,
    exam: Format,
    header: Format,
    body: Format,
    table_header: Format,
    cell: Format,
}

impl Formats {
    fn new(layout: &ExcelLayout) -> Self {
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(layout.title_font_size)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            exam: Format::new()
                .set_bold()
                .set_font_size(layout.exam_font_size)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            header: Format::new()
                .set_bold()
                .set_font_size(layout.header_font_size),
            body: Format::new()
                .set_bold()
                .set_font_size(layout.body_font_size),
            table_header: Format::new()
                .set_bold()
                .set_font_size(layout.header_font_size)
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(0x808080))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            cell: Format::new()
                .set_font_size(layout.body_font_size)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin),
        }
    }
}

/// Generate the workbook into a buffer
pub fn generate_excel_buffer(doc: &DocumentLayout) -> Result<Vec<u8>> {
    let layout = ExcelLayout::default();
    let formats = Formats::new(&layout);
    let mut workbook = Workbook::new();

    if doc.blocks.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(EMPTY_SHEET_NAME)
            .map_err(xlsx_err("sheet name"))?;
        set_columns(worksheet, &layout)?;
        write_banner(worksheet, &layout, &formats, &doc.institution, &doc.exam_title)?;
    }

    for block in &doc.blocks {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&block.sheet_name)
            .map_err(xlsx_err("sheet name"))?;
        write_block(worksheet, &layout, &formats, block)?;
    }

    workbook.save_to_buffer().map_err(xlsx_err("save workbook"))
}

fn set_columns(worksheet: &mut Worksheet, layout: &ExcelLayout) -> Result<()> {
    for col in 0..layout.column_count() {
        let width = if col % 2 == 0 {
            layout.desk_col_width
        } else {
            layout.prn_col_width
        };
        worksheet
            .set_column_width(col, width)
            .map_err(xlsx_err("column width"))?;
    }
    Ok(())
}

fn write_banner(
    worksheet: &mut Worksheet,
    layout: &ExcelLayout,
    formats: &Formats,
    institution: &str,
    exam_title: &str,
) -> Result<()> {
    let last_col = layout.column_count() - 1;
    worksheet
        .merge_range(BANNER_ROW, 0, BANNER_ROW, last_col, institution, &formats.title)
        .map_err(xlsx_err("banner"))?;
    worksheet
        .merge_range(EXAM_ROW, 0, EXAM_ROW, last_col, exam_title, &formats.exam)
        .map_err(xlsx_err("exam title"))?;
    Ok(())
}

fn write_block(
    worksheet: &mut Worksheet,
    layout: &ExcelLayout,
    formats: &Formats,
    block: &BlockLayout,
) -> Result<()> {
    set_columns(worksheet, layout)?;
    write_banner(worksheet, layout, formats, &block.institution, &block.exam_title)?;

    // (row, first col, last col, text, format)
    let info = [
        (INFO_ROW, 0, 1, &block.center_line, &formats.header),
        (INFO_ROW, 2, 3, &block.date_line, &formats.header),
        (INFO_ROW, 4, 5, &block.block_line, &formats.header),
        (INFO_ROW + 1, 0, 1, &block.count_line, &formats.body),
        (INFO_ROW + 1, 2, 5, &block.prn_line, &formats.body),
        (INFO_ROW + 2, 0, 1, &block.class_line, &formats.body),
        (INFO_ROW + 2, 2, 3, &block.branch_line, &formats.body),
    ];
    for (row, first_col, last_col, text, format) in info {
        worksheet
            .merge_range(row, first_col, row, last_col, text, format)
            .map_err(xlsx_err("block header"))?;
    }

    for col in 0..layout.column_count() {
        let label = if col % 2 == 0 { DESK_HEADER } else { PRN_HEADER };
        worksheet
            .write_string_with_format(TABLE_HEADER_ROW, col, label, &formats.table_header)
            .map_err(xlsx_err("table header"))?;
    }

    for (offset, seat_row) in block.seat_rows.iter().enumerate() {
        let row = TABLE_HEADER_ROW + 1 + offset as u32;
        for (pair, cell) in seat_row.iter().enumerate() {
            let Some(cell) = cell else { continue };
            let col = (pair * 2) as u16;
            worksheet
                .write_number_with_format(row, col, cell.desk_no, &formats.cell)
                .map_err(xlsx_err("desk number"))?;
            worksheet
                .write_string_with_format(row, col + 1, &cell.prn, &formats.cell)
                .map_err(xlsx_err("PRN"))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeatingConfig;
    use crate::export::block_layout::build_document_layout;
    use crate::types::{Block, SeatingData, Student};
    use chrono::NaiveDate;

    fn data(blocks: usize) -> SeatingData {
        let blocks = (1..=blocks)
            .map(|n| Block {
                block_number: n,
                block_label: crate::partitioner::block_letters(n),
                block_name: format!("Block-{}", crate::partitioner::block_letters(n)),
                total_students: 4,
                prn_from: "2023011995001".into(),
                prn_to: "2023011995004".into(),
                year: 2,
                branch: "AI & DS".into(),
                branches: vec!["AI & DS".into()],
                branch_code: "11995".into(),
                students: (1..=4)
                    .map(|d| Student {
                        desk_no: d,
                        prn: format!("202301199500{}", d),
                        ..Default::default()
                    })
                    .collect(),
            })
            .collect();
        SeatingData {
            blocks,
            ..Default::default()
        }
    }

    fn doc(blocks: usize) -> DocumentLayout {
        let date = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        build_document_layout(&data(blocks), &SeatingConfig::default(), date)
    }

    #[test]
    fn test_workbook_is_zip() {
        let buffer = generate_excel_buffer(&doc(3)).expect("excel failed");
        assert!(buffer.len() > 100);
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_empty_roster_still_valid() {
        let buffer = generate_excel_buffer(&doc(0)).expect("excel failed");
        assert_eq!(&buffer[..2], b"PK");
    }
}
