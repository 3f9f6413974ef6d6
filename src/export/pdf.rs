use crate::error::{Result, SeatPlanError};
use chrono::NaiveDate;
use printpdf::*;
use seat_plan_common::export::block_layout::{build_document_layout, BlockLayout, DocumentLayout};
use seat_plan_common::export::pdf_core::{plan_pages, text_width_mm, PdfLayoutCore, PdfPagePlan};
use seat_plan_common::layout::{
    PdfLayout, DESK_HEADER, INFO_FONT_PT, PRN_HEADER, SEAT_PAIRS_PER_ROW, SUBTITLE_FONT_PT,
    TABLE_FONT_PT, TITLE_FONT_PT,
};
use seat_plan_common::{SeatingConfig, SeatingData};
use std::path::Path;

/// Text baseline offset from the bottom of a table row (mm)
const CELL_BASELINE_MM: f32 = 2.6;

const GRID_LINE_PT: f32 = 0.8;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

pub fn generate_pdf(
    data: &SeatingData,
    output_path: &Path,
    config: &SeatingConfig,
    date: NaiveDate,
) -> Result<()> {
    let bytes = generate_pdf_buffer(data, config, date)?;
    std::fs::write(output_path, bytes)?;
    Ok(())
}

/// Render the print form into memory
pub fn generate_pdf_buffer(
    data: &SeatingData,
    config: &SeatingConfig,
    date: NaiveDate,
) -> Result<Vec<u8>> {
    let doc_layout = build_document_layout(data, config, date);
    let core = PdfLayoutCore::from_layout(&PdfLayout::a4());
    let pages = plan_pages(&doc_layout, core.rows_per_page);

    let (doc, page1, layer1) = PdfDocument::new(
        doc_layout.heading.as_str(),
        Mm(core.page_width_mm),
        Mm(core.page_height_mm),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| SeatPlanError::PdfGeneration(format!("font: {:?}", e)))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| SeatPlanError::PdfGeneration(format!("font: {:?}", e)))?,
    };

    for (index, plan) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (page, layer) = doc.add_page(
                Mm(core.page_width_mm),
                Mm(core.page_height_mm),
                "Layer 1",
            );
            doc.get_page(page).get_layer(layer)
        };
        draw_page(&layer, &core, &fonts, &doc_layout, plan);
    }

    log::debug!("PDF: {} page(s)", pages.len());

    doc.save_to_bytes()
        .map_err(|e| SeatPlanError::PdfGeneration(format!("save: {:?}", e)))
}

fn draw_page(
    layer: &PdfLayerReference,
    core: &PdfLayoutCore,
    fonts: &Fonts,
    doc: &DocumentLayout,
    plan: &PdfPagePlan,
) {
    let Some(block) = plan.block.and_then(|i| doc.blocks.get(i)) else {
        // empty roster: banner only
        let banner = [doc.institution.as_str(), doc.exam_title.as_str(), doc.heading.as_str()];
        draw_banner(layer, core, fonts, banner);
        return;
    };

    let banner = [block.institution.as_str(), block.exam_title.as_str(), block.heading.as_str()];
    draw_banner(layer, core, fonts, banner);
    draw_block_header(layer, core, fonts, block);
    draw_seat_table(layer, core, fonts, block, plan);
}

/// Institution, season label, heading
fn draw_banner(
    layer: &PdfLayerReference,
    core: &PdfLayoutCore,
    fonts: &Fonts,
    lines: [&str; 3],
) {
    let sizes = [TITLE_FONT_PT, SUBTITLE_FONT_PT, TITLE_FONT_PT];
    for (line, (text, size)) in lines.iter().zip(sizes).enumerate() {
        draw_centered(layer, core, text, size, line, &fonts.bold);
    }
}

fn draw_centered(
    layer: &PdfLayerReference,
    core: &PdfLayoutCore,
    text: &str,
    size: f32,
    line: usize,
    font: &IndirectFontRef,
) {
    let x = (core.center_x_mm() - text_width_mm(text, size) / 2.0).max(core.margin_mm);
    layer.use_text(text, size, Mm(x), Mm(core.line_y_mm(line)), font);
}

/// Center code / date / block name, then count + PRN range, then class + branch
fn draw_block_header(
    layer: &PdfLayerReference,
    core: &PdfLayoutCore,
    fonts: &Fonts,
    block: &BlockLayout,
) {
    for (row, items) in block.info_rows().iter().enumerate() {
        let (size, font) = if row == 0 {
            (INFO_FONT_PT, &fonts.bold)
        } else {
            (TABLE_FONT_PT, &fonts.regular)
        };
        let column_width = core.usable_width_mm() / items.len() as f32;
        for (col, text) in items.iter().enumerate() {
            let x = core.margin_mm + column_width * col as f32;
            layer.use_text(*text, size, Mm(x), Mm(core.line_y_mm(3 + row)), font);
        }
    }
}

fn draw_seat_table(
    layer: &PdfLayerReference,
    core: &PdfLayoutCore,
    fonts: &Fonts,
    block: &BlockLayout,
    plan: &PdfPagePlan,
) {
    let columns = block_columns(core);

    // header row
    for (col, (left, width)) in columns.iter().enumerate() {
        let label = if col % 2 == 0 { DESK_HEADER } else { PRN_HEADER };
        draw_cell_text(layer, core, label, *left, *width, 0, &fonts.bold);
    }

    let rows = &block.seat_rows[plan.rows.clone()];
    for (offset, seat_row) in rows.iter().enumerate() {
        let row = offset + 1;
        for (pair, cell) in seat_row.iter().enumerate() {
            let Some(cell) = cell else { continue };
            let (desk_left, desk_width) = columns[pair * 2];
            let (prn_left, prn_width) = columns[pair * 2 + 1];
            let desk = cell.desk_no.to_string();
            draw_cell_text(layer, core, &desk, desk_left, desk_width, row, &fonts.regular);
            draw_cell_text(layer, core, &cell.prn, prn_left, prn_width, row, &fonts.regular);
        }
    }

    draw_grid(layer, core, rows.len() + 1);
}

const GRID_COLUMNS: usize = SEAT_PAIRS_PER_ROW * 2;

fn block_columns(core: &PdfLayoutCore) -> Vec<(f32, f32)> {
    (0..GRID_COLUMNS)
        .map(|col| (core.column_left_mm(col), core.column_width_mm(col)))
        .collect()
}

fn draw_cell_text(
    layer: &PdfLayerReference,
    core: &PdfLayoutCore,
    text: &str,
    left: f32,
    width: f32,
    row: usize,
    font: &IndirectFontRef,
) {
    let x = left + ((width - text_width_mm(text, TABLE_FONT_PT)) / 2.0).max(0.5);
    let y = core.row_top_mm(row + 1) + CELL_BASELINE_MM;
    layer.use_text(text, TABLE_FONT_PT, Mm(x), Mm(y), font);
}

fn draw_grid(layer: &PdfLayerReference, core: &PdfLayoutCore, row_count: usize) {
    layer.set_outline_thickness(GRID_LINE_PT);

    let left = core.column_left_mm(0);
    let right = left + core.table_width_mm();
    let top = core.row_top_mm(0);
    let bottom = core.row_top_mm(row_count);

    for row in 0..=row_count {
        let y = core.row_top_mm(row);
        layer.add_line(segment((left, y), (right, y)));
    }

    let mut edges: Vec<f32> = (0..GRID_COLUMNS).map(|col| core.column_left_mm(col)).collect();
    edges.push(right);
    for x in edges {
        layer.add_line(segment((x, top), (x, bottom)));
    }
}

fn segment(from: (f32, f32), to: (f32, f32)) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(from.0), Mm(from.1)), false),
            (Point::new(Mm(to.0), Mm(to.1)), false),
        ],
        is_closed: false,
    }
}
