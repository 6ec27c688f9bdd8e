use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::models::Submission;

use super::{column_values, COLUMNS};

// A4 landscape.
const PAGE_W: f32 = 297.0;
const PAGE_H: f32 = 210.0;
const MARGIN: f32 = 14.0;
const ROW_STEP: f32 = 7.0;
const FONT_SIZE: f32 = 8.0;
const HEADER_SIZE: f32 = 9.0;
// Per-cell character limit before truncation.
const MAX_CHARS: usize = 30;

// Relative column widths; id and age need far less room than the
// free-text fields.
const WEIGHTS: [f32; 8] = [0.5, 1.3, 1.6, 1.1, 0.5, 1.6, 1.0, 1.4];

/// Renders the record set as one auto-paginated table, or `None` when there
/// is nothing to export. A serialization failure is logged and also yields
/// `None`; callers distinguish the two by checking the input.
pub fn to_pdf(submissions: &[Submission]) -> Option<Vec<u8>> {
    if submissions.is_empty() {
        return None;
    }

    match render(submissions) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            tracing::error!("PDF export failed: {err}");
            None
        }
    }
}

fn render(submissions: &[Submission]) -> Result<Vec<u8>, printpdf::Error> {
    let (doc, page, layer) = PdfDocument::new("Submissions", Mm(PAGE_W), Mm(PAGE_H), "table");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let offsets = column_offsets();
    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = header_row(&current, &bold, &offsets);

    for sub in submissions {
        if y < MARGIN {
            let (page, layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "table");
            current = doc.get_page(page).get_layer(layer);
            y = header_row(&current, &bold, &offsets);
        }

        for (value, x) in column_values(sub).iter().zip(offsets.iter()) {
            current.use_text(truncate(value), FONT_SIZE, Mm(*x), Mm(y), &regular);
        }
        y -= ROW_STEP;
    }

    doc.save_to_bytes()
}

/// Draws the column headers at the top of a page, returning the y of the
/// first data row.
fn header_row(layer: &PdfLayerReference, font: &IndirectFontRef, offsets: &[f32; 8]) -> f32 {
    let y = PAGE_H - MARGIN;
    for (name, x) in COLUMNS.iter().zip(offsets.iter()) {
        layer.use_text(*name, HEADER_SIZE, Mm(*x), Mm(y), font);
    }
    y - ROW_STEP
}

fn column_offsets() -> [f32; 8] {
    let usable = PAGE_W - 2.0 * MARGIN;
    let total: f32 = WEIGHTS.iter().sum();

    let mut offsets = [0.0; 8];
    let mut x = MARGIN;
    for (i, weight) in WEIGHTS.iter().enumerate() {
        offsets[i] = x;
        x += usable * weight / total;
    }
    offsets
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CHARS {
        value.to_string()
    } else {
        let cut: String = value.chars().take(MAX_CHARS - 3).collect();
        format!("{cut}...")
    }
}
