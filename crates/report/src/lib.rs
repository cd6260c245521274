//! PDF rendering of a balance sheet.
//!
//! [`render`] turns a fully-loaded [`BalanceSheet`] into a paginated A4
//! document: a title block, one section per category listing
//! `name: $value` lines in collection order with a recomputed section
//! total, and a trailing combined liabilities-and-equities total. The
//! totals here are recomputed at display time and are independent of the
//! engine's reconciliation sums.

use engine::{BalanceSheet, LineItem, Money};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use thiserror::Error;

/// Rendering fault. Fatal for the request; callers do not retry.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to render balance sheet PDF: {0}")]
    Pdf(#[from] printpdf::Error),
}

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT_MARGIN: f32 = 20.0;
const TOP_START: f32 = PAGE_HEIGHT - 20.0;
const BOTTOM_MARGIN: f32 = 20.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 11.0;

/// One laid-out text line; `text` may be empty for vertical spacing.
#[derive(Clone, Debug, PartialEq)]
struct Line {
    text: String,
    size: f32,
    bold: bool,
}

impl Line {
    fn bold(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
            bold: true,
        }
    }

    fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: BODY_SIZE,
            bold: false,
        }
    }

    fn blank() -> Self {
        Self::body("")
    }
}

fn line_height(size: f32) -> f32 {
    // Font size in points to a comfortable leading in millimeters.
    size * 0.55
}

/// Produce the document lines in order, recomputing totals per section.
fn layout(sheet: &BalanceSheet) -> Vec<Line> {
    let mut lines = Vec::new();

    lines.push(Line::bold(
        sheet.company_name.as_deref().unwrap_or(""),
        TITLE_SIZE,
    ));
    lines.push(Line::bold(
        format!("Balance Sheet at {}", sheet.date),
        TITLE_SIZE,
    ));
    lines.push(Line::blank());

    section(&mut lines, "Assets", &sheet.assets);
    lines.push(Line::blank());
    let total_liabilities = section(&mut lines, "Liabilities", &sheet.liabilities);
    lines.push(Line::blank());
    let total_equities = section(&mut lines, "Equities", &sheet.equities);
    lines.push(Line::blank());

    lines.push(Line::bold(
        format!(
            "Total Liabilities and Equities: {}",
            total_liabilities + total_equities
        ),
        HEADING_SIZE,
    ));

    lines
}

fn section(lines: &mut Vec<Line>, label: &str, items: &[LineItem]) -> Money {
    lines.push(Line::bold(format!("{label}:"), HEADING_SIZE));
    let mut total = Money::ZERO;
    for item in items {
        lines.push(Line::body(format!("{}: {}", item.name, item.value)));
        total += item.value;
    }
    lines.push(Line::bold(format!("Total {label}: {total}"), HEADING_SIZE));
    total
}

/// Split lines into pages by walking a y-cursor down the page.
fn paginate(lines: &[Line]) -> Vec<Vec<&Line>> {
    let mut pages = Vec::new();
    let mut page: Vec<&Line> = Vec::new();
    let mut y = TOP_START;

    for line in lines {
        let height = line_height(line.size);
        if y - height < BOTTOM_MARGIN && !page.is_empty() {
            pages.push(std::mem::take(&mut page));
            y = TOP_START;
        }
        page.push(line);
        y -= height;
    }
    if !page.is_empty() {
        pages.push(page);
    }

    pages
}

/// Render a balance sheet into PDF bytes.
pub fn render(sheet: &BalanceSheet) -> Result<Vec<u8>, RenderError> {
    let lines = layout(sheet);
    let pages = paginate(&lines);

    let title = sheet.company_name.as_deref().unwrap_or("Balance Sheet");
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    for (index, page_lines) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
            doc.get_page(page).get_layer(layer)
        };

        let mut y = TOP_START;
        for line in page_lines {
            y -= line_height(line.size);
            if line.text.is_empty() {
                continue;
            }
            let font: &IndirectFontRef = if line.bold { &bold } else { &regular };
            layer.use_text(&line.text, line.size, Mm(LEFT_MARGIN), Mm(y), font);
        }
    }

    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> BalanceSheet {
        BalanceSheet {
            id: Some(1),
            company_name: Some("Acme Corp.".to_string()),
            date: "01-02-2025".to_string(),
            assets: vec![LineItem::new("Cash", Money::new(100_00))],
            liabilities: vec![LineItem::new("Loan", Money::new(40_00))],
            equities: vec![LineItem::new("Capital", Money::new(60_00))],
        }
    }

    #[test]
    fn layout_orders_title_sections_and_totals() {
        let lines = layout(&sheet());
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();

        let expected = [
            "Acme Corp.",
            "Balance Sheet at 01-02-2025",
            "",
            "Assets:",
            "Cash: $100.00",
            "Total Assets: $100.00",
            "",
            "Liabilities:",
            "Loan: $40.00",
            "Total Liabilities: $40.00",
            "",
            "Equities:",
            "Capital: $60.00",
            "Total Equities: $60.00",
            "",
            "Total Liabilities and Equities: $100.00",
        ];
        assert_eq!(texts, expected);
    }

    #[test]
    fn layout_recomputes_totals_from_items() {
        let mut unbalanced = sheet();
        unbalanced.equities.clear();
        let lines = layout(&unbalanced);

        assert!(lines.iter().any(|l| l.text == "Total Equities: $0.00"));
        assert!(
            lines
                .iter()
                .any(|l| l.text == "Total Liabilities and Equities: $40.00")
        );
    }

    #[test]
    fn short_sheet_fits_one_page() {
        let lines = layout(&sheet());
        assert_eq!(paginate(&lines).len(), 1);
    }

    #[test]
    fn long_sheet_spills_onto_more_pages() {
        let mut long = sheet();
        for n in 0..200 {
            long.assets.push(LineItem::new(format!("Asset {n}"), Money::new(1_00)));
        }
        let lines = layout(&long);
        let pages = paginate(&lines);
        assert!(pages.len() > 1);
        // Nothing is dropped across the page breaks.
        let total: usize = pages.iter().map(Vec::len).sum();
        assert_eq!(total, lines.len());
    }

    #[test]
    fn render_produces_a_pdf() {
        let bytes = render(&sheet()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn render_handles_a_multi_page_sheet() {
        let mut long = sheet();
        for n in 0..300 {
            long.liabilities
                .push(LineItem::new(format!("Liability {n}"), Money::new(2_50)));
        }
        let bytes = render(&long).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
