//! Draws a laid-out report with printpdf

use super::layout::{
    AMOUNT_X_MM, LayoutOptions, LineKind, NAME_X_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PlacedLine,
    RULE_END_X_MM, layout,
};
use crate::core::error::ReportError;
use crate::core::report::RevenueSummary;
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
};

const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_SIZE: f32 = 9.0;
const TEXT_SIZE: f32 = 12.0;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render the revenue summary to PDF bytes
pub fn render_revenue_pdf(
    summary: &RevenueSummary,
    opts: &LayoutOptions,
) -> Result<Vec<u8>, ReportError> {
    let pages = layout(summary, opts);

    let (doc, first_page, first_layer) = PdfDocument::new(
        opts.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Font(format!("{:?}", e)))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Font(format!("{:?}", e)))?,
    };

    for (number, page) in pages.iter().enumerate() {
        let layer = if number == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Page {}, Layer 1", number + 1),
            );
            doc.get_page(page_index).get_layer(layer_index)
        };

        for line in &page.lines {
            draw_line(&layer, line, &fonts);
        }
    }

    tracing::debug!(
        pages = pages.len(),
        customers = summary.rows.len(),
        "rendered revenue report"
    );

    doc.save_to_bytes()
        .map_err(|e| ReportError::Write(format!("{:?}", e)))
}

fn draw_line(layer: &PdfLayerReference, line: &PlacedLine, fonts: &Fonts) {
    let y = Mm(line.y_mm);
    match &line.kind {
        LineKind::Title(title) => {
            layer.use_text(title.as_str(), TITLE_SIZE, Mm(NAME_X_MM), y, &fonts.bold);
        }
        LineKind::Subtitle(text) => {
            layer.use_text(text.as_str(), SUBTITLE_SIZE, Mm(NAME_X_MM), y, &fonts.regular);
        }
        LineKind::ColumnHeader => {
            layer.use_text("Name", TEXT_SIZE, Mm(NAME_X_MM), y, &fonts.bold);
            layer.use_text("Amount", TEXT_SIZE, Mm(AMOUNT_X_MM), y, &fonts.bold);
        }
        LineKind::Row { name, amount } => {
            layer.use_text(name.as_str(), TEXT_SIZE, Mm(NAME_X_MM), y, &fonts.regular);
            layer.use_text(amount.as_str(), TEXT_SIZE, Mm(AMOUNT_X_MM), y, &fonts.regular);
        }
        LineKind::Rule => {
            layer.set_outline_thickness(0.5);
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(NAME_X_MM), y), false),
                    (Point::new(Mm(RULE_END_X_MM), y), false),
                ],
                is_closed: false,
            });
        }
        LineKind::GrandTotal { amount } => {
            layer.use_text("Total", TEXT_SIZE, Mm(NAME_X_MM), y, &fonts.bold);
            layer.use_text(amount.as_str(), TEXT_SIZE, Mm(AMOUNT_X_MM), y, &fonts.bold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::RevenueRow;

    fn options() -> LayoutOptions {
        LayoutOptions {
            title: "Revenue per customer".to_string(),
            subtitle: None,
            currency_symbol: "EUR ".to_string(),
        }
    }

    #[test]
    fn test_renders_pdf_bytes() {
        let summary = RevenueSummary {
            rows: vec![RevenueRow {
                name: "Alex".to_string(),
                total: 7.5,
            }],
            grand_total: 7.5,
        };

        let bytes = render_revenue_pdf(&summary, &options()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_renders_euro_sign() {
        let summary = RevenueSummary {
            rows: vec![RevenueRow {
                name: "Zoë".to_string(),
                total: 4.0,
            }],
            grand_total: 4.0,
        };
        let options = LayoutOptions {
            currency_symbol: "€ ".to_string(),
            ..options()
        };

        let bytes = render_revenue_pdf(&summary, &options).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_renders_multi_page_pdf() {
        let rows: Vec<RevenueRow> = (0..120)
            .map(|i| RevenueRow {
                name: format!("Customer {i}"),
                total: 1.0,
            })
            .collect();
        let summary = RevenueSummary {
            rows,
            grand_total: 120.0,
        };

        let bytes = render_revenue_pdf(&summary, &options()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
