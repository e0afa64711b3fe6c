//! Page layout of the revenue report
//!
//! Layout is decided here, independent of any PDF library: every line of the
//! report gets a page and a vertical position. Positions are millimetres
//! measured from the bottom edge of an A4 portrait page, like PDF itself.

use crate::core::report::{RevenueSummary, format_currency};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

pub const MARGIN_MM: f32 = 20.0;
/// Left edge of the name column
pub const NAME_X_MM: f32 = MARGIN_MM;
/// Left edge of the amount column
pub const AMOUNT_X_MM: f32 = 140.0;
/// Right end of the rule above the grand total
pub const RULE_END_X_MM: f32 = PAGE_WIDTH_MM - MARGIN_MM;

const TOP_MM: f32 = PAGE_HEIGHT_MM - MARGIN_MM;
const SUBTITLE_DROP_MM: f32 = 7.0;
const HEADER_DROP_MM: f32 = 19.0;
const ROW_HEIGHT_MM: f32 = 8.0;
const RULE_RISE_MM: f32 = 4.0;
const TOTAL_DROP_MM: f32 = 2.0;

/// Longer names are cut so they stay clear of the amount column
pub const MAX_NAME_CHARS: usize = 45;

/// What goes on a line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Title(String),
    Subtitle(String),
    /// "Name / Amount"
    ColumnHeader,
    Row { name: String, amount: String },
    Rule,
    GrandTotal { amount: String },
}

/// A line and its baseline
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub y_mm: f32,
    pub kind: LineKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

impl Page {
    fn push(&mut self, y_mm: f32, kind: LineKind) {
        self.lines.push(PlacedLine { y_mm, kind });
    }
}

/// Text that is not taken from the data
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub title: String,
    pub subtitle: Option<String>,
    pub currency_symbol: String,
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_CHARS {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(MAX_NAME_CHARS - 3).collect();
    cut.push_str("...");
    cut
}

struct Cursor {
    pages: Vec<Page>,
    y_mm: f32,
}

impl Cursor {
    fn page(&mut self) -> &mut Page {
        // a Cursor always holds at least the first page
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Start a new page with the column header repeated at the top
    fn break_page(&mut self) {
        let mut page = Page::default();
        page.push(TOP_MM, LineKind::ColumnHeader);
        self.pages.push(page);
        self.y_mm = TOP_MM - ROW_HEIGHT_MM;
    }
}

/// Lay out the report: title, column header, one row per customer, then a
/// rule and the grand total. Rows never go below the bottom margin; the rule
/// and total always share a page.
pub fn layout(summary: &RevenueSummary, opts: &LayoutOptions) -> Vec<Page> {
    let mut first = Page::default();
    first.push(TOP_MM, LineKind::Title(opts.title.clone()));
    if let Some(subtitle) = &opts.subtitle {
        first.push(TOP_MM - SUBTITLE_DROP_MM, LineKind::Subtitle(subtitle.clone()));
    }
    let header_y = TOP_MM - HEADER_DROP_MM;
    first.push(header_y, LineKind::ColumnHeader);

    let mut cursor = Cursor {
        pages: vec![first],
        y_mm: header_y - ROW_HEIGHT_MM,
    };

    for row in &summary.rows {
        if cursor.y_mm < MARGIN_MM {
            cursor.break_page();
        }
        let y = cursor.y_mm;
        cursor.page().push(
            y,
            LineKind::Row {
                name: truncate_name(&row.name),
                amount: format_currency(row.total, &opts.currency_symbol),
            },
        );
        cursor.y_mm -= ROW_HEIGHT_MM;
    }

    if cursor.y_mm - TOTAL_DROP_MM < MARGIN_MM {
        cursor.break_page();
    }
    let y = cursor.y_mm;
    let amount = format_currency(summary.grand_total, &opts.currency_symbol);
    let page = cursor.page();
    page.push(y + RULE_RISE_MM, LineKind::Rule);
    page.push(y - TOTAL_DROP_MM, LineKind::GrandTotal { amount });

    cursor.pages
}
