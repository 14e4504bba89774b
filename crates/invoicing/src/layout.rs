//! Invoice page layout.
//!
//! The page is described top to bottom as a list of blocks. Each block knows
//! its own height and draws itself at the cursor's current top; the cursor
//! then advances by that height. Coordinates are millimetres on an A4
//! portrait page with the origin at the top-left corner, and text positions
//! are baselines.
//!
//! Drawing produces a flat list of [`DrawOp`]s. Nothing here touches PDF
//! objects; see [`crate::pdf`] for serialization.

use invoicer_core::{format_currency, format_long_date, net_terms};

use crate::error::RenderError;
use crate::invoice::InvoiceRecord;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const FOOTER_HEIGHT_MM: f32 = 30.0;

/// Baseline distance between stacked 10pt lines (1.15 line-height factor).
pub const LINE_HEIGHT_MM: f32 = 10.0 * 1.15 * 25.4 / 72.0;

const LEFT_MM: f32 = 20.0;
const RIGHT_MM: f32 = 190.0;
const META_X_MM: f32 = 120.0;
const QUANTITY_X_MM: f32 = 100.0;
const PRICE_X_MM: f32 = 130.0;
const TOTAL_X_MM: f32 = 160.0;

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;

const FOOTER_FILL: Rgb = Rgb(233, 240, 240);
const COMPANY_LINES: [&str; 3] = [
    "Company Address: 1234 Random Street, City, Country",
    "Phone: +1234567890",
    "Email: contact@company.com",
];
const BANK_LINES: [&str; 3] = [
    "Bank Account: GB29 NWBK 6016 1331 9268 19",
    "Sort Code: 60-01-01",
    "IBAN: GB29 NWBK 6016 1331 9268 19",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Box in page millimetres (top-left anchored).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MmRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        face: FontFace,
        size: f32,
        text: String,
    },
    /// Horizontal rule at `y` from `x1` to `x2`.
    Rule { x1: f32, x2: f32, y: f32 },
    FillRect { rect: MmRect, color: Rgb },
    Logo { rect: MmRect },
}

/// Collects draw operations in paint order.
#[derive(Debug, Default)]
pub struct Canvas {
    ops: Vec<DrawOp>,
}

impl Canvas {
    pub fn text(&mut self, x: f32, y: f32, face: FontFace, size: f32, text: impl Into<String>) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            face,
            size,
            text: text.into(),
        });
    }

    /// Stack lines downward starting at baseline `y`.
    pub fn lines<S: AsRef<str>>(&mut self, x: f32, y: f32, size: f32, lines: &[S]) {
        for (idx, line) in lines.iter().enumerate() {
            let baseline = y + idx as f32 * LINE_HEIGHT_MM;
            self.text(x, baseline, FontFace::Regular, size, line.as_ref());
        }
    }

    pub fn rule(&mut self, x1: f32, x2: f32, y: f32) {
        self.ops.push(DrawOp::Rule { x1, x2, y });
    }

    pub fn fill_rect(&mut self, rect: MmRect, color: Rgb) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    pub fn logo(&mut self, rect: MmRect) {
        self.ops.push(DrawOp::Logo { rect });
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

/// A vertical slice of the page.
pub trait Block: std::fmt::Debug + Send + Sync {
    /// Distance the cursor advances after this block, in millimetres.
    fn height(&self) -> f32;

    /// Draw with the block's top edge at `top`.
    fn draw(&self, top: f32, canvas: &mut Canvas);
}

/// Title on the left, logo on the right.
#[derive(Debug)]
pub struct HeaderBlock {
    pub title: String,
}

impl Block for HeaderBlock {
    fn height(&self) -> f32 {
        43.0
    }

    fn draw(&self, top: f32, canvas: &mut Canvas) {
        canvas.logo(MmRect {
            x: 140.0,
            y: top + 15.0,
            width: 50.0,
            height: 8.0,
        });
        canvas.text(LEFT_MM, top + 20.0, FontFace::Regular, TITLE_SIZE, &self.title);
    }
}

/// "From" / "Invoice to" heading with stacked contact lines.
#[derive(Debug)]
pub struct PartyBlock {
    pub heading: &'static str,
    pub lines: Vec<String>,
}

impl Block for PartyBlock {
    fn height(&self) -> f32 {
        30.0
    }

    fn draw(&self, top: f32, canvas: &mut Canvas) {
        canvas.text(LEFT_MM, top, FontFace::Regular, HEADING_SIZE, self.heading);
        canvas.lines(LEFT_MM, top + 5.0, BODY_SIZE, &self.lines);
    }
}

/// Invoice number, issue date and payment term in the right-hand column.
#[derive(Debug)]
pub struct MetadataBlock {
    pub lines: Vec<String>,
}

impl Block for MetadataBlock {
    fn height(&self) -> f32 {
        30.0
    }

    fn draw(&self, top: f32, canvas: &mut Canvas) {
        for (idx, line) in self.lines.iter().enumerate() {
            canvas.text(META_X_MM, top + 5.0 * idx as f32, FontFace::Regular, BODY_SIZE, line);
        }
    }
}

/// One formatted row of the item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub description: String,
    pub quantity: String,
    pub price: String,
    pub total: String,
}

#[derive(Debug)]
pub struct ItemTableBlock {
    pub rows: Vec<TableRow>,
}

impl ItemTableBlock {
    const HEADER_HEIGHT: f32 = 10.0;
    const ROW_HEIGHT: f32 = 10.0;
}

impl Block for ItemTableBlock {
    fn height(&self) -> f32 {
        Self::HEADER_HEIGHT + Self::ROW_HEIGHT * self.rows.len() as f32
    }

    fn draw(&self, top: f32, canvas: &mut Canvas) {
        let headers = [
            (LEFT_MM, "Description"),
            (QUANTITY_X_MM, "Quantity"),
            (PRICE_X_MM, "Price"),
            (TOTAL_X_MM, "Total"),
        ];
        for (x, label) in headers {
            canvas.text(x, top, FontFace::Bold, BODY_SIZE, label);
        }
        canvas.rule(LEFT_MM, RIGHT_MM, top + 2.0);

        for (idx, row) in self.rows.iter().enumerate() {
            let y = top + Self::HEADER_HEIGHT + Self::ROW_HEIGHT * idx as f32;
            canvas.text(LEFT_MM, y, FontFace::Regular, BODY_SIZE, &row.description);
            canvas.text(QUANTITY_X_MM, y, FontFace::Regular, BODY_SIZE, &row.quantity);
            canvas.text(PRICE_X_MM, y, FontFace::Regular, BODY_SIZE, &row.price);
            canvas.text(TOTAL_X_MM, y, FontFace::Regular, BODY_SIZE, &row.total);
        }
    }
}

#[derive(Debug)]
pub struct TotalsBlock {
    pub label: String,
    pub amount: String,
}

impl Block for TotalsBlock {
    fn height(&self) -> f32 {
        10.0
    }

    fn draw(&self, top: f32, canvas: &mut Canvas) {
        canvas.rule(LEFT_MM, RIGHT_MM, top);
        canvas.text(PRICE_X_MM, top + 5.0, FontFace::Bold, BODY_SIZE, &self.label);
        canvas.text(TOTAL_X_MM, top + 5.0, FontFace::Bold, BODY_SIZE, &self.amount);
    }
}

#[derive(Debug)]
pub struct NoteBlock {
    pub lines: Vec<String>,
}

impl Block for NoteBlock {
    fn height(&self) -> f32 {
        let extra = self.lines.len().saturating_sub(1) as f32;
        20.0 + extra * LINE_HEIGHT_MM
    }

    fn draw(&self, top: f32, canvas: &mut Canvas) {
        canvas.text(LEFT_MM, top + 10.0, FontFace::Regular, BODY_SIZE, "Note:");
        canvas.lines(LEFT_MM, top + 15.0, BODY_SIZE, &self.lines);
    }
}

/// Where the footer ended up relative to the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterPlacement {
    /// Anchored to the bottom edge of the page.
    PageBottom,
    /// Directly below the last content block.
    BelowContent,
}

/// Top edge of the footer for content ending at `content_bottom`.
///
/// Block heights include their trailing 10 mm gap, which serves as the
/// bottom margin above the footer. The footer sits on the page bottom when
/// the space left below the content can hold it (boundary included);
/// otherwise it follows the content and may run off the page, but never
/// over the content.
pub fn place_footer(content_bottom: f32) -> (f32, FooterPlacement) {
    let remaining = PAGE_HEIGHT_MM - content_bottom;
    if remaining >= FOOTER_HEIGHT_MM {
        (PAGE_HEIGHT_MM - FOOTER_HEIGHT_MM, FooterPlacement::PageBottom)
    } else {
        (content_bottom, FooterPlacement::BelowContent)
    }
}

fn draw_footer(top: f32, canvas: &mut Canvas) {
    canvas.fill_rect(
        MmRect {
            x: 0.0,
            y: top,
            width: PAGE_WIDTH_MM,
            height: FOOTER_HEIGHT_MM,
        },
        FOOTER_FILL,
    );
    for (idx, (company, bank)) in COMPANY_LINES.iter().zip(BANK_LINES.iter()).enumerate() {
        let y = top + 10.0 + 5.0 * idx as f32;
        canvas.text(LEFT_MM, y, FontFace::Regular, BODY_SIZE, *company);
        canvas.text(META_X_MM, y, FontFace::Regular, BODY_SIZE, *bank);
    }
}

/// A fully drawn page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
    pub content_bottom: f32,
    pub footer_top: f32,
    pub footer: FooterPlacement,
}

impl Page {
    /// All text runs in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }
}

/// Ordered blocks for one invoice.
#[derive(Debug)]
pub struct InvoiceLayout {
    blocks: Vec<Box<dyn Block>>,
}

impl InvoiceLayout {
    pub fn new(blocks: Vec<Box<dyn Block>>) -> Self {
        Self { blocks }
    }

    /// Build the blocks for `record`, formatting every amount and date up front.
    pub fn from_record(record: &InvoiceRecord) -> Result<Self, RenderError> {
        let currency = record.currency.as_str();

        let mut rows = Vec::new();
        for (item, amount) in record.billed_items() {
            rows.push(TableRow {
                description: item.description.clone(),
                quantity: item.quantity.normalize().to_string(),
                price: format_currency(item.rate, currency)?,
                total: format_currency(amount, currency)?,
            });
        }

        let mut blocks: Vec<Box<dyn Block>> = vec![
            Box::new(HeaderBlock {
                title: record.invoice_name.clone(),
            }),
            Box::new(PartyBlock {
                heading: "From",
                lines: record.from.lines().map(str::to_string).to_vec(),
            }),
            Box::new(PartyBlock {
                heading: "Invoice to",
                lines: record.client.lines().map(str::to_string).to_vec(),
            }),
            Box::new(MetadataBlock {
                lines: vec![
                    format!("Invoice Number: #{}", record.invoice_number),
                    format!("Date: {}", format_long_date(record.date)),
                    format!("Due Date: {}", net_terms(record.due_date)),
                ],
            }),
            Box::new(ItemTableBlock { rows }),
            Box::new(TotalsBlock {
                label: format!("Total ({})", record.currency),
                amount: format_currency(record.total, currency)?,
            }),
        ];

        if let Some(note) = record.note() {
            blocks.push(Box::new(NoteBlock {
                lines: note.lines().map(str::to_string).collect(),
            }));
        }

        Ok(Self::new(blocks))
    }

    pub fn blocks(&self) -> &[Box<dyn Block>] {
        &self.blocks
    }

    /// Sum of block heights, i.e. where the cursor ends.
    pub fn content_height(&self) -> f32 {
        self.blocks.iter().map(|b| b.height()).sum()
    }

    pub fn draw(&self) -> Page {
        let mut canvas = Canvas::default();
        let mut cursor = 0.0;
        for block in &self.blocks {
            block.draw(cursor, &mut canvas);
            cursor += block.height();
        }

        let (footer_top, footer) = place_footer(cursor);
        draw_footer(footer_top, &mut canvas);

        Page {
            ops: canvas.into_ops(),
            content_bottom: cursor,
            footer_top,
            footer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::fixtures::design_work_invoice;

    fn text_at(page: &Page, needle: &str) -> (f32, f32, FontFace) {
        page.ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, y, face, text, .. } if text == needle => Some((*x, *y, *face)),
                _ => None,
            })
            .unwrap_or_else(|| panic!("text {needle:?} not drawn"))
    }

    #[test]
    fn example_invoice_row_and_totals() {
        let page = InvoiceLayout::from_record(&design_work_invoice())
            .unwrap()
            .draw();

        assert_eq!(text_at(&page, "Invoice #1"), (20.0, 20.0, FontFace::Regular));
        assert_eq!(text_at(&page, "Design work"), (20.0, 143.0, FontFace::Regular));
        assert_eq!(text_at(&page, "10"), (100.0, 143.0, FontFace::Regular));
        assert_eq!(text_at(&page, "$50.00"), (130.0, 143.0, FontFace::Regular));
        assert_eq!(text_at(&page, "Total (USD)"), (130.0, 158.0, FontFace::Bold));

        let totals: Vec<_> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, y, face, text, .. } if text == "$500.00" => Some((*x, *y, *face)),
                _ => None,
            })
            .collect();
        assert_eq!(
            totals,
            vec![(160.0, 143.0, FontFace::Regular), (160.0, 158.0, FontFace::Bold)]
        );
    }

    #[test]
    fn metadata_lines_use_long_date_and_net_terms() {
        let page = InvoiceLayout::from_record(&design_work_invoice())
            .unwrap()
            .draw();

        assert_eq!(text_at(&page, "Invoice Number: #1"), (120.0, 103.0, FontFace::Regular));
        assert_eq!(text_at(&page, "Date: January 5, 2024"), (120.0, 108.0, FontFace::Regular));
        assert_eq!(text_at(&page, "Due Date: Net 30"), (120.0, 113.0, FontFace::Regular));
    }

    #[test]
    fn party_blocks_stack_name_email_address() {
        let page = InvoiceLayout::from_record(&design_work_invoice())
            .unwrap()
            .draw();

        assert_eq!(text_at(&page, "From").1, 43.0);
        assert_eq!(text_at(&page, "Jane Builder").1, 48.0);
        let (_, email_y, _) = text_at(&page, "jane@builder.dev");
        assert!((email_y - (48.0 + LINE_HEIGHT_MM)).abs() < 1e-4);
        assert_eq!(text_at(&page, "Invoice to").1, 73.0);
        assert_eq!(text_at(&page, "Acme Corp").1, 78.0);
    }

    #[test]
    fn table_header_is_bold_and_ruled() {
        let page = InvoiceLayout::from_record(&design_work_invoice())
            .unwrap()
            .draw();

        for label in ["Description", "Quantity", "Price", "Total"] {
            assert_eq!(text_at(&page, label).2, FontFace::Bold);
        }
        let rules: Vec<_> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rule { x1, x2, y } => Some((*x1, *x2, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(rules, vec![(20.0, 190.0, 135.0), (20.0, 190.0, 153.0)]);
    }

    #[test]
    fn note_section_only_when_note_present() {
        let mut record = design_work_invoice();
        let page = InvoiceLayout::from_record(&record).unwrap().draw();
        assert!(!page.contains_text("Note:"));

        record.note = Some("Payment via bank transfer.\nThank you!".to_string());
        let page = InvoiceLayout::from_record(&record).unwrap().draw();
        assert_eq!(text_at(&page, "Note:"), (20.0, 173.0, FontFace::Regular));
        assert_eq!(text_at(&page, "Payment via bank transfer.").1, 178.0);
        assert!(page.contains_text("Thank you!"));
    }

    #[test]
    fn quantity_is_printed_without_trailing_zeros() {
        let mut record = design_work_invoice();
        record.item.quantity = rust_decimal_macros::dec!(2.50);
        let page = InvoiceLayout::from_record(&record).unwrap().draw();
        assert!(page.contains_text("2.5"));
    }

    #[test]
    fn unknown_currency_fails_layout() {
        let mut record = design_work_invoice();
        record.currency = "ZZZ".to_string();
        let err = InvoiceLayout::from_record(&record).unwrap_err();
        assert!(matches!(err, RenderError::Domain(_)));
    }

    #[test]
    fn short_content_anchors_footer_to_page_bottom() {
        let page = InvoiceLayout::from_record(&design_work_invoice())
            .unwrap()
            .draw();

        assert_eq!(page.footer, FooterPlacement::PageBottom);
        assert_eq!(page.footer_top, 267.0);
        assert!(page.ops.iter().any(|op| matches!(
            op,
            DrawOp::FillRect { rect, color }
                if rect.y == 267.0 && rect.width == PAGE_WIDTH_MM && *color == Rgb(233, 240, 240)
        )));
        assert_eq!(text_at(&page, "Phone: +1234567890"), (20.0, 282.0, FontFace::Regular));
        assert_eq!(text_at(&page, "Sort Code: 60-01-01"), (120.0, 282.0, FontFace::Regular));
    }

    #[test]
    fn tall_content_pushes_footer_below_it() {
        let rows = (0..12)
            .map(|i| TableRow {
                description: format!("Item {i}"),
                quantity: "1".to_string(),
                price: "$1.00".to_string(),
                total: "$1.00".to_string(),
            })
            .collect();
        let blocks: Vec<Box<dyn Block>> = vec![
            Box::new(HeaderBlock {
                title: "Long".to_string(),
            }),
            Box::new(ItemTableBlock { rows }),
            Box::new(NoteBlock {
                lines: vec!["a".to_string(); 20],
            }),
        ];
        let layout = InvoiceLayout::new(blocks);

        let page = layout.draw();
        assert!(page.content_bottom > PAGE_HEIGHT_MM - FOOTER_HEIGHT_MM);
        assert_eq!(page.footer, FooterPlacement::BelowContent);
        assert_eq!(page.footer_top, page.content_bottom);
    }

    #[test]
    fn footer_threshold_is_inclusive() {
        let limit = PAGE_HEIGHT_MM - FOOTER_HEIGHT_MM;
        assert_eq!(place_footer(limit), (267.0, FooterPlacement::PageBottom));
        assert_eq!(place_footer(limit + 0.5), (limit + 0.5, FooterPlacement::BelowContent));
    }

    #[test]
    fn content_inside_the_last_forty_mm_keeps_footer_anchored() {
        assert_eq!(place_footer(257.0), (267.0, FooterPlacement::PageBottom));
        assert_eq!(place_footer(260.0), (267.0, FooterPlacement::PageBottom));
        assert_eq!(place_footer(266.9).1, FooterPlacement::PageBottom);
    }

    #[test]
    fn content_height_follows_block_heights() {
        let mut record = design_work_invoice();
        let layout = InvoiceLayout::from_record(&record).unwrap();
        assert_eq!(layout.blocks().len(), 6);
        assert_eq!(layout.content_height(), 163.0);

        record.note = Some("one line".to_string());
        let layout = InvoiceLayout::from_record(&record).unwrap();
        assert_eq!(layout.content_height(), 183.0);
    }
}
