use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Point, Pt,
};

use crate::error::ReportError;
use crate::layout::{ReportDocument, Section, TableRow};

// Letter geometry, in points. printpdf's `Pt` is f32, so the whole
// drawing layer stays in f32.
const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
const MARGIN_PT: f32 = 50.0;

// Vehicle performance table: (left edge, width, right-aligned).
const TABLE_COLUMNS: [(f32, f32, bool); 5] = [
    (50.0, 100.0, false),
    (160.0, 120.0, false),
    (290.0, 60.0, true),
    (360.0, 60.0, true),
    (430.0, 80.0, true),
];
const TABLE_HEADERS: [&str; 5] = ["VIN", "Make/Model", "Hours", "Orders", "Cost"];
const TABLE_RULE_RIGHT_PT: f32 = 520.0;

// Approximate per-character advance for built-in Helvetica, enough for
// centering and right alignment of short strings.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

fn pt(value: f32) -> Mm {
    Mm::from(Pt(value))
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * GLYPH_WIDTH_RATIO
}

/// Tracks the page list and a top-down cursor while sections are drawn.
/// The page list is what makes the footer pass possible: the total page
/// count is only known once every section has been laid out.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    y: f32,
}

impl<'a> PageCursor<'a> {
    fn new(doc: &'a PdfDocumentReference, first_page: PdfPageIndex, first_layer: PdfLayerIndex) -> Self {
        Self {
            doc,
            pages: vec![(first_page, first_layer)],
            y: MARGIN_PT,
        }
    }

    fn layer(&self) -> PdfLayerReference {
        let (page, layer) = self.pages[self.pages.len() - 1];
        self.doc.get_page(page).get_layer(layer)
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(pt(PAGE_WIDTH_PT), pt(PAGE_HEIGHT_PT), "Layer 1");
        self.pages.push((page, layer));
        self.y = MARGIN_PT;
    }

    /// Break to a new page if fewer than `needed` points remain above the
    /// bottom margin.
    fn ensure_room(&mut self, needed: f32) {
        if self.y + needed > PAGE_HEIGHT_PT - MARGIN_PT {
            self.new_page();
        }
    }

    fn text_at(&self, text: &str, font_size: f32, x: f32, font: &IndirectFontRef) {
        self.layer()
            .use_text(text, font_size, pt(x), pt(PAGE_HEIGHT_PT - self.y), font);
    }

    fn text_centered(&self, text: &str, font_size: f32, font: &IndirectFontRef) {
        let x = (PAGE_WIDTH_PT - text_width(text, font_size)) / 2.0;
        self.text_at(text, font_size, x.max(MARGIN_PT), font);
    }

    fn rule(&self, from_x: f32, to_x: f32) {
        let layer = self.layer();
        let y = PAGE_HEIGHT_PT - self.y;
        layer.set_outline_thickness(1.0);
        layer.add_line(Line {
            points: vec![
                (Point::new(pt(from_x), pt(y)), false),
                (Point::new(pt(to_x), pt(y)), false),
            ],
            is_closed: false,
        });
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn draw_section_title(cursor: &mut PageCursor<'_>, fonts: &Fonts, title: &str) {
    cursor.ensure_room(30.0);
    cursor.y += 14.0;
    cursor.text_at(title, 14.0, MARGIN_PT, &fonts.bold);
    cursor.y += 10.0;
}

fn draw_lines(cursor: &mut PageCursor<'_>, fonts: &Fonts, lines: &[String], spacing: f32) {
    for line in lines {
        cursor.ensure_room(spacing);
        cursor.y += spacing;
        cursor.text_at(line, 10.0, MARGIN_PT, &fonts.regular);
    }
}

fn draw_table_cells(
    cursor: &PageCursor<'_>,
    font: &IndirectFontRef,
    font_size: f32,
    cells: [&str; 5],
) {
    for ((left, width, right_aligned), cell) in TABLE_COLUMNS.iter().zip(cells) {
        let x = if *right_aligned {
            left + width - text_width(cell, font_size)
        } else {
            *left
        };
        cursor.text_at(cell, font_size, x, font);
    }
}

fn draw_table(cursor: &mut PageCursor<'_>, fonts: &Fonts, rows: &[TableRow]) {
    cursor.y += 12.0;
    draw_table_cells(cursor, &fonts.bold, 9.0, TABLE_HEADERS);
    cursor.y += 6.0;
    cursor.rule(MARGIN_PT, TABLE_RULE_RIGHT_PT);

    for row in rows {
        cursor.ensure_room(11.0);
        cursor.y += 11.0;
        draw_table_cells(
            cursor,
            &fonts.regular,
            8.0,
            [
                row.vin.as_str(),
                row.make_model.as_str(),
                row.hours.as_str(),
                row.orders.as_str(),
                row.cost.as_str(),
            ],
        );
    }
}

/// Serialize a laid-out report into PDF bytes: one synchronous pass over
/// the sections, then the `Page {i} of {N}` footer on every page once the
/// count is final.
pub fn render(document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Fleet Management Report",
        pt(PAGE_WIDTH_PT),
        pt(PAGE_HEIGHT_PT),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    let mut cursor = PageCursor::new(&doc, first_page, first_layer);

    for section in &document.sections {
        match section {
            Section::Header { title, generated_at } => {
                cursor.y += 20.0;
                cursor.text_centered(title, 20.0, &fonts.bold);
                cursor.y += 16.0;
                let stamp = format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
                cursor.text_centered(&stamp, 10.0, &fonts.regular);
                cursor.y += 10.0;
            }
            Section::Summary { title, lines } => {
                draw_section_title(&mut cursor, &fonts, title);
                let rendered: Vec<String> = lines
                    .iter()
                    .map(|(label, value)| format!("{}: {}", label, value))
                    .collect();
                draw_lines(&mut cursor, &fonts, &rendered, 14.0);
                cursor.y += 10.0;
            }
            Section::List { title, lines } => {
                draw_section_title(&mut cursor, &fonts, title);
                draw_lines(&mut cursor, &fonts, lines, 14.0);
                cursor.y += 10.0;
            }
            Section::Table { title, rows } => {
                cursor.new_page();
                draw_section_title(&mut cursor, &fonts, title);
                draw_table(&mut cursor, &fonts, rows);
            }
            Section::Cost { title, lines } => {
                cursor.new_page();
                draw_section_title(&mut cursor, &fonts, title);
                draw_lines(&mut cursor, &fonts, lines, 18.0);
            }
        }
    }

    let total = cursor.pages.len();
    for (i, (page, layer)) in cursor.pages.iter().enumerate() {
        let footer = format!("Page {} of {}", i + 1, total);
        let x = (PAGE_WIDTH_PT - text_width(&footer, 8.0)) / 2.0;
        doc.get_page(*page)
            .get_layer(*layer)
            .use_text(footer, 8.0, pt(x), pt(MARGIN_PT), &fonts.regular);
    }

    drop(cursor);
    Ok(doc.save_to_bytes()?)
}
