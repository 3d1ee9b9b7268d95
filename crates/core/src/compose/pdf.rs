//! PDF 1.4 serialization of a [`FlowDocument`].
//!
//! Writes an uncompressed file using the standard Type1 fonts with
//! `WinAnsiEncoding`, so no font data is embedded. Object layout:
//!
//! | id | object |
//! |----|--------|
//! | 1 | catalog |
//! | 2 | page tree |
//! | 3..=5 | fonts, in [`Font::ALL`] order |
//! | 6 | info dictionary |
//! | 7 + 2n | page n |
//! | 8 + 2n | content stream of page n |

use super::document::{Color, Element, FlowDocument, PAGE_HEIGHT, PAGE_WIDTH, Page};
use super::metrics::Font;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FIRST_FONT_ID: usize = 3;
const INFO_ID: usize = 6;
const FIRST_PAGE_ID: usize = 7;

/// Bezier control distance for a quarter circle, in ten-thousandths of the radius.
const KAPPA: i32 = 5523;

/// Serializes the document into PDF bytes.
#[must_use]
pub fn write(document: &FlowDocument) -> Vec<u8> {
    let mut out = PdfBuffer::default();
    out.raw(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");

    let page_ids: Vec<usize> = (0..document.pages.len())
        .map(|index| FIRST_PAGE_ID + 2 * index)
        .collect();

    out.object(
        CATALOG_ID,
        &format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>"),
    );

    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");
    out.object(
        PAGES_ID,
        &format!(
            "<< /Type /Pages /Kids [{kids}] /Count {} >>",
            page_ids.len()
        ),
    );

    for (offset, font) in Font::ALL.into_iter().enumerate() {
        out.object(
            FIRST_FONT_ID + offset,
            &format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_name()
            ),
        );
    }

    let created = document.created_at.format("D:%Y%m%d%H%M%SZ");
    out.object(
        INFO_ID,
        &format!(
            "<< /Title ({}) /Author ({}) /Subject ({}) /Producer ({}) /CreationDate ({created}) >>",
            escape(&document.title),
            escape(&document.author),
            escape(&document.subject),
            escape(&document.author),
        ),
    );

    let font_resources = Font::ALL
        .into_iter()
        .enumerate()
        .map(|(offset, font)| format!("/{} {} 0 R", font.resource_name(), FIRST_FONT_ID + offset))
        .collect::<Vec<_>>()
        .join(" ");

    for (page, page_id) in document.pages.iter().zip(&page_ids) {
        let content_id = page_id + 1;
        out.object(
            *page_id,
            &format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << {font_resources} >> >> /Contents {content_id} 0 R >>"
            ),
        );
        let stream = content_stream(page);
        out.object(
            content_id,
            &format!(
                "<< /Length {} >>\nstream\n{stream}\nendstream",
                stream.len()
            ),
        );
    }

    out.finish(INFO_ID + 1 + 2 * document.pages.len())
}

/// Output buffer that records object offsets for the xref table.
#[derive(Default)]
struct PdfBuffer {
    bytes: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfBuffer {
    fn raw(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    fn object(&mut self, id: usize, body: &str) {
        self.offsets.push((id, self.bytes.len()));
        self.raw(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn finish(mut self, size: usize) -> Vec<u8> {
        self.offsets.sort_unstable();
        let xref_offset = self.bytes.len();

        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {size} /Root {CATALOG_ID} 0 R /Info {INFO_ID} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        ));
        self.raw(xref.as_bytes());
        self.bytes
    }
}

fn content_stream(page: &Page) -> String {
    let mut ops = String::new();
    for element in &page.elements {
        match element {
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                ops.push_str(&format!("{} rg\n{x} {y} {width} {height} re\nf\n", rgb(*fill)));
            }
            Element::Circle {
                cx,
                cy,
                radius,
                fill,
            } => {
                let (cx, cy, r) = (*cx, *cy, *radius);
                let k = r * KAPPA / 10_000;
                ops.push_str(&format!("{} rg\n{} {cy} m\n", rgb(*fill), cx + r));
                ops.push_str(&format!("{} {} {} {} {cx} {} c\n", cx + r, cy + k, cx + k, cy + r, cy + r));
                ops.push_str(&format!("{} {} {} {} {} {cy} c\n", cx - k, cy + r, cx - r, cy + k, cx - r));
                ops.push_str(&format!("{} {} {} {} {cx} {} c\n", cx - r, cy - k, cx - k, cy - r, cy - r));
                ops.push_str(&format!("{} {} {} {} {} {cy} c\nf\n", cx + k, cy - r, cx + r, cy - k, cx + r));
            }
            Element::Line {
                from,
                to,
                stroke,
                width,
            } => {
                ops.push_str(&format!(
                    "{} RG\n{width} w\n{} {} m\n{} {} l\nS\n",
                    rgb(*stroke),
                    from.0,
                    from.1,
                    to.0,
                    to.1
                ));
            }
            Element::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => {
                ops.push_str(&format!(
                    "{} rg\nBT\n/{} {size} Tf\n{x} {y} Td\n({}) Tj\nET\n",
                    rgb(*color),
                    font.resource_name(),
                    escape(text)
                ));
            }
        }
    }
    ops
}

/// Colour operands as three fixed-point fractions, e.g. `0.058 0.090 0.164`.
fn rgb(Color(r, g, b): Color) -> String {
    format!("{} {} {}", unit(r), unit(g), unit(b))
}

fn unit(channel: u8) -> String {
    let thousandths = u32::from(channel) * 1000 / 255;
    format!("{}.{:03}", thousandths / 1000, thousandths % 1000)
}

/// Escapes a string literal body. Latin-1 characters are written as octal
/// escapes (WinAnsi agrees with Latin-1 there); everything else becomes `?`.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ' '..='~' => escaped.push(ch),
            '\u{a0}'..='\u{ff}' => escaped.push_str(&format!("\\{:03o}", u32::from(ch))),
            _ => escaped.push('?'),
        }
    }
    escaped
}
