//! Flow document layout.
//!
//! Builds the page model for a paginated report: a dark cover page followed
//! by one page per section. All geometry is in whole PDF points with the
//! origin at the bottom-left corner of an A4 portrait page.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use nexus_shared::BrandingConfig;

use super::metrics::{Font, wrap};
use super::{ComposeError, Composer, CompositionContext, pdf};
use crate::catalog::{OutputFormat, SectionName};
use crate::content::ContentResolver;
use crate::financials::FinancialModelLibrary;

/// Page width in points (A4).
pub const PAGE_WIDTH: i32 = 595;
/// Page height in points (A4).
pub const PAGE_HEIGHT: i32 = 842;
/// Left and right margin in points.
pub const MARGIN: i32 = 57;
/// Printable width between the side margins.
pub const CONTENT_WIDTH: i32 = PAGE_WIDTH - 2 * MARGIN;

const HEADER_HEIGHT: i32 = 96;
const ENGINE_BASELINE: i32 = PAGE_HEIGHT - 34;
const TITLE_BASELINE: i32 = PAGE_HEIGHT - 74;
const SECTION_TITLE_SIZE: i32 = 18;
const RULE_Y: i32 = 720;
const BODY_TOP: i32 = 694;
const BODY_BOTTOM: i32 = 76;
const FOOTER_RULE_Y: i32 = 60;
const FOOTER_BASELINE: i32 = 44;

const BODY_SIZE: i32 = 11;
const BODY_LEADING: i32 = 16;
const TABLE_SIZE: i32 = 8;
const TABLE_LEADING: i32 = 12;
const TABLE_GAP: i32 = 10;

/// RGB fill or stroke colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Cover background and header band.
    pub const DARK: Self = Self(15, 23, 42);
    /// Logo disc.
    pub const ACCENT: Self = Self(37, 99, 235);
    /// Text on dark backgrounds.
    pub const WHITE: Self = Self(255, 255, 255);
    /// Body text.
    pub const TEXT: Self = Self(31, 41, 55);
    /// Secondary text.
    pub const MUTED: Self = Self(107, 114, 128);
    /// Secondary text on dark backgrounds.
    pub const MUTED_LIGHT: Self = Self(148, 163, 184);
    /// Rules.
    pub const RULE: Self = Self(209, 213, 219);
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Filled rectangle anchored at its bottom-left corner.
    Rect {
        /// Left edge.
        x: i32,
        /// Bottom edge.
        y: i32,
        /// Width.
        width: i32,
        /// Height.
        height: i32,
        /// Fill colour.
        fill: Color,
    },
    /// Filled circle.
    Circle {
        /// Centre x.
        cx: i32,
        /// Centre y.
        cy: i32,
        /// Radius.
        radius: i32,
        /// Fill colour.
        fill: Color,
    },
    /// Straight stroked line.
    Line {
        /// Start point.
        from: (i32, i32),
        /// End point.
        to: (i32, i32),
        /// Stroke colour.
        stroke: Color,
        /// Stroke width.
        width: i32,
    },
    /// A single line of text positioned at its baseline.
    Text {
        /// Left edge of the text.
        x: i32,
        /// Baseline.
        y: i32,
        /// Font.
        font: Font,
        /// Size in points.
        size: i32,
        /// Fill colour.
        color: Color,
        /// Text content.
        text: String,
    },
}

/// What a page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    /// Unlabelled cover page.
    Cover,
    /// A section page with its printed page number.
    Section {
        /// Section title.
        title: String,
        /// Printed page number (the cover counts as page 1).
        number: usize,
    },
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page role.
    pub kind: PageKind,
    /// Drawing primitives in paint order.
    pub elements: Vec<Element>,
}

impl Page {
    /// All text drawn on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Footer label, `None` for the cover.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self.kind {
            PageKind::Cover => None,
            PageKind::Section { number, .. } => Some(format!("Page {number}")),
        }
    }
}

/// Page model of a flow document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowDocument {
    /// Document title for the info dictionary.
    pub title: String,
    /// Producing engine.
    pub author: String,
    /// Subject name.
    pub subject: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Pages in order, cover first.
    pub pages: Vec<Page>,
}

impl FlowDocument {
    /// Number of pages including the cover.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Composes paginated PDF documents.
#[derive(Debug, Clone)]
pub struct DocumentComposer {
    resolver: Arc<ContentResolver>,
    library: Arc<FinancialModelLibrary>,
    branding: BrandingConfig,
}

impl DocumentComposer {
    /// Creates a composer over shared content sources.
    #[must_use]
    pub const fn new(
        resolver: Arc<ContentResolver>,
        library: Arc<FinancialModelLibrary>,
        branding: BrandingConfig,
    ) -> Self {
        Self {
            resolver,
            library,
            branding,
        }
    }

    /// Lays out the cover and one page per section.
    #[must_use]
    pub fn layout(&self, ctx: &CompositionContext<'_>) -> FlowDocument {
        let mut pages = Vec::with_capacity(ctx.sections.len() + 1);
        pages.push(self.cover_page(ctx));
        for (index, section) in ctx.sections.iter().enumerate() {
            pages.push(self.section_page(ctx, section, index + 2));
        }

        FlowDocument {
            title: format!("{} - {}", ctx.subject.name, ctx.archetype.name),
            author: self.branding.engine_name.clone(),
            subject: ctx.subject.name.clone(),
            created_at: ctx.generated_at,
            pages,
        }
    }

    fn cover_page(&self, ctx: &CompositionContext<'_>) -> Page {
        const LOGO_Y: i32 = 640;
        const LOGO_RADIUS: i32 = 42;
        const TITLE_SIZE: i32 = 26;
        const TITLE_LEADING: i32 = 32;

        let center = PAGE_WIDTH / 2;
        let mut elements = vec![
            Element::Rect {
                x: 0,
                y: 0,
                width: PAGE_WIDTH,
                height: PAGE_HEIGHT,
                fill: Color::DARK,
            },
            Element::Circle {
                cx: center,
                cy: LOGO_Y,
                radius: LOGO_RADIUS,
                fill: Color::ACCENT,
            },
            centered(&self.branding.logo_mark, LOGO_Y - 8, Font::Bold, 22, Color::WHITE),
        ];

        let mut y = 540;
        let title = ctx.archetype.name.to_uppercase();
        for line in wrap(&title, Font::Bold, TITLE_SIZE, CONTENT_WIDTH) {
            elements.push(centered(&line, y, Font::Bold, TITLE_SIZE, Color::WHITE));
            y -= TITLE_LEADING;
        }

        y -= 16;
        elements.push(centered(&ctx.subject.name, y, Font::Regular, 18, Color::WHITE));
        y -= 24;
        elements.push(centered(&ctx.subject.sector, y, Font::Regular, 12, Color::MUTED_LIGHT));

        let generated = format!("Generated: {}", ctx.display_date());
        elements.push(centered(&generated, 150, Font::Regular, 10, Color::MUTED_LIGHT));
        elements.push(centered(&self.branding.cover_notice, 110, Font::Bold, 9, Color::WHITE));

        Page {
            kind: PageKind::Cover,
            elements,
        }
    }

    fn section_page(&self, ctx: &CompositionContext<'_>, section: &SectionName, number: usize) -> Page {
        let title = section.title();
        let mut elements = vec![
            Element::Rect {
                x: 0,
                y: PAGE_HEIGHT - HEADER_HEIGHT,
                width: PAGE_WIDTH,
                height: HEADER_HEIGHT,
                fill: Color::DARK,
            },
            text(
                &self.branding.engine_name,
                MARGIN,
                ENGINE_BASELINE,
                Font::Bold,
                10,
                Color::WHITE,
            ),
            text(title, MARGIN, TITLE_BASELINE, Font::Bold, SECTION_TITLE_SIZE, Color::WHITE),
            rule(RULE_Y),
        ];

        let mut body = Vec::new();
        let prose = self.resolver.resolve(section, &ctx.subject.name);
        for line in wrap(&prose, Font::Regular, BODY_SIZE, CONTENT_WIDTH) {
            body.push((line, Font::Regular, BODY_SIZE, BODY_LEADING));
        }
        if let Some(table) = self.library.table_for(section) {
            body.push((String::new(), Font::Mono, TABLE_SIZE, TABLE_GAP));
            for line in table.text_lines() {
                body.push((line, Font::Mono, TABLE_SIZE, TABLE_LEADING));
            }
        }

        let mut y = BODY_TOP;
        let total = body.len();
        let mut placed = 0;
        for (line, font, size, leading) in body {
            if y < BODY_BOTTOM {
                break;
            }
            if !line.is_empty() {
                elements.push(text(&line, MARGIN, y, font, size, Color::TEXT));
            }
            y -= leading;
            placed += 1;
        }
        if placed < total {
            tracing::warn!(
                section = title,
                dropped = total - placed,
                "Section body exceeds one page, truncating"
            );
        }

        let label = format!("Page {number}");
        let label_width = Font::Regular.text_width(&label, 9);
        elements.push(rule(FOOTER_RULE_Y));
        elements.push(text(
            &self.branding.classification,
            MARGIN,
            FOOTER_BASELINE,
            Font::Regular,
            9,
            Color::MUTED,
        ));
        elements.push(text(
            &label,
            PAGE_WIDTH - MARGIN - label_width,
            FOOTER_BASELINE,
            Font::Regular,
            9,
            Color::MUTED,
        ));

        Page {
            kind: PageKind::Section {
                title: title.to_string(),
                number,
            },
            elements,
        }
    }
}

impl Composer for DocumentComposer {
    fn output_format(&self) -> OutputFormat {
        OutputFormat::FlowDocument
    }

    fn compose(&self, ctx: &CompositionContext<'_>) -> Result<Vec<u8>, ComposeError> {
        Ok(pdf::write(&self.layout(ctx)))
    }
}

fn text(content: &str, x: i32, y: i32, font: Font, size: i32, color: Color) -> Element {
    Element::Text {
        x,
        y,
        font,
        size,
        color,
        text: content.to_string(),
    }
}

fn centered(content: &str, y: i32, font: Font, size: i32, color: Color) -> Element {
    let x = (PAGE_WIDTH - font.text_width(content, size)) / 2;
    text(content, x, y, font, size, color)
}

fn rule(y: i32) -> Element {
    Element::Line {
        from: (MARGIN, y),
        to: (PAGE_WIDTH - MARGIN, y),
        stroke: Color::RULE,
        width: 1,
    }
}
