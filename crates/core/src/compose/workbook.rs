//! Workbook layout.
//!
//! A cover sheet followed by one sheet per section. Reserved sections become
//! full statement tables; every other section gets a short text block.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use nexus_shared::BrandingConfig;
use rust_decimal::Decimal;

use super::{ComposeError, Composer, CompositionContext, xlsx};
use crate::catalog::{OutputFormat, SectionName};
use crate::content::ContentResolver;
use crate::financials::{FinancialModelLibrary, FinancialStatementTable, RowKind};

/// Longest sheet name the container accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Column widths shared by every sheet, in character units.
pub const COLUMN_WIDTHS: [u8; 7] = [25, 5, 15, 15, 15, 15, 15];

/// Name of the first sheet.
pub const COVER_SHEET: &str = "Cover";

const FORBIDDEN_SHEET_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// No value.
    Empty,
    /// Plain text.
    Text(String),
    /// Bold text.
    Heading(String),
    /// Whole-unit amount shown with thousands separators.
    Amount(Decimal),
    /// Percentage in percent units (`65.0` for 65%).
    Percent(Decimal),
}

impl Cell {
    /// Text content, if this is a text or heading cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Heading(text) => Some(text),
            _ => None,
        }
    }
}

/// One worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet tab name, unique within the workbook.
    pub name: String,
    /// Rows from the top; an empty row is a spacer.
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Cell at a zero-based position, `None` past the row or column end.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }
}

/// Sheet model of a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    /// Title for the document properties.
    pub title: String,
    /// Producing engine.
    pub creator: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Sheets in tab order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Empty workbook.
    #[must_use]
    pub fn new(title: impl Into<String>, creator: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            creator: creator.into(),
            created_at,
            sheets: Vec::new(),
        }
    }

    /// Appends a sheet named after `title`, disambiguating collisions.
    pub fn push_sheet(&mut self, title: &str, rows: Vec<Vec<Cell>>) {
        let taken: HashSet<String> = self.sheets.iter().map(|s| s.name.to_lowercase()).collect();
        let mut name = sheet_name(title);
        if name.is_empty() {
            name = format!("Sheet{}", self.sheets.len() + 1);
        }
        let name = disambiguate(name, &taken);
        self.sheets.push(Sheet { name, rows });
    }

    /// Sheet names in tab order.
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Finds a sheet by exact name.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Sheet name for a section title.
///
/// Characters the container forbids are replaced with `-`, then the name is
/// cut to [`MAX_SHEET_NAME_LEN`] characters.
#[must_use]
pub fn sheet_name(title: &str) -> String {
    title
        .chars()
        .map(|ch| if FORBIDDEN_SHEET_CHARS.contains(&ch) { '-' } else { ch })
        .take(MAX_SHEET_NAME_LEN)
        .collect()
}

/// Appends ` (2)`, ` (3)`, ... until the name is free. Names compare
/// case-insensitively, as the container does.
fn disambiguate(name: String, taken: &HashSet<String>) -> String {
    if !taken.contains(&name.to_lowercase()) {
        return name;
    }
    let mut n = 2;
    loop {
        let suffix = format!(" ({n})");
        let stem: String = name
            .chars()
            .take(MAX_SHEET_NAME_LEN.saturating_sub(suffix.len()))
            .collect();
        let candidate = format!("{stem}{suffix}");
        if !taken.contains(&candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}

/// Composes multi-sheet XLSX workbooks.
#[derive(Debug, Clone)]
pub struct WorkbookComposer {
    resolver: Arc<ContentResolver>,
    library: Arc<FinancialModelLibrary>,
    branding: BrandingConfig,
}

impl WorkbookComposer {
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

    /// Lays out the cover sheet and one sheet per section.
    #[must_use]
    pub fn layout(&self, ctx: &CompositionContext<'_>) -> Workbook {
        let mut workbook = Workbook::new(
            format!("{} - {}", ctx.subject.name, ctx.archetype.name),
            self.branding.engine_name.clone(),
            ctx.generated_at,
        );
        workbook.push_sheet(COVER_SHEET, self.cover_rows(ctx));

        for section in &ctx.sections {
            let rows = match self.library.table_for(section) {
                Some(table) => statement_rows(table),
                None => self.summary_rows(section, &ctx.subject.name),
            };
            workbook.push_sheet(section.title(), rows);
        }
        workbook
    }

    fn cover_rows(&self, ctx: &CompositionContext<'_>) -> Vec<Vec<Cell>> {
        let label = |key: &str, value: &str| vec![Cell::Text(key.into()), Cell::Text(value.into())];
        vec![
            vec![Cell::Heading(ctx.archetype.name.clone())],
            vec![Cell::Text(ctx.subject.name.clone())],
            vec![Cell::Text(ctx.subject.sector.clone())],
            Vec::new(),
            label("Generated:", &ctx.display_date()),
            label("Platform:", &self.branding.platform_name),
            label("Classification:", &self.branding.classification),
        ]
    }

    fn summary_rows(&self, section: &SectionName, subject_name: &str) -> Vec<Vec<Cell>> {
        vec![
            vec![Cell::Heading(section.title().to_string())],
            Vec::new(),
            vec![Cell::Heading("Analysis Summary".to_string())],
            vec![Cell::Text(self.resolver.resolve(section, subject_name))],
        ]
    }
}

/// Title row, then one row per statement row: label, spacer, five years.
fn statement_rows(table: &FinancialStatementTable) -> Vec<Vec<Cell>> {
    let mut rows = Vec::with_capacity(table.rows.len() + 1);

    let mut header = vec![Cell::Heading(table.title.clone()), Cell::Empty];
    header.extend(table.year_labels.iter().cloned().map(Cell::Heading));
    rows.push(header);

    for row in &table.rows {
        let cells = match &row.kind {
            RowKind::Heading => vec![Cell::Heading(row.label.clone())],
            RowKind::Blank => Vec::new(),
            RowKind::Amounts(values) => {
                let mut cells = vec![Cell::Text(row.label.clone()), Cell::Empty];
                cells.extend(values.iter().copied().map(Cell::Amount));
                cells
            }
            RowKind::Percentages(values) => {
                let mut cells = vec![Cell::Text(row.label.clone()), Cell::Empty];
                cells.extend(values.iter().copied().map(Cell::Percent));
                cells
            }
        };
        rows.push(cells);
    }
    rows
}

impl Composer for WorkbookComposer {
    fn output_format(&self) -> OutputFormat {
        OutputFormat::Workbook
    }

    fn compose(&self, ctx: &CompositionContext<'_>) -> Result<Vec<u8>, ComposeError> {
        xlsx::write(&self.layout(ctx))
    }
}
