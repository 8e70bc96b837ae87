//! Table renderer.
//!
//! Turns a [`ViewOutput`] into lines of styled segments laid out on a fixed
//! terminal width, then writes them as plain text or through crossterm.
//!
//! Layout of a table line:
//!
//! ```text
//! | gutter | Resource | <visible group columns...> |
//! ```
//!
//! Warnings are red and healthy workforce cells are green. Everything else
//! uses the terminal's default color.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use super::layout::{layout_columns, ColumnSpan};
use crate::error::Result;
use crate::pipeline::{visible_columns, Column, Row, Table, Tone, ViewOutput, GUTTER_PERCENT};

/// A run of text with one tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub tone: Tone,
}

impl Segment {
    fn plain(text: String) -> Self {
        Self {
            text,
            tone: Tone::Neutral,
        }
    }
}

/// One terminal line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub segments: Vec<Segment>,
}

impl Line {
    /// Text without styling, trailing blanks trimmed.
    pub fn text(&self) -> String {
        let text: String = self.segments.iter().map(|s| s.text.as_str()).collect();
        text.trim_end().to_string()
    }
}

fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Neutral => None,
        Tone::Negative => Some(Color::Red),
        Tone::Positive => Some(Color::Green),
    }
}

/// Clip to `width` cells, keeping one blank as column separator, then pad.
fn fit(text: &str, width: u16) -> String {
    let width = usize::from(width);
    let room = width.saturating_sub(1).max(width.min(1));
    let mut out: String = text.chars().take(room).collect();
    let used = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

// =============================================================================
// TableRenderer
// =============================================================================

/// Renders view output at a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRenderer {
    width: u16,
}

impl TableRenderer {
    pub fn new(width: u16) -> Self {
        Self { width }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Follow a terminal resize.
    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    /// Lay out `output` as lines: header lines first, then one per row.
    pub fn lines(&self, output: &ViewOutput) -> Result<Vec<Line>> {
        match output {
            ViewOutput::Waiting { label } => Ok(vec![Line {
                segments: vec![Segment::plain(fit(label, self.width))],
            }]),
            ViewOutput::Table(table) => self.table_lines(table),
        }
    }

    fn table_lines(&self, table: &Table) -> Result<Vec<Line>> {
        let columns = visible_columns(table.columns);
        let percents: Vec<f32> = std::iter::once(GUTTER_PERCENT)
            .chain(columns.iter().map(|c| c.width_percent()))
            .collect();
        let spans = layout_columns(&percents, self.width)?;
        let gutter = spans.first().copied().unwrap_or_default();
        let grid = ColumnGrid {
            columns: &columns,
            spans: spans.get(1..).unwrap_or_default(),
        };

        let header_height = table.header.iter().map(|c| c.lines.len()).max().unwrap_or(0);
        let mut lines = Vec::with_capacity(header_height + table.rows.len());

        for index in 0..header_height {
            let mut segments = vec![Segment::plain(fit("", gutter.width))];
            for cell in &table.header {
                let width = cell.spans.iter().map(|&c| grid.width_of(c)).sum();
                let label = cell.lines.get(index).copied().unwrap_or("");
                segments.push(Segment::plain(fit(label, width)));
            }
            lines.push(Line { segments });
        }

        for row in &table.rows {
            lines.push(grid.row_line(row, gutter));
        }

        Ok(lines)
    }

    /// Unstyled text, one line per terminal line.
    pub fn render_plain(&self, output: &ViewOutput) -> Result<String> {
        let lines = self.lines(output)?;
        Ok(lines.iter().map(Line::text).collect::<Vec<_>>().join("\n"))
    }

    /// Queue styled output on `out` and flush it.
    pub fn write_ansi<W: Write>(&self, out: &mut W, output: &ViewOutput) -> Result<()> {
        for line in self.lines(output)? {
            for segment in &line.segments {
                match tone_color(segment.tone) {
                    Some(color) => queue!(
                        out,
                        SetForegroundColor(color),
                        Print(&segment.text),
                        ResetColor
                    )?,
                    None => queue!(out, Print(&segment.text))?,
                }
            }
            queue!(out, Print("\r\n"))?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Visible columns paired with their laid-out spans.
struct ColumnGrid<'a> {
    columns: &'a [Column],
    spans: &'a [ColumnSpan],
}

impl ColumnGrid<'_> {
    fn width_of(&self, column: Column) -> u16 {
        self.columns
            .iter()
            .position(|&c| c == column)
            .and_then(|i| self.spans.get(i))
            .map_or(0, |span| span.width)
    }

    fn row_line(&self, row: &Row, gutter: ColumnSpan) -> Line {
        let mut segments = vec![
            Segment::plain(fit("", gutter.width)),
            Segment::plain(fit(&row.display_name, self.width_of(Column::Resource))),
        ];
        segments.extend(row.cells.iter().map(|cell| Segment {
            text: fit(&cell.value.to_string(), self.width_of(cell.column)),
            tone: cell.tone,
        }));
        Line { segments }
    }
}

// =============================================================================
// Tests
// =============================================================================
