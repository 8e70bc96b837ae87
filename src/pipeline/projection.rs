//! Projection - records to row descriptors.
//!
//! A row is data, not markup: an identity (raw key + display name) and one
//! typed cell per visible column. Each cell carries a [`Tone`] computed from
//! a fixed threshold, recomputed on every projection.
//!
//! # Columns
//!
//! ```text
//! demand   : Resource Demand | Zone Demand | Free | Num
//! service  : Service %
//! capacity : per company | %          (one "Household Need" header)
//! workers  : Workers | Work %
//! tax      : Tax
//! ```

use std::fmt;

use super::derive::or_zero;
use crate::types::{ColumnGroup, ColumnVisibility, Record};

// =============================================================================
// Thresholds
// =============================================================================

/// Service utilization above this is a warning.
pub const SERVICE_WARNING_PERCENT: f64 = 50.0;
/// Capacity above this is a warning.
pub const CAPACITY_WARNING_PERCENT: f64 = 200.0;
/// Worker percent below this is a warning, at or above it is healthy.
pub const WORKFORCE_HEALTHY_PERCENT: f64 = 90.0;

/// Width of the empty leading column, in percent of the table.
pub const GUTTER_PERCENT: f32 = 3.0;

// =============================================================================
// Columns
// =============================================================================

/// One table column, identity column included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Resource,
    Demand,
    ZoneDemand,
    Free,
    Companies,
    Service,
    CapacityPerCompany,
    CapacityPercent,
    Workers,
    WorkPercent,
    Tax,
}

impl Column {
    /// Group the column belongs to. The identity column has none.
    pub fn group(self) -> Option<ColumnGroup> {
        match self {
            Self::Resource => None,
            Self::Demand | Self::ZoneDemand | Self::Free | Self::Companies => {
                Some(ColumnGroup::Demand)
            }
            Self::Service => Some(ColumnGroup::Service),
            Self::CapacityPerCompany | Self::CapacityPercent => Some(ColumnGroup::Capacity),
            Self::Workers | Self::WorkPercent => Some(ColumnGroup::Workers),
            Self::Tax => Some(ColumnGroup::Tax),
        }
    }

    /// Share of the table width, in percent.
    pub fn width_percent(self) -> f32 {
        match self {
            Self::Resource => 15.0,
            Self::Demand => 6.0,
            Self::ZoneDemand | Self::Free => 4.0,
            Self::Companies => 5.0,
            Self::Service | Self::Tax => 12.0,
            Self::CapacityPerCompany | Self::CapacityPercent => 10.0,
            Self::Workers | Self::WorkPercent => 9.0,
        }
    }

    /// Columns of one group, in table order.
    pub fn of_group(group: ColumnGroup) -> &'static [Column] {
        match group {
            ColumnGroup::Demand => &[Self::Demand, Self::ZoneDemand, Self::Free, Self::Companies],
            ColumnGroup::Service => &[Self::Service],
            ColumnGroup::Capacity => &[Self::CapacityPerCompany, Self::CapacityPercent],
            ColumnGroup::Workers => &[Self::Workers, Self::WorkPercent],
            ColumnGroup::Tax => &[Self::Tax],
        }
    }
}

/// Visible columns in table order, identity first.
pub fn visible_columns(columns: ColumnVisibility) -> Vec<Column> {
    std::iter::once(Column::Resource)
        .chain(columns.groups().flat_map(|g| Column::of_group(g).iter().copied()))
        .collect()
}

// =============================================================================
// Header
// =============================================================================

/// One header cell. May span several columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Label, one entry per text line.
    pub lines: &'static [&'static str],
    pub spans: &'static [Column],
}

fn header_for(group: ColumnGroup) -> Vec<HeaderCell> {
    let cell = |lines: &'static [&'static str], spans: &'static [Column]| HeaderCell { lines, spans };
    match group {
        ColumnGroup::Demand => vec![
            cell(&["Resource", "Demand"], &[Column::Demand]),
            cell(&["Zone", "Demand"], &[Column::ZoneDemand]),
            cell(&["Free"], &[Column::Free]),
            cell(&["Num"], &[Column::Companies]),
        ],
        ColumnGroup::Service => vec![cell(&["Service"], &[Column::Service])],
        ColumnGroup::Capacity => vec![cell(
            &["Household Need"],
            &[Column::CapacityPerCompany, Column::CapacityPercent],
        )],
        ColumnGroup::Workers => vec![
            cell(&["Workers"], &[Column::Workers]),
            cell(&["Work%"], &[Column::WorkPercent]),
        ],
        ColumnGroup::Tax => vec![cell(&["Tax"], &[Column::Tax])],
    }
}

/// Header cells for the visible groups, identity first.
pub fn header(columns: ColumnVisibility) -> Vec<HeaderCell> {
    let mut cells = vec![HeaderCell {
        lines: &["Resource"],
        spans: &[Column::Resource],
    }];
    for group in columns.groups() {
        cells.extend(header_for(group));
    }
    cells
}

// =============================================================================
// Cells
// =============================================================================

/// A typed cell value. Formatting stays with the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    Count(f64),
    Percent(f64),
    Factor(f64),
}

impl CellValue {
    pub fn raw(self) -> f64 {
        match self {
            Self::Count(v) | Self::Percent(v) | Self::Factor(v) => v,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(v) | Self::Factor(v) => write!(f, "{v}"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Highlight state of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tone {
    #[default]
    Neutral,
    /// Threshold crossed
    Negative,
    /// Explicitly healthy
    Positive,
}

impl Tone {
    fn warn_if(crossed: bool) -> Self {
        if crossed { Self::Negative } else { Self::Neutral }
    }

    pub fn is_warning(self) -> bool {
        self == Self::Negative
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub column: Column,
    pub value: CellValue,
    pub tone: Tone,
}

impl Cell {
    fn new(column: Column, value: CellValue, tone: Tone) -> Self {
        Self { column, value, tone }
    }
}

fn cells_for(group: ColumnGroup, record: &Record) -> Vec<Cell> {
    let demand = or_zero(record.demand);
    let building = or_zero(record.building);
    let free = or_zero(record.free);
    let svc = or_zero(record.svc_percent);
    let cap = or_zero(record.cap_percent);
    let wrk = or_zero(record.wrk_percent);
    let tax = or_zero(record.tax_factor);

    match group {
        ColumnGroup::Demand => vec![
            Cell::new(Column::Demand, CellValue::Count(demand), Tone::warn_if(demand < 0.0)),
            Cell::new(Column::ZoneDemand, CellValue::Count(building), Tone::warn_if(building <= 0.0)),
            Cell::new(Column::Free, CellValue::Count(free), Tone::warn_if(free <= 0.0)),
            Cell::new(Column::Companies, CellValue::Count(or_zero(record.companies)), Tone::Neutral),
        ],
        ColumnGroup::Service => vec![Cell::new(
            Column::Service,
            CellValue::Percent(svc),
            Tone::warn_if(svc > SERVICE_WARNING_PERCENT),
        )],
        ColumnGroup::Capacity => vec![
            Cell::new(
                Column::CapacityPerCompany,
                CellValue::Count(or_zero(record.cap_per_company)),
                Tone::Neutral,
            ),
            Cell::new(
                Column::CapacityPercent,
                CellValue::Percent(cap),
                Tone::warn_if(cap > CAPACITY_WARNING_PERCENT),
            ),
        ],
        ColumnGroup::Workers => vec![
            Cell::new(Column::Workers, CellValue::Count(or_zero(record.workers)), Tone::Neutral),
            Cell::new(
                Column::WorkPercent,
                CellValue::Percent(wrk),
                if wrk < WORKFORCE_HEALTHY_PERCENT { Tone::Negative } else { Tone::Positive },
            ),
        ],
        ColumnGroup::Tax => vec![Cell::new(
            Column::Tax,
            CellValue::Factor(tax),
            Tone::warn_if(tax < 0.0),
        )],
    }
}

// =============================================================================
// Display names
// =============================================================================

/// Identifiers the simulation still emits under their old names.
pub const LEGACY_IDENTIFIERS: [(&str, &str); 2] = [("Ore", "MetalOre"), ("Oil", "CrudeOil")];

/// Current name for a possibly legacy identifier.
pub fn remap_identifier(raw: &str) -> &str {
    LEGACY_IDENTIFIERS
        .iter()
        .find(|(legacy, _)| *legacy == raw)
        .map_or(raw, |&(_, current)| current)
}

/// Turns a (remapped) identifier into what the table shows.
pub trait DisplayNameFormatter {
    fn format_display_name(&self, identifier: &str) -> String;
}

/// Splits camel case into capitalized words: `CrudeOil` -> `Crude Oil`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordFormatter;

impl DisplayNameFormatter for WordFormatter {
    fn format_display_name(&self, identifier: &str) -> String {
        let mut out = String::with_capacity(identifier.len() + 4);
        let mut prev: Option<char> = None;
        let mut word_start = true;

        for ch in identifier.chars() {
            if ch == '_' || ch == ' ' {
                word_start = true;
                prev = None;
                continue;
            }
            let boundary = matches!(prev, Some(p) if ch.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit()));
            if (boundary || word_start) && !out.is_empty() {
                out.push(' ');
            }
            if boundary || word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            word_start = false;
            prev = Some(ch);
        }
        out
    }
}

/// Display name for a raw identifier, legacy names remapped first.
pub fn display_name(raw: &str, formatter: &dyn DisplayNameFormatter) -> String {
    formatter.format_display_name(remap_identifier(raw))
}

// =============================================================================
// Rows
// =============================================================================

/// Everything the renderer needs for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Raw identifier, stable across pushes
    pub key: String,
    pub display_name: String,
    /// Cells of the visible groups, in table order
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn cell(&self, column: Column) -> Option<&Cell> {
        self.cells.iter().find(|c| c.column == column)
    }
}

pub fn project_row(
    record: &Record,
    columns: ColumnVisibility,
    formatter: &dyn DisplayNameFormatter,
) -> Row {
    Row {
        key: record.resource_name.clone(),
        display_name: display_name(&record.resource_name, formatter),
        cells: columns
            .groups()
            .flat_map(|group| cells_for(group, record))
            .collect(),
    }
}

/// Project every record, keeping order.
pub fn project(
    records: &[Record],
    columns: ColumnVisibility,
    formatter: &dyn DisplayNameFormatter,
) -> Vec<Row> {
    records
        .iter()
        .map(|record| project_row(record, columns, formatter))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn furniture() -> Record {
        Record {
            resource_name: "Furniture".into(),
            demand: -2.0,
            building: 0.0,
            free: 3.0,
            companies: 4.0,
            svc_percent: 51.0,
            cap_per_company: 120.0,
            cap_percent: 200.0,
            workers: 40.0,
            wrk_percent: 90.0,
            tax_factor: -0.25,
        }
    }

    fn tone(row: &Row, column: Column) -> Tone {
        row.cell(column).map(|c| c.tone).unwrap_or_default()
    }

    #[test]
    fn test_all_groups_visible_cell_order() {
        let row = project_row(&furniture(), ColumnVisibility::all(), &WordFormatter);
        let columns: Vec<Column> = row.cells.iter().map(|c| c.column).collect();
        assert_eq!(columns, visible_columns(ColumnVisibility::all())[1..].to_vec());
        assert_eq!(row.cells.len(), 10);
    }

    #[test]
    fn test_demand_group_flags() {
        let row = project_row(&furniture(), ColumnVisibility::DEMAND, &WordFormatter);
        assert_eq!(tone(&row, Column::Demand), Tone::Negative);
        assert_eq!(tone(&row, Column::ZoneDemand), Tone::Negative); // 0 <= 0
        assert_eq!(tone(&row, Column::Free), Tone::Neutral);
        assert_eq!(tone(&row, Column::Companies), Tone::Neutral);
    }

    #[test]
    fn test_service_and_capacity_thresholds() {
        let row = project_row(&furniture(), ColumnVisibility::all(), &WordFormatter);
        assert_eq!(tone(&row, Column::Service), Tone::Negative); // 51 > 50
        assert_eq!(tone(&row, Column::CapacityPercent), Tone::Neutral); // 200 is not > 200

        let mut record = furniture();
        record.svc_percent = 50.0;
        record.cap_percent = 200.5;
        let row = project_row(&record, ColumnVisibility::all(), &WordFormatter);
        assert_eq!(tone(&row, Column::Service), Tone::Neutral);
        assert_eq!(tone(&row, Column::CapacityPercent), Tone::Negative);
    }

    #[test]
    fn test_workers_always_toned() {
        let row = project_row(&furniture(), ColumnVisibility::WORKERS, &WordFormatter);
        assert_eq!(tone(&row, Column::WorkPercent), Tone::Positive); // 90 is healthy

        let mut record = furniture();
        record.wrk_percent = 89.9;
        let row = project_row(&record, ColumnVisibility::WORKERS, &WordFormatter);
        assert_eq!(tone(&row, Column::WorkPercent), Tone::Negative);

        // Missing worker percent reads as zero
        let row = project_row(&Record::named("X"), ColumnVisibility::WORKERS, &WordFormatter);
        assert_eq!(tone(&row, Column::WorkPercent), Tone::Negative);
    }

    #[test]
    fn test_tax_flag() {
        let row = project_row(&furniture(), ColumnVisibility::TAX, &WordFormatter);
        assert!(tone(&row, Column::Tax).is_warning());

        let row = project_row(&Record::named("X"), ColumnVisibility::TAX, &WordFormatter);
        assert!(!tone(&row, Column::Tax).is_warning());
    }

    #[test]
    fn test_hidden_groups_have_no_cells() {
        let row = project_row(&furniture(), ColumnVisibility::empty(), &WordFormatter);
        assert!(row.cells.is_empty());
        assert_eq!(row.display_name, "Furniture");

        let row = project_row(
            &furniture(),
            ColumnVisibility::SERVICE | ColumnVisibility::TAX,
            &WordFormatter,
        );
        let columns: Vec<Column> = row.cells.iter().map(|c| c.column).collect();
        assert_eq!(columns, vec![Column::Service, Column::Tax]);
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Count(5.0).to_string(), "5");
        assert_eq!(CellValue::Count(-3.0).to_string(), "-3");
        assert_eq!(CellValue::Percent(88.0).to_string(), "88%");
        assert_eq!(CellValue::Factor(-0.25).to_string(), "-0.25");
    }

    #[test]
    fn test_legacy_remap() {
        assert_eq!(remap_identifier("Ore"), "MetalOre");
        assert_eq!(remap_identifier("Oil"), "CrudeOil");
        assert_eq!(remap_identifier("Food"), "Food");
        assert_eq!(remap_identifier("ore"), "ore");
    }

    #[test]
    fn test_word_formatter() {
        let f = WordFormatter;
        assert_eq!(f.format_display_name("MetalOre"), "Metal Ore");
        assert_eq!(f.format_display_name("ConvenienceFood"), "Convenience Food");
        assert_eq!(f.format_display_name("furniture"), "Furniture");
        assert_eq!(f.format_display_name("snake_case_name"), "Snake Case Name");
        assert_eq!(f.format_display_name(""), "");
    }

    #[test]
    fn test_display_name_remaps_before_formatting() {
        struct Echo;
        impl DisplayNameFormatter for Echo {
            fn format_display_name(&self, identifier: &str) -> String {
                format!("<{identifier}>")
            }
        }

        assert_eq!(display_name("Oil", &Echo), "<CrudeOil>");
        assert_eq!(display_name("Ore", &WordFormatter), "Metal Ore");

        // Row key keeps the raw identifier
        let row = project_row(&Record::named("Oil"), ColumnVisibility::empty(), &Echo);
        assert_eq!(row.key, "Oil");
        assert_eq!(row.display_name, "<CrudeOil>");
    }

    #[test]
    fn test_header_follows_visibility() {
        let cells = header(ColumnVisibility::CAPACITY | ColumnVisibility::WORKERS);
        let labels: Vec<&str> = cells.iter().map(|c| c.lines[0]).collect();
        assert_eq!(labels, vec!["Resource", "Household Need", "Workers", "Work%"]);
        assert_eq!(cells[1].spans.len(), 2);

        let all = header(ColumnVisibility::all());
        let spanned: usize = all.iter().map(|c| c.spans.len()).sum();
        assert_eq!(spanned, visible_columns(ColumnVisibility::all()).len());
    }

    #[test]
    fn test_widths_fit_in_table() {
        let total: f32 = visible_columns(ColumnVisibility::all())
            .iter()
            .map(|c| c.width_percent())
            .sum::<f32>()
            + GUTTER_PERCENT;
        assert!(total <= 100.0);
    }

    #[test]
    fn test_project_keeps_order() {
        let records = vec![Record::named("B"), Record::named("A")];
        let rows = project(&records, ColumnVisibility::all(), &WordFormatter);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["B", "A"]);
    }
}
