//! Core types for commerce-view.
//!
//! These are the building blocks everything else uses: the record shape
//! pushed by the simulation, the snapshot that carries a full push, and the
//! closed enums that make up the user's view state.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Record
// =============================================================================

/// Identifier of the placeholder row the simulation emits for "no resource".
/// It never reaches the table.
pub const SENTINEL_RESOURCE: &str = "NoResource";

/// One commercial product line as pushed by the simulation.
///
/// Every field is optional on the wire. Missing or `null` numbers read as
/// zero, a missing name reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Record {
    /// Resource identifier, unique within one snapshot.
    pub resource_name: String,
    /// Resource demand. Signed.
    #[serde(deserialize_with = "number_or_zero")]
    pub demand: f64,
    /// Zone (building) demand.
    #[serde(deserialize_with = "number_or_zero")]
    pub building: f64,
    /// Free properties.
    #[serde(deserialize_with = "number_or_zero")]
    pub free: f64,
    /// Number of companies.
    #[serde(deserialize_with = "number_or_zero")]
    pub companies: f64,
    /// Service utilization, in percent.
    #[serde(deserialize_with = "number_or_zero")]
    pub svc_percent: f64,
    /// Household need covered per company.
    #[serde(deserialize_with = "number_or_zero")]
    pub cap_per_company: f64,
    /// Household need covered, in percent.
    #[serde(deserialize_with = "number_or_zero")]
    pub cap_percent: f64,
    #[serde(deserialize_with = "number_or_zero")]
    pub workers: f64,
    /// Filled workplaces, in percent.
    #[serde(deserialize_with = "number_or_zero")]
    pub wrk_percent: f64,
    #[serde(deserialize_with = "number_or_zero")]
    pub tax_factor: f64,
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record {
    /// Create a record with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            resource_name: name.into(),
            ..Self::default()
        }
    }

    /// Set demand (builder style, mostly for fixtures)
    pub fn with_demand(mut self, demand: f64) -> Self {
        self.demand = demand;
        self
    }

    /// Set worker count
    pub fn with_workers(mut self, workers: f64) -> Self {
        self.workers = workers;
        self
    }

    /// Set tax factor
    pub fn with_tax(mut self, tax_factor: f64) -> Self {
        self.tax_factor = tax_factor;
        self
    }

    /// True for the "NoResource" placeholder.
    pub fn is_sentinel(&self) -> bool {
        self.resource_name == SENTINEL_RESOURCE
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// One complete push from the simulation.
///
/// Immutable and shared: a push replaces the whole snapshot, cloning is a
/// reference-count bump.
pub type Snapshot = Rc<[Record]>;

/// Build a snapshot from owned records.
pub fn snapshot(records: Vec<Record>) -> Snapshot {
    Rc::from(records)
}

/// The empty snapshot the feed starts with.
pub fn empty_snapshot() -> Snapshot {
    snapshot(Vec::new())
}

// =============================================================================
// View state enums
// =============================================================================

/// Column the table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Resource name, ascending
    #[default]
    Name,
    /// Demand, descending
    Demand,
    /// Worker count, descending
    Workers,
    /// Tax factor, descending
    Tax,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::Name, Self::Demand, Self::Workers, Self::Tax];
}

/// Which records survive, judged on demand alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    /// demand > 0
    Positive,
    /// demand < 0
    Negative,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [Self::All, Self::Positive, Self::Negative];

    /// Whether a record with this demand passes the filter.
    ///
    /// Zero demand passes neither `Positive` nor `Negative`.
    pub fn accepts(self, demand: f64) -> bool {
        match self {
            Self::All => true,
            Self::Positive => demand > 0.0,
            Self::Negative => demand < 0.0,
        }
    }
}

/// A toggleable cluster of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnGroup {
    Demand,
    Service,
    Capacity,
    Workers,
    Tax,
}

impl ColumnGroup {
    /// All groups in table order.
    pub const ALL: [ColumnGroup; 5] = [
        Self::Demand,
        Self::Service,
        Self::Capacity,
        Self::Workers,
        Self::Tax,
    ];

    /// The visibility bit for this group.
    pub fn flag(self) -> ColumnVisibility {
        match self {
            Self::Demand => ColumnVisibility::DEMAND,
            Self::Service => ColumnVisibility::SERVICE,
            Self::Capacity => ColumnVisibility::CAPACITY,
            Self::Workers => ColumnVisibility::WORKERS,
            Self::Tax => ColumnVisibility::TAX,
        }
    }
}

impl fmt::Display for ColumnGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Demand => "demand",
            Self::Service => "service",
            Self::Capacity => "capacity",
            Self::Workers => "workers",
            Self::Tax => "tax",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Column visibility (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Visible column groups as a bitfield.
    ///
    /// Any subset is valid, including none. Defaults to all visible.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColumnVisibility: u8 {
        const DEMAND = 1 << 0;
        const SERVICE = 1 << 1;
        const CAPACITY = 1 << 2;
        const WORKERS = 1 << 3;
        const TAX = 1 << 4;
    }
}

impl Default for ColumnVisibility {
    fn default() -> Self {
        Self::all()
    }
}

impl ColumnVisibility {
    /// Is this group shown?
    pub fn shows(self, group: ColumnGroup) -> bool {
        self.contains(group.flag())
    }

    /// Visible groups in table order.
    pub fn groups(self) -> impl Iterator<Item = ColumnGroup> {
        ColumnGroup::ALL.into_iter().filter(move |g| self.shows(*g))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_decodes_wire_names() {
        let json = r#"{
            "ResourceName": "Furniture",
            "Demand": 12,
            "Building": 3,
            "Free": 1,
            "Companies": 4,
            "SvcPercent": 40,
            "CapPerCompany": 150,
            "CapPercent": 210,
            "Workers": 55,
            "WrkPercent": 88,
            "TaxFactor": -0.5
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.resource_name, "Furniture");
        assert_eq!(record.demand, 12.0);
        assert_eq!(record.building, 3.0);
        assert_eq!(record.cap_percent, 210.0);
        assert_eq!(record.wrk_percent, 88.0);
        assert_eq!(record.tax_factor, -0.5);
    }

    #[test]
    fn test_record_missing_and_null_fields_are_zero() {
        let record: Record =
            serde_json::from_str(r#"{"ResourceName": "Oil", "Demand": null, "Extra": true}"#)
                .unwrap();
        assert_eq!(record.resource_name, "Oil");
        assert_eq!(record.demand, 0.0);
        assert_eq!(record.workers, 0.0);

        let empty: Record = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Record::default());
    }

    #[test]
    fn test_sentinel() {
        assert!(Record::named("NoResource").is_sentinel());
        assert!(!Record::named("noresource").is_sentinel());
    }

    #[test]
    fn test_filter_mode_zero_demand() {
        assert!(FilterMode::All.accepts(0.0));
        assert!(!FilterMode::Positive.accepts(0.0));
        assert!(!FilterMode::Negative.accepts(0.0));
        assert!(FilterMode::Positive.accepts(0.1));
        assert!(FilterMode::Negative.accepts(-0.1));
    }

    #[test]
    fn test_column_visibility_default_all() {
        let vis = ColumnVisibility::default();
        for group in ColumnGroup::ALL {
            assert!(vis.shows(group));
        }
        assert_eq!(vis.groups().count(), 5);
    }

    #[test]
    fn test_column_visibility_groups_in_order() {
        let vis = ColumnVisibility::TAX | ColumnVisibility::DEMAND;
        let groups: Vec<_> = vis.groups().collect();
        assert_eq!(groups, vec![ColumnGroup::Demand, ColumnGroup::Tax]);
        assert_eq!(ColumnVisibility::empty().groups().count(), 0);
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&SortKey::Workers).unwrap(), "\"workers\"");
        assert_eq!(serde_json::to_string(&FilterMode::Negative).unwrap(), "\"negative\"");
        let group: ColumnGroup = serde_json::from_str("\"capacity\"").unwrap();
        assert_eq!(group, ColumnGroup::Capacity);
    }
}
