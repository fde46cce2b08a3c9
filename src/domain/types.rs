//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - parsed straight from the per-dashboard compact JSON documents
//! - borrowed read-only by the metrics and report layers
//! - written back out (compact JSON / CSV) for downstream tools

use std::fmt;
use std::marker::PhantomData;

use clap::ValueEnum;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One observation: market size for a single year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyData {
    pub year: i32,
    pub value: f64,
}

/// A named breakdown category (one region, one aircraft type, ...) across all years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentData {
    pub name: String,
    pub data: Vec<YearlyData>,
}

/// String-keyed map that keeps the key order of the source document.
///
/// Legend and stack order on the dashboards follow the order in which the data
/// pipeline wrote the keys, so a hash map is not an option here.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; an existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

/// Raw per-segment value arrays, positionally aligned to `years`.
pub type CompactSeries = OrderedMap<Vec<f64>>;

/// Two-level compact breakdown: outer key -> inner name -> values.
pub type CompactNested = OrderedMap<CompactSeries>;

/// Two-level expanded breakdown: outer key -> segments scoped to that key.
pub type NestedSegments = OrderedMap<Vec<SegmentData>>;

/// Wire format of a dashboard document.
///
/// Same logical content as [`MarketData`] with every series stored as a bare
/// value array indexed like `years`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactMarketData {
    pub years: Vec<i32>,
    #[serde(default)]
    pub total_market: Vec<f64>,
    #[serde(default)]
    pub end_user: CompactSeries,
    #[serde(default)]
    pub aircraft_type: CompactSeries,
    #[serde(default)]
    pub region: CompactSeries,
    #[serde(default)]
    pub application: CompactSeries,
    #[serde(default)]
    pub furnished_equipment: CompactSeries,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_type: Option<CompactSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<CompactSeries>,
    #[serde(default)]
    pub country_data_by_region: CompactNested,
    #[serde(default)]
    pub end_user_by_aircraft_type: CompactNested,
    #[serde(default)]
    pub end_user_by_region: CompactNested,
    #[serde(default)]
    pub aircraft_type_by_region: CompactNested,
    #[serde(default)]
    pub application_by_region: CompactNested,
    #[serde(default)]
    pub equipment_by_region: CompactNested,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_type_by_region: Option<CompactNested>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type_by_region: Option<CompactNested>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_type_by_application: Option<CompactNested>,
}

/// Normalized dashboard document.
///
/// Built once per load by `data::expand` and then only borrowed. Optional axes
/// are `None` when the dataset does not carry them, which is different from an
/// axis that is present but has no segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketData {
    pub years: Vec<i32>,
    pub total_market: Vec<YearlyData>,
    pub end_user: Vec<SegmentData>,
    pub aircraft_type: Vec<SegmentData>,
    pub region: Vec<SegmentData>,
    pub application: Vec<SegmentData>,
    pub furnished_equipment: Vec<SegmentData>,
    pub process_type: Option<Vec<SegmentData>>,
    pub material_type: Option<Vec<SegmentData>>,
    pub country_data_by_region: NestedSegments,
    pub end_user_by_aircraft_type: NestedSegments,
    pub end_user_by_region: NestedSegments,
    pub aircraft_type_by_region: NestedSegments,
    pub application_by_region: NestedSegments,
    pub equipment_by_region: NestedSegments,
    pub process_type_by_region: Option<NestedSegments>,
    pub material_type_by_region: Option<NestedSegments>,
    pub process_type_by_application: Option<NestedSegments>,
}

impl MarketData {
    /// Segments of a top-level axis; `None` when the axis does not apply to this dataset.
    pub fn axis(&self, axis: Axis) -> Option<&[SegmentData]> {
        match axis {
            Axis::EndUser => Some(&self.end_user),
            Axis::Aircraft => Some(&self.aircraft_type),
            Axis::Region => Some(&self.region),
            Axis::Application => Some(&self.application),
            Axis::Equipment => Some(&self.furnished_equipment),
            Axis::Process => self.process_type.as_deref(),
            Axis::Material => self.material_type.as_deref(),
        }
    }

    /// Axes that apply to this dataset and have at least one segment, in tab order.
    pub fn available_axes(&self) -> Vec<Axis> {
        Axis::ALL
            .into_iter()
            .filter(|&axis| self.axis(axis).is_some_and(|s| !s.is_empty()))
            .collect()
    }

    /// Stored nested breakdown for a cross-tab; `None` when the dataset lacks it.
    pub fn cross_tab(&self, table: CrossTab) -> Option<&NestedSegments> {
        match table {
            CrossTab::CountryByRegion => Some(&self.country_data_by_region),
            CrossTab::EndUserByAircraft => Some(&self.end_user_by_aircraft_type),
            CrossTab::EndUserByRegion => Some(&self.end_user_by_region),
            CrossTab::AircraftByRegion => Some(&self.aircraft_type_by_region),
            CrossTab::ApplicationByRegion => Some(&self.application_by_region),
            CrossTab::EquipmentByRegion => Some(&self.equipment_by_region),
            CrossTab::ProcessByRegion => self.process_type_by_region.as_ref(),
            CrossTab::MaterialByRegion => self.material_type_by_region.as_ref(),
            CrossTab::ProcessByApplication => self.process_type_by_application.as_ref(),
        }
    }

    pub fn first_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied()
    }
}

/// A top-level breakdown dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    EndUser,
    Aircraft,
    Region,
    Application,
    Equipment,
    Process,
    Material,
}

impl Axis {
    pub const ALL: [Axis; 7] = [
        Axis::EndUser,
        Axis::Aircraft,
        Axis::Region,
        Axis::Application,
        Axis::Equipment,
        Axis::Process,
        Axis::Material,
    ];

    /// Generic tab label; dashboards may rename an axis (see `data::catalog`).
    pub fn default_label(self) -> &'static str {
        match self {
            Axis::EndUser => "End User",
            Axis::Aircraft => "Aircraft Type",
            Axis::Region => "Region",
            Axis::Application => "Application",
            Axis::Equipment => "Equipment",
            Axis::Process => "Process Type",
            Axis::Material => "Material Type",
        }
    }

    /// Key of the axis in the wire format.
    pub fn wire_key(self) -> &'static str {
        match self {
            Axis::EndUser => "endUser",
            Axis::Aircraft => "aircraftType",
            Axis::Region => "region",
            Axis::Application => "application",
            Axis::Equipment => "furnishedEquipment",
            Axis::Process => "processType",
            Axis::Material => "materialType",
        }
    }

    pub fn is_optional(self) -> bool {
        matches!(self, Axis::Process | Axis::Material)
    }
}

/// A stored two-level breakdown (`outer -> inner segments`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CrossTab {
    CountryByRegion,
    EndUserByAircraft,
    EndUserByRegion,
    AircraftByRegion,
    ApplicationByRegion,
    EquipmentByRegion,
    ProcessByRegion,
    MaterialByRegion,
    ProcessByApplication,
}

impl CrossTab {
    pub const ALL: [CrossTab; 9] = [
        CrossTab::CountryByRegion,
        CrossTab::EndUserByAircraft,
        CrossTab::EndUserByRegion,
        CrossTab::AircraftByRegion,
        CrossTab::ApplicationByRegion,
        CrossTab::EquipmentByRegion,
        CrossTab::ProcessByRegion,
        CrossTab::MaterialByRegion,
        CrossTab::ProcessByApplication,
    ];

    /// Axis whose segment names key the stored map.
    pub fn outer_axis(self) -> Axis {
        match self {
            CrossTab::CountryByRegion => Axis::Region,
            CrossTab::EndUserByAircraft | CrossTab::EndUserByRegion => Axis::EndUser,
            CrossTab::AircraftByRegion => Axis::Aircraft,
            CrossTab::ApplicationByRegion => Axis::Application,
            CrossTab::EquipmentByRegion => Axis::Equipment,
            CrossTab::ProcessByRegion | CrossTab::ProcessByApplication => Axis::Process,
            CrossTab::MaterialByRegion => Axis::Material,
        }
    }

    /// Axis of the inner segments; `None` for countries, which have no top-level axis.
    pub fn inner_axis(self) -> Option<Axis> {
        match self {
            CrossTab::CountryByRegion => None,
            CrossTab::EndUserByAircraft => Some(Axis::Aircraft),
            CrossTab::ProcessByApplication => Some(Axis::Application),
            CrossTab::EndUserByRegion
            | CrossTab::AircraftByRegion
            | CrossTab::ApplicationByRegion
            | CrossTab::EquipmentByRegion
            | CrossTab::ProcessByRegion
            | CrossTab::MaterialByRegion => Some(Axis::Region),
        }
    }

    pub fn wire_key(self) -> &'static str {
        match self {
            CrossTab::CountryByRegion => "countryDataByRegion",
            CrossTab::EndUserByAircraft => "endUserByAircraftType",
            CrossTab::EndUserByRegion => "endUserByRegion",
            CrossTab::AircraftByRegion => "aircraftTypeByRegion",
            CrossTab::ApplicationByRegion => "applicationByRegion",
            CrossTab::EquipmentByRegion => "equipmentByRegion",
            CrossTab::ProcessByRegion => "processTypeByRegion",
            CrossTab::MaterialByRegion => "materialTypeByRegion",
            CrossTab::ProcessByApplication => "processTypeByApplication",
        }
    }

    pub fn inner_label(self) -> &'static str {
        match self.inner_axis() {
            Some(axis) => axis.default_label(),
            None => "Country",
        }
    }

    /// Cross-tabs shown on the detail tab of `axis`.
    pub fn for_axis(axis: Axis) -> Vec<CrossTab> {
        CrossTab::ALL
            .into_iter()
            .filter(|t| t.outer_axis() == axis)
            .collect()
    }
}

/// Which side of a stored cross-tab becomes the bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Bars are the stored outer keys (e.g. aircraft type bars stacked by region).
    #[default]
    Stored,
    /// Bars are the inner segments (e.g. region bars stacked by aircraft type).
    Transposed,
}

/// Display scale for market values.
///
/// Raw values are in US$ millions; `Billions` only changes presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitScale {
    Millions,
    #[default]
    Billions,
}

impl UnitScale {
    pub fn scale(self, value_millions: f64) -> f64 {
        match self {
            UnitScale::Millions => value_millions,
            UnitScale::Billions => value_millions / 1000.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            UnitScale::Millions => "M",
            UnitScale::Billions => "B",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UnitScale::Millions => "US$ Millions",
            UnitScale::Billions => "US$ Billions",
        }
    }

    /// `$12.34B` / `$1,234.5M`.
    pub fn format(self, value_millions: f64) -> String {
        let v = self.scale(value_millions);
        match self {
            UnitScale::Millions => format!("${}{}", group_thousands(v, 1), self.suffix()),
            UnitScale::Billions => format!("${}{}", group_thousands(v, 2), self.suffix()),
        }
    }
}

/// Format with a fixed number of decimals and `,` thousands separators.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Year selections shared by reports and the TUI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportConfig {
    /// Year shown in KPI cards, distributions, and cross-tabs.
    pub selected_year: i32,
    /// Start of the headline CAGR and growth-analysis window.
    pub base_year: i32,
    /// End of every CAGR window (forecast horizon).
    pub forecast_year: i32,
    /// Start of the per-segment drill-down CAGR window.
    pub drill_base_year: i32,
    pub unit: UnitScale,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            selected_year: 2025,
            base_year: 2024,
            forecast_year: 2034,
            drill_base_year: 2025,
            unit: UnitScale::Billions,
        }
    }
}

impl ReportConfig {
    pub fn cagr_period(&self) -> i32 {
        self.forecast_year - self.base_year
    }

    pub fn drill_period(&self) -> i32 {
        self.forecast_year - self.drill_base_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_map_keeps_document_order() {
        let json = r#"{"Wide Body": [1.0], "Narrow Body": [2.0], "Regional": [3.0]}"#;
        let map: CompactSeries = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["Wide Body", "Narrow Body", "Regional"]);

        let back = serde_json::to_string(&map).unwrap();
        assert_eq!(back, r#"{"Wide Body":[1.0],"Narrow Body":[2.0],"Regional":[3.0]}"#);
    }

    #[test]
    fn ordered_map_insert_replaces_in_place() {
        let mut map = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 3);
        let entries: Vec<(&str, &i32)> = map.iter().collect();
        assert_eq!(entries, vec![("a", &3), ("b", &2)]);
    }

    #[test]
    fn compact_document_tolerates_missing_nested_maps() {
        let json = r#"{"years": [2024, 2025], "totalMarket": [1.0, 2.0], "region": {"Europe": [1.0, 2.0]}}"#;
        let doc: CompactMarketData = serde_json::from_str(json).unwrap();
        assert!(doc.aircraft_type_by_region.is_empty());
        assert!(doc.process_type.is_none());
        assert_eq!(doc.region.len(), 1);
    }

    #[test]
    fn optional_axis_absent_vs_empty() {
        let mut data = MarketData::default();
        assert!(data.axis(Axis::Process).is_none());
        data.process_type = Some(Vec::new());
        assert_eq!(data.axis(Axis::Process).map(|s| s.len()), Some(0));
        assert!(!data.available_axes().contains(&Axis::Process));
    }

    #[test]
    fn cross_tabs_by_outer_axis() {
        assert_eq!(
            CrossTab::for_axis(Axis::EndUser),
            vec![CrossTab::EndUserByAircraft, CrossTab::EndUserByRegion]
        );
        assert_eq!(CrossTab::CountryByRegion.inner_label(), "Country");
    }

    #[test]
    fn unit_scale_formats_values() {
        assert_eq!(UnitScale::Billions.format(12_340.0), "$12.34B");
        assert_eq!(UnitScale::Millions.format(1_234.5), "$1,234.5M");
        assert_eq!(group_thousands(-1_234_567.0, 0), "-1,234,567");
        assert_eq!(group_thousands(-0.0001, 1), "0.0");
    }
}
