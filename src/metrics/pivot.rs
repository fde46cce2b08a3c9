//! Cross-tab pivoting.
//!
//! Every stacked-bar view on the dashboards has the same shape: a list of bars
//! (outer names), each split into stacks (inner names), with the stack value
//! read at one year from a stored two-level breakdown. [`pivot`] is that shape
//! with the lookup injected; [`cross_tab`] wires it to the stored maps of a
//! [`MarketData`] in either orientation.
//!
//! Missing outer keys, missing inner segments, and missing years all resolve
//! to zero (and an empty series), never to an error.

use crate::domain::{CrossTab, MarketData, NestedSegments, Orientation, SegmentData, YearlyData};
use crate::metrics::aggregate::value_at;

/// One stack of a bar.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotCell {
    pub name: String,
    /// Value at the selected year.
    pub value: f64,
    /// Full series for drill-down; empty when the lookup missed.
    pub series: Vec<YearlyData>,
}

impl PivotCell {
    /// Percent of the owning bar's total (`0` when the bar total is not positive).
    pub fn share_of(&self, bar_total: f64) -> f64 {
        if bar_total <= 0.0 {
            0.0
        } else {
            self.value / bar_total * 100.0
        }
    }
}

/// One bar: an outer category split by every inner category.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotBar {
    pub name: String,
    pub cells: Vec<PivotCell>,
    pub total: f64,
}

/// Generic transpose + lookup + zero-fill.
///
/// `lookup(outer, inner)` returns the stored series for that pair, if any.
pub fn pivot<'a, F>(outer_names: &[String], inner_names: &[String], lookup: F, year: i32) -> Vec<PivotBar>
where
    F: Fn(&str, &str) -> Option<&'a [YearlyData]>,
{
    outer_names
        .iter()
        .map(|outer| {
            let cells: Vec<PivotCell> = inner_names
                .iter()
                .map(|inner| match lookup(outer, inner) {
                    Some(series) => PivotCell {
                        name: inner.clone(),
                        value: value_at(series, year),
                        series: series.to_vec(),
                    },
                    None => PivotCell {
                        name: inner.clone(),
                        value: 0.0,
                        series: Vec::new(),
                    },
                })
                .collect();
            let total = cells.iter().map(|c| c.value).sum();
            PivotBar {
                name: outer.clone(),
                cells,
                total,
            }
        })
        .collect()
}

/// Pivot a stored cross-tab of `data` at `year`.
///
/// `Stored` bars are the stored outer keys (`stored[outer][inner]`);
/// `Transposed` bars are the inner categories, read as `stored[inner][outer]`.
/// A dataset without the cross-tab (absent or empty map) yields no bars.
pub fn cross_tab(data: &MarketData, table: CrossTab, orientation: Orientation, year: i32) -> Vec<PivotBar> {
    let Some(stored) = data.cross_tab(table) else {
        return Vec::new();
    };
    if stored.is_empty() {
        return Vec::new();
    }

    let outer_names = outer_names(data, table, stored);

    // Each region stacks only its own countries.
    if table == CrossTab::CountryByRegion && orientation == Orientation::Stored {
        return outer_names
            .iter()
            .flat_map(|region| {
                let countries: Vec<String> = resolve_outer(stored, table, region)
                    .map(|segments| segments.iter().map(|s| s.name.clone()).collect())
                    .unwrap_or_default();
                pivot(
                    std::slice::from_ref(region),
                    &countries,
                    |outer, inner| stored_series(stored, table, outer, inner),
                    year,
                )
            })
            .collect();
    }

    let inner_names = inner_names(data, table, stored);

    match orientation {
        Orientation::Stored => pivot(
            &outer_names,
            &inner_names,
            |outer, inner| stored_series(stored, table, outer, inner),
            year,
        ),
        Orientation::Transposed => pivot(
            &inner_names,
            &outer_names,
            |outer, inner| stored_series(stored, table, inner, outer),
            year,
        ),
    }
}

/// Concatenate every outer key's segments (e.g. all countries across regions).
pub fn flatten_nested(nested: &NestedSegments) -> Vec<SegmentData> {
    nested.values().flat_map(|segments| segments.iter().cloned()).collect()
}

/// Bars come from the top-level axis when the dataset has it, else from the stored keys.
fn outer_names(data: &MarketData, table: CrossTab, stored: &NestedSegments) -> Vec<String> {
    match data.axis(table.outer_axis()) {
        Some(segments) if !segments.is_empty() => segments.iter().map(|s| s.name.clone()).collect(),
        _ => stored.keys().map(str::to_string).collect(),
    }
}

/// Stacks come from the inner top-level axis, else from the stored segments in first-seen order.
fn inner_names(data: &MarketData, table: CrossTab, stored: &NestedSegments) -> Vec<String> {
    if let Some(segments) = table.inner_axis().and_then(|axis| data.axis(axis)) {
        if !segments.is_empty() {
            return segments.iter().map(|s| s.name.clone()).collect();
        }
    }

    let mut names: Vec<String> = Vec::new();
    for segments in stored.values() {
        for s in segments {
            if !names.iter().any(|n| *n == s.name) {
                names.push(s.name.clone());
            }
        }
    }
    names
}

fn stored_series<'a>(
    stored: &'a NestedSegments,
    table: CrossTab,
    outer: &str,
    inner: &str,
) -> Option<&'a [YearlyData]> {
    let segments = resolve_outer(stored, table, outer)?;
    segments
        .iter()
        .find(|s| s.name == inner)
        .map(|s| s.data.as_slice())
}

/// Exact key only, except equipment: breakdowns there are keyed `BFE`/`SFE`
/// while the axis spells out e.g. `BFE (Buyer Furnished Equipment)`.
fn resolve_outer<'a>(stored: &'a NestedSegments, table: CrossTab, name: &str) -> Option<&'a Vec<SegmentData>> {
    if let Some(found) = stored.get(name) {
        return Some(found);
    }
    if table != CrossTab::EquipmentByRegion {
        return None;
    }
    let short = if name.contains("BFE") {
        "BFE"
    } else if name.contains("SFE") {
        "SFE"
    } else {
        return None;
    };
    stored.get(short)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CompactMarketData;

    fn market() -> MarketData {
        let json = r#"{
            "years": [2024, 2025],
            "totalMarket": [100, 120],
            "endUser": {"OE": [60, 70], "Aftermarket": [40, 50]},
            "aircraftType": {"Wide Body": [50, 60], "Narrow Body": [50, 60]},
            "region": {"North America": [40, 50], "Europe": [60, 70]},
            "application": {},
            "furnishedEquipment": {"BFE (Buyer Furnished Equipment)": [30, 35], "SFE (Supplier Furnished Equipment)": [70, 85]},
            "countryDataByRegion": {
                "North America": {"US": [35, 44], "Canada": [5, 6]},
                "Europe": {"Germany": [30, 35], "France": [30, 35]}
            },
            "aircraftTypeByRegion": {
                "Wide Body": {"North America": [20, 25], "Europe": [30, 35]},
                "Narrow Body": {"Europe": [30, 35]}
            },
            "equipmentByRegion": {
                "BFE": {"North America": [10, 12], "Europe": [20, 23]},
                "SFE": {"North America": [30, 38], "Europe": [40, 47]}
            }
        }"#;
        let compact: CompactMarketData = serde_json::from_str(json).unwrap();
        MarketData::from_compact(&compact)
    }

    #[test]
    fn stored_orientation_follows_axis_order() {
        let data = market();
        let bars = cross_tab(&data, CrossTab::AircraftByRegion, Orientation::Stored, 2025);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].name, "Wide Body");
        assert_eq!(bars[0].cells[0].name, "North America");
        assert_eq!(bars[0].cells[0].value, 25.0);
        assert_eq!(bars[0].total, 60.0);
    }

    #[test]
    fn missing_inner_segment_is_zero_with_empty_series() {
        let data = market();
        let bars = cross_tab(&data, CrossTab::AircraftByRegion, Orientation::Stored, 2025);
        let narrow = &bars[1];
        assert_eq!(narrow.cells[0].name, "North America");
        assert_eq!(narrow.cells[0].value, 0.0);
        assert!(narrow.cells[0].series.is_empty());
        assert_eq!(narrow.total, 35.0);
    }

    #[test]
    fn transposed_swaps_lookup_keys() {
        let data = market();
        let bars = cross_tab(&data, CrossTab::AircraftByRegion, Orientation::Transposed, 2024);
        let names: Vec<&str> = bars.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["North America", "Europe"]);
        // North America: Wide Body 20, Narrow Body missing.
        assert_eq!(bars[0].cells[0].value, 20.0);
        assert_eq!(bars[0].cells[1].value, 0.0);
        assert_eq!(bars[0].total, 20.0);
        assert_eq!(bars[1].total, 60.0);
    }

    #[test]
    fn absent_cross_tab_is_empty() {
        let data = market();
        assert!(cross_tab(&data, CrossTab::EndUserByRegion, Orientation::Stored, 2025).is_empty());
        assert!(cross_tab(&data, CrossTab::ProcessByRegion, Orientation::Transposed, 2025).is_empty());
    }

    #[test]
    fn equipment_names_resolve_to_short_keys() {
        let data = market();
        let bars = cross_tab(&data, CrossTab::EquipmentByRegion, Orientation::Stored, 2025);
        assert_eq!(bars[0].name, "BFE (Buyer Furnished Equipment)");
        assert_eq!(bars[0].total, 35.0);
        assert_eq!(bars[1].total, 85.0);
    }

    #[test]
    fn countries_stack_only_within_their_region() {
        let data = market();
        let bars = cross_tab(&data, CrossTab::CountryByRegion, Orientation::Stored, 2025);
        let names = |bar: &PivotBar| bar.cells.iter().map(|c| c.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&bars[0]), vec!["US", "Canada"]);
        assert_eq!(names(&bars[1]), vec!["Germany", "France"]);
        assert_eq!(bars[0].total, 50.0);
        assert_eq!(bars[1].total, 70.0);

        // Country bars still list every region.
        let by_country = cross_tab(&data, CrossTab::CountryByRegion, Orientation::Transposed, 2025);
        assert_eq!(by_country.len(), 4);
        assert_eq!(by_country[0].name, "US");
        assert_eq!(by_country[0].cells.len(), 2);
        assert_eq!(by_country[0].total, 44.0);
    }

    #[test]
    fn name_containing_another_key_does_not_borrow_its_data() {
        let compact: CompactMarketData = serde_json::from_str(
            r#"{
                "years": [2025],
                "totalMarket": [100],
                "aircraftType": {"Jet": [40], "Business Jet": [60]},
                "region": {"Europe": [100]},
                "aircraftTypeByRegion": {"Jet": {"Europe": [40]}}
            }"#,
        )
        .unwrap();
        let data = MarketData::from_compact(&compact);
        let bars = cross_tab(&data, CrossTab::AircraftByRegion, Orientation::Stored, 2025);
        assert_eq!(bars[0].total, 40.0);
        assert_eq!(bars[1].name, "Business Jet");
        assert_eq!(bars[1].total, 0.0);
        assert!(bars[1].cells[0].series.is_empty());
    }

    #[test]
    fn equipment_without_short_code_is_zero() {
        let compact: CompactMarketData = serde_json::from_str(
            r#"{
                "years": [2025],
                "totalMarket": [100],
                "region": {"Europe": [100]},
                "furnishedEquipment": {"BFE (Buyer Furnished Equipment)": [30], "Other Equipment": [70]},
                "equipmentByRegion": {"BFE": {"Europe": [30]}, "SFE": {"Europe": [70]}}
            }"#,
        )
        .unwrap();
        let data = MarketData::from_compact(&compact);
        let bars = cross_tab(&data, CrossTab::EquipmentByRegion, Orientation::Stored, 2025);
        assert_eq!(bars[0].total, 30.0);
        assert_eq!(bars[1].total, 0.0);
    }

    #[test]
    fn generic_pivot_zero_fills_unknown_outer() {
        let outer = vec!["X".to_string()];
        let inner = vec!["a".to_string(), "b".to_string()];
        let bars = pivot(&outer, &inner, |_, _| None, 2025);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].total, 0.0);
        assert!(bars[0].cells.iter().all(|c| c.value == 0.0 && c.series.is_empty()));
        assert_eq!(bars[0].cells[1].share_of(bars[0].total), 0.0);
    }

    #[test]
    fn flatten_nested_keeps_order() {
        let data = market();
        let all = flatten_nested(&data.country_data_by_region);
        let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["US", "Canada", "Germany", "France"]);
    }
}
