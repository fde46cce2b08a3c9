//! Compact-to-expanded transformation.
//!
//! The wire format stores each segment as a bare value array aligned to the
//! document's `years`. This module turns those arrays into explicit
//! `{year, value}` series and back.
//!
//! No validation happens here: the documents come from a trusted offline
//! pipeline, so non-ascending years or negative values pass through untouched.

use crate::domain::{
    CompactMarketData, CompactNested, CompactSeries, MarketData, NestedSegments, SegmentData, YearlyData,
};

/// Pair every year with its value; short arrays are zero-filled at the tail.
pub fn expand_values(years: &[i32], values: &[f64]) -> Vec<YearlyData> {
    years
        .iter()
        .enumerate()
        .map(|(i, &year)| YearlyData {
            year,
            value: values.get(i).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Expand one axis, keeping the key order of the source map.
pub fn expand_segment(years: &[i32], segment: &CompactSeries) -> Vec<SegmentData> {
    segment
        .iter()
        .map(|(name, values)| SegmentData {
            name: name.to_string(),
            data: expand_values(years, values),
        })
        .collect()
}

/// Expand a two-level breakdown; each outer key is expanded on its own.
pub fn expand_nested(years: &[i32], nested: &CompactNested) -> NestedSegments {
    nested
        .iter()
        .map(|(key, segment)| (key.to_string(), expand_segment(years, segment)))
        .collect()
}

/// Collapse a series back to a bare value array (in series order).
pub fn collapse_values(series: &[YearlyData]) -> Vec<f64> {
    series.iter().map(|d| d.value).collect()
}

/// Collapse an axis back to its compact map.
pub fn collapse_segment(segments: &[SegmentData]) -> CompactSeries {
    segments
        .iter()
        .map(|s| (s.name.clone(), collapse_values(&s.data)))
        .collect()
}

pub fn collapse_nested(nested: &NestedSegments) -> CompactNested {
    nested
        .iter()
        .map(|(key, segments)| (key.to_string(), collapse_segment(segments)))
        .collect()
}

impl MarketData {
    /// Build the normalized document from its wire format.
    pub fn from_compact(compact: &CompactMarketData) -> Self {
        let years = compact.years.as_slice();
        Self {
            years: compact.years.clone(),
            total_market: expand_values(years, &compact.total_market),
            end_user: expand_segment(years, &compact.end_user),
            aircraft_type: expand_segment(years, &compact.aircraft_type),
            region: expand_segment(years, &compact.region),
            application: expand_segment(years, &compact.application),
            furnished_equipment: expand_segment(years, &compact.furnished_equipment),
            process_type: compact.process_type.as_ref().map(|s| expand_segment(years, s)),
            material_type: compact.material_type.as_ref().map(|s| expand_segment(years, s)),
            country_data_by_region: expand_nested(years, &compact.country_data_by_region),
            end_user_by_aircraft_type: expand_nested(years, &compact.end_user_by_aircraft_type),
            end_user_by_region: expand_nested(years, &compact.end_user_by_region),
            aircraft_type_by_region: expand_nested(years, &compact.aircraft_type_by_region),
            application_by_region: expand_nested(years, &compact.application_by_region),
            equipment_by_region: expand_nested(years, &compact.equipment_by_region),
            process_type_by_region: compact
                .process_type_by_region
                .as_ref()
                .map(|n| expand_nested(years, n)),
            material_type_by_region: compact
                .material_type_by_region
                .as_ref()
                .map(|n| expand_nested(years, n)),
            process_type_by_application: compact
                .process_type_by_application
                .as_ref()
                .map(|n| expand_nested(years, n)),
        }
    }

    /// Inverse of [`MarketData::from_compact`] for documents built from compact input.
    pub fn to_compact(&self) -> CompactMarketData {
        CompactMarketData {
            years: self.years.clone(),
            total_market: collapse_values(&self.total_market),
            end_user: collapse_segment(&self.end_user),
            aircraft_type: collapse_segment(&self.aircraft_type),
            region: collapse_segment(&self.region),
            application: collapse_segment(&self.application),
            furnished_equipment: collapse_segment(&self.furnished_equipment),
            process_type: self.process_type.as_deref().map(collapse_segment),
            material_type: self.material_type.as_deref().map(collapse_segment),
            country_data_by_region: collapse_nested(&self.country_data_by_region),
            end_user_by_aircraft_type: collapse_nested(&self.end_user_by_aircraft_type),
            end_user_by_region: collapse_nested(&self.end_user_by_region),
            aircraft_type_by_region: collapse_nested(&self.aircraft_type_by_region),
            application_by_region: collapse_nested(&self.application_by_region),
            equipment_by_region: collapse_nested(&self.equipment_by_region),
            process_type_by_region: self.process_type_by_region.as_ref().map(collapse_nested),
            material_type_by_region: self.material_type_by_region.as_ref().map(collapse_nested),
            process_type_by_application: self.process_type_by_application.as_ref().map(collapse_nested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Axis;

    fn sample_compact() -> CompactMarketData {
        let json = r#"{
            "years": [2024, 2025, 2026],
            "totalMarket": [1000, 1100, 1250],
            "endUser": {"OE": [600, 650, 700], "Aftermarket": [400, 450, 550]},
            "aircraftType": {"Wide Body": [500, 550, 600], "Narrow Body": [500, 550, 650]},
            "region": {"North America": [400, 420, 480], "Europe": [600, 680, 770]},
            "application": {},
            "furnishedEquipment": {"BFE (Buyer Furnished)": [300, 330, 370]},
            "processType": {"Autoclave": [10, 20, 30]},
            "countryDataByRegion": {"North America": {"US": [350, 360, 400], "Canada": [50, 60]}},
            "aircraftTypeByRegion": {"Wide Body": {"North America": [200, 210, 240]}}
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn expand_values_aligns_years_and_zero_fills() {
        let out = expand_values(&[2024, 2025, 2026], &[1.0, 2.0]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], YearlyData { year: 2024, value: 1.0 });
        assert_eq!(out[2], YearlyData { year: 2026, value: 0.0 });
    }

    #[test]
    fn expand_values_ignores_extra_values() {
        let out = expand_values(&[2024], &[1.0, 2.0, 3.0]);
        assert_eq!(out, vec![YearlyData { year: 2024, value: 1.0 }]);
    }

    #[test]
    fn expand_segment_preserves_key_order() {
        let compact = sample_compact();
        let segments = expand_segment(&compact.years, &compact.aircraft_type);
        let names: Vec<&str> = segments.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Wide Body", "Narrow Body"]);
        for seg in &segments {
            let years: Vec<i32> = seg.data.iter().map(|d| d.year).collect();
            assert_eq!(years, compact.years);
        }
    }

    #[test]
    fn expand_nested_expands_each_key_independently() {
        let compact = sample_compact();
        let nested = expand_nested(&compact.years, &compact.country_data_by_region);
        let countries = nested.get("North America").unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[1].name, "Canada");
        assert_eq!(countries[1].data[2].value, 0.0);
    }

    #[test]
    fn optional_axes_stay_absent() {
        let data = MarketData::from_compact(&sample_compact());
        assert!(data.process_type.is_some());
        assert!(data.material_type.is_none());
        assert!(data.process_type_by_region.is_none());
        assert!(data.axis(Axis::Material).is_none());
        // Present-but-empty is still "applicable".
        assert_eq!(data.axis(Axis::Application).map(|s| s.len()), Some(0));
    }

    #[test]
    fn expand_then_collapse_reproduces_values() {
        let mut compact = sample_compact();
        // Round-tripping is exact for full-length arrays; normalize the one sparse series.
        if let Some(mut na) = compact.country_data_by_region.get("North America").cloned() {
            na.insert("Canada", vec![50.0, 60.0, 0.0]);
            compact.country_data_by_region.insert("North America", na);
        }

        let data = MarketData::from_compact(&compact);
        assert_eq!(data.to_compact(), compact);
    }

    #[test]
    fn end_to_end_cagr_on_expanded_total() {
        let data = MarketData::from_compact(&sample_compact());
        let start = crate::metrics::value_at(&data.total_market, 2024);
        let end = crate::metrics::value_at(&data.total_market, 2026);
        let cagr = crate::metrics::cagr(start, end, 2.0);
        assert!((cagr - 11.803398874989483).abs() < 1e-9, "cagr={cagr}");
    }
}
