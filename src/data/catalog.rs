//! Static catalog of research categories, datasets, and dashboards.
//!
//! Only dashboards with a [`Dashboard`] definition can be opened; the rest are
//! listed for completeness. Opening a dashboard whose dataset has not been
//! purchased is refused.

use crate::domain::{Axis, UnitScale};
use crate::error::{AppError, EXIT_ACCESS, EXIT_USAGE};

/// A dashboard that can be loaded and rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dashboard {
    pub id: &'static str,
    pub title: &'static str,
    /// Document path relative to the data source root.
    pub data_file: &'static str,
    pub unit: UnitScale,
    /// Per-dashboard tab names overriding `Axis::default_label`.
    pub labels: &'static [(Axis, &'static str)],
}

impl Dashboard {
    pub fn label(&self, axis: Axis) -> &'static str {
        self.labels
            .iter()
            .find(|(a, _)| *a == axis)
            .map(|(_, label)| *label)
            .unwrap_or_else(|| axis.default_label())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DashboardEntry {
    pub catalog_id: &'static str,
    pub name: &'static str,
    /// Present when the dashboard has a data document.
    pub dashboard: Option<&'static Dashboard>,
}

#[derive(Debug, Clone, Copy)]
pub struct Dataset {
    pub id: &'static str,
    pub name: &'static str,
    pub purchased: bool,
    pub dashboards: &'static [DashboardEntry],
}

#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub id: &'static str,
    pub title: &'static str,
    pub datasets: &'static [Dataset],
}

const INTERIORS_LABELS: &[(Axis, &str)] = &[(Axis::Equipment, "Furnished Equipment")];

pub const AIRCRAFT_INTERIORS: Dashboard = Dashboard {
    id: "aircraft-interiors",
    title: "Global Aircraft Interiors Market",
    data_file: "marketData.json",
    unit: UnitScale::Billions,
    labels: INTERIORS_LABELS,
};

pub const CABIN_COMPOSITES: Dashboard = Dashboard {
    id: "cabin-composites",
    title: "Aircraft Cabin Interior Composites Market",
    data_file: "aircraft-cabin-composites-market.json",
    unit: UnitScale::Millions,
    labels: &[
        (Axis::Application, "Application Type"),
        (Axis::Equipment, "Composite Type"),
        (Axis::Process, "Process Type"),
    ],
};

pub const SOFT_GOODS: Dashboard = Dashboard {
    id: "soft-goods",
    title: "Aircraft Soft Goods Market",
    data_file: "aircraft-soft-goods-market.json",
    unit: UnitScale::Millions,
    labels: &[(Axis::Application, "Product Type"), (Axis::Equipment, "Material Type")],
};

pub const WATER_WASTE_WATER: Dashboard = Dashboard {
    id: "water-waste-water",
    title: "Aircraft Water/Waste Water Market",
    data_file: "aircraft-water-waste-water-market.json",
    unit: UnitScale::Millions,
    labels: &[(Axis::Application, "System Type"), (Axis::Equipment, "Equipment Type")],
};

pub const GALLEY: Dashboard = Dashboard {
    id: "galley-market",
    title: "Aircraft Galley Market",
    data_file: "aircraft-galley-market.json",
    unit: UnitScale::Millions,
    labels: &[(Axis::Application, "Galley Type"), (Axis::Equipment, "Equipment Type")],
};

pub const PSU: Dashboard = Dashboard {
    id: "psu-market",
    title: "Aircraft PSU Market",
    data_file: "aircraft-psu-market.json",
    unit: UnitScale::Millions,
    labels: &[(Axis::Application, "Product Type"), (Axis::Equipment, "Equipment Type")],
};

pub const LAVATORY: Dashboard = Dashboard {
    id: "lavatory-market",
    title: "Aircraft Lavatory Market",
    data_file: "aircraft-lavatory-market.json",
    unit: UnitScale::Millions,
    labels: &[(Axis::Application, "Lavatory Type"), (Axis::Equipment, "Equipment Type")],
};

pub const OHSB: Dashboard = Dashboard {
    id: "ohsb-market",
    title: "Aircraft Overhead Stowage Bin Market",
    data_file: "aircraft-ohsb-market.json",
    unit: UnitScale::Millions,
    labels: &[(Axis::Application, "Bin Type"), (Axis::Equipment, "Equipment Type")],
};

pub const STOWAGES: Dashboard = Dashboard {
    id: "stowages-market",
    title: "Aircraft Stowages Market",
    data_file: "aircraft-stowages-market.json",
    unit: UnitScale::Millions,
    labels: &[(Axis::Application, "Stowage Type"), (Axis::Equipment, "Equipment Type")],
};

pub const FLOOR_PANELS: Dashboard = Dashboard {
    id: "floor-panels",
    title: "Aircraft Floor Panels Market",
    data_file: "aircraft-floor-panels-market.json",
    unit: UnitScale::Millions,
    labels: &[
        (Axis::EndUser, "End-User Type"),
        (Axis::Application, "Core Type"),
        (Axis::Equipment, "Equipment Type"),
    ],
};

/// Every dashboard with a data document.
pub const DASHBOARDS: &[&Dashboard] = &[
    &AIRCRAFT_INTERIORS,
    &CABIN_COMPOSITES,
    &SOFT_GOODS,
    &WATER_WASTE_WATER,
    &GALLEY,
    &PSU,
    &LAVATORY,
    &OHSB,
    &STOWAGES,
    &FLOOR_PANELS,
];

const fn listed(catalog_id: &'static str, name: &'static str) -> DashboardEntry {
    DashboardEntry {
        catalog_id,
        name,
        dashboard: None,
    }
}

const fn active(catalog_id: &'static str, dashboard: &'static Dashboard) -> DashboardEntry {
    DashboardEntry {
        catalog_id,
        name: dashboard.title,
        dashboard: Some(dashboard),
    }
}

pub const CATEGORIES: &[Category] = &[
    Category {
        id: "composites",
        title: "Composites",
        datasets: &[
            Dataset {
                id: "carbon-fiber",
                name: "Carbon Fiber Market",
                purchased: false,
                dashboards: &[
                    listed("cf-global", "Global Carbon Fiber Market Overview"),
                    listed("cf-aerospace", "Aerospace Carbon Fiber Applications"),
                    listed("cf-automotive", "Automotive Carbon Fiber Trends"),
                ],
            },
            Dataset {
                id: "glass-fiber",
                name: "Glass Fiber Composites",
                purchased: false,
                dashboards: &[
                    listed("gf-market", "Glass Fiber Market Analysis"),
                    listed("gf-construction", "Construction Applications"),
                ],
            },
            Dataset {
                id: "polymer-matrix",
                name: "Polymer Matrix Composites",
                purchased: false,
                dashboards: &[
                    listed("pmc-overview", "PMC Market Overview"),
                    listed("pmc-industrial", "Industrial Applications"),
                    listed("pmc-forecast", "Market Forecast 2025-2030"),
                ],
            },
        ],
    },
    Category {
        id: "aerospace-defense",
        title: "Aerospace & Defense",
        datasets: &[
            Dataset {
                id: "aircraft-interiors",
                name: "Aircraft Interiors",
                purchased: true,
                dashboards: &[
                    active("ai-global", &AIRCRAFT_INTERIORS),
                    active("ai-cabin-composites", &CABIN_COMPOSITES),
                    active("ai-soft-goods", &SOFT_GOODS),
                    active("ai-water-waste", &WATER_WASTE_WATER),
                    active("ai-galley", &GALLEY),
                    active("ai-psu", &PSU),
                    active("ai-lavatory", &LAVATORY),
                    active("ai-ohsb", &OHSB),
                    active("ai-stowages", &STOWAGES),
                ],
            },
            Dataset {
                id: "aircraft-floor-panels",
                name: "Aircraft Floor Panels",
                purchased: true,
                dashboards: &[active("fp-global", &FLOOR_PANELS)],
            },
            Dataset {
                id: "commercial-aircraft",
                name: "Commercial Aircraft",
                purchased: false,
                dashboards: &[
                    listed("ca-fleet", "Commercial Fleet Forecast"),
                    listed("ca-deliveries", "Aircraft Deliveries Outlook"),
                ],
            },
        ],
    },
];

/// Look up a dashboard by id (`soft-goods`) or catalog id (`ai-soft-goods`).
pub fn find_dashboard(id: &str) -> Option<(&'static Dataset, &'static DashboardEntry)> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.datasets.iter())
        .flat_map(|d| d.dashboards.iter().map(move |e| (d, e)))
        .find(|(_, e)| e.catalog_id == id || e.dashboard.is_some_and(|db| db.id == id))
}

/// Resolve an id to an openable dashboard, enforcing dataset access.
pub fn open_dashboard(id: &str) -> Result<&'static Dashboard, AppError> {
    let (dataset, entry) = find_dashboard(id).ok_or_else(|| {
        AppError::new(
            EXIT_USAGE,
            format!("Unknown dashboard '{id}'. Run `mdash list` to see available dashboards."),
        )
    })?;

    if !dataset.purchased {
        return Err(AppError::new(
            EXIT_ACCESS,
            format!("Access to '{}' requires a subscription to {}.", entry.name, dataset.name),
        ));
    }

    entry.dashboard.ok_or_else(|| {
        AppError::new(
            EXIT_USAGE,
            format!("Dashboard '{}' has no data available yet.", entry.name),
        )
    })
}

/// Dashboards that can be opened right now, in catalog order.
pub fn accessible_dashboards() -> Vec<&'static Dashboard> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.datasets.iter())
        .filter(|d| d.purchased)
        .flat_map(|d| d.dashboards.iter())
        .filter_map(|e| e.dashboard)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_by_route_or_catalog_id() {
        let (_, by_route) = find_dashboard("soft-goods").unwrap();
        let (_, by_catalog) = find_dashboard("ai-soft-goods").unwrap();
        assert_eq!(by_route.catalog_id, by_catalog.catalog_id);
        assert!(find_dashboard("nope").is_none());
    }

    #[test]
    fn unpurchased_dataset_is_refused() {
        let err = open_dashboard("cf-global").unwrap_err();
        assert_eq!(err.exit_code(), EXIT_ACCESS);
        assert_eq!(open_dashboard("missing").unwrap_err().exit_code(), EXIT_USAGE);
    }

    #[test]
    fn labels_fall_back_to_axis_defaults() {
        let db = open_dashboard("floor-panels").unwrap();
        assert_eq!(db.label(Axis::Application), "Core Type");
        assert_eq!(db.label(Axis::Region), "Region");
    }

    #[test]
    fn every_dashboard_is_accessible_once() {
        let open = accessible_dashboards();
        assert_eq!(open.len(), DASHBOARDS.len());
        for db in DASHBOARDS {
            assert!(open.iter().any(|o| o.id == db.id));
        }
    }
}
