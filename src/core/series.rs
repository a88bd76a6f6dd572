use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::types::ChartPoint;
use crate::render::Color;

/// Bucket key for series without an assigned measurement unit.
///
/// Every series resolves to exactly one y-scale, so unitless series share
/// this sentinel axis. A real unit literally named `"unknown"` merges into
/// the same bucket; series ids, not units, carry diffing identity, so only
/// axis grouping is affected.
pub const UNKNOWN_UNITS: &str = "unknown";

/// One named, colored, unit-tagged sequence of points rendered as one line.
///
/// `id` is the stable diffing key across updates. Duplicate ids leave the
/// scene diff undefined. `points` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub name: Option<String>,
    pub units: Option<String>,
    pub color: Option<Color>,
    pub points: Vec<ChartPoint>,
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            id: id.into(),
            name: None,
            units: None,
            color: None,
            points,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Unit key this series scales against, falling back to [`UNKNOWN_UNITS`].
    #[must_use]
    pub fn unit_key(&self) -> &str {
        self.units.as_deref().unwrap_or(UNKNOWN_UNITS)
    }
}

/// Distinct unit keys in first-seen order.
///
/// The order is load-bearing: it fixes y-axis placement (index times the
/// fixed axis width) and which unit is "primary" for the x-axis baseline and
/// the y grid.
#[must_use]
pub fn distinct_unit_keys(data: &[Series]) -> Vec<String> {
    let mut units: IndexSet<&str> = IndexSet::new();
    for series in data {
        units.insert(series.unit_key());
    }
    units.into_iter().map(str::to_owned).collect()
}

/// Declarative no-data predicate shared by the scene and the engine.
#[must_use]
pub fn has_data(data: &[Series]) -> bool {
    !data.is_empty() && !data[0].points.is_empty()
}
