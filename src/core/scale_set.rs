use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::layout::Layout;
use crate::core::scale::LinearScale;
use crate::core::series::{Series, distinct_unit_keys};

/// Explicit domain overrides, per axis. Absent entries fall back to the
/// data's observed value ranges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainOverride {
    pub x: Option<(f64, f64)>,
    /// Per-unit y domains, keyed by unit name.
    pub y: IndexMap<String, (f64, f64)>,
}

impl DomainOverride {
    #[must_use]
    pub fn with_x(mut self, min: f64, max: f64) -> Self {
        self.x = Some((min, max));
        self
    }

    #[must_use]
    pub fn with_y(mut self, units: impl Into<String>, min: f64, max: f64) -> Self {
        self.y.insert(units.into(), (min, max));
        self
    }
}

/// One shared x scale plus one y scale per distinct unit, keyed by unit name
/// in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSet {
    pub x: LinearScale,
    pub y: IndexMap<String, LinearScale>,
}

impl ScaleSet {
    /// Derives the scale set for one render.
    ///
    /// Returns `None` when no point exists anywhere and no x override is
    /// given; there is nothing to scale against and the caller shows the
    /// no-data state instead.
    #[must_use]
    pub fn calculate(
        layout: &Layout,
        domain: Option<&DomainOverride>,
        data: &[Series],
    ) -> Option<Self> {
        let x_domain = domain
            .and_then(|d| d.x)
            .or_else(|| extent(data.iter().flat_map(|s| s.points.iter().map(|p| p.x))))?;
        let x = LinearScale::new(padded(x_domain), (0.0, layout.width)).ok()?;

        let mut y = IndexMap::new();
        for unit in distinct_unit_keys(data) {
            let y_domain = domain
                .and_then(|d| d.y.get(&unit).copied())
                .or_else(|| {
                    extent(
                        data.iter()
                            .filter(|s| s.unit_key() == unit)
                            .flat_map(|s| s.points.iter().map(|p| p.y)),
                    )
                })
                // A unit whose series all have zero points still needs a
                // scale so the one-axis-per-unit invariant holds.
                .unwrap_or((0.0, 1.0));
            let scale = LinearScale::new(padded(y_domain), (layout.plot_height, 0.0)).ok()?;
            y.insert(unit, scale);
        }

        Some(Self { x, y })
    }

    /// The y scale a series with this unit key projects through.
    #[must_use]
    pub fn y_for_unit(&self, unit_key: &str) -> Option<&LinearScale> {
        self.y.get(unit_key)
    }

    /// First unit's scale; owns the x-axis baseline and the y grid.
    #[must_use]
    pub fn primary_y(&self) -> Option<(&str, &LinearScale)> {
        self.y.first().map(|(unit, scale)| (unit.as_str(), scale))
    }
}

/// Min/max over finite values, `None` when no finite value exists.
fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for value in values.filter(|v| v.is_finite()) {
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }
    bounds
}

/// Pads a degenerate domain (min == max) to a workable span so mapping never
/// divides by zero: ±1 around zero, otherwise ±1% of the value.
fn padded((min, max): (f64, f64)) -> (f64, f64) {
    if min != max {
        return (min, max);
    }
    let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.01 };
    (min - pad, max + pad)
}
