use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::series::Series;
use crate::core::types::ChartPoint;
use crate::render::Color;

/// Two x-values closer than this are treated as the same sample position, so
/// series sampled at numerically identical x are jointly selected.
pub const EQUAL_X_THRESHOLD: f64 = 1e-8;

/// One series/point pair in the current selection.
///
/// The selection copies identity and the chosen point into its own structure;
/// the input [`Series`] values are never written to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedSeries {
    pub series_id: String,
    pub name: Option<String>,
    pub units: Option<String>,
    pub color: Option<Color>,
    pub point: ChartPoint,
}

/// Nearest-point selection across all series at `target_x`.
///
/// For each series the point minimizing `|x - target_x|` wins, first minimal
/// point on ties. A series joins the selection when its winner's x differs
/// from the globally closest winner's x by less than [`EQUAL_X_THRESHOLD`].
/// Positions outside the data's x-domain select boundary points; empty
/// series contribute nothing.
#[must_use]
pub fn find_selected_series(data: &[Series], target_x: f64) -> Vec<SelectedSeries> {
    let mut nearest: SmallVec<[(usize, ChartPoint, OrderedFloat<f64>); 8]> = SmallVec::new();
    for (index, series) in data.iter().enumerate() {
        let mut best: Option<(ChartPoint, OrderedFloat<f64>)> = None;
        for point in &series.points {
            let distance = OrderedFloat((point.x - target_x).abs());
            match best {
                Some((_, current)) if current <= distance => {}
                _ => best = Some((*point, distance)),
            }
        }
        if let Some((point, distance)) = best {
            nearest.push((index, point, distance));
        }
    }

    let Some(winner_x) = nearest
        .iter()
        .min_by_key(|(_, _, distance)| *distance)
        .map(|(_, point, _)| point.x)
    else {
        return Vec::new();
    };

    nearest
        .into_iter()
        .filter(|(_, point, _)| (point.x - winner_x).abs() < EQUAL_X_THRESHOLD)
        .map(|(index, point, _)| {
            let series = &data[index];
            SelectedSeries {
                series_id: series.id.clone(),
                name: series.name.clone(),
                units: series.units.clone(),
                color: series.color,
                point,
            }
        })
        .collect()
}
