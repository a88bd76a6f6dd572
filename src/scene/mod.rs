//! Retained scene graph with keyed enter/update/exit reconciliation.
//!
//! The scene owns every visual element between renders: series lines keyed
//! by id, y-axes keyed by unit, the shared x-axis, the no-data placeholder
//! and the highlight layer. Each reconcile pass stamps the elements it
//! touches with a fresh render generation; anything left carrying an older
//! stamp is exiting. Transitions are fire-and-forget: retargeting supersedes
//! whatever was still animating.

mod node;
mod tween;

pub use node::{
    ElementPhase, HighlightMarker, HighlightMarks, LineElement, NoDataElement, XAxisElement,
    YAxisElement,
};
pub use tween::{PathTween, Tween};

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use crate::core::layout::{Layout, Y_AXIS_WIDTH};
use crate::core::scale_set::ScaleSet;
use crate::core::selection::SelectedSeries;
use crate::core::series::{Series, distinct_unit_keys, has_data};
use crate::core::types::Margin;
use crate::render::Color;

/// Opacity of fully faded-out elements; kept just above zero so a later
/// fade-in animates from a drawn state.
pub(crate) const HIDDEN_OPACITY: f64 = 1e-6;

/// Opacity of the non-hovered lines while one series is hovered.
pub const FADED_LINE_OPACITY: f64 = 0.33;

/// Message shown by the no-data placeholder unless the host supplies one.
pub const DEFAULT_NO_DATA_MESSAGE: &str = "No data to display";

/// Everything one reconcile pass needs besides the retained scene itself.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileInputs<'a> {
    pub data: &'a [Series],
    pub layout: Layout,
    pub scales: Option<&'a ScaleSet>,
    pub margin: Margin,
    pub title_height: f64,
    pub mini: bool,
    pub duration_ms: f64,
}

/// Outcome of one reconcile pass, for hosts, logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconcileDiff {
    pub entered: Vec<String>,
    pub updated: Vec<String>,
    pub exited: Vec<String>,
    pub has_data: bool,
}

/// The retained chart scene.
#[derive(Debug)]
pub struct Scene {
    lines: IndexMap<String, LineElement>,
    y_axes: IndexMap<String, YAxisElement>,
    x_axis: XAxisElement,
    no_data: NoDataElement,
    highlight: Option<HighlightMarks>,
    hovered: Option<String>,
    origin_x: Tween,
    origin_y: Tween,
    plot_width: Tween,
    plot_height: Tween,
    generation: u64,
    has_rendered: bool,
    has_data: bool,
}

impl Scene {
    #[must_use]
    pub fn new(no_data_message: impl Into<String>) -> Self {
        Self {
            lines: IndexMap::new(),
            y_axes: IndexMap::new(),
            x_axis: XAxisElement::new(),
            no_data: NoDataElement {
                opacity: Tween::settled(HIDDEN_OPACITY),
                message: no_data_message.into(),
                x: 0.0,
                y: 0.0,
            },
            highlight: None,
            hovered: None,
            origin_x: Tween::settled(0.0),
            origin_y: Tween::settled(0.0),
            plot_width: Tween::settled(0.0),
            plot_height: Tween::settled(0.0),
            generation: 0,
            has_rendered: false,
            has_data: false,
        }
    }

    /// One keyed enter/update/exit pass against the new dataset.
    ///
    /// The first pass of a fresh scene snaps every transition so nothing
    /// fades or slides on initial display; later passes animate over
    /// `duration_ms` (zero still means "apply immediately").
    pub fn reconcile(&mut self, inputs: &ReconcileInputs<'_>) -> ReconcileDiff {
        self.generation += 1;
        let generation = self.generation;
        let duration = if self.has_rendered {
            inputs.duration_ms.max(0.0)
        } else {
            0.0
        };

        // Highlight marks reference the previous render's data identity;
        // drop them before anything else touches the scene.
        self.highlight = None;
        self.hovered = None;

        let present = has_data(inputs.data);
        self.has_data = present;

        self.origin_x.retarget(
            inputs.margin.left + inputs.layout.y_axes_width,
            duration,
            generation,
        );
        self.origin_y
            .retarget(inputs.margin.top + inputs.title_height, duration, generation);
        self.plot_width
            .retarget(inputs.layout.width, duration, generation);
        self.plot_height
            .retarget(inputs.layout.plot_height, duration, generation);

        let mut diff = ReconcileDiff {
            has_data: present,
            ..ReconcileDiff::default()
        };

        self.reconcile_lines(inputs, duration, generation, &mut diff);
        self.reconcile_y_axes(inputs, present, duration, generation);
        self.reconcile_x_axis(inputs, present, duration, generation);

        self.no_data.x = inputs.layout.width / 2.0;
        self.no_data.y = (inputs.layout.height - 24.0) / 2.0;
        self.no_data.opacity.retarget(
            if present { HIDDEN_OPACITY } else { 1.0 },
            duration,
            generation,
        );

        self.has_rendered = true;
        diff
    }

    fn reconcile_lines(
        &mut self,
        inputs: &ReconcileInputs<'_>,
        duration: f64,
        generation: u64,
        diff: &mut ReconcileDiff,
    ) {
        for series in inputs.data {
            let path = project_path(series, inputs.scales);
            match self.lines.entry(series.id.clone()) {
                Entry::Occupied(mut slot) => {
                    let element = slot.get_mut();
                    // A key that was mid-exit and came back re-enters.
                    let reentering = element.phase == ElementPhase::Exiting;
                    element.phase = if reentering {
                        ElementPhase::Entering
                    } else {
                        ElementPhase::Updating
                    };
                    element.unit_key = series.unit_key().to_owned();
                    element.color = series.color;
                    element.path.retarget(path, duration, generation);
                    element.opacity.retarget(1.0, duration, generation);
                    element.last_seen = generation;
                    if reentering {
                        diff.entered.push(series.id.clone());
                    } else {
                        diff.updated.push(series.id.clone());
                    }
                }
                Entry::Vacant(slot) => {
                    let mut opacity = Tween::settled(HIDDEN_OPACITY);
                    opacity.retarget(1.0, duration, generation);
                    slot.insert(LineElement {
                        phase: ElementPhase::Entering,
                        unit_key: series.unit_key().to_owned(),
                        color: series.color,
                        opacity,
                        // New lines appear at their final geometry and only
                        // fade in.
                        path: PathTween::settled(path),
                        last_seen: generation,
                    });
                    diff.entered.push(series.id.clone());
                }
            }
        }

        let mut removed: Vec<String> = Vec::new();
        for (id, element) in &mut self.lines {
            if element.last_seen == generation {
                continue;
            }
            if element.phase != ElementPhase::Exiting {
                element.phase = ElementPhase::Exiting;
                element
                    .opacity
                    .retarget(HIDDEN_OPACITY, duration, generation);
                diff.exited.push(id.clone());
            }
            if duration <= 0.0 {
                removed.push(id.clone());
            }
        }
        for id in &removed {
            self.lines.shift_remove(id);
        }
    }

    fn reconcile_y_axes(
        &mut self,
        inputs: &ReconcileInputs<'_>,
        present: bool,
        duration: f64,
        generation: u64,
    ) {
        let units = distinct_unit_keys(inputs.data);
        let opacity_target = if present { 1.0 } else { HIDDEN_OPACITY };

        for (index, unit) in units.iter().enumerate() {
            let offset = -(index as f64) * Y_AXIS_WIDTH;
            let tick_values = y_tick_values(unit, inputs);
            let color_key: Vec<Color> = if units.len() > 1 {
                inputs
                    .data
                    .iter()
                    .filter(|series| series.unit_key() == unit.as_str())
                    .filter_map(|series| series.color)
                    .collect()
            } else {
                Vec::new()
            };

            match self.y_axes.entry(unit.clone()) {
                Entry::Occupied(mut slot) => {
                    let axis = slot.get_mut();
                    axis.phase = ElementPhase::Updating;
                    axis.offset_x.retarget(offset, duration, generation);
                    axis.opacity.retarget(opacity_target, duration, generation);
                    axis.tick_values = tick_values;
                    axis.color_key = color_key;
                    axis.last_seen = generation;
                }
                Entry::Vacant(slot) => {
                    let mut opacity = Tween::settled(HIDDEN_OPACITY);
                    opacity.retarget(opacity_target, duration, generation);
                    slot.insert(YAxisElement {
                        phase: ElementPhase::Entering,
                        offset_x: Tween::settled(offset),
                        opacity,
                        tick_values,
                        color_key,
                        last_seen: generation,
                    });
                }
            }
        }

        // Axes for vanished units leave immediately; a fading empty axis
        // reads as broken, not as a transition.
        self.y_axes.retain(|_, axis| axis.last_seen == generation);
    }

    fn reconcile_x_axis(
        &mut self,
        inputs: &ReconcileInputs<'_>,
        present: bool,
        duration: f64,
        generation: u64,
    ) {
        self.x_axis.tick_values = inputs
            .scales
            .map(|scales| {
                scales
                    .x
                    .truncated_ticks(x_tick_count(inputs.layout.width))
            })
            .unwrap_or_default();

        // The axis baseline sits at y = 0 of the primary unit's scale,
        // clamped into the plot; mini charts pin it to the bottom.
        let baseline = if inputs.mini {
            inputs.layout.plot_height
        } else {
            inputs
                .scales
                .and_then(ScaleSet::primary_y)
                .map(|(_, scale)| scale.map(0.0).max(0.0).min(inputs.layout.plot_height))
                .unwrap_or(inputs.layout.plot_height)
        };

        self.x_axis.y_offset.retarget(baseline, duration, generation);
        self.x_axis.opacity.retarget(1.0, duration, generation);
        let tick_target = if inputs.mini || !present {
            HIDDEN_OPACITY
        } else {
            1.0
        };
        self.x_axis
            .tick_opacity
            .retarget(tick_target, duration, generation);
    }

    /// Steps every active transition by `delta_ms` of wall-clock time and
    /// removes exiting lines whose fade-out has settled.
    pub fn advance(&mut self, delta_ms: f64) {
        self.origin_x.advance(delta_ms);
        self.origin_y.advance(delta_ms);
        self.plot_width.advance(delta_ms);
        self.plot_height.advance(delta_ms);
        self.x_axis.y_offset.advance(delta_ms);
        self.x_axis.opacity.advance(delta_ms);
        self.x_axis.tick_opacity.advance(delta_ms);
        self.no_data.opacity.advance(delta_ms);

        for element in self.lines.values_mut() {
            element.opacity.advance(delta_ms);
            element.path.advance(delta_ms);
        }
        self.lines
            .retain(|_, element| element.phase != ElementPhase::Exiting || !element.opacity.is_settled());

        for axis in self.y_axes.values_mut() {
            axis.offset_x.advance(delta_ms);
            axis.opacity.advance(delta_ms);
        }
    }

    /// Replaces the highlight marks for the given selection.
    pub fn set_highlight(&mut self, selection: &[SelectedSeries], scales: &ScaleSet) {
        let Some(first) = selection.first() else {
            self.highlight = None;
            return;
        };
        let Some((_, primary)) = scales.primary_y() else {
            self.highlight = None;
            return;
        };

        let guide_x = scales.x.map(first.point.x);
        let markers = selection
            .iter()
            .filter_map(|selected| {
                let unit = selected
                    .units
                    .as_deref()
                    .unwrap_or(crate::core::series::UNKNOWN_UNITS);
                let y_scale = scales.y_for_unit(unit)?;
                Some(HighlightMarker {
                    x: scales.x.map(selected.point.x),
                    y: y_scale.map(selected.point.y),
                    color: selected.color,
                })
            })
            .collect();

        self.highlight = Some(HighlightMarks {
            guide_x,
            guide_y_range: primary.range(),
            markers,
        });
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Fades every line except `hovered_id` to [`FADED_LINE_OPACITY`].
    pub fn fade_others(&mut self, hovered_id: &str, duration_ms: f64) {
        self.generation += 1;
        let generation = self.generation;
        self.hovered = Some(hovered_id.to_owned());
        for (id, element) in &mut self.lines {
            if element.phase == ElementPhase::Exiting {
                continue;
            }
            let target = if id == hovered_id {
                1.0
            } else {
                FADED_LINE_OPACITY
            };
            element.opacity.retarget(target, duration_ms, generation);
        }
    }

    /// Restores full opacity after a hover ends.
    pub fn clear_fade(&mut self, duration_ms: f64) {
        self.generation += 1;
        let generation = self.generation;
        self.hovered = None;
        for element in self.lines.values_mut() {
            if element.phase == ElementPhase::Exiting {
                continue;
            }
            element.opacity.retarget(1.0, duration_ms, generation);
        }
    }

    #[must_use]
    pub fn line(&self, id: &str) -> Option<&LineElement> {
        self.lines.get(id)
    }

    pub fn lines(&self) -> impl Iterator<Item = (&str, &LineElement)> {
        self.lines.iter().map(|(id, element)| (id.as_str(), element))
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn y_axes(&self) -> impl Iterator<Item = (&str, &YAxisElement)> {
        self.y_axes.iter().map(|(unit, axis)| (unit.as_str(), axis))
    }

    #[must_use]
    pub fn y_axis(&self, unit_key: &str) -> Option<&YAxisElement> {
        self.y_axes.get(unit_key)
    }

    #[must_use]
    pub fn x_axis(&self) -> &XAxisElement {
        &self.x_axis
    }

    #[must_use]
    pub fn no_data(&self) -> &NoDataElement {
        &self.no_data
    }

    #[must_use]
    pub fn highlight(&self) -> Option<&HighlightMarks> {
        self.highlight.as_ref()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Plot-group origin within the container, at current animation progress.
    #[must_use]
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x.value(), self.origin_y.value())
    }

    /// Plot-area size at current animation progress.
    #[must_use]
    pub fn plot_size(&self) -> (f64, f64) {
        (self.plot_width.value(), self.plot_height.value())
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Projects a series through the shared x scale and its unit's y scale.
/// Without scales (the all-empty dataset) there is nothing to draw.
fn project_path(series: &Series, scales: Option<&ScaleSet>) -> Vec<(f64, f64)> {
    let Some(scales) = scales else {
        return Vec::new();
    };
    let Some(y_scale) = scales.y_for_unit(series.unit_key()) else {
        return Vec::new();
    };
    series
        .points
        .iter()
        .map(|point| (scales.x.map(point.x), y_scale.map(point.y)))
        .collect()
}

fn y_tick_values(unit: &str, inputs: &ReconcileInputs<'_>) -> Vec<f64> {
    let Some(scales) = inputs.scales else {
        return Vec::new();
    };
    let Some(scale) = scales.y_for_unit(unit) else {
        return Vec::new();
    };
    if inputs.mini {
        // Mini charts label only the extremes.
        let (lo, hi) = scale.domain();
        vec![lo, hi]
    } else {
        scale.truncated_ticks(y_tick_count(inputs.layout.plot_height))
    }
}

fn x_tick_count(width: f64) -> usize {
    (((width / 150.0).floor() as usize) + 1).min(12)
}

fn y_tick_count(plot_height: f64) -> usize {
    (((plot_height / 30.0).floor() as usize) + 1).min(6)
}
