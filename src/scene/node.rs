use serde::{Deserialize, Serialize};

use crate::render::Color;
use crate::scene::tween::{PathTween, Tween};

/// Lifecycle phase of a retained scene element across reconcile passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementPhase {
    Entering,
    Updating,
    Exiting,
}

/// Retained visual state for one series line, keyed by series id.
#[derive(Debug, Clone, PartialEq)]
pub struct LineElement {
    pub(super) phase: ElementPhase,
    pub(super) unit_key: String,
    pub(super) color: Option<Color>,
    pub(super) opacity: Tween,
    pub(super) path: PathTween,
    pub(super) last_seen: u64,
}

impl LineElement {
    #[must_use]
    pub fn phase(&self) -> ElementPhase {
        self.phase
    }

    #[must_use]
    pub fn unit_key(&self) -> &str {
        &self.unit_key
    }

    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Opacity at the current animation progress.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity.value()
    }

    #[must_use]
    pub fn opacity_target(&self) -> f64 {
        self.opacity.target()
    }

    /// Projected polyline at the current animation progress.
    #[must_use]
    pub fn path_points(&self) -> Vec<(f64, f64)> {
        self.path.points()
    }

    #[must_use]
    pub fn path_target(&self) -> &[(f64, f64)] {
        self.path.target()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.opacity.generation()
    }
}

/// Retained state for one per-unit y-axis, keyed by unit name.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxisElement {
    pub(super) phase: ElementPhase,
    pub(super) offset_x: Tween,
    pub(super) opacity: Tween,
    pub(super) tick_values: Vec<f64>,
    /// One stroke per series sharing this axis, shown when several axes
    /// compete for the reader's attention.
    pub(super) color_key: Vec<Color>,
    pub(super) last_seen: u64,
}

impl YAxisElement {
    #[must_use]
    pub fn phase(&self) -> ElementPhase {
        self.phase
    }

    #[must_use]
    pub fn offset_x(&self) -> f64 {
        self.offset_x.value()
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity.value()
    }

    #[must_use]
    pub fn tick_values(&self) -> &[f64] {
        &self.tick_values
    }

    #[must_use]
    pub fn color_key(&self) -> &[Color] {
        &self.color_key
    }
}

/// The single shared x-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct XAxisElement {
    pub(super) y_offset: Tween,
    pub(super) opacity: Tween,
    pub(super) tick_opacity: Tween,
    pub(super) tick_values: Vec<f64>,
}

impl XAxisElement {
    pub(super) fn new() -> Self {
        Self {
            y_offset: Tween::settled(0.0),
            opacity: Tween::settled(super::HIDDEN_OPACITY),
            tick_opacity: Tween::settled(1.0),
            tick_values: Vec::new(),
        }
    }

    #[must_use]
    pub fn y_offset(&self) -> f64 {
        self.y_offset.value()
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity.value()
    }

    #[must_use]
    pub fn tick_opacity(&self) -> f64 {
        self.tick_opacity.value()
    }

    #[must_use]
    pub fn tick_values(&self) -> &[f64] {
        &self.tick_values
    }
}

/// Placeholder shown instead of axis ticks when there is nothing to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct NoDataElement {
    pub(super) opacity: Tween,
    pub(super) message: String,
    pub(super) x: f64,
    pub(super) y: f64,
}

impl NoDataElement {
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity.value()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// One selection marker, plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightMarker {
    pub x: f64,
    pub y: f64,
    pub color: Option<Color>,
}

/// Current highlight: one vertical guide plus one marker per selected
/// series. Rebuilt on every pointer move and dropped on pointer-out or
/// re-render.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightMarks {
    pub guide_x: f64,
    pub guide_y_range: (f64, f64),
    pub markers: Vec<HighlightMarker>,
}
