use serde::{Deserialize, Serialize};

use crate::core::SelectedSeries;

/// Host-side tooltip configuration. Its presence on the chart state enables
/// the pointer → tooltip hand-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TooltipSettings {
    /// Identifier the host uses to locate its tooltip surface.
    pub id: Option<String>,
}

/// Plot-area rectangle in container coordinates, handed to the presenter so
/// it can position itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Receives the current selection whenever it changes.
///
/// Markup composition and screen placement happen behind this seam; the
/// engine only supplies the selection and the plot bounds.
pub trait TooltipPresenter {
    fn show(&mut self, selection: &[SelectedSeries], bounds: PlotBounds);
    fn hide(&mut self);
}

/// Presenter that ignores every request; the headless default.
#[derive(Debug, Default)]
pub struct NoopTooltip;

impl TooltipPresenter for NoopTooltip {
    fn show(&mut self, _selection: &[SelectedSeries], _bounds: PlotBounds) {}

    fn hide(&mut self) {}
}
