use tracing::debug;

use crate::core::find_selected_series;
use crate::extensions::PlotBounds;
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Pointer moved over the plot area, in plot-local pixel coordinates.
    ///
    /// Inverts the x coordinate through the cached x scale, reruns the
    /// nearest-point selection, redraws the highlight marks and hands the
    /// selection to the tooltip presenter.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.interaction.on_pointer_move(x, y);
        self.select_at_pixel(x);
    }

    pub fn pointer_entered(&mut self, x: f64, y: f64) {
        self.pointer_moved(x, y);
    }

    pub fn pointer_clicked(&mut self, x: f64, y: f64) {
        self.pointer_moved(x, y);
    }

    /// Pointer left the plot: clear marks, drop the selection, hide the
    /// tooltip.
    pub fn pointer_left(&mut self) {
        self.interaction.on_pointer_leave();
        self.scene.clear_highlight();
        if self.tooltip_enabled {
            self.tooltip_presenter.hide();
        }
    }

    /// One series is hovered; the others fade back.
    pub fn hover_series(&mut self, series_id: &str) {
        if self.scene.line(series_id).is_none() {
            return;
        }
        self.interaction.set_hovered(Some(series_id.to_owned()));
        let duration = self.transition_duration_ms;
        self.scene.fade_others(series_id, duration);
    }

    pub fn hover_clear(&mut self) {
        self.interaction.set_hovered(None);
        self.scene.clear_fade(self.transition_duration_ms);
    }

    /// Plot-area rectangle in container coordinates, as handed to the
    /// tooltip presenter.
    #[must_use]
    pub fn plot_bounds(&self) -> PlotBounds {
        let (x, y) = self.scene.origin();
        let (width, height) = self.scene.plot_size();
        PlotBounds {
            x,
            y,
            width,
            height,
        }
    }

    fn select_at_pixel(&mut self, pixel_x: f64) {
        if !self.scene.has_data() {
            debug!("pointer event without data; ignoring");
            return;
        }
        let Some(scales) = self.scales.as_ref() else {
            return;
        };

        let target_x = scales.x.invert(pixel_x);
        let selection = find_selected_series(&self.hit_data, target_x);
        self.scene.set_highlight(&selection, scales);
        if self.tooltip_enabled && !selection.is_empty() {
            let bounds = self.plot_bounds();
            self.tooltip_presenter.show(&selection, bounds);
        }
        self.interaction.set_selection(target_x, selection);
    }

    /// Runs the pointer selection path non-interactively for a state-driven
    /// highlight. No tooltip is raised; the marks simply persist.
    pub(super) fn apply_highlight_x(&mut self, highlight_x: f64) {
        if !self.scene.has_data() {
            return;
        }
        let Some(scales) = self.scales.as_ref() else {
            return;
        };
        let selection = find_selected_series(&self.hit_data, highlight_x);
        self.scene.set_highlight(&selection, scales);
        self.interaction.set_selection(highlight_x, selection);
    }
}
