use serde::{Deserialize, Serialize};

use crate::core::types::{ContainerSize, Margin};

/// Fixed width reserved for each y-axis, in pixels.
pub const Y_AXIS_WIDTH: f64 = 45.0;

/// Width of the rotated units label inside a y-axis strip, in pixels.
pub const Y_AXIS_LABEL_WIDTH: f64 = 21.0;

/// Height reserved for the x-axis band below the plot, in pixels.
pub const DEFAULT_X_AXIS_HEIGHT: f64 = 30.0;

/// Pixel geometry of the plot area, recomputed every render and never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Width of the plot area.
    pub width: f64,
    /// Height of the chart below the title, including the x-axis band.
    pub height: f64,
    /// Height of the plot area proper.
    pub plot_height: f64,
    /// Total width consumed by y-axes on the left.
    pub y_axes_width: f64,
}

impl Layout {
    /// Pure geometry from container size, margins, title reserve and axis
    /// count. Undersized containers degrade to zero-sized areas, never
    /// negative ones.
    ///
    /// Mini charts pass `unit_count = 1` regardless of how many units the
    /// data carries.
    #[must_use]
    pub fn calculate(
        container: ContainerSize,
        margin: Margin,
        title_height: f64,
        x_axis_height: f64,
        unit_count: usize,
    ) -> Self {
        let y_axes_width = unit_count as f64 * Y_AXIS_WIDTH;
        let width = (container.width - margin.left - margin.right - y_axes_width).max(0.0);
        let height = (container.height - margin.top - margin.bottom - title_height).max(0.0);
        let plot_height = (height - x_axis_height).max(0.0);

        Self {
            width,
            height,
            plot_height,
            y_axes_width,
        }
    }
}
