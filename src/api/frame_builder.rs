use crate::core::layout::{Y_AXIS_LABEL_WIDTH, Y_AXIS_WIDTH};
use crate::core::series::UNKNOWN_UNITS;
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame,
    Renderer, TextHAlign, TextPrimitive,
};

use super::ChartEngine;

/// Opacity below which an element is visually absent and emits nothing.
const VISIBILITY_FLOOR: f64 = 0.01;

const LINE_STROKE_WIDTH: f64 = 2.0;
const AXIS_STROKE_WIDTH: f64 = 1.0;
const TICK_LENGTH: f64 = 6.0;
const TICK_LABEL_GAP: f64 = 8.0;
const TICK_LABEL_SIZE: f64 = 10.0;
const AXIS_LABEL_SIZE: f64 = 11.0;
const MARKER_RADIUS: f64 = 3.0;
const COLOR_KEY_LENGTH: f64 = 30.0;

const AXIS_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);
const GRID_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.15);
const PLOT_AREA_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.03);
const DEFAULT_SERIES_COLOR: Color = Color::rgb(0.25, 0.25, 0.25);

impl<R: Renderer> ChartEngine<R> {
    /// Materializes the retained scene, at its current animation progress,
    /// into a validated backend-agnostic draw list.
    pub fn render_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.container);
        let (origin_x, origin_y) = self.scene.origin();
        let (plot_width, plot_height) = self.scene.plot_size();

        if plot_width > 0.0 && plot_height > 0.0 {
            frame.rects.push(RectPrimitive::new(
                origin_x,
                origin_y,
                plot_width,
                plot_height,
                PLOT_AREA_COLOR,
            ));
        }

        self.push_lines(&mut frame, origin_x, origin_y);
        self.push_x_axis(&mut frame, origin_x, origin_y, plot_width, plot_height);
        self.push_y_axes(&mut frame, origin_x, origin_y, plot_width, plot_height);
        self.push_no_data(&mut frame, origin_x, origin_y);
        self.push_highlight(&mut frame, origin_x, origin_y);

        frame.validate()?;
        Ok(frame)
    }

    fn push_lines(&self, frame: &mut RenderFrame, origin_x: f64, origin_y: f64) {
        for (_, line) in self.scene.lines() {
            let opacity = line.opacity().clamp(0.0, 1.0);
            if opacity <= VISIBILITY_FLOOR {
                continue;
            }
            let points: Vec<(f64, f64)> = line
                .path_points()
                .into_iter()
                .map(|(x, y)| (origin_x + x, origin_y + y))
                .collect();
            if points.len() < 2 {
                continue;
            }
            frame.polylines.push(
                PolylinePrimitive::new(
                    points,
                    LINE_STROKE_WIDTH,
                    line.color().unwrap_or(DEFAULT_SERIES_COLOR),
                )
                .with_opacity(opacity),
            );
        }
    }

    fn push_x_axis(
        &self,
        frame: &mut RenderFrame,
        origin_x: f64,
        origin_y: f64,
        plot_width: f64,
        plot_height: f64,
    ) {
        let axis = self.scene.x_axis();
        let axis_opacity = axis.opacity().clamp(0.0, 1.0);
        if axis_opacity <= VISIBILITY_FLOOR || plot_width <= 0.0 {
            return;
        }

        let baseline_y = origin_y + axis.y_offset();
        frame.lines.push(
            LinePrimitive::new(
                origin_x,
                baseline_y,
                origin_x + plot_width,
                baseline_y,
                AXIS_STROKE_WIDTH,
                AXIS_COLOR,
            )
            .with_opacity(axis_opacity),
        );

        let Some(scales) = self.scales.as_ref() else {
            return;
        };
        let tick_opacity = axis.tick_opacity().clamp(0.0, 1.0);
        if tick_opacity > VISIBILITY_FLOOR {
            for &tick in axis.tick_values() {
                let x = origin_x + scales.x.map(tick);
                frame.lines.push(
                    LinePrimitive::new(
                        x,
                        baseline_y,
                        x,
                        baseline_y + TICK_LENGTH,
                        AXIS_STROKE_WIDTH,
                        AXIS_COLOR,
                    )
                    .with_opacity(tick_opacity),
                );
                frame.texts.push(
                    TextPrimitive::new(
                        format_tick_value(tick),
                        x,
                        baseline_y + TICK_LENGTH + TICK_LABEL_GAP,
                        TICK_LABEL_SIZE,
                        AXIS_COLOR,
                        TextHAlign::Center,
                    )
                    .with_opacity(tick_opacity),
                );

                // The x grid spans the full plot height regardless of where
                // the baseline sits.
                if self.grid.x && plot_height > 0.0 {
                    frame.lines.push(
                        LinePrimitive::new(
                            x,
                            origin_y,
                            x,
                            origin_y + plot_height,
                            AXIS_STROKE_WIDTH,
                            GRID_COLOR,
                        )
                        .with_opacity(tick_opacity),
                    );
                }
            }
        }

        if let Some(label) = self.axis_label.x.as_deref() {
            if self.scene.has_data() && !label.is_empty() {
                frame.texts.push(
                    TextPrimitive::new(
                        label,
                        origin_x + plot_width / 2.0,
                        origin_y + plot_height + TICK_LENGTH + 2.0 * TICK_LABEL_GAP,
                        AXIS_LABEL_SIZE,
                        AXIS_COLOR,
                        TextHAlign::Center,
                    )
                    .with_opacity(axis_opacity),
                );
            }
        }
    }

    fn push_y_axes(
        &self,
        frame: &mut RenderFrame,
        origin_x: f64,
        origin_y: f64,
        plot_width: f64,
        plot_height: f64,
    ) {
        let Some(scales) = self.scales.as_ref() else {
            return;
        };
        if plot_height <= 0.0 {
            return;
        }

        for (index, (unit, axis)) in self.scene.y_axes().enumerate() {
            let opacity = axis.opacity().clamp(0.0, 1.0);
            if opacity <= VISIBILITY_FLOOR {
                continue;
            }
            let axis_x = origin_x + axis.offset_x();

            frame.lines.push(
                LinePrimitive::new(
                    axis_x,
                    origin_y,
                    axis_x,
                    origin_y + plot_height,
                    AXIS_STROKE_WIDTH,
                    AXIS_COLOR,
                )
                .with_opacity(opacity),
            );

            let Some(scale) = scales.y_for_unit(unit) else {
                continue;
            };
            for &tick in axis.tick_values() {
                let y = origin_y + scale.map(tick);
                frame.lines.push(
                    LinePrimitive::new(
                        axis_x - TICK_LENGTH,
                        y,
                        axis_x,
                        y,
                        AXIS_STROKE_WIDTH,
                        AXIS_COLOR,
                    )
                    .with_opacity(opacity),
                );
                frame.texts.push(
                    TextPrimitive::new(
                        format_tick_value(tick),
                        axis_x - TICK_LENGTH - 2.0,
                        y,
                        TICK_LABEL_SIZE,
                        AXIS_COLOR,
                        TextHAlign::Right,
                    )
                    .with_opacity(opacity),
                );

                // Horizontal grid only for the primary axis; one set of
                // rulings is plenty when several axes compete.
                if self.grid.y && index == 0 && plot_width > 0.0 {
                    frame.lines.push(
                        LinePrimitive::new(
                            origin_x,
                            y,
                            origin_x + plot_width,
                            y,
                            AXIS_STROKE_WIDTH,
                            GRID_COLOR,
                        )
                        .with_opacity(opacity),
                    );
                }
            }

            for (key_index, color) in axis.color_key().iter().enumerate() {
                let y = origin_y - 1.0 - key_index as f64 * 4.0;
                frame.lines.push(
                    LinePrimitive::new(
                        axis_x - COLOR_KEY_LENGTH,
                        y,
                        axis_x,
                        y,
                        AXIS_STROKE_WIDTH,
                        *color,
                    )
                    .with_opacity(opacity),
                );
            }

            if unit != UNKNOWN_UNITS {
                frame.texts.push(
                    TextPrimitive::new(
                        unit,
                        axis_x - (Y_AXIS_WIDTH - Y_AXIS_LABEL_WIDTH),
                        origin_y + TICK_LABEL_GAP,
                        TICK_LABEL_SIZE,
                        AXIS_COLOR,
                        TextHAlign::Left,
                    )
                    .with_opacity(opacity),
                );
            }
        }
    }

    fn push_no_data(&self, frame: &mut RenderFrame, origin_x: f64, origin_y: f64) {
        let no_data = self.scene.no_data();
        let opacity = no_data.opacity().clamp(0.0, 1.0);
        if opacity <= VISIBILITY_FLOOR {
            return;
        }
        let (x, y) = no_data.position();
        frame.texts.push(
            TextPrimitive::new(
                no_data.message(),
                origin_x + x,
                origin_y + y,
                AXIS_LABEL_SIZE,
                AXIS_COLOR,
                TextHAlign::Center,
            )
            .with_opacity(opacity),
        );
    }

    fn push_highlight(&self, frame: &mut RenderFrame, origin_x: f64, origin_y: f64) {
        let Some(marks) = self.scene.highlight() else {
            return;
        };

        let guide_x = origin_x + marks.guide_x;
        let (y_start, y_end) = marks.guide_y_range;
        frame.lines.push(LinePrimitive::new(
            guide_x,
            origin_y + y_start,
            guide_x,
            origin_y + y_end,
            AXIS_STROKE_WIDTH,
            AXIS_COLOR,
        ));

        for marker in &marks.markers {
            frame.circles.push(CirclePrimitive::new(
                origin_x + marker.x,
                origin_y + marker.y,
                MARKER_RADIUS,
                marker.color.unwrap_or(DEFAULT_SERIES_COLOR),
            ));
        }
    }
}

/// Axis label for a tick value, with float noise rounded away.
fn format_tick_value(value: f64) -> String {
    let rounded = (value * 1e9).round() / 1e9;
    format!("{rounded}")
}
