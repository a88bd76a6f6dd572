mod engine_snapshot;
mod frame_builder;
mod pointer;

pub use engine_snapshot::EngineSnapshot;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::layout::DEFAULT_X_AXIS_HEIGHT;
use crate::core::{
    ContainerSize, DomainOverride, Layout, Margin, ScaleSet, Series, distinct_unit_keys,
};
use crate::error::ChartResult;
use crate::extensions::{NoopTooltip, TitleSettings, TooltipPresenter, TooltipSettings, title_height};
use crate::interaction::InteractionState;
use crate::render::Renderer;
use crate::scene::{DEFAULT_NO_DATA_MESSAGE, ReconcileDiff, ReconcileInputs, Scene};

/// Transition length used when the state does not specify one.
pub const DEFAULT_TRANSITION_MS: f64 = 1000.0;

/// Grid line toggles per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GridOptions {
    pub x: bool,
    pub y: bool,
}

/// Labels drawn along the axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisLabels {
    pub x: Option<String>,
    pub y: Option<String>,
}

/// Caller-owned description of one render.
///
/// The engine treats each state as an immutable snapshot; between calls it
/// retains only the scene, the scale/layout caches and the series copy used
/// for pointer hit-testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartState {
    pub container: ContainerSize,
    pub margin: Option<Margin>,
    pub title: Option<TitleSettings>,
    pub domain: Option<DomainOverride>,
    /// `None` leaves the scene untouched on update.
    pub data: Option<Vec<Series>>,
    pub axis_label: Option<AxisLabels>,
    pub grid: Option<GridOptions>,
    /// Minified rendering: a single axis strip, endpoint-only y ticks, the
    /// x-axis pinned to the bottom.
    pub mini: bool,
    pub x_axis_height: Option<f64>,
    pub transition_duration_ms: Option<f64>,
    /// Forces a highlight at this x position, overriding the pointer.
    pub highlight_x: Option<f64>,
    pub tooltip: Option<TooltipSettings>,
}

impl ChartState {
    #[must_use]
    pub fn new(container: ContainerSize) -> Self {
        Self {
            container,
            margin: None,
            title: None,
            domain: None,
            data: None,
            axis_label: None,
            grid: None,
            mini: false,
            x_axis_height: None,
            transition_duration_ms: None,
            highlight_x: None,
            tooltip: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<Series>) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: DomainOverride) -> Self {
        self.domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_transition_duration(mut self, duration_ms: f64) -> Self {
        self.transition_duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn with_highlight_x(mut self, x: f64) -> Self {
        self.highlight_x = Some(x);
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipSettings) -> Self {
        self.tooltip = Some(tooltip);
        self
    }
}

/// The chart engine: retained scene, scale caches and interaction state
/// behind a render-backend seam.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    scene: Scene,
    interaction: InteractionState,
    tooltip_presenter: Box<dyn TooltipPresenter>,
    tooltip_enabled: bool,
    container: ContainerSize,
    // Caches for pointer hit-testing and the next incremental update.
    hit_data: Vec<Series>,
    layout: Option<Layout>,
    scales: Option<ScaleSet>,
    grid: GridOptions,
    axis_label: AxisLabels,
    transition_duration_ms: f64,
}

impl<R: Renderer> ChartEngine<R> {
    /// Initializes the persistent scene and performs the first render.
    pub fn create(renderer: R, state: &ChartState) -> ChartResult<Self> {
        Self::create_with_tooltip(renderer, state, Box::new(NoopTooltip))
    }

    /// [`Self::create`] with a host tooltip presenter attached.
    pub fn create_with_tooltip(
        renderer: R,
        state: &ChartState,
        tooltip_presenter: Box<dyn TooltipPresenter>,
    ) -> ChartResult<Self> {
        let container = state.container.validate()?;
        let mut engine = Self {
            renderer,
            scene: Scene::new(DEFAULT_NO_DATA_MESSAGE),
            interaction: InteractionState::default(),
            tooltip_presenter,
            tooltip_enabled: false,
            container,
            hit_data: Vec::new(),
            layout: None,
            scales: None,
            grid: GridOptions::default(),
            axis_label: AxisLabels::default(),
            transition_duration_ms: DEFAULT_TRANSITION_MS,
        };
        engine.update(state)?;
        Ok(engine)
    }

    /// Re-renders against new state with keyed enter/update/exit rules.
    ///
    /// A state without data leaves the scene in its last valid shape and
    /// reports an empty diff.
    pub fn update(&mut self, state: &ChartState) -> ChartResult<ReconcileDiff> {
        let Some(data) = state.data.as_deref() else {
            debug!("update without data; scene keeps its last valid state");
            return Ok(ReconcileDiff::default());
        };

        let container = state.container.validate()?;
        let margin = state.margin.unwrap_or_default();
        let title_height_px = title_height(state.title.as_ref());
        let x_axis_height = state.x_axis_height.unwrap_or(DEFAULT_X_AXIS_HEIGHT);
        let unit_count = if state.mini {
            1
        } else {
            distinct_unit_keys(data).len()
        };
        let layout =
            Layout::calculate(container, margin, title_height_px, x_axis_height, unit_count);
        let scales = ScaleSet::calculate(&layout, state.domain.as_ref(), data);
        let duration = state
            .transition_duration_ms
            .unwrap_or(DEFAULT_TRANSITION_MS);

        let diff = self.scene.reconcile(&ReconcileInputs {
            data,
            layout,
            scales: scales.as_ref(),
            margin,
            title_height: title_height_px,
            mini: state.mini,
            duration_ms: duration,
        });

        // Whatever the pointer had selected referenced the previous data.
        self.interaction.clear_selection();
        if self.tooltip_enabled {
            self.tooltip_presenter.hide();
        }

        self.container = container;
        self.hit_data = data.to_vec();
        self.layout = Some(layout);
        self.scales = scales;
        self.grid = state.grid.unwrap_or_default();
        self.axis_label = state.axis_label.clone().unwrap_or_default();
        self.transition_duration_ms = duration;
        self.tooltip_enabled = state.tooltip.is_some();

        if let Some(highlight_x) = state.highlight_x {
            self.apply_highlight_x(highlight_x);
        }

        debug!(
            entered = diff.entered.len(),
            updated = diff.updated.len(),
            exited = diff.exited.len(),
            has_data = diff.has_data,
            "scene reconciled"
        );
        Ok(diff)
    }

    /// Releases collaborator resources. The engine itself holds nothing
    /// beyond its own allocations.
    pub fn destroy(&mut self) {
        self.tooltip_presenter.hide();
        self.tooltip_enabled = false;
    }

    /// Steps active transitions by `delta_ms` of wall-clock time.
    pub fn advance(&mut self, delta_ms: f64) {
        self.scene.advance(delta_ms);
    }

    /// Materializes and hands the current frame to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.render_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn scales(&self) -> Option<&ScaleSet> {
        self.scales.as_ref()
    }

    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    #[must_use]
    pub fn transition_duration_ms(&self) -> f64 {
        self.transition_duration_ms
    }
}
