use serde::{Deserialize, Serialize};

use crate::core::SelectedSeries;

/// Raw pointer position in plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PointerState {
    pub inside: bool,
    pub x: f64,
    pub y: f64,
}

/// The current nearest-point selection exposed to host applications.
///
/// Rebuilt on every pointer move or click and cleared on pointer-out; it
/// never aliases the input series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SelectionState {
    pub target_x: Option<f64>,
    pub selected: Vec<SelectedSeries>,
}

impl SelectionState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Pointer, hover and selection state shared by the engine's event handlers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pointer: PointerState,
    selection: SelectionState,
    hovered_series: Option<String>,
}

impl InteractionState {
    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn hovered_series(&self) -> Option<&str> {
        self.hovered_series.as_deref()
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.inside = true;
        self.pointer.x = x;
        self.pointer.y = y;
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer.inside = false;
        self.selection = SelectionState::default();
    }

    pub fn set_selection(&mut self, target_x: f64, selected: Vec<SelectedSeries>) {
        self.selection = SelectionState {
            target_x: Some(target_x),
            selected,
        };
    }

    pub fn clear_selection(&mut self) {
        self.selection = SelectionState::default();
    }

    pub fn set_hovered(&mut self, series_id: Option<String>) {
        self.hovered_series = series_id;
    }
}
