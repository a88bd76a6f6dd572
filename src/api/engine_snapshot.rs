use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;
use crate::scene::ElementPhase;

use super::ChartEngine;

/// Serializable view of the engine's retained state, for host debugging
/// tools and behavioral assertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub has_data: bool,
    pub entering: Vec<String>,
    pub updating: Vec<String>,
    pub exiting: Vec<String>,
    pub unit_keys: Vec<String>,
    pub x_domain: Option<(f64, f64)>,
    pub y_domains: IndexMap<String, (f64, f64)>,
    pub selection_target_x: Option<f64>,
    pub selected_series: Vec<String>,
}

impl EngineSnapshot {
    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidData(format!("snapshot serialization failed: {err}")))
    }
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let mut entering = Vec::new();
        let mut updating = Vec::new();
        let mut exiting = Vec::new();
        for (id, line) in self.scene.lines() {
            match line.phase() {
                ElementPhase::Entering => entering.push(id.to_owned()),
                ElementPhase::Updating => updating.push(id.to_owned()),
                ElementPhase::Exiting => exiting.push(id.to_owned()),
            }
        }

        let unit_keys = self
            .scene
            .y_axes()
            .map(|(unit, _)| unit.to_owned())
            .collect();
        let x_domain = self.scales.as_ref().map(|scales| scales.x.domain());
        let y_domains = self
            .scales
            .as_ref()
            .map(|scales| {
                scales
                    .y
                    .iter()
                    .map(|(unit, scale)| (unit.clone(), scale.domain()))
                    .collect()
            })
            .unwrap_or_default();

        let selection = self.interaction.selection();
        EngineSnapshot {
            has_data: self.scene.has_data(),
            entering,
            updating,
            exiting,
            unit_keys,
            x_domain,
            y_domains,
            selection_target_x: selection.target_x,
            selected_series: selection
                .selected
                .iter()
                .map(|selected| selected.series_id.clone())
                .collect(),
        }
    }
}
