use serde::{Deserialize, Serialize};

/// Height reserved for a title strip that does not request its own, in
/// pixels.
pub const DEFAULT_TITLE_HEIGHT: f64 = 30.0;

/// Heading strip reserved above the plot.
///
/// Text composition and styling are the host's job; the engine only offsets
/// the plot by the reserved height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TitleSettings {
    pub text: Option<String>,
    pub height: Option<f64>,
}

impl TitleSettings {
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn reserved_height(&self) -> f64 {
        self.height.unwrap_or(DEFAULT_TITLE_HEIGHT)
    }
}

/// Vertical space to reserve above the plot; zero without title settings.
#[must_use]
pub fn title_height(settings: Option<&TitleSettings>) -> f64 {
    settings.map(TitleSettings::reserved_height).unwrap_or(0.0)
}
