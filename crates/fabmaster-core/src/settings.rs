use serde::{Deserialize, Serialize};

/// Board-wide conversion and height settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Board units to metres.
    pub scale_rate: f64,
    pub board_height: f64,
    pub pad_height: f64,
    pub default_component_height: f64,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            scale_rate: 0.0254 / 1000.0, // mils
            board_height: 0.002,
            pad_height: 0.001,
            default_component_height: 0.001,
        }
    }
}

impl BoardSettings {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
