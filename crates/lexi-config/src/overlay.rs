use serde::{Deserialize, Serialize};

fn default_padding() -> f64 {
    8.0
}

fn default_edge_padding() -> f64 {
    16.0
}

fn default_click_outside_delay_ms() -> u64 {
    100
}

fn default_tooltip_size() -> (f64, f64) {
    (250.0, 120.0)
}

fn default_toolbar_size() -> (f64, f64) {
    (300.0, 60.0)
}

fn default_card_size() -> (f64, f64) {
    (500.0, 400.0)
}

fn default_modal_size() -> (f64, f64) {
    (600.0, 400.0)
}

fn default_min_size() -> (f64, f64) {
    (280.0, 160.0)
}

fn default_animation_fast_ms() -> u64 {
    200
}

fn default_animation_normal_ms() -> u64 {
    300
}

fn default_tooltip_show_delay_ms() -> u64 {
    500
}

fn default_tooltip_hide_delay_ms() -> u64 {
    300
}

/// Geometry and timing of transient surfaces. Sizes are `(width, height)` in css px.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OverlayConfig {
    /// Gap between a surface and its anchor
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Distance kept from the viewport edge when clamping
    #[serde(default = "default_edge_padding")]
    pub edge_padding: f64,
    #[serde(default = "default_click_outside_delay_ms")]
    pub click_outside_delay_ms: u64,
    #[serde(default = "default_tooltip_size")]
    pub tooltip_size: (f64, f64),
    #[serde(default = "default_toolbar_size")]
    pub toolbar_size: (f64, f64),
    #[serde(default = "default_card_size")]
    pub card_size: (f64, f64),
    #[serde(default = "default_modal_size")]
    pub modal_size: (f64, f64),
    /// Lower bound for resizable surfaces
    #[serde(default = "default_min_size")]
    pub min_size: (f64, f64),
    #[serde(default = "default_animation_fast_ms")]
    pub animation_fast_ms: u64,
    #[serde(default = "default_animation_normal_ms")]
    pub animation_normal_ms: u64,
    #[serde(default = "default_tooltip_show_delay_ms")]
    pub tooltip_show_delay_ms: u64,
    #[serde(default = "default_tooltip_hide_delay_ms")]
    pub tooltip_hide_delay_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            edge_padding: default_edge_padding(),
            click_outside_delay_ms: default_click_outside_delay_ms(),
            tooltip_size: default_tooltip_size(),
            toolbar_size: default_toolbar_size(),
            card_size: default_card_size(),
            modal_size: default_modal_size(),
            min_size: default_min_size(),
            animation_fast_ms: default_animation_fast_ms(),
            animation_normal_ms: default_animation_normal_ms(),
            tooltip_show_delay_ms: default_tooltip_show_delay_ms(),
            tooltip_hide_delay_ms: default_tooltip_hide_delay_ms(),
        }
    }
}
