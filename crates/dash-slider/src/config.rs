//! Slider options
//!
//! User options are a partial record (`SliderOptions`) overlaid field by field
//! on built-in defaults to produce `ResolvedOptions`. Options can be read from
//! YAML in the user's config directory.
//! Default location: ~/.config/dash-slider/options.yaml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Colour applied to the active window while the value is at or below `limit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBand {
    pub limit: f64,
    pub color: String,
}

impl ColorBand {
    pub fn new(limit: f64, color: impl Into<String>) -> Self {
        Self {
            limit,
            color: color.into(),
        }
    }
}

/// Partial options supplied by the host
///
/// Every field is optional; unset fields fall back to `ResolvedOptions::default()`.
/// Colours are opaque strings handed to the rendering backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderOptions {
    /// CSS-like width: "100%" fills, "320px" is fixed
    pub width: Option<String>,
    pub grid_height: Option<f32>,
    /// Number of dashes grouped into one labelled segment
    pub step: Option<usize>,
    pub grid_color: Option<String>,
    pub grid_border_radius: Option<f32>,
    pub grid_padding: Option<f32>,
    pub dash_border_radius: Option<f32>,
    pub dash_color: Option<String>,
    pub dash_width: Option<f32>,
    pub dash_height: Option<f32>,
    pub dash_mark_color: Option<String>,
    pub dash_mark_selected_color: Option<String>,
    pub dash_mark_font: Option<String>,
    pub dash_mark_font_size: Option<f32>,
    pub dash_mark_font_weight: Option<u16>,
    pub dash_mark_padding: Option<f32>,
    pub bar_color: Option<String>,
    pub bar_width: Option<f32>,
    pub bar_height: Option<f32>,
    pub bar_border_radius: Option<f32>,
    /// Replaces the default bands wholesale when set
    pub indicator_colors: Option<Vec<ColorBand>>,
}

/// Fully populated options for one render cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOptions {
    pub width: String,
    pub grid_height: f32,
    pub step: usize,
    pub grid_color: String,
    pub grid_border_radius: f32,
    pub grid_padding: f32,
    pub dash_border_radius: f32,
    pub dash_color: String,
    pub dash_width: f32,
    pub dash_height: f32,
    pub dash_mark_color: String,
    pub dash_mark_selected_color: String,
    pub dash_mark_font: String,
    pub dash_mark_font_size: f32,
    pub dash_mark_font_weight: u16,
    pub dash_mark_padding: f32,
    pub bar_color: String,
    pub bar_width: f32,
    pub bar_height: f32,
    pub bar_border_radius: f32,
    pub indicator_colors: Vec<ColorBand>,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            width: "100%".to_string(),
            grid_height: 39.0,
            step: 4,
            grid_color: "#E3EEF6".to_string(),
            grid_border_radius: 4.0,
            grid_padding: 8.0,
            dash_border_radius: 50.0,
            dash_color: "#CBDFEA".to_string(),
            dash_width: 3.0,
            dash_height: 21.0,
            dash_mark_color: "#7D9EB5".to_string(),
            dash_mark_selected_color: "#223345".to_string(),
            dash_mark_font: "sans-serif".to_string(),
            dash_mark_font_size: 10.0,
            dash_mark_font_weight: 600,
            dash_mark_padding: 8.0,
            bar_color: "#BAC7D0".to_string(),
            bar_width: 30.0,
            bar_height: 58.0,
            bar_border_radius: 4.0,
            indicator_colors: vec![ColorBand::new(12.0, "red"), ColorBand::new(20.0, "yellow")],
        }
    }
}

impl ResolvedOptions {
    /// Overlay user options on the defaults (shallow, field by field)
    pub fn resolve(user: &SliderOptions) -> Self {
        let d = Self::default();
        Self {
            width: user.width.clone().unwrap_or(d.width),
            grid_height: user.grid_height.unwrap_or(d.grid_height),
            step: user.step.unwrap_or(d.step),
            grid_color: user.grid_color.clone().unwrap_or(d.grid_color),
            grid_border_radius: user.grid_border_radius.unwrap_or(d.grid_border_radius),
            grid_padding: user.grid_padding.unwrap_or(d.grid_padding),
            dash_border_radius: user.dash_border_radius.unwrap_or(d.dash_border_radius),
            dash_color: user.dash_color.clone().unwrap_or(d.dash_color),
            dash_width: user.dash_width.unwrap_or(d.dash_width),
            dash_height: user.dash_height.unwrap_or(d.dash_height),
            dash_mark_color: user.dash_mark_color.clone().unwrap_or(d.dash_mark_color),
            dash_mark_selected_color: user
                .dash_mark_selected_color
                .clone()
                .unwrap_or(d.dash_mark_selected_color),
            dash_mark_font: user.dash_mark_font.clone().unwrap_or(d.dash_mark_font),
            dash_mark_font_size: user.dash_mark_font_size.unwrap_or(d.dash_mark_font_size),
            dash_mark_font_weight: user.dash_mark_font_weight.unwrap_or(d.dash_mark_font_weight),
            dash_mark_padding: user.dash_mark_padding.unwrap_or(d.dash_mark_padding),
            bar_color: user.bar_color.clone().unwrap_or(d.bar_color),
            bar_width: user.bar_width.unwrap_or(d.bar_width),
            bar_height: user.bar_height.unwrap_or(d.bar_height),
            bar_border_radius: user.bar_border_radius.unwrap_or(d.bar_border_radius),
            indicator_colors: user.indicator_colors.clone().unwrap_or(d.indicator_colors),
        }
    }

    /// Step size used in arithmetic (0 behaves as 1)
    pub fn effective_step(&self) -> usize {
        self.step.max(1)
    }

    /// Parse the width string
    pub fn track_width(&self) -> TrackWidth {
        TrackWidth::parse(&self.width)
    }
}

/// Horizontal sizing of the slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackWidth {
    /// Fill the given fraction (0.0 - 1.0) of the available width
    Fill(f32),
    /// Fixed width in pixels
    Fixed(f32),
}

impl TrackWidth {
    /// Parse "N%", "Npx" or a bare number of pixels
    ///
    /// Unparseable strings fall back to filling the available width.
    pub fn parse(width: &str) -> Self {
        let width = width.trim();
        if let Some(percent) = width.strip_suffix('%') {
            if let Ok(p) = percent.trim().parse::<f32>() {
                return TrackWidth::Fill((p / 100.0).max(0.0));
            }
        } else {
            let px = width.strip_suffix("px").unwrap_or(width);
            if let Ok(px) = px.trim().parse::<f32>() {
                return TrackWidth::Fixed(px.max(0.0));
            }
        }
        log::warn!("Invalid slider width '{}', filling available width", width);
        TrackWidth::Fill(1.0)
    }
}

/// Get the default options file path
///
/// Returns: ~/.config/dash-slider/options.yaml
pub fn default_options_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("dash-slider")
        .join("options.yaml")
}

/// Load slider options from a YAML file
///
/// If the file doesn't exist, returns empty options (all defaults).
/// If the file exists but is invalid, logs a warning and returns empty options.
pub fn load_options(path: &Path) -> SliderOptions {
    log::info!("load_options: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_options: Options file doesn't exist, using defaults");
        return SliderOptions::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<SliderOptions>(&contents) {
            Ok(options) => {
                log::info!(
                    "load_options: Loaded options - step: {:?}, width: {:?}, bands: {:?}",
                    options.step,
                    options.width,
                    options.indicator_colors.as_ref().map(Vec::len)
                );
                options
            }
            Err(e) => {
                log::warn!("load_options: Failed to parse options: {}, using defaults", e);
                SliderOptions::default()
            }
        },
        Err(e) => {
            log::warn!("load_options: Failed to read options file: {}, using defaults", e);
            SliderOptions::default()
        }
    }
}
