use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlasmapError, Result};

const STROKE_COLOR: &str = "#000000";
const TEXT_COLOR: &str = "#000000";
const BACKGROUND_COLOR: &str = "#ffffff";
const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// Colours and font applied when a scene is serialized. Geometry never depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStyle {
    #[serde(default = "default_stroke")]
    pub stroke_color: String,
    #[serde(default = "default_text")]
    pub text_color: String,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

fn default_stroke() -> String {
    STROKE_COLOR.to_string()
}
fn default_text() -> String {
    TEXT_COLOR.to_string()
}
fn default_background() -> String {
    BACKGROUND_COLOR.to_string()
}
fn default_font_family() -> String {
    FONT_FAMILY.to_string()
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke(),
            text_color: default_text(),
            background_color: default_background(),
            font_family: default_font_family(),
        }
    }
}

impl MapStyle {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PlasmapError::Style(format!("TOML: {}", e)))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| PlasmapError::Style(format!("YAML: {}", e)))
    }

    /// Loads a style file, trying TOML first and then YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PlasmapError::Style(format!(
                "style file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).or_else(|_| Self::from_yaml(&content))
    }

    /// Background as an opaque RGB colour, white when it is not a `#rrggbb` value.
    pub fn background_rgb(&self) -> (u8, u8, u8) {
        parse_hex_rgb(&self.background_color).unwrap_or((255, 255, 255))
    }
}

pub fn parse_hex_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().trim_start_matches('#');
    let expand = |c: &str| u8::from_str_radix(&c.repeat(2), 16).ok();

    match hex.len() {
        6 => Some((
            u8::from_str_radix(hex.get(0..2)?, 16).ok()?,
            u8::from_str_radix(hex.get(2..4)?, 16).ok()?,
            u8::from_str_radix(hex.get(4..6)?, 16).ok()?,
        )),
        3 => Some((
            expand(hex.get(0..1)?)?,
            expand(hex.get(1..2)?)?,
            expand(hex.get(2..3)?)?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_hex_rgb, MapStyle};

    #[test]
    fn defaults_are_black_on_white() {
        let style = MapStyle::default();
        assert_eq!(style.stroke_color, "#000000");
        assert_eq!(style.background_rgb(), (255, 255, 255));
        assert_eq!(style.font_family, "Arial, Helvetica, sans-serif");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let style = MapStyle::from_toml("stroke_color = \"#336699\"\n").expect("toml style");
        assert_eq!(style.stroke_color, "#336699");
        assert_eq!(style.text_color, "#000000");
    }

    #[test]
    fn yaml_style_parses() {
        let style = MapStyle::from_yaml("background_color: '#fdf6e3'\n").expect("yaml style");
        assert_eq!(style.background_rgb(), (0xfd, 0xf6, 0xe3));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex_rgb("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_rgb("102030"), Some((16, 32, 48)));
        assert_eq!(parse_hex_rgb("white"), None);
        assert_eq!(parse_hex_rgb("#ééé"), None);
    }
}
