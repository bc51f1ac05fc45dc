use std::fs;

use image::Rgba;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::habits::HabitCategory;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub physical: String,
    pub intellectual: String,
    pub spiritual: String,
    pub highlight: String,
    pub divider: String,
}

impl Theme {
    /// Load a named theme from the user themes dir, if present.
    pub fn load(name: &str) -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let path = config_dir
            .join("daily3")
            .join("themes")
            .join(format!("{name}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        toml::from_str::<Theme>(&content).ok()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            text_primary: "#1A1A1A".to_string(),
            text_secondary: "#8E8E93".to_string(),
            physical: "#34C759".to_string(),
            intellectual: "#FFCC00".to_string(),
            spiritual: "#AF52DE".to_string(),
            highlight: "#E5E5EA".to_string(),
            divider: "#C6C6C8".to_string(),
        }
    }
}

impl ThemeColors {
    fn parse_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return (r, g, b);
            }
        }
        (255, 255, 255)
    }

    pub fn parse_color(hex: &str) -> Rgba<u8> {
        let (r, g, b) = Self::parse_rgb(hex);
        Rgba([r, g, b, 255])
    }

    pub fn parse_terminal_color(hex: &str) -> Color {
        let (r, g, b) = Self::parse_rgb(hex);
        Color::Rgb(r, g, b)
    }

    pub fn background(&self) -> Rgba<u8> {
        Self::parse_color(&self.background)
    }
    pub fn text_primary(&self) -> Rgba<u8> {
        Self::parse_color(&self.text_primary)
    }
    pub fn text_secondary(&self) -> Rgba<u8> {
        Self::parse_color(&self.text_secondary)
    }
    pub fn highlight(&self) -> Rgba<u8> {
        Self::parse_color(&self.highlight)
    }
    pub fn divider(&self) -> Rgba<u8> {
        Self::parse_color(&self.divider)
    }

    pub fn habit(&self, category: HabitCategory) -> Rgba<u8> {
        Self::parse_color(self.habit_hex(category))
    }

    pub fn habit_terminal(&self, category: HabitCategory) -> Color {
        Self::parse_terminal_color(self.habit_hex(category))
    }

    fn habit_hex(&self, category: HabitCategory) -> &str {
        match category {
            HabitCategory::Physical => &self.physical,
            HabitCategory::Intellectual => &self.intellectual,
            HabitCategory::Spiritual => &self.spiritual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_valid_hex() {
        assert_eq!(ThemeColors::parse_color("#34C759"), Rgba([52, 199, 89, 255]));
        assert_eq!(ThemeColors::parse_color("1A1A1A"), Rgba([26, 26, 26, 255]));
    }

    #[test]
    fn test_parse_color_invalid_falls_back_to_white() {
        assert_eq!(ThemeColors::parse_color("#GGGGGG"), Rgba([255, 255, 255, 255]));
        assert_eq!(ThemeColors::parse_color("#FFF"), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_habit_colors_follow_category() {
        let colors = ThemeColors::default();
        assert_eq!(colors.habit(HabitCategory::Physical), Rgba([0x34, 0xC7, 0x59, 255]));
        assert_eq!(colors.habit(HabitCategory::Intellectual), Rgba([0xFF, 0xCC, 0x00, 255]));
        assert_eq!(colors.habit(HabitCategory::Spiritual), Rgba([0xAF, 0x52, 0xDE, 255]));
    }

    #[test]
    fn test_theme_toml_round_trip() {
        let theme = Theme::default();
        let serialized = toml::to_string_pretty(&theme).unwrap();
        let back: Theme = toml::from_str(&serialized).unwrap();
        assert_eq!(theme.colors.physical, back.colors.physical);
        assert_eq!(theme.colors.background, back.colors.background);
    }
}
