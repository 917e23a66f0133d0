//! Theme catalog - the fixed set of visual themes a page can reference.
//!
//! The catalog is read-only at runtime. It is seeded out-of-band as
//! `<data>/themes.json`; when that file is absent the built-in seed below
//! is used in memory and never written back.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::engine::error::EngineError;

/// Theme ids rendered with dark backgrounds. Light/dark contrast decisions
/// branch on membership here, never on a theme field. A new dark theme must
/// be added to this list.
pub const DARK_THEME_IDS: &[&str] = &[
    "luxury-oud",
    "sensual-night",
    "dark-masculine",
    "modern-luxury",
    "oriental-gold",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Rounded,
    Pill,
    Sharp,
}

impl ButtonStyle {
    /// CSS border-radius for the shared `.btn-primary` rule.
    pub fn border_radius(&self) -> &'static str {
        match self {
            ButtonStyle::Pill => "50px",
            ButtonStyle::Sharp => "0",
            ButtonStyle::Rounded => "8px",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub text_dark: String,
    pub background: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub mood: Vec<String>,
    /// Heading font family (Google Fonts name).
    pub font: String,
    /// Body font family.
    pub font_body: String,
    pub colors: ThemeColors,
    pub button_style: ButtonStyle,
}

/// Whether a theme id is on the dark allow-list.
pub fn is_dark(theme_id: &str) -> bool {
    DARK_THEME_IDS.contains(&theme_id)
}

/// On-disk shape of the seeded catalog file.
#[derive(Debug, Serialize, Deserialize)]
struct ThemesFile {
    themes: Vec<Theme>,
}

/// The immutable theme catalog, in seed-file insertion order.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Load the catalog from `themes.json` if it exists, otherwise fall back
    /// to the built-in seed. The file is never created or rewritten here.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            let file: ThemesFile = serde_json::from_str(&raw)?;
            tracing::info!("Loaded {} themes from {}", file.themes.len(), path.display());
            Ok(Self {
                themes: file.themes,
            })
        } else {
            tracing::info!(
                "Theme catalog {} not found, using built-in seed",
                path.display()
            );
            Ok(Self::builtin())
        }
    }

    pub fn builtin() -> Self {
        Self {
            themes: builtin_themes(),
        }
    }

    /// All themes, insertion order.
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn get(&self, id: &str) -> Result<&Theme, EngineError> {
        self.themes
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::ThemeNotFound(id.to_string()))
    }
}

fn theme(
    id: &str,
    name: &str,
    mood: &[&str],
    font: &str,
    font_body: &str,
    colors: [&str; 6],
    button_style: ButtonStyle,
) -> Theme {
    Theme {
        id: id.to_string(),
        name: name.to_string(),
        mood: mood.iter().map(|m| m.to_string()).collect(),
        font: font.to_string(),
        font_body: font_body.to_string(),
        colors: ThemeColors {
            primary: colors[0].to_string(),
            secondary: colors[1].to_string(),
            accent: colors[2].to_string(),
            text: colors[3].to_string(),
            text_dark: colors[4].to_string(),
            background: colors[5].to_string(),
        },
        button_style,
    }
}

fn builtin_themes() -> Vec<Theme> {
    vec![
        theme(
            "modern-luxury",
            "Modern Luxury",
            &["modern", "luxury", "minimal", "elegant"],
            "Montserrat",
            "Open Sans",
            [
                "#0a0a0a", "#1f1f1f", "#d4af37", "#f5f5f5", "#1a1a1a", "#141414",
            ],
            ButtonStyle::Sharp,
        ),
        theme(
            "luxury-oud",
            "Luxury Oud",
            &["luxury", "oud", "rich", "warm"],
            "Playfair Display",
            "Lato",
            [
                "#2b1d12", "#4a3421", "#c9a227", "#f3ead7", "#241708", "#1c130a",
            ],
            ButtonStyle::Pill,
        ),
        theme(
            "sensual-night",
            "Sensual Night",
            &["sensual", "night", "mysterious", "romantic"],
            "Cormorant Garamond",
            "Montserrat",
            [
                "#1a1025", "#2e1a3f", "#b76e9b", "#f0e6f6", "#1f1428", "#140c1d",
            ],
            ButtonStyle::Rounded,
        ),
        theme(
            "dark-masculine",
            "Dark Masculine",
            &["masculine", "bold", "strong", "intense"],
            "Oswald",
            "Roboto",
            [
                "#0d1117", "#1b2330", "#8ea7c2", "#e6edf3", "#0d1117", "#10161f",
            ],
            ButtonStyle::Sharp,
        ),
        theme(
            "oriental-gold",
            "Oriental Gold",
            &["oriental", "exotic", "spicy", "gold"],
            "Marcellus",
            "Nunito Sans",
            [
                "#3b1f0e", "#5a2e14", "#e0b341", "#f8ecd4", "#2c1708", "#2a1507",
            ],
            ButtonStyle::Pill,
        ),
        theme(
            "fresh-breeze",
            "Fresh Breeze",
            &["fresh", "clean", "citrus", "light"],
            "Poppins",
            "Inter",
            [
                "#0f766e", "#14b8a6", "#0d9488", "#1f2937", "#042f2e", "#f0fdfa",
            ],
            ButtonStyle::Pill,
        ),
        theme(
            "floral-romance",
            "Floral Romance",
            &["floral", "romantic", "feminine", "soft"],
            "Cormorant",
            "Lora",
            [
                "#9d5c78", "#c48aa5", "#d96c8e", "#3f2a33", "#2a1b22", "#fdf2f6",
            ],
            ButtonStyle::Rounded,
        ),
        theme(
            "minimal-white",
            "Minimal White",
            &["minimal", "clean", "simple", "pure"],
            "Raleway",
            "Source Sans 3",
            [
                "#2d2d2d", "#595959", "#333333", "#333333", "#111111", "#ffffff",
            ],
            ButtonStyle::Sharp,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_allow_list_matches_builtin_catalog() {
        let catalog = ThemeCatalog::builtin();
        for id in DARK_THEME_IDS {
            assert!(catalog.get(id).is_ok(), "dark theme {} must exist", id);
            assert!(is_dark(id));
        }
        assert!(!is_dark("fresh-breeze"));
        assert!(!is_dark("minimal-white"));
    }

    #[test]
    fn test_get_unknown_theme_is_not_found() {
        let catalog = ThemeCatalog::builtin();
        match catalog.get("no-such-theme") {
            Err(EngineError::ThemeNotFound(id)) => assert_eq!(id, "no-such-theme"),
            other => panic!("expected ThemeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_order_is_stable() {
        let catalog = ThemeCatalog::builtin();
        assert_eq!(catalog.themes()[0].id, "modern-luxury");
        assert_eq!(catalog.themes().len(), 8);
    }

    #[test]
    fn test_button_style_radius() {
        assert_eq!(ButtonStyle::Pill.border_radius(), "50px");
        assert_eq!(ButtonStyle::Sharp.border_radius(), "0");
        assert_eq!(ButtonStyle::Rounded.border_radius(), "8px");
    }

    #[test]
    fn test_theme_serializes_camel_case() {
        let catalog = ThemeCatalog::builtin();
        let json = serde_json::to_value(catalog.get("modern-luxury").unwrap()).unwrap();
        assert!(json.get("fontBody").is_some());
        assert!(json.get("buttonStyle").is_some());
        assert!(json["colors"].get("textDark").is_some());
    }
}
