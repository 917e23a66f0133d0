//! Heuristic copy/theme assistant.
//!
//! No learned models here: theme suggestion is keyword scoring over the
//! catalog's mood tags, and copy generation picks from fixed tables keyed
//! by a coarse perfume category. Randomness is confined to this module;
//! a score of zero signals that the random fallback was used.

use rand::prelude::IndexedRandom;

use crate::engine::theme::{Theme, ThemeCatalog};

const CATEGORIES: &[&str] = &[
    "luxury",
    "fresh",
    "oriental",
    "floral",
    "masculine",
    "feminine",
];

const TAGLINES: &[(&str, [&str; 3])] = &[
    (
        "luxury",
        [
            "Luxury Scents. Timeless Elegance.",
            "Where Luxury Meets Essence.",
            "The Art of Refined Fragrance.",
        ],
    ),
    (
        "fresh",
        [
            "Fresh. Pure. Unforgettable.",
            "Embrace the Freshness Within.",
            "A Breath of Pure Elegance.",
        ],
    ),
    (
        "oriental",
        [
            "Exotic Essence. Eternal Allure.",
            "The Mystery of the Orient.",
            "Ancient Secrets. Modern Luxury.",
        ],
    ),
    (
        "floral",
        [
            "Blooming Elegance.",
            "The Essence of Petals.",
            "Where Flowers Meet Luxury.",
        ],
    ),
    (
        "masculine",
        [
            "Bold. Powerful. Unforgettable.",
            "The Scent of Strength.",
            "Confidence in Every Note.",
        ],
    ),
    (
        "feminine",
        [
            "Grace. Beauty. Sophistication.",
            "The Essence of Femininity.",
            "Elegance Redefined.",
        ],
    ),
];

fn about_template(category: &str, brand_name: &str) -> String {
    match category {
        "fresh" => format!(
            "{} captures the essence of nature's purest elements. Our fragrances are designed to \
             invigorate your senses and leave a lasting impression of freshness and vitality.",
            brand_name
        ),
        "oriental" => format!(
            "{} draws inspiration from ancient Eastern traditions. Our exotic blends combine rare \
             ingredients to create fragrances that are mysterious, captivating, and unforgettable.",
            brand_name
        ),
        "floral" => format!(
            "{} celebrates the timeless beauty of flowers. Each fragrance captures the delicate \
             essence of nature's most precious blooms, creating scents that are romantic and \
             enchanting.",
            brand_name
        ),
        "masculine" => format!(
            "{} crafts bold fragrances for the modern man. Our scents embody strength, confidence, \
             and sophistication, leaving a powerful impression wherever you go.",
            brand_name
        ),
        "feminine" => format!(
            "{} creates elegant fragrances that celebrate femininity. Our scents are designed to \
             empower and enchant, reflecting the grace and beauty of the modern woman.",
            brand_name
        ),
        _ => format!(
            "{} represents the pinnacle of luxury perfumery. Each fragrance is meticulously \
             crafted using the finest ingredients sourced from around the world, blending \
             tradition with modern sophistication.",
            brand_name
        ),
    }
}

/// Score one theme against the keyword list: +2 per keyword with a
/// bidirectional substring match on a mood tag, +1 per keyword contained
/// in the theme name.
fn score_theme(theme: &Theme, keywords: &[&str]) -> u32 {
    let name_lower = theme.name.to_lowercase();
    let mut score = 0;
    for keyword in keywords {
        if theme
            .mood
            .iter()
            .any(|m| m.contains(keyword) || keyword.contains(m.as_str()))
        {
            score += 2;
        }
        if name_lower.contains(keyword) {
            score += 1;
        }
    }
    score
}

/// Suggest the best-matching theme for the given perfume type / mood text.
///
/// Ties keep the first theme in catalog order. When nothing matches at all,
/// a uniformly random theme is returned with score 0.
pub fn suggest_theme<'a>(
    catalog: &'a ThemeCatalog,
    perfume_type: &str,
    mood: &str,
) -> (&'a Theme, u32) {
    let haystack = format!("{} {}", perfume_type, mood).to_lowercase();
    let keywords: Vec<&str> = haystack.split_whitespace().collect();

    let mut best: Option<&Theme> = None;
    let mut best_score = 0;
    for theme in catalog.themes() {
        let score = score_theme(theme, &keywords);
        if score > best_score {
            best_score = score;
            best = Some(theme);
        }
    }

    match best {
        Some(theme) => (theme, best_score),
        None => {
            let theme = catalog
                .themes()
                .choose(&mut rand::rng())
                .expect("catalog is never empty");
            (theme, 0)
        }
    }
}

/// Pick the copy category for a free-text perfume type / mood.
fn match_category(perfume_type: &str, mood: &str) -> &'static str {
    let text = if !perfume_type.is_empty() {
        perfume_type.to_lowercase()
    } else if !mood.is_empty() {
        mood.to_lowercase()
    } else {
        "luxury".to_string()
    };
    CATEGORIES
        .iter()
        .find(|category| text.contains(*category))
        .copied()
        .unwrap_or("luxury")
}

/// Generate a tagline and about text for a brand. The tagline is drawn
/// uniformly at random from the matched category's fixed options.
pub fn generate_copy(brand_name: &str, perfume_type: &str, mood: &str) -> (String, String) {
    let category = match_category(perfume_type, mood);
    let options = TAGLINES
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, options)| options)
        .expect("every category has taglines");
    let tagline = options
        .choose(&mut rand::rng())
        .expect("tagline table is never empty")
        .to_string();
    (tagline, about_template(category, brand_name))
}
