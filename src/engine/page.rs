//! Page document model - the page entity, its ordered sections, creation
//! defaults and the update merge rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::engine::theme::Theme;

pub const DEFAULT_TAGLINE: &str = "Luxury Scents. Timeless Elegance.";
pub const DEFAULT_CTA_TEXT: &str = "Get Offer";
pub const DEFAULT_PERFUME_TYPE: &str = "luxury";
pub const DEFAULT_OFFER_TITLE: &str = "Exclusive Offer";
pub const DEFAULT_OFFER_DESCRIPTION: &str =
    "Discover your signature scent with our exclusive collection.";

/// One ordered, typed content block of a page.
///
/// `kind` is an open string on purpose: unknown kinds must survive
/// persistence round-trips and render to an empty fragment, never error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "empty_object")]
    pub data: Value,
}

fn empty_object() -> Value {
    json!({})
}

impl Section {
    pub fn new(kind: &str, data: Value) -> Self {
        Self {
            id: format!("{}-{}", kind, Utc::now().timestamp_millis()),
            kind: kind.to_string(),
            data,
        }
    }
}

/// A persisted page. `theme_name` is a cache of the resolved theme's name at
/// the last write, never a source of truth. `sections` order is render order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub brand_name: String,
    pub theme_id: String,
    pub theme_name: String,
    pub logo_path: Option<String>,
    pub tagline: String,
    pub cta_text: String,
    pub perfume_type: String,
    pub about_text: String,
    pub offer_title: String,
    pub offer_description: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of POST /api/pages. Required fields are modelled as Options so the
/// handler can reject them with the engine's validation error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPageRequest {
    pub brand_name: Option<String>,
    pub theme_id: Option<String>,
    pub logo_path: Option<String>,
    pub tagline: Option<String>,
    pub cta_text: Option<String>,
    pub perfume_type: Option<String>,
    pub about_text: Option<String>,
    pub offer_title: Option<String>,
    pub offer_description: Option<String>,
    pub sections: Option<Vec<Section>>,
}

/// Body of PUT /api/pages/{id}.
///
/// String fields follow "replace if provided and non-empty, else keep".
/// `logo_path` is the exception: it replaces on explicit presence, including
/// an explicit null, hence the double Option. `sections` replaces wholesale
/// whenever present, empty array included.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageRequest {
    pub brand_name: Option<String>,
    pub theme_id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub logo_path: Option<Option<String>>,
    pub tagline: Option<String>,
    pub cta_text: Option<String>,
    pub perfume_type: Option<String>,
    pub about_text: Option<String>,
    pub offer_title: Option<String>,
    pub offer_description: Option<String>,
    pub sections: Option<Vec<Section>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdatePageRequest {
    /// Theme id this update should resolve against: the provided one when
    /// non-empty, otherwise the page's current theme.
    pub fn effective_theme_id<'a>(&'a self, existing: &'a Page) -> &'a str {
        match &self.theme_id {
            Some(id) if !id.is_empty() => id,
            _ => &existing.theme_id,
        }
    }
}

/// `info@<brand lowercased, whitespace stripped>.com`
pub fn brand_email(brand_name: &str) -> String {
    let compact: String = brand_name.to_lowercase().split_whitespace().collect();
    format!("info@{}.com", compact)
}

pub fn default_about_text(brand_name: &str) -> String {
    format!(
        "{} represents the pinnacle of luxury perfumery. Each fragrance is meticulously crafted \
         using the finest ingredients sourced from around the world, blending tradition with \
         modern sophistication. Our master perfumers dedicate themselves to creating scents that \
         transcend time, leaving an unforgettable impression wherever you go.",
        brand_name
    )
}

/// The system-generated 6-section layout, seeded from the page's resolved
/// top-level fields.
pub fn default_sections(
    brand_name: &str,
    tagline: &str,
    cta_text: &str,
    about_text: &str,
    offer_title: &str,
    offer_description: &str,
) -> Vec<Section> {
    vec![
        Section::new("hero", json!({ "tagline": tagline, "ctaText": cta_text })),
        Section::new(
            "about",
            json!({ "title": "The Art of Fragrance", "text": about_text }),
        ),
        Section::new(
            "features",
            json!({ "items": ["INSTALLMENT", "3 DAYS RETURN", "CASH ON DELIVERY", "FAST DELIVERY"] }),
        ),
        Section::new(
            "offer",
            json!({ "title": offer_title, "description": offer_description }),
        ),
        Section::new("policy", json!({ "email": brand_email(brand_name) })),
        Section::new("footer", json!({})),
    ]
}

/// Build a brand-new page from a validated create request and its resolved
/// theme. Caller-supplied sections win over the generated default layout.
pub fn new_page(req: &NewPageRequest, brand_name: &str, theme: &Theme) -> Page {
    let now = Utc::now();
    let non_empty = |v: &Option<String>, fallback: &str| -> String {
        match v {
            Some(s) if !s.is_empty() => s.clone(),
            _ => fallback.to_string(),
        }
    };

    let tagline = non_empty(&req.tagline, DEFAULT_TAGLINE);
    let cta_text = non_empty(&req.cta_text, DEFAULT_CTA_TEXT);
    let about_text = non_empty(&req.about_text, &default_about_text(brand_name));
    let offer_title = non_empty(&req.offer_title, DEFAULT_OFFER_TITLE);
    let offer_description = non_empty(&req.offer_description, DEFAULT_OFFER_DESCRIPTION);

    let sections = match &req.sections {
        Some(sections) => sections.clone(),
        None => default_sections(
            brand_name,
            &tagline,
            &cta_text,
            &about_text,
            &offer_title,
            &offer_description,
        ),
    };

    Page {
        id: format!("page-{}", now.timestamp_millis()),
        brand_name: brand_name.to_string(),
        theme_id: theme.id.clone(),
        theme_name: theme.name.clone(),
        logo_path: req.logo_path.clone().filter(|p| !p.is_empty()),
        tagline,
        cta_text,
        perfume_type: non_empty(&req.perfume_type, DEFAULT_PERFUME_TYPE),
        about_text,
        offer_title,
        offer_description,
        sections,
        created_at: now,
        updated_at: now,
    }
}

/// Apply the update merge rules to an existing record, producing the new
/// record. `theme` is the already-resolved effective theme; `theme_name` is
/// always recomputed from it.
pub fn merged(existing: &Page, req: &UpdatePageRequest, theme: &Theme) -> Page {
    let keep = |v: &Option<String>, current: &str| -> String {
        match v {
            Some(s) if !s.is_empty() => s.clone(),
            _ => current.to_string(),
        }
    };

    Page {
        id: existing.id.clone(),
        brand_name: keep(&req.brand_name, &existing.brand_name),
        theme_id: theme.id.clone(),
        theme_name: theme.name.clone(),
        logo_path: match &req.logo_path {
            Some(explicit) => explicit.clone().filter(|p| !p.is_empty()),
            None => existing.logo_path.clone(),
        },
        tagline: keep(&req.tagline, &existing.tagline),
        cta_text: keep(&req.cta_text, &existing.cta_text),
        perfume_type: keep(&req.perfume_type, &existing.perfume_type),
        about_text: keep(&req.about_text, &existing.about_text),
        offer_title: keep(&req.offer_title, &existing.offer_title),
        offer_description: keep(&req.offer_description, &existing.offer_description),
        sections: match &req.sections {
            Some(sections) => sections.clone(),
            None => existing.sections.clone(),
        },
        created_at: existing.created_at,
        updated_at: Utc::now(),
    }
}
