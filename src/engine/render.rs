//! Section renderer - pure mapping from (section, page, theme, dark flag)
//! to an HTML fragment.
//!
//! Every rule here is total: missing data fields fall back to the page's
//! top-level fields or to fixed literals, and an unrecognized section kind
//! renders to an empty fragment. That leniency is a forward-compatibility
//! contract, not an omission.

use chrono::{Datelike, Utc};
use serde_json::Value;

use crate::engine::page::{brand_email, Page, Section};
use crate::engine::theme::Theme;

/// Keyword -> decorative icon, first match wins. Checked against the
/// upper-cased feature label as a substring.
const FEATURE_ICONS: &[(&str, &str)] = &[
    ("INSTALLMENT", "💳"),
    ("INSTALLMENTS", "💳"),
    ("3 DAYS RETURN", "🔄"),
    ("RETURN", "🔄"),
    ("CASH ON DELIVERY", "💵"),
    ("COD", "💵"),
    ("FAST DELIVERY", "🚚"),
    ("DELIVERY", "🚚"),
    ("FREE SHIPPING", "📦"),
    ("SHIPPING", "📦"),
    ("WARRANTY", "🛡️"),
    ("GUARANTEE", "✅"),
    ("ORIGINAL", "⭐"),
    ("AUTHENTIC", "💎"),
    ("24/7 SUPPORT", "📞"),
    ("SUPPORT", "📞"),
];

const DEFAULT_FEATURE_ICON: &str = "✨";

const DEFAULT_FEATURE_ITEMS: &[&str] = &[
    "INSTALLMENT",
    "3 DAYS RETURN",
    "CASH ON DELIVERY",
    "FAST DELIVERY",
];

const DEFAULT_POLICY_CONDITIONS: &[&str] = &[
    "The original box and packaging must be kept, even if the product has been opened.",
    "The item must be in good condition, with all accessories and packaging included.",
    "Returns are accepted within 3 days of receiving your order.",
];

const DEFAULT_POLICY_REFUND: &[&str] = &[
    "Our courier will collect the return directly from your address.",
    "Once the item is checked, your refund will be processed.",
    "Cairo and Giza: Refund in cash on the spot when collecting the returned order.",
    "Other governorates: Refund processed through shipping company.",
];

const DEFAULT_POLICY_NOTICE: &str =
    "If you receive a wrong or damaged product, please contact our customer service immediately.";

/// Render one section to an HTML fragment. Unknown kinds yield `""`.
///
/// The theme's colors reach the fragments through the CSS custom properties
/// the composer's shell defines, so only the dark flag is consulted here.
pub fn render_section(section: &Section, page: &Page, _theme: &Theme, is_dark: bool) -> String {
    match section.kind.as_str() {
        "hero" => render_hero(section, page, is_dark),
        "about" => render_about(section, page, is_dark),
        "features" => render_features(section, is_dark),
        "offer" => render_offer(section, page, is_dark),
        "policy" => render_policy(section, page, is_dark),
        "footer" => render_footer(page, is_dark),
        "gallery" => render_gallery(is_dark),
        "testimonials" => render_testimonials(is_dark),
        "contact" => render_contact(page, is_dark),
        "cta" => render_cta(section, page),
        "text" => render_text(section, is_dark),
        _ => String::new(),
    }
}

fn data_str<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn data_str_list(data: &Value, key: &str, default: &[&str]) -> Vec<String> {
    match data.get(key).and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => default.iter().map(|s| s.to_string()).collect(),
    }
}

fn body_text_color(is_dark: bool) -> &'static str {
    if is_dark {
        "var(--text)"
    } else {
        "var(--text-dark)"
    }
}

fn section_background(is_dark: bool) -> &'static str {
    if is_dark {
        "var(--background)"
    } else {
        "#ffffff"
    }
}

fn on_primary_color(is_dark: bool) -> &'static str {
    if is_dark {
        "var(--text)"
    } else {
        "#ffffff"
    }
}

pub fn feature_icon(item: &str) -> &'static str {
    let upper = item.to_uppercase();
    for (keyword, icon) in FEATURE_ICONS {
        if upper.contains(keyword) {
            return icon;
        }
    }
    DEFAULT_FEATURE_ICON
}

fn render_hero(section: &Section, page: &Page, is_dark: bool) -> String {
    let branding = match &page.logo_path {
        Some(logo) => format!(
            r#"<img src="{logo}" alt="{brand}" style="max-width: 350px; width: 80%; margin-bottom: 30px; border-radius: 8px;">"#,
            logo = logo,
            brand = page.brand_name,
        ),
        None => format!(
            r#"<h1 style="color: var(--accent); font-size: 4rem; letter-spacing: 8px; margin-bottom: 20px;">{}</h1>"#,
            page.brand_name.to_uppercase()
        ),
    };
    let tagline = data_str(&section.data, "tagline").unwrap_or(&page.tagline);
    let cta_text = data_str(&section.data, "ctaText").unwrap_or(&page.cta_text);

    format!(
        r##"
    <section style="min-height: 100vh; background: linear-gradient(135deg, var(--primary) 0%, var(--secondary) 100%); display: flex; align-items: center; justify-content: center; text-align: center; padding: 60px 20px;">
        <div class="fade-in">
            {branding}
            <p style="color: {tagline_color}; font-size: 1.5rem; letter-spacing: 4px; margin-bottom: 50px; opacity: 0.9;">{tagline}</p>
            <a href="#offer" class="btn-primary">{cta_text}</a>
        </div>
    </section>"##,
        tagline_color = body_text_color(is_dark),
    )
}

fn render_about(section: &Section, page: &Page, is_dark: bool) -> String {
    let title = data_str(&section.data, "title").unwrap_or("The Art of Fragrance");
    let text = data_str(&section.data, "text").unwrap_or(&page.about_text);

    format!(
        r#"
    <section style="background: {bg}; color: {color}; padding: 120px 20px;">
        <div class="container fade-in" style="max-width: 800px; text-align: center;">
            <h2 style="font-size: 2.8rem; letter-spacing: 3px; margin-bottom: 20px;">{title}</h2>
            <div style="width: 60px; height: 1px; background: var(--accent); margin: 30px auto; opacity: 0.6;"></div>
            <p style="font-size: 1.1rem; line-height: 2; opacity: 0.85;">{text}</p>
        </div>
    </section>"#,
        bg = section_background(is_dark),
        color = body_text_color(is_dark),
    )
}

fn render_features(section: &Section, is_dark: bool) -> String {
    let items = data_str_list(&section.data, "items", DEFAULT_FEATURE_ITEMS);
    let cells: String = items
        .iter()
        .map(|item| {
            format!(
                r#"<div class="fade-in" style="padding: 20px;"><div style="font-size: 2rem; margin-bottom: 15px;">{icon}</div><span style="font-size: 0.85rem; font-weight: 500; letter-spacing: 2px;">{item}</span></div>"#,
                icon = feature_icon(item),
            )
        })
        .collect();

    format!(
        r#"
    <section style="background: linear-gradient(135deg, var(--secondary) 0%, var(--primary) 100%); padding: 60px 20px;">
        <div class="container">
            <div class="features-grid" style="display: grid; grid-template-columns: repeat({count}, 1fr); gap: 30px; text-align: center; color: {color};">
                {cells}
            </div>
        </div>
    </section>"#,
        count = items.len(),
        color = on_primary_color(is_dark),
    )
}

fn offer_card(label: &str, headline: &str, detail: &str) -> String {
    format!(
        r#"<div style="background: rgba(255,255,255,0.08); border: 1px solid rgba(255,255,255,0.15); border-radius: 16px; padding: 50px 30px;">
                    <span style="display: inline-block; font-size: 0.7rem; background: rgba(255,255,255,0.15); padding: 8px 16px; border-radius: 20px; margin-bottom: 25px;">{label}</span>
                    <h3 style="font-size: 2.2rem; margin-bottom: 10px;">{headline}</h3>
                    <p style="opacity: 0.85;">{detail}</p>
                </div>"#
    )
}

fn render_offer(section: &Section, page: &Page, is_dark: bool) -> String {
    let title = data_str(&section.data, "title").unwrap_or("Exclusive Offer");
    let description =
        data_str(&section.data, "description").unwrap_or("Discover your signature scent");
    let divider_bg = if is_dark { "var(--accent)" } else { "#ffffff" };

    format!(
        r##"
    <section id="offer" style="background: linear-gradient(180deg, var(--secondary) 0%, var(--primary) 100%); padding: 120px 20px; text-align: center; color: {color};">
        <div class="container fade-in">
            <h2 style="font-size: 2.8rem; letter-spacing: 3px; margin-bottom: 20px;">{title}</h2>
            <div style="width: 60px; height: 1px; background: {divider_bg}; margin: 30px auto;"></div>
            <p style="font-size: 1.2rem; opacity: 0.9; margin-bottom: 60px;">{description}</p>
            <div class="offer-grid" style="display: grid; grid-template-columns: repeat(3, 1fr); gap: 30px; max-width: 900px; margin: 0 auto 60px;">
                {card_discount}
                {card_gift}
                {card_vip}
            </div>
            <a href="#" class="btn-primary">{cta_text}</a>
        </div>
    </section>"##,
        color = on_primary_color(is_dark),
        card_discount = offer_card("Limited Time", "20% Off", "On your first purchase"),
        card_gift = offer_card("Exclusive", "Free Gift", "With orders over $150"),
        card_vip = offer_card("Members Only", "VIP Access", "Early collection previews"),
        cta_text = page.cta_text,
    )
}

fn render_policy(section: &Section, page: &Page, is_dark: bool) -> String {
    let bg = data_str(&section.data, "bgColor")
        .map(str::to_string)
        .unwrap_or_else(|| section_background(is_dark).to_string());
    let color = data_str(&section.data, "textColor")
        .map(str::to_string)
        .unwrap_or_else(|| body_text_color(is_dark).to_string());
    let title = data_str(&section.data, "title").unwrap_or("Exchange & Return Policy");
    let intro = data_str(&section.data, "intro")
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "At {}, your satisfaction is our top priority. We allow our customers to open \
                 and inspect their orders upon delivery.",
                page.brand_name
            )
        });
    let conditions = data_str_list(&section.data, "conditions", DEFAULT_POLICY_CONDITIONS);
    let refund = data_str_list(&section.data, "refundProcess", DEFAULT_POLICY_REFUND);
    let notice = data_str(&section.data, "notice").unwrap_or(DEFAULT_POLICY_NOTICE);
    let email = data_str(&section.data, "email")
        .map(str::to_string)
        .unwrap_or_else(|| brand_email(&page.brand_name));

    let list_items = |items: &[String]| -> String {
        items
            .iter()
            .map(|item| format!("<li>{}</li>", item))
            .collect()
    };

    format!(
        r#"
    <section style="background: {bg}; color: {color}; padding: 100px 20px;">
        <div class="container fade-in" style="max-width: 900px;">
            <h2 style="font-size: 2.5rem; text-align: center; margin-bottom: 20px;">{title}</h2>
            <div style="width: 60px; height: 1px; background: var(--accent); margin: 30px auto 40px;"></div>
            <p style="text-align: center; margin-bottom: 40px; opacity: 0.9; line-height: 1.8;">{intro}</p>
            <div style="margin-bottom: 40px;">
                <h3 style="font-size: 1.5rem; margin-bottom: 20px;">Conditions for Exchange or Return</h3>
                <ul style="padding-left: 20px; line-height: 2.2; opacity: 0.9;">
                    {conditions}
                </ul>
            </div>
            <div style="margin-bottom: 40px;">
                <h3 style="font-size: 1.5rem; margin-bottom: 20px;">Return & Refund Process</h3>
                <ul style="padding-left: 20px; line-height: 2.2; opacity: 0.9;">
                    {refund}
                </ul>
            </div>
            <div style="background: rgba(128,128,128,0.1); border: 1px solid rgba(128,128,128,0.2); border-radius: 8px; padding: 20px; margin-bottom: 30px; text-align: center;">
                <p style="opacity: 0.9;">{notice}</p>
            </div>
            <p style="font-size: 1rem; text-align: center;">📧 <a href="mailto:{email}" style="color: var(--accent);">{email}</a></p>
        </div>
    </section>"#,
        conditions = list_items(&conditions),
        refund = list_items(&refund),
    )
}

fn render_footer(page: &Page, is_dark: bool) -> String {
    format!(
        r#"
    <footer style="background: var(--primary); color: {color}; padding: 60px 20px; text-align: center;">
        <p style="font-size: 1.8rem; letter-spacing: 8px; margin-bottom: 10px;">{brand}</p>
        <p style="font-size: 0.85rem; opacity: 0.7; letter-spacing: 3px; margin-bottom: 30px;">Luxury Perfumes</p>
        <p style="font-size: 0.75rem; opacity: 0.5;">© {year} {brand_name}. All rights reserved.</p>
    </footer>"#,
        color = on_primary_color(is_dark),
        brand = page.brand_name.to_uppercase(),
        year = Utc::now().year(),
        brand_name = page.brand_name,
    )
}

fn render_gallery(is_dark: bool) -> String {
    format!(
        r#"
    <section style="background: {bg}; padding: 100px 20px; text-align: center;">
        <div class="container fade-in">
            <h2 style="color: {color}; font-size: 2.5rem; margin-bottom: 40px;">Gallery</h2>
            <div style="display: grid; grid-template-columns: repeat(3, 1fr); gap: 20px; max-width: 900px; margin: 0 auto;">
                <div style="background: var(--secondary); height: 200px; border-radius: 8px;"></div>
                <div style="background: var(--secondary); height: 200px; border-radius: 8px;"></div>
                <div style="background: var(--secondary); height: 200px; border-radius: 8px;"></div>
            </div>
        </div>
    </section>"#,
        bg = section_background(is_dark),
        color = body_text_color(is_dark),
    )
}

fn render_testimonials(is_dark: bool) -> String {
    let bg = if is_dark { "var(--secondary)" } else { "#f9f9f9" };
    let card_bg = if is_dark {
        "rgba(255,255,255,0.05)"
    } else {
        "#ffffff"
    };
    let color = body_text_color(is_dark);
    let quote_card = |quote: &str, author: &str| -> String {
        format!(
            r#"<div style="background: {card_bg}; padding: 30px; border-radius: 12px; text-align: left;">
                    <p style="color: {color}; font-style: italic; margin-bottom: 15px;">"{quote}"</p>
                    <p style="color: var(--accent); font-weight: 500;">— {author}</p>
                </div>"#
        )
    };

    format!(
        r#"
    <section style="background: {bg}; padding: 100px 20px; text-align: center;">
        <div class="container fade-in">
            <h2 style="color: {color}; font-size: 2.5rem; margin-bottom: 40px;">What Our Customers Say</h2>
            <div style="display: grid; grid-template-columns: repeat(2, 1fr); gap: 30px; max-width: 800px; margin: 0 auto;">
                {first}
                {second}
            </div>
        </div>
    </section>"#,
        first = quote_card(
            "Absolutely stunning fragrance. I get compliments everywhere I go!",
            "Sarah M."
        ),
        second = quote_card("The quality is exceptional. Worth every penny!", "Ahmed K."),
    )
}

fn render_contact(page: &Page, is_dark: bool) -> String {
    let email = brand_email(&page.brand_name);
    format!(
        r#"
    <section style="background: {bg}; padding: 100px 20px; text-align: center;">
        <div class="container fade-in">
            <h2 style="color: {color}; font-size: 2.5rem; margin-bottom: 40px;">Contact Us</h2>
            <p style="color: {color}; margin-bottom: 20px; opacity: 0.85;">Have questions? We'd love to hear from you.</p>
            <p style="font-size: 1.1rem;">📧 <a href="mailto:{email}" style="color: var(--accent);">{email}</a></p>
        </div>
    </section>"#,
        bg = section_background(is_dark),
        color = body_text_color(is_dark),
    )
}

fn render_cta(section: &Section, page: &Page) -> String {
    let title = data_str(&section.data, "title").unwrap_or("Ready to Experience Luxury?");
    format!(
        r##"
    <section style="background: var(--accent); padding: 80px 20px; text-align: center;">
        <div class="container fade-in">
            <h2 style="color: var(--primary); font-size: 2.5rem; margin-bottom: 30px;">{title}</h2>
            <a href="#" style="display: inline-block; padding: 18px 50px; background: var(--primary); color: #ffffff; text-decoration: none; border-radius: 8px; font-weight: 500; letter-spacing: 2px;">{cta_text}</a>
        </div>
    </section>"##,
        cta_text = page.cta_text,
    )
}

fn render_text(section: &Section, is_dark: bool) -> String {
    let text = data_str(&section.data, "text").unwrap_or("");
    format!(
        r#"
    <section style="background: {bg}; padding: 80px 20px;">
        <div class="container fade-in" style="max-width: 800px;">
            <p style="color: {color}; font-size: 1.1rem; line-height: 1.8;">{text}</p>
        </div>
    </section>"#,
        bg = section_background(is_dark),
        color = body_text_color(is_dark),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::page::{new_page, NewPageRequest};
    use crate::engine::theme::{is_dark, ThemeCatalog};
    use serde_json::json;

    fn fixture() -> (Page, Theme) {
        let catalog = ThemeCatalog::builtin();
        let theme = catalog.get("modern-luxury").unwrap().clone();
        let req = NewPageRequest {
            brand_name: Some("Noor".to_string()),
            theme_id: Some("modern-luxury".to_string()),
            ..Default::default()
        };
        (new_page(&req, "Noor", &theme), theme)
    }

    #[test]
    fn test_unknown_section_kind_renders_empty() {
        let (page, theme) = fixture();
        let section = Section::new("carousel-3d", json!({ "anything": true }));
        assert_eq!(render_section(&section, &page, &theme, true), "");
    }

    #[test]
    fn test_hero_falls_back_to_page_fields() {
        let (page, theme) = fixture();
        let section = Section::new("hero", json!({}));
        let html = render_section(&section, &page, &theme, is_dark(&theme.id));
        assert!(html.contains("NOOR"));
        assert!(html.contains("Luxury Scents. Timeless Elegance."));
        assert!(html.contains("Get Offer"));
        assert!(html.contains("fade-in"));
    }

    #[test]
    fn test_hero_section_data_overrides_page_fields() {
        let (page, theme) = fixture();
        let section = Section::new("hero", json!({ "tagline": "Night Bloom", "ctaText": "Shop" }));
        let html = render_section(&section, &page, &theme, true);
        assert!(html.contains("Night Bloom"));
        assert!(html.contains(">Shop</a>"));
        assert!(!html.contains("Get Offer"));
    }

    #[test]
    fn test_hero_prefers_logo_over_brand_heading() {
        let (mut page, theme) = fixture();
        page.logo_path = Some("/uploads/logo.png".to_string());
        let section = Section::new("hero", json!({}));
        let html = render_section(&section, &page, &theme, true);
        assert!(html.contains(r#"<img src="/uploads/logo.png""#));
        assert!(!html.contains("<h1"));
    }

    #[test]
    fn test_feature_icon_keyword_table() {
        assert_eq!(feature_icon("fast delivery"), "🚚");
        assert_eq!(feature_icon("FREE SHIPPING TODAY"), "📦");
        assert_eq!(feature_icon("cash on delivery"), "💵");
        assert_eq!(feature_icon("something else"), "✨");
    }

    #[test]
    fn test_features_defaults_to_four_items() {
        let (page, theme) = fixture();
        let section = Section::new("features", json!({}));
        let html = render_section(&section, &page, &theme, true);
        assert!(html.contains("repeat(4, 1fr)"));
        assert!(html.contains("INSTALLMENT"));
        assert!(html.contains("FAST DELIVERY"));
    }

    #[test]
    fn test_offer_always_renders_three_fixed_cards() {
        let (page, theme) = fixture();
        let section = Section::new("offer", json!({ "title": "Summer Sale" }));
        let html = render_section(&section, &page, &theme, true);
        assert!(html.contains("Summer Sale"));
        assert!(html.contains("20% Off"));
        assert!(html.contains("Free Gift"));
        assert!(html.contains("VIP Access"));
        assert!(html.contains("rgba(255,255,255,0.08)"));
    }

    #[test]
    fn test_policy_default_email_derived_from_brand() {
        let (page, theme) = fixture();
        let section = Section::new("policy", json!({}));
        let html = render_section(&section, &page, &theme, true);
        assert!(html.contains("mailto:info@noor.com"));
        assert!(html.contains("Exchange & Return Policy"));
    }

    #[test]
    fn test_policy_explicit_email_wins() {
        let (page, theme) = fixture();
        let section = Section::new("policy", json!({ "email": "care@noor.shop" }));
        let html = render_section(&section, &page, &theme, true);
        assert!(html.contains("mailto:care@noor.shop"));
        assert!(!html.contains("info@noor.com"));
    }

    #[test]
    fn test_footer_carries_brand_and_year() {
        let (page, theme) = fixture();
        let section = Section::new("footer", json!({}));
        let html = render_section(&section, &page, &theme, true);
        assert!(html.contains("NOOR"));
        assert!(html.contains(&Utc::now().year().to_string()));
    }

    #[test]
    fn test_light_theme_uses_dark_text_slots() {
        let (page, theme) = fixture();
        let section = Section::new("about", json!({}));
        let html = render_section(&section, &page, &theme, false);
        assert!(html.contains("color: var(--text-dark)"));
        assert!(html.contains("background: #ffffff"));
    }

    #[test]
    fn test_text_section_defaults_to_empty_paragraph() {
        let (page, theme) = fixture();
        let section = Section::new("text", json!({}));
        let html = render_section(&section, &page, &theme, true);
        assert!(html.contains("<p style="));
    }
}
