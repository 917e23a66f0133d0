//! Page composer - assembles the full HTML document for a page.
//!
//! The section-based shell wraps the renderer's fragments in a fixed
//! head/style scaffold. Pages with no sections (created before section-based
//! composition existed) fall back to the legacy fixed 6-block template,
//! which must keep producing the same structural sections as the old
//! 6-field page shape.

use chrono::{Datelike, Utc};

use crate::engine::page::{brand_email, Page};
use crate::engine::render::render_section;
use crate::engine::theme::{is_dark, Theme};

/// Fades in elements carrying the `fade-in` marker class as they scroll
/// into view. Appended verbatim to both document shells.
const FADE_IN_SCRIPT: &str = r#"    <script>
        document.addEventListener('DOMContentLoaded', function() {
            const fadeElements = document.querySelectorAll('.fade-in');
            const observer = new IntersectionObserver(function(entries) {
                entries.forEach(function(entry) {
                    if (entry.isIntersecting) {
                        entry.target.classList.add('visible');
                        observer.unobserve(entry.target);
                    }
                });
            }, { threshold: 0.15 });
            fadeElements.forEach(function(el) { observer.observe(el); });
        });
    </script>"#;

/// Percent-encode a Google Fonts family name for a css2 URL.
fn encode_font(name: &str) -> String {
    name.replace(' ', "%20")
}

fn font_stylesheet_href(theme: &Theme) -> String {
    format!(
        "https://fonts.googleapis.com/css2?family={}:wght@300;400;500;600;700&family={}:wght@300;400;500&display=swap",
        encode_font(&theme.font),
        encode_font(&theme.font_body),
    )
}

/// Compose the full HTML document for a page. Deterministic for a given
/// (page, theme) pair; all randomness lives in the assistant.
pub fn compose(page: &Page, theme: &Theme) -> String {
    let dark = is_dark(&theme.id);
    if page.sections.is_empty() {
        return compose_legacy(page, theme, dark);
    }

    let mut sections_html = String::new();
    for section in &page.sections {
        sections_html.push_str(&render_section(section, page, theme, dark));
    }
    shell(page, theme, dark, &sections_html)
}

fn shell(page: &Page, theme: &Theme, dark: bool, sections_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{brand} | Luxury Perfumes</title>
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="{fonts_href}" rel="stylesheet">
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        :root {{
            --primary: {primary};
            --secondary: {secondary};
            --accent: {accent};
            --text: {text};
            --text-dark: {text_dark};
            --background: {background};
        }}
        html {{ scroll-behavior: smooth; }}
        body {{
            font-family: '{font_body}', sans-serif;
            color: var(--text);
            line-height: 1.6;
            overflow-x: hidden;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; padding: 0 20px; }}
        h1, h2, h3 {{ font-family: '{font}', serif; }}
        .btn-primary {{
            display: inline-block;
            padding: 18px 50px;
            background: var(--accent);
            color: {btn_color};
            text-decoration: none;
            font-size: 0.9rem;
            font-weight: 500;
            letter-spacing: 2px;
            text-transform: uppercase;
            border-radius: {btn_radius};
            transition: all 0.4s ease;
            box-shadow: 0 4px 20px rgba(0,0,0,0.15);
        }}
        .btn-primary:hover {{ transform: translateY(-3px); box-shadow: 0 8px 30px rgba(0,0,0,0.25); }}
        @keyframes fadeInUp {{ from {{ opacity: 0; transform: translateY(40px); }} to {{ opacity: 1; transform: translateY(0); }} }}
        .fade-in {{ opacity: 0; transform: translateY(30px); transition: opacity 0.8s ease, transform 0.8s ease; }}
        .fade-in.visible {{ opacity: 1; transform: translateY(0); }}
        @media (max-width: 768px) {{
            .features-grid {{ grid-template-columns: repeat(2, 1fr) !important; }}
            .offer-grid {{ grid-template-columns: 1fr !important; }}
        }}
    </style>
</head>
<body>
{sections_html}
{script}
</body>
</html>"#,
        brand = page.brand_name,
        fonts_href = font_stylesheet_href(theme),
        primary = theme.colors.primary,
        secondary = theme.colors.secondary,
        accent = theme.colors.accent,
        text = theme.colors.text,
        text_dark = theme.colors.text_dark,
        background = theme.colors.background,
        font = theme.font,
        font_body = theme.font_body,
        btn_color = if dark { "var(--primary)" } else { "#ffffff" },
        btn_radius = theme.button_style.border_radius(),
        script = FADE_IN_SCRIPT,
    )
}

/// Legacy fixed 6-block layout: hero/about/features/offer/policy/footer
/// baked into one template, driven entirely by the page's top-level fields.
fn compose_legacy(page: &Page, theme: &Theme, dark: bool) -> String {
    let hero_branding = match &page.logo_path {
        Some(logo) => format!(
            r#"<img src="{}" alt="{} Logo" class="logo">"#,
            logo, page.brand_name
        ),
        None => format!(
            r#"<h1 class="brand-name">{}</h1>"#,
            page.brand_name.to_uppercase()
        ),
    };
    let email = brand_email(&page.brand_name);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{brand} | Luxury Perfumes</title>
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="{fonts_href}" rel="stylesheet">
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        :root {{
            --primary: {primary};
            --secondary: {secondary};
            --accent: {accent};
            --text: {text};
            --text-dark: {text_dark};
            --background: {background};
        }}
        html {{ scroll-behavior: smooth; }}
        body {{
            font-family: '{font_body}', sans-serif;
            color: var(--text);
            line-height: 1.6;
            overflow-x: hidden;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; padding: 0 20px; }}

        .hero {{
            min-height: 100vh;
            background: {hero_bg};
            display: flex;
            align-items: center;
            justify-content: center;
            text-align: center;
            position: relative;
        }}
        .hero-content {{ z-index: 1; animation: fadeInUp 1.2s ease-out; }}
        .logo {{ max-width: 350px; width: 80%; height: auto; margin-bottom: 30px; border-radius: 8px; }}
        .brand-name {{
            font-family: '{font}', serif;
            font-size: 4rem;
            font-weight: 400;
            letter-spacing: 8px;
            margin-bottom: 20px;
            color: {body_color};
        }}
        .tagline {{
            font-family: '{font}', serif;
            font-size: 1.5rem;
            font-weight: 300;
            letter-spacing: 4px;
            margin-bottom: 50px;
            opacity: 0.9;
            color: {body_color};
        }}
        .btn-primary {{
            display: inline-block;
            padding: 18px 50px;
            background: var(--accent);
            color: {btn_color};
            text-decoration: none;
            font-size: 0.9rem;
            font-weight: 500;
            letter-spacing: 2px;
            text-transform: uppercase;
            border-radius: {btn_radius};
            transition: all 0.4s ease;
            box-shadow: 0 4px 20px rgba(0,0,0,0.15);
        }}
        .btn-primary:hover {{ transform: translateY(-3px); box-shadow: 0 8px 30px rgba(0,0,0,0.25); }}

        .about {{
            background: {panel_bg};
            color: {body_color};
            padding: 120px 0;
        }}
        .about-content {{ max-width: 800px; margin: 0 auto; text-align: center; }}
        .section-title {{
            font-family: '{font}', serif;
            font-size: 2.8rem;
            font-weight: 400;
            letter-spacing: 3px;
            margin-bottom: 20px;
        }}
        .divider {{ width: 60px; height: 1px; background: var(--accent); margin: 30px auto; opacity: 0.6; }}
        .about-text {{ font-size: 1.1rem; font-weight: 300; line-height: 2; opacity: 0.85; }}

        .features-bar {{
            background: {features_bg};
            padding: 60px 0;
        }}
        .features-grid {{ display: grid; grid-template-columns: repeat(4, 1fr); gap: 30px; text-align: center; }}
        .feature-item {{ display: flex; flex-direction: column; align-items: center; gap: 15px; color: {on_primary}; }}
        .feature-icon {{ width: 50px; height: 50px; }}
        .feature-icon svg {{ width: 100%; height: 100%; }}
        .feature-item span {{ font-size: 0.85rem; font-weight: 500; letter-spacing: 2px; }}

        .offer {{
            background: {offer_bg};
            padding: 120px 0;
            text-align: center;
            color: {on_primary};
        }}
        .offer-content h2 {{ font-family: '{font}', serif; font-size: 2.8rem; font-weight: 400; letter-spacing: 3px; margin-bottom: 20px; }}
        .offer .divider {{ background: {offer_divider}; }}
        .offer-tagline {{ font-size: 1.2rem; font-weight: 300; letter-spacing: 2px; opacity: 0.9; margin-bottom: 60px; }}
        .offer-details {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 30px; margin-bottom: 60px; }}
        .offer-card {{
            background: rgba(255,255,255,0.08);
            backdrop-filter: blur(10px);
            border: 1px solid rgba(255,255,255,0.15);
            border-radius: 16px;
            padding: 50px 30px;
            transition: all 0.4s ease;
        }}
        .offer-card:hover {{ transform: translateY(-8px); background: rgba(255,255,255,0.12); }}
        .offer-label {{ display: inline-block; font-size: 0.7rem; font-weight: 500; letter-spacing: 2px; text-transform: uppercase; background: rgba(255,255,255,0.15); padding: 8px 16px; border-radius: 20px; margin-bottom: 25px; }}
        .offer-card h3 {{ font-family: '{font}', serif; font-size: 2.2rem; font-weight: 400; margin-bottom: 10px; }}
        .offer-card p {{ font-weight: 300; opacity: 0.85; letter-spacing: 1px; }}

        .policy {{
            background: {panel_bg};
            color: {body_color};
            padding: 100px 0;
        }}
        .policy-content {{ max-width: 900px; margin: 0 auto; }}
        .policy-content h2 {{ font-family: '{font}', serif; font-size: 2.5rem; font-weight: 400; letter-spacing: 2px; text-align: center; margin-bottom: 20px; }}
        .policy .divider {{ background: var(--accent); margin-bottom: 40px; }}
        .policy-intro {{ font-size: 1rem; font-weight: 300; line-height: 1.9; margin-bottom: 40px; text-align: center; opacity: 0.85; }}
        .policy-section {{ margin-bottom: 40px; }}
        .policy-section h3 {{ font-family: '{font}', serif; font-size: 1.5rem; font-weight: 500; margin-bottom: 20px; }}
        .policy-section ul {{ list-style: none; padding: 0; }}
        .policy-section li {{ position: relative; padding-left: 20px; margin-bottom: 12px; font-size: 1rem; font-weight: 300; line-height: 1.8; opacity: 0.85; }}
        .policy-section li::before {{ content: '•'; position: absolute; left: 0; color: var(--accent); font-weight: bold; }}
        .policy-note {{ font-size: 1rem; font-weight: 300; line-height: 1.8; margin-bottom: 30px; padding: 20px; background: {note_bg}; border-radius: 8px; border-left: 3px solid var(--accent); }}
        .contact-email {{ display: flex; align-items: center; gap: 10px; font-size: 1rem; }}
        .contact-email a {{ color: var(--accent); text-decoration: none; font-weight: 400; }}

        .footer {{
            background: var(--primary);
            padding: 60px 0;
            text-align: center;
            color: {on_primary};
        }}
        .footer-brand {{ font-family: '{font}', serif; font-size: 1.8rem; font-weight: 400; letter-spacing: 8px; margin-bottom: 10px; }}
        .footer-tagline {{ font-size: 0.85rem; font-weight: 300; letter-spacing: 3px; opacity: 0.7; margin-bottom: 30px; }}
        .footer-copyright {{ font-size: 0.75rem; font-weight: 300; opacity: 0.5; letter-spacing: 1px; }}

        @keyframes fadeInUp {{ from {{ opacity: 0; transform: translateY(40px); }} to {{ opacity: 1; transform: translateY(0); }} }}
        .fade-in {{ opacity: 0; transform: translateY(30px); transition: opacity 0.8s ease, transform 0.8s ease; }}
        .fade-in.visible {{ opacity: 1; transform: translateY(0); }}

        @media (max-width: 768px) {{
            .brand-name {{ font-size: 2.5rem; letter-spacing: 4px; }}
            .tagline {{ font-size: 1.1rem; letter-spacing: 2px; }}
            .section-title, .offer-content h2 {{ font-size: 2rem; }}
            .features-grid {{ grid-template-columns: repeat(2, 1fr); gap: 40px 20px; }}
            .about, .offer, .policy {{ padding: 80px 0; }}
        }}
        @media (max-width: 480px) {{
            .brand-name {{ font-size: 2rem; }}
            .logo {{ max-width: 250px; }}
        }}
    </style>
</head>
<body>
    <section class="hero">
        <div class="hero-content">
            {hero_branding}
            <p class="tagline">{tagline}</p>
            <a href="#offer" class="btn-primary">{cta_text}</a>
        </div>
    </section>

    <section class="about">
        <div class="container">
            <div class="about-content fade-in">
                <h2 class="section-title">The Art of Fragrance</h2>
                <div class="divider"></div>
                <p class="about-text">{about_text}</p>
            </div>
        </div>
    </section>

    <section class="features-bar">
        <div class="container">
            <div class="features-grid">
                <div class="feature-item fade-in">
                    <div class="feature-icon">
                        <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64" fill="none" stroke="currentColor" stroke-width="2">
                            <rect x="8" y="12" width="32" height="40" rx="2"/>
                            <line x1="12" y1="20" x2="36" y2="20"/>
                            <line x1="12" y1="28" x2="36" y2="28"/>
                            <circle cx="48" cy="36" r="12"/>
                        </svg>
                    </div>
                    <span>INSTALLMENT</span>
                </div>
                <div class="feature-item fade-in">
                    <div class="feature-icon">
                        <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64" fill="none" stroke="currentColor" stroke-width="2">
                            <path d="M16 24 L32 8 L48 24 L48 52 L16 52 Z"/>
                            <circle cx="32" cy="36" r="8"/>
                            <path d="M28 36 L30 38 L36 32"/>
                        </svg>
                    </div>
                    <span>3 DAYS RETURN</span>
                </div>
                <div class="feature-item fade-in">
                    <div class="feature-icon">
                        <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64" fill="none" stroke="currentColor" stroke-width="2">
                            <rect x="8" y="20" width="28" height="24" rx="2"/>
                            <circle cx="22" cy="32" r="6"/>
                            <path d="M40 28 L56 28 L56 44 L40 44"/>
                        </svg>
                    </div>
                    <span>CASH ON DELIVERY</span>
                </div>
                <div class="feature-item fade-in">
                    <div class="feature-icon">
                        <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64" fill="none" stroke="currentColor" stroke-width="2">
                            <rect x="8" y="28" width="36" height="20" rx="2"/>
                            <circle cx="20" cy="48" r="6"/>
                            <circle cx="38" cy="48" r="6"/>
                            <path d="M44 28 L44 20 L56 20 L56 42 L44 42"/>
                        </svg>
                    </div>
                    <span>FAST DELIVERY</span>
                </div>
            </div>
        </div>
    </section>

    <section class="offer" id="offer">
        <div class="container">
            <div class="offer-content fade-in">
                <h2>{offer_title}</h2>
                <div class="divider"></div>
                <p class="offer-tagline">{offer_description}</p>
                <div class="offer-details">
                    <div class="offer-card fade-in">
                        <span class="offer-label">Limited Time</span>
                        <h3>20% Off</h3>
                        <p>On your first purchase</p>
                    </div>
                    <div class="offer-card fade-in">
                        <span class="offer-label">Exclusive</span>
                        <h3>Free Gift</h3>
                        <p>With orders over $150</p>
                    </div>
                    <div class="offer-card fade-in">
                        <span class="offer-label">Members Only</span>
                        <h3>VIP Access</h3>
                        <p>Early collection previews</p>
                    </div>
                </div>
                <a href="#" class="btn-primary">{cta_text}</a>
            </div>
        </div>
    </section>

    <section class="policy">
        <div class="container">
            <div class="policy-content fade-in">
                <h2>Exchange & Return Policy</h2>
                <div class="divider"></div>
                <p class="policy-intro">At <strong>{brand}</strong>, your satisfaction is our top priority. We allow our customers to <strong>open and inspect</strong> their orders upon delivery.</p>
                <div class="policy-section">
                    <h3>Conditions for Exchange or Return</h3>
                    <ul>
                        <li>The <strong>original box and packaging must be kept</strong>, even if the product has been opened.</li>
                        <li>The item must be in <strong>good condition</strong>, with all accessories and packaging included.</li>
                        <li>Returns are accepted within <strong>3 days</strong> of receiving your order.</li>
                    </ul>
                </div>
                <div class="policy-section">
                    <h3>Return & Refund Process</h3>
                    <ul>
                        <li>Our <strong>courier</strong> will collect the return directly from your address.</li>
                        <li>Once the item is checked, your <strong>refund will be processed</strong>.</li>
                        <li><strong>Cairo and Giza:</strong> Refund <strong>in cash on the spot</strong> when collecting the returned order.</li>
                        <li><strong>Other governorates:</strong> Refund processed <strong>through shipping company</strong>.</li>
                    </ul>
                </div>
                <p class="policy-note">If you receive a <strong>wrong or damaged product</strong>, please contact our customer service immediately.</p>
                <div class="contact-email">
                    <span>✉</span>
                    <a href="mailto:{email}">{email}</a>
                </div>
            </div>
        </div>
    </section>

    <footer class="footer">
        <div class="container">
            <p class="footer-brand">{brand_upper}</p>
            <p class="footer-tagline">Luxury Perfumes</p>
            <p class="footer-copyright">&copy; {year} {brand}. All rights reserved.</p>
        </div>
    </footer>

{script}
</body>
</html>"##,
        brand = page.brand_name,
        brand_upper = page.brand_name.to_uppercase(),
        fonts_href = font_stylesheet_href(theme),
        primary = theme.colors.primary,
        secondary = theme.colors.secondary,
        accent = theme.colors.accent,
        text = theme.colors.text,
        text_dark = theme.colors.text_dark,
        background = theme.colors.background,
        font = theme.font,
        font_body = theme.font_body,
        hero_bg = if dark {
            "linear-gradient(135deg, var(--primary) 0%, var(--secondary) 100%)"
        } else {
            "var(--background)"
        },
        body_color = if dark { "var(--text)" } else { "var(--text-dark)" },
        btn_color = if dark { "var(--primary)" } else { "#ffffff" },
        btn_radius = theme.button_style.border_radius(),
        panel_bg = if dark { "var(--background)" } else { "#ffffff" },
        features_bg = if dark { "var(--secondary)" } else { "var(--primary)" },
        on_primary = if dark { "var(--text)" } else { "#ffffff" },
        offer_bg = if dark {
            "linear-gradient(180deg, var(--secondary) 0%, var(--primary) 100%)"
        } else {
            "var(--primary)"
        },
        offer_divider = if dark { "var(--accent)" } else { "#ffffff" },
        note_bg = if dark {
            "rgba(255,255,255,0.05)"
        } else {
            "rgba(0,0,0,0.03)"
        },
        hero_branding = hero_branding,
        tagline = page.tagline,
        cta_text = page.cta_text,
        about_text = page.about_text,
        offer_title = page.offer_title,
        offer_description = page.offer_description,
        email = email,
        year = Utc::now().year(),
        script = FADE_IN_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::page::{new_page, NewPageRequest, Section};
    use crate::engine::theme::ThemeCatalog;
    use serde_json::json;

    fn fixture(theme_id: &str) -> (Page, Theme) {
        let catalog = ThemeCatalog::builtin();
        let theme = catalog.get(theme_id).unwrap().clone();
        let req = NewPageRequest {
            brand_name: Some("Noor".to_string()),
            theme_id: Some(theme_id.to_string()),
            ..Default::default()
        };
        (new_page(&req, "Noor", &theme), theme)
    }

    #[test]
    fn test_compose_is_deterministic() {
        let (page, theme) = fixture("modern-luxury");
        assert_eq!(compose(&page, &theme), compose(&page, &theme));
    }

    #[test]
    fn test_compose_renders_sections_in_order() {
        let (mut page, theme) = fixture("modern-luxury");
        page.sections = vec![
            Section::new("about", json!({ "title": "First Block" })),
            Section::new("cta", json!({ "title": "Second Block" })),
        ];
        let html = compose(&page, &theme);
        let first = html.find("First Block").unwrap();
        let second = html.find("Second Block").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_compose_drops_unknown_sections_silently() {
        let (mut page, theme) = fixture("modern-luxury");
        page.sections = vec![
            Section::new("hero", json!({})),
            Section::new("hologram", json!({ "marker": "should-not-appear" })),
            Section::new("footer", json!({})),
        ];
        let html = compose(&page, &theme);
        assert!(!html.contains("should-not-appear"));
        assert!(!html.contains("hologram"));
        let hero = html.find("min-height: 100vh").unwrap();
        let footer = html.find("All rights reserved").unwrap();
        assert!(hero < footer);
    }

    #[test]
    fn test_compose_falls_back_to_legacy_when_sections_empty() {
        let (mut page, theme) = fixture("modern-luxury");
        page.sections.clear();
        let html = compose(&page, &theme);
        for class in [
            r#"<section class="hero">"#,
            r#"<section class="about">"#,
            r#"<section class="features-bar">"#,
            r#"<section class="offer" id="offer">"#,
            r#"<section class="policy">"#,
            r#"<footer class="footer">"#,
        ] {
            assert!(html.contains(class), "legacy layout must contain {}", class);
        }
        assert!(html.contains("mailto:info@noor.com"));
    }

    #[test]
    fn test_shell_parameterized_by_theme() {
        let (page, theme) = fixture("modern-luxury");
        let html = compose(&page, &theme);
        assert!(html.contains("--primary: #0a0a0a;"));
        assert!(html.contains("--accent: #d4af37;"));
        assert!(html.contains("family=Montserrat:"));
        assert!(html.contains("family=Open%20Sans:"));
        // sharp buttons
        assert!(html.contains("border-radius: 0;"));
        assert!(html.contains("IntersectionObserver"));
    }

    #[test]
    fn test_pill_button_style_on_light_theme() {
        let (page, theme) = fixture("fresh-breeze");
        let html = compose(&page, &theme);
        assert!(html.contains("border-radius: 50px;"));
        // light themes color buttons white-on-accent
        assert!(html.contains("color: #ffffff;"));
    }

    #[test]
    fn test_artifact_contains_each_default_section_fragment() {
        let (page, theme) = fixture("luxury-oud");
        let html = compose(&page, &theme);
        assert!(html.contains("Luxury Scents. Timeless Elegance."));
        assert!(html.contains("The Art of Fragrance"));
        assert!(html.contains("INSTALLMENT"));
        assert!(html.contains("Exclusive Offer"));
        assert!(html.contains("Exchange & Return Policy"));
        assert!(html.contains("All rights reserved"));
    }
}
