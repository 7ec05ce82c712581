//! Brand identity and theme configuration for the storefront.
//!
//! Every field has a default (the "StyleHub" fashion storefront), so a YAML
//! file only needs the keys it changes.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    pub brand_name: String,
    pub tagline: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_image: String,
    pub colors: ThemeColors,
    pub features: Vec<Feature>,
    pub contact: Contact,
    pub social_links: SocialLinks,
    pub newsletter: Newsletter,
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub danger: String,
    pub dark: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Social profile URLs. An empty string means the brand has no such profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub instagram: String,
    pub facebook: String,
    pub twitter: String,
    pub tiktok: String,
    pub youtube: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Newsletter {
    pub enabled: bool,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

/// Partial update applied with [`BrandConfig::apply`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BrandOverrides {
    pub brand_name: Option<String>,
    pub tagline: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image: Option<String>,
    pub colors: Option<ThemeColors>,
    pub features: Option<Vec<Feature>>,
    pub contact: Option<Contact>,
    pub social_links: Option<SocialLinks>,
    pub newsletter: Option<Newsletter>,
    pub seo: Option<Seo>,
}

/// Ready-made identities for common storefront types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandTemplate {
    Fashion,
    Electronics,
    Home,
}

impl FromStr for BrandTemplate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fashion" => Ok(Self::Fashion),
            "electronics" => Ok(Self::Electronics),
            "home" => Ok(Self::Home),
            other => Err(ConfigError::Validation(format!(
                "unknown brand template '{other}'; expected fashion, electronics, or home"
            ))),
        }
    }
}

impl std::fmt::Display for BrandTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrandTemplate::Fashion => write!(f, "fashion"),
            BrandTemplate::Electronics => write!(f, "electronics"),
            BrandTemplate::Home => write!(f, "home"),
        }
    }
}

fn feature(icon: &str, title: &str, description: &str) -> Feature {
    Feature {
        icon: icon.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#6366f1".to_owned(),
            secondary: "#f59e0b".to_owned(),
            accent: "#10b981".to_owned(),
            danger: "#ef4444".to_owned(),
            dark: "#1f2937".to_owned(),
        }
    }
}

impl Default for Newsletter {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Stay in the Loop".to_owned(),
            description:
                "Get the latest updates on new products, exclusive deals, and style tips"
                    .to_owned(),
        }
    }
}

impl Default for BrandConfig {
    fn default() -> Self {
        let subtitle = "Discover premium products curated just for you. From trending essentials to timeless classics.";
        Self {
            brand_name: "StyleHub".to_owned(),
            tagline: "Discover. Shop. Shine.".to_owned(),
            hero_title: "Your Style, Your Story".to_owned(),
            hero_subtitle: subtitle.to_owned(),
            hero_image: "/hero.jpeg".to_owned(),
            colors: ThemeColors::default(),
            features: vec![
                feature("✨", "Quality Products", "Carefully curated selection"),
                feature("🔒", "Secure Shopping", "Safe and protected"),
                feature("🚀", "Fast Delivery", "Quick and reliable"),
                feature("💬", "Customer Support", "We're here to help"),
            ],
            contact: Contact {
                phone: "+2160675986988".to_owned(),
                email: "contact@stylehub.com".to_owned(),
                address: "123 Business Street, City, Country".to_owned(),
            },
            social_links: SocialLinks {
                instagram: "https://instagram.com/zi__punisher/".to_owned(),
                ..SocialLinks::default()
            },
            newsletter: Newsletter::default(),
            seo: Seo {
                title: "StyleHub - Premium Fashion & Lifestyle".to_owned(),
                description: subtitle.to_owned(),
                keywords: "fashion, style, clothing, accessories, premium, quality".to_owned(),
            },
        }
    }
}

impl BrandConfig {
    /// Default configuration with a template's identity, hero copy, primary
    /// palette and feature highlights applied on top.
    #[must_use]
    pub fn from_template(template: BrandTemplate) -> Self {
        let mut config = Self::default();
        config.apply(template.overrides());
        config
    }

    /// Merges `overrides` into this configuration. Only the three brand
    /// colors of a template are replaced; `danger` and `dark` keep their values
    /// unless the override carries a full palette.
    pub fn apply(&mut self, overrides: BrandOverrides) {
        let BrandOverrides {
            brand_name,
            tagline,
            hero_title,
            hero_subtitle,
            hero_image,
            colors,
            features,
            contact,
            social_links,
            newsletter,
            seo,
        } = overrides;

        if let Some(v) = brand_name {
            self.brand_name = v;
        }
        if let Some(v) = tagline {
            self.tagline = v;
        }
        if let Some(v) = hero_title {
            self.hero_title = v;
        }
        if let Some(v) = hero_subtitle {
            self.hero_subtitle = v;
        }
        if let Some(v) = hero_image {
            self.hero_image = v;
        }
        if let Some(v) = colors {
            self.colors = v;
        }
        if let Some(v) = features {
            self.features = v;
        }
        if let Some(v) = contact {
            self.contact = v;
        }
        if let Some(v) = social_links {
            self.social_links = v;
        }
        if let Some(v) = newsletter {
            self.newsletter = v;
        }
        if let Some(v) = seo {
            self.seo = v;
        }
    }

    #[must_use]
    pub fn theme_colors(&self) -> &ThemeColors {
        &self.colors
    }

    /// `(network, url)` pairs for every social profile that is set.
    #[must_use]
    pub fn active_social_links(&self) -> Vec<(&'static str, &str)> {
        let links = &self.social_links;
        [
            ("instagram", links.instagram.as_str()),
            ("facebook", links.facebook.as_str()),
            ("twitter", links.twitter.as_str()),
            ("tiktok", links.tiktok.as_str()),
            ("youtube", links.youtube.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .collect()
    }
}

impl BrandTemplate {
    fn overrides(self) -> BrandOverrides {
        let (name, tagline, hero_title, hero_subtitle, palette, features) = match self {
            BrandTemplate::Fashion => (
                "StyleHub",
                "Discover. Shop. Shine.",
                "Your Style, Your Story",
                "Discover premium fashion curated just for you. From trending essentials to timeless classics.",
                ["#6366f1", "#f59e0b", "#10b981"],
                vec![
                    feature("✨", "Latest Trends", "Always in fashion"),
                    feature("🔒", "Secure Shopping", "Safe and protected"),
                    feature("🚀", "Fast Delivery", "Quick and reliable"),
                    feature("💬", "Customer Support", "We're here to help"),
                ],
            ),
            BrandTemplate::Electronics => (
                "TechZone",
                "Innovation. Quality. Performance.",
                "Innovation Meets Excellence",
                "Discover cutting-edge technology and electronics. From latest gadgets to professional equipment.",
                ["#3b82f6", "#06b6d4", "#8b5cf6"],
                vec![
                    feature("⚡", "Latest Tech", "Cutting-edge products"),
                    feature("🔒", "Secure Shopping", "Safe and protected"),
                    feature("🚀", "Fast Delivery", "Quick and reliable"),
                    feature("🔧", "Tech Support", "Expert assistance"),
                ],
            ),
            BrandTemplate::Home => (
                "HomeBloom",
                "Create. Comfort. Inspire.",
                "Transform Your Space",
                "Beautiful home decor and furniture to create your perfect living space. Quality meets affordability.",
                ["#059669", "#d97706", "#dc2626"],
                vec![
                    feature("🏠", "Home Design", "Beautiful selections"),
                    feature("🔒", "Secure Shopping", "Safe and protected"),
                    feature("🚀", "Fast Delivery", "Quick and reliable"),
                    feature("💬", "Customer Support", "We're here to help"),
                ],
            ),
        };

        let [primary, secondary, accent] = palette;
        BrandOverrides {
            brand_name: Some(name.to_owned()),
            tagline: Some(tagline.to_owned()),
            hero_title: Some(hero_title.to_owned()),
            hero_subtitle: Some(hero_subtitle.to_owned()),
            colors: Some(ThemeColors {
                primary: primary.to_owned(),
                secondary: secondary.to_owned(),
                accent: accent.to_owned(),
                ..ThemeColors::default()
            }),
            features: Some(features),
            ..BrandOverrides::default()
        }
    }
}

/// Load and validate the brand configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brand(path: &Path) -> Result<BrandConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let brand: BrandConfig = serde_yaml::from_str(&content)?;
    validate_brand(&brand)?;

    Ok(brand)
}

fn validate_brand(brand: &BrandConfig) -> Result<(), ConfigError> {
    if brand.brand_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "brand_name must be non-empty".to_string(),
        ));
    }

    let colors = &brand.colors;
    for (role, value) in [
        ("primary", &colors.primary),
        ("secondary", &colors.secondary),
        ("accent", &colors.accent),
        ("danger", &colors.danger),
        ("dark", &colors.dark),
    ] {
        if !is_hex_color(value) {
            return Err(ConfigError::Validation(format!(
                "color '{role}' must be a #rgb or #rrggbb hex value, got '{value}'"
            )));
        }
    }

    for f in &brand.features {
        if f.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "feature title must be non-empty".to_string(),
            ));
        }
    }

    let email = brand.contact.email.trim();
    if !email.is_empty() && !email.contains('@') {
        return Err(ConfigError::Validation(format!(
            "contact email '{email}' is not a valid address"
        )));
    }

    Ok(())
}

fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

#[cfg(test)]
#[path = "brand_test.rs"]
mod tests;
