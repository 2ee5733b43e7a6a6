//! Product records as served by the catalog endpoint, and the fixed set of
//! color variants every product can be viewed in.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::rating::{parse_score, Stars};

/// Title shown for a product that arrives without a name
pub const UNTITLED_PRODUCT: &str = "Product Title";

/// A single catalog entry.
///
/// Every field is optional on the wire. Missing or `null` fields fall back to
/// empty values so one sparse record never sinks the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Display name, also the key of the card within a page
    pub name: Option<String>,

    /// Price in currency units
    pub price: Option<f64>,

    /// Variant key to image URL, in document order
    pub images: Option<Map<String, Value>>,

    /// Decimal rating between 0 and 5, kept as the raw string for display
    #[serde(deserialize_with = "lenient_string")]
    pub popularity_score_formatted: Option<String>,
}

impl Product {
    /// Name to show on the card
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNTITLED_PRODUCT,
        }
    }

    /// Price formatted with two decimals, `$0.00 USD` when absent or zero
    pub fn formatted_price(&self) -> String {
        match self.price {
            Some(price) if price != 0.0 && price.is_finite() => format!("${:.2} USD", price),
            _ => "$0.00 USD".to_string(),
        }
    }

    /// Image for `variant`, or the first image the product has at all
    pub fn image_for(&self, variant: ColorVariant) -> Option<&str> {
        let images = self.images.as_ref()?;

        images
            .get(variant.key())
            .and_then(non_empty_str)
            .or_else(|| images.values().find_map(non_empty_str))
    }

    /// Image for `variant`, falling back to `placeholder` when the product has none
    pub fn resolve_image<'a>(&'a self, variant: ColorVariant, placeholder: &'a str) -> &'a str {
        self.image_for(variant).unwrap_or(placeholder)
    }

    /// Parsed popularity score, 0 when absent or unparseable
    pub fn score(&self) -> f64 {
        parse_score(self.popularity_score_formatted.as_deref())
    }

    /// Star breakdown for the popularity score
    pub fn stars(&self) -> Stars {
        Stars::from_score(self.score())
    }

    /// Score caption such as `4.3/5`
    pub fn score_label(&self) -> String {
        match self.popularity_score_formatted.as_deref() {
            Some(raw) if !raw.is_empty() => format!("{}/5", raw),
            _ => "0/5".to_string(),
        }
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Accept the score as a string or a bare number; anything else reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Metal color a product can be previewed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorVariant {
    #[default]
    Yellow,
    White,
    Rose,
}

impl ColorVariant {
    /// All variants in display order
    pub const ALL: [ColorVariant; 3] = [ColorVariant::Yellow, ColorVariant::White, ColorVariant::Rose];

    /// Key used in a product's image map
    pub fn key(self) -> &'static str {
        match self {
            ColorVariant::Yellow => "yellow",
            ColorVariant::White => "white",
            ColorVariant::Rose => "rose",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorVariant::Yellow => "Yellow Gold",
            ColorVariant::White => "White Gold",
            ColorVariant::Rose => "Rose Gold",
        }
    }

    /// Swatch color as RGB
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorVariant::Yellow => (0xE6, 0xCA, 0x97),
            ColorVariant::White => (0xD9, 0xD9, 0xD9),
            ColorVariant::Rose => (0xE1, 0xA4, 0xA9),
        }
    }

    pub fn index(self) -> usize {
        match self {
            ColorVariant::Yellow => 0,
            ColorVariant::White => 1,
            ColorVariant::Rose => 2,
        }
    }

    /// The following variant, wrapping after the last one
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(value: Value) -> Product {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_deserialize_full_record() {
        let p = product(json!({
            "name": "Engagement Ring 1",
            "price": 285.4,
            "images": {"yellow": "y.jpg", "white": "w.jpg", "rose": "r.jpg"},
            "popularityScoreFormatted": "4.3"
        }));

        assert_eq!(p.display_name(), "Engagement Ring 1");
        assert_eq!(p.formatted_price(), "$285.40 USD");
        assert_eq!(p.image_for(ColorVariant::White), Some("w.jpg"));
        assert_eq!(p.score_label(), "4.3/5");
    }

    #[test]
    fn test_sparse_record_uses_fallbacks() {
        let p = product(json!({"name": null, "images": null}));

        assert_eq!(p.display_name(), UNTITLED_PRODUCT);
        assert_eq!(p.formatted_price(), "$0.00 USD");
        assert_eq!(p.image_for(ColorVariant::Yellow), None);
        assert_eq!(p.resolve_image(ColorVariant::Yellow, "placeholder.png"), "placeholder.png");
        assert_eq!(p.score_label(), "0/5");
        assert_eq!(p.stars(), Stars::from_score(0.0));
    }

    #[test]
    fn test_missing_variant_falls_back_to_first_image() {
        let p = product(json!({"images": {"rose": "r.png"}}));
        assert_eq!(p.image_for(ColorVariant::White), Some("r.png"));
    }

    #[test]
    fn test_fallback_follows_document_order() {
        let p = product(json!({"images": {"rose": "r.png", "yellow": "", "extra": "e.png"}}));

        // Empty entries count as missing, so yellow falls back too
        assert_eq!(p.image_for(ColorVariant::Yellow), Some("r.png"));
        assert_eq!(p.image_for(ColorVariant::White), Some("r.png"));
    }

    #[test]
    fn test_numeric_score_is_accepted() {
        let p = product(json!({"popularityScoreFormatted": 3.5}));
        assert_eq!(p.score_label(), "3.5/5");
        assert_eq!(p.stars().full, 3);
        assert!(p.stars().half);
    }

    #[test]
    fn test_zero_price_renders_as_zero() {
        let p = product(json!({"price": 0}));
        assert_eq!(p.formatted_price(), "$0.00 USD");
    }

    #[test]
    fn test_variant_metadata() {
        assert_eq!(ColorVariant::default(), ColorVariant::Yellow);
        assert_eq!(ColorVariant::Yellow.rgb(), (0xE6, 0xCA, 0x97));
        assert_eq!(ColorVariant::White.rgb(), (0xD9, 0xD9, 0xD9));
        assert_eq!(ColorVariant::Rose.rgb(), (0xE1, 0xA4, 0xA9));
        assert_eq!(ColorVariant::Rose.label(), "Rose Gold");
        assert_eq!(ColorVariant::Rose.next(), ColorVariant::Yellow);
        assert_eq!(ColorVariant::White.key(), "white");
    }
}
