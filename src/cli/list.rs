use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::catalog::{self, ColorVariant, PageWindow, Product};
use crate::config::Config;

/// Print one page of the catalog without starting the viewer
#[derive(Args)]
pub struct ListCommand {
    /// Page to print, starting at 1. Pages past the end show the last page.
    #[arg(short = 'p', long = "page", default_value_t = 1)]
    pub page: usize,
}

impl ListCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        debug!("Executing list command for page {}", self.page);

        let source = catalog::source_for(config)?;

        // A failed fetch is logged by the loader and reads as an empty catalog
        let products = catalog::fetch_logged(source.as_ref()).await.unwrap_or_default();

        print!("{}", render_page(&products, self.page, &config.placeholder_image));
        Ok(())
    }
}

/// Plain text rendering of a 1-based page, as printed by `vitrine list`
pub fn render_page(products: &[Product], page: usize, placeholder: &str) -> String {
    let mut window = PageWindow::new(products.len());
    if window.is_empty() {
        return "No products\n".to_string();
    }
    window.jump_to_page(page.saturating_sub(1));

    let mut out = String::new();
    for product in &products[window.visible_range()] {
        let variant = ColorVariant::default();
        let stars = product.stars();

        out.push_str(product.display_name());
        out.push('\n');
        out.push_str(&format!("  {}\n", product.formatted_price()));
        out.push_str(&format!("  {} ({})\n", product.resolve_image(variant, placeholder), variant.label()));
        out.push_str(&format!("  {} {}\n", stars.glyphs(), product.score_label()));
        out.push('\n');
    }

    out.push_str(&format!("Page {} of {}\n", window.current_page(), window.total_pages()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn products(count: usize) -> Vec<Product> {
        (0..count)
            .map(|i| {
                serde_json::from_value(json!({
                    "name": format!("Pendant {}", i),
                    "price": 10.5,
                    "images": {"white": format!("w{}.png", i)},
                    "popularityScoreFormatted": "2.5"
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(render_page(&[], 1, "placeholder.png"), "No products\n");
    }

    #[test]
    fn test_first_page() {
        let text = render_page(&products(10), 1, "placeholder.png");
        assert!(text.starts_with("Pendant 0\n  $10.50 USD\n  w0.png (Yellow Gold)\n  ★★⯪☆☆ 2.5/5\n"));
        assert!(text.contains("Pendant 3"));
        assert!(!text.contains("Pendant 4"));
        assert!(text.ends_with("Page 1 of 3\n"));
    }

    #[test]
    fn test_last_partial_page() {
        let text = render_page(&products(10), 3, "placeholder.png");
        assert!(text.starts_with("Pendant 8\n"));
        assert!(text.contains("Pendant 9"));
        assert!(text.ends_with("Page 3 of 3\n"));
    }

    #[test]
    fn test_page_out_of_range_clamps() {
        assert!(render_page(&products(10), 99, "p.png").ends_with("Page 3 of 3\n"));
        assert!(render_page(&products(10), 0, "p.png").ends_with("Page 1 of 3\n"));
    }

    #[test]
    fn test_placeholder_for_imageless_product() {
        let text = render_page(&[Product::default()], 1, "placeholder.png");
        assert!(text.starts_with("Product Title\n  $0.00 USD\n  placeholder.png (Yellow Gold)\n  ☆☆☆☆☆ 0/5\n"));
    }
}
