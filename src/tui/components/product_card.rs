//! A single product tile: image reference, name, price, color swatches and
//! the star rating.
//!
//! The selected color lives on the card itself. Cards are rebuilt whenever the
//! page changes, so every product starts over on the first variant.

use super::{Component, ComponentState};
use crate::catalog::{ColorVariant, Product};
use crate::tui::{styles::Theme, utils::{layout, text}, Frame};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Width of one swatch cell group, e.g. ` ● `
const SWATCH_WIDTH: u16 = 3;
const SWATCH_GAP: u16 = 1;

pub struct ProductCard {
    product: Product,
    selected: ColorVariant,
    placeholder: String,
    state: ComponentState,
    /// Clickable swatch cells in `ColorVariant::ALL` order, set on render
    swatch_areas: Vec<Rect>,
}

impl ProductCard {
    pub fn new(product: Product, placeholder: impl Into<String>) -> Self {
        Self {
            product,
            selected: ColorVariant::default(),
            placeholder: placeholder.into(),
            state: ComponentState::new(),
            swatch_areas: Vec::new(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn selected(&self) -> ColorVariant {
        self.selected
    }

    pub fn select(&mut self, variant: ColorVariant) {
        self.selected = variant;
    }

    /// Move to the next variant, wrapping around
    pub fn cycle(&mut self) {
        self.selected = self.selected.next();
    }

    /// Image for the selected variant, after fallbacks
    pub fn image(&self) -> &str {
        self.product.resolve_image(self.selected, &self.placeholder)
    }

    /// Variant whose swatch sits at this cell
    pub fn swatch_at(&self, column: u16, row: u16) -> Option<ColorVariant> {
        self.swatch_areas
            .iter()
            .position(|area| layout::contains(*area, column, row))
            .map(|index| ColorVariant::ALL[index])
    }

    fn render_swatches(&mut self, frame: &mut Frame, row: Rect, theme: &Theme) {
        self.swatch_areas.clear();

        let count = ColorVariant::ALL.len() as u16;
        let needed = count * SWATCH_WIDTH + (count - 1) * SWATCH_GAP;
        let start_x = row.x + row.width.saturating_sub(needed) / 2;

        for (index, variant) in ColorVariant::ALL.into_iter().enumerate() {
            let swatch = Rect::new(
                start_x + index as u16 * (SWATCH_WIDTH + SWATCH_GAP),
                row.y,
                SWATCH_WIDTH,
                1,
            )
            .intersection(row);

            self.swatch_areas.push(swatch);
            if swatch.width == 0 {
                continue;
            }

            let dot = Paragraph::new("●")
                .alignment(Alignment::Center)
                .style(theme.swatch_style(variant, variant == self.selected));
            frame.render_widget(dot, swatch);
        }
    }

    fn stars_line(&self, theme: &Theme) -> Line<'static> {
        let (earned, empty) = self.product.stars().split_glyphs();

        Line::from(vec![
            Span::styled(earned, theme.star_style()),
            Span::styled(empty, theme.dim_style()),
        ])
    }
}

#[async_trait]
impl Component for ProductCard {
    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            if let Some(variant) = self.swatch_at(event.column, event.row) {
                self.select(variant);
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.state.size = area;

        let border_style = if self.state.has_focus {
            theme.focused_border_style()
        } else {
            theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Image
                Constraint::Length(1),
                Constraint::Length(1), // Name
                Constraint::Length(1), // Price
                Constraint::Length(1), // Swatches
                Constraint::Length(1), // Variant label
                Constraint::Length(1), // Stars
                Constraint::Length(1), // Score
                Constraint::Min(0),
            ])
            .split(inner);

        let width = inner.width as usize;
        let centered = |line: Line<'static>| Paragraph::new(line).alignment(Alignment::Center);

        let image = if self.product.image_for(self.selected).is_some() {
            Span::styled(text::truncate(self.image(), width), theme.dim_style())
        } else {
            Span::styled(text::truncate(self.image(), width), theme.placeholder_style())
        };
        frame.render_widget(centered(Line::from(image)), rows[0]);

        let name = text::truncate(self.product.display_name(), width);
        frame.render_widget(centered(Line::styled(name, theme.title_style())), rows[2]);
        frame.render_widget(
            centered(Line::styled(self.product.formatted_price(), theme.price_style())),
            rows[3],
        );

        self.render_swatches(frame, rows[4], theme);

        frame.render_widget(
            centered(Line::styled(self.selected.label(), theme.text_style())),
            rows[5],
        );
        frame.render_widget(centered(self.stars_line(theme)), rows[6]);
        frame.render_widget(
            centered(Line::styled(self.product.score_label(), theme.dim_style())),
            rows[7],
        );
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn set_size(&mut self, size: Rect) {
        self.state.size = size;
    }

    fn has_focus(&self) -> bool {
        self.state.has_focus
    }

    fn set_focus(&mut self, focus: bool) {
        self.state.has_focus = focus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::utils::buffer_text;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn ring() -> Product {
        serde_json::from_value(json!({
            "name": "Solitaire",
            "price": 120,
            "images": {"yellow": "y.png", "rose": "r.png"},
            "popularityScoreFormatted": "3.5"
        }))
        .unwrap()
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_defaults_to_first_variant() {
        let card = ProductCard::new(ring(), "placeholder.png");
        assert_eq!(card.selected(), ColorVariant::Yellow);
        assert_eq!(card.image(), "y.png");
    }

    #[test]
    fn test_missing_variant_uses_fallback() {
        let mut card = ProductCard::new(ring(), "placeholder.png");
        card.select(ColorVariant::White);
        assert_eq!(card.image(), "y.png");

        card.select(ColorVariant::Rose);
        assert_eq!(card.image(), "r.png");
    }

    #[test]
    fn test_placeholder_without_images() {
        let card = ProductCard::new(Product::default(), "placeholder.png");
        assert_eq!(card.image(), "placeholder.png");
    }

    #[test]
    fn test_cycle_wraps() {
        let mut card = ProductCard::new(ring(), "placeholder.png");
        card.cycle();
        card.cycle();
        assert_eq!(card.selected(), ColorVariant::Rose);
        card.cycle();
        assert_eq!(card.selected(), ColorVariant::Yellow);
    }

    #[test]
    fn test_render_shows_product_details() {
        let backend = TestBackend::new(24, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut card = ProductCard::new(ring(), "placeholder.png");

        terminal
            .draw(|frame| card.render(frame, frame.size(), &Theme::default()))
            .unwrap();

        let screen = buffer_text(&terminal);
        assert!(screen.contains("y.png"));
        assert!(screen.contains("Solitaire"));
        assert!(screen.contains("$120.00 USD"));
        assert!(screen.contains("Yellow Gold"));
        assert!(screen.contains("★★★⯪☆"));
        assert!(screen.contains("3.5/5"));
    }

    #[tokio::test]
    async fn test_click_on_swatch_selects_variant() {
        let backend = TestBackend::new(24, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut card = ProductCard::new(ring(), "placeholder.png");

        terminal
            .draw(|frame| card.render(frame, frame.size(), &Theme::default()))
            .unwrap();

        // Inner width 22 and swatches need 11 cells, so they start at column 6 on row 5
        assert_eq!(card.swatch_at(7, 5), Some(ColorVariant::Yellow));
        assert_eq!(card.swatch_at(11, 5), Some(ColorVariant::White));
        assert_eq!(card.swatch_at(15, 5), Some(ColorVariant::Rose));

        card.handle_mouse_event(click(15, 5)).await.unwrap();
        assert_eq!(card.selected(), ColorVariant::Rose);
        assert_eq!(card.image(), "r.png");

        card.handle_mouse_event(click(0, 0)).await.unwrap();
        assert_eq!(card.selected(), ColorVariant::Rose);
    }
}
