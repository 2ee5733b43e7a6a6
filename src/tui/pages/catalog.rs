use crate::catalog::{
    CatalogLoader, CatalogSource, CatalogUpdate, ColorVariant, LoadHandle, PageWindow, Product, PAGE_SIZE,
};
use crate::tui::{
    components::{Component, ComponentState, NavButton, NavDirection, PageDots, ProductCard},
    events::Event,
    keys::{Action, KeyMap},
    styles::Theme,
    Frame,
};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Width of the arrow columns either side of the grid
const NAV_WIDTH: u16 = 5;

/// Paged product grid.
///
/// Owns the product collection, the page window over it and the cards of the
/// current page. The catalog is requested once when the page is mounted; the
/// pending request is cancelled if the page is dropped first.
pub struct CatalogPage {
    title: String,
    source: Arc<dyn CatalogSource>,
    sender: mpsc::UnboundedSender<Event>,
    placeholder: String,
    key_map: KeyMap,

    products: Vec<Product>,
    window: PageWindow,
    cards: Vec<ProductCard>,
    focused: usize,

    previous_button: NavButton,
    next_button: NavButton,
    dots: PageDots,

    load: Option<LoadHandle>,
    loaded: bool,
    state: ComponentState,
}

impl CatalogPage {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        sender: mpsc::UnboundedSender<Event>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            title: "Products".to_string(),
            source,
            sender,
            placeholder: placeholder.into(),
            key_map: KeyMap::default(),
            products: Vec::new(),
            window: PageWindow::new(0),
            cards: Vec::new(),
            focused: 0,
            previous_button: NavButton::new(NavDirection::Previous),
            next_button: NavButton::new(NavDirection::Next),
            dots: PageDots::new(),
            load: None,
            loaded: false,
            state: ComponentState::new(),
        }
    }

    /// Start the one catalog request for this page. Mounting again while a
    /// request is pending or after one finished does nothing.
    pub fn mount(&mut self) {
        if self.load.is_some() {
            return;
        }
        info!("Loading catalog from {}", self.source.describe());
        self.load = Some(CatalogLoader::spawn(self.source.clone(), self.sender.clone()));
    }

    /// Cancel a pending request
    pub fn unmount(&mut self) {
        if let Some(load) = self.load.take() {
            if !load.is_finished() {
                debug!("Cancelling pending catalog load");
            }
        }
    }

    /// Whether the catalog request is still outstanding
    pub fn is_loading(&self) -> bool {
        self.load.is_some() && !self.loaded
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Apply the outcome of the catalog request
    pub fn apply_update(&mut self, update: CatalogUpdate) {
        self.loaded = true;
        match update {
            CatalogUpdate::Loaded(products) => self.set_products(products),
            CatalogUpdate::Failed(reason) => {
                // Already logged by the loader; keep what we have
                warn!("Catalog unchanged: {}", reason);
            }
        }
    }

    /// Replace the collection and go back to the first page
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.window.set_len(self.products.len());
        self.rebuild_cards();
    }

    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    pub fn focused_card(&self) -> Option<&ProductCard> {
        self.cards.get(self.focused)
    }

    pub fn next_page(&mut self) {
        self.navigate(|window| window.next());
    }

    pub fn previous_page(&mut self) {
        self.navigate(|window| window.previous());
    }

    /// Jump to a 0-based page
    pub fn jump_to_page(&mut self, page: usize) {
        self.navigate(|window| window.jump_to_page(page));
    }

    pub fn focus_next_card(&mut self) {
        if !self.cards.is_empty() {
            self.set_focused((self.focused + 1) % self.cards.len());
        }
    }

    pub fn focus_previous_card(&mut self) {
        if !self.cards.is_empty() {
            self.set_focused((self.focused + self.cards.len() - 1) % self.cards.len());
        }
    }

    pub fn select_variant(&mut self, variant: ColorVariant) {
        if let Some(card) = self.cards.get_mut(self.focused) {
            card.select(variant);
        }
    }

    pub fn cycle_variant(&mut self) {
        if let Some(card) = self.cards.get_mut(self.focused) {
            card.cycle();
        }
    }

    /// Run a page-level action. Returns false for actions the page does not handle.
    pub fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::NextPage => self.next_page(),
            Action::PreviousPage => self.previous_page(),
            Action::JumpToPage(page) => self.jump_to_page(page),
            Action::FocusNextCard => self.focus_next_card(),
            Action::FocusPreviousCard => self.focus_previous_card(),
            Action::SelectVariant(variant) => self.select_variant(variant),
            Action::CycleVariant => self.cycle_variant(),
            Action::Quit | Action::ToggleHelp => return false,
        }
        true
    }

    fn navigate(&mut self, step: impl FnOnce(&mut PageWindow)) {
        let before = self.window.start_index();
        step(&mut self.window);
        if self.window.start_index() != before {
            debug!(
                "Showing page {} of {}",
                self.window.current_page(),
                self.window.total_pages()
            );
            self.rebuild_cards();
        }
    }

    /// Fresh cards for the visible window; selections start over
    fn rebuild_cards(&mut self) {
        self.cards = self.products[self.window.visible_range()]
            .iter()
            .cloned()
            .map(|product| ProductCard::new(product, self.placeholder.clone()))
            .collect();
        self.focused = 0;
        if let Some(card) = self.cards.first_mut() {
            card.set_focus(true);
        }
    }

    fn set_focused(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(self.focused) {
            card.set_focus(false);
        }
        self.focused = index;
        if let Some(card) = self.cards.get_mut(index) {
            card.set_focus(true);
        }
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let message = if self.is_loading() {
            "Loading products…"
        } else {
            "No products"
        };
        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(theme.placeholder_style());
        frame.render_widget(paragraph, area);
    }
}

#[async_trait]
impl Component for CatalogPage {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        if let Some(action) = self.key_map.action(&event) {
            self.apply_action(action);
        }
        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Ok(());
        }

        let (column, row) = (event.column, event.row);
        if self.previous_button.is_hit(column, row) {
            self.previous_page();
        } else if self.next_button.is_hit(column, row) {
            self.next_page();
        } else if let Some(page) = self.dots.page_at(column, row) {
            self.jump_to_page(page);
        } else if let Some(index) = self
            .cards
            .iter()
            .position(|card| crate::tui::utils::layout::contains(card.size(), column, row))
        {
            self.set_focused(index);
            self.cards[index].handle_mouse_event(event).await?;
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.state.size = area;

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .border_style(theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(NAV_WIDTH),
                Constraint::Min(1),
                Constraint::Length(NAV_WIDTH),
            ])
            .split(rows[0]);

        self.previous_button.update(&self.window);
        self.next_button.update(&self.window);
        self.dots.update(&self.window);

        self.previous_button.render(frame, columns[0], theme);
        self.next_button.render(frame, columns[2], theme);
        self.dots.render(frame, rows[1], theme);

        if self.cards.is_empty() {
            self.render_empty(frame, columns[1], theme);
            return;
        }

        // Always lay out a full row so a partial last page keeps card widths
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, PAGE_SIZE as u32); PAGE_SIZE])
            .split(columns[1]);

        for (card, slot) in self.cards.iter_mut().zip(slots.iter()) {
            card.render(frame, *slot, theme);
        }
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn set_size(&mut self, size: Rect) {
        self.state.size = size;
    }

    fn has_focus(&self) -> bool {
        true
    }
}

#[cfg(test)]
impl CatalogPage {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }
}

impl Drop for CatalogPage {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogResult, FileCatalogSource};
    use crate::tui::utils::buffer_text;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    struct FixedSource(Vec<Product>);

    #[async_trait]
    impl CatalogSource for FixedSource {
        async fn fetch(&self) -> CatalogResult<Vec<Product>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fixture".to_string()
        }
    }

    fn products(count: usize) -> Vec<Product> {
        (0..count)
            .map(|i| Product {
                name: Some(format!("Ring {}", i)),
                price: Some(100.0 + i as f64),
                images: None,
                popularity_score_formatted: Some("4.0".to_string()),
            })
            .collect()
    }

    fn page_with(count: usize) -> (CatalogPage, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut page = CatalogPage::new(Arc::new(FixedSource(products(count))), tx, "placeholder.png");
        page.set_products(products(count));
        (page, rx)
    }

    fn names(page: &CatalogPage) -> Vec<String> {
        page.cards()
            .iter()
            .map(|card| card.product().display_name().to_string())
            .collect()
    }

    #[test]
    fn test_ten_products_paging() {
        let (mut page, _rx) = page_with(10);
        assert_eq!(page.window().total_pages(), 3);
        assert_eq!(names(&page), ["Ring 0", "Ring 1", "Ring 2", "Ring 3"]);

        page.jump_to_page(2);
        assert_eq!(names(&page), ["Ring 8", "Ring 9"]);

        page.next_page();
        assert_eq!(page.window().current_page(), 1);

        // Wrapping back shows the final four products
        page.previous_page();
        assert_eq!(page.window().start_index(), 6);
        assert_eq!(names(&page), ["Ring 6", "Ring 7", "Ring 8", "Ring 9"]);
    }

    #[test]
    fn test_selection_resets_after_page_change() {
        let (mut page, _rx) = page_with(10);
        page.focus_next_card();
        page.select_variant(ColorVariant::Rose);
        assert_eq!(page.cards()[1].selected(), ColorVariant::Rose);
        assert_eq!(page.cards()[0].selected(), ColorVariant::Yellow);

        page.next_page();
        page.previous_page();
        assert!(page.cards().iter().all(|card| card.selected() == ColorVariant::Yellow));
    }

    #[test]
    fn test_focus_wraps_within_page() {
        let (mut page, _rx) = page_with(6);
        page.next_page();
        assert_eq!(page.cards().len(), 2);

        page.focus_next_card();
        page.focus_next_card();
        assert_eq!(page.focused_card().unwrap().product().display_name(), "Ring 4");

        page.focus_previous_card();
        assert_eq!(page.focused_card().unwrap().product().display_name(), "Ring 5");
        assert_eq!(page.cards().iter().filter(|card| card.has_focus()).count(), 1);
    }

    #[test]
    fn test_failed_load_keeps_collection() {
        let (mut page, _rx) = page_with(5);
        page.apply_update(CatalogUpdate::Failed("boom".to_string()));
        assert_eq!(page.products().len(), 5);

        page.apply_update(CatalogUpdate::Loaded(products(2)));
        assert_eq!(page.products().len(), 2);
        assert_eq!(page.window().start_index(), 0);
    }

    #[test]
    fn test_empty_page_controls() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut page = CatalogPage::new(Arc::new(FixedSource(Vec::new())), tx, "placeholder.png");
        page.next_page();
        page.previous_page();
        page.cycle_variant();
        assert_eq!(page.window().start_index(), 0);
        assert!(page.cards().is_empty());
        assert!(!page.window().can_next());
        assert!(!page.window().can_previous());
    }

    #[tokio::test]
    async fn test_mount_loads_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut page = CatalogPage::new(Arc::new(FixedSource(products(3))), tx, "placeholder.png");
        page.mount();
        page.mount();
        assert!(page.is_loading());

        match rx.recv().await {
            Some(Event::Catalog(update)) => page.apply_update(update),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(!page.is_loading());
        assert_eq!(page.products().len(), 3);

        // The second mount did not start another request
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_mount_reports_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut page = CatalogPage::new(
            Arc::new(FileCatalogSource::new("/nonexistent/products.json")),
            tx,
            "placeholder.png",
        );
        page.mount();

        match rx.recv().await {
            Some(Event::Catalog(update)) => page.apply_update(update),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(page.products().is_empty());
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn test_key_navigation() {
        let (mut page, _rx) = page_with(10);
        page.handle_key_event(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)).await.unwrap();
        assert_eq!(page.window().current_page(), 2);

        page.handle_key_event(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE)).await.unwrap();
        assert_eq!(page.window().current_page(), 3);

        page.handle_key_event(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE)).await.unwrap();
        assert_eq!(page.focused_card().unwrap().selected(), ColorVariant::White);
    }

    #[tokio::test]
    async fn test_render_and_click_navigation() {
        let (mut page, _rx) = page_with(10);
        let backend = TestBackend::new(120, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::default();

        terminal.draw(|frame| page.render(frame, frame.size(), &theme)).unwrap();
        let screen = buffer_text(&terminal);
        assert!(screen.contains("Ring 0"));
        assert!(screen.contains("Ring 3"));
        assert!(!screen.contains("Ring 4"));
        assert!(screen.contains("● ○ ○"));

        // Previous is disabled on the first page
        let prev = page.previous_button.hit_area();
        page.handle_mouse_event(left_click(prev.x, prev.y)).await.unwrap();
        assert_eq!(page.window().current_page(), 1);

        let next = page.next_button.hit_area();
        page.handle_mouse_event(left_click(next.x, next.y)).await.unwrap();
        assert_eq!(page.window().current_page(), 2);

        terminal.draw(|frame| page.render(frame, frame.size(), &theme)).unwrap();
        let screen = buffer_text(&terminal);
        assert!(screen.contains("Ring 4"));
        assert!(screen.contains("○ ● ○"));
    }

    #[test]
    fn test_render_last_page_disables_next() {
        let (mut page, _rx) = page_with(10);
        page.jump_to_page(2);
        let backend = TestBackend::new(120, 14);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| page.render(frame, frame.size(), &Theme::default()))
            .unwrap();

        assert!(page.previous_button.is_enabled());
        assert!(!page.next_button.is_enabled());
        let screen = buffer_text(&terminal);
        assert!(screen.contains("Ring 8"));
        assert!(screen.contains("Ring 9"));
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }
}
