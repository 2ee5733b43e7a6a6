use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::tui::{
    components::Component,
    events::Event,
    keys::{Action, KeyMap},
    pages::CatalogPage,
    styles::Theme,
    utils::layout,
    Frame,
};
use crate::version;
use anyhow::Result;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Current application dimensions
    pub size: Rect,

    /// Key mappings for the application
    pub key_map: KeyMap,

    /// The product grid
    pub catalog: CatalogPage,

    /// Current theme for styling
    pub theme: Theme,

    /// Whether the help overlay is shown
    pub show_help: bool,

    /// Whether mouse events are handled
    pub mouse_enabled: bool,
}

impl App {
    /// Create a new application instance. Catalog results are delivered
    /// through `event_sender`.
    pub fn new(config: &Config, source: Arc<dyn CatalogSource>, event_sender: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            should_quit: false,
            size: Rect::default(),
            key_map: KeyMap::default(),
            catalog: CatalogPage::new(source, event_sender, config.placeholder_image.clone()),
            theme: Theme::default(),
            show_help: false,
            mouse_enabled: config.mouse_enabled,
        }
    }

    /// Activate the catalog view, which issues its one fetch
    pub fn mount(&mut self) {
        self.catalog.mount();
    }

    /// Handle incoming events. Returns true once the app should exit.
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => match self.key_map.action(&key_event) {
                Some(Action::Quit) => {
                    self.should_quit = true;
                }
                Some(Action::ToggleHelp) => {
                    self.show_help = !self.show_help;
                }
                Some(_) if self.show_help => {
                    // Any other key closes the overlay
                    self.show_help = false;
                }
                Some(_) => {
                    self.catalog.handle_key_event(key_event).await?;
                }
                None => {}
            },

            Event::Mouse(mouse_event) => {
                if self.mouse_enabled && !self.show_help {
                    self.catalog.handle_mouse_event(mouse_event).await?;
                }
            }

            Event::Resize(width, height) => {
                self.size = Rect::new(0, 0, width, height);
                debug!("Terminal resized to {}x{}", width, height);
            }

            Event::Tick => {
                self.catalog.tick().await?;
            }

            Event::Catalog(update) => {
                self.catalog.apply_update(update);
            }
        }

        Ok(self.should_quit)
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        self.size = frame.size();
        frame.render_widget(Block::default().style(self.theme.base_style()), frame.size());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),   // Title
                Constraint::Min(1),      // Main content
                Constraint::Length(1),   // Status bar
            ])
            .split(frame.size());

        let title = Paragraph::new(format!("{} · Product Listing", version::full_version()))
            .alignment(Alignment::Center)
            .style(self.theme.title_style());
        frame.render_widget(title, chunks[0]);

        self.catalog.render(frame, chunks[1], &self.theme);

        self.render_status_bar(frame, chunks[2]);

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    /// Text for the status bar
    pub fn status_text(&self) -> String {
        if self.catalog.is_loading() {
            return format!("Loading catalog from {} | q to quit", self.catalog.source_description());
        }

        let window = self.catalog.window();
        if window.is_empty() {
            return "No products | q to quit".to_string();
        }

        let focused = self
            .catalog
            .focused_card()
            .map(|card| format!(" | {}: {}", card.product().display_name(), card.selected().label()))
            .unwrap_or_default();

        format!(
            "Page {} of {} | {} products{} | ? for help",
            window.current_page(),
            window.total_pages(),
            window.len(),
            focused
        )
    }

    /// Render the status bar
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status_paragraph = Paragraph::new(self.status_text()).style(self.theme.status_bar_style());
        frame.render_widget(status_paragraph, area);
    }

    /// Render help overlay
    fn render_help_overlay(&self, frame: &mut Frame) {
        let help_text = self.key_map.help_text();
        let height = help_text.lines().count() as u16 + 2;
        let help_area = layout::centered_rect(44, height, frame.size());

        let help_block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(self.theme.help_style());

        let help_paragraph = Paragraph::new(help_text)
            .block(help_block)
            .style(self.theme.text_style());

        frame.render_widget(Clear, help_area);
        frame.render_widget(help_paragraph, help_area);
    }
}
