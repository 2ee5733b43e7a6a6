//! Page navigation widgets: the arrows either side of the product grid and
//! the row of page dots beneath it.
//!
//! Both widgets only draw and hit-test; the page window they reflect is owned
//! by the catalog page.

use super::{Component, ComponentState};
use crate::catalog::PageWindow;
use crate::tui::{styles::Theme, utils::layout, Frame};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Dot drawn for the current page
pub const CURRENT_DOT: &str = "●";
/// Dot drawn for every other page
pub const OTHER_DOT: &str = "○";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

impl NavDirection {
    fn arrow(self) -> &'static str {
        match self {
            NavDirection::Previous => "←",
            NavDirection::Next => "→",
        }
    }
}

/// Arrow button that moves one page
#[derive(Debug, Clone)]
pub struct NavButton {
    direction: NavDirection,
    state: ComponentState,
    /// Clickable cell range, set on render
    hit_area: Rect,
}

impl NavButton {
    pub fn new(direction: NavDirection) -> Self {
        Self {
            direction,
            state: ComponentState::new(),
            hit_area: Rect::default(),
        }
    }

    /// Sync the enabled flag with the window before drawing
    pub fn update(&mut self, window: &PageWindow) {
        self.state.is_enabled = match self.direction {
            NavDirection::Previous => window.can_previous(),
            NavDirection::Next => window.can_next(),
        };
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled
    }

    /// Cells the button occupied when last drawn
    pub fn hit_area(&self) -> Rect {
        self.hit_area
    }

    /// Whether a click at this cell presses the button. Disabled buttons
    /// never register clicks.
    pub fn is_hit(&self, column: u16, row: u16) -> bool {
        self.state.is_enabled && layout::contains(self.hit_area, column, row)
    }
}

impl Component for NavButton {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.state.size = area;
        if area.width == 0 || area.height == 0 {
            self.hit_area = Rect::default();
            return;
        }

        // Three cells wide, vertically centered
        let button = layout::centered_rect(3, 1, area);
        self.hit_area = button;

        let paragraph = Paragraph::new(self.direction.arrow())
            .alignment(Alignment::Center)
            .style(theme.nav_style(self.state.is_enabled));
        frame.render_widget(paragraph, button);
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn set_size(&mut self, size: Rect) {
        self.state.size = size;
    }
}

/// One dot per page, the current page filled in
#[derive(Debug, Clone, Default)]
pub struct PageDots {
    total_pages: usize,
    current_page: usize,
    state: ComponentState,
    dot_areas: Vec<Rect>,
}

impl PageDots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, window: &PageWindow) {
        self.total_pages = window.total_pages();
        self.current_page = window.current_page();
    }

    /// 0-based page whose dot sits at this cell
    pub fn page_at(&self, column: u16, row: u16) -> Option<usize> {
        self.dot_areas
            .iter()
            .position(|area| layout::contains(*area, column, row))
    }
}

impl Component for PageDots {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.state.size = area;
        self.dot_areas.clear();
        if self.total_pages == 0 || area.height == 0 {
            return;
        }

        // Each dot takes one cell with a gap after it
        let needed = (self.total_pages * 2 - 1) as u16;
        let start_x = area.x + area.width.saturating_sub(needed) / 2;

        let mut spans = Vec::with_capacity(self.total_pages * 2);
        for page in 0..self.total_pages {
            let x = start_x + (page * 2) as u16;
            if x >= area.x + area.width {
                break;
            }
            self.dot_areas.push(Rect::new(x, area.y, 1, 1));

            let current = page + 1 == self.current_page;
            let dot = if current { CURRENT_DOT } else { OTHER_DOT };
            if page > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(dot, theme.dot_style(current)));
        }

        let row = Rect::new(start_x, area.y, area.width - (start_x - area.x), 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row);
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn set_size(&mut self, size: Rect) {
        self.state.size = size;
    }
}
