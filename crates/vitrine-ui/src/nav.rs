use vitrine_engine::coords::Viewport;

use crate::content::{NavContent, NavLink};
use crate::layout::{Breakpoint, PageLayout};

/// Height of the fixed navigation bar.
pub const NAV_HEIGHT: f32 = 64.0;

/// Scroll offset past which the bar switches to its opaque "scrolled" style.
pub const SCROLLED_AFTER: f32 = 100.0;

/// Snapshot of the navigation bar for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    pub scrolled: bool,
    /// Links are collapsed behind a menu toggle.
    pub compact: bool,
    pub menu_open: bool,
}

/// The fixed navigation bar: brand, section links and the call to action.
#[derive(Debug, Clone)]
pub struct Navigation {
    content: NavContent,
    state: NavState,
}

impl Navigation {
    pub fn new(content: NavContent, viewport: Viewport) -> Self {
        let mut nav = Self { content, state: NavState::default() };
        nav.resize(viewport);
        nav
    }

    pub fn brand(&self) -> &str {
        &self.content.brand
    }

    pub fn links(&self) -> &[NavLink] {
        &self.content.links
    }

    pub fn cta(&self) -> Option<&str> {
        self.content.cta.as_deref()
    }

    #[inline]
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Tracks the scrolled style. Returns `true` if it changed.
    pub fn scroll(&mut self, scroll_y: f32) -> bool {
        let scrolled = scroll_y > SCROLLED_AFTER;
        let changed = scrolled != self.state.scrolled;
        self.state.scrolled = scrolled;
        changed
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.state.compact = Breakpoint::for_width(viewport.width) < Breakpoint::Lg;
        if !self.state.compact {
            self.state.menu_open = false;
        }
    }

    /// Opens or closes the compact menu. Ignored when the bar is not compact.
    pub fn toggle_menu(&mut self) -> bool {
        if !self.state.compact {
            log::trace!("menu toggle ignored: navigation is not compact");
            return false;
        }
        self.state.menu_open = !self.state.menu_open;
        true
    }

    pub fn close_menu(&mut self) {
        self.state.menu_open = false;
    }

    /// Scroll offset for the section `target`, clamped to the scrollable
    /// range. Closes the menu either way.
    pub fn resolve(&mut self, target: &str, layout: &PageLayout) -> Option<f32> {
        self.close_menu();
        let Some(section) = layout.section(target) else {
            log::warn!("navigation target `{target}` is not a section");
            return None;
        };
        Some(section.anchor().clamp(0.0, layout.max_scroll()))
    }
}
