use std::time::Duration;

use vitrine_engine::coords::{Vec2, Viewport};
use vitrine_engine::time::FrameTime;

use crate::content::Portfolio;
use crate::event::{EventResult, PageEvent};
use crate::layout::PageLayout;
use crate::links::Outbound;
use crate::nav::{NavState, Navigation};
use crate::reveal::{ElementKey, WatcherKind};
use crate::section::{ElementView, Section};

// ── Frame ─────────────────────────────────────────────────────────────────

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: Duration,
    pub scroll_y: f32,
    pub viewport: Viewport,
    pub nav: NavState,
    /// Element views in screen space (document position minus scroll).
    pub elements: Vec<ElementView>,
    /// Keys revealed during this frame, section by section.
    pub revealed: Vec<ElementKey>,
    /// Caret state of every section that has one, keyed by section.
    pub carets: Vec<(ElementKey, bool)>,
}

impl Frame {
    pub fn element(&self, key: &str) -> Option<&ElementView> {
        self.elements.iter().find(|v| v.key.as_str() == key)
    }
}

// ── Page ──────────────────────────────────────────────────────────────────

/// A whole one-page site: navigation over a column of sections.
///
/// ```
/// use vitrine_engine::coords::Viewport;
/// use vitrine_engine::time::FrameTime;
/// use vitrine_ui::prelude::*;
///
/// let portfolio = Portfolio::from_source(r#"
///     Page { Section "about" { reveal: section body: "Hello" } }
/// "#).unwrap();
/// let mut page = Page::new(portfolio, Viewport::new(1280.0, 720.0));
/// page.mount(std::time::Duration::ZERO);
///
/// let frame = page.frame(&FrameTime::at(std::time::Duration::from_millis(16)));
/// assert_eq!(frame.revealed.len(), 1);
/// ```
pub struct Page {
    title: String,
    nav: Navigation,
    sections: Vec<Section>,
    layout: PageLayout,
    viewport: Viewport,
    scroll_y: f32,
}

impl Page {
    pub fn new(portfolio: Portfolio, viewport: Viewport) -> Self {
        Self::with_watcher(portfolio, viewport, WatcherKind::default())
    }

    pub fn with_watcher(portfolio: Portfolio, viewport: Viewport, watcher: WatcherKind) -> Self {
        let viewport = if viewport.is_valid() {
            viewport
        } else {
            log::warn!("invalid viewport {viewport:?}; using 1280x720");
            Viewport::new(1280.0, 720.0)
        };
        let layout = PageLayout::for_portfolio(&portfolio, viewport);
        let Portfolio { title, nav, sections } = portfolio;
        Self {
            title,
            nav: Navigation::new(nav, viewport),
            sections: sections.into_iter().map(|c| Section::new(c, watcher)).collect(),
            layout,
            viewport,
            scroll_y: 0.0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id() == id)
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    #[inline]
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn max_scroll(&self) -> f32 {
        self.layout.max_scroll()
    }

    /// Mounts every section against the current layout.
    pub fn mount(&mut self, now: Duration) {
        for (section, layout) in self.sections.iter_mut().zip(&self.layout.sections) {
            section.mount(layout, now);
        }
    }

    /// Unmounts every section. Subscriptions are released before the
    /// sections drop their layout.
    pub fn unmount(&mut self) {
        for section in &mut self.sections {
            section.unmount();
        }
    }

    /// Applies one input event. Outbound effects go to `outbound`.
    pub fn handle(&mut self, event: PageEvent, outbound: &mut dyn Outbound) -> EventResult {
        match event {
            PageEvent::Scroll { delta } => self.scroll_to(self.scroll_y + delta),
            PageEvent::ScrollTo { y } => self.scroll_to(y),
            PageEvent::Resize { viewport } => self.resize(viewport),
            PageEvent::Navigate { target } => match self.nav.resolve(&target, &self.layout) {
                Some(y) => {
                    log::debug!("navigate to {target} at {y:.0}");
                    self.scroll_to(y)
                }
                None => EventResult::Ignored,
            },
            PageEvent::ToggleMenu => {
                if self.nav.toggle_menu() { EventResult::Consumed } else { EventResult::Ignored }
            }
            PageEvent::OpenLink { section, item, index } => {
                let Some(content) = self.section(&section).map(Section::content) else {
                    log::warn!("open link: unknown section `{section}`");
                    return EventResult::Ignored;
                };
                let links = match &item {
                    Some(key) => content.items.iter().find(|i| &i.key == key).map(|i| &i.links),
                    None => Some(&content.links),
                };
                match links.and_then(|l| l.get(index)) {
                    Some(link) => {
                        outbound.open(&link.target);
                        EventResult::Consumed
                    }
                    None => {
                        log::warn!("open link: no link {index} in {section}/{}", item.as_deref().unwrap_or("-"));
                        EventResult::Ignored
                    }
                }
            }
            PageEvent::Action { section, index } => {
                match self.section(&section).and_then(|s| s.content().actions.get(index)) {
                    Some(action) => {
                        outbound.alert(&action.notice);
                        EventResult::Consumed
                    }
                    None => {
                        log::warn!("no action {index} in section `{section}`");
                        EventResult::Ignored
                    }
                }
            }
        }
    }

    fn scroll_to(&mut self, y: f32) -> EventResult {
        let y = if y.is_finite() { y.clamp(0.0, self.max_scroll()) } else { self.scroll_y };
        self.scroll_y = y;
        self.nav.scroll(y);
        EventResult::Consumed
    }

    fn resize(&mut self, viewport: Viewport) -> EventResult {
        if !viewport.is_valid() {
            log::warn!("ignoring resize to {viewport:?}");
            return EventResult::Ignored;
        }
        self.viewport = viewport;
        self.layout = PageLayout::compute(self.sections.iter().map(Section::content), viewport);
        for (section, layout) in self.sections.iter_mut().zip(&self.layout.sections) {
            section.relayout(layout);
        }
        self.nav.resize(viewport);
        self.scroll_to(self.scroll_y)
    }

    /// Polls every section at the current scroll position and collects the
    /// views to draw.
    pub fn frame(&mut self, time: &FrameTime) -> Frame {
        let now = time.elapsed;
        let visible = self.viewport.visible_rect(self.scroll_y);
        let mut revealed = Vec::new();
        let mut elements = Vec::new();
        let mut carets = Vec::new();
        let shift = -Vec2::down(self.scroll_y);

        for section in &mut self.sections {
            revealed.extend(section.scroll(visible, now));
            elements.extend(section.present(now).into_iter().map(|mut view| {
                view.rect = view.rect.translate(shift);
                view
            }));
            if let Some(lit) = section.caret(now) {
                carets.push((section.content().key(), lit));
            }
        }

        Frame {
            time: now,
            scroll_y: self.scroll_y,
            viewport: self.viewport,
            nav: self.nav.state(),
            elements,
            revealed,
            carets,
        }
    }
}
