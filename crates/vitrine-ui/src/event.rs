use vitrine_engine::coords::Viewport;

/// Input routed to a [`Page`](crate::page::Page).
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Wheel or trackpad scroll. `delta` > 0 scrolls down.
    Scroll { delta: f32 },
    /// Jump to an absolute document offset.
    ScrollTo { y: f32 },
    Resize { viewport: Viewport },
    /// A navigation link or button pointing at a section id.
    Navigate { target: String },
    /// The compact menu button.
    ToggleMenu,
    /// Outbound link `index` of an item (`item` = item key) or of the
    /// section itself (`item` = `None`).
    OpenLink { section: String, item: Option<String>, index: usize },
    /// Placeholder button `index` of a section.
    Action { section: String, index: usize },
}

impl PageEvent {
    /// "Back to top".
    pub fn back_to_top() -> Self {
        PageEvent::ScrollTo { y: 0.0 }
    }
}

/// Result of [`Page::handle`](crate::page::Page::handle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    /// Nothing matched the event (unknown section, link, or action).
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
