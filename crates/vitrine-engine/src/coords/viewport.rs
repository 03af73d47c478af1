use super::{Rect, Vec2};

/// Viewport size in logical pixels.
///
/// The viewport is the window onto the document. Combined with a scroll
/// offset it yields the document-space rectangle that is currently visible.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Document-space rectangle visible at vertical scroll offset `scroll_y`.
    #[inline]
    pub fn visible_rect(self, scroll_y: f32) -> Rect {
        Rect::new(0.0, scroll_y, self.width, self.height)
    }

    /// Largest scroll offset that still keeps the viewport inside a document
    /// of height `document_h`.
    #[inline]
    pub fn max_scroll(self, document_h: f32) -> f32 {
        (document_h - self.height).max(0.0)
    }
}
