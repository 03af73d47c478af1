//! Geometry types shared by layout, reveal tracking and the studio.
//!
//! Canonical space:
//! - Logical pixels
//! - Origin at the top-left corner of the document
//! - +X right, +Y down
//!
//! Element bounds live in document space. The visible region is the
//! viewport rectangle translated by the current scroll offset.

mod insets;
mod rect;
mod vec2;
mod viewport;

pub use insets::Insets;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
