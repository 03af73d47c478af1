//! Vitrine UI: a one-page portfolio site as a headless runtime.
//!
//! Content comes from a `.vpage` document ([`content`]), is laid out for a
//! viewport ([`layout`]) and split into [`section`]s. Each section reveals
//! its elements once they scroll far enough into view ([`reveal`]) and
//! eases them from a hidden pose into place ([`transition`]).
//!
//! # Quick start
//!
//! ```rust,ignore
//! use vitrine_ui::prelude::*;
//!
//! let portfolio = Portfolio::from_source(include_str!("portfolio.vpage"))?;
//! let mut page = Page::new(portfolio, Viewport::new(1280.0, 720.0));
//! page.mount(Duration::ZERO);
//!
//! // Per input event:
//! page.handle(PageEvent::Scroll { delta: 120.0 }, &mut LogOutbound);
//!
//! // Per frame:
//! let frame = page.frame(&clock.tick());
//! for view in &frame.elements {
//!     // Draw view.rect with view.presentation applied.
//! }
//! ```
//!
//! # Custom hosts
//!
//! Implement [`reveal::ViewportWatcher`] to feed intersections from another
//! source, and [`links::Outbound`] to open links for real.

pub mod content;
pub mod event;
pub mod layout;
pub mod links;
pub mod nav;
pub mod page;
pub mod reveal;
pub mod section;
pub mod transition;

pub use page::{Frame, Page};

/// The common imports for driving a page.
pub mod prelude {
    pub use crate::content::{LoadError, Portfolio};
    pub use crate::event::{EventResult, PageEvent};
    pub use crate::layout::PageLayout;
    pub use crate::links::{LinkTarget, LogOutbound, Outbound};
    pub use crate::nav::NavState;
    pub use crate::page::{Frame, Page};
    pub use crate::reveal::{ElementKey, ObserveOptions, RevealController, RootMargin, WatcherKind};
    pub use crate::section::{ElementView, RevealState};
    pub use crate::transition::Presentation;

    pub use vitrine_engine::coords::{Rect, Vec2, Viewport};
    pub use vitrine_engine::time::{FrameClock, FrameTime};
}
