//! Scroll-triggered reveal tracking.
//!
//! Each section owns one [`RevealController`]. The controller registers the
//! section's elements with a [`ViewportWatcher`], feeds the watcher's
//! batched [`VisibilityEntry`] reports through per-element thresholds, and
//! records one-shot reveals in a grow-only [`RevealSet`].
//!
//! ```text
//!   scroll ──▶ watcher.take_batch(viewport) ──▶ controller.process(batch)
//!                                                   │
//!                                     threshold met │ first time
//!                                                   ▼
//!                                        RevealSet ∪ {key}  ──▶ on_reveal
//! ```

mod controller;
mod key;
mod margin;
mod options;
mod set;
mod watcher;

pub use controller::{ElementRef, RevealController, Subscription};
pub use key::ElementKey;
pub use margin::{Length, MarginError, RootMargin};
pub use options::{ObserveOptions, VisibilityEntry};
pub use set::RevealSet;
pub use watcher::{GeometryWatcher, UnavailableWatcher, ViewportWatcher, WatcherKind};
