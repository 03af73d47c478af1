use std::collections::HashMap;

use vitrine_engine::coords::Rect;

use super::{ElementKey, GeometryWatcher, ObserveOptions, RevealSet, ViewportWatcher, VisibilityEntry};

// ── ElementRef ────────────────────────────────────────────────────────────

/// An element as the controller sees it: a key and, once laid out, bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRef {
    pub key: ElementKey,
    /// Document-space bounds. `None` until the element is attached to a
    /// laid-out surface.
    pub bounds: Option<Rect>,
}

impl ElementRef {
    pub fn attached(key: impl Into<ElementKey>, bounds: Rect) -> Self {
        Self { key: key.into(), bounds: Some(bounds) }
    }

    pub fn detached(key: impl Into<ElementKey>) -> Self {
        Self { key: key.into(), bounds: None }
    }
}

// ── Subscription ──────────────────────────────────────────────────────────

/// Handle returned by [`RevealController::register`].
///
/// Not `Clone`: handing it back to [`RevealController::unregister`] consumes
/// it, so a subscription cannot be torn down twice.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
    key: ElementKey,
}

impl Subscription {
    pub fn key(&self) -> &ElementKey {
        &self.key
    }
}

#[derive(Debug)]
struct Registration {
    id: u64,
    options: ObserveOptions,
}

type RevealCallback = Box<dyn FnMut(&ElementKey)>;

// ── RevealController ──────────────────────────────────────────────────────

/// Decides which elements render in their revealed state.
///
/// One controller (and therefore one watcher) per section. Elements move
/// one way only, from unrevealed to revealed; nothing un-reveals them, and
/// unregistering an element leaves its revealed status untouched.
///
/// If the watcher reports itself unsupported the controller runs degraded:
/// every key reads as revealed so content never stays hidden.
///
/// # Example
/// ```
/// use vitrine_engine::coords::Rect;
/// use vitrine_ui::reveal::{ElementRef, ObserveOptions, RevealController};
///
/// let mut reveals = RevealController::new();
/// let card = ElementRef::attached("skills/cloud", Rect::new(0.0, 900.0, 400.0, 300.0));
/// let sub = reveals.register(&card, ObserveOptions::new(0.2)).unwrap();
///
/// reveals.poll(Rect::new(0.0, 0.0, 1280.0, 720.0));
/// assert!(!reveals.is_revealed(&card.key));
///
/// reveals.poll(Rect::new(0.0, 400.0, 1280.0, 720.0));
/// assert!(reveals.is_revealed(&card.key));
/// reveals.unregister(sub);
/// ```
pub struct RevealController {
    watcher: Box<dyn ViewportWatcher>,
    degraded: bool,
    active: HashMap<ElementKey, Registration>,
    revealed: RevealSet,
    next_id: u64,
    on_reveal: Option<RevealCallback>,
}

impl RevealController {
    /// Controller backed by a [`GeometryWatcher`].
    pub fn new() -> Self {
        Self::with_watcher(Box::new(GeometryWatcher::new()))
    }

    pub fn with_watcher(watcher: Box<dyn ViewportWatcher>) -> Self {
        let degraded = !watcher.is_supported();
        if degraded {
            log::warn!("viewport watcher unavailable; reveal controller renders everything revealed");
        }
        Self {
            watcher,
            degraded,
            active: HashMap::new(),
            revealed: RevealSet::new(),
            next_id: 0,
            on_reveal: None,
        }
    }

    /// Called once per newly revealed key, after it joins the set.
    pub fn on_reveal(mut self, f: impl FnMut(&ElementKey) + 'static) -> Self {
        self.on_reveal = Some(Box::new(f));
        self
    }

    #[inline]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Starts observing `element`.
    ///
    /// Returns `None` without side effects when the element has no bounds
    /// yet. Registering a key that is already observed replaces the previous
    /// registration; the old handle then becomes inert.
    pub fn register(&mut self, element: &ElementRef, options: ObserveOptions) -> Option<Subscription> {
        let Some(bounds) = element.bounds else {
            log::trace!("skipping {}: not attached", element.key);
            return None;
        };

        let id = self.next_id;
        self.next_id += 1;
        let key = element.key.clone();

        if self.active.insert(key.clone(), Registration { id, options }).is_some() {
            log::debug!("re-registering {key}");
        }

        if self.degraded {
            self.reveal_now(key.clone());
        } else {
            self.watcher.observe(key.clone(), bounds, options);
        }
        Some(Subscription { id, key })
    }

    /// Stops observing the subscription's element. Its revealed status is
    /// kept.
    pub fn unregister(&mut self, subscription: Subscription) {
        let current = self.active.get(&subscription.key).map(|r| r.id);
        if current != Some(subscription.id) {
            log::trace!("stale subscription for {} ignored", subscription.key);
            return;
        }
        self.active.remove(&subscription.key);
        self.watcher.unobserve(&subscription.key);
    }

    /// Whether `key` renders revealed. Always `true` in degraded mode.
    #[inline]
    pub fn is_revealed(&self, key: &ElementKey) -> bool {
        self.degraded || self.revealed.contains(key)
    }

    /// `true` when every key in `keys` is revealed (vacuously for none).
    pub fn all_revealed<'a>(&self, keys: impl IntoIterator<Item = &'a ElementKey>) -> bool {
        keys.into_iter().all(|k| self.is_revealed(k))
    }

    pub fn revealed(&self) -> &RevealSet {
        &self.revealed
    }

    /// Number of elements under active observation.
    pub fn observed(&self) -> usize {
        self.active.len()
    }

    /// Applies one batch of visibility entries.
    ///
    /// Only the keys present in the batch are examined. Entries for keys
    /// that are not registered (or no longer registered) are ignored.
    /// Returns the keys revealed by this batch, in batch order.
    pub fn process(&mut self, batch: &[VisibilityEntry]) -> Vec<ElementKey> {
        let mut newly = Vec::new();
        for entry in batch {
            let Some(reg) = self.active.get(&entry.key) else {
                continue;
            };
            if self.revealed.contains(&entry.key) {
                continue;
            }
            if reg.options.is_met(entry.is_intersecting, entry.fraction) {
                log::debug!(
                    "reveal {} at {:.2} (threshold {:.2})",
                    entry.key,
                    entry.fraction,
                    reg.options.threshold
                );
                if self.insert(entry.key.clone()) {
                    newly.push(entry.key.clone());
                }
            }
        }
        newly
    }

    /// Takes a batch from the watcher for `viewport` and processes it.
    pub fn poll(&mut self, viewport: Rect) -> Vec<ElementKey> {
        if self.degraded || self.active.is_empty() {
            return Vec::new();
        }
        let batch = self.watcher.take_batch(viewport);
        if batch.is_empty() {
            return Vec::new();
        }
        self.process(&batch)
    }

    /// Reveals `key` unconditionally (content that shows on mount).
    /// Returns `true` if it was not revealed before.
    pub fn reveal_now(&mut self, key: ElementKey) -> bool {
        self.insert(key)
    }

    /// Updates the bounds of an observed element after a relayout.
    pub fn relayout(&mut self, key: &ElementKey, bounds: Rect) {
        if self.active.contains_key(key) {
            self.watcher.update_bounds(key, bounds);
        }
    }

    fn insert(&mut self, key: ElementKey) -> bool {
        if !self.revealed.insert(key.clone()) {
            return false;
        }
        if let Some(f) = &mut self.on_reveal {
            f(&key);
        }
        true
    }
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::reveal::UnavailableWatcher;

    fn key(s: &str) -> ElementKey {
        ElementKey::new(s)
    }

    fn element(s: &str) -> ElementRef {
        ElementRef::attached(s, Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn detached_element_is_a_no_op() {
        let mut c = RevealController::new();
        assert!(c.register(&ElementRef::detached("x"), ObserveOptions::new(0.2)).is_none());
        assert_eq!(c.observed(), 0);
        assert!(!c.is_revealed(&key("x")));
    }

    #[test]
    fn threshold_boundary() {
        let mut c = RevealController::new();
        c.register(&element("e"), ObserveOptions::new(0.2)).unwrap();
        c.process(&[VisibilityEntry::new("e", 0.19)]);
        assert!(!c.is_revealed(&key("e")));
        c.process(&[VisibilityEntry::new("e", 0.2)]);
        assert!(c.is_revealed(&key("e")));
    }

    #[test]
    fn revealed_stays_revealed() {
        let mut c = RevealController::new();
        c.register(&element("e"), ObserveOptions::new(0.2)).unwrap();
        c.process(&[VisibilityEntry::new("e", 0.5)]);
        c.process(&[VisibilityEntry::new("e", 0.0)]);
        assert!(c.is_revealed(&key("e")));
    }

    #[test]
    fn scenario_three_cards() {
        let mut c = RevealController::new();
        let _s0 = c.register(&element("e0"), ObserveOptions::new(0.2)).unwrap();
        let _s1 = c.register(&element("e1"), ObserveOptions::new(0.2)).unwrap();
        let _s2 = c.register(&element("e2"), ObserveOptions::new(0.3)).unwrap();

        let newly = c.process(&[
            VisibilityEntry::new("e0", 0.25),
            VisibilityEntry::new("e1", 0.1),
            VisibilityEntry::new("e2", 0.3),
        ]);
        assert_eq!(newly, vec![key("e0"), key("e2")]);
        assert!(!c.is_revealed(&key("e1")));

        let newly = c.process(&[
            VisibilityEntry::new("e0", 0.0),
            VisibilityEntry::new("e1", 0.25),
            VisibilityEntry::new("e2", 0.0),
        ]);
        assert_eq!(newly, vec![key("e1")]);
        assert_eq!(c.revealed().len(), 3);
    }

    #[test]
    fn unregistered_element_ignores_later_events() {
        let mut c = RevealController::new();
        let sub = c.register(&element("e"), ObserveOptions::new(0.2)).unwrap();
        c.unregister(sub);
        c.process(&[VisibilityEntry::new("e", 1.0)]);
        assert!(!c.is_revealed(&key("e")));
    }

    #[test]
    fn unregister_keeps_revealed_status() {
        let mut c = RevealController::new();
        let sub = c.register(&element("e"), ObserveOptions::new(0.2)).unwrap();
        c.process(&[VisibilityEntry::new("e", 0.9)]);
        c.unregister(sub);
        assert!(c.is_revealed(&key("e")));
        assert_eq!(c.observed(), 0);
    }

    #[test]
    fn stale_handle_does_not_cancel_replacement() {
        let mut c = RevealController::new();
        let old = c.register(&element("e"), ObserveOptions::new(0.2)).unwrap();
        let _new = c.register(&element("e"), ObserveOptions::new(0.5)).unwrap();
        c.unregister(old);
        assert_eq!(c.observed(), 1);
        c.process(&[VisibilityEntry::new("e", 0.3)]);
        assert!(!c.is_revealed(&key("e")));
    }

    #[test]
    fn callback_fires_once_per_key() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut c = RevealController::new().on_reveal(move |k| sink.borrow_mut().push(k.clone()));
        c.register(&element("e"), ObserveOptions::new(0.1)).unwrap();
        c.process(&[VisibilityEntry::new("e", 0.5)]);
        c.process(&[VisibilityEntry::new("e", 0.9)]);
        assert_eq!(*seen.borrow(), vec![key("e")]);
    }

    #[test]
    fn degraded_controller_reveals_everything() {
        let mut c = RevealController::with_watcher(Box::new(UnavailableWatcher));
        assert!(c.is_degraded());
        assert!(c.is_revealed(&key("never-registered")));
        let sub = c.register(&element("e"), ObserveOptions::new(1.0)).unwrap();
        assert!(c.revealed().contains(&key("e")));
        c.unregister(sub);
    }

    #[test]
    fn poll_uses_the_watcher() {
        let mut c = RevealController::new();
        let card = ElementRef::attached("card", Rect::new(0.0, 1000.0, 200.0, 200.0));
        c.register(&card, ObserveOptions::new(0.25)).unwrap();
        assert!(c.poll(Rect::new(0.0, 0.0, 800.0, 600.0)).is_empty());
        assert_eq!(c.poll(Rect::new(0.0, 500.0, 800.0, 600.0)), vec![key("card")]);
    }

    #[test]
    fn relayout_moves_the_target() {
        let mut c = RevealController::new();
        let card = ElementRef::attached("card", Rect::new(0.0, 5000.0, 200.0, 200.0));
        c.register(&card, ObserveOptions::new(0.25)).unwrap();
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        c.poll(viewport);
        c.relayout(&card.key, Rect::new(0.0, 100.0, 200.0, 200.0));
        assert_eq!(c.poll(viewport), vec![key("card")]);
    }
}
