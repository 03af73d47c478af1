use std::collections::BTreeMap;

use vitrine_engine::coords::Rect;

use super::{ElementKey, ObserveOptions, VisibilityEntry};

// ── ViewportWatcher ───────────────────────────────────────────────────────

/// The host primitive that reports element/viewport intersections.
///
/// A watcher batches its reports: [`take_batch`](Self::take_batch) returns
/// entries only for elements whose threshold state changed since the last
/// batch, so consumers never walk the full registered set on a scroll.
///
/// Implement this to plug in a different host (a browser binding, a
/// recorded trace). [`GeometryWatcher`] computes intersections from layout
/// bounds; [`UnavailableWatcher`] stands in for a host without the
/// primitive.
pub trait ViewportWatcher {
    /// `false` if the host cannot report intersections at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Starts watching `key` with document-space `bounds`. Re-observing a key
    /// replaces its bounds and options and forces a fresh report.
    fn observe(&mut self, key: ElementKey, bounds: Rect, options: ObserveOptions);

    /// Stops watching `key`. Unknown keys are ignored.
    fn unobserve(&mut self, key: &ElementKey);

    /// Moves a watched element after a relayout.
    fn update_bounds(&mut self, key: &ElementKey, bounds: Rect);

    /// Reports state changes for the document-space viewport rectangle.
    fn take_batch(&mut self, viewport: Rect) -> Vec<VisibilityEntry>;

    /// Number of elements currently watched.
    fn watched(&self) -> usize;
}

// ── GeometryWatcher ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Target {
    bounds: Rect,
    options: ObserveOptions,
    /// Threshold state at the previous batch; `None` until first reported.
    last_met: Option<bool>,
}

/// Intersection watcher driven by cached layout bounds.
///
/// Bounds are supplied at observe time and on relayout; scrolling only moves
/// the viewport rectangle, so a batch costs one rectangle intersection per
/// watched element and no layout work.
#[derive(Debug, Default)]
pub struct GeometryWatcher {
    targets: BTreeMap<ElementKey, Target>,
}

impl GeometryWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visibility of `bounds` against `viewport` adjusted by `options`.
    pub fn measure(bounds: Rect, viewport: Rect, options: &ObserveOptions) -> (f32, bool) {
        let root = options.root_margin.apply(viewport);
        if root.is_empty() {
            return (0.0, false);
        }
        let fraction = bounds.visible_fraction(root);
        (fraction, fraction > 0.0)
    }
}

impl ViewportWatcher for GeometryWatcher {
    fn observe(&mut self, key: ElementKey, bounds: Rect, options: ObserveOptions) {
        self.targets.insert(key, Target { bounds, options, last_met: None });
    }

    fn unobserve(&mut self, key: &ElementKey) {
        self.targets.remove(key);
    }

    fn update_bounds(&mut self, key: &ElementKey, bounds: Rect) {
        if let Some(target) = self.targets.get_mut(key) {
            target.bounds = bounds;
        }
    }

    fn take_batch(&mut self, viewport: Rect) -> Vec<VisibilityEntry> {
        let mut batch = Vec::new();
        for (key, target) in self.targets.iter_mut() {
            let (fraction, is_intersecting) = Self::measure(target.bounds, viewport, &target.options);
            let met = target.options.is_met(is_intersecting, fraction);
            if target.last_met != Some(met) {
                target.last_met = Some(met);
                batch.push(VisibilityEntry { key: key.clone(), fraction, is_intersecting });
            }
        }
        batch
    }

    fn watched(&self) -> usize {
        self.targets.len()
    }
}

// ── UnavailableWatcher ────────────────────────────────────────────────────

/// A host without intersection reporting. Controllers built on it render
/// everything revealed.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableWatcher;

impl ViewportWatcher for UnavailableWatcher {
    fn is_supported(&self) -> bool {
        false
    }

    fn observe(&mut self, _key: ElementKey, _bounds: Rect, _options: ObserveOptions) {}

    fn unobserve(&mut self, _key: &ElementKey) {}

    fn update_bounds(&mut self, _key: &ElementKey, _bounds: Rect) {}

    fn take_batch(&mut self, _viewport: Rect) -> Vec<VisibilityEntry> {
        Vec::new()
    }

    fn watched(&self) -> usize {
        0
    }
}

// ── WatcherKind ───────────────────────────────────────────────────────────

/// Which watcher each section should be built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WatcherKind {
    #[default]
    Geometry,
    Unavailable,
}

impl WatcherKind {
    pub fn build(self) -> Box<dyn ViewportWatcher> {
        match self {
            WatcherKind::Geometry => Box::new(GeometryWatcher::new()),
            WatcherKind::Unavailable => Box::new(UnavailableWatcher),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RootMargin;

    fn viewport_at(y: f32) -> Rect {
        Rect::new(0.0, y, 1000.0, 500.0)
    }

    #[test]
    fn first_batch_reports_every_target() {
        let mut w = GeometryWatcher::new();
        w.observe("a".into(), Rect::new(0.0, 100.0, 100.0, 100.0), ObserveOptions::new(0.2));
        w.observe("b".into(), Rect::new(0.0, 2000.0, 100.0, 100.0), ObserveOptions::new(0.2));
        let batch = w.take_batch(viewport_at(0.0));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].fraction, 1.0);
        assert!(!batch[1].is_intersecting);
    }

    #[test]
    fn unchanged_state_is_not_reported_again() {
        let mut w = GeometryWatcher::new();
        w.observe("a".into(), Rect::new(0.0, 100.0, 100.0, 100.0), ObserveOptions::new(0.2));
        w.take_batch(viewport_at(0.0));
        // Still fully visible after a small scroll.
        assert!(w.take_batch(viewport_at(10.0)).is_empty());
    }

    #[test]
    fn crossing_into_view_is_reported() {
        let mut w = GeometryWatcher::new();
        w.observe("a".into(), Rect::new(0.0, 600.0, 100.0, 100.0), ObserveOptions::new(0.5));
        assert_eq!(w.take_batch(viewport_at(0.0)).len(), 1);
        // 60% of the element is now inside [150, 650).
        let batch = w.take_batch(viewport_at(150.0));
        assert_eq!(batch.len(), 1);
        assert!((batch[0].fraction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn root_margin_delays_the_crossing() {
        let margin = RootMargin::bottom_px(-100.0);
        let opts = ObserveOptions::new(0.2).root_margin(margin);
        let bounds = Rect::new(0.0, 450.0, 100.0, 100.0);
        // Without margin it would be half visible; the shrunk root ends at 400.
        let (fraction, hit) = GeometryWatcher::measure(bounds, viewport_at(0.0), &opts);
        assert_eq!(fraction, 0.0);
        assert!(!hit);
    }

    #[test]
    fn unobserved_targets_leave_the_batch() {
        let mut w = GeometryWatcher::new();
        let key = ElementKey::new("a");
        w.observe(key.clone(), Rect::new(0.0, 0.0, 10.0, 10.0), ObserveOptions::new(0.1));
        w.unobserve(&key);
        assert_eq!(w.watched(), 0);
        assert!(w.take_batch(viewport_at(0.0)).is_empty());
    }

    #[test]
    fn unavailable_watcher_reports_nothing() {
        let mut w = UnavailableWatcher;
        assert!(!w.is_supported());
        w.observe("a".into(), Rect::new(0.0, 0.0, 10.0, 10.0), ObserveOptions::new(0.0));
        assert!(w.take_batch(viewport_at(0.0)).is_empty());
    }
}
