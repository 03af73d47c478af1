use super::{ElementKey, RootMargin};

/// Per-element observation parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ObserveOptions {
    /// Minimum visible-area fraction that reveals the element, in `[0, 1]`.
    pub threshold: f32,
    pub root_margin: RootMargin,
}

impl ObserveOptions {
    /// Options with `threshold` clamped into `[0, 1]` and no root margin.
    ///
    /// A NaN threshold is treated as 0 (any intersection reveals).
    pub fn new(threshold: f32) -> Self {
        let clamped = if threshold.is_nan() { 0.0 } else { threshold.clamp(0.0, 1.0) };
        if clamped != threshold {
            log::warn!("reveal threshold {threshold} outside [0, 1]; using {clamped}");
        }
        Self { threshold: clamped, root_margin: RootMargin::ZERO }
    }

    pub fn root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    /// Whether a fraction of `fraction` (while intersecting) satisfies the threshold.
    #[inline]
    pub fn is_met(&self, is_intersecting: bool, fraction: f32) -> bool {
        is_intersecting && fraction >= self.threshold
    }
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// One element's visibility at the moment a batch was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry {
    pub key: ElementKey,
    /// Fraction of the element's area inside the (margin-adjusted) viewport.
    pub fraction: f32,
    /// Whether the element touches the viewport at all. Distinguishes "just
    /// touching" from "nowhere near" when the threshold is 0.
    pub is_intersecting: bool,
}

impl VisibilityEntry {
    /// Entry whose intersection flag is derived from the fraction.
    pub fn new(key: impl Into<ElementKey>, fraction: f32) -> Self {
        Self { key: key.into(), fraction, is_intersecting: fraction > 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_clamped() {
        assert_eq!(ObserveOptions::new(1.5).threshold, 1.0);
        assert_eq!(ObserveOptions::new(-0.2).threshold, 0.0);
        assert_eq!(ObserveOptions::new(f32::NAN).threshold, 0.0);
    }

    #[test]
    fn zero_threshold_still_needs_an_intersection() {
        let opts = ObserveOptions::new(0.0);
        assert!(!opts.is_met(false, 0.0));
        assert!(opts.is_met(true, 0.0));
    }

    #[test]
    fn boundary_is_inclusive() {
        let opts = ObserveOptions::new(0.2);
        assert!(!opts.is_met(true, 0.19));
        assert!(opts.is_met(true, 0.2));
    }
}
