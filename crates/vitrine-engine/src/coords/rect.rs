use super::{Insets, Vec2};

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn area(self) -> f32 {
        self.size.x.max(0.0) * self.size.y.max(0.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (mut x, mut w) = (self.origin.x, self.size.x);
        let (mut y, mut h) = (self.origin.y, self.size.y);
        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }
        Rect::new(x, y, w, h)
    }

    #[inline]
    #[must_use]
    pub fn translate(self, by: Vec2) -> Self {
        Rect::from_origin_size(self.origin + by, self.size)
    }

    /// Moves every edge outward by `insets` (inward for negative values).
    ///
    /// Shrinking past zero collapses the rectangle to zero size instead of
    /// producing a negative extent.
    #[inline]
    #[must_use]
    pub fn outset(self, insets: Insets) -> Self {
        let x = self.origin.x - insets.left;
        let y = self.origin.y - insets.top;
        let w = (self.size.x + insets.h()).max(0.0);
        let h = (self.size.y + insets.v()).max(0.0);
        Rect::new(x, y, w, h)
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = a.max().x.min(b.max().x);
        let y1 = a.max().y.min(b.max().y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

    /// Fraction of this rectangle's area that lies inside `root`, in `[0, 1]`.
    ///
    /// A zero-area rectangle has no area to measure; it reports `1.0` when
    /// it touches `root` (edges inclusive) and `0.0` otherwise.
    pub fn visible_fraction(self, root: Rect) -> f32 {
        let me = self.normalized();
        if me.is_empty() {
            let root = root.normalized();
            let touches = me.origin.x <= root.max().x
                && me.max().x >= root.origin.x
                && me.origin.y <= root.max().y
                && me.max().y >= root.origin.y;
            return if touches && !root.is_empty() { 1.0 } else { 0.0 };
        }
        match me.intersect(root) {
            Some(overlap) => (overlap.area() / me.area()).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}
