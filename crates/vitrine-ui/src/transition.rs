use std::time::Duration;

use vitrine_engine::coords::Vec2;

// ── Entrance ──────────────────────────────────────────────────────────────

/// How an element looks before it is revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Entrance {
    /// Faded out and pushed down; rises into place.
    #[default]
    Rise,
    /// Faded out and pushed sideways. Even items come from the left, odd
    /// items from the right.
    Slide,
    /// Opacity only.
    Fade,
    /// Faded out and scaled down to 90%.
    Zoom,
}

impl Entrance {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "rise" => Entrance::Rise,
            "slide" => Entrance::Slide,
            "fade" => Entrance::Fade,
            "zoom" => Entrance::Zoom,
            _ => return None,
        })
    }

    /// The hidden pose for the `index`-th element of a section.
    pub fn hidden(self, offset: f32, index: usize) -> Presentation {
        let (offset, scale) = match self {
            Entrance::Rise => (Vec2::down(offset), 1.0),
            Entrance::Slide if index % 2 == 0 => (Vec2::new(-offset, 0.0), 1.0),
            Entrance::Slide => (Vec2::new(offset, 0.0), 1.0),
            Entrance::Fade => (Vec2::zero(), 1.0),
            Entrance::Zoom => (Vec2::zero(), 0.9),
        };
        Presentation { opacity: 0.0, offset, scale }
    }
}

// ── Easing ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Cubic ease-out: fast start, gentle landing.
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut if t < 0.5 => 4.0 * t * t * t,
            Easing::EaseInOut => 1.0 - (-2.0 * t + 2.0).powi(3) / 2.0,
        }
    }
}

// ── Transition ────────────────────────────────────────────────────────────

/// A single hidden → shown transition with an optional start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Transition {
    pub fn new(duration: Duration) -> Self {
        Self { duration, delay: Duration::ZERO, easing: Easing::default() }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Eased progress in `[0, 1]` given the time since the reveal.
    pub fn progress(&self, since_reveal: Duration) -> f32 {
        let Some(running) = since_reveal.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = running.as_secs_f32() / self.duration.as_secs_f32();
        self.easing.apply(t)
    }

    /// Whether the transition has fully landed.
    pub fn is_finished(&self, since_reveal: Duration) -> bool {
        since_reveal >= self.delay.saturating_add(self.duration)
    }
}

// ── Blink ─────────────────────────────────────────────────────────────────

/// An on/off toggle with a fixed half-period, starting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    pub period: Duration,
}

impl Blink {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn is_on(&self, elapsed: Duration) -> bool {
        if self.period.is_zero() {
            return true;
        }
        (elapsed.as_nanos() / self.period.as_nanos()) % 2 == 0
    }
}

// ── Presentation ──────────────────────────────────────────────────────────

/// Visual pose of an element: what a renderer applies on top of layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub opacity: f32,
    /// Translation from the laid-out position, in logical pixels.
    pub offset: Vec2,
    pub scale: f32,
}

impl Presentation {
    pub const SHOWN: Presentation = Presentation { opacity: 1.0, offset: Vec2::zero(), scale: 1.0 };

    pub fn lerp(self, to: Presentation, t: f32) -> Presentation {
        Presentation {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            offset: self.offset.lerp(to.offset, t),
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}
