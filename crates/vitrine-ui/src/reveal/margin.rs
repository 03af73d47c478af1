use std::fmt;
use std::str::FromStr;

use vitrine_engine::coords::{Insets, Rect};

// ── Length ────────────────────────────────────────────────────────────────

/// One edge of a root margin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Length {
    Px(f32),
    /// Percentage of the viewport extent on the same axis.
    Percent(f32),
}

impl Length {
    #[inline]
    fn resolve(self, extent: f32) -> f32 {
        match self {
            Length::Px(v) => v,
            Length::Percent(p) => extent * p / 100.0,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Px(0.0)
    }
}

// ── RootMargin ────────────────────────────────────────────────────────────

/// Adjustment applied to the viewport before intersection tests.
///
/// Written like a CSS margin: `"0px 0px -50px 0px"` shrinks the bottom edge
/// by 50 px so elements reveal a little before they reach the literal
/// bottom of the screen. One to four values are accepted with the usual
/// top / right / bottom / left expansion.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: Length::Px(0.0),
        right: Length::Px(0.0),
        bottom: Length::Px(0.0),
        left: Length::Px(0.0),
    };

    /// Pixel-only margin; negative values shrink the viewport.
    pub const fn px(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top: Length::Px(top),
            right: Length::Px(right),
            bottom: Length::Px(bottom),
            left: Length::Px(left),
        }
    }

    /// Shorthand for the common "reveal a bit before the bottom edge" case.
    pub const fn bottom_px(bottom: f32) -> Self {
        Self::px(0.0, 0.0, bottom, 0.0)
    }

    pub fn parse(input: &str) -> Result<Self, MarginError> {
        let parts = input
            .split_whitespace()
            .map(|tok| parse_length(tok).ok_or_else(|| MarginError::new(input, format!("invalid length {tok:?}"))))
            .collect::<Result<Vec<_>, _>>()?;

        let [top, right, bottom, left] = match parts.as_slice() {
            [a] => [*a, *a, *a, *a],
            [v, h] => [*v, *h, *v, *h],
            [t, h, b] => [*t, *h, *b, *h],
            [t, r, b, l] => [*t, *r, *b, *l],
            [] => return Err(MarginError::new(input, "empty margin")),
            _ => return Err(MarginError::new(input, "at most four values are allowed")),
        };
        Ok(Self { top, right, bottom, left })
    }

    /// Pixel insets for a root of the given size.
    pub fn insets(self, root: Rect) -> Insets {
        Insets::new(
            self.top.resolve(root.size.y),
            self.right.resolve(root.size.x),
            self.bottom.resolve(root.size.y),
            self.left.resolve(root.size.x),
        )
    }

    /// The effective intersection root for this margin.
    pub fn apply(self, root: Rect) -> Rect {
        root.outset(self.insets(root))
    }
}

impl FromStr for RootMargin {
    type Err = MarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_length(tok: &str) -> Option<Length> {
    let (number, ctor): (&str, fn(f32) -> Length) = if let Some(n) = tok.strip_suffix("px") {
        (n, Length::Px)
    } else if let Some(n) = tok.strip_suffix('%') {
        (n, Length::Percent)
    } else if tok.trim_start_matches(['-', '+']) == "0" {
        (tok, Length::Px)
    } else {
        return None;
    };
    number.parse::<f32>().ok().filter(|v| v.is_finite()).map(ctor)
}

// ── MarginError ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct MarginError {
    pub input: String,
    pub reason: String,
}

impl MarginError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self { input: input.to_string(), reason: reason.into() }
    }
}

impl fmt::Display for MarginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid root margin {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for MarginError {}
