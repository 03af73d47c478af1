use vitrine_engine::coords::{Insets, Rect, Viewport};

use crate::content::{Layout, Portfolio, SectionContent};
use crate::reveal::ElementKey;

// ── Breakpoint ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Base,
    /// ≥ 640 px
    Sm,
    /// ≥ 768 px
    Md,
    /// ≥ 1024 px
    Lg,
}

impl Breakpoint {
    pub fn for_width(width: f32) -> Self {
        if width >= 1024.0 {
            Breakpoint::Lg
        } else if width >= 768.0 {
            Breakpoint::Md
        } else if width >= 640.0 {
            Breakpoint::Sm
        } else {
            Breakpoint::Base
        }
    }

    /// Horizontal padding of the content column.
    pub fn gutter(self) -> f32 {
        match self {
            Breakpoint::Base => 16.0,
            Breakpoint::Sm | Breakpoint::Md => 24.0,
            Breakpoint::Lg => 32.0,
        }
    }

    /// Vertical padding above and below a section.
    pub fn section_padding(self) -> f32 {
        if self == Breakpoint::Lg { 128.0 } else { 96.0 }
    }
}

pub const MAX_CONTENT_WIDTH: f32 = 1280.0;
pub const HEADER_HEIGHT: f32 = 140.0;
pub const HEADER_GAP: f32 = 64.0;
pub const GRID_GAP: f32 = 24.0;
pub const STACK_GAP: f32 = 80.0;
pub const LINK_ROW_HEIGHT: f32 = 56.0;
pub const FINALE_HEIGHT: f32 = 120.0;

// ── SectionLayout ─────────────────────────────────────────────────────────

/// A laid-out element: its key and document-space rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub key: ElementKey,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub id: String,
    /// Whole section including padding.
    pub rect: Rect,
    /// Area below the header holding items, links and the finale.
    pub body: Rect,
    /// One slot per item, in content order.
    pub items: Vec<Slot>,
    pub finale: Option<Slot>,
    /// Floating decorations, positioned over `rect`.
    pub ornaments: Vec<Slot>,
}

impl SectionLayout {
    /// Scroll offset that puts the section at the top of the viewport.
    #[inline]
    pub fn anchor(&self) -> f32 {
        self.rect.top()
    }
}

// ── PageLayout ────────────────────────────────────────────────────────────

/// Document-space geometry of the whole page for one viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub viewport: Viewport,
    pub breakpoint: Breakpoint,
    pub sections: Vec<SectionLayout>,
    /// Total document height.
    pub height: f32,
}

impl PageLayout {
    /// Lays out every section top to bottom.
    pub fn compute<'a>(sections: impl IntoIterator<Item = &'a SectionContent>, viewport: Viewport) -> Self {
        let breakpoint = Breakpoint::for_width(viewport.width);
        let column = content_column(viewport.width, breakpoint);

        let mut y = 0.0;
        let sections: Vec<SectionLayout> = sections
            .into_iter()
            .map(|content| {
                let laid = lay_out_section(content, column, y, viewport, breakpoint);
                y = laid.rect.bottom();
                laid
            })
            .collect();

        log::trace!(
            "layout {}x{} ({:?}): {} sections, {:.0}px tall",
            viewport.width,
            viewport.height,
            breakpoint,
            sections.len(),
            y
        );
        Self { viewport, breakpoint, sections, height: y }
    }

    pub fn for_portfolio(portfolio: &Portfolio, viewport: Viewport) -> Self {
        Self::compute(&portfolio.sections, viewport)
    }

    pub fn section(&self, id: &str) -> Option<&SectionLayout> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> f32 {
        self.viewport.max_scroll(self.height)
    }
}

/// `(x, width)` of the centered content column.
fn content_column(width: f32, breakpoint: Breakpoint) -> (f32, f32) {
    let container = width.min(MAX_CONTENT_WIDTH);
    let gutter = Insets::symmetric(0.0, breakpoint.gutter());
    let x = (width - container) / 2.0 + gutter.left;
    (x, (container - gutter.h()).max(0.0))
}

fn columns_for(content: &SectionContent, breakpoint: Breakpoint) -> usize {
    let columns = match (content.layout, breakpoint) {
        (Layout::Grid, Breakpoint::Lg) => content.columns,
        (Layout::Grid, Breakpoint::Md) => content.columns_md,
        _ => 1,
    };
    columns.max(1)
}

fn lay_out_section(
    content: &SectionContent,
    (x, width): (f32, f32),
    top: f32,
    viewport: Viewport,
    breakpoint: Breakpoint,
) -> SectionLayout {
    let padding = breakpoint.section_padding();
    let has_header = content.title.is_some() || content.subtitle.is_some();
    let header = if has_header { HEADER_HEIGHT + HEADER_GAP } else { 0.0 };
    let body_top = top + padding + header;

    let (columns, gap) = match content.layout {
        Layout::Stack => (1, STACK_GAP),
        _ => (columns_for(content, breakpoint), GRID_GAP),
    };
    let cell_w = ((width - gap * (columns - 1) as f32) / columns as f32).max(0.0);

    let mut items = Vec::with_capacity(content.items.len());
    for (i, item) in content.items.iter().enumerate() {
        let (row, col) = (i / columns, i % columns);
        let rect = Rect::new(
            x + col as f32 * (cell_w + gap),
            body_top + row as f32 * (content.item_height + gap),
            cell_w,
            content.item_height,
        );
        items.push(Slot { key: content.item_key(item), rect });
    }

    let rows = content.items.len().div_ceil(columns);
    let mut body_h = if rows > 0 {
        rows as f32 * content.item_height + (rows - 1) as f32 * gap
    } else if content.layout == Layout::Single || content.body.is_some() {
        content.item_height
    } else {
        0.0
    };
    if !content.links.is_empty() || !content.actions.is_empty() {
        body_h += (if body_h > 0.0 { GRID_GAP } else { 0.0 }) + LINK_ROW_HEIGHT;
    }
    let finale = content.finale.as_ref().map(|_| {
        let y = body_top + body_h + if body_h > 0.0 { STACK_GAP } else { 0.0 };
        body_h = y + FINALE_HEIGHT - body_top;
        Slot { key: content.finale_key(), rect: Rect::new(x, y, width, FINALE_HEIGHT) }
    });

    let mut layout = SectionLayout {
        id: content.id.clone(),
        rect: Rect::new(0.0, top, viewport.width, padding * 2.0 + header + body_h),
        body: Rect::new(x, body_top, width, body_h),
        items,
        finale,
        ornaments: Vec::new(),
    };

    if content.layout == Layout::Hero && layout.rect.size.y < viewport.height {
        // Fill the viewport and center the body in it.
        let shift = (viewport.height - layout.rect.size.y) / 2.0;
        layout.rect.size.y = viewport.height;
        layout.body.origin.y += shift;
        for slot in layout.items.iter_mut().chain(layout.finale.as_mut()) {
            slot.rect.origin.y += shift;
        }
    }

    let frame = layout.rect;
    layout.ornaments = content
        .ornaments
        .iter()
        .map(|o| Slot {
            key: content.ornament_key(o),
            rect: Rect::new(
                frame.origin.x + frame.size.x * o.x / 100.0,
                frame.top() + frame.size.y * o.y / 100.0,
                o.size,
                o.size,
            ),
        })
        .collect();
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio() -> Portfolio {
        Portfolio::from_source(r#"
            Page {
                Section "hero" { layout: hero reveal: mount body: "Hi" item_height: 200 }
                Section "cards" {
                    title: "Cards"
                    columns: 3
                    item_height: 100
                    Item "a" Item "b" Item "c" Item "d"
                }
                Section "stack" {
                    layout: stack
                    item_height: 300
                    finale: "fin"
                    Item "x" Item "y"
                }
            }
        "#).unwrap()
    }

    #[test]
    fn breakpoints() {
        assert_eq!(Breakpoint::for_width(500.0), Breakpoint::Base);
        assert_eq!(Breakpoint::for_width(640.0), Breakpoint::Sm);
        assert_eq!(Breakpoint::for_width(800.0), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(1440.0), Breakpoint::Lg);
    }

    #[test]
    fn content_column_is_centered_and_capped() {
        assert_eq!(content_column(1600.0, Breakpoint::Lg), (192.0, 1216.0));
        assert_eq!(content_column(375.0, Breakpoint::Base), (16.0, 343.0));
    }

    #[test]
    fn hero_fills_the_viewport() {
        let layout = PageLayout::for_portfolio(&portfolio(), Viewport::new(1280.0, 900.0));
        let hero = layout.section("hero").unwrap();
        assert_eq!(hero.rect, Rect::new(0.0, 0.0, 1280.0, 900.0));
        assert!(hero.body.top() > 128.0);
        assert_eq!(layout.section("cards").unwrap().anchor(), 900.0);
    }

    #[test]
    fn grid_columns_follow_breakpoint() {
        let wide = PageLayout::for_portfolio(&portfolio(), Viewport::new(1280.0, 900.0));
        let cards = wide.section("cards").unwrap();
        // Three columns: the fourth card wraps to the second row.
        assert_eq!(cards.items[0].rect.top(), cards.items[2].rect.top());
        assert_eq!(cards.items[3].rect.top(), cards.items[0].rect.bottom() + GRID_GAP);
        assert_eq!(cards.items[3].rect.origin.x, cards.items[0].rect.origin.x);

        let phone = PageLayout::for_portfolio(&portfolio(), Viewport::new(375.0, 700.0));
        let cards = phone.section("cards").unwrap();
        assert!(cards.items[1].rect.top() > cards.items[0].rect.bottom());
        assert_eq!(cards.items[0].rect.size.x, 343.0);
    }

    #[test]
    fn header_pushes_the_body_down() {
        let layout = PageLayout::for_portfolio(&portfolio(), Viewport::new(1280.0, 900.0));
        let cards = layout.section("cards").unwrap();
        assert_eq!(cards.body.top(), 900.0 + 128.0 + HEADER_HEIGHT + HEADER_GAP);
    }

    #[test]
    fn stack_gap_and_finale() {
        let layout = PageLayout::for_portfolio(&portfolio(), Viewport::new(1280.0, 900.0));
        let stack = layout.section("stack").unwrap();
        assert_eq!(stack.items[1].rect.top(), stack.items[0].rect.bottom() + STACK_GAP);
        let finale = stack.finale.as_ref().unwrap();
        assert_eq!(finale.rect.top(), stack.items[1].rect.bottom() + STACK_GAP);
        assert_eq!(finale.key.as_str(), "stack/finale");
        assert_eq!(layout.height, stack.rect.bottom());
    }

    #[test]
    fn ornaments_sit_relative_to_the_filled_hero() {
        let portfolio = Portfolio::from_source(r#"
            Page {
                Section "hero" {
                    layout: hero
                    reveal: mount
                    body: "Hi"
                    Ornament "Cloud" { x: 75 y: 20 size: 48 }
                }
            }
        "#)
        .unwrap();
        let layout = PageLayout::for_portfolio(&portfolio, Viewport::new(1280.0, 900.0));
        let hero = layout.section("hero").unwrap();
        assert_eq!(hero.ornaments.len(), 1);
        assert_eq!(hero.ornaments[0].key.as_str(), "hero/ornament/cloud");
        assert_eq!(hero.ornaments[0].rect, Rect::new(960.0, 180.0, 48.0, 48.0));
    }

    #[test]
    fn max_scroll_is_document_minus_viewport() {
        let layout = PageLayout::for_portfolio(&portfolio(), Viewport::new(1280.0, 900.0));
        assert_eq!(layout.max_scroll(), layout.height - 900.0);
    }
}
