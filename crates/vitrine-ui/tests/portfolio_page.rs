//! End-to-end runs over the studio's bundled portfolio document.

use std::time::Duration;

use vitrine_ui::content::{Layout, RevealPolicy};
use vitrine_ui::prelude::*;

const PORTFOLIO: &str = include_str!("../../vitrine-studio/content/portfolio.vpage");

fn portfolio() -> Portfolio {
    Portfolio::from_source(PORTFOLIO).expect("bundled portfolio loads")
}

fn mounted(viewport: Viewport, watcher: WatcherKind) -> Page {
    let mut page = Page::with_watcher(portfolio(), viewport, watcher);
    page.mount(Duration::ZERO);
    page
}

fn at(ms: u64) -> FrameTime {
    FrameTime::at(Duration::from_millis(ms))
}

/// Scrolls to the bottom in `step` pixel increments, one frame per step.
fn scroll_through(page: &mut Page, step: f32) -> Vec<ElementKey> {
    let mut revealed = page.frame(&at(0)).revealed;
    let mut ms = 0;
    loop {
        let before = page.scroll_y();
        page.handle(PageEvent::Scroll { delta: step }, &mut LogOutbound);
        ms += 100;
        revealed.extend(page.frame(&at(ms)).revealed);
        if page.scroll_y() <= before {
            return revealed;
        }
    }
}

#[test]
fn bundled_portfolio_loads() {
    let p = portfolio();
    let ids: Vec<_> = p.sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["hero", "specializations", "projects", "philosophy", "skills", "about", "contact"]);
    assert_eq!(p.nav.links.len(), 6);
    assert_eq!(p.nav.cta.as_deref(), Some("contact"));

    let projects = p.section("projects").unwrap();
    assert_eq!(projects.layout, Layout::Stack);
    assert_eq!(projects.reveal.threshold, 0.15);
    assert_eq!(projects.reveal.root_margin, RootMargin::bottom_px(-100.0));
    assert_eq!(projects.items.len(), 4);

    assert_eq!(p.section("specializations").unwrap().items.len(), 6);
    assert_eq!(p.section("about").unwrap().reveal.policy, RevealPolicy::Section);
    assert!(p.section("philosophy").unwrap().finale.is_some());
    assert_eq!(p.section("contact").unwrap().actions.len(), 1);
    assert_eq!(p.section("hero").unwrap().ornaments.len(), 6);
    assert!(p.section("contact").unwrap().caret.is_some());
}

#[test]
fn nothing_below_the_fold_is_revealed_at_load() {
    let mut page = mounted(Viewport::new(1280.0, 720.0), WatcherKind::Geometry);
    let frame = page.frame(&at(16));
    assert!(frame.revealed.is_empty());
    assert!(page.section("hero").unwrap().is_complete());
    for section in page.sections().iter().skip(1) {
        assert_eq!(section.revealed_items(), 0, "{}", section.id());
    }
}

#[test]
fn scrolling_to_the_bottom_reveals_every_section() {
    for viewport in [Viewport::new(1280.0, 720.0), Viewport::new(390.0, 844.0)] {
        let mut page = mounted(viewport, WatcherKind::Geometry);
        let revealed = scroll_through(&mut page, 200.0);

        for section in page.sections() {
            assert!(section.is_complete(), "{} incomplete at {:?}", section.id(), viewport);
        }
        let finale = ElementKey::new("philosophy/finale");
        assert!(revealed.contains(&finale));
        // Each key is reported once.
        let mut unique = revealed.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), revealed.len());
    }
}

#[test]
fn projects_reveal_after_the_shrunken_bottom_edge() {
    let mut page = mounted(Viewport::new(1280.0, 720.0), WatcherKind::Geometry);
    let card = page.layout().section("projects").unwrap().items[0].clone();
    let mut out = LogOutbound;

    // The root ends 100 px above the viewport bottom: 80 px of a 560 px card
    // is about 14% and stays below the 15% threshold.
    page.handle(PageEvent::ScrollTo { y: card.rect.top() - 620.0 + 80.0 }, &mut out);
    page.frame(&at(100));
    assert!(!page.section("projects").unwrap().is_revealed(&card.key));

    page.handle(PageEvent::ScrollTo { y: card.rect.top() - 620.0 + 90.0 }, &mut out);
    let frame = page.frame(&at(200));
    assert_eq!(frame.revealed, vec![card.key.clone()]);
}

#[test]
fn navigation_cta_lands_on_contact() {
    let mut page = mounted(Viewport::new(1280.0, 720.0), WatcherKind::Geometry);
    let cta = page.navigation().cta().unwrap().to_string();
    page.handle(PageEvent::Navigate { target: cta }, &mut LogOutbound);
    assert_eq!(page.scroll_y(), page.max_scroll());

    let frame = page.frame(&at(50));
    assert!(frame.revealed.contains(&ElementKey::new("contact")));
    assert!(frame.nav.scrolled);
}

#[test]
fn without_an_observer_everything_shows_immediately() {
    let mut page = mounted(Viewport::new(1280.0, 720.0), WatcherKind::Unavailable);
    let frame = page.frame(&at(0));
    assert!(page.sections().iter().all(|s| s.is_degraded() && s.is_complete()));
    assert!(frame.elements.iter().all(|v| v.state == RevealState::Shown));
}
