use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use vitrine_engine::coords::Rect;

use crate::content::{RevealPolicy, SectionContent};
use crate::layout::SectionLayout;
use crate::reveal::{ElementKey, ElementRef, RevealController, Subscription, WatcherKind};
use crate::transition::{Entrance, Presentation, Transition};

// ── ElementView ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    /// Revealed; the transition is still running (or waiting out its delay).
    Revealing,
    Shown,
}

/// What a renderer needs to draw one element for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementView {
    pub key: ElementKey,
    /// Layout rectangle. Document space from [`Section::present`], screen
    /// space in a page [`Frame`](crate::page::Frame).
    pub rect: Rect,
    pub state: RevealState,
    pub presentation: Presentation,
}

// ── Section ───────────────────────────────────────────────────────────────

/// One page section and its reveal bookkeeping.
///
/// The section owns its content, one [`RevealController`] and the
/// subscriptions it holds on that controller. Reveal times are stamped as
/// the controller reports reveals so [`present`](Self::present) can run each
/// element's transition from the moment it crossed its threshold.
pub struct Section {
    content: SectionContent,
    watcher: WatcherKind,
    reveals: RevealController,
    /// Keys revealed since the last stamp, pushed by the controller callback.
    pending: Rc<RefCell<Vec<ElementKey>>>,
    subscriptions: Vec<Subscription>,
    revealed_at: HashMap<ElementKey, Duration>,
    layout: Option<SectionLayout>,
}

impl Section {
    pub fn new(content: SectionContent, watcher: WatcherKind) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let reveals = controller(watcher, &pending);
        Self {
            content,
            watcher,
            reveals,
            pending,
            subscriptions: Vec::new(),
            revealed_at: HashMap::new(),
            layout: None,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.content.id
    }

    pub fn content(&self) -> &SectionContent {
        &self.content
    }

    pub fn layout(&self) -> Option<&SectionLayout> {
        self.layout.as_ref()
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.layout.is_some()
    }

    pub fn is_degraded(&self) -> bool {
        self.reveals.is_degraded()
    }

    /// Elements currently under observation.
    pub fn observed(&self) -> usize {
        self.reveals.observed()
    }

    /// Registers the section's elements at their laid-out positions.
    ///
    /// Mounting an already mounted section is a relayout.
    pub fn mount(&mut self, layout: &SectionLayout, now: Duration) {
        if self.is_mounted() {
            self.relayout(layout);
            return;
        }
        let options = self.content.reveal.observe_options();
        match self.content.reveal.policy {
            RevealPolicy::Items if !layout.items.is_empty() => {
                for slot in &layout.items {
                    let element = ElementRef::attached(slot.key.clone(), slot.rect);
                    self.subscriptions.extend(self.reveals.register(&element, options));
                }
            }
            RevealPolicy::Section => {
                let element = ElementRef::attached(self.content.key(), layout.rect);
                self.subscriptions.extend(self.reveals.register(&element, options));
            }
            // Nothing to observe: show on mount.
            RevealPolicy::Items | RevealPolicy::Mount => {
                self.reveals.reveal_now(self.content.key());
            }
        }
        log::debug!(
            "mounted section {} ({:?}, {} observed)",
            self.content.id,
            self.content.reveal.policy,
            self.reveals.observed()
        );
        self.layout = Some(layout.clone());
        self.stamp(now);
    }

    /// Unregisters every subscription, then drops the reveal state.
    pub fn unmount(&mut self) {
        if !self.is_mounted() {
            return;
        }
        for sub in self.subscriptions.drain(..) {
            self.reveals.unregister(sub);
        }
        self.pending.borrow_mut().clear();
        self.reveals = controller(self.watcher, &self.pending);
        self.revealed_at.clear();
        self.layout = None;
        log::debug!("unmounted section {}", self.content.id);
    }

    /// Moves observed elements to a new layout.
    pub fn relayout(&mut self, layout: &SectionLayout) {
        for slot in &layout.items {
            self.reveals.relayout(&slot.key, slot.rect);
        }
        self.reveals.relayout(&self.content.key(), layout.rect);
        if self.is_mounted() {
            self.layout = Some(layout.clone());
        }
    }

    /// Polls the watcher for the document-space `viewport` and stamps new
    /// reveals with `now`. Returns the keys revealed by this call.
    pub fn scroll(&mut self, viewport: Rect, now: Duration) -> Vec<ElementKey> {
        if !self.is_mounted() {
            return Vec::new();
        }
        self.reveals.poll(viewport);
        self.stamp(now)
    }

    fn stamp(&mut self, now: Duration) -> Vec<ElementKey> {
        let mut newly: Vec<ElementKey> = self.pending.borrow_mut().drain(..).collect();
        for key in &newly {
            self.revealed_at.entry(key.clone()).or_insert(now);
        }
        if self.content.finale.is_some() && self.is_complete() {
            let finale = self.content.finale_key();
            if !self.revealed_at.contains_key(&finale) {
                log::debug!("section {} complete; showing finale", self.content.id);
                self.revealed_at.insert(finale.clone(), now);
                newly.push(finale);
            }
        }
        newly
    }

    /// Key whose reveal drives the item at `index`.
    fn driver(&self, index: usize) -> ElementKey {
        match (self.content.reveal.policy, self.content.items.get(index)) {
            (RevealPolicy::Items, Some(item)) => self.content.item_key(item),
            _ => self.content.key(),
        }
    }

    pub fn is_revealed(&self, key: &ElementKey) -> bool {
        self.reveals.is_revealed(key)
    }

    /// When `key` was revealed, if it has been.
    pub fn revealed_at(&self, key: &ElementKey) -> Option<Duration> {
        self.revealed_at.get(key).copied()
    }

    /// Every stamped reveal, earliest first.
    pub fn timeline(&self) -> Vec<(ElementKey, Duration)> {
        let mut times: Vec<_> = self.revealed_at.iter().map(|(k, t)| (k.clone(), *t)).collect();
        times.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        times
    }

    /// Number of items rendered revealed.
    pub fn revealed_items(&self) -> usize {
        (0..self.content.items.len()).filter(|&i| self.reveals.is_revealed(&self.driver(i))).count()
    }

    /// `true` once every item (or the section body) is revealed.
    pub fn is_complete(&self) -> bool {
        if self.content.items.is_empty() {
            return self.reveals.is_revealed(&self.content.key());
        }
        self.revealed_items() == self.content.items.len()
    }

    /// Views for the body (or every item) and the finale, in document space.
    pub fn present(&self, now: Duration) -> Vec<ElementView> {
        let Some(layout) = &self.layout else {
            return Vec::new();
        };
        let settings = &self.content.reveal;
        let pose = |index| settings.entrance.hidden(settings.offset, index);
        let mut views = Vec::with_capacity(layout.items.len() + layout.ornaments.len() + 1);

        if layout.items.is_empty() {
            let key = self.content.key();
            views.push(self.view(key.clone(), &key, layout.body, pose(0), settings.transition(0), now));
        }
        for (i, slot) in layout.items.iter().enumerate() {
            let driver = self.driver(i);
            views.push(self.view(slot.key.clone(), &driver, slot.rect, pose(i), settings.transition(i), now));
        }
        if let Some(slot) = &layout.finale {
            let transition = Transition::new(settings.duration);
            views.push(self.view(slot.key.clone(), &slot.key, slot.rect, pose(0), transition, now));
        }
        // Ornaments fade in with the first element, each after its own delay.
        let driver = self.driver(0);
        let faded = Entrance::Fade.hidden(0.0, 0);
        for (slot, ornament) in layout.ornaments.iter().zip(&self.content.ornaments) {
            let transition = Transition::new(settings.duration).delay(ornament.delay);
            views.push(self.view(slot.key.clone(), &driver, slot.rect, faded, transition, now));
        }
        views
    }

    /// Whether the heading caret is lit at `now`; `None` without a caret.
    pub fn caret(&self, now: Duration) -> Option<bool> {
        self.content.caret.map(|blink| blink.is_on(now))
    }

    fn view(
        &self,
        key: ElementKey,
        driver: &ElementKey,
        rect: Rect,
        hidden: Presentation,
        transition: Transition,
        now: Duration,
    ) -> ElementView {
        let finale = self.content.finale_key();
        let revealed = if *driver == finale {
            self.revealed_at.contains_key(driver)
        } else {
            self.reveals.is_revealed(driver)
        };

        let (state, presentation) = match (revealed, self.revealed_at.get(driver)) {
            (false, _) => (RevealState::Hidden, hidden),
            // Degraded sections skip the transition.
            (true, _) if self.reveals.is_degraded() => (RevealState::Shown, Presentation::SHOWN),
            (true, None) => (RevealState::Shown, Presentation::SHOWN),
            (true, Some(&at)) => {
                let since = now.saturating_sub(at);
                if transition.is_finished(since) {
                    (RevealState::Shown, Presentation::SHOWN)
                } else {
                    (RevealState::Revealing, hidden.lerp(Presentation::SHOWN, transition.progress(since)))
                }
            }
        };
        ElementView { key, rect, state, presentation }
    }
}

fn controller(watcher: WatcherKind, pending: &Rc<RefCell<Vec<ElementKey>>>) -> RevealController {
    let sink = Rc::clone(pending);
    RevealController::with_watcher(watcher.build()).on_reveal(move |key| sink.borrow_mut().push(key.clone()))
}

#[cfg(test)]
mod tests {
    use vitrine_engine::coords::Viewport;

    use super::*;
    use crate::content::Portfolio;
    use crate::layout::PageLayout;

    const SRC: &str = r#"
        Page {
            Section "cards" {
                layout: stack
                item_height: 400
                stagger: 0.1
                duration: 0.5
                finale: "done"
                Item "one" Item "two"
            }
            Section "about" { reveal: section body: "text" }
            Section "hero" { reveal: mount layout: hero }
        }
    "#;

    fn setup(watcher: WatcherKind) -> (Vec<Section>, PageLayout) {
        let portfolio = Portfolio::from_source(SRC).unwrap();
        let layout = PageLayout::for_portfolio(&portfolio, Viewport::new(1280.0, 800.0));
        let sections = portfolio.sections.into_iter().map(|c| Section::new(c, watcher)).collect();
        (sections, layout)
    }

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn items_reveal_as_they_scroll_into_view() {
        let (mut sections, layout) = setup(WatcherKind::Geometry);
        let cards = &mut sections[0];
        let slots = &layout.sections[0].items;
        cards.mount(&layout.sections[0], Duration::ZERO);
        assert_eq!(cards.observed(), 2);

        let first = slots[0].rect;
        let newly = cards.scroll(Rect::new(0.0, first.top() - 400.0, 1280.0, 800.0), secs(1.0));
        assert_eq!(newly, vec![slots[0].key.clone()]);
        assert_eq!(cards.revealed_items(), 1);
        assert!(!cards.is_complete());

        let second = slots[1].rect;
        let newly = cards.scroll(Rect::new(0.0, second.top(), 1280.0, 800.0), secs(2.0));
        assert_eq!(newly, vec![slots[1].key.clone(), cards.content().finale_key()]);
        assert!(cards.is_complete());
        assert_eq!(cards.revealed_at(&slots[0].key), Some(secs(1.0)));
    }

    #[test]
    fn present_interpolates_and_staggers() {
        let (mut sections, layout) = setup(WatcherKind::Geometry);
        let cards = &mut sections[0];
        cards.mount(&layout.sections[0], Duration::ZERO);
        cards.scroll(Rect::new(0.0, 0.0, 1280.0, 100_000.0), secs(1.0));

        let views = cards.present(secs(1.05));
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].state, RevealState::Revealing);
        // The second card waits out its 100 ms stagger.
        assert_eq!(views[1].state, RevealState::Revealing);
        assert_eq!(views[1].presentation.opacity, 0.0);

        let views = cards.present(secs(3.0));
        assert!(views.iter().all(|v| v.state == RevealState::Shown));
        assert!(views.iter().all(|v| v.presentation == Presentation::SHOWN));
    }

    #[test]
    fn section_policy_observes_the_whole_section_once() {
        let (mut sections, layout) = setup(WatcherKind::Geometry);
        let about = &mut sections[1];
        about.mount(&layout.sections[1], Duration::ZERO);
        assert_eq!(about.observed(), 1);
        assert!(!about.is_complete());
        about.scroll(Rect::new(0.0, layout.sections[1].body.top(), 1280.0, 800.0), secs(0.5));
        assert!(about.is_complete());
    }

    #[test]
    fn section_policy_measures_the_header_too() {
        let portfolio = Portfolio::from_source(r#"
            Page {
                Section "about" {
                    title: "About"
                    reveal: section
                    threshold: 0.5
                    item_height: 200
                    body: "text"
                }
            }
        "#)
        .unwrap();
        let layout = PageLayout::for_portfolio(&portfolio, Viewport::new(1280.0, 800.0));
        let laid = &layout.sections[0];
        let mut about = Section::new(portfolio.sections[0].clone(), WatcherKind::Geometry);
        about.mount(laid, Duration::ZERO);

        // Everything above the body is on screen; the body itself is not.
        let view = Rect::new(0.0, laid.rect.top(), 1280.0, laid.body.top() - laid.rect.top());
        assert!(laid.rect.visible_fraction(view) >= 0.5);
        assert_eq!(laid.body.visible_fraction(view), 0.0);

        let newly = about.scroll(view, secs(0.5));
        assert_eq!(newly, vec![about.content().key()]);
        assert!(about.is_complete());
    }

    #[test]
    fn mount_policy_reveals_without_observing() {
        let (mut sections, layout) = setup(WatcherKind::Geometry);
        let hero = &mut sections[2];
        hero.mount(&layout.sections[2], secs(0.25));
        assert_eq!(hero.observed(), 0);
        assert!(hero.is_complete());
        assert_eq!(hero.revealed_at(&hero.content().key()), Some(secs(0.25)));
    }

    #[test]
    fn unmount_releases_subscriptions_and_state() {
        let (mut sections, layout) = setup(WatcherKind::Geometry);
        let cards = &mut sections[0];
        cards.mount(&layout.sections[0], Duration::ZERO);
        cards.scroll(Rect::new(0.0, 0.0, 1280.0, 100_000.0), secs(1.0));
        cards.unmount();
        assert_eq!(cards.observed(), 0);
        assert!(!cards.is_mounted());
        assert_eq!(cards.revealed_items(), 0);
        assert!(cards.present(secs(2.0)).is_empty());
        assert!(cards.scroll(Rect::new(0.0, 0.0, 1280.0, 800.0), secs(2.0)).is_empty());
    }

    #[test]
    fn degraded_section_shows_everything_at_once() {
        let (mut sections, layout) = setup(WatcherKind::Unavailable);
        let cards = &mut sections[0];
        cards.mount(&layout.sections[0], Duration::ZERO);
        assert!(cards.is_degraded());
        assert!(cards.is_complete());
        let views = cards.present(Duration::ZERO);
        assert_eq!(views[0].state, RevealState::Shown);
    }

    #[test]
    fn relayout_before_reveal_uses_new_bounds() {
        let (mut sections, layout) = setup(WatcherKind::Geometry);
        let cards = &mut sections[0];
        cards.mount(&layout.sections[0], Duration::ZERO);
        let mut moved = layout.sections[0].clone();
        for slot in &mut moved.items {
            slot.rect = slot.rect.translate(vitrine_engine::coords::Vec2::down(-100_000.0));
        }
        cards.relayout(&moved);
        let newly = cards.scroll(Rect::new(0.0, -100_000.0, 1280.0, 100_000.0), secs(1.0));
        assert_eq!(newly.len(), 3);
    }
}
