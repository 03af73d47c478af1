//! Page content: the immutable data every section renders.
//!
//! Content is authored as a `.vpage` document and loaded once into a
//! [`Portfolio`]. Loading validates everything the runtime relies on (unique
//! keys, known layouts, thresholds in range, navigation targets that exist)
//! so the page itself never has to handle bad content.
//!
//! ```vpage
//! Page "Cloud & DevOps Engineer" {
//!     Nav {
//!         brand: "Cloud&DevOps Engineer"
//!         cta: contact
//!         Link "Projects" { target: projects }
//!     }
//!     Section "projects" {
//!         title: "Featured Projects"
//!         layout: stack
//!         threshold: 0.15
//!         root_margin: "0px 0px -100px 0px"
//!         Item "AWS Production Platform" {
//!             Tag "Terraform"
//!             Point "VPC networking" { group: architecture }
//!             Link "View Code" { url: "https://github.com/example/platform" }
//!         }
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use vitrine_markup::{Node, PageDocument, ParseError, parse_str};

use crate::links::{LinkTarget, OutboundLink};
use crate::reveal::{ElementKey, ObserveOptions, RootMargin};
use crate::transition::{Blink, Entrance, Transition};

// ── Model ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub title: String,
    pub nav: NavContent,
    pub sections: Vec<SectionContent>,
}

impl Portfolio {
    /// Parses and loads a `.vpage` source string.
    pub fn from_source(src: &str) -> Result<Self, LoadError> {
        let doc = parse_str(src)?;
        Ok(load(&doc)?)
    }

    pub fn section(&self, id: &str) -> Option<&SectionContent> {
        self.sections.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavContent {
    pub brand: String,
    /// Section id the call-to-action button scrolls to.
    pub cta: Option<String>,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub label: String,
    /// Section id to scroll to.
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Fills the viewport height; content centered.
    Hero,
    /// Responsive card grid.
    Grid,
    /// One wide row per item, generously spaced.
    Stack,
    /// One block for the whole section body.
    Single,
}

/// What a section registers with its reveal controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPolicy {
    /// One observed element per item.
    Items,
    /// The section body as a single observed element.
    Section,
    /// Revealed as soon as the section mounts; nothing observed.
    Mount,
}

/// Reveal parameters of a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSettings {
    pub policy: RevealPolicy,
    pub threshold: f32,
    pub root_margin: RootMargin,
    /// Extra delay per item index.
    pub stagger: Duration,
    pub duration: Duration,
    pub entrance: Entrance,
    /// Hidden-pose distance in logical pixels.
    pub offset: f32,
}

impl RevealSettings {
    pub fn observe_options(&self) -> ObserveOptions {
        ObserveOptions::new(self.threshold).root_margin(self.root_margin)
    }

    /// Transition of the `index`-th element.
    pub fn transition(&self, index: usize) -> Transition {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        Transition::new(self.duration).delay(self.stagger.saturating_mul(index))
    }
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            policy: RevealPolicy::Items,
            threshold: 0.2,
            root_margin: RootMargin::ZERO,
            stagger: Duration::ZERO,
            duration: Duration::from_millis(700),
            entrance: Entrance::Rise,
            offset: 32.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionContent {
    /// Anchor id, also the prefix of every element key in the section.
    pub id: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub layout: Layout,
    /// Grid columns at the `lg` breakpoint and at `md`.
    pub columns: usize,
    pub columns_md: usize,
    /// Estimated height of one item in logical pixels.
    pub item_height: f32,
    pub reveal: RevealSettings,
    pub items: Vec<Item>,
    pub links: Vec<OutboundLink>,
    pub actions: Vec<Action>,
    /// Closing line shown once every item has been revealed.
    pub finale: Option<String>,
    /// Decorations placed over the section, revealed with it.
    pub ornaments: Vec<Ornament>,
    /// Blinking caret after the heading.
    pub caret: Option<Blink>,
}

impl SectionContent {
    /// Key of the section body as a whole.
    pub fn key(&self) -> ElementKey {
        ElementKey::new(&self.id)
    }

    pub fn item_key(&self, item: &Item) -> ElementKey {
        ElementKey::item(&self.id, &item.key)
    }

    pub fn finale_key(&self) -> ElementKey {
        ElementKey::item(&self.id, "finale")
    }

    pub fn ornament_key(&self, ornament: &Ornament) -> ElementKey {
        ElementKey::new(format!("{}/ornament/{}", self.id, ornament.name))
    }
}

/// An icon floating over a section at a position relative to its box.
#[derive(Debug, Clone, PartialEq)]
pub struct Ornament {
    pub name: String,
    /// Left edge as a percentage of the section width.
    pub x: f32,
    /// Top edge as a percentage of the section height.
    pub y: f32,
    /// Edge length in logical pixels.
    pub size: f32,
    /// Fade-in delay after the section reveals.
    pub delay: Duration,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    /// Stable slug, unique within the section.
    pub key: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub points: Vec<Point>,
    pub skills: Vec<Skill>,
    pub links: Vec<OutboundLink>,
}

/// A bullet, grouped under a heading such as "architecture".
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub group: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillLevel {
    Intermediate,
    Advanced,
}

/// A button with no destination yet; pressing it raises a notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub label: String,
    pub notice: String,
}

// ── Errors ────────────────────────────────────────────────────────────────

/// Content that parsed but does not describe a valid page.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentError {
    /// Node path such as `Page/Section "projects"/Item`.
    pub path: String,
    /// 1-based line of the offending node.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "content error at line {} ({}): {}", self.line, self.path, self.message)
    }
}

impl std::error::Error for ContentError {}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Parse(ParseError),
    Content(ContentError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Parse(e) => e.fmt(f),
            LoadError::Content(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Parse(e) => Some(e),
            LoadError::Content(e) => Some(e),
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ContentError> for LoadError {
    fn from(e: ContentError) -> Self {
        LoadError::Content(e)
    }
}

// ── Loader ────────────────────────────────────────────────────────────────

/// Node path used for error reporting.
struct Scope<'a> {
    path: String,
    node: &'a Node,
}

impl<'a> Scope<'a> {
    fn root(node: &'a Node) -> Self {
        Self { path: describe(node), node }
    }

    fn child(&self, node: &'a Node) -> Scope<'a> {
        Scope { path: format!("{}/{}", self.path, describe(node)), node }
    }

    fn error(&self, message: impl Into<String>) -> ContentError {
        ContentError { path: self.path.clone(), line: self.node.line, message: message.into() }
    }

    fn string(&self, key: &str) -> Result<Option<String>, ContentError> {
        match self.node.prop(key) {
            None => Ok(None),
            Some(_) => self
                .node
                .prop_str(key)
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.error(format!("`{key}` must be a string"))),
        }
    }

    fn number(&self, key: &str) -> Result<Option<f32>, ContentError> {
        match self.node.prop(key) {
            None => Ok(None),
            Some(v) => match self.node.prop_f32(key) {
                Some(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(self.error(format!("`{key}` must be a number, got {}", v.kind()))),
            },
        }
    }

    fn seconds(&self, key: &str) -> Result<Option<Duration>, ContentError> {
        match self.number(key)? {
            None => Ok(None),
            Some(s) if s < 0.0 => Err(self.error(format!("`{key}` must not be negative, got {s}"))),
            Some(s) if s > MAX_TIMING_SECS => {
                Err(self.error(format!("`{key}` must be at most {MAX_TIMING_SECS}s, got {s}")))
            }
            Some(s) => Duration::try_from_secs_f32(s)
                .map(Some)
                .map_err(|e| self.error(format!("`{key}`: {e}"))),
        }
    }

    fn count(&self, key: &str) -> Result<Option<usize>, ContentError> {
        match self.number(key)? {
            None => Ok(None),
            Some(n) if n >= 1.0 && n.fract() == 0.0 => Ok(Some(n as usize)),
            Some(n) => Err(self.error(format!("`{key}` must be a positive whole number, got {n}"))),
        }
    }

    /// Label, falling back to a `key` property of the same meaning.
    fn label_or(&self, key: &str) -> Option<String> {
        self.node
            .label
            .clone()
            .or_else(|| self.node.prop_str(key).map(str::to_string))
    }

    fn warn_unknown_props(&self, known: &[&str]) {
        for prop in &self.node.props {
            if !known.contains(&prop.key.as_str()) {
                log::warn!("{} (line {}): unknown property `{}`", self.path, self.node.line, prop.key);
            }
        }
    }
}

fn describe(node: &Node) -> String {
    match &node.label {
        Some(label) => format!("{} {:?}", node.kind, label),
        None => node.kind.clone(),
    }
}

/// Builds a [`Portfolio`] from a parsed document.
pub fn load(doc: &PageDocument) -> Result<Portfolio, ContentError> {
    let page = Scope::root(&doc.root);
    if page.node.kind != "Page" {
        return Err(page.error(format!("root must be `Page`, found `{}`", page.node.kind)));
    }
    page.warn_unknown_props(&["title"]);

    let title = page.label_or("title").unwrap_or_default();
    let mut nav = None;
    let mut sections: Vec<SectionContent> = Vec::new();
    let mut ids = HashSet::new();

    for node in &page.node.children {
        let scope = page.child(node);
        match node.kind.as_str() {
            "Nav" if nav.is_some() => return Err(scope.error("only one `Nav` is allowed")),
            "Nav" => nav = Some(load_nav(&scope)?),
            "Section" => {
                let section = load_section(&scope)?;
                if !ids.insert(section.id.clone()) {
                    return Err(scope.error(format!("duplicate section id `{}`", section.id)));
                }
                sections.push(section);
            }
            other => return Err(scope.error(format!("unexpected `{other}` inside Page"))),
        }
    }

    let nav = nav.unwrap_or_default();
    let dangling = nav
        .links
        .iter()
        .map(|l| l.target.as_str())
        .chain(nav.cta.as_deref())
        .find(|target| !ids.contains(*target));
    if let Some(target) = dangling {
        return Err(page.error(format!("navigation target `{target}` is not a section id")));
    }

    log::debug!("loaded page {:?} with {} sections", title, sections.len());
    Ok(Portfolio { title, nav, sections })
}

fn load_nav(scope: &Scope<'_>) -> Result<NavContent, ContentError> {
    scope.warn_unknown_props(&["brand", "cta"]);
    let mut links = Vec::new();
    for node in &scope.node.children {
        let child = scope.child(node);
        if node.kind != "Link" {
            return Err(child.error(format!("unexpected `{}` inside Nav", node.kind)));
        }
        let label = node.label.clone().ok_or_else(|| child.error("navigation link needs a label"))?;
        let target = child
            .string("target")?
            .ok_or_else(|| child.error("navigation link needs a `target` section id"))?;
        links.push(NavLink { label, target });
    }
    Ok(NavContent {
        brand: scope.string("brand")?.unwrap_or_default(),
        cta: scope.string("cta")?,
        links,
    })
}

/// Upper bound for `stagger` and `duration`, in seconds.
const MAX_TIMING_SECS: f32 = 600.0;

const SECTION_PROPS: &[&str] = &[
    "title", "subtitle", "body", "layout", "columns", "columns_md", "item_height", "reveal",
    "threshold", "root_margin", "stagger", "duration", "entrance", "offset", "finale",
    "caret_blink",
];

fn load_section(scope: &Scope<'_>) -> Result<SectionContent, ContentError> {
    scope.warn_unknown_props(SECTION_PROPS);
    let id = scope
        .node
        .label
        .clone()
        .filter(|id| !id.is_empty() && !id.contains('/'))
        .ok_or_else(|| scope.error("section needs a label id without `/`"))?;

    let layout = match scope.string("layout")?.as_deref() {
        None | Some("grid") => Layout::Grid,
        Some("stack") => Layout::Stack,
        Some("single") => Layout::Single,
        Some("hero") => Layout::Hero,
        Some(other) => return Err(scope.error(format!("unknown layout `{other}`"))),
    };

    let mut reveal = RevealSettings::default();
    reveal.policy = match scope.string("reveal")?.as_deref() {
        None | Some("items") => RevealPolicy::Items,
        Some("section") => RevealPolicy::Section,
        Some("mount") => RevealPolicy::Mount,
        Some(other) => return Err(scope.error(format!("unknown reveal policy `{other}`"))),
    };
    if let Some(t) = scope.number("threshold")? {
        if !(0.0..=1.0).contains(&t) {
            return Err(scope.error(format!("threshold must be within [0, 1], got {t}")));
        }
        reveal.threshold = t;
    }
    if let Some(m) = scope.string("root_margin")? {
        reveal.root_margin = RootMargin::parse(&m).map_err(|e| scope.error(e.to_string()))?;
    }
    if let Some(s) = scope.seconds("stagger")? {
        reveal.stagger = s;
    }
    if let Some(d) = scope.seconds("duration")? {
        reveal.duration = d;
    }
    if let Some(name) = scope.string("entrance")? {
        reveal.entrance = Entrance::from_name(&name)
            .ok_or_else(|| scope.error(format!("unknown entrance `{name}`")))?;
    }
    if let Some(o) = scope.number("offset")? {
        reveal.offset = o;
    }

    let columns = scope.count("columns")?.unwrap_or(1);
    let columns_md = scope.count("columns_md")?.unwrap_or(columns.min(2));

    let mut items: Vec<Item> = Vec::new();
    let mut links = Vec::new();
    let mut actions = Vec::new();
    let mut keys = HashSet::new();
    let mut ornaments: Vec<Ornament> = Vec::new();

    for node in &scope.node.children {
        let child = scope.child(node);
        match node.kind.as_str() {
            "Item" => {
                let item = load_item(&child)?;
                if item.key == "finale" {
                    return Err(child.error("item key `finale` is reserved"));
                }
                if !keys.insert(item.key.clone()) {
                    return Err(child.error(format!("duplicate item key `{}` in section `{id}`", item.key)));
                }
                items.push(item);
            }
            "Link" => links.push(load_link(&child)?),
            "Action" => actions.push(load_action(&child)?),
            "Ornament" => {
                let ornament = load_ornament(&child)?;
                if ornaments.iter().any(|o| o.name == ornament.name) {
                    return Err(child.error(format!("duplicate ornament `{}` in section `{id}`", ornament.name)));
                }
                ornaments.push(ornament);
            }
            other => return Err(child.error(format!("unexpected `{other}` inside Section"))),
        }
    }

    let caret = match scope.seconds("caret_blink")? {
        Some(period) if period.is_zero() => return Err(scope.error("`caret_blink` must be positive")),
        period => period.map(Blink::new),
    };

    Ok(SectionContent {
        title: scope.string("title")?,
        subtitle: scope.string("subtitle")?,
        body: scope.string("body")?,
        layout,
        columns,
        columns_md,
        item_height: scope.number("item_height")?.unwrap_or(240.0).max(1.0),
        reveal,
        items,
        links,
        actions,
        finale: scope.string("finale")?,
        ornaments,
        caret,
        id,
    })
}

fn load_item(scope: &Scope<'_>) -> Result<Item, ContentError> {
    scope.warn_unknown_props(&["key", "title", "subtitle", "body", "image"]);
    let title = scope.label_or("title").ok_or_else(|| scope.error("item needs a title"))?;
    let key = match scope.string("key")? {
        Some(k) => k,
        None => slugify(&title),
    };
    if key.is_empty() || key.contains('/') {
        return Err(scope.error(format!("item key {key:?} must be non-empty and contain no `/`")));
    }

    let mut item = Item {
        key,
        title,
        subtitle: scope.string("subtitle")?,
        body: scope.string("body")?,
        image: scope.string("image")?,
        ..Item::default()
    };

    for node in &scope.node.children {
        let child = scope.child(node);
        let text = || node.label.clone().ok_or_else(|| child.error(format!("`{}` needs a label", node.kind)));
        match node.kind.as_str() {
            "Tag" => item.tags.push(text()?),
            "Point" => item.points.push(Point { group: child.string("group")?, text: text()? }),
            "Skill" => {
                let level = match child.string("level")?.as_deref() {
                    None | Some("intermediate") => SkillLevel::Intermediate,
                    Some("advanced") => SkillLevel::Advanced,
                    Some(other) => return Err(child.error(format!("unknown skill level `{other}`"))),
                };
                item.skills.push(Skill { name: text()?, level });
            }
            "Link" => item.links.push(load_link(&child)?),
            other => return Err(child.error(format!("unexpected `{other}` inside Item"))),
        }
    }
    Ok(item)
}

fn load_link(scope: &Scope<'_>) -> Result<OutboundLink, ContentError> {
    scope.warn_unknown_props(&["url", "description"]);
    let label = scope.node.label.clone().ok_or_else(|| scope.error("link needs a label"))?;
    let raw = scope.string("url")?.ok_or_else(|| scope.error("link needs a `url`"))?;
    let target = LinkTarget::parse(&raw).ok_or_else(|| scope.error(format!("unusable url {raw:?}")))?;
    Ok(OutboundLink { label, description: scope.string("description")?, target })
}

fn load_ornament(scope: &Scope<'_>) -> Result<Ornament, ContentError> {
    scope.warn_unknown_props(&["x", "y", "size", "delay"]);
    let name = scope
        .node
        .label
        .as_deref()
        .map(slugify)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| scope.error("ornament needs a label"))?;
    let percent = |key: &str| -> Result<f32, ContentError> {
        match scope.number(key)? {
            Some(v) if (0.0..=100.0).contains(&v) => Ok(v),
            Some(v) => Err(scope.error(format!("`{key}` is a percentage, got {v}"))),
            None => Ok(0.0),
        }
    };
    Ok(Ornament {
        x: percent("x")?,
        y: percent("y")?,
        size: scope.number("size")?.unwrap_or(40.0).max(0.0),
        delay: scope.seconds("delay")?.unwrap_or_default(),
        name,
    })
}

fn load_action(scope: &Scope<'_>) -> Result<Action, ContentError> {
    let label = scope.node.label.clone().ok_or_else(|| scope.error("action needs a label"))?;
    let notice = scope.string("notice")?.ok_or_else(|| scope.error("action needs a `notice`"))?;
    Ok(Action { label, notice })
}

/// Lowercase ASCII slug: runs of anything else collapse into one `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
