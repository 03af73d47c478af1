use std::fmt;
use std::rc::Rc;

/// Stable identity of an observed element.
///
/// Keys are derived from content (section id plus item slug), never from an
/// element's position in a list, so reordering content cannot move a reveal
/// onto the wrong element. Cloning is a reference-count bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(Rc<str>);

impl ElementKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Rc::from(key.as_ref()))
    }

    /// Key for an item inside a section: `"<section>/<item>"`.
    pub fn item(section: &str, item: &str) -> Self {
        Self::new(format!("{section}/{item}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The section part of an item key, or the whole key for section keys.
    pub fn section(&self) -> &str {
        self.0.split_once('/').map_or(&self.0, |(s, _)| s)
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_key_splits_back_into_section() {
        let key = ElementKey::item("projects", "aws-production-platform");
        assert_eq!(key.as_str(), "projects/aws-production-platform");
        assert_eq!(key.section(), "projects");
        assert_eq!(ElementKey::new("about").section(), "about");
    }
}
