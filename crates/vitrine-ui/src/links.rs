use std::fmt;

// ── LinkTarget ────────────────────────────────────────────────────────────

/// Destination of an outbound link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Web address, always carrying a scheme.
    Web(String),
    /// Mail address (without the `mailto:` prefix).
    Mail(String),
}

impl LinkTarget {
    /// Normalizes a content URL.
    ///
    /// `mailto:` becomes [`LinkTarget::Mail`]; anything with a scheme is kept
    /// as is; a bare host such as `www.example.com/in/someone` gets
    /// `https://` so it does not resolve relative to the page.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Some(addr) = raw.strip_prefix("mailto:") {
            return (!addr.is_empty()).then(|| LinkTarget::Mail(addr.to_string()));
        }
        if has_scheme(raw) {
            return Some(LinkTarget::Web(raw.to_string()));
        }
        if raw.contains('@') && !raw.contains('/') {
            return Some(LinkTarget::Mail(raw.to_string()));
        }
        Some(LinkTarget::Web(format!("https://{raw}")))
    }

    pub fn href(&self) -> String {
        match self {
            LinkTarget::Web(url) => url.clone(),
            LinkTarget::Mail(addr) => format!("mailto:{addr}"),
        }
    }
}

fn has_scheme(raw: &str) -> bool {
    match raw.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

/// A labelled outbound link from content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundLink {
    pub label: String,
    pub description: Option<String>,
    pub target: LinkTarget,
}

// ── Outbound ──────────────────────────────────────────────────────────────

/// Host side effects a page can trigger. Fire-and-forget: nothing comes back.
pub trait Outbound {
    /// Open `target` in a new browsing context.
    fn open(&mut self, target: &LinkTarget);

    /// Show a blocking notice (placeholder buttons use this).
    fn alert(&mut self, message: &str);
}

/// [`Outbound`] that only logs what a browser host would do.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOutbound;

impl Outbound for LogOutbound {
    fn open(&mut self, target: &LinkTarget) {
        log::info!("open {target}");
    }

    fn alert(&mut self, message: &str) {
        log::info!("alert: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailto_becomes_mail() {
        assert_eq!(
            LinkTarget::parse("mailto:hello@example.com"),
            Some(LinkTarget::Mail("hello@example.com".into()))
        );
        assert_eq!(LinkTarget::parse("mailto:"), None);
    }

    #[test]
    fn bare_host_gets_https() {
        let t = LinkTarget::parse("www.example.com/in/someone").unwrap();
        assert_eq!(t.href(), "https://www.example.com/in/someone");
    }

    #[test]
    fn schemed_url_is_untouched() {
        let t = LinkTarget::parse("https://github.com/example/repo.git").unwrap();
        assert_eq!(t, LinkTarget::Web("https://github.com/example/repo.git".into()));
    }

    #[test]
    fn bare_address_is_mail() {
        assert_eq!(LinkTarget::parse("me@example.com").unwrap().href(), "mailto:me@example.com");
    }

    #[test]
    fn blank_is_rejected() {
        assert_eq!(LinkTarget::parse("   "), None);
    }
}
