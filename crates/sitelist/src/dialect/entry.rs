//! Site entries and the marker policy shared by both dialects

use std::fmt;

/// Prefix marking an entry whose navigation must not be handed off
pub const STAY_PREFIX: char = '!';

/// Whether a matching navigation is handed off to the legacy engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Hand off navigation (rendered without a prefix)
    Switch,
    /// Match, but keep navigation where it is (rendered with `!`)
    Stay,
}

/// The legacy dialect section an entry was declared in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Emie,
    DocMode,
}

impl Section {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "emie" => Some(Self::Emie),
            "docMode" => Some(Self::DocMode),
            _ => None,
        }
    }
}

/// Compatibility attributes read from the source document.
///
/// They do not influence which entries are produced; they are carried so a
/// compatibility-mode layer can consume them later.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CompatHint {
    #[default]
    None,
    Legacy {
        section: Section,
        doc_mode: Option<String>,
        force_compat_view: bool,
    },
    SiteList {
        compat_mode: Option<String>,
    },
}

/// A resolved rule: a `domain` or `domain/path` pattern plus its transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteEntry {
    pattern: String,
    transition: Transition,
    compat: CompatHint,
}

impl SiteEntry {
    pub fn new(pattern: impl Into<String>, transition: Transition) -> Self {
        Self {
            pattern: pattern.into(),
            transition,
            compat: CompatHint::None,
        }
    }

    pub fn with_compat(mut self, compat: CompatHint) -> Self {
        self.compat = compat;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub const fn transition(&self) -> Transition {
        self.transition
    }

    pub fn compat(&self) -> &CompatHint {
        &self.compat
    }

    pub fn is_stay(&self) -> bool {
        self.transition == Transition::Stay
    }
}

impl fmt::Display for SiteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_stay() {
            write!(f, "{STAY_PREFIX}{}", self.pattern)
        } else {
            f.write_str(&self.pattern)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SiteEntry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-candidate signals: `drop` removes the entry, `stay` marks it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Marker {
    drop: bool,
    stay: bool,
}

impl Marker {
    /// `exclude` wins over `doNotTransition`
    pub(crate) const fn legacy(exclude: bool, do_not_transition: bool) -> Self {
        Self {
            drop: exclude,
            stay: !exclude && do_not_transition,
        }
    }

    /// Site-list entries are never dropped; an `open-in` of `None` marks them
    pub(crate) fn site_list(target: &str) -> Self {
        Self {
            drop: false,
            stay: target.trim().eq_ignore_ascii_case("none"),
        }
    }
}

/// Build the entry for one candidate node, or nothing if it is dropped or
/// has no pattern.
pub(crate) fn build(pattern: String, marker: Marker, compat: CompatHint) -> Option<SiteEntry> {
    if marker.drop || pattern.is_empty() {
        return None;
    }
    let transition = if marker.stay {
        Transition::Stay
    } else {
        Transition::Switch
    };
    Some(SiteEntry::new(pattern, transition).with_compat(compat))
}

/// Boolean attribute: only `true` (any ASCII case) is set
pub(crate) fn flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Trim the whitespace an author may leave around domain and path text
pub(crate) fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_marker() {
        assert_eq!(Marker::legacy(false, false), Marker { drop: false, stay: false });
        assert_eq!(Marker::legacy(false, true), Marker { drop: false, stay: true });
        assert_eq!(Marker::legacy(true, true), Marker { drop: true, stay: false });
    }

    #[test]
    fn test_site_list_marker() {
        assert!(Marker::site_list("None").stay);
        assert!(Marker::site_list("none").stay);
        assert!(Marker::site_list(" NONE\n").stay);
        assert!(!Marker::site_list("MSEdge").stay);
        assert!(!Marker::site_list("IE11").stay);
        assert!(!Marker::site_list("").stay);
        assert!(!Marker::site_list("None").drop);
    }

    #[test]
    fn test_build_renders_prefix() {
        let stay = build("x.com".into(), Marker::legacy(false, true), CompatHint::None);
        assert_eq!(stay.map(|e| e.to_string()), Some("!x.com".to_string()));

        let switch = build("x.com".into(), Marker::legacy(false, false), CompatHint::None);
        assert_eq!(switch.map(|e| e.to_string()), Some("x.com".to_string()));
    }

    #[test]
    fn test_build_drops() {
        assert!(build("x.com".into(), Marker::legacy(true, false), CompatHint::None).is_none());
        assert!(build(String::new(), Marker::legacy(false, false), CompatHint::None).is_none());
    }

    #[test]
    fn test_flag() {
        assert!(flag(Some("true")));
        assert!(flag(Some("TRUE")));
        assert!(!flag(Some("false")));
        assert!(!flag(Some("yes")));
        assert!(!flag(Some("")));
        assert!(!flag(None));
    }

    #[test]
    fn test_trim_text() {
        assert_eq!(trim_text("   \ngoogle.com\t\t \t"), "google.com");
        assert_eq!(trim_text(" \n/r5\t"), "/r5");
        assert_eq!(trim_text("\r\n"), "");
    }

    #[test]
    fn test_section_from_tag() {
        assert_eq!(Section::from_tag("emie"), Some(Section::Emie));
        assert_eq!(Section::from_tag("docMode"), Some(Section::DocMode));
        assert_eq!(Section::from_tag("docmode"), None);
        assert_eq!(Section::from_tag("domain"), None);
    }
}
