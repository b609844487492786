//! Dialect detection and rule extraction
//!
//! Two document dialects are understood:
//!
//! - the legacy Enterprise Mode list, rooted at `<rules>`
//! - the newer site list, rooted at `<site-list>`
//!
//! Authoring mistakes inside a recognized document only reduce the number of
//! rules produced. Only unreadable input or an unknown root element turn the
//! whole result into an error.

pub mod entry;
mod v1;
mod v2;

pub use entry::{CompatHint, Section, SiteEntry, Transition, STAY_PREFIX};
pub use v2::DEFAULT_TARGET;

use tracing::debug;

use crate::error::ResolveError;
use crate::xml::{Config, Document, Element, Parser};

/// Supported site-list grammars
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Legacy Enterprise Mode, root `<rules>`
    V1,
    /// Site list, root `<site-list>`
    V2,
}

impl Dialect {
    pub const V1_ROOT: &'static str = "rules";
    pub const V2_ROOT: &'static str = "site-list";

    /// Select the dialect from the root element's tag name
    pub fn detect(root: &Element) -> Result<Self, ResolveError> {
        match root.name.as_str() {
            Self::V1_ROOT => Ok(Self::V1),
            Self::V2_ROOT => Ok(Self::V2),
            _ => Err(ResolveError::InvalidRoot),
        }
    }

    /// Extract the rules of a document in this dialect, in document order
    pub fn walk(self, root: &Element) -> Vec<SiteEntry> {
        match self {
            Self::V1 => v1::walk(root),
            Self::V2 => v2::walk(root),
        }
    }
}

/// Outcome of one resolution
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedXml {
    pub rules: Vec<SiteEntry>,
    pub error: Option<String>,
}

impl ParsedXml {
    pub fn new(rules: Vec<SiteEntry>) -> Self {
        Self { rules, error: None }
    }

    /// A result carrying no rules and the error's message
    pub fn failed(error: ResolveError) -> Self {
        Self {
            rules: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Rules rendered as `[!]pattern` strings
    pub fn rule_strings(&self) -> Vec<String> {
        self.rules.iter().map(ToString::to_string).collect()
    }
}

/// Resolve an already-built document
pub fn parse_document(document: &Document) -> ParsedXml {
    let root = &document.root;
    let dialect = match Dialect::detect(root) {
        Ok(dialect) => dialect,
        Err(err) => {
            debug!(root = %root.name, "unrecognized root element");
            return ParsedXml::failed(err);
        }
    };

    debug!(?dialect, version = root.attr("version"), "detected site list dialect");
    let rules = dialect.walk(root);
    debug!(count = rules.len(), "resolved site list rules");
    ParsedXml::new(rules)
}

/// Resolve XML text synchronously with default parser limits
pub fn parse_str(xml: &str) -> ParsedXml {
    parse_str_with_config(xml, Config::default())
}

/// Resolve XML text synchronously with custom parser limits
pub fn parse_str_with_config(xml: &str, config: Config) -> ParsedXml {
    match Parser::with_config(xml.as_bytes(), config).parse() {
        Ok(document) => parse_document(&document),
        Err(err) => {
            debug!(%err, "xml rejected");
            ParsedXml::failed(ResolveError::BadContent)
        }
    }
}
