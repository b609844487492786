//! sitelist - Enterprise site-list resolver
//!
//! Turns administrator-supplied Enterprise Mode (`<rules>`) or site-list
//! (`<site-list>`) XML into the ordered list of patterns a URL matcher uses
//! to decide whether a navigation is handed off to a legacy browser. Each
//! rule renders as `pattern` or `!pattern`, where `!` means "matches, but
//! do not hand off".
//!
//! # Quick Start
//!
//! ```
//! let parsed = sitelist::parse_str(
//!     r#"<site-list version="1">
//!          <site url="contoso.com"><open-in>MSEdge</open-in></site>
//!          <site url="fabrikam.com"/>
//!        </site-list>"#,
//! );
//! assert!(parsed.error.is_none());
//! assert_eq!(parsed.rule_strings(), ["contoso.com", "!fabrikam.com"]);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, ResolveError, Result, Span};

pub mod lexer;

pub mod xml;
pub use xml::{
    Config, Content as XmlContent, Document as XmlDocument, Element as XmlElement,
    Parser as XmlParser, MAX_DEPTH_CEILING,
};

pub mod dialect;
pub use dialect::{
    parse_document, parse_str, parse_str_with_config, CompatHint, Dialect, ParsedXml, Section,
    SiteEntry, Transition,
};

pub mod resolver;
pub use resolver::{Decoder, Resolver, XmlDecoder};

/// Resolve XML with the default resolver. Must be awaited within a tokio
/// runtime.
pub async fn resolve(xml: impl Into<String>) -> ParsedXml {
    Resolver::new().resolve(xml).await
}

/// Parse XML from string into a document tree
pub fn from_xml_str(s: &str) -> Result<XmlDocument> {
    XmlParser::new(s.as_bytes()).parse()
}
