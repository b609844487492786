//! Asynchronous resolution of untrusted site-list XML
//!
//! Building the XML tree is the only step that touches untrusted bytes. It
//! runs on a blocking task that owns its input and hands back an owned
//! [`Document`], so the decoder never shares memory with the caller. If the
//! decoder fails in any way, including a panic, the caller still receives
//! exactly one result carrying [`ResolveError::BadContent`].

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::dialect::{parse_document, ParsedXml};
use crate::error::{ResolveError, Result};
use crate::xml::{Config, Document, Parser};

/// Turns raw XML text into an owned document
pub trait Decoder: Send + Sync + 'static {
    fn decode(&self, xml: &str) -> Result<Document>;
}

/// The built-in bounded XML reader
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct XmlDecoder {
    config: Config,
}

impl XmlDecoder {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> Config {
        self.config
    }
}

impl Decoder for XmlDecoder {
    fn decode(&self, xml: &str) -> Result<Document> {
        Parser::with_config(xml.as_bytes(), self.config).parse()
    }
}

/// Resolves site-list XML into [`ParsedXml`].
///
/// Calls are independent of each other; the resolver only holds its decoder.
#[derive(Debug)]
pub struct Resolver<D = XmlDecoder> {
    decoder: Arc<D>,
}

impl<D> Clone for Resolver<D> {
    fn clone(&self) -> Self {
        Self {
            decoder: Arc::clone(&self.decoder),
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_decoder(XmlDecoder::new(config))
    }
}

impl<D: Decoder> Resolver<D> {
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            decoder: Arc::new(decoder),
        }
    }

    /// Resolve `xml`. Must be called within a tokio runtime.
    #[instrument(skip_all)]
    pub async fn resolve(&self, xml: impl Into<String>) -> ParsedXml {
        let xml = xml.into();
        debug!(len = xml.len(), "resolving site list");

        let decoder = Arc::clone(&self.decoder);
        let decoded = tokio::task::spawn_blocking(move || decoder.decode(&xml)).await;

        match decoded {
            Ok(Ok(document)) => parse_document(&document),
            Ok(Err(err)) => {
                debug!(%err, "xml rejected");
                ParsedXml::failed(ResolveError::BadContent)
            }
            Err(err) => {
                warn!(%err, "xml decoder aborted");
                ParsedXml::failed(ResolveError::BadContent)
            }
        }
    }

    /// Resolve `xml` in the background and hand the result to `on_parsed`.
    ///
    /// The callback runs exactly once. Must be called within a tokio runtime.
    pub fn resolve_with<F>(&self, xml: impl Into<String>, on_parsed: F) -> JoinHandle<()>
    where
        F: FnOnce(ParsedXml) + Send + 'static,
    {
        let resolver = self.clone();
        let xml = xml.into();
        tokio::spawn(async move { on_parsed(resolver.resolve(xml).await) })
    }
}
