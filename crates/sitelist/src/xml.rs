//! XML tree reader
//!
//! Builds an owned [`Document`] from untrusted text. Nothing in the tree
//! borrows from the input, so a document can be moved across a task
//! boundary and the source dropped.

pub mod model;
pub mod parser;

pub use model::{Content, Document, Element};
pub use parser::{Config, Parser, MAX_DEPTH_CEILING};
