#![deny(missing_docs)]
//! JCOD core: the node model, document loading, parser options and diagnostics.

/// Registry key case conversion.
pub mod casing;
/// Non-fatal diagnostics and the sinks that receive them.
pub mod diagnostic;
/// JSON/YAML document loading.
pub mod document;
/// Core error types.
pub mod error;
/// JCOD node model.
pub mod node;
/// Parser options and their resolved form.
pub mod options;

pub use casing::KeyCase;
pub use diagnostic::{
    ChildrenSource, CollectingSink, Diagnostic, DiagnosticSink, KeyLocation, LogSink, join_words,
};
pub use document::{SourceFormat, document_from_value, parse_document};
pub use error::JcodError;
pub use node::{Children, JcodElement, JcodNode};
pub use options::{AllowElements, ParserOptions, ResolvedOptions};
