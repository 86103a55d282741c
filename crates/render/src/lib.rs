#![deny(missing_docs)]
//! JCOD renderer: component registry, resolution policy, hooks and the tree
//! walker that turns JCOD nodes into instance trees.

/// Decoration hooks.
pub mod hooks;
/// Output instance tree.
pub mod instance;
/// Static markup serializer.
pub mod markup;
/// The content parser and its builder.
pub mod parser;
/// Component resolution policy and name classification.
pub mod policy;
/// Component registry.
pub mod registry;
/// Wrapper-component node decorator.
pub mod spreader;
/// Tree walk internals: children precedence and key derivation.
pub mod walker;

pub use hooks::{HookSet, Hooks, NoHooks, NodeMetadata};
pub use instance::{Element, Instance, Renderable};
pub use markup::{list_to_markup, to_markup};
pub use parser::{ContentParser, ContentParserBuilder};
pub use policy::{
    ElementKind, Resolution, ResolutionKind, classify, is_custom_element_like, is_html_like,
    resolve,
};
pub use registry::Registry;
pub use spreader::Spreader;
pub use walker::{children_sources, derived_key, effective_key};
