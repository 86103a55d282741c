//! Depth-first tree walk building one instance per JCOD node.

use crate::hooks::{Hooks, NodeMetadata};
use crate::instance::{Element, Instance};
use crate::policy::resolve;
use crate::registry::Registry;
use jcod_core::{
    Children, ChildrenSource, Diagnostic, DiagnosticSink, JcodElement, JcodNode, KeyLocation,
    ResolvedOptions,
};
use serde_json::{Map, Value as JsonValue};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Prefix of keys derived from node content.
pub const DERIVED_KEY_PREFIX: &str = "jcod-";

/// Reserved entries of `props` and `renderProps`.
const RESERVED: [&str; 2] = ["key", "children"];

pub(crate) struct Walker<'p, C> {
    pub(crate) registry: &'p Registry<C>,
    pub(crate) options: &'p ResolvedOptions,
    pub(crate) hooks: &'p dyn Hooks<C>,
    pub(crate) sink: &'p dyn DiagnosticSink,
}

impl<C: Clone> Walker<'_, C> {
    /// Renders a sibling list whose parent sits at `parent_path`, one level
    /// below `depth`.
    pub(crate) fn render_list(
        &self,
        nodes: &[JcodNode],
        parent_path: &str,
        depth: usize,
    ) -> Vec<Instance<C>> {
        nodes
            .iter()
            .enumerate()
            .map(|(index, node)| self.render_node(node, &child_path(parent_path, index), depth + 1))
            .collect()
    }

    fn render_node(&self, node: &JcodNode, path: &str, depth: usize) -> Instance<C> {
        match node {
            JcodNode::Text(value) => Instance::text(value.clone()),
            JcodNode::Element(element) => self.render_element(element, path, depth),
        }
    }

    fn render_element(&self, original: &JcodElement, path: &str, depth: usize) -> Instance<C> {
        let metadata = NodeMetadata { path, original };
        let node = self.hooks.format(original.clone(), &metadata);

        if depth > self.options.max_depth() {
            self.emit(Diagnostic::DepthExceeded {
                component: node.component.clone(),
                path: path.to_string(),
                max_depth: self.options.max_depth(),
            });
            let key = effective_key(&node, path);
            let instance = Instance::Element(Element::null(node.component.clone(), key));
            return self.hooks.decorate_node(instance, &node);
        }

        self.report_anomalies(&node, path);

        let resolution = resolve(&node.component, self.registry, self.options);
        log::trace!(
            "[{}] at {} resolved as {:?}",
            node.component,
            path,
            resolution.kind
        );
        if let Some(diagnostic) = resolution.diagnostic {
            self.emit(diagnostic.at(path));
        }

        let key = effective_key(&node, path);

        let render_props: BTreeMap<String, Vec<Instance<C>>> = node
            .render_props
            .iter()
            .filter(|(name, _)| !RESERVED.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), self.render_children(value, path, depth)))
            .collect();

        let children = self.select_children(&node, path, depth);

        let props: Map<String, JsonValue> = node
            .props
            .iter()
            .filter(|(name, _)| !RESERVED.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let instance = Instance::Element(Element {
            component: node.component.clone(),
            renderable: resolution.renderable,
            key,
            props,
            render_props,
            children,
        });
        self.hooks.decorate_node(instance, &node)
    }

    /// Emits the children-precedence and misplaced-key diagnostics. A `null`
    /// key counts as absent.
    fn report_anomalies(&self, node: &JcodElement, path: &str) {
        if !self.options.display_error_message() {
            return;
        }

        let sources = children_sources(node);
        if sources.len() > 1 {
            self.sink.emit(&Diagnostic::AmbiguousChildren {
                component: node.component.clone(),
                path: path.to_string(),
                sources,
            });
        }

        if let Some(value) = node.props.get("key")
            && !value.is_null()
        {
            self.sink.emit(&Diagnostic::IgnoredKey {
                component: node.component.clone(),
                path: path.to_string(),
                location: KeyLocation::Props,
                value: literal(value),
            });
        }

        if let Some(value) = node.render_props.get("key") {
            self.sink.emit(&Diagnostic::IgnoredKey {
                component: node.component.clone(),
                path: path.to_string(),
                location: KeyLocation::RenderProps,
                value: value.describe(),
            });
        }
    }

    /// Renders the highest-precedence children source.
    fn select_children(&self, node: &JcodElement, path: &str, depth: usize) -> Vec<Instance<C>> {
        if let Some(children) = &node.children {
            return self.render_children(children, path, depth);
        }
        if let Some(children) = node.render_props.get("children") {
            return self.render_children(children, path, depth);
        }

        match node.props.get("children") {
            None | Some(JsonValue::Null) => Vec::new(),
            Some(value) if self.options.legacy_props_children() => {
                vec![Instance::text(literal(value))]
            }
            Some(value) => match Children::from_value(value.clone()) {
                Some(children) => self.render_children(&children, path, depth),
                None => Vec::new(),
            },
        }
    }

    fn render_children(&self, children: &Children, path: &str, depth: usize) -> Vec<Instance<C>> {
        match children {
            Children::Text(value) => vec![Instance::text(value.clone())],
            Children::Nodes(nodes) => self.render_list(nodes, path, depth),
        }
    }

    fn emit(&self, diagnostic: Diagnostic) {
        if self.options.display_error_message() {
            self.sink.emit(&diagnostic);
        }
    }
}

/// Every declared children source, highest precedence first.
pub fn children_sources(node: &JcodElement) -> Vec<ChildrenSource> {
    let mut sources = Vec::with_capacity(3);
    if node.children.is_some() {
        sources.push(ChildrenSource::Root);
    }
    if node.render_props.contains_key("children") {
        sources.push(ChildrenSource::RenderProps);
    }
    if node.props.get("children").is_some_and(|v| !v.is_null()) {
        sources.push(ChildrenSource::Props);
    }
    sources
}

/// Root key, or a key derived from the node and its position.
pub fn effective_key(node: &JcodElement, path: &str) -> String {
    match &node.key {
        Some(key) => key.clone(),
        None => derived_key(node, path),
    }
}

/// `jcod-` followed by the first 16 hex digits of the SHA-256 of the node's
/// canonical JSON serialization and its dot-joined path.
///
/// Paths are unique among siblings, so identical siblings get distinct keys.
pub fn derived_key(node: &JcodElement, path: &str) -> String {
    let canonical = serde_json::to_string(node).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hasher.update([0u8]);
    hasher.update(path.as_bytes());
    let digest = hasher.finalize();
    let mut key = String::with_capacity(DERIVED_KEY_PREFIX.len() + 16);
    key.push_str(DERIVED_KEY_PREFIX);
    for byte in &digest[..8] {
        key.push_str(&format!("{:02x}", byte));
    }
    key
}

fn child_path(parent: &str, index: usize) -> String {
    if parent.is_empty() {
        index.to_string()
    } else {
        format!("{}.{}", parent, index)
    }
}

/// Strings verbatim, anything else as JSON.
fn literal(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}
