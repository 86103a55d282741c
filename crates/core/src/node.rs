//! JCOD node model.
//!
//! A JCOD document is an untyped JSON (or YAML) tree. Conversion into these
//! types is total: any well-formed value becomes a node, and shape problems
//! are left for the renderer to diagnose.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// A single node of a JCOD tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JcodNode {
    /// A literal leaf. Numbers and booleans are stringified, `null` is empty.
    Text(String),
    /// A component invocation.
    Element(JcodElement),
}

impl JcodNode {
    /// Converts a JSON value into a flat list of nodes.
    ///
    /// Arrays are flattened in order (nested arrays included); every other
    /// value yields exactly one node.
    pub fn list_from_value(value: JsonValue) -> Vec<JcodNode> {
        let mut nodes = Vec::new();
        push_flattened(value, &mut nodes);
        nodes
    }

    /// Returns the element when this node is not a literal.
    pub fn as_element(&self) -> Option<&JcodElement> {
        match self {
            JcodNode::Element(element) => Some(element),
            JcodNode::Text(_) => None,
        }
    }

    /// Returns true if this node is a literal leaf.
    pub fn is_text(&self) -> bool {
        matches!(self, JcodNode::Text(_))
    }

    fn from_single(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => JcodNode::Element(JcodElement::from_map(map)),
            other => JcodNode::Text(literal_text(other)),
        }
    }
}

fn push_flattened(value: JsonValue, nodes: &mut Vec<JcodNode>) {
    match value {
        JsonValue::Array(items) => {
            for item in items {
                push_flattened(item, nodes);
            }
        }
        other => nodes.push(JcodNode::from_single(other)),
    }
}

/// Renders a scalar the way it appears as text content.
fn literal_text(value: JsonValue) -> String {
    match value {
        JsonValue::String(text) => text,
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<JcodElement> for JcodNode {
    fn from(element: JcodElement) -> Self {
        JcodNode::Element(element)
    }
}

impl From<&str> for JcodNode {
    fn from(text: &str) -> Self {
        JcodNode::Text(text.to_string())
    }
}

impl From<String> for JcodNode {
    fn from(text: String) -> Self {
        JcodNode::Text(text)
    }
}

impl<'de> Deserialize<'de> for JcodNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::Array(_) => Err(D::Error::custom(
                "expected a single JCOD node, found a list",
            )),
            value => Ok(JcodNode::from_single(value)),
        }
    }
}

/// Children of a node, from any of its three sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Children {
    /// A literal value rendered as a single text child.
    Text(String),
    /// A list of child nodes.
    Nodes(Vec<JcodNode>),
}

impl Children {
    /// Converts a JSON value; `null` means "no children".
    ///
    /// A single object is a one-element list, nested arrays are flattened.
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            JsonValue::Array(_) | JsonValue::Object(_) => {
                Some(Children::Nodes(JcodNode::list_from_value(value)))
            }
            other => Some(Children::Text(literal_text(other))),
        }
    }

    /// Builds a node list.
    pub fn nodes<I, N>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<JcodNode>,
    {
        Children::Nodes(nodes.into_iter().map(Into::into).collect())
    }

    /// Human-readable form used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Children::Text(text) => text.clone(),
            Children::Nodes(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        Children::Text(text.to_string())
    }
}

impl<'de> Deserialize<'de> for Children {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Ok(Children::from_value(value).unwrap_or(Children::Nodes(Vec::new())))
    }
}

/// A structured JCOD node.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JcodElement {
    /// Registry key or tag name.
    pub component: String,
    /// Identity among siblings; derived from the node's content when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Root-level children, the highest-precedence children source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
    /// Props passed through to the instance. `children` and `key` entries
    /// here are deprecated positions.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, JsonValue>,
    /// Named slots resolved into instances and passed as props.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub render_props: BTreeMap<String, Children>,
}

impl JcodElement {
    /// Creates an element with no key, children or props.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ..Default::default()
        }
    }

    /// Sets the root key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the root children.
    pub fn with_children(mut self, children: impl Into<Children>) -> Self {
        self.children = Some(children.into());
        self
    }

    /// Adds a prop.
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Adds a render prop slot.
    pub fn with_render_prop(mut self, name: impl Into<String>, value: impl Into<Children>) -> Self {
        self.render_props.insert(name.into(), value.into());
        self
    }

    /// Builds an element from a JSON object. Unknown fields are dropped.
    pub fn from_map(mut map: Map<String, JsonValue>) -> Self {
        let component = match map.remove("component") {
            Some(JsonValue::String(name)) => name,
            Some(other) => {
                log::debug!("JCOD node has a non-string component: {}", other);
                String::new()
            }
            None => String::new(),
        };

        let key = match map.remove("key") {
            None | Some(JsonValue::Null) => None,
            Some(value) => Some(literal_text(value)),
        };

        let children = map.remove("children").and_then(Children::from_value);

        let props = match map.remove("props") {
            Some(JsonValue::Object(props)) => props,
            _ => Map::new(),
        };

        let render_props = match map.remove("renderProps") {
            Some(JsonValue::Object(slots)) => slots
                .into_iter()
                .filter_map(|(name, value)| Children::from_value(value).map(|c| (name, c)))
                .collect(),
            _ => BTreeMap::new(),
        };

        Self {
            component,
            key,
            children,
            props,
            render_props,
        }
    }
}

impl<'de> Deserialize<'de> for JcodElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::Object(map) => Ok(JcodElement::from_map(map)),
            _ => Err(D::Error::custom("expected a JCOD element object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_become_text() {
        let nodes = JcodNode::list_from_value(json!(["a", 1, true, null]));
        assert_eq!(
            nodes,
            vec![
                JcodNode::from("a"),
                JcodNode::from("1"),
                JcodNode::from("true"),
                JcodNode::from(""),
            ]
        );
    }

    #[test]
    fn nested_arrays_are_flattened() {
        let nodes = JcodNode::list_from_value(json!(["a", ["b", ["c"]], "d"]));
        let texts: Vec<_> = nodes
            .iter()
            .map(|n| match n {
                JcodNode::Text(t) => t.as_str(),
                JcodNode::Element(_) => "?",
            })
            .collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);
    }

    #[test]
    fn element_fields_are_extracted() {
        let node: JcodNode = serde_json::from_value(json!({
            "component": "Card",
            "key": 7,
            "children": [{ "component": "p", "children": "hi" }],
            "props": { "className": "card" },
            "renderProps": { "header": "Title", "footer": null }
        }))
        .unwrap();

        let element = node.as_element().unwrap();
        assert_eq!(element.component, "Card");
        assert_eq!(element.key.as_deref(), Some("7"));
        assert_eq!(element.props.get("className"), Some(&json!("card")));
        assert_eq!(
            element.render_props.get("header"),
            Some(&Children::Text("Title".to_string()))
        );
        assert!(!element.render_props.contains_key("footer"));
        match element.children.as_ref().unwrap() {
            Children::Nodes(nodes) => assert_eq!(nodes.len(), 1),
            Children::Text(_) => panic!("expected nodes"),
        }
    }

    #[test]
    fn missing_component_degrades_to_empty_name() {
        let element = JcodElement::from_map(
            json!({ "props": { "a": 1 } }).as_object().unwrap().clone(),
        );
        assert_eq!(element.component, "");
        assert_eq!(element.props.len(), 1);
    }

    #[test]
    fn single_object_children_is_a_list() {
        let children = Children::from_value(json!({ "component": "b" })).unwrap();
        assert_eq!(children, Children::nodes([JcodElement::new("b")]));
    }

    #[test]
    fn list_is_rejected_as_single_node() {
        let err = serde_json::from_value::<JcodNode>(json!([])).unwrap_err();
        assert!(err.to_string().contains("found a list"));
    }

    #[test]
    fn serialization_skips_empty_fields() {
        let element = JcodElement::new("div").with_children("x");
        assert_eq!(
            serde_json::to_value(&element).unwrap(),
            json!({ "component": "div", "children": "x" })
        );
    }

    #[test]
    fn describe_children() {
        assert_eq!(Children::from("any key").describe(), "any key");
        assert_eq!(
            Children::nodes(["a"]).describe(),
            r#"["a"]"#
        );
    }
}
