//! Output instance tree.
//!
//! Instances are host-agnostic: a registered component is carried as the
//! caller's reference type `C`, tags as their name.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// What an element instance renders with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Renderable<C> {
    /// A registered component.
    Component {
        /// The registry entry.
        reference: C,
    },
    /// A literal tag (HTML or custom element).
    Tag {
        /// Tag name.
        name: String,
    },
    /// Renders nothing.
    Null,
}

impl<C> Renderable<C> {
    /// Returns true for the null renderer.
    pub fn is_null(&self) -> bool {
        matches!(self, Renderable::Null)
    }

    /// Returns the tag name for literal tags.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Renderable::Tag { name } => Some(name),
            _ => None,
        }
    }

    /// Returns the registered component.
    pub fn component(&self) -> Option<&C> {
        match self {
            Renderable::Component { reference } => Some(reference),
            _ => None,
        }
    }
}

/// A constructed element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element<C> {
    /// Component name as declared in the JCOD node.
    pub component: String,
    /// Resolved renderable.
    pub renderable: Renderable<C>,
    /// Effective key.
    pub key: String,
    /// Props without `key` and `children`.
    pub props: Map<String, JsonValue>,
    /// Resolved render prop slots.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub render_props: BTreeMap<String, Vec<Instance<C>>>,
    /// Resolved children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Instance<C>>,
}

impl<C> Element<C> {
    /// An element rendered with the null renderer and nothing attached.
    pub fn null(component: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            renderable: Renderable::Null,
            key: key.into(),
            props: Map::new(),
            render_props: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}

/// A node of the output tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Instance<C> {
    /// Text leaf.
    Text {
        /// Literal content.
        value: String,
    },
    /// Constructed element.
    Element(Element<C>),
    /// Ordered list of instances (the render root).
    Fragment {
        /// Items in input order.
        children: Vec<Instance<C>>,
    },
}

impl<C> Instance<C> {
    /// Creates a text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Instance::Text {
            value: value.into(),
        }
    }

    /// Returns the element, if this is one.
    pub fn as_element(&self) -> Option<&Element<C>> {
        match self {
            Instance::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the text content, if this is a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Instance::Text { value } => Some(value),
            _ => None,
        }
    }

    /// Returns the element key.
    pub fn key(&self) -> Option<&str> {
        self.as_element().map(|e| e.key.as_str())
    }

    /// Returns the children of an element or fragment.
    pub fn children(&self) -> &[Instance<C>] {
        match self {
            Instance::Element(element) => &element.children,
            Instance::Fragment { children } => children,
            Instance::Text { .. } => &[],
        }
    }

    /// Counts this instance and every descendant, render props included.
    pub fn node_count(&self) -> usize {
        let nested: usize = match self {
            Instance::Text { .. } => 0,
            Instance::Fragment { children } => children.iter().map(Instance::node_count).sum(),
            Instance::Element(element) => {
                element
                    .children
                    .iter()
                    .chain(element.render_props.values().flatten())
                    .map(Instance::node_count)
                    .sum()
            }
        };
        1 + nested
    }
}
