//! Wraps every element instance in a wrapper component.
//!
//! The wrapper receives the declared component name as `component` and the
//! whole formatted JCOD node (`component`, `key`, `children`, `props`,
//! `renderProps`) as `data`, and keeps the element's key. With a group
//! component, the wrapped element is re-rendered with the group component
//! instead of its own renderable.

use crate::hooks::Hooks;
use crate::instance::{Element, Instance, Renderable};
use jcod_core::JcodElement;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Node decorator wrapping element instances.
#[derive(Debug, Clone)]
pub struct Spreader<C> {
    name: String,
    wrapper: C,
    group: Option<C>,
}

impl<C: Clone> Spreader<C> {
    /// Wraps instances in `wrapper`, declared as `name` on the wrapper element.
    pub fn new(name: impl Into<String>, wrapper: C) -> Self {
        Self {
            name: name.into(),
            wrapper,
            group: None,
        }
    }

    /// Re-renders each wrapped element with `group`.
    pub fn with_group(mut self, group: C) -> Self {
        self.group = Some(group);
        self
    }

    /// Wraps one instance built from `node`. Text, fragments and
    /// null-rendered elements pass through unchanged.
    pub fn wrap(&self, instance: Instance<C>, node: &JcodElement) -> Instance<C> {
        let mut inner = match instance {
            Instance::Element(element) if !element.renderable.is_null() => element,
            other => return other,
        };

        let mut props = Map::new();
        props.insert(
            "component".to_string(),
            JsonValue::String(inner.component.clone()),
        );
        props.insert(
            "data".to_string(),
            serde_json::to_value(node).unwrap_or_default(),
        );

        if let Some(group) = &self.group {
            inner.renderable = Renderable::Component {
                reference: group.clone(),
            };
        }

        Instance::Element(Element {
            component: self.name.clone(),
            renderable: Renderable::Component {
                reference: self.wrapper.clone(),
            },
            key: inner.key.clone(),
            props,
            render_props: BTreeMap::new(),
            children: vec![Instance::Element(inner)],
        })
    }
}

impl<C: Clone> Hooks<C> for Spreader<C> {
    fn decorate_node(&self, instance: Instance<C>, node: &JcodElement) -> Instance<C> {
        self.wrap(instance, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Instance<&'static str> {
        let mut props = Map::new();
        props.insert("title".to_string(), JsonValue::from("Hello"));
        Instance::Element(Element {
            component: "Card".to_string(),
            renderable: Renderable::Component { reference: "card" },
            key: "k".to_string(),
            props,
            render_props: BTreeMap::new(),
            children: vec![Instance::text("body")],
        })
    }

    fn card_node() -> JcodElement {
        JcodElement::new("Card")
            .with_key("k")
            .with_prop("title", "Hello")
            .with_children("body")
    }

    #[test]
    fn wraps_elements() {
        let spreader = Spreader::new("Spread", "spread");
        let wrapped = spreader.wrap(card(), &card_node());
        let outer = wrapped.as_element().unwrap();
        assert_eq!(outer.component, "Spread");
        assert_eq!(outer.key, "k");
        assert_eq!(outer.props["component"], "Card");

        let data = &outer.props["data"];
        assert_eq!(data["component"], "Card");
        assert_eq!(data["key"], "k");
        assert_eq!(data["props"]["title"], "Hello");
        assert_eq!(data["children"], "body");

        let inner = outer.children[0].as_element().unwrap();
        assert_eq!(inner.renderable.component(), Some(&"card"));
        assert_eq!(inner.children[0].as_text(), Some("body"));
    }

    #[test]
    fn group_replaces_inner_renderable() {
        let spreader = Spreader::new("Spread", "spread").with_group("group");
        let wrapped = spreader.wrap(card(), &card_node());
        let inner = wrapped.children()[0].as_element().unwrap();
        assert_eq!(inner.renderable.component(), Some(&"group"));
        assert_eq!(inner.component, "Card");
        assert_eq!(inner.props["title"], "Hello");
    }

    #[test]
    fn passes_through_text_and_null() {
        let spreader = Spreader::new("Spread", "spread");
        let node = JcodElement::new("Missing");
        assert_eq!(spreader.wrap(Instance::text("x"), &node).as_text(), Some("x"));

        let null = Instance::Element(Element::null("Missing", "k"));
        assert_eq!(spreader.wrap(null.clone(), &node), null);
    }
}
