//! Static markup for instance trees.
//!
//! Host-agnostic preview: registered components are written under their
//! declared name, tags under their tag name, and the null renderer writes
//! nothing. Render prop slots are written as `<template slot="name">` before
//! the children.
//!
//! Tag and attribute names are never escaped: an element whose name is not a
//! plain markup name is dropped with its subtree, and such attributes are
//! dropped.

use crate::instance::{Element, Instance, Renderable};
use serde_json::Value as JsonValue;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serializes an instance tree to markup.
pub fn to_markup<C>(instance: &Instance<C>) -> String {
    let mut out = String::new();
    write_instance(instance, &mut out);
    out
}

/// Serializes a list of sibling instances to markup.
pub fn list_to_markup<C>(instances: &[Instance<C>]) -> String {
    let mut out = String::new();
    for instance in instances {
        write_instance(instance, &mut out);
    }
    out
}

fn write_instance<C>(instance: &Instance<C>, out: &mut String) {
    match instance {
        Instance::Text { value } => out.push_str(&html_escape::encode_text(value)),
        Instance::Fragment { children } => {
            for child in children {
                write_instance(child, out);
            }
        }
        Instance::Element(element) => write_element(element, out),
    }
}

fn write_element<C>(element: &Element<C>, out: &mut String) {
    let name = match &element.renderable {
        Renderable::Null => return,
        Renderable::Tag { name } => name.as_str(),
        Renderable::Component { .. } => element.component.as_str(),
    };
    if !is_markup_name(name) {
        log::warn!("[{}] is not a valid markup name; element skipped", name);
        return;
    }

    out.push('<');
    out.push_str(name);
    for (prop, value) in &element.props {
        write_attribute(prop, value, out);
    }

    let is_tag = matches!(element.renderable, Renderable::Tag { .. });
    if is_tag
        && VOID_ELEMENTS.contains(&name)
        && element.children.is_empty()
        && element.render_props.is_empty()
    {
        out.push_str(" />");
        return;
    }
    out.push('>');

    for (slot, instances) in &element.render_props {
        out.push_str("<template slot=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(slot));
        out.push_str("\">");
        for instance in instances {
            write_instance(instance, out);
        }
        out.push_str("</template>");
    }
    for child in &element.children {
        write_instance(child, out);
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Strings as-is, `true` as a bare attribute, `false`/`null` omitted,
/// anything else JSON-encoded.
fn write_attribute(name: &str, value: &JsonValue, out: &mut String) {
    if !is_markup_name(name) {
        log::warn!("[{}] is not a valid attribute name; attribute skipped", name);
        return;
    }
    let text = match value {
        JsonValue::Null | JsonValue::Bool(false) => return,
        JsonValue::Bool(true) => {
            out.push(' ');
            out.push_str(name);
            return;
        }
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    };
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(&text));
    out.push('"');
}

/// An ASCII letter followed by ASCII letters, digits, `-`, `_`, `:` or `.`.
fn is_markup_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}
