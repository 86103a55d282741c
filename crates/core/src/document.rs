//! Loading JCOD documents from JSON or YAML text.

use crate::{JcodError, JcodNode};
use serde_json::Value as JsonValue;

/// Text format of a JCOD document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
}

impl SourceFormat {
    /// Guesses the format from a file name extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = path.rsplit_once('.')?.1;
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            _ => None,
        }
    }
}

/// Parses a document into its root node list.
///
/// The root may be a single node or a list of nodes.
///
/// # Examples
///
/// ```
/// use jcod_core::{parse_document, SourceFormat};
///
/// let nodes = parse_document(r#"{ "component": "div", "children": "hi" }"#, SourceFormat::Json).unwrap();
/// assert_eq!(nodes.len(), 1);
/// ```
pub fn parse_document(input: &str, format: SourceFormat) -> Result<Vec<JcodNode>, JcodError> {
    let value = match format {
        SourceFormat::Json => serde_json::from_str::<JsonValue>(input)?,
        SourceFormat::Yaml if input.trim().is_empty() => JsonValue::Null,
        SourceFormat::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(input)?;
            serde_json::to_value(yaml)?
        }
    };
    Ok(document_from_value(value))
}

/// Converts an already parsed value into the root node list.
///
/// An empty document (`null`) has no nodes.
pub fn document_from_value(value: JsonValue) -> Vec<JcodNode> {
    if value.is_null() {
        return Vec::new();
    }
    JcodNode::list_from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_list() {
        let nodes = parse_document(
            r#"["text", { "component": "div" }]"#,
            SourceFormat::Json,
        )
        .unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].is_text());
        assert_eq!(nodes[1].as_element().unwrap().component, "div");
    }

    #[test]
    fn yaml_single_root() {
        let source = "component: Card\nkey: intro\nprops:\n  title: Hello\nchildren:\n  - component: p\n    children: Body\n";
        let nodes = parse_document(source, SourceFormat::Yaml).unwrap();
        assert_eq!(nodes.len(), 1);
        let card = nodes[0].as_element().unwrap();
        assert_eq!(card.component, "Card");
        assert_eq!(card.key.as_deref(), Some("intro"));
        assert_eq!(card.props["title"], "Hello");
    }

    #[test]
    fn empty_document() {
        assert!(parse_document("null", SourceFormat::Json).unwrap().is_empty());
        assert!(parse_document("", SourceFormat::Yaml).unwrap().is_empty());
    }

    #[test]
    fn syntax_errors_surface() {
        assert!(matches!(
            parse_document("[", SourceFormat::Json),
            Err(JcodError::Json(_))
        ));
        assert!(matches!(
            parse_document("a: [", SourceFormat::Yaml),
            Err(JcodError::Yaml(_))
        ));
    }

    #[test]
    fn format_from_path() {
        assert_eq!(SourceFormat::from_path("page.json"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_path("page.YML"), Some(SourceFormat::Yaml));
        assert_eq!(SourceFormat::from_path("page"), None);
        assert_eq!(SourceFormat::from_path("page.toml"), None);
    }
}
