//! Parser options.
//!
//! [`ParserOptions`] is what callers supply (from Rust or as a camelCase JSON
//! object); [`ParserOptions::resolve`] validates it once and produces the
//! immutable [`ResolvedOptions`] used for every render.

use crate::{JcodError, KeyCase};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Default recursion limit for the tree walk.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Unregistered element names allowed to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllowElements {
    /// `true` allows every name and turns on both element policies.
    All(bool),
    /// Only these exact names.
    List(Vec<String>),
}

impl Default for AllowElements {
    fn default() -> Self {
        AllowElements::All(false)
    }
}

/// Caller-supplied options. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParserOptions {
    /// Allow-list of unregistered names, or `true` for all of them.
    #[serde(default, alias = "allowElements")]
    pub allow_unsecure_elements: AllowElements,
    /// Render unregistered lowercase, hyphen-free names as HTML tags.
    #[serde(default, alias = "htmlElement")]
    pub allow_unsecure_html_element: bool,
    /// Render unregistered hyphenated names as custom elements.
    #[serde(default, alias = "customElement")]
    pub allow_unsecure_custom_element: bool,
    /// Emit diagnostics.
    #[serde(default = "default_display_error_message")]
    pub display_error_message: bool,
    /// Stringify `props.children` instead of rendering it as nodes when it is
    /// the only children source.
    #[serde(default)]
    pub legacy_props_children: bool,
    /// Case policy for registry keys.
    #[serde(default)]
    pub component_key_case: KeyCase,
    /// Deepest node level that is expanded.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_display_error_message() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_unsecure_elements: AllowElements::default(),
            allow_unsecure_html_element: false,
            allow_unsecure_custom_element: false,
            display_error_message: default_display_error_message(),
            legacy_props_children: false,
            component_key_case: KeyCase::default(),
            max_depth: default_max_depth(),
        }
    }
}

impl ParserOptions {
    /// Reads options from a JSON object. `null` yields the defaults.
    pub fn from_value(value: JsonValue) -> Result<Self, JcodError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Validates the options and merges them over the defaults.
    ///
    /// A wildcard `allowUnsecureElements: true` forces both element policies
    /// on in the result; the caller's value is left untouched.
    pub fn resolve(&self) -> Result<ResolvedOptions, JcodError> {
        if self.max_depth == 0 {
            return Err(JcodError::invalid_option(
                "maxDepth",
                "must be at least 1",
            ));
        }

        let (allow_all_elements, allowed_elements) = match &self.allow_unsecure_elements {
            AllowElements::All(all) => (*all, Vec::new()),
            AllowElements::List(names) => {
                if let Some(position) = names.iter().position(|n| n.trim().is_empty()) {
                    return Err(JcodError::invalid_option(
                        "allowUnsecureElements",
                        format!("entry {} is an empty name", position),
                    ));
                }
                (false, names.clone())
            }
        };

        Ok(ResolvedOptions {
            allow_all_elements,
            allowed_elements,
            allow_unsecure_html_element: self.allow_unsecure_html_element || allow_all_elements,
            allow_unsecure_custom_element: self.allow_unsecure_custom_element
                || allow_all_elements,
            display_error_message: self.display_error_message,
            legacy_props_children: self.legacy_props_children,
            component_key_case: self.component_key_case,
            max_depth: self.max_depth,
        })
    }
}

/// Effective, validated options for one parser instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    allow_all_elements: bool,
    allowed_elements: Vec<String>,
    allow_unsecure_html_element: bool,
    allow_unsecure_custom_element: bool,
    display_error_message: bool,
    legacy_props_children: bool,
    component_key_case: KeyCase,
    max_depth: usize,
}

impl ResolvedOptions {
    /// Returns whether `name` passes the allow-list (or the wildcard).
    pub fn is_allow_listed(&self, name: &str) -> bool {
        self.allow_all_elements || self.allowed_elements.iter().any(|n| n == name)
    }

    /// Returns whether every unregistered name is allowed.
    pub fn allow_all_elements(&self) -> bool {
        self.allow_all_elements
    }

    /// Returns the explicit allow-list.
    pub fn allowed_elements(&self) -> &[String] {
        &self.allowed_elements
    }

    /// Returns whether html-like names render as tags.
    pub fn allow_unsecure_html_element(&self) -> bool {
        self.allow_unsecure_html_element
    }

    /// Returns whether custom-element-like names render as tags.
    pub fn allow_unsecure_custom_element(&self) -> bool {
        self.allow_unsecure_custom_element
    }

    /// Returns whether diagnostics are emitted.
    pub fn display_error_message(&self) -> bool {
        self.display_error_message
    }

    /// Returns whether `props.children` is stringified.
    pub fn legacy_props_children(&self) -> bool {
        self.legacy_props_children
    }

    /// Returns the registry key case policy.
    pub fn component_key_case(&self) -> KeyCase {
        self.component_key_case
    }

    /// Returns the recursion limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            allow_all_elements: false,
            allowed_elements: Vec::new(),
            allow_unsecure_html_element: false,
            allow_unsecure_custom_element: false,
            display_error_message: true,
            legacy_props_children: false,
            component_key_case: KeyCase::Preserve,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let resolved = ParserOptions::default().resolve().unwrap();
        assert_eq!(resolved, ResolvedOptions::default());
        assert!(resolved.display_error_message());
        assert!(!resolved.allow_unsecure_html_element());
        assert!(!resolved.is_allow_listed("div"));
    }

    #[test]
    fn wildcard_forces_both_element_policies() {
        let options = ParserOptions {
            allow_unsecure_elements: AllowElements::All(true),
            ..Default::default()
        };
        let resolved = options.resolve().unwrap();
        assert!(resolved.allow_unsecure_html_element());
        assert!(resolved.allow_unsecure_custom_element());
        assert!(resolved.is_allow_listed("Anything"));
        // caller-supplied options are untouched
        assert!(!options.allow_unsecure_html_element);
    }

    #[test]
    fn allow_list_is_exact() {
        let options = ParserOptions::from_value(json!({
            "allowUnsecureElements": ["section", "x-card"]
        }))
        .unwrap();
        let resolved = options.resolve().unwrap();
        assert!(resolved.is_allow_listed("section"));
        assert!(resolved.is_allow_listed("x-card"));
        assert!(!resolved.is_allow_listed("div"));
        assert!(!resolved.allow_unsecure_html_element());
    }

    #[test]
    fn camel_case_fields_and_legacy_aliases() {
        let options = ParserOptions::from_value(json!({
            "htmlElement": true,
            "allowUnsecureCustomElement": true,
            "displayErrorMessage": false,
            "componentKeyCase": "kebab",
            "maxDepth": 8
        }))
        .unwrap();
        assert!(options.allow_unsecure_html_element);
        assert!(options.allow_unsecure_custom_element);
        assert!(!options.display_error_message);
        assert_eq!(options.component_key_case, KeyCase::Kebab);
        assert_eq!(options.max_depth, 8);
    }

    #[test]
    fn null_is_default() {
        assert_eq!(
            ParserOptions::from_value(JsonValue::Null).unwrap(),
            ParserOptions::default()
        );
    }

    #[test]
    fn malformed_shapes_fail_fast() {
        assert!(matches!(
            ParserOptions::from_value(json!({ "allowUnsecureElements": 42 })),
            Err(JcodError::Json(_))
        ));
        assert!(matches!(
            ParserOptions::from_value(json!({ "allowUnsecureHtml": true })),
            Err(JcodError::Json(_))
        ));
        assert!(matches!(
            ParserOptions::from_value(json!({ "componentKeyCase": "shouting" })),
            Err(JcodError::Json(_))
        ));
    }

    #[test]
    fn invalid_values_fail_on_resolve() {
        let zero_depth = ParserOptions {
            max_depth: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_depth.resolve(),
            Err(JcodError::InvalidOptions { field: "maxDepth", .. })
        ));

        let empty_name = ParserOptions {
            allow_unsecure_elements: AllowElements::List(vec!["div".into(), " ".into()]),
            ..Default::default()
        };
        let err = empty_name.resolve().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid option `allowUnsecureElements`: entry 1 is an empty name"
        );
    }
}
