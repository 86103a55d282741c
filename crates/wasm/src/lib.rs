use jcod_core::{CollectingSink, JcodNode, ParserOptions, SourceFormat, document_from_value};
use jcod_render::{ContentParser, Instance, to_markup};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Input conversion
// ============================================================================

/// Reads the registered component names. `undefined`/`null` means none.
fn parse_components(components: JsValue) -> Result<Vec<String>, JsError> {
    if components.is_undefined() || components.is_null() {
        return Ok(Vec::new());
    }
    if !js_sys::Array::is_array(&components) {
        return Err(JsError::new("Invalid components: expected an array of names"));
    }
    js_sys::Array::from(&components)
        .iter()
        .enumerate()
        .map(|(index, name)| {
            name.as_string().ok_or_else(|| {
                JsError::new(&format!("Invalid components: entry {} is not a string", index))
            })
        })
        .collect()
}

/// Reads parser options. `undefined`/`null` means defaults.
fn parse_options(options: JsValue) -> Result<ParserOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(ParserOptions::default());
    }
    let value: serde_json::Value = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
    ParserOptions::from_value(value).map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

fn parse_data(data: JsValue) -> Result<Vec<JcodNode>, JsError> {
    if data.is_undefined() {
        return Ok(Vec::new());
    }
    let value: serde_json::Value = serde_wasm_bindgen::from_value(data)
        .map_err(|e| JsError::new(&format!("Invalid data: {}", e)))?;
    Ok(document_from_value(value))
}

// ============================================================================
// Render API Types
// ============================================================================

/// Result of rendering to an instance tree.
#[derive(Debug, Clone, Serialize)]
pub struct TreeResult {
    /// The render root; component references are the registered names.
    pub tree: Instance<String>,
    /// Diagnostic messages, in emission order.
    pub diagnostics: Vec<String>,
}

/// Result of rendering to markup.
#[derive(Debug, Clone, Serialize)]
pub struct MarkupResult {
    /// Static markup of the render root.
    pub markup: String,
    /// Diagnostic messages, in emission order.
    pub diagnostics: Vec<String>,
}

fn render(
    data: Vec<JcodNode>,
    components: Vec<String>,
    options: ParserOptions,
) -> Result<(Instance<String>, Vec<String>), JsError> {
    let sink = CollectingSink::new();
    let parser = ContentParser::builder(data)
        .components(components.into_iter().map(|name| (name.clone(), name)))
        .options(options)
        .sink(sink.clone())
        .build()
        .map_err(|e| JsError::new(&e.to_string()))?;
    let tree = parser.render();
    Ok((tree, sink.messages()))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    // plain objects rather than JS `Map`s for props
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Render API
// ============================================================================

/// Renders a JCOD document to an instance tree.
///
/// # Arguments
///
/// * `data` - A JCOD node or an array of nodes
/// * `components` - Registered component names
/// * `options` - Optional parser options (camelCase keys)
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { render_tree } from './jcod_wasm';
///
/// const { tree, diagnostics } = render_tree(
///   [{ component: 'Card', children: 'Hi' }, { component: 'div' }],
///   ['Card'],
///   { allowUnsecureHtmlElement: true },
/// );
/// // tree = { type: "fragment", children: [{ type: "element", component: "Card", ... }, ...] }
/// // diagnostics = []
/// ```
#[wasm_bindgen]
pub fn render_tree(data: JsValue, components: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let (tree, diagnostics) = render(
        parse_data(data)?,
        parse_components(components)?,
        parse_options(options)?,
    )?;
    to_js(&TreeResult { tree, diagnostics })
}

/// Renders a JCOD document to static markup.
///
/// Takes the same arguments as [`render_tree`].
#[wasm_bindgen]
pub fn render_markup(
    data: JsValue,
    components: JsValue,
    options: JsValue,
) -> Result<JsValue, JsError> {
    let (tree, diagnostics) = render(
        parse_data(data)?,
        parse_components(components)?,
        parse_options(options)?,
    )?;
    to_js(&MarkupResult {
        markup: to_markup(&tree),
        diagnostics,
    })
}

/// Parses JSON or YAML source text and renders it to static markup.
///
/// `format` is `"json"` or `"yaml"`.
#[wasm_bindgen]
pub fn render_source(
    source: &str,
    format: &str,
    components: JsValue,
    options: JsValue,
) -> Result<JsValue, JsError> {
    let format = match format {
        "json" => SourceFormat::Json,
        "yaml" | "yml" => SourceFormat::Yaml,
        other => return Err(JsError::new(&format!("Unknown source format: {}", other))),
    };
    let data = jcod_core::parse_document(source, format)
        .map_err(|e| JsError::new(&format!("Parse error: {}", e)))?;
    let (tree, diagnostics) = render(
        data,
        parse_components(components)?,
        parse_options(options)?,
    )?;
    to_js(&MarkupResult {
        markup: to_markup(&tree),
        diagnostics,
    })
}
