//! Component resolution policy.
//!
//! A declared name resolves, first match wins, to:
//! 1. the registered component,
//! 2. a tag, when the name is allow-listed (or the wildcard is on),
//! 3. a tag, when it looks like a custom element and those are allowed,
//! 4. a tag, when it looks like an HTML element and those are allowed,
//! 5. the null renderer, with a diagnostic.

use crate::instance::Renderable;
use crate::registry::Registry;
use jcod_core::{Diagnostic, ResolvedOptions};

/// Kind of element a name looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Lowercase without hyphen, e.g. `div`.
    Html,
    /// Contains a hyphen, e.g. `my-widget`.
    CustomElement,
    /// Anything else, e.g. `MyWidget`.
    Component,
}

/// True when the name has no uppercase letter and no hyphen.
pub fn is_html_like(name: &str) -> bool {
    !name.chars().any(|c| c.is_ascii_uppercase() || c == '-')
}

/// True when the name contains a hyphen.
pub fn is_custom_element_like(name: &str) -> bool {
    name.contains('-')
}

/// Classifies a name. The two element predicates never both hold.
pub fn classify(name: &str) -> ElementKind {
    if is_custom_element_like(name) {
        ElementKind::CustomElement
    } else if is_html_like(name) {
        ElementKind::Html
    } else {
        ElementKind::Component
    }
}

/// Which rule admitted the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Found in the registry.
    Registered,
    /// Admitted by the allow-list or the wildcard.
    AllowListed,
    /// Admitted as a custom element.
    CustomElement,
    /// Admitted as an HTML element.
    HtmlElement,
    /// Not admitted.
    Null,
}

/// Outcome of resolving one name.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<C> {
    /// What to render with.
    pub renderable: Renderable<C>,
    /// Which rule matched.
    pub kind: ResolutionKind,
    /// Set when the null renderer was chosen and diagnostics are enabled.
    /// Its path is empty; callers locate it with [`Diagnostic::at`].
    pub diagnostic: Option<Diagnostic>,
}

/// Resolves a declared component name.
pub fn resolve<C: Clone>(
    name: &str,
    registry: &Registry<C>,
    options: &ResolvedOptions,
) -> Resolution<C> {
    if let Some(component) = registry.get(name) {
        return admitted(
            Renderable::Component {
                reference: component.clone(),
            },
            ResolutionKind::Registered,
        );
    }

    // The empty name comes from nodes without a usable `component`.
    if !name.is_empty() {
        let tag = || Renderable::Tag {
            name: name.to_string(),
        };
        if options.is_allow_listed(name) {
            return admitted(tag(), ResolutionKind::AllowListed);
        }
        let custom_element_like = is_custom_element_like(name);
        if custom_element_like && options.allow_unsecure_custom_element() {
            return admitted(tag(), ResolutionKind::CustomElement);
        }
        if is_html_like(name) && options.allow_unsecure_html_element() {
            return admitted(tag(), ResolutionKind::HtmlElement);
        }
    }

    let diagnostic = options
        .display_error_message()
        .then(|| Diagnostic::UnavailableComponent {
            component: name.to_string(),
            path: String::new(),
            html_like: !name.is_empty() && is_html_like(name),
            custom_element_like: is_custom_element_like(name),
        });

    Resolution {
        renderable: Renderable::Null,
        kind: ResolutionKind::Null,
        diagnostic,
    }
}

fn admitted<C>(renderable: Renderable<C>, kind: ResolutionKind) -> Resolution<C> {
    Resolution {
        renderable,
        kind,
        diagnostic: None,
    }
}
