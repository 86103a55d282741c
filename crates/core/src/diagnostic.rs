//! Non-fatal diagnostics and the sinks that receive them.
//!
//! Every anomaly found while rendering is contained to its node: the node is
//! degraded (ignored key, lower-precedence children dropped, null renderer)
//! and a [`Diagnostic`] is handed to the configured [`DiagnosticSink`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One of the three places a node's children can be declared, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChildrenSource {
    /// `node.children`
    Root,
    /// `node.renderProps.children`
    RenderProps,
    /// `node.props.children`
    Props,
}

impl fmt::Display for ChildrenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildrenSource::Root => f.write_str("[ROOT]"),
            ChildrenSource::RenderProps => f.write_str("[renderProps]"),
            ChildrenSource::Props => f.write_str("[props]"),
        }
    }
}

/// Deprecated position of a `key` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLocation {
    /// `node.props.key`
    Props,
    /// `node.renderProps.key`
    RenderProps,
}

impl fmt::Display for KeyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyLocation::Props => f.write_str("props.key"),
            KeyLocation::RenderProps => f.write_str("renderProps.key"),
        }
    }
}

/// A non-fatal anomaly found while resolving or walking a node.
///
/// `Display` yields the self-contained message written to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The component could not be resolved; the null renderer was used.
    UnavailableComponent {
        /// Declared component name.
        component: String,
        /// Dot-joined position; empty when resolved outside a walk.
        path: String,
        /// The name looks like an HTML tag.
        html_like: bool,
        /// The name looks like a custom element.
        custom_element_like: bool,
    },
    /// More than one children source was declared.
    AmbiguousChildren {
        /// Declared component name.
        component: String,
        /// Dot-joined position.
        path: String,
        /// Every present source, highest precedence first.
        sources: Vec<ChildrenSource>,
    },
    /// A `key` was declared outside the node root and ignored.
    IgnoredKey {
        /// Declared component name.
        component: String,
        /// Dot-joined position.
        path: String,
        /// Where the key was found.
        location: KeyLocation,
        /// The ignored value.
        value: String,
    },
    /// The node is nested deeper than the configured limit.
    DepthExceeded {
        /// Declared component name.
        component: String,
        /// Dot-joined position.
        path: String,
        /// Configured limit.
        max_depth: usize,
    },
}

impl Diagnostic {
    /// Returns the declared component name this diagnostic is about.
    pub fn component(&self) -> &str {
        match self {
            Diagnostic::UnavailableComponent { component, .. }
            | Diagnostic::AmbiguousChildren { component, .. }
            | Diagnostic::IgnoredKey { component, .. }
            | Diagnostic::DepthExceeded { component, .. } => component,
        }
    }

    /// Returns the node position.
    pub fn path(&self) -> &str {
        match self {
            Diagnostic::UnavailableComponent { path, .. }
            | Diagnostic::AmbiguousChildren { path, .. }
            | Diagnostic::IgnoredKey { path, .. }
            | Diagnostic::DepthExceeded { path, .. } => path,
        }
    }

    /// Returns this diagnostic with its position set.
    pub fn at(mut self, position: &str) -> Self {
        match &mut self {
            Diagnostic::UnavailableComponent { path, .. }
            | Diagnostic::AmbiguousChildren { path, .. }
            | Diagnostic::IgnoredKey { path, .. }
            | Diagnostic::DepthExceeded { path, .. } => {
                *path = position.to_string();
            }
        }
        self
    }
}

/// `[Name // in position 0.1]`, or `[Name]` without a position.
struct Located<'a>(&'a str, &'a str);

impl fmt::Display for Located<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.1.is_empty() {
            write!(f, "[{}]", self.0)
        } else {
            write!(f, "[{} // in position {}]", self.0, self.1)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnavailableComponent {
                component,
                path,
                html_like,
                custom_element_like,
            } => {
                write!(
                    f,
                    "{} can not be rendered: \n  it is not an available component.",
                    Located(component, path)
                )?;
                if *html_like {
                    write!(
                        f,
                        "\n> [{0}] seems to be a [HTML Element <{0}>]. \n  Maybe should you set the 'allowUnsecureHtmlElement' option to true ?",
                        component
                    )?;
                }
                if *custom_element_like {
                    write!(
                        f,
                        "\n> [{0}] seems to be a [Custom Element <{0}>]. \n  Maybe should you set the 'allowUnsecureCustomElement' option to true ?",
                        component
                    )?;
                }
                Ok(())
            }
            Diagnostic::AmbiguousChildren {
                component,
                path,
                sources,
            } => {
                let names: Vec<String> = sources.iter().map(ToString::to_string).collect();
                let used = names.first().map(String::as_str).unwrap_or_default();
                write!(
                    f,
                    "The children of component {} have several values defined in {}. The value of the children used is the one defined in {}. Other values are ignored.",
                    Located(component, path),
                    join_words(&names),
                    used
                )
            }
            Diagnostic::IgnoredKey {
                component,
                path,
                location,
                value,
            } => write!(
                f,
                "The [{}] with the value '{}' of component {} is ignored. The key value, when defined, must be set in the ROOT of JCOD node.",
                location,
                value,
                Located(component, path)
            ),
            Diagnostic::DepthExceeded {
                component,
                path,
                max_depth,
            } => write!(
                f,
                "The component {} is nested deeper than the maximum depth of {}. Its subtree is not rendered.",
                Located(component, path),
                max_depth
            ),
        }
    }
}

/// Joins words as prose: `a`, `a and b`, `a, b and c`.
///
/// # Examples
///
/// ```
/// use jcod_core::join_words;
///
/// assert_eq!(join_words(&["first", "second", "third"]), "first, second and third");
/// ```
pub fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    match words {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Receives diagnostics during rendering.
pub trait DiagnosticSink {
    /// Handles one diagnostic.
    fn emit(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn emit(&self, diagnostic: &Diagnostic) {
        (self)(diagnostic)
    }
}

/// Writes every diagnostic through the `log` facade at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        log::error!("{}", diagnostic);
    }
}

/// Keeps diagnostics in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    entries: Rc<RefCell<Vec<Diagnostic>>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything collected so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    /// Returns the collected messages.
    pub fn messages(&self) -> Vec<String> {
        self.entries.borrow().iter().map(ToString::to_string).collect()
    }

    /// Removes and returns everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    /// Number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.entries.borrow_mut().push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_words_lists() {
        let words = ["first", "second", "third", "fourth"];
        assert_eq!(join_words(&words), "first, second, third and fourth");
        assert_eq!(join_words(&words[..3]), "first, second and third");
        assert_eq!(join_words(&words[..2]), "first and second");
        assert_eq!(join_words(&words[..1]), "first");
        assert_eq!(join_words::<&str>(&[]), "");
    }

    #[test]
    fn ambiguous_children_message() {
        let diagnostic = Diagnostic::AmbiguousChildren {
            component: "React".into(),
            path: "0.0.1".into(),
            sources: vec![
                ChildrenSource::Root,
                ChildrenSource::RenderProps,
                ChildrenSource::Props,
            ],
        };
        assert_eq!(
            diagnostic.to_string(),
            "The children of component [React // in position 0.0.1] have several values defined in [ROOT], [renderProps] and [props]. The value of the children used is the one defined in [ROOT]. Other values are ignored."
        );
    }

    #[test]
    fn ignored_key_message() {
        let diagnostic = Diagnostic::IgnoredKey {
            component: "React".into(),
            path: "0.0.1".into(),
            location: KeyLocation::RenderProps,
            value: "any key".into(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "The [renderProps.key] with the value 'any key' of component [React // in position 0.0.1] is ignored. The key value, when defined, must be set in the ROOT of JCOD node."
        );
    }

    #[test]
    fn unavailable_message_suggests_flag() {
        let html = Diagnostic::UnavailableComponent {
            component: "div".into(),
            path: String::new(),
            html_like: true,
            custom_element_like: false,
        };
        let message = html.to_string();
        assert!(message.starts_with("[div] can not be rendered"));
        assert!(message.contains("'allowUnsecureHtmlElement'"));
        assert!(!message.contains("'allowUnsecureCustomElement'"));

        let located = html.at("2.1");
        assert_eq!(located.path(), "2.1");
        assert!(located.to_string().starts_with("[div // in position 2.1]"));

        let component = Diagnostic::UnavailableComponent {
            component: "Missing".into(),
            path: "0".into(),
            html_like: false,
            custom_element_like: false,
        };
        assert!(!component.to_string().contains("Maybe"));
    }

    #[test]
    fn collecting_sink_shares_buffer() {
        let sink = CollectingSink::new();
        let handle = sink.clone();
        handle.emit(&Diagnostic::DepthExceeded {
            component: "Deep".into(),
            path: "0.0".into(),
            max_depth: 1,
        });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.diagnostics()[0].component(), "Deep");
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn closures_are_sinks() {
        let seen = RefCell::new(Vec::new());
        let sink = |d: &Diagnostic| seen.borrow_mut().push(d.path().to_string());
        sink.emit(&Diagnostic::DepthExceeded {
            component: "x".into(),
            path: "3".into(),
            max_depth: 2,
        });
        assert_eq!(seen.into_inner(), vec!["3".to_string()]);
    }
}
