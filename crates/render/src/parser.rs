//! The content parser: a JCOD tree plus everything needed to render it.

use crate::hooks::{Hooks, NoHooks};
use crate::instance::Instance;
use crate::registry::Registry;
use crate::walker::Walker;
use jcod_core::{
    DiagnosticSink, JcodError, JcodNode, LogSink, ParserOptions, ResolvedOptions, SourceFormat,
    parse_document,
};

/// Renders one JCOD tree against a component registry.
///
/// Configuration is validated and the registry normalized once, at
/// [`ContentParserBuilder::build`]; [`ContentParser::render`] can then be
/// called any number of times and always yields structurally equal trees.
///
/// # Examples
///
/// ```
/// use jcod_core::{JcodElement, JcodNode, ParserOptions};
/// use jcod_render::{ContentParser, to_markup};
///
/// let root = JcodNode::from(JcodElement::new("p").with_children("Hello"));
/// let parser = ContentParser::builder([root])
///     .component("Card", "card")
///     .options(ParserOptions {
///         allow_unsecure_html_element: true,
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(to_markup(&parser.render()), "<p>Hello</p>");
/// ```
pub struct ContentParser<C> {
    data: Vec<JcodNode>,
    registry: Registry<C>,
    options: ResolvedOptions,
    hooks: Box<dyn Hooks<C>>,
    sink: Box<dyn DiagnosticSink>,
}

impl<C: Clone> ContentParser<C> {
    /// Starts configuring a parser for `data`, the root node list.
    pub fn builder<I>(data: I) -> ContentParserBuilder<C>
    where
        I: IntoIterator<Item = JcodNode>,
    {
        ContentParserBuilder {
            data: data.into_iter().collect(),
            components: Vec::new(),
            options: ParserOptions::default(),
            hooks: None,
            sink: None,
        }
    }

    /// Starts configuring a parser from JSON or YAML source text.
    pub fn from_source(
        input: &str,
        format: SourceFormat,
    ) -> Result<ContentParserBuilder<C>, JcodError> {
        Ok(Self::builder(parse_document(input, format)?))
    }

    /// Renders the whole tree.
    ///
    /// The top-level instances go through [`Hooks::decorate_tree`] and are
    /// returned wrapped in an [`Instance::Fragment`].
    pub fn render(&self) -> Instance<C> {
        let walker = Walker {
            registry: &self.registry,
            options: &self.options,
            hooks: &*self.hooks,
            sink: &*self.sink,
        };
        let tree = walker.render_list(&self.data, "", 0);
        log::debug!("rendered {} top-level JCOD nodes", tree.len());
        Instance::Fragment {
            children: self.hooks.decorate_tree(tree),
        }
    }

    /// Root node list.
    pub fn data(&self) -> &[JcodNode] {
        &self.data
    }

    /// Normalized registry.
    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    /// Effective options.
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }
}

impl<C> std::fmt::Debug for ContentParser<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentParser")
            .field("data", &self.data)
            .field("components", &self.registry.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ContentParser`].
pub struct ContentParserBuilder<C> {
    data: Vec<JcodNode>,
    components: Vec<(String, C)>,
    options: ParserOptions,
    hooks: Option<Box<dyn Hooks<C>>>,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl<C: Clone> ContentParserBuilder<C> {
    /// Registers one component.
    pub fn component(mut self, name: impl Into<String>, component: C) -> Self {
        self.components.push((name.into(), component));
        self
    }

    /// Registers components. Later entries win on name collisions.
    pub fn components<I, K>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
    {
        self.components
            .extend(components.into_iter().map(|(name, c)| (name.into(), c)));
        self
    }

    /// Sets the options; unset fields keep their defaults.
    pub fn options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the hooks. Defaults to [`NoHooks`].
    pub fn hooks<H: Hooks<C> + 'static>(mut self, hooks: H) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    /// Sets the diagnostic sink. Defaults to [`LogSink`].
    pub fn sink<S: DiagnosticSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Validates the options and normalizes the registry.
    pub fn build(self) -> Result<ContentParser<C>, JcodError>
    where
        C: 'static,
    {
        let options = self.options.resolve()?;
        let registry = Registry::new(self.components, options.component_key_case());

        Ok(ContentParser {
            data: self.data,
            registry,
            options,
            hooks: self.hooks.unwrap_or_else(|| Box::new(NoHooks)),
            sink: self.sink.unwrap_or_else(|| Box::new(LogSink)),
        })
    }
}
