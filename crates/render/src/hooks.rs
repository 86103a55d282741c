//! Decoration hooks applied while walking a tree.

use crate::instance::Instance;
use jcod_core::JcodElement;

/// Context passed to [`Hooks::format`].
#[derive(Debug, Clone, Copy)]
pub struct NodeMetadata<'a> {
    /// Dot-joined position of the node.
    pub path: &'a str,
    /// The node as it appears in the input.
    pub original: &'a JcodElement,
}

/// Hooks called by the tree walker. Every method defaults to identity.
///
/// Text leaves are not passed through any hook.
pub trait Hooks<C> {
    /// Rewrites a node before it is checked, resolved and built.
    fn format(&self, node: JcodElement, _metadata: &NodeMetadata<'_>) -> JcodElement {
        node
    }

    /// Replaces a constructed element instance. `node` is the formatted node
    /// it was built from.
    fn decorate_node(&self, instance: Instance<C>, _node: &JcodElement) -> Instance<C> {
        instance
    }

    /// Replaces the top-level instance list before it is wrapped in a fragment.
    fn decorate_tree(&self, tree: Vec<Instance<C>>) -> Vec<Instance<C>> {
        tree
    }
}

/// Identity hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<C> Hooks<C> for NoHooks {}

type FormatFn = Box<dyn Fn(JcodElement, &NodeMetadata<'_>) -> JcodElement>;
type NodeFn<C> = Box<dyn Fn(Instance<C>, &JcodElement) -> Instance<C>>;
type TreeFn<C> = Box<dyn Fn(Vec<Instance<C>>) -> Vec<Instance<C>>>;

/// Hooks assembled from closures. Unset hooks are identity.
///
/// ```
/// use jcod_render::{HookSet, Instance};
///
/// let hooks: HookSet<String> = HookSet::new()
///     .node_decorator(|instance, _node| instance)
///     .tree_decorator(|mut tree| {
///         tree.push(Instance::text("footer"));
///         tree
///     });
/// ```
pub struct HookSet<C> {
    formatter: Option<FormatFn>,
    node_decorator: Option<NodeFn<C>>,
    tree_decorator: Option<TreeFn<C>>,
}

impl<C> HookSet<C> {
    /// Creates identity hooks.
    pub fn new() -> Self {
        Self {
            formatter: None,
            node_decorator: None,
            tree_decorator: None,
        }
    }

    /// Sets the pre-format hook.
    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(JcodElement, &NodeMetadata<'_>) -> JcodElement + 'static,
    {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Sets the per-node decorator.
    pub fn node_decorator<F>(mut self, decorator: F) -> Self
    where
        F: Fn(Instance<C>, &JcodElement) -> Instance<C> + 'static,
    {
        self.node_decorator = Some(Box::new(decorator));
        self
    }

    /// Sets the whole-tree decorator.
    pub fn tree_decorator<F>(mut self, decorator: F) -> Self
    where
        F: Fn(Vec<Instance<C>>) -> Vec<Instance<C>> + 'static,
    {
        self.tree_decorator = Some(Box::new(decorator));
        self
    }
}

impl<C> Default for HookSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for HookSet<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookSet")
            .field("formatter", &self.formatter.is_some())
            .field("node_decorator", &self.node_decorator.is_some())
            .field("tree_decorator", &self.tree_decorator.is_some())
            .finish()
    }
}

impl<C> Hooks<C> for HookSet<C> {
    fn format(&self, node: JcodElement, metadata: &NodeMetadata<'_>) -> JcodElement {
        match &self.formatter {
            Some(formatter) => formatter(node, metadata),
            None => node,
        }
    }

    fn decorate_node(&self, instance: Instance<C>, node: &JcodElement) -> Instance<C> {
        match &self.node_decorator {
            Some(decorator) => decorator(instance, node),
            None => instance,
        }
    }

    fn decorate_tree(&self, tree: Vec<Instance<C>>) -> Vec<Instance<C>> {
        match &self.tree_decorator {
            Some(decorator) => decorator(tree),
            None => tree,
        }
    }
}
