//! Tree widget state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::debug;

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::events::{ClickEvent, ExpandEvent, SelectEvent};
use crate::expansion::{ExpansionChange, all_keys, toggle_open};
use crate::graph::{NodeGraph, NodeId};
use crate::item::TreeItem;
use crate::key::{KeySet, TreeKey};
use crate::reconcile::{ExternalKeys, Reconciled, Reconciler};
use crate::render::{RenderTitleNode, TreeRenderer};
use crate::selection::{SelectionChange, toggle_selection};
use crate::view::{NodeView, derive_views, visible_views};

/// Unique identifier for a Tree widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(usize);

impl TreeId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__tree_{}", self.0)
    }
}

/// Key sets held by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    /// Keys of expanded nodes.
    pub open_keys: KeySet,
    /// Keys of selected nodes.
    pub selected_keys: KeySet,
    /// The selected keys at construction. Never updated; renderers get the
    /// half-checked flag from [`NodeView`] instead.
    pub half_checked_keys: KeySet,
}

type ExpandCallback<T> = Arc<dyn Fn(&ExpandEvent<'_, T>) + Send + Sync>;
type SelectCallback<T> = Arc<dyn Fn(&SelectEvent<'_, T>) + Send + Sync>;

/// Internal state for the Tree widget.
pub(crate) struct TreeInner<T: TreeItem> {
    /// Root items.
    roots: Vec<T>,
    /// Parent/child links for `roots`.
    graph: NodeGraph,
    config: TreeConfig,
    state: EngineState,
    reconciler: Reconciler,
    /// Whether `mount` already ran.
    mounted: bool,
    on_expand: Option<ExpandCallback<T>>,
    on_selected: Option<SelectCallback<T>>,
}

impl<T: TreeItem> fmt::Debug for TreeInner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeInner")
            .field("roots", &self.roots.len())
            .field("graph", &self.graph.len())
            .field("config", &self.config)
            .field("state", &self.state)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

fn build_graph<T: TreeItem>(roots: &[T], config: &TreeConfig) -> Result<NodeGraph, TreeError> {
    let graph = NodeGraph::build(roots, config.max_depth)?;
    if config.validate_keys {
        graph.validate_keys()?;
    }
    Ok(graph)
}

/// A tree widget with expand/collapse and selection state.
///
/// `Tree<T>` is a cheap handle: clones share the same state. It owns the
/// items it was given and keeps parent links in its own [`NodeGraph`], so
/// two trees built from copies of the same data never interfere.
///
/// # Example
///
/// ```
/// use bough::{ClickEvent, Modifiers, Position, Tree, TreeConfig, TreeNode};
///
/// let data = vec![TreeNode::new("src", "src").with_children(vec![
///     TreeNode::new("main.rs", "main.rs"),
///     TreeNode::new("lib.rs", "lib.rs"),
/// ])];
/// let tree = Tree::new(data, TreeConfig::new().checkable())
///     .unwrap()
///     .on_selected(|event| println!("{} -> {}", event.key, event.selected));
/// tree.mount();
///
/// let click = ClickEvent::title(Position::default(), Modifiers::NONE);
/// let src = tree.find(&"src".into()).unwrap();
/// tree.toggle_selection(src, &click);
/// assert_eq!(tree.selected_keys().len(), 3);
/// ```
pub struct Tree<T: TreeItem> {
    /// Unique identifier.
    id: TreeId,
    /// Internal state.
    inner: Arc<RwLock<TreeInner<T>>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl<T: TreeItem> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("id", &self.id)
            .field("inner", &self.inner)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl<T: TreeItem> Tree<T> {
    /// Create an uncontrolled tree.
    pub fn new(roots: Vec<T>, config: TreeConfig) -> Result<Self, TreeError> {
        Self::controlled(roots, config, &ExternalKeys::default())
    }

    /// Create a tree seeded from external key lists.
    ///
    /// Later calls to [`Tree::reconcile`] compare against these lists.
    pub fn controlled(
        roots: Vec<T>,
        config: TreeConfig,
        external: &ExternalKeys,
    ) -> Result<Self, TreeError> {
        let graph = build_graph(&roots, &config)?;
        let (reconciler, state) = Reconciler::initial_state(external);
        let id = TreeId::new();
        debug!("Created tree {} with {} nodes", id, graph.len());
        Ok(Self {
            id,
            inner: Arc::new(RwLock::new(TreeInner {
                roots,
                graph,
                config,
                state,
                reconciler,
                mounted: false,
                on_expand: None,
                on_selected: None,
            })),
            dirty: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Register the expand callback.
    pub fn on_expand(self, f: impl Fn(&ExpandEvent<'_, T>) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_expand = Some(Arc::new(f));
        }
        self
    }

    /// Register the selection callback.
    pub fn on_selected(self, f: impl Fn(&SelectEvent<'_, T>) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_selected = Some(Arc::new(f));
        }
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Apply mount-time settings. Only the first call has an effect.
    ///
    /// With `default_expand_all`, every key in the data becomes open, leaves
    /// included.
    pub fn mount(&self) {
        if let Ok(mut guard) = self.inner.write() {
            if guard.mounted {
                return;
            }
            guard.mounted = true;
            if guard.config.default_expand_all {
                guard.state.open_keys = all_keys(&guard.graph);
                debug!(
                    "Tree {} expanded all: {} keys",
                    self.id,
                    guard.state.open_keys.len()
                );
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Replace the items. Key state is kept as is.
    pub fn set_data(&self, roots: Vec<T>) -> Result<(), TreeError> {
        if let Ok(mut guard) = self.inner.write() {
            guard.graph = build_graph(&roots, &guard.config)?;
            guard.roots = roots;
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    /// Replace the configuration. The graph is rebuilt so the depth bound and
    /// key validation apply to the current data.
    pub fn set_config(&self, config: TreeConfig) -> Result<(), TreeError> {
        if let Ok(mut guard) = self.inner.write() {
            guard.graph = build_graph(&guard.roots, &config)?;
            guard.config = config;
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    /// Sync controlled key lists. See [`Reconciler::reconcile`].
    pub fn reconcile(&self, external: &ExternalKeys) -> Reconciled {
        let Ok(mut guard) = self.inner.write() else {
            return Reconciled::default();
        };
        let inner = &mut *guard;
        let result = inner.reconciler.reconcile(external, &mut inner.state);
        if result.any() {
            self.dirty.store(true, Ordering::SeqCst);
        }
        result
    }

    // -------------------------------------------------------------------------
    // Item access
    // -------------------------------------------------------------------------

    /// Get the root items.
    pub fn roots(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.roots.clone())
            .unwrap_or_default()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.graph.len()).unwrap_or(0)
    }

    /// Check if the tree has no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First node carrying `key`, in preorder.
    pub fn find(&self, key: &TreeKey) -> Option<NodeId> {
        self.inner.read().ok().and_then(|g| g.graph.find(key))
    }

    /// Get an item by node id.
    pub fn node(&self, id: NodeId) -> Option<T> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.graph.resolve(&g.roots, id).cloned())
    }

    /// A copy of the node graph.
    pub fn graph(&self) -> NodeGraph {
        self.inner
            .read()
            .map(|g| g.graph.clone())
            .unwrap_or_default()
    }

    /// Current configuration.
    pub fn config(&self) -> TreeConfig {
        self.inner
            .read()
            .map(|g| g.config.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // State access
    // -------------------------------------------------------------------------

    /// A copy of all key sets.
    pub fn state(&self) -> EngineState {
        self.inner
            .read()
            .map(|g| g.state.clone())
            .unwrap_or_default()
    }

    /// Keys of expanded nodes.
    pub fn open_keys(&self) -> KeySet {
        self.inner
            .read()
            .map(|g| g.state.open_keys.clone())
            .unwrap_or_default()
    }

    /// Keys of selected nodes.
    pub fn selected_keys(&self) -> KeySet {
        self.inner
            .read()
            .map(|g| g.state.selected_keys.clone())
            .unwrap_or_default()
    }

    /// The half-checked keys recorded at construction.
    pub fn half_checked_keys(&self) -> KeySet {
        self.inner
            .read()
            .map(|g| g.state.half_checked_keys.clone())
            .unwrap_or_default()
    }

    /// Check if a key is open.
    pub fn is_open(&self, key: &TreeKey) -> bool {
        self.inner
            .read()
            .map(|g| g.state.open_keys.contains(key))
            .unwrap_or(false)
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &TreeKey) -> bool {
        self.inner
            .read()
            .map(|g| g.state.selected_keys.contains(key))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Switcher click: open or close `node`.
    ///
    /// Leaves, keyless nodes and unknown ids are ignored and do not reach
    /// the callback. The callback runs after the new state is committed.
    pub fn toggle_expansion(&self, node: NodeId, origin: &ClickEvent) -> Option<ExpansionChange> {
        let (change, item, callback) = {
            let mut guard = self.inner.write().ok()?;
            let change = toggle_open(&guard.graph, &guard.state.open_keys, node)?;
            guard.state.open_keys = change.open_keys.clone();
            let item = guard.graph.resolve(&guard.roots, node).cloned();
            (change, item, guard.on_expand.clone())
        };
        self.dirty.store(true, Ordering::SeqCst);

        if let (Some(callback), Some(item)) = (callback, item) {
            callback(&ExpandEvent {
                key: &change.key,
                expanded: change.expanded,
                node: &item,
                origin,
            });
        }
        Some(change)
    }

    /// Title click: toggle the selection of `node` under the configured
    /// policy.
    ///
    /// Keyless nodes and unknown ids are ignored. The callback runs after
    /// the new state is committed.
    pub fn toggle_selection(&self, node: NodeId, origin: &ClickEvent) -> Option<SelectionChange> {
        let (change, item, callback) = {
            let mut guard = self.inner.write().ok()?;
            let policy = guard.config.selection_policy();
            let change = toggle_selection(&guard.graph, &guard.state.selected_keys, node, policy)?;
            guard.state.selected_keys = change.selected_keys.clone();
            let item = guard.graph.resolve(&guard.roots, node).cloned();
            (change, item, guard.on_selected.clone())
        };
        self.dirty.store(true, Ordering::SeqCst);

        if let (Some(callback), Some(item)) = (callback, item) {
            callback(&SelectEvent {
                selected_keys: &change.selected_keys,
                key: &change.key,
                selected: change.selected,
                node: &item,
                origin,
            });
        }
        Some(change)
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    /// Derived flags for every node, in preorder.
    pub fn views(&self) -> Vec<NodeView> {
        self.inner
            .read()
            .map(|g| derive_views(&g.graph, &g.state))
            .unwrap_or_default()
    }

    /// Derived flags for the nodes whose ancestors are all open.
    pub fn visible_views(&self) -> Vec<NodeView> {
        self.inner
            .read()
            .map(|g| visible_views(&g.graph, &g.state))
            .unwrap_or_default()
    }

    /// Derived flags for one node.
    pub fn view(&self, id: NodeId) -> Option<NodeView> {
        self.views().into_iter().nth(id.index())
    }

    /// Run `renderer` over the visible nodes, in display order.
    pub fn render_with<R: TreeRenderer<T>>(&self, renderer: &R) -> Vec<R::Output> {
        let Ok(guard) = self.inner.read() else {
            return Vec::new();
        };
        let presentation = guard.config.presentation();
        visible_views(&guard.graph, &guard.state)
            .iter()
            .filter_map(|view| {
                let item = guard.graph.resolve(&guard.roots, view.id)?;
                let title = RenderTitleNode {
                    selected: view.selected,
                    no_child: view.no_child,
                    is_half_checked: view.is_half_checked,
                    open_keys: &guard.state.open_keys,
                    selected_keys: &guard.state.selected_keys,
                };
                Some(renderer.render_node(item, view, &title, &presentation))
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the tree has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T: TreeItem> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
