use std::sync::Arc;

use bough::reconcile::{Reconciled, Reconciler};
use bough::{ClickEvent, EngineState, ExternalKeys, KeySet, Modifiers, Position, Tree, TreeConfig, TreeNode};

fn keys(list: &[&str]) -> KeySet {
    list.iter().copied().collect()
}

fn data() -> Vec<TreeNode> {
    vec![
        TreeNode::new("a", "a").with_children(vec![TreeNode::new("a1", "a1")]),
        TreeNode::new("b", "b").with_children(vec![TreeNode::new("b1", "b1")]),
    ]
}

fn click() -> ClickEvent {
    ClickEvent::title(Position::default(), Modifiers::NONE)
}

// ============================================================================
// Reconciler
// ============================================================================

#[test]
fn test_initial_state_copies_lists() {
    let external = ExternalKeys::new()
        .with_open_keys(Arc::new(keys(&["a"])))
        .with_selected_keys(Arc::new(keys(&["b1"])));
    let (_, state) = Reconciler::initial_state(&external);

    assert_eq!(state.open_keys, keys(&["a"]));
    assert_eq!(state.selected_keys, keys(&["b1"]));
    assert_eq!(state.half_checked_keys, keys(&["b1"]));
}

#[test]
fn test_uncontrolled_starts_empty() {
    let (_, state) = Reconciler::initial_state(&ExternalKeys::new());
    assert_eq!(state, EngineState::default());
}

#[test]
fn test_same_list_is_ignored() {
    let open = Arc::new(keys(&["a"]));
    let external = ExternalKeys::new().with_open_keys(Arc::clone(&open));
    let (mut reconciler, mut state) = Reconciler::initial_state(&external);
    state.open_keys.insert("b".into());

    let result = reconciler.reconcile(&external, &mut state);
    assert_eq!(result, Reconciled::default());
    assert_eq!(state.open_keys, keys(&["a", "b"]));
}

#[test]
fn test_new_list_with_equal_contents_resets() {
    let external = ExternalKeys::new().with_selected_keys(Arc::new(keys(&["a"])));
    let (mut reconciler, mut state) = Reconciler::initial_state(&external);
    state.selected_keys.insert("b".into());

    let fresh = ExternalKeys::new().with_selected_keys(Arc::new(keys(&["a"])));
    let result = reconciler.reconcile(&fresh, &mut state);
    assert!(result.selected_keys);
    assert!(!result.open_keys);
    assert_eq!(state.selected_keys, keys(&["a"]));
}

#[test]
fn test_dropped_list_empties_set() {
    let external = ExternalKeys::new().with_open_keys(Arc::new(keys(&["a", "b"])));
    let (mut reconciler, mut state) = Reconciler::initial_state(&external);

    let result = reconciler.reconcile(&ExternalKeys::new(), &mut state);
    assert!(result.open_keys);
    assert!(state.open_keys.is_empty());

    // Staying uncontrolled is not a change.
    state.open_keys.insert("a".into());
    let result = reconciler.reconcile(&ExternalKeys::new(), &mut state);
    assert!(!result.any());
    assert_eq!(state.open_keys, keys(&["a"]));
}

#[test]
fn test_half_checked_keys_not_reconciled() {
    let external = ExternalKeys::new().with_selected_keys(Arc::new(keys(&["a1"])));
    let (mut reconciler, mut state) = Reconciler::initial_state(&external);

    let next = ExternalKeys::new().with_selected_keys(Arc::new(keys(&["b1"])));
    reconciler.reconcile(&next, &mut state);
    assert_eq!(state.selected_keys, keys(&["b1"]));
    assert_eq!(state.half_checked_keys, keys(&["a1"]));
}

// ============================================================================
// Tree
// ============================================================================

#[test]
fn test_controlled_tree_keeps_user_changes_until_new_list() {
    let selected = Arc::new(keys(&["a1"]));
    let external = ExternalKeys::new().with_selected_keys(Arc::clone(&selected));
    let tree = Tree::controlled(data(), TreeConfig::new().multiple(), &external).unwrap();

    let b = tree.find(&"b".into()).unwrap();
    tree.toggle_selection(b, &click());
    assert!(!tree.reconcile(&external).any());
    assert_eq!(tree.selected_keys(), keys(&["a1", "b"]));

    let replaced = ExternalKeys::new().with_selected_keys(Arc::new(keys(&["a1"])));
    let result = tree.reconcile(&replaced);
    assert!(result.selected_keys);
    assert_eq!(tree.selected_keys(), keys(&["a1"]));
}

#[test]
fn test_reconcile_marks_dirty_only_on_change() {
    let external = ExternalKeys::new().with_open_keys(Arc::new(keys(&["a"])));
    let tree = Tree::controlled(data(), TreeConfig::new(), &external).unwrap();
    tree.clear_dirty();

    tree.reconcile(&external);
    assert!(!tree.is_dirty());

    tree.reconcile(&ExternalKeys::new().with_open_keys(Arc::new(keys(&["b"]))));
    assert!(tree.is_dirty());
    assert_eq!(tree.open_keys(), keys(&["b"]));
}
