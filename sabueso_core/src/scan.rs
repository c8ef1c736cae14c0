//! The hierarchy scanner: one pass over a rooted subtree, classifying
//! descendants by their attached component tags and surfacing the outermost
//! roots of linked sub-hierarchy instances.

use std::collections::HashSet;

use crate::error::{ScanError, ScanResult};
use crate::ids::NodeID;
use crate::scene::graph::SceneQuery;
use crate::tags::{display_info, ComponentTag};

/// Ancestry label for direct children of the scan root.
pub const ANCESTRY_ROOT: &str = "AvatarRoot";

/// Everything one scan needs. Built fresh per invocation; holds no state.
#[derive(Clone, Debug, Default)]
pub struct ScanRequest {
    /// `None` means "nothing to scan" and yields an empty result, not an
    /// error: the caller may simply not have picked a root yet.
    pub root: Option<NodeID>,
    pub tags: HashSet<ComponentTag>,
    pub include_linked_roots: bool,
}

impl ScanRequest {
    pub fn new(root: NodeID) -> Self {
        Self {
            root: Some(root),
            tags: HashSet::new(),
            include_linked_roots: false,
        }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = ComponentTag>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub fn with_linked_roots(mut self, include: bool) -> Self {
        self.include_linked_roots = include;
        self
    }
}

/// One finding: a descendant carrying a matching component instance, or an
/// outermost linked-instance root (tagged [`ComponentTag::LinkedRoot`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    pub node: NodeID,
    pub tag: ComponentTag,
    /// Name of the scan-root child this node sits under, or
    /// [`ANCESTRY_ROOT`] when the node itself is a direct child.
    pub ancestry: String,
}

impl Hit {
    /// Human-readable one-liner in the `"{label} on {ancestry}/{name}"` shape
    /// the result list is rendered with.
    pub fn describe(&self, graph: &impl SceneQuery) -> String {
        let label = display_info(self.tag)
            .map(|info| info.label)
            .unwrap_or_else(|_| self.tag.key());
        format!("{} on {}/{}", label, self.ancestry, graph.node_name(self.node))
    }
}

/// Run one scan. Pure function of the request and the tree at call time;
/// rescanning an unmodified tree yields an identical hit list.
///
/// Hits come back tag-filtered first, in [`ComponentTag::ALL`] order, then
/// linked-root hits. Within one tag, pre-order of the walk. A node with N
/// matching component instances yields N hits.
pub fn scan(graph: &impl SceneQuery, request: &ScanRequest) -> ScanResult<Vec<Hit>> {
    let Some(root) = request.root else {
        return Ok(Vec::new());
    };

    let descendants = collect_descendants(graph, root);
    let mut hits = Vec::new();

    // Selection iterates the registry order, not the caller's set order,
    // so identical requests always produce identically ordered results.
    for tag in ComponentTag::ALL {
        if !request.tags.contains(&tag) {
            continue;
        }
        for &node in &descendants {
            let count = graph.components_of_tag(node, tag);
            if count == 0 {
                continue;
            }
            let ancestry = ancestry_label(graph, root, node)?;
            for _ in 0..count {
                hits.push(Hit {
                    node,
                    tag,
                    ancestry: ancestry.clone(),
                });
            }
        }
    }

    if request.include_linked_roots {
        for &node in &descendants {
            if !graph.is_linked_member(node) {
                continue;
            }
            // Only the outermost member of a linked instance is its root;
            // an instance nested inside another one stays silent.
            let parent_is_member = graph
                .parent(node)
                .map(|p| graph.is_linked_member(p))
                .unwrap_or(false);
            if parent_is_member {
                continue;
            }
            hits.push(Hit {
                node,
                tag: ComponentTag::LinkedRoot,
                ancestry: ancestry_label(graph, root, node)?,
            });
        }
    }

    log::debug!(
        "scan of {} descendants under {root} produced {} hits",
        descendants.len(),
        hits.len()
    );
    Ok(hits)
}

/// Pre-order walk of every descendant of `root`, root itself excluded.
fn collect_descendants(graph: &impl SceneQuery, root: NodeID) -> Vec<NodeID> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeID> = graph.children(root).iter().rev().copied().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(graph.children(node).iter().rev().copied());
    }
    out
}

/// Compute the ancestry label of a descendant of `root`.
///
/// Direct children label as [`ANCESTRY_ROOT`]; anything deeper labels with
/// the name of its ancestor that is a direct child of `root` (the highest
/// parent below the root). Nodes that are not descendants of `root` violate
/// the caller contract and surface as [`ScanError::OrphanedNode`].
pub fn ancestry_label(
    graph: &impl SceneQuery,
    root: NodeID,
    node: NodeID,
) -> ScanResult<String> {
    let Some(mut current) = graph.parent(node) else {
        return Err(ScanError::OrphanedNode(node));
    };
    if current == root {
        return Ok(ANCESTRY_ROOT.to_string());
    }
    loop {
        match graph.parent(current) {
            Some(parent) if parent == root => return Ok(graph.node_name(current).to_string()),
            Some(parent) => current = parent,
            None => return Err(ScanError::OrphanedNode(node)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::graph::SceneTree;
    use crate::scene::node::SceneNode;

    #[test]
    fn preorder_walk_excludes_root() {
        let mut tree = SceneTree::new("Root");
        let a = tree.add_child(tree.root(), SceneNode::new("A")).unwrap();
        let a1 = tree.add_child(a, SceneNode::new("A1")).unwrap();
        let b = tree.add_child(tree.root(), SceneNode::new("B")).unwrap();

        assert_eq!(collect_descendants(&tree, tree.root()), vec![a, a1, b]);
        assert_eq!(collect_descendants(&tree, b), Vec::<NodeID>::new());
    }

    #[test]
    fn ancestry_of_direct_child() {
        let mut tree = SceneTree::new("Root");
        let a = tree.add_child(tree.root(), SceneNode::new("A")).unwrap();
        assert_eq!(ancestry_label(&tree, tree.root(), a).unwrap(), ANCESTRY_ROOT);
    }

    #[test]
    fn ancestry_of_deep_node_is_highest_parent_below_root() {
        let mut tree = SceneTree::new("Root");
        let a = tree.add_child(tree.root(), SceneNode::new("A")).unwrap();
        let b = tree.add_child(a, SceneNode::new("B")).unwrap();
        let c = tree.add_child(b, SceneNode::new("C")).unwrap();
        assert_eq!(ancestry_label(&tree, tree.root(), b).unwrap(), "A");
        assert_eq!(ancestry_label(&tree, tree.root(), c).unwrap(), "A");
    }

    #[test]
    fn ancestry_outside_subtree_is_orphaned() {
        let mut tree = SceneTree::new("Root");
        let a = tree.add_child(tree.root(), SceneNode::new("A")).unwrap();
        let b = tree.add_child(tree.root(), SceneNode::new("B")).unwrap();

        // Scanning with `a` as root: `b` hangs off the real root, which sits
        // above `a`, so the upward walk runs out of parents.
        let err = ancestry_label(&tree, a, b).unwrap_err();
        assert!(matches!(err, ScanError::OrphanedNode(id) if id == b));
    }

    #[test]
    fn describe_formats_like_the_result_list() {
        let mut tree = SceneTree::new("Root");
        let a = tree.add_child(tree.root(), SceneNode::new("A")).unwrap();
        let lamp = tree
            .add_child(a, SceneNode::with_components("Lamp", vec![ComponentTag::Light]))
            .unwrap();

        let hit = Hit {
            node: lamp,
            tag: ComponentTag::Light,
            ancestry: "A".to_string(),
        };
        assert_eq!(hit.describe(&tree), "Light on A/Lamp");
    }
}
