use std::borrow::Cow;

use crate::ids::NodeID;
use crate::scene::arena::NodeArena;
use crate::scene::node::SceneNode;
use crate::tags::ComponentTag;

const NO_CHILDREN: &[NodeID] = &[];

/// Read-only view of a hierarchy, the only surface the scanner depends on.
///
/// The scanner never assumes an in-memory representation; any host that can
/// answer these four queries plus node names can be scanned. Queries against
/// stale or foreign ids answer with the empty case rather than panicking.
pub trait SceneQuery {
    fn children(&self, node: NodeID) -> &[NodeID];

    fn parent(&self, node: NodeID) -> Option<NodeID>;

    fn node_name(&self, node: NodeID) -> &str;

    /// Number of component instances of `tag` attached to `node`.
    fn components_of_tag(&self, node: NodeID, tag: ComponentTag) -> usize;

    /// Whether `node` belongs to an externally-linked sub-hierarchy
    /// (any member, not just the instance root).
    fn is_linked_member(&self, node: NodeID) -> bool;
}

/// An owned hierarchy: node arena plus the id of its root.
#[derive(Debug)]
pub struct SceneTree {
    arena: NodeArena,
    root: NodeID,
}

impl SceneTree {
    pub fn new(root_name: impl Into<Cow<'static, str>>) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.insert(SceneNode::new(root_name));
        Self { arena, root }
    }

    /// Assemble a tree from a pre-filled arena. Used by the document loader
    /// after its link fix-up pass.
    pub(crate) fn from_parts(arena: NodeArena, root: NodeID) -> Self {
        Self { arena, root }
    }

    pub fn root(&self) -> NodeID {
        self.root
    }

    /// Insert `node` as the last child of `parent`.
    /// Returns `None` if `parent` does not resolve.
    pub fn add_child(&mut self, parent: NodeID, mut node: SceneNode) -> Option<NodeID> {
        self.arena.contains(parent).then_some(())?;
        node.parent = Some(parent);
        let id = self.arena.insert(node);
        if let Some(p) = self.arena.get_mut(parent) {
            p.add_child(id);
        }
        Some(id)
    }

    pub fn get(&self, id: NodeID) -> Option<&SceneNode> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: NodeID) -> Option<&mut SceneNode> {
        self.arena.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// First node with the given name, in slot order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeID> {
        self.arena
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }
}

impl SceneQuery for SceneTree {
    fn children(&self, node: NodeID) -> &[NodeID] {
        self.arena
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(NO_CHILDREN)
    }

    fn parent(&self, node: NodeID) -> Option<NodeID> {
        self.arena.get(node).and_then(|n| n.parent)
    }

    fn node_name(&self, node: NodeID) -> &str {
        self.arena.get(node).map(|n| n.name.as_ref()).unwrap_or("")
    }

    fn components_of_tag(&self, node: NodeID, tag: ComponentTag) -> usize {
        self.arena
            .get(node)
            .map(|n| n.component_count(tag))
            .unwrap_or(0)
    }

    fn is_linked_member(&self, node: NodeID) -> bool {
        self.arena
            .get(node)
            .map(|n| n.is_linked_member())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_query() {
        let mut tree = SceneTree::new("Root");
        let armature = tree.add_child(tree.root(), SceneNode::new("Armature")).unwrap();
        let hips = tree.add_child(armature, SceneNode::new("Hips")).unwrap();

        assert_eq!(tree.children(tree.root()), &[armature]);
        assert_eq!(tree.parent(hips), Some(armature));
        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.node_name(hips), "Hips");
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn child_order_is_insertion_order() {
        let mut tree = SceneTree::new("Root");
        let a = tree.add_child(tree.root(), SceneNode::new("A")).unwrap();
        let b = tree.add_child(tree.root(), SceneNode::new("B")).unwrap();
        let c = tree.add_child(tree.root(), SceneNode::new("C")).unwrap();
        assert_eq!(tree.children(tree.root()), &[a, b, c]);
    }

    #[test]
    fn stale_ids_answer_empty() {
        let tree = SceneTree::new("Root");
        let ghost = NodeID::from_parts(99, 0);
        assert!(tree.children(ghost).is_empty());
        assert_eq!(tree.parent(ghost), None);
        assert_eq!(tree.node_name(ghost), "");
        assert_eq!(tree.components_of_tag(ghost, ComponentTag::Light), 0);
        assert!(!tree.is_linked_member(ghost));
    }

    #[test]
    fn find_by_name_finds_first_match() {
        let mut tree = SceneTree::new("Root");
        let first = tree.add_child(tree.root(), SceneNode::new("Twin")).unwrap();
        tree.add_child(tree.root(), SceneNode::new("Twin")).unwrap();
        assert_eq!(tree.find_by_name("Twin"), Some(first));
        assert_eq!(tree.find_by_name("Missing"), None);
    }
}
