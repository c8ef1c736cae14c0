use std::borrow::Cow;

use crate::ids::NodeID;
use crate::tags::ComponentTag;

/// One node of the scanned hierarchy.
///
/// Parent/child links form a tree: every node except the scene root has
/// exactly one parent. `children` is rebuilt from parent links when a
/// document is loaded, so the two always agree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneNode {
    pub id: NodeID,

    pub name: Cow<'static, str>,

    pub parent: Option<NodeID>,

    pub children: Vec<NodeID>,

    /// Attached component tags, one entry per component instance.
    /// Duplicates are meaningful: two Lights on one node is two entries.
    pub components: Vec<ComponentTag>,

    /// `Some` when this node belongs to an externally-linked sub-hierarchy;
    /// the value names the linked source. Membership, not root-ness: every
    /// node of the instance carries it, and the scanner works out which
    /// member is the outermost root.
    pub linked_scene: Option<Cow<'static, str>>,
}

impl SceneNode {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id: NodeID::nil(),
            name: name.into(),
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
            linked_scene: None,
        }
    }

    pub fn with_components(name: impl Into<Cow<'static, str>>, components: Vec<ComponentTag>) -> Self {
        Self {
            components,
            ..Self::new(name)
        }
    }

    pub fn is_linked_member(&self) -> bool {
        self.linked_scene.is_some()
    }

    /// How many attached component instances match `tag`.
    pub fn component_count(&self, tag: ComponentTag) -> usize {
        self.components.iter().filter(|&&c| c == tag).count()
    }

    pub fn add_child(&mut self, child: NodeID) {
        self.children.push(child);
    }

    pub fn remove_child(&mut self, child: NodeID) {
        self.children.retain(|&c| c != child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_count_counts_duplicates() {
        let node = SceneNode::with_components(
            "Head",
            vec![
                ComponentTag::Light,
                ComponentTag::AudioSource,
                ComponentTag::Light,
            ],
        );
        assert_eq!(node.component_count(ComponentTag::Light), 2);
        assert_eq!(node.component_count(ComponentTag::AudioSource), 1);
        assert_eq!(node.component_count(ComponentTag::PhysBone), 0);
    }

    #[test]
    fn linked_membership() {
        let mut node = SceneNode::new("Chair");
        assert!(!node.is_linked_member());
        node.linked_scene = Some("props/chair".into());
        assert!(node.is_linked_member());
    }
}
