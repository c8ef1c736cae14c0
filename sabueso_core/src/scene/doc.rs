//! JSON scene documents.
//!
//! A document is a flat, ordered node list; parents are u32 indices into
//! that list. Children are never serialized; the build pass rebuilds them
//! from parent links, so the two cannot disagree on disk.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SceneError;
use crate::ids::NodeID;
use crate::scene::arena::NodeArena;
use crate::scene::graph::SceneTree;
use crate::scene::node::SceneNode;
use crate::tags::ComponentTag;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NodeEntry {
    pub name: String,

    /// Index of the parent entry in `SceneDoc::nodes`. Exactly one entry
    /// (the root) omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u32>,

    /// Stable tag keys, one per attached component instance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_scene: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SceneDoc {
    pub nodes: Vec<NodeEntry>,
}

impl SceneDoc {
    pub fn from_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Validate the document and assemble a [`SceneTree`].
    ///
    /// Two passes over the entries, the same shape as the engine-side
    /// relationship fix-up: insert every node first, then resolve parent
    /// indices to arena ids and push children in entry order.
    pub fn build(&self) -> Result<SceneTree, SceneError> {
        let count = self.nodes.len();
        let mut root_idx: Option<usize> = None;

        for (idx, entry) in self.nodes.iter().enumerate() {
            match entry.parent {
                None => match root_idx {
                    None => root_idx = Some(idx),
                    Some(first) => {
                        return Err(SceneError::MultipleRoots(
                            self.nodes[first].name.clone(),
                            entry.name.clone(),
                        ));
                    }
                },
                Some(parent) => {
                    if parent as usize >= count {
                        return Err(SceneError::BadParentIndex {
                            name: entry.name.clone(),
                            parent,
                            count,
                        });
                    }
                    if parent as usize == idx {
                        return Err(SceneError::SelfParent(entry.name.clone()));
                    }
                }
            }
        }
        let root_idx = root_idx.ok_or(SceneError::MissingRoot)?;

        let mut arena = NodeArena::with_capacity(count);
        let mut ids: Vec<NodeID> = Vec::with_capacity(count);
        for entry in &self.nodes {
            let mut node = SceneNode::new(entry.name.clone());
            node.components = entry
                .components
                .iter()
                .map(|key| ComponentTag::parse(key))
                .collect::<Result<_, _>>()?;
            node.linked_scene = entry.linked_scene.clone().map(Into::into);
            ids.push(arena.insert(node));
        }

        for (idx, entry) in self.nodes.iter().enumerate() {
            let Some(parent) = entry.parent else { continue };
            let parent_id = ids[parent as usize];
            if let Some(node) = arena.get_mut(ids[idx]) {
                node.parent = Some(parent_id);
            }
            if let Some(parent_node) = arena.get_mut(parent_id) {
                parent_node.add_child(ids[idx]);
            }
        }

        let tree = SceneTree::from_parts(arena, ids[root_idx]);
        verify_connected(&tree, &self.nodes, &ids)?;

        log::debug!("built scene tree with {} nodes", tree.len());
        Ok(tree)
    }
}

/// Parent indices that never reach the root (an island of nodes parenting
/// each other in a loop) pass the per-entry checks but break the tree
/// invariant. Catch them by marking what the root can actually reach.
fn verify_connected(
    tree: &SceneTree,
    entries: &[NodeEntry],
    ids: &[NodeID],
) -> Result<(), SceneError> {
    use crate::scene::graph::SceneQuery;

    let mut seen: Vec<bool> = vec![false; ids.len()];
    let mut stack: Vec<NodeID> = vec![tree.root()];
    while let Some(node) = stack.pop() {
        if let Some(idx) = ids.iter().position(|&id| id == node) {
            seen[idx] = true;
        }
        stack.extend_from_slice(tree.children(node));
    }

    match seen.iter().position(|&reached| !reached) {
        None => Ok(()),
        Some(idx) => Err(SceneError::Disconnected(entries[idx].name.clone())),
    }
}
