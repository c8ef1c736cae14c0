use crate::ids::NodeID;
use crate::scene::node::SceneNode;

/// Arena-based storage for scene nodes.
///
/// Slots are `Vec<Option<SceneNode>>`; a `NodeID` packs the slot index
/// (offset by one, since index 0 is the nil id) together with the slot's
/// generation. The arena owns id allocation: removing a node bumps the
/// slot's generation, so ids held across a removal stop resolving instead
/// of silently pointing at a reused slot.
#[derive(Debug)]
pub struct NodeArena {
    slots: Vec<Option<SceneNode>>,
    generations: Vec<u32>,
    free: Vec<u32>,
    live: u32,
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            generations: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Insert a node, allocating its id. The node's `id` field is set to the
    /// returned id before storage.
    pub fn insert(&mut self, mut node: SceneNode) -> NodeID {
        let idx = match self.free.pop() {
            Some(idx) => idx as usize,
            None => {
                self.slots.push(None);
                self.generations.push(0);
                self.slots.len() - 1
            }
        };
        let id = NodeID::from_parts((idx + 1) as u32, self.generations[idx]);
        node.id = id;
        self.slots[idx] = Some(node);
        self.live += 1;
        id
    }

    fn slot_index(&self, id: NodeID) -> Option<usize> {
        let index = id.index();
        if index == 0 {
            return None;
        }
        let idx = (index as usize) - 1;
        if self.generations.get(idx).copied() != Some(id.generation()) {
            return None;
        }
        Some(idx)
    }

    #[inline]
    pub fn get(&self, id: NodeID) -> Option<&SceneNode> {
        let idx = self.slot_index(id)?;
        self.slots[idx].as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeID) -> Option<&mut SceneNode> {
        let idx = self.slot_index(id)?;
        self.slots[idx].as_mut()
    }

    /// Remove a node, leaving a hole and invalidating its id.
    pub fn remove(&mut self, id: NodeID) -> Option<SceneNode> {
        let idx = self.slot_index(id)?;
        let out = self.slots[idx].take()?;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free.push(idx as u32);
        self.live -= 1;
        Some(out)
    }

    #[inline]
    pub fn contains(&self, id: NodeID) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterate over all live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeID, &SceneNode)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|node| (node.id, node)))
    }

    pub fn values(&self) -> impl Iterator<Item = &SceneNode> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut arena = NodeArena::new();
        let id = arena.insert(SceneNode::new("Root"));
        assert_eq!(id.index(), 1);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(id).unwrap().name, "Root");
        assert_eq!(arena.get(id).unwrap().id, id);
    }

    #[test]
    fn nil_never_resolves() {
        let mut arena = NodeArena::new();
        arena.insert(SceneNode::new("Root"));
        assert!(arena.get(NodeID::nil()).is_none());
    }

    #[test]
    fn removal_invalidates_stale_ids() {
        let mut arena = NodeArena::new();
        let a = arena.insert(SceneNode::new("A"));
        let removed = arena.remove(a).unwrap();
        assert_eq!(removed.name, "A");
        assert!(arena.is_empty());

        // Slot is reused with a new generation; the old id must not resolve.
        let b = arena.insert(SceneNode::new("B"));
        assert_eq!(b.index(), a.index());
        assert_ne!(b.generation(), a.generation());
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b).unwrap().name, "B");
    }

    #[test]
    fn iter_skips_holes() {
        let mut arena = NodeArena::new();
        let a = arena.insert(SceneNode::new("A"));
        let b = arena.insert(SceneNode::new("B"));
        let c = arena.insert(SceneNode::new("C"));
        arena.remove(b);

        let names: Vec<&str> = arena.values().map(|n| n.name.as_ref()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert!(arena.contains(a));
        assert!(arena.contains(c));
    }
}
