use std::hash::Hash;

use ahash::AHashMap;

/// Dense index of a position interned by a [`HashPool`].
///
/// Ids are handed out in discovery order starting from zero, so they can index
/// flat arrays of per-node search records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of this node in discovery order.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Interns hashable states into [`NodeId`]s.
pub struct HashPool<S> {
    map: AHashMap<S, NodeId>,
    states: Vec<S>,
}

impl<S> Default for HashPool<S> {
    fn default() -> Self {
        HashPool {
            map: AHashMap::new(),
            states: vec![],
        }
    }
}

impl<S: Hash + Eq + Clone> HashPool<S> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every interned state. Allocations are kept for reuse.
    pub fn reset(&mut self) {
        self.map.clear();
        self.states.clear();
    }

    /// Return the id of `state`, interning it if it has not been seen since the
    /// last reset. A freshly interned state receives id `self.len() - 1`.
    pub fn generate(&mut self, state: S) -> NodeId {
        let states = &mut self.states;
        *self.map.entry(state).or_insert_with_key(|state| {
            let id = NodeId(states.len());
            states.push(state.clone());
            id
        })
    }

    /// Return the id of `state` if it has been interned.
    pub fn get(&self, state: &S) -> Option<NodeId> {
        self.map.get(state).copied()
    }

    /// Return the state behind `id`.
    ///
    /// # Panics
    /// Panics if `id` was not handed out by this pool since the last reset.
    #[track_caller]
    pub fn state(&self, id: NodeId) -> &S {
        &self.states[id.0]
    }

    /// Number of interned states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no state has been interned since the last reset.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over interned states in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &S)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(index, state)| (NodeId(index), state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_discovery_order() {
        let mut pool = HashPool::new();
        let a = pool.generate((0, 0));
        let b = pool.generate((3, 1));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(pool.generate((0, 0)), a);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.state(b), &(3, 1));
        assert_eq!(pool.get(&(3, 1)), Some(b));
        assert_eq!(pool.get(&(5, 5)), None);
    }

    #[test]
    fn reset_forgets_states() {
        let mut pool = HashPool::new();
        pool.generate("left");
        pool.generate("right");
        pool.reset();
        assert!(pool.is_empty());
        assert_eq!(pool.get(&"left"), None);
        assert_eq!(pool.generate("right").index(), 0);
        let states: Vec<_> = pool.iter().map(|(_, s)| *s).collect();
        assert_eq!(states, ["right"]);
    }
}
