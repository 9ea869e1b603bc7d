//! The flat entity store and the Monte Carlo world it belongs to.
//!
//! Rationale for flat storage over an entity-component-system: every tick
//! touches every active entity, so contiguity is a measurable constant
//! factor and the discriminator enums in `enums` replace virtual dispatch
//! with small, predictable branches. Cyclic references (an AI's current
//! target, a SAM's engagement queue) are plain `String` IDs resolved
//! through `MCWorld::index_of` once per lookup rather than shared
//! pointers — at most one mutable entity reference is ever live at a
//! time: the one a stage is currently processing.

use std::collections::HashMap;

use crate::entity::MCEntity;
use crate::events::ScenarioEvent;
use crate::prng::Mulberry32;

/// Owns the append-only entity sequence, the ID→index lookup, the
/// seeded PRNG, and the scenario's event list.
pub struct MCWorld {
    entities: Vec<MCEntity>,
    index: HashMap<String, usize>,
    pub sim_time: f64,
    pub rng: Mulberry32,
    pub events: Vec<ScenarioEvent>,
    /// Human-readable `message` event log, `(sim_time, text)`, collected
    /// for the replay writer (`EventAction::Message`).
    pub messages: Vec<(f64, String)>,
}

impl MCWorld {
    pub fn new(seed: u32) -> Self {
        Self {
            entities: Vec::new(),
            index: HashMap::new(),
            sim_time: 0.0,
            rng: Mulberry32::new(seed),
            events: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Append an entity and record its `id -> index`. Indices are stable
    /// for the lifetime of the store: entities are never reordered or
    /// removed, only marked `destroyed`.
    pub fn add(&mut self, entity: MCEntity) -> usize {
        let idx = self.entities.len();
        self.index.insert(entity.id.clone(), idx);
        self.entities.push(entity);
        idx
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&MCEntity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut MCEntity> {
        let idx = self.index_of(id)?;
        Some(&mut self.entities[idx])
    }

    pub fn entities(&self) -> &[MCEntity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [MCEntity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total count of engagement records of the given result kind across
    /// all entities, used by the replay writer to scan for new events
    /// appended since the last tick without rescanning from the start.
    pub fn total_engagement_count(&self) -> usize {
        self.entities.iter().map(|e| e.engagement_log.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MCEntity;

    #[test]
    fn indices_are_stable_after_multiple_inserts() {
        let mut world = MCWorld::new(1);
        let i0 = world.add(MCEntity::new("a", "A", "t", "blue"));
        let i1 = world.add(MCEntity::new("b", "B", "t", "blue"));
        assert_eq!(world.index_of("a"), Some(i0));
        assert_eq!(world.index_of("b"), Some(i1));
    }

    #[test]
    fn get_mut_allows_single_entity_mutation() {
        let mut world = MCWorld::new(1);
        world.add(MCEntity::new("a", "A", "t", "blue"));
        world.get_mut("a").unwrap().kill();
        assert!(world.get("a").unwrap().destroyed);
    }

    #[test]
    fn unknown_id_returns_none() {
        let world = MCWorld::new(1);
        assert!(world.get("missing").is_none());
    }

    #[test]
    fn iteration_order_matches_insertion_order() {
        let mut world = MCWorld::new(1);
        world.add(MCEntity::new("a", "A", "t", "blue"));
        world.add(MCEntity::new("b", "B", "t", "blue"));
        world.add(MCEntity::new("c", "C", "t", "blue"));
        let ids: Vec<&str> = world.entities().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
