use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::moves::MoveBlueprint;
use crate::species::SpeciesBlueprint;

/// Read-only lookup for move and species blueprints.
///
/// The repository is populated up front (from files, generated tables, or
/// synthetic test data) and then handed to the engine, which never mutates
/// it. This replaces global content singletons so the engine stays
/// unit-testable with arbitrary data.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ContentRepository {
    moves: HashMap<String, MoveBlueprint>,
    species: HashMap<String, SpeciesBlueprint>,
}

impl ContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_move(&mut self, id: &str, blueprint: MoveBlueprint) {
        self.moves.insert(id.to_string(), blueprint);
    }

    pub fn insert_species(&mut self, id: &str, blueprint: SpeciesBlueprint) {
        self.species.insert(id.to_string(), blueprint);
    }

    pub fn get_move(&self, id: &str) -> Option<&MoveBlueprint> {
        self.moves.get(id)
    }

    pub fn get_species(&self, id: &str) -> Option<&SpeciesBlueprint> {
        self.species.get(id)
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}
