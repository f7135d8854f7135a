use serde::{Deserialize, Serialize};

use crate::stats::StatSet;
use crate::types::ElementType;

/// Immutable blueprint for a species, looked up by id in the repository.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpeciesBlueprint {
    pub name: String,
    pub types: Vec<ElementType>,
    pub base_stats: StatSet,
}

impl SpeciesBlueprint {
    pub fn new(name: &str, types: Vec<ElementType>, base_stats: StatSet) -> Self {
        Self {
            name: name.to_string(),
            types,
            base_stats,
        }
    }
}
