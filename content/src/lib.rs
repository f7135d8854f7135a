// Creature Combat Content - Shared content vocabulary
// This crate contains the immutable blueprint types and enums consumed by the
// creature-combat engine. The engine never mutates anything defined here; it
// receives a read-only ContentRepository at construction time.

// Re-export the main types
pub use abilities::*;
pub use battle_data::*;
pub use items::*;
pub use moves::*;
pub use repository::*;
pub use species::*;
pub use stats::*;
pub use status::*;
pub use types::*;

pub mod abilities;
pub mod battle_data;
pub mod items;
pub mod moves;
pub mod repository;
pub mod species;
pub mod stats;
pub mod status;
pub mod types;
