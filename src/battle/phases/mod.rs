//! Turn pipeline stages. Each stage is a free function over the field and
//! the shared turn context; the engine strings them together.

pub mod collection;
pub mod end_of_turn;
pub mod outcome;
pub mod replacement;
