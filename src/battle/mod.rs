pub mod actions;
pub mod engine;
pub mod events;
pub mod field;
pub mod order;
pub mod phases;
pub mod providers;
pub mod queue;
pub mod rng;
pub mod triggers;

#[cfg(test)]
mod tests;
