//! The conditional effect catalog and its loaders

pub mod effect;
pub mod loader;

pub use effect::Effect;
