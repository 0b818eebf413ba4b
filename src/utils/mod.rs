//! Generic utility primitives with zero domain knowledge.
//!
//! - `validation` - Input sanitization helpers

pub mod validation;
