//! # Food Core
//!
//! Domain types shared by the server and the list manager.
//!
//! - [`food::Food`]: one persisted record, as stored and as serialized on the wire
//! - [`payloads`]: request bodies and response envelopes
//! - [`validate`]: per-field validation producing per-field reason lists

pub mod food;
pub mod payloads;
pub mod validate;

pub use food::Food;
pub use payloads::{FoodEnvelope, FoodPatch, MessageEnvelope, NewFood};
pub use validate::FieldErrors;
