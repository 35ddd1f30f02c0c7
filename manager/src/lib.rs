//! # Food Manager
//!
//! Client-side view over the food collection.
//!
//! [`ListManager`] holds the last-fetched collection, one open create/edit
//! form, and the per-field errors from the last failed submit. It never
//! patches the collection locally: after every successful mutation it
//! re-fetches the list and replaces its copy wholesale.
//!
//! The manager talks to any [`FoodApi`]. [`HttpFoodApi`] is the real one;
//! tests plug in an in-memory fake.

pub mod api;
pub mod http;
pub mod manager;

pub use api::{ApiError, FoodApi};
pub use http::HttpFoodApi;
pub use manager::{Draft, Field, ListManager, PendingSubmit};
