/// Store module for multivalue
///
/// Holds the key → member-set mapping and its read models.

pub mod models;
pub mod multi_value;

pub use models::*;
pub use multi_value::MultiValueStore;
