//! Trait seams between the decision core and its surroundings.

pub mod test_helpers;
pub mod usage_store;

pub use usage_store::UsageStore;
