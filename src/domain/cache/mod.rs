//! Exact response cache domain models and traits

mod key;
mod repository;

pub use key::{exact_cache_key, normalize_query};
pub use repository::{CachedCompletion, ExactCache};
