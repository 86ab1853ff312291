//! Cross-crate integration tests.

pub mod concurrency;
pub mod fallback;
pub mod wall_flows;
