//! # Wall Projection
//!
//! Derives per-user views from `(posts, current identity, in-flight vote)`.
//! Pure functions of their inputs, no side effects; the consuming layer
//! recomputes the projection whenever the post collection or the connected
//! address changes.

pub mod view;

pub use view::{project, DisplayKey, PostView, WallView};
