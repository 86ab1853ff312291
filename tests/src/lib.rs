//! # Social Wall Test Suite
//!
//! Unified test crate for cross-crate behavior.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── wall_flows.rs   # End-to-end create/vote/feed scenarios
//!     ├── concurrency.rs  # Optimistic-commit races, no-lost-update
//!     └── fallback.rs     # Local mirror parity and permission fallback
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wall-tests
//! cargo test -p wall-tests integration::concurrency::
//! ```

#![allow(dead_code)]

pub mod integration;
