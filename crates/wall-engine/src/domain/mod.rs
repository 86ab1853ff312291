//! Pure vote-toggle logic, no I/O.

pub mod toggle;
