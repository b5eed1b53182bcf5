//! End-to-end scenario tests for the graphward compiler.
//!
//! All coverage lives under `tests/`; this crate exports nothing.
