//! Tests for the policy compiler.
//!
//! Organized by functionality:
//! - Literal policies (empty, unconditioned grants and denies)
//! - Attribute and identity conditions
//! - Rule combination (grant/deny folding)
//! - Association conditions (existence, non-existence, nesting)
//! - Raw-scope overrides
//! - Plan shape (fragments, variables, distinct flag)
