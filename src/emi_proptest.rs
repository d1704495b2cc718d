//! Property-based tests for the installment calculation
//!
//! Checks the invariants of a computed result across the whole range of
//! realistic loans rather than a handful of fixed scenarios.
