//! Property-based tests for partitioning and generation

mod determinism;
