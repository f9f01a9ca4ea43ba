//! Integration tests for the specification arena
//!
//! These tests verify behavior that spans the whole specification: files,
//! parallel exploration and properties holding on generated trees.


// Per-worker copies explored in parallel
mod parallel_tests;

// Properties of enumeration on generated trees
mod property_tests;
