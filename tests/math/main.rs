//! Property tests for the pool math and the state transitions.
mod numerical_tests;
mod pool_properties;
