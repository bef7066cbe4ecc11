//! Fixture kinds and end-to-end tests for the content descriptor surface.

pub mod fixtures;
