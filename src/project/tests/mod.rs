//! Unit tests for project tracking.
