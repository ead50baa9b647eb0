//! Unit tests for accounts and bearer tokens.
