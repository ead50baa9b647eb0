//! Unit tests for task tracking.

mod storage_failure_tests;
