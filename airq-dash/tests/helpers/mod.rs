//! Test Helper Utilities
//!
//! Shared utilities for testing airq-dash

pub mod db_utils;

pub use db_utils::{create_test_store, TestStore};
