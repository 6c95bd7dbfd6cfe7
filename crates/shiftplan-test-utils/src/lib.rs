// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Shiftplan integration tests.
//!
//! # Components
//!
//! - [`MemoryStore`] - in-memory implementation of every repository trait
//! - [`Fixture`] - builder for worker directories, constraints, and preferences
//! - [`TestHarness`] - a seeded SQLite store in a temporary directory

pub mod fixtures;
pub mod harness;
pub mod memory_store;

pub use fixtures::Fixture;
pub use harness::TestHarness;
pub use memory_store::MemoryStore;
