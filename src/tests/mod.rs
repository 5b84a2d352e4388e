// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Test modules for Lanai Trie.
//!
//! Crate-internal suites that span more than one module:
//! - Configuration loading and validation
//! - Error conversions and reporting
//! - Property-based and table tests for the trie
//! - Shared fixtures and strategies

pub mod lanai_trie_tests;
