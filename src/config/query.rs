// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Query configuration module.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper bound accepted for `max_results`.
const MAX_RESULTS_LIMIT: usize = 1_000_000;

/// Query configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryConfig {
    /// Maximum number of lines a listing query prints
    pub max_results: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { max_results: 100 }
    }
}

impl QueryConfig {
    /// Truncates `results` to `max_results` and reports how many were dropped.
    pub fn cap<T>(&self, mut results: Vec<T>) -> (Vec<T>, usize) {
        let dropped = results.len().saturating_sub(self.max_results);
        results.truncate(self.max_results);
        (results, dropped)
    }
}

impl Validate for QueryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_results == 0 || self.max_results > MAX_RESULTS_LIMIT {
            return Err(ConfigError::ValueOutOfRange {
                key: "query.max_results".to_string(),
                message: format!("must be between 1 and {MAX_RESULTS_LIMIT}"),
            });
        }

        Ok(())
    }
}
