// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Entry loading configuration module.
//!
//! Controls how entry files are turned into a trie.

use super::ConfigResult;
use super::Validate;
use serde::{Deserialize, Serialize};

/// Entry loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Later entries replace earlier ones when set; otherwise a duplicate key
    /// aborts the load
    pub overwrite: bool,

    /// Silently drop entries whose key is blank
    pub skip_empty_keys: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            overwrite: true,
            skip_empty_keys: true,
        }
    }
}

impl Validate for LoaderConfig {
    fn validate(&self) -> ConfigResult<()> {
        // Every combination of the two flags is meaningful
        Ok(())
    }
}
