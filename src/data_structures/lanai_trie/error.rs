// Copyright (c) 2025 Lanai Trie Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Lanai Trie.
//!
//! The trie itself reports outcomes through plain return values. These errors
//! are produced by the strict insertion helpers and by the properties loader.

/// Errors that can occur in Lanai Trie operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum LanaiTrieError {
    /// A non-forced write hit a key that already holds a value
    #[error("Key already present and not overwritable: {key}")]
    KeyRejected {
        /// The rejected key
        key: String,
    },

    /// A properties line could not be parsed
    #[error("Malformed entry on line {line}: {content}")]
    MalformedEntry {
        /// 1-based line number
        line: usize,
        /// The offending line
        content: String,
    },

    /// An entry of a structured document (JSON, TOML) could not be used
    #[error("Malformed entry #{index}: {content}")]
    MalformedItem {
        /// 1-based position of the entry in the document
        index: usize,
        /// The offending entry
        content: String,
    },

    /// Reading entry input failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for Lanai Trie operations
pub type LanaiTrieResult<T> = std::result::Result<T, LanaiTrieError>;

impl From<std::io::Error> for LanaiTrieError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LanaiTrieError::KeyRejected {
            key: "/1/1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Key already present and not overwritable: /1/1"
        );

        let err = LanaiTrieError::MalformedEntry {
            line: 3,
            content: "no separator".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed entry on line 3: no separator");

        let err = LanaiTrieError::MalformedItem {
            index: 2,
            content: "=x".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed entry #2: =x");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: LanaiTrieError = io.into();
        assert_eq!(err, LanaiTrieError::Io("eof".to_string()));
    }
}
