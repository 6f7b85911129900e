//! Common types used throughout cursor-pager
//!
//! This module contains shared type definitions used across the store,
//! the fetch serializer, the transport and configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Cursor
// ============================================================================

/// Wire value of the initial cursor
pub const START_CURSOR: &str = "start";

/// Opaque continuation token for the next page fetch.
///
/// Only the most recently returned cursor is valid: each fetch must use the
/// cursor left behind by the one before it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cursor {
    /// Sentinel for the very first fetch
    #[default]
    Start,
    /// Token handed back by the backend
    Token(String),
}

impl Cursor {
    /// Create a cursor from a backend token
    pub fn token(value: impl Into<String>) -> Self {
        Self::Token(value.into())
    }

    /// Check if this is the start sentinel
    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start)
    }

    /// Value to send as the `page` query parameter
    pub fn as_param(&self) -> &str {
        match self {
            Self::Start => START_CURSOR,
            Self::Token(token) => token,
        }
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        if value == START_CURSOR {
            Self::Start
        } else {
            Self::Token(value)
        }
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        match cursor {
            Cursor::Start => START_CURSOR.to_string(),
            Cursor::Token(token) => token,
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
