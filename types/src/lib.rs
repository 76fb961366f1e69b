//! Core domain types for dockorder.
//!
//! This crate contains pure domain types with no IO and no host dependencies.
//! Everything here can be used from any layer: the persistence layer, the
//! reconciliation engine, and the editor binary.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod order;
pub use order::PersistedOrder;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Regions
// ============================================================================

/// One of the three containers the host docks entries into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Left,
    Center,
    Right,
}

/// The end of a persisted order where newly discovered entries are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeEnd {
    Head,
    Tail,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown region '{0}' (expected left, center or right)")]
pub struct RegionParseError(String);

impl Region {
    pub const ALL: [Region; 3] = [Region::Left, Region::Center, Region::Right];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Region::Left => "left",
            Region::Center => "center",
            Region::Right => "right",
        }
    }

    /// Key under which the region's order is persisted.
    #[must_use]
    pub const fn settings_key(self) -> &'static str {
        match self {
            Region::Left => "left-box-order",
            Region::Center => "center-box-order",
            Region::Right => "right-box-order",
        }
    }

    /// Right mirrors its reading direction: the host grows it toward the
    /// center, so new entries belong at the head of its order.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Region::Right)
    }

    #[must_use]
    pub const fn merge_end(self) -> MergeEnd {
        if self.is_reverse() {
            MergeEnd::Head
        } else {
            MergeEnd::Tail
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Region::Left),
            "center" | "centre" => Ok(Region::Center),
            "right" => Ok(Region::Right),
            _ => Err(RegionParseError(s.to_string())),
        }
    }
}

// ============================================================================
// Tokens & Group Keys
// ============================================================================

/// Persisted prefix that marks a group placeholder.
pub const PLACEHOLDER_PREFIX: &str = "appindicator-kstatusnotifieritem-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token must not be empty")]
    Empty,
    #[error("token '{0}' uses the reserved placeholder prefix")]
    ReservedPrefix(String),
    #[error("group key must not be empty")]
    EmptyGroupKey,
}

/// Opaque name of one dockable entry.
///
/// Invariant: non-empty and never carrying [`PLACEHOLDER_PREFIX`], so a
/// plain token can't be confused with a placeholder once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Result<Self, TokenError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TokenError::Empty);
        }
        if value.starts_with(PLACEHOLDER_PREFIX) {
            return Err(TokenError::ReservedPrefix(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Token {
    type Error = TokenError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Token> for String {
    fn from(value: Token) -> Self {
        value.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of an aggregating application whose entries share one slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(value: impl Into<String>) -> Result<Self, TokenError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(TokenError::EmptyGroupKey)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GroupKey {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GroupKey> for String {
    fn from(value: GroupKey) -> Self {
        value.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Entries
// ============================================================================

/// One element of a persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entry {
    Plain(Token),
    /// Stands in for every member of a group, expanded at resolve time.
    GroupPlaceholder(GroupKey),
}

impl Entry {
    /// Decode one persisted string.
    pub fn from_persisted(raw: &str) -> Result<Self, TokenError> {
        match raw.strip_prefix(PLACEHOLDER_PREFIX) {
            Some(key) => GroupKey::new(key).map(Entry::GroupPlaceholder),
            None => Token::new(raw).map(Entry::Plain),
        }
    }

    #[must_use]
    pub fn to_persisted(&self) -> String {
        match self {
            Entry::Plain(token) => token.as_str().to_string(),
            Entry::GroupPlaceholder(key) => format!("{PLACEHOLDER_PREFIX}{key}"),
        }
    }

    /// Human-facing label: placeholders show the bare group key.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Entry::Plain(token) => token.as_str(),
            Entry::GroupPlaceholder(key) => key.as_str(),
        }
    }

    #[must_use]
    pub fn as_plain(&self) -> Option<&Token> {
        match self {
            Entry::Plain(token) => Some(token),
            Entry::GroupPlaceholder(_) => None,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Entry::GroupPlaceholder(_))
    }
}

impl From<Token> for Entry {
    fn from(token: Token) -> Self {
        Entry::Plain(token)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_persisted())
    }
}
