//! Typed identifiers for corpus entities and interned relation-type tags.
//!
//! Numeric storage identifiers are wrapped in [`Id`], a zero-cost newtype
//! parameterized by a marker type so that, say, a sentence id cannot be
//! passed where a token id is expected. Relation-type tags are interned
//! strings ([`RelationType`]) with cheap `Copy` equality.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Marker types distinguishing the identifier spaces.
pub mod marker {
    /// Marker for [`SourceId`](super::SourceId).
    pub struct Source;
    /// Marker for [`DivisionId`](super::DivisionId).
    pub struct Division;
    /// Marker for [`SentenceId`](super::SentenceId).
    pub struct Sentence;
    /// Marker for [`TokenId`](super::TokenId).
    pub struct Token;
}

/// Identifier of a source text.
pub type SourceId = Id<marker::Source>;
/// Identifier of a source division.
pub type DivisionId = Id<marker::Division>;
/// Identifier of a sentence.
pub type SentenceId = Id<marker::Sentence>;
/// Identifier of a token.
pub type TokenId = Id<marker::Token>;

/// A typed numeric identifier.
///
/// Wraps the `u32` identifier assigned by the corpus storage layer. The
/// marker parameter `T` only distinguishes identifier spaces at compile
/// time; it has no runtime representation. `Display` prints the raw number,
/// which is also how identifiers appear as node ids in graph descriptions.
///
/// # Examples
///
/// ```
/// use stemma_core::identifier::TokenId;
///
/// let id = TokenId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
pub struct Id<T> {
    value: u32,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Creates an identifier from its raw numeric value.
    pub const fn new(value: u32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Returns the raw numeric value.
    pub const fn value(self) -> u32 {
        self.value
    }
}

// Manual trait implementations so that `Id<T>` is `Copy`, comparable, and
// hashable for every marker type, without bounds on `T`.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<u32> for Id<T> {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(Self::new)
    }
}

/// Global string interner for relation-type tags.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// An interned relation-type tag.
///
/// Relation types classify semantic-relation edges (for example
/// `"Discourse"`) and select which edges participate in a graph request.
/// Interning makes filtering a symbol comparison instead of repeated string
/// comparisons.
///
/// # Examples
///
/// ```
/// use stemma_core::identifier::RelationType;
///
/// let discourse = RelationType::new("Discourse");
/// assert_eq!(discourse, RelationType::new("Discourse"));
/// assert_eq!(discourse, "Discourse");
/// assert_eq!(discourse.to_string(), "Discourse");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationType(DefaultSymbol);

impl RelationType {
    /// Creates a `RelationType` from its tag string, interning it.
    ///
    /// # Arguments
    ///
    /// * `tag` - The tag naming the relation class
    pub fn new(tag: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(tag);
        Self(symbol)
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let tag = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", tag)
    }
}

impl std::str::FromStr for RelationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for RelationType {
    /// Creates a `RelationType` from a string slice.
    ///
    /// This is a convenience implementation that calls `RelationType::new`.
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl PartialEq<str> for RelationType {
    /// Allows direct comparison with string slices: `relation_type == "Discourse"`
    fn eq(&self, other: &str) -> bool {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let tag = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        tag == other
    }
}

impl PartialEq<&str> for RelationType {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for RelationType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RelationType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::new(&tag))
    }
}
