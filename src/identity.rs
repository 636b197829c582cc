//! Identity Resolution
//!
//! Determines how to extract the integer identity key from a record.
//!
//! ## Responsibilities
//! - Declare the `Identity` capability record types opt into
//! - Produce a pure `&T -> i64` extraction function for the store
//!
//! Resolution happens at compile time: a type either implements [`Identity`]
//! or the caller supplies an explicit extraction function at store
//! construction. No runtime field inspection is involved.

/// Capability for records that carry an integer identity key.
///
/// The key is used for point lookups, updates, and removals. Uniqueness is a
/// caller responsibility; the store does not enforce it on insert.
pub trait Identity {
    /// The record's identity key. Must be pure and infallible.
    fn id(&self) -> i64;
}

/// Extracts identity keys from records of type `T`.
///
/// Bound to a store at construction; every key comparison the store performs
/// goes through `key_of`.
pub struct IdentityResolver<T> {
    extract: Box<dyn Fn(&T) -> i64>,
}

impl<T> IdentityResolver<T> {
    /// Resolve keys with an explicit extraction function.
    ///
    /// Escape hatch for types that cannot implement [`Identity`], e.g.
    /// foreign types or records whose key lives in a nested field.
    pub fn from_fn(extract: impl Fn(&T) -> i64 + 'static) -> Self {
        Self {
            extract: Box::new(extract),
        }
    }

    /// Extract the identity key from a record.
    pub fn key_of(&self, record: &T) -> i64 {
        (self.extract)(record)
    }
}

impl<T: Identity + 'static> IdentityResolver<T> {
    /// Resolve keys through the [`Identity`] trait.
    pub fn of_identity() -> Self {
        Self::from_fn(T::id)
    }
}

impl<T: Identity + 'static> Default for IdentityResolver<T> {
    fn default() -> Self {
        Self::of_identity()
    }
}
