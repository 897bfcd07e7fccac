//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; to
/// "modify" one, construct a new one. `Money` is the canonical example here:
/// two amounts of the same number of cents are the same value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
