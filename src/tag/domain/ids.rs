//! Identifier types for the tag domain.

use crate::identifier::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a tag.
    TagId
}
