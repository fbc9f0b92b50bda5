//! XML codec module
//!
//! Converts between the dynamic [`Value`] tree and the XML fragments spoken by
//! the Tracker v3 API.
//!
//! # Conventions
//!
//! - Encoded bodies carry no root element and no XML declaration; the remote
//!   service infers structure from tag nesting alone
//! - Decoding drops the root tag, ignores attributes and collapses repeated
//!   sibling elements into a [`Value::List`]
//! - Fields listed in [`field_type`] get a `type="..."` attribute when encoded
//!   and are coerced back to their scalar type when decoded
//! - Every other scalar decodes as [`Value::Text`]; numbers and booleans
//!   outside the table are recovered with [`Value::as_i64`],
//!   [`Value::as_f64`] and [`Value::as_bool`]
//! - Anything but whitespace, comments or processing instructions after the
//!   root element is an error

pub mod deserialize;
pub mod error;
pub mod serialize;
pub mod value;

pub use deserialize::{decode, decode_document, Document};
pub use error::XmlError;
pub use serialize::encode;
pub use value::{Fields, Value};

/// Scalar type hint attached to well-known fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// `type="boolean"`
    Boolean,
    /// `type="integer"`
    Integer,
}

impl FieldType {
    /// Attribute value written into the opening tag
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Boolean => "boolean",
            FieldType::Integer => "integer",
        }
    }
}

/// Look up the type attribute for a field name
///
/// The remote parser treats untyped elements as strings, so flags such as
/// `no_owner` must be tagged to be read as booleans.
pub fn field_type(name: &str) -> Option<FieldType> {
    match name {
        "no_owner" | "complete" | "public" | "use_https" | "enable_tasks" => {
            Some(FieldType::Boolean)
        }
        "estimate" | "iteration_length" | "project_id" | "id" | "position"
        | "week_start_day" => Some(FieldType::Integer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_table() {
        assert_eq!(field_type("no_owner"), Some(FieldType::Boolean));
        assert_eq!(field_type("complete"), Some(FieldType::Boolean));
        assert_eq!(field_type("estimate"), Some(FieldType::Integer));
        assert_eq!(field_type("name"), None);
        assert_eq!(FieldType::Boolean.as_str(), "boolean");
    }
}
