//! Resource methods
//!
//! One `impl PivotalClient` block per Tracker resource. Each method fixes the
//! verb, path template and body shape for one endpoint and hands the request
//! to [`PivotalClient::send`](crate::PivotalClient::send).
//!
//! Collection endpoints answer with a wrapper element around repeated
//! children, and a single child decodes as a bare map rather than a list.
//! [`collection`] normalizes both shapes (and the empty sentinel) into a
//! `Vec`.

pub mod activities;
pub mod iterations;
pub mod memberships;
pub mod projects;
pub mod stories;
pub mod tasks;
pub mod tokens;

use crate::xml::Value;

/// Extract the repeated `item` children of a collection response
pub fn collection(result: Option<Value>, item: &str) -> Vec<Value> {
    match result {
        Some(Value::Map(mut fields)) => fields
            .remove(item)
            .map(Value::into_list)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
