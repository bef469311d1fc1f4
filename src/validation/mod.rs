//! Payload checks run before a note body is allowed to touch storage.
//!
//! Create and update share one rule set: the body must be a JSON object
//! whose `content` is a string that is non-empty once surrounding whitespace
//! is stripped. Accepted payloads come back with the content already stripped.

use serde_json::Value;

use crate::dto::{CreateNoteRequest, UpdateNoteRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Content is required")]
    MissingContent,
    #[error("Content must be a string")]
    ContentNotString,
    #[error("Content cannot be empty")]
    EmptyContent,
}

/// Parses a raw request body. Empty or malformed bodies count as absent.
pub fn parse_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body).ok()
}

pub fn validate_create(data: Option<&Value>) -> Result<CreateNoteRequest, ValidationError> {
    validate_content(data).map(|content| CreateNoteRequest { content })
}

pub fn validate_update(data: Option<&Value>) -> Result<UpdateNoteRequest, ValidationError> {
    validate_content(data).map(|content| UpdateNoteRequest { content })
}

/// Unicode whitespace plus the ASCII file, group, record and unit separators
/// (U+001C..=U+001F).
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn validate_content(data: Option<&Value>) -> Result<String, ValidationError> {
    let object = data
        .and_then(Value::as_object)
        .ok_or(ValidationError::NotAnObject)?;

    let content = object
        .get("content")
        .ok_or(ValidationError::MissingContent)?
        .as_str()
        .ok_or(ValidationError::ContentNotString)?
        .trim_matches(is_strippable);

    if content.is_empty() {
        return Err(ValidationError::EmptyContent);
    }

    Ok(content.to_string())
}
