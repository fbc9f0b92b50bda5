//! XML deserialization: parsing a Tracker response into a [`Value`] tree.
//!
//! The reader walks events with an explicit element stack, so arbitrarily deep
//! documents do not recurse. No particular root tag is assumed.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::error::XmlError;
use super::value::{Fields, Value};
use super::{field_type, FieldType};

/// A decoded document together with the name of its root element
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Root element name (dropped from [`Document::value`])
    pub root: String,
    /// Content of the root element
    pub value: Value,
}

/// Key under which text mixed with child elements is kept
pub const TEXT_KEY: &str = "_";

/// Decode a document into the content of its root element
///
/// # Errors
///
/// Returns `XmlError` if the document is malformed or has no root element.
pub fn decode(xml: &str) -> Result<Value, XmlError> {
    decode_document(xml).map(|doc| doc.value)
}

/// Decode a document, keeping the root element name
///
/// # Errors
///
/// Returns `XmlError` if the document is malformed or has no root element.
pub fn decode_document(xml: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut document: Option<Document> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = element_name(e.name().as_ref())?;
                if stack.is_empty() && document.is_some() {
                    return Err(XmlError::TrailingContent(format!("<{name}>")));
                }
                stack.push(Frame::new(name));
            }
            Event::Empty(e) => {
                let name = element_name(e.name().as_ref())?;
                match stack.last_mut() {
                    Some(parent) => parent.add_child(name, Value::Text(String::new())),
                    None if document.is_some() => {
                        return Err(XmlError::TrailingContent(format!("<{name}/>")))
                    }
                    None => {
                        document = Some(Document {
                            root: name,
                            value: Value::Text(String::new()),
                        })
                    }
                }
            }
            Event::End(_) => {
                let Some(frame) = stack.pop() else {
                    continue;
                };
                let (name, value) = frame.finish();
                match stack.last_mut() {
                    Some(parent) => parent.add_child(name, value),
                    None => document = Some(Document { root: name, value }),
                }
            }
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::Encoding(err.to_string()))?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&quick_xml::escape::unescape(&decoded)?),
                    None if document.is_some() && !decoded.trim().is_empty() => {
                        return Err(XmlError::TrailingContent(decoded.trim().to_string()))
                    }
                    None => {}
                }
            }
            Event::CData(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::Encoding(err.to_string()))?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&decoded),
                    None if document.is_some() => {
                        return Err(XmlError::TrailingContent("CDATA section".to_string()))
                    }
                    None => {}
                }
            }
            Event::GeneralRef(e) => {
                let entity = e
                    .decode()
                    .map_err(|err| XmlError::Encoding(err.to_string()))?;
                let reference = format!("&{entity};");
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&quick_xml::escape::unescape(&reference)?),
                    None if document.is_some() => {
                        return Err(XmlError::TrailingContent(reference))
                    }
                    None => {}
                }
            }
            Event::Eof => {
                if let Some(frame) = stack.pop() {
                    return Err(XmlError::UnexpectedEof(frame.name));
                }
                return document.ok_or(XmlError::MissingRoot);
            }
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }
}

fn element_name(raw: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| XmlError::Encoding(e.to_string()))
}

/// An element whose end tag has not been read yet
struct Frame {
    name: String,
    fields: Fields,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            fields: Fields::new(),
            text: String::new(),
        }
    }

    fn add_child(&mut self, name: String, value: Value) {
        let value = coerce(&name, value);
        self.fields.append(name, value);
    }

    fn finish(self) -> (String, Value) {
        if self.fields.is_empty() {
            return (self.name, Value::Text(self.text));
        }
        let mut fields = self.fields;
        if !self.text.trim().is_empty() {
            fields.append(TEXT_KEY, Value::Text(self.text));
        }
        (self.name, Value::Map(fields))
    }
}

/// Restore the scalar type of fields listed in the type table
fn coerce(name: &str, value: Value) -> Value {
    let Value::Text(text) = value else {
        return value;
    };
    let trimmed = text.trim();
    match field_type(name) {
        Some(FieldType::Boolean) => match trimmed {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Text(text),
        },
        Some(FieldType::Integer) => match trimmed.parse::<i64>() {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Text(text),
        },
        None => Value::Text(text),
    }
}
