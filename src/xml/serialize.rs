//! XML serialization: lowering a [`Fields`] tree into a request body.
//!
//! Each field becomes `<name>content</name>`. Nested mappings recurse, lists
//! repeat the element once per item, and scalar text is entity-encoded. No
//! declaration, namespace or wrapping root element is written.

use std::io::{self, Write};

use quick_xml::events::BytesText;
use quick_xml::Writer;

use super::field_type;
use super::value::{Fields, Value};

/// Encode fields as an XML fragment
pub fn encode(fields: &Fields) -> String {
    let mut buf = Vec::with_capacity(256);
    // Writing to Vec<u8> is infallible; if this fails it means a logic error.
    if let Err(e) = write_fields(&mut Writer::new(&mut buf), fields) {
        tracing::error!(error = %e, "failed to serialize Tracker XML body");
        buf.clear();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_fields<W: Write>(writer: &mut Writer<W>, fields: &Fields) -> io::Result<()> {
    for (name, value) in fields.iter() {
        write_element(writer, name, value)?;
    }
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, name: &str, value: &Value) -> io::Result<()> {
    match value {
        Value::List(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
        }
        Value::Map(nested) => {
            writer
                .create_element(name)
                .write_inner_content(|w| write_fields(w, nested))?;
        }
        scalar => {
            let text = scalar_text(scalar);
            let element = writer.create_element(name);
            match field_type(name).filter(|_| !scalar.is_null()) {
                Some(ty) => element
                    .with_attribute(("type", ty.as_str()))
                    .write_text_content(BytesText::new(&text))?,
                None => element.write_text_content(BytesText::new(&text))?,
            };
        }
    }
    Ok(())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Null | Value::List(_) | Value::Map(_) => String::new(),
    }
}
