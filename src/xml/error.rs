//! XML codec error types

/// Errors that can occur while decoding a Tracker XML document
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An error from the underlying quick-xml reader
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An entity or character reference could not be resolved
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Element names or text were not valid UTF-8
    #[error("XML encoding error: {0}")]
    Encoding(String),

    /// The document contained no root element
    #[error("missing root element")]
    MissingRoot,

    /// The document ended before every element was closed
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// Markup or text followed the root element
    #[error("unexpected content after root element: {0}")]
    TrailingContent(String),
}
