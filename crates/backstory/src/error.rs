use std::fmt;

#[derive(Debug)]
pub enum BackstoryError {
    /// IO error (file read, directory listing).
    Io(String),
    /// Malformed XML.
    Xml { file: String, message: String },
    /// A required child element is missing.
    MissingElement { parent: String, element: String },
    /// `slot` value is not childhood/adulthood.
    InvalidSlot(String),
    /// Root element is not a recognized backstory document.
    UnknownFormat { file: String, root: String },
}

impl fmt::Display for BackstoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Xml { file, message } => write!(f, "{file}: XML error: {message}"),
            Self::MissingElement { parent, element } => {
                write!(f, "<{parent}>: missing element <{element}>")
            }
            Self::InvalidSlot(value) => write!(f, "invalid backstory slot '{value}'"),
            Self::UnknownFormat { file, root } => {
                write!(f, "{file}: unrecognized document with root <{root}>")
            }
        }
    }
}

impl std::error::Error for BackstoryError {}
