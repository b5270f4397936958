//! Minimal element tree over quick-xml events.
//!
//! Backstory files are small and shallow, so the readers work on a parsed
//! tree rather than on the event stream directly.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::BackstoryError;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Element {
    pub name: String,
    /// Concatenated character data directly inside this element.
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// First child named `name`, matching either case of the first letter.
    pub fn child(&self, name: &str) -> Option<&Element> {
        let alternate = flip_first_letter(name);
        self.children
            .iter()
            .find(|c| c.name == name || c.name == alternate)
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    pub fn required_text(&self, name: &str) -> Result<&str, BackstoryError> {
        self.child_text(name)
            .ok_or_else(|| BackstoryError::MissingElement {
                parent: self.name.clone(),
                element: name.to_string(),
            })
    }
}

fn flip_first_letter(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_uppercase() => c.to_lowercase().chain(chars).collect(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Parse a whole document into its root element.
pub(crate) fn parse_document(xml: &str, file: &str) -> Result<Element, BackstoryError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    let xml_error = |message: String| BackstoryError::Xml {
        file: file.to_string(),
        message,
    };

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(Element {
                name: element_name(e),
                ..Element::default()
            }),
            Ok(Event::Empty(ref e)) => {
                let element = Element {
                    name: element_name(e),
                    ..Element::default()
                };
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    let text = e.decode().map_err(|err| xml_error(err.to_string()))?;
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    let name = String::from_utf8_lossy(e);
                    let resolved = resolve_reference(&name)
                        .ok_or_else(|| xml_error(format!("unknown entity '&{name};'")))?;
                    top.text.push_str(&resolved);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(xml_error(format!(
                    "at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(xml_error("unexpected end of document".into()));
    }
    root.ok_or_else(|| xml_error("document has no root element".into()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Resolve `&name;` where `name` is a predefined entity or a character reference.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse::<u32>().ok()?,
        };
        return char::from_u32(value).map(String::from);
    }
    resolve_predefined_entity(name).map(String::from)
}
