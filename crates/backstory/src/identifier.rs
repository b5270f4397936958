//! Stable backstory identifiers.
//!
//! Resource backstories carry no id of their own; the id is derived from the
//! title plus a two-digit hash of the description, so it survives reloads
//! and matches ids already present in translation files.

use crate::model::Backstory;

/// `h = 23; h = h * 31 + unit` over UTF-16 code units, 32-bit wrapping.
pub fn stable_string_hash(s: &str) -> i32 {
    s.encode_utf16().fold(23i32, |h, unit| {
        h.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

/// Upper-cases the first letter of every space-separated word and joins them.
pub fn capitalized_no_spaces(s: &str) -> String {
    s.split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn remove_non_alphanumeric(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Explicit id if present, otherwise derived from title and description.
pub fn backstory_identifier(backstory: &Backstory) -> String {
    if !backstory.id.is_empty() {
        return backstory.id.clone();
    }
    derive_identifier(&backstory.title, &backstory.description)
}

pub fn derive_identifier(title: &str, description: &str) -> String {
    let stem = remove_non_alphanumeric(&capitalized_no_spaces(&title.replace('-', " ")));
    let suffix = (stable_string_hash(description) % 100).unsigned_abs();
    format!("{stem}{suffix}")
}
