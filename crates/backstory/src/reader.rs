//! Loading backstories from resource and translation files.
//!
//! File kinds are recognized by structure:
//! - backstory resources: children with `title` and `baseDesc`
//! - player bios: children with `Name` and `Childhood`/`Adulthood`
//! - translations: root `BackstoryTranslations`, one element per id

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BackstoryError;
use crate::identifier::derive_identifier;
use crate::model::{Backstory, BackstorySlot};
use crate::xml::{parse_document, Element};

pub const TRANSLATIONS_ROOT: &str = "BackstoryTranslations";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Backstories,
    PlayerBios,
}

// ---------------------------------------------------------------------------
// Text normalization
// ---------------------------------------------------------------------------

/// CRLF and lone CR become LF.
pub fn fix_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Resource description cleanup. Returns (text used for the id hash, final text).
fn normalize_resource_description(raw: &str) -> (String, String) {
    let hashed = raw
        .trim_end()
        .replace("\\r", "\r")
        .replace("\\n", "\n")
        .replace('\r', "");
    let finished = fix_newlines(&hashed).trim().to_string();
    (hashed, finished)
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|v| !v.is_empty()).map(str::to_string)
}

// ---------------------------------------------------------------------------
// Resource files
// ---------------------------------------------------------------------------

pub(crate) fn detect_kind(root: &Element) -> Option<DocumentKind> {
    let children = &root.children;
    if children.is_empty() {
        return None;
    }
    if children
        .iter()
        .all(|c| c.child("title").is_some() && c.child("baseDesc").is_some())
    {
        return Some(DocumentKind::Backstories);
    }
    if children.iter().all(|c| {
        c.child("Name").is_some() && (c.child("Childhood").is_some() || c.child("Adulthood").is_some())
    }) {
        return Some(DocumentKind::PlayerBios);
    }
    None
}

fn read_resource_backstory(element: &Element, category: &str) -> Result<Backstory, BackstoryError> {
    let title = element.required_text("title")?.to_string();
    let title_short = element.required_text("titleShort")?.to_string();
    let raw_desc = element.required_text("baseDesc")?;
    let slot = match element.child_text("slot") {
        Some(value) => BackstorySlot::parse(value)?,
        None => BackstorySlot::Unknown,
    };

    let (hashed, description) = normalize_resource_description(raw_desc);
    Ok(Backstory {
        id: derive_identifier(&title, &hashed),
        title,
        title_female: non_empty(element.child_text("titleFemale")),
        title_short,
        title_short_female: non_empty(element.child_text("titleShortFemale")),
        description,
        slot,
        category: Some(category.to_string()),
        ..Backstory::default()
    })
}

/// A player bio yields its childhood then its adulthood backstory.
fn read_player_bio(element: &Element, category: &str) -> Result<Vec<Backstory>, BackstoryError> {
    let name = element
        .child("Name")
        .ok_or_else(|| BackstoryError::MissingElement {
            parent: element.name.clone(),
            element: "Name".into(),
        })?;
    let first = name
        .child_text("First")
        .ok_or_else(|| BackstoryError::MissingElement {
            parent: "Name".into(),
            element: "First".into(),
        })?;
    let last = name
        .child_text("Last")
        .ok_or_else(|| BackstoryError::MissingElement {
            parent: "Name".into(),
            element: "Last".into(),
        })?;
    let nick = non_empty(name.child_text("Nick"));
    let gender = element.required_text("Gender")?.to_string();

    let mut stories = Vec::with_capacity(2);
    for slot in [BackstorySlot::Childhood, BackstorySlot::Adulthood] {
        let tag = slot.to_string();
        let Some(story) = element.child(&tag) else {
            return Err(BackstoryError::MissingElement {
                parent: element.name.clone(),
                element: tag,
            });
        };
        let mut backstory = read_resource_backstory(story, category)?;
        backstory.first_name = Some(first.to_string());
        backstory.last_name = Some(last.to_string());
        backstory.nick_name = nick.clone();
        backstory.gender = Some(gender.clone());
        backstory.slot = slot;
        stories.push(backstory);
    }
    Ok(stories)
}

/// Parse one resource document. `Ok(None)` means the file is not a backstory file.
pub fn parse_resource_document(
    xml: &str,
    file: &str,
    category: &str,
) -> Result<Option<Vec<Backstory>>, BackstoryError> {
    let root = parse_document(xml, file)?;
    let Some(kind) = detect_kind(&root) else {
        return Ok(None);
    };

    let mut stories = Vec::new();
    for child in &root.children {
        match kind {
            DocumentKind::Backstories => stories.push(read_resource_backstory(child, category)?),
            DocumentKind::PlayerBios => stories.extend(read_player_bio(child, category)?),
        }
    }
    log::debug!("{file}: {} backstories ({kind:?})", stories.len());
    Ok(Some(stories))
}

/// Every top-level `*.xml` in `dir`, sorted by name; category is the file stem.
pub fn load_resource_dir(dir: &Path) -> Result<Vec<Backstory>, BackstoryError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| BackstoryError::Io(format!("{}: {e}", dir.display())))?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| BackstoryError::Io(format!("{}: {e}", dir.display())))?
            .path();
        let is_xml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if path.is_file() && is_xml {
            files.push(path);
        }
    }
    files.sort();

    let mut stories = Vec::new();
    for path in files {
        let xml = read_file(&path)?;
        let file = path.display().to_string();
        let category = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match parse_resource_document(&xml, &file, &category)? {
            Some(found) => stories.extend(found),
            None => log::debug!("{file}: not a backstory document, skipped"),
        }
    }
    log::info!("loaded {} backstories from {}", stories.len(), dir.display());
    Ok(stories)
}

// ---------------------------------------------------------------------------
// Translation files
// ---------------------------------------------------------------------------

fn read_translated_backstory(element: &Element) -> Result<Backstory, BackstoryError> {
    Ok(Backstory {
        id: element.name.clone(),
        title: element.required_text("title")?.to_string(),
        title_female: non_empty(element.child_text("titleFemale")),
        title_short: element.required_text("titleShort")?.to_string(),
        title_short_female: non_empty(element.child_text("titleShortFemale")),
        description: fix_newlines(element.required_text("desc")?).trim().to_string(),
        ..Backstory::default()
    })
}

/// Parse a translation document, keeping file order.
pub fn parse_translations(xml: &str, file: &str) -> Result<Vec<Backstory>, BackstoryError> {
    let root = parse_document(xml, file)?;
    if root.name != TRANSLATIONS_ROOT {
        return Err(BackstoryError::UnknownFormat {
            file: file.to_string(),
            root: root.name,
        });
    }
    root.children.iter().map(read_translated_backstory).collect()
}

pub fn load_translations(path: &Path) -> Result<Vec<Backstory>, BackstoryError> {
    let xml = read_file(path)?;
    let stories = parse_translations(&xml, &path.display().to_string())?;
    log::info!("loaded {} translations from {}", stories.len(), path.display());
    Ok(stories)
}

fn read_file(path: &Path) -> Result<String, BackstoryError> {
    fs::read_to_string(path).map_err(|e| BackstoryError::Io(format!("{}: {e}", path.display())))
}
