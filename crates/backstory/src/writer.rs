//! Translation file output.
//!
//! Layout is fixed: one tab before each entry, two tabs before each field,
//! `EN:` comments carrying the source text above translated fields.

use std::borrow::Cow;
use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::model::Backstory;
use crate::reader::TRANSLATIONS_ROOT;

pub const TODO: &str = "TODO";

/// Builds a `BackstoryTranslations` document entry by entry.
#[derive(Debug)]
pub struct TranslationWriter {
    out: String,
    entries: usize,
}

impl Default for TranslationWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationWriter {
    pub fn new() -> Self {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        let _ = writeln!(out, "<{TRANSLATIONS_ROOT}>");
        Self { out, entries: 0 }
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Existing translation of `original`, written under `id`.
    pub fn translated(&mut self, id: &str, original: &Backstory, translated: &Backstory) {
        self.open(id, &original.hint());

        self.comment(&original.title);
        self.field("title", &translated.title);

        match (&original.title_female, &translated.title_female) {
            (Some(en), tr) => {
                self.comment(en);
                self.field("titleFemale", tr.as_deref().unwrap_or(TODO));
            }
            (None, Some(tr)) => self.field("titleFemale", tr),
            (None, None) => {}
        }

        self.comment(&original.title_short);
        self.field("titleShort", &translated.title_short);

        match (&original.title_short_female, &translated.title_short_female) {
            (Some(en), tr) => {
                self.comment(en);
                self.field("titleShortFemale", tr.as_deref().unwrap_or(TODO));
            }
            (None, Some(tr)) => self.field("titleShortFemale", tr),
            (None, None) => {}
        }

        self.comment(&original.description);
        self.field("desc", &translated.description);
        self.close(id);
    }

    /// Untranslated entry: every field is `TODO`.
    pub fn todo(&mut self, original: &Backstory) {
        self.open(&original.id, &original.hint());

        self.comment(&original.title);
        self.field("title", TODO);
        if let Some(en) = &original.title_female {
            self.comment(en);
        }
        self.field("titleFemale", TODO);
        self.comment(&original.title_short);
        self.field("titleShort", TODO);
        if let Some(en) = &original.title_short_female {
            self.comment(en);
        }
        self.field("titleShortFemale", TODO);
        self.comment(&original.description);
        self.field("desc", TODO);
        self.close(&original.id);
    }

    /// Starts the trailing section of translations nothing used.
    pub fn unused_section(&mut self) {
        self.out.push('\n');
        let _ = writeln!(self.out, "\t<!--{}-->", comment_text("Translated but unused"));
    }

    /// Translation written as-is, without source comments.
    pub fn unused(&mut self, translated: &Backstory) {
        self.open(&translated.id, &translated.hint());

        self.field("title", &translated.title);
        if let Some(tr) = &translated.title_female {
            self.field("titleFemale", tr);
        }
        self.field("titleShort", &translated.title_short);
        if let Some(tr) = &translated.title_short_female {
            self.field("titleShortFemale", tr);
        }
        self.field("desc", &translated.description);
        self.close(&translated.id);
    }

    pub fn finish(mut self) -> String {
        let _ = writeln!(self.out, "\n</{TRANSLATIONS_ROOT}>");
        self.out
    }

    fn open(&mut self, id: &str, hint: &str) {
        self.out.push('\n');
        if !hint.is_empty() {
            let _ = writeln!(self.out, "\t<!--{}-->", comment_text(hint));
        }
        let _ = writeln!(self.out, "\t<{id}>");
        self.entries += 1;
    }

    fn close(&mut self, id: &str) {
        let _ = writeln!(self.out, "\t</{id}>");
    }

    fn comment(&mut self, english: &str) {
        let _ = writeln!(self.out, "\t\t<!--{}-->", comment_text(&format!("EN: {english}")));
    }

    fn field(&mut self, name: &str, value: &str) {
        let _ = writeln!(self.out, "\t\t<{name}>{}</{name}>", escape(value));
    }
}

/// Pads with spaces and breaks up `--`, which comments cannot contain.
fn comment_text(text: &str) -> String {
    let mut body: Cow<'_, str> = Cow::Borrowed(text);
    while body.contains("--") {
        body = Cow::Owned(body.replace("--", "- -"));
    }
    format!(" {body} ")
}
