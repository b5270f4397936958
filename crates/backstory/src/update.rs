//! Carrying translations over to a new resource set.

use std::collections::HashMap;

use serde::Serialize;
use subtrans_matching::model::{MigrationMeta, MigrationSummary};
use subtrans_matching::{migrate, BestMatchResolver, FuzzyThreshold, MatchPool, MatchTier};

use crate::model::Backstory;
use crate::order::order_backstories;
use crate::writer::TranslationWriter;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Translated,
    Todo,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Translated => write!(f, "translated"),
            Self::Todo => write!(f, "todo"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub id: String,
    pub hint: String,
    pub status: EntryStatus,
    /// Id the translation was looked up under, when it differs from `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<MatchTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub meta: MigrationMeta,
    pub summary: MigrationSummary,
    /// Previous-version ids no current backstory claimed.
    pub leftover_previous: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub total: usize,
    pub translated: usize,
    pub todo: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migration: Option<MigrationReport>,
    pub unused_translations: Vec<String>,
    pub entries: Vec<EntryReport>,
}

#[derive(Debug, Clone)]
pub struct UpdatePlan {
    /// Complete translation document.
    pub document: String,
    pub report: UpdateReport,
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

struct Lookup {
    key: Option<String>,
    previous_id: Option<String>,
    tier: Option<MatchTier>,
    distance: Option<f64>,
}

/// Build the new translation document for `current`.
///
/// With `previous`, each current backstory is matched against the previous
/// resource set and the matched previous id selects the translation.
/// Without it, translations are looked up by the current id.
pub fn plan_update(
    current: Vec<Backstory>,
    previous: Option<Vec<Backstory>>,
    translations: Vec<Backstory>,
    resolver: &BestMatchResolver,
    threshold: FuzzyThreshold,
) -> UpdatePlan {
    let ordered = order_backstories(current);

    let (lookups, migration) = match previous {
        Some(previous) => {
            let outcome = migrate(&ordered, MatchPool::new(previous), resolver, threshold);
            let lookups = outcome
                .pairs
                .into_iter()
                .map(|pair| {
                    let previous_id = pair.previous.map(|p| p.id);
                    Lookup {
                        key: previous_id.clone(),
                        previous_id,
                        tier: pair.tier,
                        distance: pair.distance,
                    }
                })
                .collect::<Vec<_>>();
            let report = MigrationReport {
                meta: outcome.meta,
                summary: outcome.summary,
                leftover_previous: outcome.leftover.into_iter().map(|p| p.id).collect(),
            };
            (lookups, Some(report))
        }
        None => {
            let lookups = ordered
                .iter()
                .map(|story| Lookup {
                    key: Some(story.id.clone()),
                    previous_id: None,
                    tier: None,
                    distance: None,
                })
                .collect::<Vec<_>>();
            (lookups, None)
        }
    };

    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, tr) in translations.iter().enumerate() {
        if index.contains_key(&tr.id) {
            log::warn!("duplicate translation '{}', keeping the first", tr.id);
            continue;
        }
        index.insert(tr.id.clone(), i);
    }
    let mut used = vec![false; translations.len()];

    let mut writer = TranslationWriter::new();
    let mut entries = Vec::with_capacity(ordered.len());

    for (story, lookup) in ordered.iter().zip(lookups) {
        let found = lookup.key.as_deref().and_then(|key| index.remove(key));
        let status = match found {
            Some(i) => {
                used[i] = true;
                writer.translated(&story.id, story, &translations[i]);
                EntryStatus::Translated
            }
            None => {
                log::debug!("{}: no translation", story.id);
                writer.todo(story);
                EntryStatus::Todo
            }
        };
        entries.push(EntryReport {
            id: story.id.clone(),
            hint: story.hint(),
            status,
            previous_id: lookup.previous_id.filter(|p| *p != story.id),
            tier: lookup.tier,
            distance: lookup.distance,
        });
    }

    // Duplicates were never indexed; they count as unused too
    let unused: Vec<&Backstory> = translations
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(tr, _)| tr)
        .collect();
    if !unused.is_empty() {
        writer.unused_section();
        for tr in &unused {
            writer.unused(tr);
        }
    }

    let translated = entries
        .iter()
        .filter(|e| e.status == EntryStatus::Translated)
        .count();
    let report = UpdateReport {
        total: entries.len(),
        translated,
        todo: entries.len() - translated,
        migration,
        unused_translations: unused.iter().map(|tr| tr.id.clone()).collect(),
        entries,
    };
    log::info!(
        "update: {} backstories, {} translated, {} todo, {} unused translations",
        report.total,
        report.translated,
        report.todo,
        report.unused_translations.len()
    );

    UpdatePlan {
        document: writer.finish(),
        report,
    }
}
