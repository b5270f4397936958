//! Resource directory loading and a full update pass over real files.

use std::fs;
use std::path::Path;

use subtrans_backstory::reader::{load_resource_dir, load_translations};
use subtrans_backstory::update::EntryStatus;
use subtrans_backstory::{plan_update, BackstoryError, BackstorySlot};
use subtrans_matching::{MatchConfig, MatchTier};
use tempfile::TempDir;

const SOLDIERS_V1: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Backstories>
  <Backstory>
    <title>vat-grown soldier</title>
    <titleShort>soldier</titleShort>
    <baseDesc>Grown in a vat and trained for war from birth.</baseDesc>
    <slot>Childhood</slot>
  </Backstory>
  <Backstory>
    <title>medic</title>
    <titleShort>medic</titleShort>
    <baseDesc>Patched up wounded soldiers on the front.</baseDesc>
    <slot>Adulthood</slot>
  </Backstory>
</Backstories>"#;

// Soldier text edited slightly, medic unchanged, one new story
const SOLDIERS_V2: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Backstories>
  <Backstory>
    <title>vat-grown soldier</title>
    <titleShort>soldier</titleShort>
    <baseDesc>Grown in a vat and trained for wars from birth.</baseDesc>
    <slot>Childhood</slot>
  </Backstory>
  <Backstory>
    <title>medic</title>
    <titleShort>medic</titleShort>
    <baseDesc>Patched up wounded soldiers on the front.</baseDesc>
    <slot>Adulthood</slot>
  </Backstory>
  <Backstory>
    <title>space pirate</title>
    <titleShort>pirate</titleShort>
    <baseDesc>Raided freighters between the stars.</baseDesc>
    <slot>Adulthood</slot>
  </Backstory>
</Backstories>"#;

const BIOS: &str = r#"<PlayerCreatedBios>
  <PawnBio>
    <Name><First>Ann</First><Last>Bo</Last></Name>
    <Gender>Female</Gender>
    <Childhood><title>dreamer</title><titleShort>dreamer</titleShort><baseDesc>Dreamed of stars.</baseDesc></Childhood>
    <Adulthood><title>pilot</title><titleShort>pilot</titleShort><baseDesc>Flew ships.</baseDesc></Adulthood>
  </PawnBio>
</PlayerCreatedBios>"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn resources(soldiers: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Soldiers.xml", soldiers);
    write(dir.path(), "Bios.xml", BIOS);
    write(dir.path(), "Things.xml", "<Defs><ThingDef/></Defs>");
    write(dir.path(), "notes.txt", "not xml");
    dir
}

#[test]
fn loads_directory_sorted_and_skips_foreign_files() {
    let dir = resources(SOLDIERS_V1);
    let stories = load_resource_dir(dir.path()).unwrap();

    // Bios.xml sorts before Soldiers.xml; Things.xml is skipped
    assert_eq!(stories.len(), 4);
    assert_eq!(stories[0].category.as_deref(), Some("Bios"));
    assert_eq!(stories[0].slot, BackstorySlot::Childhood);
    assert_eq!(stories[2].category.as_deref(), Some("Soldiers"));
    assert!(stories[2].id.starts_with("VatGrownSoldier"));
}

#[test]
fn missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_resource_dir(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, BackstoryError::Io(_)));
}

#[test]
fn malformed_resource_is_xml_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Broken.xml", "<Backstories><Backstory>");
    let err = load_resource_dir(dir.path()).unwrap_err();
    assert!(matches!(err, BackstoryError::Xml { .. }));
}

#[test]
fn update_migrates_edited_and_named_stories() {
    let prev_dir = resources(SOLDIERS_V1);
    let curr_dir = resources(SOLDIERS_V2);
    let previous = load_resource_dir(prev_dir.path()).unwrap();
    let current = load_resource_dir(curr_dir.path()).unwrap();

    // Translate everything from the previous version
    let mut translated = String::from("<BackstoryTranslations>\n");
    for story in &previous {
        translated.push_str(&format!(
            "<{id}><title>T {id}</title><titleShort>t</titleShort><desc>D {id}</desc></{id}>\n",
            id = story.id
        ));
    }
    translated.push_str("<Retired1><title>x</title><titleShort>x</titleShort><desc>x</desc></Retired1>\n");
    translated.push_str("</BackstoryTranslations>\n");

    let tr_dir = TempDir::new().unwrap();
    let tr_path = tr_dir.path().join("Backstories.xml");
    fs::write(&tr_path, translated).unwrap();
    let translations = load_translations(&tr_path).unwrap();

    let config = MatchConfig::default();
    let plan = plan_update(
        current,
        Some(previous.clone()),
        translations,
        &config.resolver().unwrap(),
        config.threshold().unwrap(),
    );
    let report = &plan.report;

    assert_eq!(report.total, 5);
    assert_eq!(report.translated, 4);
    assert_eq!(report.todo, 1);
    assert_eq!(report.unused_translations, vec!["Retired1"]);

    let pirate = report
        .entries
        .iter()
        .find(|e| e.id.starts_with("SpacePirate"))
        .unwrap();
    assert_eq!(pirate.status, EntryStatus::Todo);

    let soldier = report
        .entries
        .iter()
        .find(|e| e.id.starts_with("VatGrownSoldier"))
        .unwrap();
    assert_eq!(soldier.status, EntryStatus::Translated);

    let named: Vec<_> = report
        .entries
        .iter()
        .filter(|e| e.hint.starts_with("Ann"))
        .collect();
    assert_eq!(named.len(), 2);
    assert!(named.iter().all(|e| e.tier == Some(MatchTier::Identity)));

    let migration = report.migration.as_ref().unwrap();
    assert_eq!(migration.summary.total, 5);
    assert_eq!(migration.summary.unmatched, 1);
    assert!(migration.leftover_previous.is_empty());

    // The written document reads back as a translation file
    let out_path = tr_dir.path().join("Backstories-new.xml");
    fs::write(&out_path, &plan.document).unwrap();
    let reread = load_translations(&out_path).unwrap();
    assert_eq!(reread.len(), 6);
    assert!(reread.iter().any(|b| b.id == "Retired1"));
    let soldier_tr = reread.iter().find(|b| b.id == soldier.id).unwrap();
    assert!(soldier_tr.title.starts_with("T VatGrownSoldier"));
}
