use anyhow::Result;
use drd_wiki::{
    DrdConfig, DrdError, GenerationEngine, Language, LocalStorage, RunConfig, SortOrder,
    WikiPipeline,
};

mod common;
use common::{
    all_fixtures, position, workspace, ENTITIES, REGISTRIES, SUBTYPES_FILE, TYPES_FILE,
};

fn run(
    dir: &std::path::Path,
    config: RunConfig,
) -> drd_wiki::Result<drd_wiki::RunReport> {
    let pipeline = WikiPipeline::new(LocalStorage::new(dir), config);
    GenerationEngine::new(pipeline).run()
}

#[test]
fn test_registries_render_in_order() -> Result<()> {
    let temp_dir = workspace(&[REGISTRIES]);
    let config = RunConfig::new(REGISTRIES, Language::English, DrdConfig::default())
        .with_output("registries_page.txt");

    let report = run(temp_dir.path(), config)?;
    assert_eq!(report.entries, 2);
    assert!(report.skipped.is_empty());

    let text = std::fs::read_to_string(temp_dir.path().join("registries_page.txt"))?;
    assert!(text.contains("|-\n| Registry A || Documents || desc1\n"));
    assert!(text.contains("|-\n| Registry B || Documents || desc2\n"));
    assert!(position(&text, "Registry A") < position(&text, "Registry B"));
    assert_eq!(text.matches("Registry A").count(), 1);
    assert_eq!(text.matches("Registry B").count(), 1);
    Ok(())
}

#[test]
fn test_full_english_page() -> Result<()> {
    let temp_dir = workspace(&all_fixtures());
    let config =
        RunConfig::new(ENTITIES, Language::English, DrdConfig::default()).with_output("page.txt");

    let report = run(temp_dir.path(), config)?;

    // 9 entries: Data Community expands to two sub-types, GC Data Glossary sits in two sections
    assert_eq!(report.entries, 9);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 6);
    assert!(report.excluded.is_empty());

    let text = std::fs::read_to_string(temp_dir.path().join("page.txt"))?;
    assert!(!text.contains("Draft Initiative"));
    assert!(!text.contains("Entry without a name"));
    assert!(text.contains("Network of data practitioners across departments"));
    assert!(text.contains(
        "| [https://www.canada.ca/cdo-council CDO Council] || Committees || Chief Data Officers from across government\n"
    ));
    assert!(text.contains("* [[#Projects.2FInitiatives|Projects/\u{200b}Initiatives]]"));

    let communities = position(&text, "== Communities ==");
    let glossaries = position(&text, "== Data Glossaries ==");
    let policy = position(&text, "== Policy Instruments ==");
    assert!(communities < glossaries && glossaries < policy);
    assert!(position(&text, "CDO Council]") < position(&text, "Data Community]"));
    assert!(position(&text, "|| Communities ||") < position(&text, "|| Working Groups ||"));
    Ok(())
}

#[test]
fn test_output_is_deterministic() -> Result<()> {
    let temp_dir = workspace(&all_fixtures());

    for output in ["first.txt", "second.txt"] {
        let config =
            RunConfig::new(ENTITIES, Language::English, DrdConfig::default()).with_output(output);
        run(temp_dir.path(), config)?;
    }

    let first = std::fs::read(temp_dir.path().join("first.txt"))?;
    let second = std::fs::read(temp_dir.path().join("second.txt"))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_second_run_overwrites_output() -> Result<()> {
    let temp_dir = workspace(&all_fixtures());
    let output = temp_dir.path().join("page.txt");
    std::fs::write(&output, "stale content that must disappear\n".repeat(500))?;

    let config =
        RunConfig::new(REGISTRIES, Language::English, DrdConfig::default()).with_output("page.txt");
    run(temp_dir.path(), config.clone())?;
    let first = std::fs::read_to_string(&output)?;
    run(temp_dir.path(), config)?;
    let second = std::fs::read_to_string(&output)?;

    assert!(!second.contains("stale content"));
    assert_eq!(first, second);
    assert_eq!(second.matches("[[Category:Data Resource Directory]]").count(), 1);
    Ok(())
}

#[test]
fn test_missing_input_writes_nothing() -> Result<()> {
    let temp_dir = workspace(&[]);
    let config = RunConfig::new("nope.csv", Language::English, DrdConfig::default())
        .with_output("page.txt");

    let err = run(temp_dir.path(), config).unwrap_err();

    assert!(matches!(err, DrdError::MissingFile { .. }));
    assert_ne!(err.exit_code(), 0);
    assert!(!temp_dir.path().join("page.txt").exists());
    Ok(())
}

#[test]
fn test_french_page_requires_translation_files() -> Result<()> {
    let temp_dir = workspace(&[ENTITIES, TYPES_FILE]);
    let config =
        RunConfig::new(ENTITIES, Language::French, DrdConfig::default()).with_output("page_FR.txt");

    let err = run(temp_dir.path(), config).unwrap_err();

    assert!(matches!(err, DrdError::MissingTranslationFile { .. }));
    assert!(err.to_string().contains(SUBTYPES_FILE));
    assert!(!temp_dir.path().join("page_FR.txt").exists());
    Ok(())
}

#[test]
fn test_full_french_page() -> Result<()> {
    let temp_dir = workspace(&all_fixtures());
    let config =
        RunConfig::new(ENTITIES, Language::French, DrdConfig::default()).with_output("page_FR.txt");

    let report = run(temp_dir.path(), config)?;
    assert_eq!(report.entries, 9);

    let text = std::fs::read_to_string(temp_dir.path().join("page_FR.txt"))?;
    assert!(text.contains("= Répertoire des ressources de données ="));
    assert!(text.contains("== Communautés ==") && text.contains("== Projets / initiatives =="));
    assert!(text.contains("* [[#Communaut%C3%A9s|Communautés]]"));
    assert!(text.contains("[https://www.canada.ca/fr/conseil-dpd Conseil des DPD] || Comités ||"));
    assert!(text.contains("|| Groupes de travail ||"));
    assert!(!text.contains("CDO Council"));
    assert!(text.ends_with("[[Catégorie:Répertoire des ressources de données]]\n"));
    Ok(())
}

#[test]
fn test_translation_paths_from_config() -> Result<()> {
    let temp_dir = workspace(&[ENTITIES]);
    std::fs::create_dir(temp_dir.path().join("grids"))?;
    for name in [TYPES_FILE, SUBTYPES_FILE] {
        std::fs::copy(common::fixture(name), temp_dir.path().join("grids").join(name))?;
    }

    let settings = DrdConfig::from_toml_str(
        r#"
[translations]
types_file = "grids/Entity Types-Grid view.csv"
subtypes_file = "grids/Entity sub-type-Grid view.csv"
"#,
    )?;
    let config = RunConfig::new(ENTITIES, Language::French, settings).with_output("fr.txt");

    let report = run(temp_dir.path(), config)?;
    assert_eq!(report.entries, 9);
    Ok(())
}

#[test]
fn test_exclusion_list_removes_sensitive_entry() -> Result<()> {
    let temp_dir = workspace(&all_fixtures());
    let mut settings = DrdConfig::default();
    settings.filter.exclude = vec!["GCpedia Admin Guide".to_string()];

    // 英文標籤同時適用於法文頁面
    for (language, output) in [(Language::English, "en.txt"), (Language::French, "fr.txt")] {
        let config = RunConfig::new(ENTITIES, language, settings.clone()).with_output(output);
        let report = run(temp_dir.path(), config)?;
        assert_eq!(report.entries, 8);
        assert_eq!(report.excluded, vec!["GCpedia Admin Guide".to_string()]);
    }

    let english = std::fs::read_to_string(temp_dir.path().join("en.txt"))?;
    let french = std::fs::read_to_string(temp_dir.path().join("fr.txt"))?;
    assert!(!english.contains("Admin Guide"));
    assert!(!french.contains("Guide d'administration"));
    Ok(())
}

#[test]
fn test_keep_input_order() -> Result<()> {
    let temp_dir = workspace(&[REGISTRIES]);
    std::fs::write(
        temp_dir.path().join("reversed.csv"),
        "Label,Type,SubType\nRegistry B,Documents,Documents\nRegistry A,Documents,Documents\n",
    )?;

    let mut settings = DrdConfig::default();
    settings.render.sort = SortOrder::Input;
    let config = RunConfig::new("reversed.csv", Language::English, settings).with_output("out.txt");
    run(temp_dir.path(), config)?;

    let text = std::fs::read_to_string(temp_dir.path().join("out.txt"))?;
    assert!(position(&text, "Registry B") < position(&text, "Registry A"));
    Ok(())
}

#[test]
fn test_bad_template_leaves_no_output() -> Result<()> {
    let temp_dir = workspace(&[REGISTRIES]);
    std::fs::write(temp_dir.path().join("broken.j2"), "{% for s in sections %}")?;

    let mut settings = DrdConfig::default();
    settings.render.template = Some("broken.j2".into());
    let config = RunConfig::new(REGISTRIES, Language::English, settings).with_output("out.txt");

    let err = run(temp_dir.path(), config).unwrap_err();
    assert!(matches!(err, DrdError::Template(_)));
    assert!(!temp_dir.path().join("out.txt").exists());
    Ok(())
}
