//! Catalog facade behaviour: lookup, prefix search, availability, and
//! credential handling. All remote data comes from `common::MockSource`.

mod common;

use common::{API_KEY, MockSource, catalog, config, families, remote_fonts};
use font_catalog::{
    Catalog, CatalogError, Config, FontEntry, KIND_WEB_SAFE_FONT, LoadStatus, normalize_family,
};
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_search_matches_built_in_and_remote_fonts() {
    let (catalog, _) = catalog();

    let found = families(catalog.search_by_prefix("ar").unwrap());
    assert_eq!(found, vec!["Arial", "arial Black"]);
}

#[test]
fn test_search_normalizes_prefix() {
    let (catalog, _) = catalog();

    let found = families(catalog.search_by_prefix("  ROB").unwrap());
    assert_eq!(found, vec!["Roboto", "Roboto Mono"]);
}

#[test]
fn test_resolve_ignores_case_and_whitespace() {
    let (catalog, _) = catalog();

    let roboto = catalog.resolve_by_name(" ROBOTO ").unwrap().unwrap();
    assert_eq!(roboto.family, "Roboto");
    assert_eq!(roboto.category, "sans-serif");
    assert_eq!(roboto.variants, vec!["regular", "700"]);
}

#[test]
fn test_resolve_unknown_font_is_none() {
    let (catalog, _) = catalog();

    assert!(catalog.resolve_by_name("Comic Neue").unwrap().is_none());
    assert!(catalog.resolve_by_name("").unwrap().is_none());
    // A prefix of a family is not the family
    assert!(catalog.resolve_by_name("Robot").unwrap().is_none());
}

#[test]
fn test_every_indexed_font_resolves_by_normalized_name() {
    let (catalog, _) = catalog();

    for entry in catalog.search_by_prefix("").unwrap() {
        let resolved = catalog
            .resolve_by_name(&entry.family.to_uppercase())
            .unwrap()
            .unwrap();
        assert_eq!(resolved.family, entry.family);
    }
}

#[test]
fn test_empty_prefix_lists_whole_catalog_alphabetically() {
    let (catalog, _) = catalog();

    let all = families(catalog.search_by_prefix("").unwrap());
    assert_eq!(
        all,
        vec![
            "Arial",
            "arial Black",
            "Courier New",
            "Lato",
            "Lora",
            "Open Sans",
            "Roboto",
            "Roboto Mono",
        ]
    );
    assert_eq!(catalog.loaded_len(), Some(all.len()));
}

#[test]
fn test_prefix_search_is_complete_and_exact() {
    let (catalog, _) = catalog();
    let all: Vec<String> = families(catalog.search_by_prefix("").unwrap());

    for prefix in ["", "a", "ar", "arial ", "l", "lo", "ro", "roboto m", "x", "co"] {
        let expected: Vec<&String> = all
            .iter()
            .filter(|family| normalize_family(family).starts_with(prefix))
            .collect();
        let actual = families(catalog.search_by_prefix(prefix).unwrap());
        assert_eq!(
            actual.iter().collect::<Vec<_>>(),
            expected,
            "prefix '{prefix}'"
        );
    }
}

#[test]
fn test_search_results_report_exact_size() {
    let (catalog, _) = catalog();

    let matches = catalog.search_by_prefix("l").unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(catalog.search_by_prefix("zz").unwrap().len(), 0);
}

#[test]
fn test_search_results_are_independent_of_later_calls() {
    let (catalog, _) = catalog();

    let mut first = catalog.search_by_prefix("r").unwrap();
    assert_eq!(first.next().unwrap().family, "Roboto");

    let second = families(catalog.search_by_prefix("r").unwrap());
    assert_eq!(second, vec!["Roboto", "Roboto Mono"]);

    assert_eq!(first.next().unwrap().family, "Roboto Mono");
    assert!(first.next().is_none());

    first.rewind();
    assert_eq!(first.count(), 2);
}

#[test]
fn test_repeated_queries_are_identical() {
    let (catalog, source) = catalog();

    let first = catalog.resolve_by_name("lato").unwrap().unwrap();
    let second = catalog.resolve_by_name("LATO").unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        families(catalog.search_by_prefix("o").unwrap()),
        families(catalog.search_by_prefix("o").unwrap())
    );
    assert_eq!(source.calls(), 1);
}

#[test]
fn test_built_in_fonts_are_marked() {
    let (catalog, _) = catalog();

    let arial = catalog.resolve_by_name("arial").unwrap().unwrap();
    assert!(arial.is_built_in());
    assert_eq!(arial.kind, KIND_WEB_SAFE_FONT);

    let lato = catalog.resolve_by_name("lato").unwrap().unwrap();
    assert!(!lato.is_built_in());
}

#[test]
fn test_built_in_wins_over_remote_duplicate() {
    let mut remote = remote_fonts();
    remote.push(FontEntry::new("COURIER NEW").with_category("monospace"));
    let source = MockSource::new(remote);
    let catalog = Catalog::new(&config(), source);

    let courier = catalog.resolve_by_name("courier new").unwrap().unwrap();
    assert_eq!(courier.family, "Courier New");
    assert!(courier.is_built_in());

    let report = catalog.load_report().unwrap();
    assert_eq!(report.skipped_duplicates, 1);
    assert_eq!(report.indexed, 8);
}

#[test]
fn test_lazy_load_happens_on_first_query() {
    let (catalog, source) = catalog();
    assert_eq!(catalog.status(), LoadStatus::NotStarted);
    assert_eq!(catalog.loaded_len(), None);
    assert_eq!(source.calls(), 0);

    catalog.resolve_by_name("lato").unwrap();
    assert_eq!(catalog.status(), LoadStatus::Loaded);
    assert_eq!(source.calls(), 1);
    assert_eq!(source.keys(), vec![API_KEY]);

    catalog.ensure_loaded().unwrap();
    catalog.search_by_prefix("").unwrap();
    assert_eq!(source.calls(), 1);
}

#[test]
fn test_missing_credential_fails_without_fetching() {
    let source = MockSource::new(remote_fonts());
    let catalog = Catalog::new(
        &Config::new().with_built_in_fonts(["Arial"]),
        source.clone(),
    );

    assert_eq!(
        catalog.resolve_by_name("arial").unwrap_err(),
        CatalogError::MissingCredential
    );
    assert_eq!(
        catalog.search_by_prefix("").unwrap_err(),
        CatalogError::MissingCredential
    );
    assert_eq!(catalog.status(), LoadStatus::Failed);
    assert_eq!(catalog.last_error(), Some(CatalogError::MissingCredential));
    assert_eq!(source.calls(), 0);

    catalog.set_api_key("late-key");
    assert!(catalog.resolve_by_name("arial").unwrap().is_some());
    assert_eq!(source.keys(), vec!["late-key"]);
}

#[test]
fn test_credential_change_after_load_keeps_catalog() {
    let (catalog, source) = catalog();
    catalog.ensure_loaded().unwrap();

    catalog.set_api_key("another-key");
    assert!(catalog.resolve_by_name("roboto").unwrap().is_some());
    assert_eq!(source.calls(), 1);
    assert_eq!(source.keys(), vec![API_KEY]);
}

#[test]
fn test_failed_load_publishes_nothing_and_retries() {
    let source = MockSource::failing_first(
        remote_fonts(),
        1,
        CatalogError::MalformedResponse("missing 'items'".to_string()),
        std::time::Duration::ZERO,
    );
    let catalog = Catalog::new(&config(), source.clone());

    let err = catalog.search_by_prefix("a").unwrap_err();
    assert!(matches!(err, CatalogError::MalformedResponse(_)));
    assert!(err.is_load_failure());
    assert_eq!(catalog.loaded_len(), None);
    assert!(catalog.load_report().is_none());

    assert_eq!(
        families(catalog.search_by_prefix("a").unwrap()),
        vec!["Arial", "arial Black"]
    );
    assert_eq!(source.calls(), 2);
    assert_eq!(catalog.last_error(), None);
}

#[test]
fn test_available_built_in_skips_activator() {
    let (catalog, _) = catalog();
    let activations = AtomicUsize::new(0);
    let activator = |_: &FontEntry| -> Result<(), CatalogError> {
        activations.fetch_add(1, Ordering::SeqCst);
        Err(CatalogError::Activation("should not be called".to_string()))
    };

    assert!(catalog.is_available("ARIAL", &activator).unwrap());
    assert_eq!(activations.load(Ordering::SeqCst), 0);
}

#[test]
fn test_available_remote_font_uses_activator() {
    let (catalog, _) = catalog();
    let activated = parking_lot::Mutex::new(Vec::new());
    let activator = |entry: &FontEntry| -> Result<(), CatalogError> {
        activated.lock().push(entry.family.clone());
        Ok(())
    };

    assert!(catalog.is_available(" open sans", &activator).unwrap());
    assert_eq!(*activated.lock(), vec!["Open Sans"]);
}

#[test]
fn test_available_is_false_when_activation_fails() {
    let (catalog, _) = catalog();
    let activator = |_: &FontEntry| -> Result<(), CatalogError> {
        Err(CatalogError::Activation("stylesheet has no @font-face".to_string()))
    };

    assert!(!catalog.is_available("Lora", &activator).unwrap());
}

#[test]
fn test_unknown_font_is_unavailable() {
    let (catalog, _) = catalog();
    let activator = |_: &FontEntry| -> Result<(), CatalogError> { Ok(()) };

    assert!(!catalog.is_available("Papyrus", &activator).unwrap());
}

#[test]
fn test_available_propagates_load_failure() {
    let catalog = Catalog::new(&Config::new(), MockSource::new(Vec::new()));
    let activator = |_: &FontEntry| -> Result<(), CatalogError> { Ok(()) };

    assert_eq!(
        catalog.is_available("Arial", &activator).unwrap_err(),
        CatalogError::MissingCredential
    );
}

#[test]
fn test_default_built_ins_are_web_safe_fonts() {
    let catalog = Catalog::new(
        &Config::new().with_api_key(API_KEY),
        MockSource::new(Vec::new()),
    );

    for name in font_catalog_config::WEB_SAFE_FONT_NAMES {
        let entry = catalog.resolve_by_name(name).unwrap().unwrap();
        assert!(entry.is_built_in(), "{name} should be built in");
    }
}
