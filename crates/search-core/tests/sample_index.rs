use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rstest::{fixture, rstest};
use search_core::{
    Category, DocPageFragment, IndexStats, LoadMode, QueryExecuteError, SearchConfig,
    SearchEngine, SearchOptions, SortMode, group_by_page, load_file, outline, parse_str, to_js,
};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/search_index.js")
}

#[fixture]
fn engine() -> SearchEngine {
    let report = load_file(&fixture_path(), LoadMode::Strict).unwrap();
    SearchEngine::new(report.index, SearchConfig::default()).unwrap()
}

fn ordinals(hits: &[search_core::SearchHit]) -> Vec<usize> {
    hits.iter().map(|h| h.ordinal).collect()
}

#[test]
fn test_loads_sample_strictly() {
    let report = load_file(&fixture_path(), LoadMode::Strict).unwrap();
    assert_eq!(report.index.len(), 80);
    assert!(report.issues.is_empty());
    assert_eq!(report.global_name.as_deref(), Some("documenterSearchIndex"));
    assert_eq!(
        report.index.docs[0],
        DocPageFragment::new(
            "analytic/#Analytic-Fields",
            "Analytic Fields",
            "Analytic Fields",
            "",
            Category::Section,
        )
    );
}

#[test]
fn test_discovers_from_site_directory() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests");
    let report = load_file(&dir, LoadMode::Lenient).unwrap();
    assert_eq!(report.index.len(), 80);
}

#[test]
fn test_round_trip() {
    let report = load_file(&fixture_path(), LoadMode::Strict).unwrap();
    let again = parse_str(&to_js(&report.index).unwrap(), LoadMode::Strict).unwrap();
    assert_eq!(again.index, report.index);
}

#[test]
fn test_stats() {
    let report = load_file(&fixture_path(), LoadMode::Strict).unwrap();
    let stats = IndexStats::collect(&report.index);
    assert_eq!(stats.total, 80);
    assert_eq!(stats.pages, 3);
    assert_eq!(stats.blank_text, 15);
    assert_eq!(stats.duplicate_keys, 41);
    assert_eq!(stats.count(Category::Page), 44);
    assert_eq!(stats.count(Category::Section), 15);
    assert_eq!(stats.count(Category::Module), 10);
    assert_eq!(stats.count(Category::Method), 9);
    assert_eq!(stats.count(Category::Function), 2);
}

#[test]
fn test_outline() {
    let report = load_file(&fixture_path(), LoadMode::Strict).unwrap();
    let pages = outline(&report.index);
    let paths: Vec<_> = pages.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(paths, vec!["analytic/", "", "modules/"]);

    assert_eq!(pages[0].page, "Analytic Fields");
    assert_eq!(pages[0].sections.len(), 11);
    assert_eq!(pages[0].symbols.len(), 10);
    assert_eq!(pages[0].prose, 40);

    assert_eq!(pages[1].page, "Home");
    assert_eq!(pages[2].symbols.len(), 11);
}

#[rstest]
fn test_keyword_search(engine: SearchEngine) {
    let hits = engine.query("solovev", &engine.options()).unwrap();
    let found: HashSet<_> = ordinals(&hits).into_iter().collect();
    assert!(found.contains(&44));
    assert!(found.contains(&45));
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
}

#[rstest]
fn test_keyword_is_stemmed(engine: SearchEngine) {
    let hits = engine.query("potentials", &engine.options()).unwrap();
    assert!(ordinals(&hits).contains(&11));
}

#[rstest]
fn test_phrase_keyword(engine: SearchEngine) {
    let hits = engine.query(r#""vector potential""#, &engine.options()).unwrap();
    assert!(ordinals(&hits).contains(&11));
}

#[rstest]
fn test_category_and_keyword(engine: SearchEngine) {
    let hits = engine.query("tokamak cat:module", &engine.options()).unwrap();
    assert!(hits.iter().all(|h| h.category == Category::Module));
    let found: HashSet<_> = ordinals(&hits).into_iter().collect();
    for ordinal in [9, 15, 21] {
        assert!(found.contains(&ordinal), "missing {ordinal}");
    }
}

#[rstest]
fn test_negated_category(engine: SearchEngine) {
    let hits = engine.query("tokamak -cat:page", &engine.options()).unwrap();
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|h| h.category != Category::Page));
}

#[rstest]
fn test_negated_keyword(engine: SearchEngine) {
    let hits = engine.query("cat:module NOT solovev", &engine.options()).unwrap();
    let found: HashSet<_> = ordinals(&hits).into_iter().collect();
    assert!(!found.contains(&45));
    assert!(found.contains(&3));
}

#[rstest]
fn test_filter_only_query(engine: SearchEngine) {
    let hits = engine.query("cat:function", &engine.options()).unwrap();
    assert_eq!(ordinals(&hits), vec![71, 76]);
    assert!(hits.iter().all(|h| h.score == 1.0));
}

#[rstest]
fn test_location_glob(engine: SearchEngine) {
    let hits = engine.query("loc:modules/* cat:method", &engine.options()).unwrap();
    assert_eq!(hits.len(), 9);
    assert!(hits.iter().all(|h| h.path() == "modules/"));
}

#[rstest]
fn test_blank_sections(engine: SearchEngine) {
    let hits = engine.query("len:0", &engine.options()).unwrap();
    assert_eq!(hits.len(), 15);
    assert!(hits.iter().all(|h| h.category == Category::Section && h.snippet.is_empty()));
}

#[rstest]
fn test_pagination_in_document_order(engine: SearchEngine) {
    let options = SearchOptions {
        limit: 5,
        offset: 5,
        category: None,
        sort: SortMode::DocumentOrder,
    };
    let hits = engine.query("cat:page", &options).unwrap();
    assert_eq!(ordinals(&hits), vec![10, 11, 12, 14, 16]);
}

#[rstest]
fn test_snippet_points_at_match(engine: SearchEngine) {
    let hits = engine.query("christoffel", &engine.options()).unwrap();
    assert_eq!(ordinals(&hits), vec![79]);
    assert!(hits[0].snippet.contains("Christoffel"));
    assert!(!hits[0].snippet.contains('\n'));
}

#[rstest]
fn test_invalid_category(engine: SearchEngine) {
    let err = engine.query("cat:widget", &engine.options()).unwrap_err();
    assert!(matches!(err, QueryExecuteError::ValidationError(_)));
}

#[rstest]
fn test_parse_error(engine: SearchEngine) {
    let err = engine.query("tokamak OR", &engine.options()).unwrap_err();
    assert!(matches!(err, QueryExecuteError::ParseError(_)));
}

#[rstest]
fn test_plain_search_with_category(engine: SearchEngine) {
    let options = SearchOptions {
        category: Some(Category::Module),
        ..engine.options()
    };
    let hits = engine.search("magnetic", &options).unwrap();
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|h| h.category == Category::Module));
}

#[rstest]
fn test_plain_search_bad_syntax_is_empty(engine: SearchEngine) {
    let hits = engine.search("nosuchfield:abc", &engine.options()).unwrap();
    assert!(hits.is_empty());
}

#[rstest]
fn test_group_by_page(engine: SearchEngine) {
    let hits = engine.query("field", &SearchOptions::with_limit(80)).unwrap();
    let total = hits.len();
    let groups = group_by_page(hits);

    let paths: HashSet<_> = groups.iter().map(|g| g.path.clone()).collect();
    assert_eq!(paths.len(), groups.len());
    assert_eq!(groups.iter().map(|g| g.hits.len()).sum::<usize>(), total);
    for group in &groups {
        assert!(group.hits.iter().all(|h| h.path() == group.path));
    }
}
