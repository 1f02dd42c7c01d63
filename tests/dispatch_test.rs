//! Dispatch pipeline tests.
//!
//! Scrapers are real definition files running shell scripts; scene results
//! are reconciled against an in-memory SQLite catalog.

#![cfg(unix)]

mod common;

use assert_matches::assert_matches;
use common::{TestHarness, EXAMPLE_DEFINITION, SCENE_SCRIPT, SEARCH_SCRIPT};
use scrapeforged::dispatch::ScrapedContent;
use scrapeforged::error::ScrapeError;
use scrapeforged::scraper::{SceneInput, BUILTIN_ID};
use scrapeforged_common::ScrapeContentType;

fn example_harness() -> TestHarness {
    let harness = TestHarness::new();
    harness.definition("example", EXAMPLE_DEFINITION);
    harness.script("scene.sh", SCENE_SCRIPT);
    harness.script("search.sh", SEARCH_SCRIPT);
    harness
}

#[tokio::test]
async fn scene_url_scrape_is_reconciled_against_catalog() {
    let harness = example_harness();
    harness.seed_catalog();
    let dispatcher = harness.dispatcher();

    let scene = dispatcher
        .scrape_scene_url("https://example.com/scenes/1")
        .await
        .unwrap()
        .expect("example scraper should claim the URL");

    assert_eq!(scene.title.as_deref(), Some("Beach Day"));

    let ids: Vec<_> = scene.performers.iter().map(|p| p.id.is_some()).collect();
    assert_eq!(ids, vec![true, false, false], "only Jane Doe is unambiguous");

    assert!(scene.movies[0].id.is_some());
    assert!(scene.tags[0].id.is_some());
    assert!(scene.tags[1].id.is_none());
    assert!(scene.studio.unwrap().id.is_some());
}

#[tokio::test]
async fn empty_catalog_leaves_everything_unmatched() {
    let harness = example_harness();
    let dispatcher = harness.dispatcher();

    let scene = dispatcher
        .scrape_scene_url("https://example.com/scenes/1")
        .await
        .unwrap()
        .unwrap();

    assert!(scene.performers.iter().all(|p| p.id.is_none()));
    assert!(scene.studio.unwrap().id.is_none());
}

#[tokio::test]
async fn performer_search_runs_script() {
    let harness = example_harness();
    let dispatcher = harness.dispatcher();

    let found = dispatcher
        .scrape_performer_list("example", "Jane")
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name.as_deref(), Some("Jane"));
}

#[tokio::test]
async fn unknown_scraper_id() {
    let harness = example_harness();
    let dispatcher = harness.dispatcher();

    assert_matches!(
        dispatcher.scrape_performer_list("nonexistent-id", "Jane").await,
        Err(ScrapeError::NotFound(id)) if id == "nonexistent-id"
    );
}

#[tokio::test]
async fn unsupported_operation() {
    let harness = example_harness();
    let dispatcher = harness.dispatcher();

    assert_matches!(
        dispatcher.scrape_scene("example", &SceneInput::default()).await,
        Err(ScrapeError::Unsupported { .. })
    );
}

#[tokio::test]
async fn url_routing_follows_file_order() {
    let harness = TestHarness::new();
    harness.script("specific.sh", "cat > /dev/null\necho '{\"name\": \"specific\"}'\n");
    harness.script("catchall.sh", "cat > /dev/null\necho '{\"name\": \"catchall\"}'\n");
    harness.definition(
        "a_specific",
        r#"
name = "Specific"

[[performer_by_url]]
action = "script"
url = ["example.com/performers/*"]
command = ["sh", "specific.sh"]
"#,
    );
    harness.definition(
        "b_catchall",
        r#"
name = "Catch-all"

[[performer_by_url]]
action = "script"
url = ["*"]
command = ["sh", "catchall.sh"]
"#,
    );
    let dispatcher = harness.dispatcher();

    let performer = dispatcher
        .scrape_performer_url("https://example.com/performers/1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(performer.name.as_deref(), Some("specific"));

    let performer = dispatcher
        .scrape_performer_url("https://other.invalid/x")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(performer.name.as_deref(), Some("catchall"));
}

#[tokio::test]
async fn unmatched_url_returns_none() {
    let harness = example_harness();
    let dispatcher = harness.dispatcher();

    let content = dispatcher
        .scrape_url("https://unknown.invalid/scenes/1", ScrapeContentType::Scene)
        .await
        .unwrap();
    assert!(content.is_none());
}

#[tokio::test]
async fn scrape_url_wraps_kind() {
    let harness = example_harness();
    let dispatcher = harness.dispatcher();

    let content = dispatcher
        .scrape_url("https://example.com/scenes/1", ScrapeContentType::Scene)
        .await
        .unwrap();
    assert_matches!(content, Some(ScrapedContent::Scene(scene)) if scene.title.as_deref() == Some("Beach Day"));
}

#[tokio::test]
async fn failing_script_surfaces_error() {
    let harness = TestHarness::new();
    harness.script("broken.sh", "cat > /dev/null\necho 'site is down' >&2\nexit 2\n");
    harness.definition(
        "broken",
        r#"
name = "Broken"

[scene_by_fragment]
action = "script"
command = ["sh", "broken.sh"]
"#,
    );
    let dispatcher = harness.dispatcher();

    let err = dispatcher
        .scrape_scene("broken", &SceneInput::default())
        .await
        .unwrap_err();
    assert_matches!(&err, ScrapeError::Scraper(_));
    assert!(err.to_string().contains("site is down"));
}

#[tokio::test]
async fn bad_definitions_do_not_hide_good_ones() {
    let harness = example_harness();
    harness.definition("garbage", "this is not = [toml");
    let dispatcher = harness.dispatcher();

    let failures = dispatcher.registry().failures().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].path.ends_with("garbage.toml"));

    assert!(dispatcher.find_by_id("example").unwrap().is_some());
    assert!(dispatcher.find_by_id("garbage").unwrap().is_none());
}

#[tokio::test]
async fn builtin_scene_scrape_reconciles_studio() {
    let harness = TestHarness::new();
    harness.seed_catalog();
    let dispatcher = harness.dispatcher();

    let input = SceneInput {
        path: Some("/media/Acme.21.07.04.Beach.Day.1080p.mp4".to_string()),
        ..Default::default()
    };
    let scene = dispatcher
        .scrape_scene(BUILTIN_ID, &input)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(scene.date.as_deref(), Some("2021-07-04"));
    assert!(scene.studio.unwrap().id.is_some());
}

#[tokio::test]
async fn listings_put_builtin_first() {
    let harness = example_harness();
    let dispatcher = harness.dispatcher();

    let scenes = dispatcher.list_scrapers(ScrapeContentType::Scene).unwrap();
    let ids: Vec<_> = scenes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![BUILTIN_ID, "example"]);

    let performers = dispatcher
        .list_scrapers(ScrapeContentType::Performer)
        .unwrap();
    let ids: Vec<_> = performers.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["example"]);
}
