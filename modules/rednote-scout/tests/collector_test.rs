//! Collector runs against canned pages: no browser, no network.

use std::path::Path;

use rednote_common::{
    Collection, CollectError, PostRecord, ScrapeRequest, CONTENT_UNAVAILABLE, NO_COMMENTS_FOUND,
};
use rednote_scout::extractor::{PostExtractor, SelectorText};
use rednote_scout::testing::{post_page, search_page, MockRenderer};
use rednote_scout::{Collector, CollectorConfig, Site};
use tempfile::TempDir;

const ORIGIN: &str = "https://www.xiaohongshu.com";
const SEARCH_TEST: &str = "https://www.xiaohongshu.com/search_result?keyword=test";

fn post_url(id: &str) -> String {
    format!("{ORIGIN}/explore/{id}")
}

/// A temp workspace with a cookie file and an (absent) output directory.
fn workspace() -> (TempDir, CollectorConfig) {
    let dir = tempfile::tempdir().unwrap();
    let cookies = dir.path().join("xhs_cookies.json");
    std::fs::write(
        &cookies,
        r#"[{"name": "web_session", "value": "abc", "domain": ".xiaohongshu.com"}, {"name": "a1", "value": "xyz"}]"#,
    )
    .unwrap();
    let config = CollectorConfig::builder()
        .cookies_path(cookies)
        .output_dir(dir.path().join("output"))
        .build();
    (dir, config)
}

fn read_csv(path: &Path) -> Vec<PostRecord> {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "CSV should start with a UTF-8 BOM");
    let mut reader = csv::Reader::from_reader(&bytes[3..]);
    reader.deserialize().map(|row| row.unwrap()).collect()
}

fn scraped(collection: Collection) -> rednote_common::ScrapeResult {
    match collection {
        Collection::Scraped(result) => result,
        Collection::Empty { topic } => panic!("expected posts for {topic}, got none"),
    }
}

#[tokio::test]
async fn three_posts_end_to_end() {
    let (_dir, config) = workspace();
    let renderer = MockRenderer::new()
        .on_page(
            SEARCH_TEST,
            search_page(&["/explore/a1", "/explore/b2", "/explore/c3"]),
        )
        .on_page(
            &post_url("a1"),
            post_page(
                "Title A",
                "https://ci.xiaohongshu.com/a.jpg",
                &["太好看了吧！！", "求链接求链接", "已经下单了～"],
            ),
        )
        .on_page(
            &post_url("b2"),
            post_page("Title B", "https://ci.xiaohongshu.com/b.jpg", &["comment number one"]),
        )
        .on_page(
            &post_url("c3"),
            r#"<html><head><meta property="og:title" content="OG Title C"></head>
            <body><img src="/c.png"></body></html>"#,
        );
    let collector = Collector::new(renderer, config);

    let result = scraped(collector.collect(&ScrapeRequest::new("test")).await.unwrap());

    assert!(result.csv_path.ends_with("output/scraped_data_test.csv"));
    let rows = read_csv(&result.csv_path);
    assert_eq!(
        rows,
        vec![
            PostRecord {
                post_number: 1,
                url: post_url("a1"),
                title: "Title A".into(),
                image_url: "https://ci.xiaohongshu.com/a.jpg".into(),
                comments: "太好看了吧！！ | 求链接求链接 | 已经下单了～".into(),
            },
            PostRecord {
                post_number: 2,
                url: post_url("b2"),
                title: "Title B".into(),
                image_url: "https://ci.xiaohongshu.com/b.jpg".into(),
                comments: "comment number one".into(),
            },
            PostRecord {
                post_number: 3,
                url: post_url("c3"),
                title: "OG Title C".into(),
                image_url: "https://www.xiaohongshu.com/c.png".into(),
                comments: NO_COMMENTS_FOUND.into(),
            },
        ]
    );

    assert!(result
        .summary
        .starts_with("Successfully scraped 3 posts for topic 'test'.\nCSV file saved to: "));
    assert!(result.summary.contains("\nPost 3:\n  Title: OG Title C\n"));
    assert!(result
        .summary
        .ends_with(&format!("CSV file path: {}", result.csv_path.display())));
}

#[tokio::test]
async fn search_is_rendered_first_then_posts_in_order() {
    let (_dir, config) = workspace();
    let renderer = MockRenderer::new()
        .on_page(SEARCH_TEST, search_page(&["/explore/a1", "/explore/b2"]))
        .on_page(&post_url("a1"), post_page("A", "https://ci/a.jpg", &[]))
        .on_page(&post_url("b2"), post_page("B", "https://ci/b.jpg", &[]));
    let collector = Collector::new(renderer, config);

    collector.collect(&ScrapeRequest::new("test")).await.unwrap();

    let requests = collector.renderer().requests();
    assert_eq!(
        requests.iter().map(|r| r.url.as_str()).collect::<Vec<_>>(),
        vec![SEARCH_TEST, post_url("a1").as_str(), post_url("b2").as_str()]
    );
    assert!(requests[0].script.is_some(), "search page is scrolled");
    assert!(requests[1].script.is_none());
    assert_eq!(requests[1].cookies.len(), 2, "cookies are sent with every page");
}

#[tokio::test]
async fn render_failure_and_missing_comments_use_distinct_sentinels() {
    let (_dir, config) = workspace();
    let renderer = MockRenderer::new()
        .on_page(SEARCH_TEST, search_page(&["/explore/down", "/explore/quiet"]))
        .failing(&post_url("down"))
        .on_page(&post_url("quiet"), post_page("Quiet", "https://ci/q.jpg", &[]));
    let collector = Collector::new(renderer, config);

    let result = scraped(collector.collect(&ScrapeRequest::new("test")).await.unwrap());

    assert_eq!(result.failures(), 1);
    assert!(result.posts[0].is_failure());

    let rows = read_csv(&result.csv_path);
    assert_eq!(rows[0], PostRecord::unavailable(1, post_url("down")));
    assert_eq!(rows[1].title, "Quiet");
    assert_eq!(rows[1].comments, NO_COMMENTS_FOUND);
    assert_ne!(rows[0].comments, rows[1].comments);
}

#[tokio::test]
async fn at_most_five_posts_numbered_sequentially() {
    let (_dir, config) = workspace();
    let ids: Vec<String> = (0..7).map(|i| format!("p{i}")).collect();
    let hrefs: Vec<String> = ids.iter().map(|id| format!("/explore/{id}")).collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();

    let mut renderer = MockRenderer::new().on_page(SEARCH_TEST, search_page(&href_refs));
    for id in &ids {
        renderer = renderer.on_page(&post_url(id), post_page(id, "https://ci/x.jpg", &[]));
    }
    let collector = Collector::new(renderer, config);

    let result = scraped(collector.collect(&ScrapeRequest::new("test")).await.unwrap());

    let numbers: Vec<usize> = read_csv(&result.csv_path).iter().map(|r| r.post_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(collector.renderer().visited().len(), 6);
    assert!(!collector.renderer().visited().contains(&post_url("p5")));
}

#[tokio::test]
async fn duplicate_links_are_visited_once() {
    let (_dir, config) = workspace();
    let renderer = MockRenderer::new()
        .on_page(
            SEARCH_TEST,
            search_page(&[
                "/explore/a1",
                "/explore/a1",
                post_url("a1").as_str(),
                "/explore/b2",
            ]),
        )
        .on_page(&post_url("a1"), post_page("A", "https://ci/a.jpg", &[]))
        .on_page(&post_url("b2"), post_page("B", "https://ci/b.jpg", &[]));
    let collector = Collector::new(renderer, config);

    let result = scraped(collector.collect(&ScrapeRequest::new("test")).await.unwrap());

    assert_eq!(result.posts.len(), 2);
    assert_eq!(result.posts[1].url(), post_url("b2"));
}

#[tokio::test]
async fn no_candidates_writes_nothing() {
    let (dir, config) = workspace();
    let renderer = MockRenderer::new().on_page(
        SEARCH_TEST,
        "<html><body><a href=\"/user/profile/1\">me</a></body></html>",
    );
    let collector = Collector::new(renderer, config);

    let collection = collector.collect(&ScrapeRequest::new("test")).await.unwrap();

    assert!(collection.is_empty());
    assert_eq!(
        collection.summary(),
        "No data scraped for topic 'test'. Please check your cookies and network connection."
    );
    assert!(!dir.path().join("output").join("scraped_data_test.csv").exists());
}

#[tokio::test]
async fn missing_cookie_file_stops_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let config = CollectorConfig::builder()
        .cookies_path(dir.path().join("xhs_cookies.json"))
        .output_dir(dir.path().join("output"))
        .build();
    let collector = Collector::new(MockRenderer::new(), config);

    let err = collector.collect(&ScrapeRequest::new("test")).await.unwrap_err();

    assert!(matches!(err, CollectError::CookiesMissing { .. }));
    assert!(err.to_string().starts_with("Error: xhs_cookies.json not found at "));
    assert!(collector.renderer().visited().is_empty());
}

#[tokio::test]
async fn search_render_failure_is_fatal() {
    let (_dir, config) = workspace();
    let collector = Collector::new(MockRenderer::new().failing(SEARCH_TEST), config);

    let err = collector.collect(&ScrapeRequest::new("test")).await.unwrap_err();

    assert!(matches!(err, CollectError::SearchRender(_)));
    let message = err.to_string();
    assert!(message.starts_with("Failed to crawl search page: "));
    assert!(message.contains("timed out"));
}

#[tokio::test]
async fn extraction_failure_is_recorded_and_run_continues() {
    let (_dir, config) = workspace();
    let renderer = MockRenderer::new()
        .on_page(SEARCH_TEST, search_page(&["/explore/a1", "/explore/b2"]))
        .on_page(&post_url("a1"), post_page("A", "https://ci/a.jpg", &[]))
        .on_page(&post_url("b2"), post_page("B", "https://ci/b.jpg", &[]));
    let extractor = PostExtractor::new(&Site::xiaohongshu())
        .with_title_cascade(vec![Box::new(SelectorText::new("[[broken"))]);
    let collector = Collector::new(renderer, config).with_extractor(extractor);

    let result = scraped(collector.collect(&ScrapeRequest::new("test")).await.unwrap());

    let rows = read_csv(&result.csv_path);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].title.starts_with("Error: invalid selector"));
    assert_eq!(rows[0].image_url, CONTENT_UNAVAILABLE);
    assert_eq!(rows[1].comments, CONTENT_UNAVAILABLE);
}

#[tokio::test]
async fn topic_with_spaces_maps_to_file_name() {
    let (_dir, config) = workspace();
    let search = "https://www.xiaohongshu.com/search_result?keyword=summer+outfit";
    let renderer = MockRenderer::new()
        .on_page(search, search_page(&["/explore/a1"]))
        .on_page(&post_url("a1"), post_page("A", "https://ci/a.jpg", &[]));
    let collector = Collector::new(renderer, config);

    let result = scraped(
        collector
            .collect(&ScrapeRequest::new("summer outfit"))
            .await
            .unwrap(),
    );

    assert!(result.csv_path.ends_with("scraped_data_summer_outfit.csv"));
}

#[tokio::test]
async fn topic_with_path_segments_writes_inside_output_dir() {
    let (dir, config) = workspace();
    let output = dir.path().join("output");
    let search = Site::xiaohongshu().search_url("x/../../escaped");
    let renderer = MockRenderer::new()
        .on_page(&search, search_page(&["/explore/a1"]))
        .on_page(&post_url("a1"), post_page("A", "https://ci/a.jpg", &[]));
    let collector = Collector::new(renderer, config);

    let result = scraped(
        collector
            .collect(&ScrapeRequest::new("x/../../escaped"))
            .await
            .unwrap(),
    );

    assert_eq!(result.csv_path.parent(), Some(output.as_path()));
    assert!(result.csv_path.exists());
    assert!(!dir.path().join("escaped.csv").exists());
}

#[tokio::test]
async fn long_titles_are_truncated_in_summary_only() {
    let (_dir, config) = workspace();
    let long_title = "夏".repeat(120);
    let renderer = MockRenderer::new()
        .on_page(SEARCH_TEST, search_page(&["/explore/a1"]))
        .on_page(
            &post_url("a1"),
            post_page(&long_title, "https://ci/a.jpg", &["comment number one"]),
        );
    let collector = Collector::new(renderer, config);

    let result = scraped(collector.collect(&ScrapeRequest::new("test")).await.unwrap());

    assert!(result
        .summary
        .contains(&format!("  Title: {}...\n", "夏".repeat(100))));
    assert_eq!(read_csv(&result.csv_path)[0].title, long_title);
}
