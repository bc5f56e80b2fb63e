//! End-to-end dispatch through a running site.

use std::time::Duration;

use polls_site::config::SiteConfig;
use polls_site::http::X_REQUEST_ID;
use polls_site::polls;
use polls_site::routing::PathParams;
use reqwest::StatusCode;
use serde_json::Value;

mod common;

#[tokio::test]
async fn test_named_endpoints_over_http() {
    let site = common::start_site(SiteConfig::default()).await;
    let client = common::client();

    let cases = [
        ("/polls/", "polls:index", "IndexView"),
        ("/polls/7/", "polls:detail", "DetailView"),
        ("/polls/7/results/", "polls:results", "ResultsView"),
        ("/polls/3/vote/", "polls:vote", "vote"),
    ];

    for (path, endpoint, view) in cases {
        let res = client.get(site.url(path)).send().await.expect("site unreachable");
        assert_eq!(res.status(), StatusCode::OK, "{}", path);
        assert!(res.headers().contains_key(X_REQUEST_ID));

        let body: Value = res.json().await.unwrap();
        assert_eq!(body["endpoint"], endpoint);
        assert_eq!(body["view"], view);
    }

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_non_numeric_segment_is_not_found() {
    let site = common::start_site(SiteConfig::default()).await;
    let client = common::client();

    for path in ["/polls/abc/", "/polls/abc/results/", "/polls/abc/vote/"] {
        let res = client.get(site.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", path);
    }

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_reversed_urls_round_trip_over_http() {
    let site = common::start_site(SiteConfig::default()).await;
    let client = common::client();
    let urls = polls::urlconf("polls/").unwrap();

    let detail = urls
        .url_for("polls:detail", &PathParams::new().with("pk", 7u64))
        .unwrap();
    let vote = urls
        .url_for("polls:vote", &PathParams::new().with("question_id", 3u64))
        .unwrap();
    assert_eq!(detail, "/polls/7/");
    assert_eq!(vote, "/polls/3/vote/");

    let body: Value = client
        .post(site.url(&vote))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["method"], "POST");
    assert_eq!(body["params"]["question_id"], 3);

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests_share_table() {
    let site = common::start_site(SiteConfig::default()).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for n in 1..=20u64 {
        let client = client.clone();
        let url = site.url(&format!("/polls/{}/results/", n));
        tasks.push(tokio::spawn(async move {
            let body: Value = client.get(&url).send().await?.json().await?;
            Ok::<_, reqwest::Error>((n, body))
        }));
    }

    for task in tasks {
        let (n, body) = task.await.unwrap().unwrap();
        assert_eq!(body["params"]["pk"], n);
    }

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown_stops_server() {
    let site = common::start_site(SiteConfig::default()).await;

    site.shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), site.handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
