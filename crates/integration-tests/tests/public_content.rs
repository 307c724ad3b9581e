//! Integration tests for the public read surfaces.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The site server running (cargo run -p atelier-site)
//! - Admin credentials in the environment (for fixture setup)

use reqwest::StatusCode;
use serde_json::{Value, json};

use atelier_integration_tests::{admin_login, base_url, client, unique_slug};

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_health_reports_ok() {
    let resp = client()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("health request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("health body");
    assert_eq!(body["status"], "ok");
    assert!(body["db_latency_ms"].is_number());
}

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_published_post_appears_exactly_once() {
    let client = client();
    admin_login(&client).await;
    let base = base_url();
    let slug = unique_slug("pub-once");

    let resp = client
        .post(format!("{base}/admin/api/posts"))
        .json(&json!({
            "title": "Visible post",
            "slug": slug,
            "content": "<p>hello</p>",
            "status": "published",
        }))
        .send()
        .await
        .expect("create failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.expect("create body");
    let id = created["post"]["id"].as_i64().expect("post id");

    let list: Value = client
        .get(format!("{base}/api/posts"))
        .send()
        .await
        .expect("list failed")
        .json()
        .await
        .expect("list body");
    let matches = list["posts"]
        .as_array()
        .expect("posts array")
        .iter()
        .filter(|p| p["slug"] == slug.as_str())
        .count();
    assert_eq!(matches, 1, "created post must appear exactly once");

    // Detail page serves it too.
    let detail = client
        .get(format!("{base}/api/posts/{slug}"))
        .send()
        .await
        .expect("detail failed");
    assert_eq!(detail.status(), StatusCode::OK);

    // Cleanup.
    client
        .delete(format!("{base}/admin/api/posts/{id}"))
        .send()
        .await
        .expect("cleanup failed");
}

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_draft_post_is_invisible() {
    let client = client();
    admin_login(&client).await;
    let base = base_url();
    let slug = unique_slug("draft");

    let created: Value = client
        .post(format!("{base}/admin/api/posts"))
        .json(&json!({
            "title": "Hidden draft",
            "slug": slug,
            "content": "<p>wip</p>",
            "status": "draft",
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create body");
    let id = created["post"]["id"].as_i64().expect("post id");

    // Absent from the public list, 404 on the detail page.
    let list: Value = client
        .get(format!("{base}/api/posts"))
        .send()
        .await
        .expect("list failed")
        .json()
        .await
        .expect("list body");
    assert!(
        list["posts"]
            .as_array()
            .expect("posts array")
            .iter()
            .all(|p| p["slug"] != slug.as_str()),
        "draft must not appear publicly"
    );

    let detail = client
        .get(format!("{base}/api/posts/{slug}"))
        .send()
        .await
        .expect("detail failed");
    assert_eq!(detail.status(), StatusCode::NOT_FOUND);

    client
        .delete(format!("{base}/admin/api/posts/{id}"))
        .send()
        .await
        .expect("cleanup failed");
}

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_public_works_are_oldest_first() {
    let client = client();
    admin_login(&client).await;
    let base = base_url();
    let first = unique_slug("order-a");
    let second = unique_slug("order-b");
    let mut ids = Vec::new();

    for slug in [&first, &second] {
        let created: Value = client
            .post(format!("{base}/admin/api/works"))
            .json(&json!({
                "title": format!("Ordering fixture {slug}"),
                "slug": slug,
                "description": "ordering test",
                "visibility": "public",
            }))
            .send()
            .await
            .expect("create failed")
            .json()
            .await
            .expect("create body");
        ids.push(created["work"]["id"].as_i64().expect("work id"));
    }

    let list: Value = client
        .get(format!("{base}/api/works"))
        .send()
        .await
        .expect("list failed")
        .json()
        .await
        .expect("list body");
    let slugs: Vec<&str> = list["works"]
        .as_array()
        .expect("works array")
        .iter()
        .filter_map(|w| w["slug"].as_str())
        .filter(|s| *s == first || *s == second)
        .collect();
    assert_eq!(
        slugs,
        vec![first.as_str(), second.as_str()],
        "earlier case study must come first"
    );

    for id in ids {
        client
            .delete(format!("{base}/admin/api/works/{id}"))
            .send()
            .await
            .expect("cleanup failed");
    }
}

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_unknown_slugs_are_404() {
    let base = base_url();
    let client = client();

    for path in ["api/posts/no-such-slug", "api/works/no-such-slug"] {
        let resp = client
            .get(format!("{base}/{path}"))
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
        let body: Value = resp.json().await.expect("error body");
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_goal_board_groups_by_category() {
    let client = client();
    admin_login(&client).await;
    let base = base_url();
    let category = unique_slug("cat");

    let created: Value = client
        .post(format!("{base}/admin/api/goals"))
        .json(&json!({
            "title": "Grouping fixture",
            "progress": 0,
            "category": category,
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create body");
    let id = created["goal"]["id"].as_i64().expect("goal id");

    let board: Value = client
        .get(format!("{base}/api/goals"))
        .send()
        .await
        .expect("board failed")
        .json()
        .await
        .expect("board body");
    let goals = board["categories"][&category]
        .as_array()
        .expect("category present on board");
    assert!(goals.iter().any(|g| g["id"].as_i64() == Some(id)));

    client
        .delete(format!("{base}/admin/api/goals/{id}"))
        .send()
        .await
        .expect("cleanup failed");
}
