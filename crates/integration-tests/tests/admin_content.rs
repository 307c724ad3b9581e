//! Integration tests for the admin API: auth gate and content lifecycle.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The site server running (cargo run -p atelier-site)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` in the environment

use reqwest::StatusCode;
use serde_json::{Value, json};

use atelier_integration_tests::{admin_login, base_url, client, unique_slug};

// ============================================================================
// Auth gate
// ============================================================================

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_admin_api_rejects_anonymous_requests() {
    let base = base_url();
    let client = client();

    for path in [
        "admin/api/posts",
        "admin/api/works",
        "admin/api/goals",
        "admin/api/media",
        "admin/api/contact",
    ] {
        let resp = client
            .get(format!("{base}/{path}"))
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_login_rejects_wrong_password() {
    let username = std::env::var("ADMIN_USERNAME").expect("ADMIN_USERNAME not set");

    let resp = client()
        .post(format!("{}/admin/login", base_url()))
        .json(&json!({ "username": username, "password": "definitely-wrong" }))
        .send()
        .await
        .expect("login request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_logout_invalidates_session() {
    let base = base_url();
    let client = client();
    admin_login(&client).await;

    // Gate passes while logged in.
    let resp = client
        .get(format!("{base}/admin/api/posts"))
        .send()
        .await
        .expect("list failed");
    assert_eq!(resp.status(), StatusCode::OK);

    client
        .post(format!("{base}/admin/logout"))
        .send()
        .await
        .expect("logout failed");

    let resp = client
        .get(format!("{base}/admin/api/posts"))
        .send()
        .await
        .expect("list failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Post lifecycle
// ============================================================================

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_duplicate_post_slug_is_conflict() {
    let base = base_url();
    let client = client();
    admin_login(&client).await;
    let slug = unique_slug("dup");

    let payload = json!({
        "title": "Original",
        "slug": slug,
        "content": "<p>first</p>",
        "status": "published",
    });

    let created: Value = client
        .post(format!("{base}/admin/api/posts"))
        .json(&payload)
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create body");
    let id = created["post"]["id"].as_i64().expect("post id");

    let resp = client
        .post(format!("{base}/admin/api/posts"))
        .json(&payload)
        .send()
        .await
        .expect("second create failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    client
        .delete(format!("{base}/admin/api/posts/{id}"))
        .send()
        .await
        .expect("cleanup failed");
}

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_slug_rename_moves_the_detail_page() {
    let base = base_url();
    let client = client();
    admin_login(&client).await;
    let old_slug = unique_slug("rename-old");
    let new_slug = unique_slug("rename-new");

    let created: Value = client
        .post(format!("{base}/admin/api/posts"))
        .json(&json!({
            "title": "Renamed post",
            "slug": old_slug,
            "content": "<p>body</p>",
            "status": "published",
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create body");
    let id = created["post"]["id"].as_i64().expect("post id");

    // Prime the cache for the old slug, then rename.
    let resp = client
        .get(format!("{base}/api/posts/{old_slug}"))
        .send()
        .await
        .expect("detail failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .put(format!("{base}/admin/api/posts/{id}"))
        .json(&json!({
            "title": "Renamed post",
            "slug": new_slug,
            "content": "<p>body</p>",
            "status": "published",
        }))
        .send()
        .await
        .expect("update failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // The old slug must not keep serving the cached page.
    let old = client
        .get(format!("{base}/api/posts/{old_slug}"))
        .send()
        .await
        .expect("old detail failed");
    assert_eq!(old.status(), StatusCode::NOT_FOUND);

    let new = client
        .get(format!("{base}/api/posts/{new_slug}"))
        .send()
        .await
        .expect("new detail failed");
    assert_eq!(new.status(), StatusCode::OK);

    client
        .delete(format!("{base}/admin/api/posts/{id}"))
        .send()
        .await
        .expect("cleanup failed");
}

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_double_delete_is_not_found() {
    let base = base_url();
    let client = client();
    admin_login(&client).await;
    let slug = unique_slug("twice");

    let created: Value = client
        .post(format!("{base}/admin/api/posts"))
        .json(&json!({
            "title": "Delete me",
            "slug": slug,
            "content": "<p>bye</p>",
            "status": "draft",
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create body");
    let id = created["post"]["id"].as_i64().expect("post id");

    let first = client
        .delete(format!("{base}/admin/api/posts/{id}"))
        .send()
        .await
        .expect("delete failed");
    assert_eq!(first.status(), StatusCode::OK);

    let second = client
        .delete(format!("{base}/admin/api/posts/{id}"))
        .send()
        .await
        .expect("second delete failed");
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Case studies
// ============================================================================

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_blank_work_slug_derives_from_title() {
    let base = base_url();
    let client = client();
    admin_login(&client).await;
    let marker = unique_slug("derived");

    let created: Value = client
        .post(format!("{base}/admin/api/works"))
        .json(&json!({
            "title": format!("Derived Title {marker}"),
            "description": "slug derivation test",
            "visibility": "private",
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create body");

    let slug = created["work"]["slug"].as_str().expect("slug string");
    assert_eq!(slug, format!("derived-title-{marker}"));

    let id = created["work"]["id"].as_i64().expect("work id");
    client
        .delete(format!("{base}/admin/api/works/{id}"))
        .send()
        .await
        .expect("cleanup failed");
}

// ============================================================================
// Media
// ============================================================================

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_only_image_media_feeds_the_gallery() {
    let base = base_url();
    let client = client();
    admin_login(&client).await;
    let image_url = format!("https://cdn.example.com/{}.png", unique_slug("img"));
    let pdf_url = format!("https://cdn.example.com/{}.pdf", unique_slug("doc"));

    let image: Value = client
        .post(format!("{base}/admin/api/media"))
        .json(&json!({
            "url": image_url,
            "name": "gallery fixture",
            "type": "image/png",
            "size": 1024,
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create body");
    let image_id = image["media"]["id"].as_i64().expect("media id");

    let pdf: Value = client
        .post(format!("{base}/admin/api/media"))
        .json(&json!({
            "url": pdf_url,
            "name": "non-image fixture",
            "type": "application/pdf",
            "size": 2048,
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create body");
    let pdf_id = pdf["media"]["id"].as_i64().expect("media id");

    let gallery: Value = client
        .get(format!("{base}/api/gallery"))
        .send()
        .await
        .expect("gallery failed")
        .json()
        .await
        .expect("gallery body");
    let images = gallery["images"].as_array().expect("images array");

    let urls: Vec<&str> = images
        .iter()
        .filter_map(|item| item["url"].as_str())
        .collect();
    assert!(urls.contains(&image_url.as_str()), "new image must appear");
    assert!(!urls.contains(&pdf_url.as_str()), "non-image must not appear");

    for id in [image_id, pdf_id] {
        client
            .delete(format!("{base}/admin/api/media/{id}"))
            .send()
            .await
            .expect("cleanup failed");
    }
}

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_media_double_delete_is_not_found() {
    let base = base_url();
    let client = client();
    admin_login(&client).await;

    let created: Value = client
        .post(format!("{base}/admin/api/media"))
        .json(&json!({
            "url": format!("https://cdn.example.com/{}.png", unique_slug("gone")),
            "name": "delete fixture",
            "type": "image/png",
            "size": 512,
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create body");
    let id = created["media"]["id"].as_i64().expect("media id");

    let first = client
        .delete(format!("{base}/admin/api/media/{id}"))
        .send()
        .await
        .expect("delete failed");
    assert_eq!(first.status(), StatusCode::OK);

    let second = client
        .delete(format!("{base}/admin/api/media/{id}"))
        .send()
        .await
        .expect("second delete failed");
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Goals
// ============================================================================

#[tokio::test]
#[ignore = "requires running server and Postgres"]
async fn test_goal_toggle_flips_between_bounds() {
    let base = base_url();
    let client = client();
    admin_login(&client).await;

    let created: Value = client
        .post(format!("{base}/admin/api/goals"))
        .json(&json!({
            "title": "Toggle fixture",
            "progress": 40,
            "category": "testing",
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create body");
    let id = created["goal"]["id"].as_i64().expect("goal id");

    // Partial progress toggles up to complete...
    let toggled: Value = client
        .post(format!("{base}/admin/api/goals/{id}/toggle"))
        .send()
        .await
        .expect("toggle failed")
        .json()
        .await
        .expect("toggle body");
    assert_eq!(toggled["goal"]["progress"], 100);

    // ...and complete toggles back to zero.
    let toggled: Value = client
        .post(format!("{base}/admin/api/goals/{id}/toggle"))
        .send()
        .await
        .expect("toggle failed")
        .json()
        .await
        .expect("toggle body");
    assert_eq!(toggled["goal"]["progress"], 0);

    client
        .delete(format!("{base}/admin/api/goals/{id}"))
        .send()
        .await
        .expect("cleanup failed");
}
