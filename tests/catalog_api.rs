//! Router tests for browsing, reading, ratings, accounts and admin routes.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use common::{comic, TestApp, ADMIN_TOKEN, READER_TOKEN};
use fluxinkverse::domain::foundation::ComicId;
use fluxinkverse::domain::reading::Chapter;

async fn app_with_kingdom(last_chapter: i32) -> TestApp {
    let app = TestApp::new().await;
    let mut kingdom = comic(1, "Kingdom");
    kingdom.last_chapter = last_chapter;
    kingdom.author = Some("Yasuhisa Hara".to_string());
    kingdom.genres = vec!["Action".to_string(), "History".to_string()];
    app.db.put_comic(kingdom).await;
    app
}

// ════════════════════════════════════════════════════════════════════════════════
// Catalog
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn health_is_ok() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn browse_filters_and_lists_tags() {
    let app = app_with_kingdom(10).await;
    let mut berserk = comic(2, "Berserk");
    berserk.genres = vec!["Dark Fantasy".to_string()];
    app.db.put_comic(berserk).await;

    let (status, body) = app.get("/api/comics?q=hara&sort=az").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comics"].as_array().unwrap().len(), 1);
    assert_eq!(body["comics"][0]["title"], "Kingdom");
    assert_eq!(body["tags"], json!(["All", "Action", "Dark Fantasy", "History"]));
}

#[tokio::test]
async fn unknown_sort_falls_back_to_popular() {
    let app = app_with_kingdom(10).await;
    let (status, _) = app.get("/api/comics?sort=sideways").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn stale_token_does_not_block_public_routes() {
    let app = app_with_kingdom(10).await;
    let (status, _) = app.get_as("/api/comics", "expired-token").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_comic_is_404() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/comics/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "COMIC_NOT_FOUND");
}

#[tokio::test]
async fn detail_generates_chapters_and_counts_a_view() {
    let app = app_with_kingdom(25).await;

    let (status, body) = app.get("/api/comics/KINGDOM").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_chapters"], 25);
    assert_eq!(body["total_volumes"], 3);
    assert_eq!(body["synopsis"], "No synopsis yet.");
    assert_eq!(body["latest_chapter"], 25);

    let (_, by_id) = app.get("/api/books/1").await;
    assert_eq!(by_id["views"], 1);
}

#[tokio::test]
async fn book_id_must_be_numeric() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/api/books/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn popular_respects_limit() {
    let app = app_with_kingdom(1).await;
    app.db.put_comic(comic(2, "Berserk")).await;

    let (status, body) = app.get("/api/comics/popular?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn genres_are_deduplicated() {
    let app = TestApp::new().await;
    app.db.put_genre_row(&["Action", "Drama"]).await;
    app.db.put_genre_row(&["Drama", "Comedy"]).await;

    let (_, body) = app.get("/api/genres").await;
    assert_eq!(body["genres"], json!(["Action", "Drama", "Comedy"]));
}

// ════════════════════════════════════════════════════════════════════════════════
// Reading
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn chapter_search_by_volume() {
    let app = app_with_kingdom(25).await;

    let (status, body) = app.get("/api/comics/kingdom/chapters?q=vol%202").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_chapters"], 25);
    let volumes = body["volumes"].as_array().unwrap();
    assert_eq!(volumes.len(), 1);
    assert_eq!(volumes[0]["volume"], 2);
    let chapters = volumes[0]["chapters"].as_array().unwrap();
    assert_eq!(chapters.len(), 10);
    assert_eq!(chapters[0]["number"], 20);
}

#[tokio::test]
async fn chapter_list_oldest_first() {
    let app = app_with_kingdom(12).await;

    let (_, body) = app.get("/api/comics/kingdom/chapters?order=oldest").await;
    assert_eq!(body["volumes"][0]["volume"], 2);
    assert_eq!(body["volumes"][1]["chapters"][0]["number"], 1);
}

#[tokio::test]
async fn reader_resolves_page_urls() {
    let app = app_with_kingdom(0).await;
    app.db
        .put_chapter(
            ComicId::from_db(1),
            Chapter::placeholder(1),
            &["kingdom/1/01.jpg", "https://cdn.test/02.jpg"],
        )
        .await;

    let (status, body) = app.get("/api/comics/kingdom/chapters/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["pages"][0]["url"],
        "http://storage.test/storage/v1/object/public/pages/kingdom/1/01.jpg"
    );
    assert_eq!(body["pages"][1]["url"], "https://cdn.test/02.jpg");
    assert!(body["navigation"]["prev"].is_null());
    assert!(body["navigation"]["next"].is_null());
}

#[tokio::test]
async fn reader_404s_on_bad_numbers() {
    let app = app_with_kingdom(5).await;
    for uri in [
        "/api/comics/kingdom/chapters/abc",
        "/api/comics/kingdom/chapters/0",
        "/api/comics/kingdom/chapters/6",
        // Within range but no chapter row.
        "/api/comics/kingdom/chapters/2",
    ] {
        let (status, _) = app.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Ratings
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn rating_requires_sign_in() {
    let app = app_with_kingdom(1).await;

    let (status, body) = app
        .send_json("PUT", "/api/comics/1/rating", None, json!({"rating": 4}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Log in to rate this comic.");

    let (status, body) = app.get("/api/comics/1/rating").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["rating"].is_null());
}

#[tokio::test]
async fn rate_then_read_back() {
    let app = app_with_kingdom(1).await;

    let (status, body) = app
        .send_json("PUT", "/api/comics/1/rating", Some(READER_TOKEN), json!({"rating": 4}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average"], 4.0);
    assert_eq!(body["count"], 1);
    assert_eq!(body["my_rating"], 4);

    let (_, body) = app.get_as("/api/comics/1/rating", READER_TOKEN).await;
    assert_eq!(body["rating"], 4);
}

#[tokio::test]
async fn out_of_range_rating_is_400() {
    let app = app_with_kingdom(1).await;
    let (status, _) = app
        .send_json("PUT", "/api/comics/1/rating", Some(READER_TOKEN), json!({"rating": 9}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ════════════════════════════════════════════════════════════════════════════════
// Accounts
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn register_then_login() {
    let app = TestApp::new().await;
    let creds = json!({"email": "new@example.com", "password": "hunter22", "username": "Newbie"});

    let (status, body) = app.send_json("POST", "/api/auth/register", None, creds).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["confirmation_required"], false);

    let (status, body) = app
        .send_json(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "new@example.com", "password": "hunter22"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());

    let (status, body) = app
        .send_json(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "new@example.com", "password": "wrong"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn oauth_url_uses_default_redirect() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/auth/oauth/discord").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["url"].as_str().unwrap().contains("provider=discord"));

    let (status, _) = app.get("/api/auth/oauth/myspace").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_requires_session() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/profile").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "UNAUTHORIZED");

    let (status, _) = app.get_as("/api/profile", "forged").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin
// ════════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn admin_routes_reject_readers() {
    let app = TestApp::new().await;
    let body = json!({"title": "Hi", "content": "There"});

    let (status, _) = app
        .send_json("POST", "/api/admin/announcements", None, body.clone())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send_json("POST", "/api/admin/announcements", Some(READER_TOKEN), body)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin access required");
}

#[tokio::test]
async fn admin_posts_announcement() {
    let app = TestApp::new().await;

    let (status, created) = app
        .send_json(
            "POST",
            "/api/admin/announcements",
            Some(ADMIN_TOKEN),
            json!({"title": "  Maintenance ", "content": "Down at noon"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Maintenance");

    let (_, list) = app.get("/api/announcements?q=noon").await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = app
        .send_json(
            "POST",
            "/api/admin/announcements",
            Some(ADMIN_TOKEN),
            json!({"title": "", "content": "x"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title and content are required.");
}

#[tokio::test]
async fn admin_adds_chapters_once() {
    let app = app_with_kingdom(0).await;
    let chapter = json!({"number": 1, "title": "Boy", "pages": ["k/1/01.jpg"]});

    let (status, body) = app
        .send_json("POST", "/api/admin/comics/kingdom/chapters", Some(ADMIN_TOKEN), chapter.clone())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["number"], 1);

    let (status, _) = app
        .send_json("POST", "/api/admin/comics/kingdom/chapters", Some(ADMIN_TOKEN), chapter)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.get("/api/comics/kingdom/chapters/1").await;
    assert_eq!(status, StatusCode::OK);
}

fn multipart_request(token: &str, parts: &[(&str, Option<(&str, &str)>, &str)]) -> Request<Body> {
    let boundary = "fluxinkverse-boundary";
    let mut body = String::new();
    for (name, file, value) in parts {
        body.push_str(&format!("--{}\r\n", boundary));
        match file {
            Some((file_name, content_type)) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                name, file_name, content_type
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                name
            )),
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", boundary));

    Request::post("/api/admin/comics")
        .header("authorization", format!("Bearer {}", token))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn admin_creates_comic_with_cover() {
    let app = app_with_kingdom(0).await;
    let request = multipart_request(
        ADMIN_TOKEN,
        &[
            ("title", None, "Kingdom"),
            ("author", None, "Hara"),
            ("last_chapter", None, "12"),
            ("genres", None, "Action, Drama"),
            ("genres", None, "Action"),
            ("cover", Some(("cover.png", "image/png")), "PNGDATA"),
        ],
    );

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["slug"], "kingdom-2");
    assert_eq!(body["genres"], json!(["Action", "Drama"]));
    assert_eq!(body["last_chapter"], 12);
    assert_eq!(app.storage.object_count().await, 1);
    assert_eq!(app.db.comic_count().await, 2);
}

#[tokio::test]
async fn comic_without_cover_is_rejected() {
    let app = TestApp::new().await;
    let request = multipart_request(ADMIN_TOKEN, &[("title", None, "Kingdom")]);

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title and cover image are required.");
    assert_eq!(app.storage.object_count().await, 0);
}
