//! Post endpoints.

use actix_web::{HttpResponse, web};

use journal_core::domain::{CreatePost, Post};
use journal_shared::dto::{
    CreatePostRequest, PostEnvelope, PostListResponse, PostResponse, format_timestamp,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_published_posts().await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: posts.into_iter().map(post_response).collect(),
    }))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let input = CreatePost {
        title: req.title_text(),
        content: req.content_text(),
        cover_image_url: req.cover(),
        published: !req.is_draft(),
        excerpt: req.excerpt_text(),
        slug: req.slug_text(),
    };

    let post = state.posts.create_post(input).await?;

    Ok(HttpResponse::Created().json(PostEnvelope {
        post: post_response(post),
    }))
}

/// GET /api/posts/{slug} - drafts are reported as missing.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    match state.posts.get_post_by_slug(&slug).await? {
        Some(post) if post.is_published() => Ok(HttpResponse::Ok().json(PostEnvelope {
            post: post_response(post),
        })),
        _ => Err(AppError::NotFound(format!("Post '{}' not found", slug))),
    }
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        slug: post.slug,
        excerpt: post.excerpt,
        content: post.content,
        cover_image_url: post.cover_image_url,
        published_at: post.published_at.as_ref().map(format_timestamp),
        created_at: format_timestamp(&post.created_at),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    use journal_core::domain::NewPost;
    use journal_core::error::RepoError;
    use journal_core::ports::PostRepository;
    use journal_infra::InMemoryPostRepository;

    use super::*;
    use crate::handlers::{configure_routes, not_found};
    use crate::state::Storage;

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(configure_routes)
                    .default_service(web::to(not_found)),
            )
            .await
        };
    }

    fn memory_state() -> AppState {
        AppState::with_repository(Arc::new(InMemoryPostRepository::new()), Storage::Memory)
    }

    /// Repository whose every call fails like an unreachable database.
    struct BrokenRepository;

    #[async_trait]
    impl PostRepository for BrokenRepository {
        async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
            Err(RepoError::Connection("connection refused".into()))
        }

        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Post>, RepoError> {
            Err(RepoError::Connection("connection refused".into()))
        }

        async fn insert(&self, _post: &NewPost) -> Result<Post, RepoError> {
            Err(RepoError::Connection("connection refused".into()))
        }
    }

    #[actix_web::test]
    async fn test_create_post() {
        let app = test_app!(memory_state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({
                "title": "Day 1 in Marrakech!",
                "content": "Mint tea on the rooftop.\n\nThen the souks.",
                "excerpt": "First day",
                "cover": "https://img.example/marrakech.jpg"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let post = &body["post"];
        assert_eq!(post["slug"], "day-1-in-marrakech");
        assert_eq!(post["excerpt"], "First day");
        assert_eq!(post["cover_image_url"], "https://img.example/marrakech.jpg");
        let created_at = post["created_at"].as_str().unwrap();
        assert_eq!(created_at.len(), "2024-05-01T10:00:00.000Z".len());
        assert!(created_at.ends_with('Z'));
        assert!(post["published_at"].is_string());
    }

    #[actix_web::test]
    async fn test_same_title_twice_gets_suffix() {
        let app = test_app!(memory_state());

        for expected in ["atlas", "atlas-2"] {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json!({ "title": "Atlas", "content": "Peaks" }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["post"]["slug"], expected);
        }
    }

    #[actix_web::test]
    async fn test_missing_content_is_bad_request() {
        let app = test_app!(memory_state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "No story" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Title and content are required");
        assert_eq!(body["code"], "validation_failed");
    }

    #[actix_web::test]
    async fn test_false_title_is_bad_request() {
        let app = test_app!(memory_state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": false, "content": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "validation_failed");
    }

    #[actix_web::test]
    async fn test_numeric_optional_fields_are_accepted() {
        let app = test_app!(memory_state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Chefchaouen", "content": "Blue walls", "excerpt": 5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["post"]["excerpt"], "5");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let app = test_app!(memory_state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"title\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "bad_request");
    }

    #[actix_web::test]
    async fn test_list_hides_drafts() {
        let app = test_app!(memory_state());

        for body in [
            json!({ "title": "Fes", "content": "Tanneries" }),
            json!({ "title": "Secret", "content": "Not yet", "published": false }),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(body)
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let posts = body["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["slug"], "fes");
    }

    #[actix_web::test]
    async fn test_get_post_by_slug() {
        let app = test_app!(memory_state());
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Blue City", "content": "Chefchaouen" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/api/posts/blue-city")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["post"]["title"], "Blue City");
    }

    #[actix_web::test]
    async fn test_get_missing_or_draft_is_not_found() {
        let app = test_app!(memory_state());
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Draft", "content": "Soon", "published": false }))
            .to_request();
        test::call_service(&app, req).await;

        for uri in ["/api/posts/draft", "/api/posts/nowhere"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["code"], "not_found");
        }
    }

    #[actix_web::test]
    async fn test_datastore_failure_is_server_error() {
        let app = test_app!(AppState::with_repository(
            Arc::new(BrokenRepository),
            Storage::Postgres
        ));

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            "Database connection failed: connection refused"
        );

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Fes", "content": "Tanneries" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_slug_exhaustion_is_server_error() {
        let app = test_app!(memory_state());

        let mut statuses = Vec::new();
        for _ in 0..6 {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json!({ "title": "Agafay", "content": "Stone desert" }))
                .to_request();
            statuses.push(test::call_service(&app, req).await.status());
        }

        assert_eq!(&statuses[..5], [StatusCode::CREATED; 5]);
        assert_eq!(statuses[5], StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_unknown_route() {
        let app = test_app!(memory_state());

        let req = test::TestRequest::get().uri("/journal").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No route for GET /journal");
    }

    #[actix_web::test]
    async fn test_health_reports_storage() {
        let app = test_app!(memory_state());

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert_eq!(timestamp.len(), "2024-05-01T10:00:00.000Z".len());
        assert!(timestamp.ends_with('Z'));
    }
}
