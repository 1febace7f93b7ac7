//! Bulletin board: the grid page shell and the JSON API behind it.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};
use serde::de::DeserializeOwned;

use pinboard_core::domain::{Post, PostDraft, PostPatch, PostSummary};
use pinboard_shared::MessageResponse;
use pinboard_shared::dto::{
    CreatePostRequest, PostDetailResponse, PostSummaryResponse, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult, PageResult};
use crate::state::AppState;

/// GET {board}/ - page shell; the grid loads its rows from the API.
pub async fn post_list_page(state: web::Data<AppState>) -> PageResult<HttpResponse> {
    let mut context = tera::Context::new();
    context.insert("prefix", &state.prefixes.board);

    let html = state.templates.render("board/post_list.html", &context)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// GET {board}/api/posts/
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .list_recent()
        .await
        .map_err(AppError::internal("fetching the posts"))?;

    let body: Vec<PostSummaryResponse> = posts.into_iter().map(summary_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST {board}/api/posts/create/
pub async fn create_post(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let req: CreatePostRequest = parse_json(&body)?;

    let fields = PostDraft {
        title: req.title,
        content: req.content,
        author: req.author,
    }
    .validate()?;

    let post = state
        .posts
        .create(fields)
        .await
        .map_err(AppError::internal("saving the post"))?;

    tracing::info!(post_id = post.id, "Post created");
    Ok(HttpResponse::Created().json(MessageResponse::new("Post created successfully.")))
}

/// GET {board}/api/posts/{id}/
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail_response(post)))
}

/// PUT {board}/api/posts/{id}/ - keys absent from the body keep their stored value.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    let req: UpdatePostRequest = parse_json(&body)?;

    let patch = PostPatch {
        title: req.title,
        content: req.content,
        author: req.author,
    };
    let fields = patch.apply_to(&post).validate()?;

    state
        .posts
        .update(post.id, fields)
        .await
        .map_err(AppError::internal("updating the post"))?;

    tracing::info!(post_id = post.id, "Post updated");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Post updated successfully.")))
}

/// DELETE {board}/api/posts/{id}/
pub async fn delete_post(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;

    state.posts.delete(post.id).await?;

    tracing::info!(post_id = post.id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// The lookup every detail method starts with: a missing row ends the request with 404.
async fn find_post(state: &AppState, id: i64) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await
        .map_err(AppError::internal("fetching the post"))?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))
}

/// Decode a request body that must be a JSON object.
fn parse_json<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    let invalid = |e: serde_json::Error| {
        tracing::debug!(error = %e, "Rejected request body");
        AppError::BadRequest("Malformed request body (Invalid JSON).".to_string())
    };

    let value: serde_json::Value = serde_json::from_slice(body).map_err(invalid)?;
    if !value.is_object() {
        return Err(AppError::BadRequest(
            "Malformed request body (Invalid JSON).".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(invalid)
}

fn summary_response(post: PostSummary) -> PostSummaryResponse {
    PostSummaryResponse {
        id: post.id,
        title: post.title,
        author: post.author,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn detail_response(post: Post) -> PostDetailResponse {
    PostDetailResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author: post.author,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}
