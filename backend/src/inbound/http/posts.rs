//! Posts listing handler.
//!
//! ```text
//! GET /posts?sort=recent
//! ```

use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::ports::PostsQueryError;
use crate::domain::{Error, PostView};
use crate::inbound::http::{ApiResult, Envelope, HttpState};

/// Query string for `GET /posts`.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub sort: Option<String>,
}

/// Success payload for the posts listing.
#[derive(Debug, Serialize)]
pub struct PostsData {
    pub posts: Vec<PostView>,
}

/// List all posts, newest first.
///
/// `sort` must equal the literal `recent`; the single supported order is
/// still required to be explicit in the query string.
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    query: web::Query<ListPostsQuery>,
) -> ApiResult<HttpResponse> {
    let sort = query.into_inner().sort;
    if sort.as_deref() != Some("recent") {
        return Err(
            Error::client("sort query parameter must be \"recent\"")
                .with_details(json!({ "sort": sort })),
        );
    }

    let posts = state.posts.list_recent().await.map_err(map_posts_error)?;
    Ok(HttpResponse::Ok().json(Envelope::success(PostsData { posts })))
}

fn map_posts_error(error: PostsQueryError) -> Error {
    debug!(%error, "posts query failed");
    Error::server(error.to_string())
}
