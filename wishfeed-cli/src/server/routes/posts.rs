use crate::server::{Result, ServerError, ServerRouter, feed::FeedSource, json::Json};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;
use std::sync::Arc;
use wishfeed_common::model::{
    Id,
    post::{Post, PostMarker},
};

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(get_posts)
        .typed_get(get_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts", rejection(ServerError))]
struct GetPostsPath();

async fn get_posts(
    GetPostsPath(): GetPostsPath,
    State(feed): State<Arc<FeedSource>>,
) -> Result<Json<Vec<Post>>> {
    let feed = feed.feed().await?;

    Ok(Json(feed.posts.clone()))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(ServerError))]
struct GetPostPath {
    id: Id<PostMarker>,
}

async fn get_post(
    GetPostPath { id }: GetPostPath,
    State(feed): State<Arc<FeedSource>>,
) -> Result<Json<Post>> {
    let feed = feed.feed().await?;
    let post = feed
        .find(&id)
        .cloned()
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(post))
}
