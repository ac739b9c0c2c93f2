//! Article routes, backed by the article service.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use serde::Deserialize;
use std::collections::HashMap;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::Request;

use crate::http::error::ApiError;
use crate::http::extract::{bearer_token, parse_id, query_int, JsonBody, Pagination};
use crate::http::forward::forward;
use crate::http::response::{ApiResponse, ListData};
use crate::http::server::AppState;
use crate::http::views::{ArticleDetailView, ArticleListItem, ArticleView, SuccessView};
use crate::rpc::client::{bearer_metadata, with_authorization};
use crate::rpc::messages::*;

type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateArticleBody {
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateArticleBody {
    pub title: String,
    pub content: String,
}

type Authorization = MetadataValue<Ascii>;

/// Turn a bearer token into outgoing metadata before anything is dispatched.
fn authorization(token: Option<String>) -> Result<Option<Authorization>, ApiError> {
    token
        .map(|token| bearer_metadata(&token).map_err(|_| ApiError::unauthorized("invalid authorization token")))
        .transpose()
}

fn authorize<M>(request: Request<M>, auth: Option<Authorization>) -> Request<M> {
    match auth {
        Some(value) => with_authorization(request, value),
        None => request,
    }
}

fn article_view(resp: ArticleResponse) -> Option<ArticleView> {
    resp.data?.article.map(ArticleView::from)
}

pub async fn create_article(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<CreateArticleBody>,
) -> ApiResult<ArticleView> {
    let token = bearer_token(&headers).ok_or_else(|| ApiError::unauthorized("authorization token required"))?;
    let auth = authorization(Some(token))?;
    let request = CreateArticleRequest {
        title: body.title,
        content: body.content,
        user_id: body.user_id,
    };
    forward(
        state.articles(),
        move |client, ctx| async move {
            client.create_article(authorize(ctx.request(request), auth)).await
        },
        article_view,
    )
    .await
}

pub async fn get_article(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ArticleDetailView> {
    let id = parse_id(&id, "article")?;
    forward(
        state.articles(),
        move |client, ctx| async move { client.get_article(ctx.request(GetArticleRequest { id })).await },
        |resp: GetArticleResponse| resp.data?.article.and_then(ArticleDetailView::from_joined),
    )
    .await
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<UpdateArticleBody>,
) -> ApiResult<ArticleView> {
    let id = parse_id(&id, "article")?;
    let auth = authorization(bearer_token(&headers))?;
    let request = UpdateArticleRequest {
        id,
        title: body.title,
        content: body.content,
    };
    forward(
        state.articles(),
        move |client, ctx| async move {
            client.update_article(authorize(ctx.request(request), auth)).await
        },
        article_view,
    )
    .await
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<SuccessView> {
    let id = parse_id(&id, "article")?;
    let auth = authorization(bearer_token(&headers))?;
    forward(
        state.articles(),
        move |client, ctx| async move {
            client
                .delete_article(authorize(ctx.request(DeleteArticleRequest { id }), auth))
                .await
        },
        |resp: DeleteResponse| resp.data.map(|d| SuccessView { success: d.success }),
    )
    .await
}

pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<ListData<ArticleListItem>> {
    let paging = Pagination::from_query(&query);
    let request = ListArticlesRequest {
        page_size: paging.page_size,
        page_number: paging.page,
        user_id: query_int(&query, "user_id"),
    };
    forward(
        state.articles(),
        move |client, ctx| async move { client.list_articles(ctx.request(request)).await },
        move |resp: ListArticlesResponse| {
            let page = resp.data?;
            let items = page
                .articles
                .into_iter()
                .filter_map(ArticleListItem::from_joined)
                .collect();
            // The article service does not echo the page size back.
            Some(ListData::new(items, i64::from(page.total), page.page, paging.page_size))
        },
    )
    .await
}
