//! User and auth routes, backed by the user service.

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use std::collections::HashMap;

use crate::http::error::ApiError;
use crate::http::extract::{parse_id, JsonBody, Pagination};
use crate::http::forward::forward;
use crate::http::response::{ApiResponse, ListData};
use crate::http::server::AppState;
use crate::http::views::{ClaimsView, SuccessView, TokenView, UserView};
use crate::rpc::messages::*;

type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefreshBody {
    pub refresh_token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValidateBody {
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogoutBody {
    pub token: String,
    pub refresh_token: String,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn user_view(resp: UserResponse) -> Option<UserView> {
    resp.data?.user.map(UserView::from)
}

fn token_view(resp: TokenResponse) -> Option<TokenView> {
    resp.data.map(TokenView::from)
}

fn success_view(resp: DeleteResponse) -> Option<SuccessView> {
    resp.data.map(|d| SuccessView { success: d.success })
}

pub async fn create_user(State(state): State<AppState>, JsonBody(body): JsonBody<CreateUserBody>) -> ApiResult<UserView> {
    let request = CreateUserRequest {
        name: body.name,
        email: body.email,
        password: body.password,
    };
    forward(
        state.users(),
        move |client, ctx| async move { client.create_user(ctx.request(request)).await },
        user_view,
    )
    .await
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserView> {
    let id = parse_id(&id, "user")?;
    forward(
        state.users(),
        move |client, ctx| async move { client.get_user(ctx.request(GetUserRequest { id })).await },
        user_view,
    )
    .await
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateUserBody>,
) -> ApiResult<UserView> {
    let id = parse_id(&id, "user")?;
    let request = UpdateUserRequest {
        id,
        name: non_empty(body.name),
        email: non_empty(body.email),
        password: non_empty(body.password),
    };
    forward(
        state.users(),
        move |client, ctx| async move { client.update_user(ctx.request(request)).await },
        user_view,
    )
    .await
}

pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<SuccessView> {
    let id = parse_id(&id, "user")?;
    forward(
        state.users(),
        move |client, ctx| async move { client.delete_user(ctx.request(DeleteUserRequest { id })).await },
        success_view,
    )
    .await
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<ListData<UserView>> {
    let paging = Pagination::from_query(&query);
    let request = ListUsersRequest {
        page: paging.page,
        page_size: paging.page_size,
    };
    forward(
        state.users(),
        move |client, ctx| async move { client.list_users(ctx.request(request)).await },
        |resp: ListUsersResponse| {
            let page = resp.data?;
            let items = page.users.into_iter().map(UserView::from).collect();
            Some(ListData::new(items, page.total, page.page, page.size))
        },
    )
    .await
}

pub async fn login(State(state): State<AppState>, JsonBody(body): JsonBody<LoginBody>) -> ApiResult<TokenView> {
    let request = LoginRequest {
        email: body.email,
        password: body.password,
    };
    forward(
        state.users(),
        move |client, ctx| async move { client.login(ctx.request(request)).await },
        token_view,
    )
    .await
}

pub async fn refresh_token(State(state): State<AppState>, JsonBody(body): JsonBody<RefreshBody>) -> ApiResult<TokenView> {
    let request = RefreshTokenRequest {
        refresh_token: body.refresh_token,
    };
    forward(
        state.users(),
        move |client, ctx| async move { client.refresh_token(ctx.request(request)).await },
        token_view,
    )
    .await
}

pub async fn validate_token(State(state): State<AppState>, JsonBody(body): JsonBody<ValidateBody>) -> ApiResult<ClaimsView> {
    let request = ValidateTokenRequest { token: body.token };
    forward(
        state.users(),
        move |client, ctx| async move { client.validate_token(ctx.request(request)).await },
        |resp: ValidateTokenResponse| resp.data.map(ClaimsView::from),
    )
    .await
}

pub async fn logout(State(state): State<AppState>, JsonBody(body): JsonBody<LogoutBody>) -> ApiResult<SuccessView> {
    let request = LogoutRequest {
        token: body.token,
        refresh_token: body.refresh_token,
    };
    forward(
        state.users(),
        move |client, ctx| async move { client.logout(ctx.request(request)).await },
        success_view,
    )
    .await
}
