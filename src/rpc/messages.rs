//! Protobuf messages exchanged with the user and article services.
//!
//! Every response carries the backend's own `code`/`message` pair next to its
//! payload, mirroring the gateway envelope.

/// Responses that carry an application code and message.
pub trait Envelope {
    fn code(&self) -> &str;
    fn message(&self) -> &str;
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Envelope for $ty {
                fn code(&self) -> &str {
                    &self.code
                }

                fn message(&self) -> &str {
                    &self.message
                }
            }
        )*
    };
}

// ---- shared ----

#[derive(Clone, PartialEq, prost::Message)]
pub struct User {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub email: String,
    #[prost(string, tag = "4")]
    pub created_at: String,
    #[prost(string, tag = "5")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SuccessData {
    #[prost(bool, tag = "1")]
    pub success: bool,
}

// ---- user service ----

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateUserRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub email: String,
    #[prost(string, tag = "3")]
    pub password: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetUserRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateUserRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, optional, tag = "2")]
    pub name: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub email: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub password: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteUserRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListUsersRequest {
    #[prost(int32, tag = "1")]
    pub page: i32,
    #[prost(int32, tag = "2")]
    pub page_size: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UserData {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UserResponse {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub data: Option<UserData>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteResponse {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub data: Option<SuccessData>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UserPage {
    #[prost(message, repeated, tag = "1")]
    pub users: Vec<User>,
    #[prost(int64, tag = "2")]
    pub total: i64,
    #[prost(int32, tag = "3")]
    pub page: i32,
    #[prost(int32, tag = "4")]
    pub size: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListUsersResponse {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub data: Option<UserPage>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LoginRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub password: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RefreshTokenRequest {
    #[prost(string, tag = "1")]
    pub refresh_token: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TokenPair {
    #[prost(string, tag = "1")]
    pub access_token: String,
    #[prost(string, tag = "2")]
    pub refresh_token: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TokenResponse {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub data: Option<TokenPair>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ValidateTokenRequest {
    #[prost(string, tag = "1")]
    pub token: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TokenClaims {
    #[prost(bool, tag = "1")]
    pub valid: bool,
    #[prost(int32, tag = "2")]
    pub user_id: i32,
    #[prost(string, tag = "3")]
    pub email: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ValidateTokenResponse {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub data: Option<TokenClaims>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LogoutRequest {
    #[prost(string, tag = "1")]
    pub token: String,
    #[prost(string, tag = "2")]
    pub refresh_token: String,
}

// ---- article service ----

#[derive(Clone, PartialEq, prost::Message)]
pub struct Article {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub title: String,
    #[prost(string, tag = "3")]
    pub content: String,
    #[prost(int32, tag = "4")]
    pub user_id: i32,
    #[prost(string, tag = "5")]
    pub created_at: String,
    #[prost(string, tag = "6")]
    pub updated_at: String,
}

/// An article joined with its author; `user` is absent when the
/// article service could not reach the user service.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ArticleWithUser {
    #[prost(message, optional, tag = "1")]
    pub article: Option<Article>,
    #[prost(message, optional, tag = "2")]
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateArticleRequest {
    #[prost(string, tag = "1")]
    pub title: String,
    #[prost(string, tag = "2")]
    pub content: String,
    #[prost(int32, tag = "3")]
    pub user_id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetArticleRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateArticleRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub title: String,
    #[prost(string, tag = "3")]
    pub content: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteArticleRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListArticlesRequest {
    #[prost(int32, tag = "1")]
    pub page_size: i32,
    #[prost(int32, tag = "2")]
    pub page_number: i32,
    #[prost(int32, tag = "3")]
    pub user_id: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ArticleData {
    #[prost(message, optional, tag = "1")]
    pub article: Option<Article>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ArticleResponse {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub data: Option<ArticleData>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ArticleWithUserData {
    #[prost(message, optional, tag = "1")]
    pub article: Option<ArticleWithUser>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetArticleResponse {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub data: Option<ArticleWithUserData>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ArticlePage {
    #[prost(message, repeated, tag = "1")]
    pub articles: Vec<ArticleWithUser>,
    #[prost(int32, tag = "2")]
    pub total: i32,
    #[prost(int32, tag = "3")]
    pub page: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListArticlesResponse {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub data: Option<ArticlePage>,
}

impl_envelope!(
    UserResponse,
    DeleteResponse,
    ListUsersResponse,
    TokenResponse,
    ValidateTokenResponse,
    ArticleResponse,
    GetArticleResponse,
    ListArticlesResponse,
);
