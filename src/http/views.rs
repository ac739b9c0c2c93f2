//! JSON views of backend payloads.

use serde::Serialize;

use crate::rpc::messages::{Article, ArticleWithUser, TokenClaims, TokenPair, User};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenView {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenView {
    fn from(t: TokenPair) -> Self {
        Self {
            access_token: t.access_token,
            refresh_token: t.refresh_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimsView {
    pub valid: bool,
    pub user_id: i32,
    pub email: String,
}

impl From<TokenClaims> for ClaimsView {
    fn from(c: TokenClaims) -> Self {
        Self {
            valid: c.valid,
            user_id: c.user_id,
            email: c.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessView {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleView {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Article> for ArticleView {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            content: a.content,
            user_id: a.user_id,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// A single article with its author; `user` is `null` when the author is unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleDetailView {
    #[serde(flatten)]
    pub article: ArticleView,
    pub user: Option<UserView>,
}

/// An article in a listing; `user` is left out when the author is unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleListItem {
    #[serde(flatten)]
    pub article: ArticleView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
}

impl ArticleDetailView {
    pub fn from_joined(joined: ArticleWithUser) -> Option<Self> {
        Some(Self {
            article: joined.article?.into(),
            user: joined.user.map(UserView::from),
        })
    }
}

impl ArticleListItem {
    pub fn from_joined(joined: ArticleWithUser) -> Option<Self> {
        Some(Self {
            article: joined.article?.into(),
            user: joined.user.map(UserView::from),
        })
    }
}
