//! Article service client.

use tonic::transport::Channel;
use tonic::{Request, Status};

use crate::rpc::client::unary;
use crate::rpc::messages::*;

/// Typed calls against `article.ArticleService`.
#[derive(Debug, Clone)]
pub struct ArticleClient {
    channel: Channel,
}

impl ArticleClient {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    pub async fn create_article(
        &self,
        request: Request<CreateArticleRequest>,
    ) -> Result<ArticleResponse, Status> {
        unary(self.channel.clone(), "/article.ArticleService/CreateArticle", request).await
    }

    pub async fn get_article(&self, request: Request<GetArticleRequest>) -> Result<GetArticleResponse, Status> {
        unary(self.channel.clone(), "/article.ArticleService/GetArticle", request).await
    }

    pub async fn update_article(
        &self,
        request: Request<UpdateArticleRequest>,
    ) -> Result<ArticleResponse, Status> {
        unary(self.channel.clone(), "/article.ArticleService/UpdateArticle", request).await
    }

    pub async fn delete_article(
        &self,
        request: Request<DeleteArticleRequest>,
    ) -> Result<DeleteResponse, Status> {
        unary(self.channel.clone(), "/article.ArticleService/DeleteArticle", request).await
    }

    pub async fn list_articles(
        &self,
        request: Request<ListArticlesRequest>,
    ) -> Result<ListArticlesResponse, Status> {
        unary(self.channel.clone(), "/article.ArticleService/ListArticles", request).await
    }
}
