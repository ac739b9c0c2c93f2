//! User service client.

use tonic::transport::Channel;
use tonic::{Request, Status};

use crate::rpc::client::unary;
use crate::rpc::messages::*;

/// Typed calls against `user.UserService`.
#[derive(Debug, Clone)]
pub struct UserClient {
    channel: Channel,
}

impl UserClient {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    pub async fn create_user(&self, request: Request<CreateUserRequest>) -> Result<UserResponse, Status> {
        unary(self.channel.clone(), "/user.UserService/CreateUser", request).await
    }

    pub async fn get_user(&self, request: Request<GetUserRequest>) -> Result<UserResponse, Status> {
        unary(self.channel.clone(), "/user.UserService/GetUser", request).await
    }

    pub async fn update_user(&self, request: Request<UpdateUserRequest>) -> Result<UserResponse, Status> {
        unary(self.channel.clone(), "/user.UserService/UpdateUser", request).await
    }

    pub async fn delete_user(&self, request: Request<DeleteUserRequest>) -> Result<DeleteResponse, Status> {
        unary(self.channel.clone(), "/user.UserService/DeleteUser", request).await
    }

    pub async fn list_users(&self, request: Request<ListUsersRequest>) -> Result<ListUsersResponse, Status> {
        unary(self.channel.clone(), "/user.UserService/ListUsers", request).await
    }

    pub async fn login(&self, request: Request<LoginRequest>) -> Result<TokenResponse, Status> {
        unary(self.channel.clone(), "/user.UserService/Login", request).await
    }

    pub async fn refresh_token(&self, request: Request<RefreshTokenRequest>) -> Result<TokenResponse, Status> {
        unary(self.channel.clone(), "/user.UserService/RefreshToken", request).await
    }

    pub async fn validate_token(
        &self,
        request: Request<ValidateTokenRequest>,
    ) -> Result<ValidateTokenResponse, Status> {
        unary(self.channel.clone(), "/user.UserService/ValidateToken", request).await
    }

    pub async fn logout(&self, request: Request<LogoutRequest>) -> Result<DeleteResponse, Status> {
        unary(self.channel.clone(), "/user.UserService/Logout", request).await
    }
}
