// Funciones sueltas sobre el cliente compartido (mismo TokenStore que AuthProvider)

use crate::models::{CurrentUserResponse, LoginResponse, RegisterRequest};
use crate::services::api_client::{ApiClient, Outcome};
use crate::services::http::ApiError;
use crate::state::token_store::TokenStore;

pub fn api_client() -> ApiClient {
    ApiClient::new(TokenStore::shared())
}

pub async fn login_user(email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    api_client().login_user(email, password).await
}

pub async fn register_user(data: &RegisterRequest) -> Result<LoginResponse, ApiError> {
    api_client().register_user(data).await
}

pub async fn logout_user() -> Result<(), ApiError> {
    api_client().logout_user().await
}

pub async fn current_user() -> Result<CurrentUserResponse, ApiError> {
    api_client().current_user().await
}

pub async fn refresh_token() -> Outcome<String> {
    api_client().refresh_token().await
}

pub async fn validate_token(token: &str) -> Outcome<bool> {
    api_client().validate_token(token).await
}
