pub mod auth;

pub use auth::{CurrentUserResponse, LoginRequest, LoginResponse, RegisterRequest, UserProfile};
