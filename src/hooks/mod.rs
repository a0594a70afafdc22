pub mod use_auth;

pub use use_auth::{apply_login_result, use_auth, use_login, AuthContext, AuthError, AuthProvider, UseLoginHandle};
