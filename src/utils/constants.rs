/// URL base del backend
/// Configurada en tiempo de compilación (variable BACKEND_URL o `.env`)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Ruta a la que se navega cuando el backend rechaza el token
pub const LOGIN_ROUTE: &str = match option_env!("LOGIN_ROUTE") {
    Some(route) => route,
    None => "/login",
};

/// Clave de localStorage donde vive el token
pub const AUTH_TOKEN_KEY: &str = match option_env!("AUTH_TOKEN_KEY") {
    Some(key) => key,
    None => "authToken",
};

pub const AUTH_LOGIN_PATH: &str = "/auth/login";
pub const AUTH_REGISTER_PATH: &str = "/auth/register";
pub const AUTH_ME_PATH: &str = "/auth/me";
