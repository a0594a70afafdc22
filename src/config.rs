use serde::{Deserialize, Serialize};

use crate::utils::constants::{AUTH_TOKEN_KEY, BACKEND_URL, LOGIN_ROUTE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub login_route: String,
    pub auth_token_key: String,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            login_route: "/login".to_string(),
            auth_token_key: "authToken".to_string(),
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            api_base_url: BACKEND_URL.trim_end_matches('/').to_string(),
            login_route: LOGIN_ROUTE.to_string(),
            auth_token_key: AUTH_TOKEN_KEY.to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
