// ============================================================================
// AUTH SESSION - Estado de sesión + cliente API autenticado (RUST PURO)
// ============================================================================
// - State: AuthState (token/usuario/loading) con Rc<RefCell> + subscribers
// - TokenStore: único dueño de la clave `authToken` en localStorage
// - Services: ApiClient (Bearer en cada request, 401 -> /login)
// - Hooks: AuthProvider + use_auth() para componentes Yew
// ============================================================================

pub mod config;
pub mod hooks;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::config::CONFIG;

pub use hooks::{use_auth, use_login, AuthContext, AuthError, AuthProvider};
pub use models::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};
pub use services::{ApiClient, ApiError, Outcome};
pub use state::{AuthState, Session, TokenStore};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(Config::default());
    }
    log::info!("🚀 Auth session listo (API: {})", CONFIG.api_base_url);

    Ok(())
}
