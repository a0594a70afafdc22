// ============================================================================
// API CLIENT - Requests autenticadas contra el backend de auth
// ============================================================================
// Antes de enviar: añade `Authorization: Bearer <token>` si hay token guardado.
// Al recibir: un 401 borra el token y navega a /login, y el error se devuelve
// igualmente al que llamó.
// ============================================================================

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CONFIG;
use crate::models::{CurrentUserResponse, LoginRequest, LoginResponse, RegisterRequest};
use crate::services::http::{ApiError, ApiRequest, ApiResponse, FetchTransport, Transport};
use crate::state::token_store::TokenStore;
use crate::utils::constants::{AUTH_LOGIN_PATH, AUTH_ME_PATH, AUTH_REGISTER_PATH};
use crate::utils::navigation::{BrowserNavigator, Navigator};

/// Resultado de una operación que el backend todavía no ofrece
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    NotSupported,
}

impl<T> Outcome<T> {
    pub fn is_supported(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }
}

#[derive(Clone)]
pub struct ApiClient<T = FetchTransport, N = BrowserNavigator> {
    base_url: String,
    login_route: String,
    tokens: TokenStore,
    transport: T,
    navigator: N,
}

impl ApiClient {
    /// Cliente del navegador con la configuración de compilación
    pub fn new(tokens: TokenStore) -> Self {
        Self::with_parts(
            &CONFIG.api_base_url,
            &CONFIG.login_route,
            tokens,
            FetchTransport,
            BrowserNavigator,
        )
    }
}

impl<T: Transport, N: Navigator> ApiClient<T, N> {
    pub fn with_parts(
        base_url: &str,
        login_route: &str,
        tokens: TokenStore,
        transport: T,
        navigator: N,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            login_route: login_route.to_string(),
            tokens,
            transport,
            navigator,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    /// Hook de salida: el token se lee del storage en cada request
    pub fn authorize(&self, request: ApiRequest) -> ApiRequest {
        match self.tokens.load() {
            Some(token) => request.with_header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Hook de entrada
    pub fn inspect_response(&self, response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.ok() {
            return Ok(response);
        }

        if response.status == 401 {
            log::warn!("🔒 401 recibido, token expirado o inválido. Redirigiendo a {}", self.login_route);
            if let Err(e) = self.tokens.clear() {
                log::error!("❌ Error borrando token: {}", e);
            }
            self.navigator.navigate(&self.login_route);
        }

        Err(response.into_error())
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let request = self.authorize(request);
        let response = self.transport.send(request).await?;
        self.inspect_response(response)
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.send(ApiRequest::get(self.url(path))).await?;
        response.json::<R>()
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let response = self.send(ApiRequest::post(self.url(path), body)).await?;
        response.json::<R>()
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 Login para: {}", email);
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_json(AUTH_LOGIN_PATH, &request).await
    }

    pub async fn register_user(&self, data: &RegisterRequest) -> Result<LoginResponse, ApiError> {
        log::info!("📝 Registrando usuario: {}", data.email);
        self.post_json(AUTH_REGISTER_PATH, data).await
    }

    /// Solo borra el token local; el backend aún no revoca tokens
    pub async fn logout_user(&self) -> Result<(), ApiError> {
        self.tokens.clear()?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<CurrentUserResponse, ApiError> {
        self.get_json(AUTH_ME_PATH).await
    }

    pub async fn refresh_token(&self) -> Outcome<String> {
        log::warn!("⚠️ refresh_token no disponible en el backend");
        Outcome::NotSupported
    }

    pub async fn validate_token(&self, _token: &str) -> Outcome<bool> {
        log::warn!("⚠️ validate_token no disponible en el backend");
        Outcome::NotSupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use crate::state::auth_state::AuthState;
    use crate::utils::storage::{MemoryStorage, StorageBackend};
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockTransport {
        sent: Rc<RefCell<Vec<ApiRequest>>>,
        responses: Rc<RefCell<VecDeque<Result<ApiResponse, ApiError>>>>,
    }

    impl MockTransport {
        fn respond(&self, status: u16, body: &str) {
            self.responses.borrow_mut().push_back(Ok(ApiResponse {
                status,
                status_text: String::new(),
                body: body.to_string(),
            }));
        }

        fn fail(&self, error: ApiError) {
            self.responses.borrow_mut().push_back(Err(error));
        }

        fn last(&self) -> ApiRequest {
            self.sent.borrow().last().cloned().unwrap()
        }
    }

    impl Transport for MockTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.sent.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("no queued response")
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNavigator {
        visited: Rc<RefCell<Vec<String>>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, path: &str) {
            self.visited.borrow_mut().push(path.to_string());
        }
    }

    struct Fixture {
        backend: MemoryStorage,
        transport: MockTransport,
        navigator: RecordingNavigator,
        client: ApiClient<MockTransport, RecordingNavigator>,
    }

    fn fixture() -> Fixture {
        let backend = MemoryStorage::new();
        let transport = MockTransport::default();
        let navigator = RecordingNavigator::default();
        let client = ApiClient::with_parts(
            "http://localhost:8000/",
            "/login",
            TokenStore::new(backend.clone(), "authToken"),
            transport.clone(),
            navigator.clone(),
        );
        Fixture {
            backend,
            transport,
            navigator,
            client,
        }
    }

    const LOGIN_BODY: &str = r#"{"access_token":"jwt-1","token_type":"Bearer","user":{"id":"1","email":"admin@test.com","nombre":"Admin","created_at":null}}"#;

    #[test]
    fn attaches_bearer_token_from_storage() {
        let f = fixture();
        f.backend.set_item("authToken", "abc").unwrap();
        f.transport.respond(200, r#"{"user_id":"admin@test.com","message":"hola"}"#);

        let me = block_on(f.client.current_user()).unwrap();

        assert_eq!(me.user_id, "admin@test.com");
        let sent = f.transport.last();
        assert_eq!(sent.url, "http://localhost:8000/auth/me");
        assert_eq!(sent.header("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn no_authorization_header_without_token() {
        let f = fixture();
        f.transport.respond(200, LOGIN_BODY);

        block_on(f.client.login_user("admin@test.com", "123456")).unwrap();

        assert_eq!(f.transport.last().header("Authorization"), None);
    }

    #[test]
    fn token_is_read_per_request() {
        let f = fixture();
        f.transport.respond(200, "{}");
        f.transport.respond(200, "{}");

        f.backend.set_item("authToken", "first").unwrap();
        block_on(f.client.send(ApiRequest::get(f.client.url("/a")))).unwrap();
        assert_eq!(f.transport.last().header("Authorization"), Some("Bearer first"));

        f.backend.set_item("authToken", "second").unwrap();
        block_on(f.client.send(ApiRequest::get(f.client.url("/b")))).unwrap();
        assert_eq!(f.transport.last().header("Authorization"), Some("Bearer second"));
    }

    #[test]
    fn login_posts_credentials_and_parses_response() {
        let f = fixture();
        f.transport.respond(200, LOGIN_BODY);

        let response = block_on(f.client.login_user("admin@test.com", "123456")).unwrap();

        assert_eq!(response.access_token, "jwt-1");
        assert_eq!(response.user.map(|u| u.id), Some("1".to_string()));
        let sent = f.transport.last();
        assert_eq!(sent.method, crate::services::http::HttpMethod::Post);
        assert_eq!(sent.url, "http://localhost:8000/auth/login");
        assert_eq!(
            sent.body,
            Some(serde_json::json!({"email": "admin@test.com", "password": "123456"}))
        );
    }

    #[test]
    fn register_posts_request_body() {
        let f = fixture();
        f.transport.respond(200, LOGIN_BODY);
        let data = RegisterRequest {
            email: "new@test.com".into(),
            password: "secret1".into(),
            password_confirm: "secret1".into(),
            nombre: Some("Nuevo".into()),
        };

        block_on(f.client.register_user(&data)).unwrap();

        let sent = f.transport.last();
        assert_eq!(sent.url, "http://localhost:8000/auth/register");
        assert_eq!(sent.body.as_ref().unwrap()["nombre"], "Nuevo");
        assert_eq!(sent.body.as_ref().unwrap()["password_confirm"], "secret1");
    }

    #[test]
    fn unauthorized_clears_token_redirects_and_propagates() {
        let f = fixture();
        f.backend.set_item("authToken", "expired").unwrap();
        f.transport.respond(401, r#"{"detail":"Token inválido o expirado"}"#);

        let result = block_on(f.client.current_user());

        let error = result.unwrap_err();
        assert!(error.is_unauthorized());
        assert!(matches!(&error, ApiError::Http { body, .. } if body.contains("expirado")));
        assert!(!f.backend.contains_key("authToken"));
        assert_eq!(*f.navigator.visited.borrow(), vec!["/login".to_string()]);
    }

    #[test]
    fn unauthorized_also_clears_session_state() {
        let f = fixture();
        let session = AuthState::new(f.client.token_store().clone());
        let user = UserProfile {
            id: "1".into(),
            email: "admin@test.com".into(),
            nombre: None,
            created_at: None,
        };
        session.login("jwt".into(), Some(user));
        f.transport.respond(401, "");

        let _ = block_on(f.client.current_user());

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn other_http_errors_propagate_without_side_effects() {
        let f = fixture();
        f.backend.set_item("authToken", "abc").unwrap();
        f.transport.respond(400, r#"{"detail":"Email y contraseña requeridos"}"#);

        let error = block_on(f.client.login_user("", "")).unwrap_err();

        assert_eq!(error.status(), Some(400));
        assert!(f.backend.contains_key("authToken"));
        assert!(f.navigator.visited.borrow().is_empty());
    }

    #[test]
    fn network_errors_propagate_unmodified() {
        let f = fixture();
        f.backend.set_item("authToken", "abc").unwrap();
        f.transport.fail(ApiError::Network("connection refused".into()));

        let error = block_on(f.client.login_user("a@b.c", "x")).unwrap_err();

        assert_eq!(error, ApiError::Network("connection refused".into()));
        assert!(f.backend.contains_key("authToken"));
        assert_eq!(f.transport.sent.borrow().len(), 1);
    }

    #[test]
    fn logout_user_only_clears_token() {
        let f = fixture();
        f.backend.set_item("authToken", "abc").unwrap();

        block_on(f.client.logout_user()).unwrap();

        assert!(!f.backend.contains_key("authToken"));
        assert!(f.transport.sent.borrow().is_empty());
        assert!(f.navigator.visited.borrow().is_empty());
    }

    #[test]
    fn refresh_and_validate_are_not_supported() {
        let f = fixture();
        f.backend.set_item("authToken", "abc").unwrap();

        assert_eq!(block_on(f.client.refresh_token()), Outcome::NotSupported);
        assert_eq!(block_on(f.client.validate_token("abc")), Outcome::NotSupported);
        assert_eq!(block_on(f.client.validate_token("")), Outcome::NotSupported);
        assert!(!block_on(f.client.refresh_token()).is_supported());
        assert!(f.transport.sent.borrow().is_empty());
    }
}
