// ============================================================================
// USE AUTH - Provider de sesión + hooks para los componentes
// ============================================================================

use yew::prelude::*;

use crate::models::{LoginResponse, UserProfile};
use crate::services::auth_service;
use crate::services::http::ApiError;
use crate::state::auth_state::{AuthState, Session};
use crate::state::token_store::TokenStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("use_auth debe usarse dentro de AuthProvider")]
    OutsideProvider,
}

/// Lo que ven los componentes: el estado compartido + una foto de la sesión
/// (la foto hace que el contexto cambie y los consumidores se re-rendericen)
#[derive(Clone)]
pub struct AuthContext {
    state: AuthState,
    session: Session,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        self.state.ptr_eq(&other.state) && self.session == other.session
    }
}

impl AuthContext {
    pub fn new(state: AuthState) -> Self {
        let session = state.snapshot();
        Self { state, session }
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn login(&self, token: String, user: Option<UserProfile>) {
        self.state.login(token, user);
    }

    pub fn logout(&self) {
        self.state.logout();
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }
}

pub fn require_provider<T>(context: Option<T>) -> Result<T, AuthError> {
    context.ok_or(AuthError::OutsideProvider)
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

#[function_component]
pub fn AuthProvider(props: &AuthProviderProps) -> Html {
    // Una sola instancia por provider, sobre el TokenStore compartido
    let state = use_memo((), |_| AuthState::new(TokenStore::shared()));
    let initial = state.snapshot();
    let session = use_state(move || initial);

    {
        let state = state.clone();
        let setter = session.setter();
        use_effect_with((), move |_| {
            let id = state.subscribe(move |s| setter.set(s.clone()));
            state.restore();
            move || {
                state.unsubscribe(id);
            }
        });
    }

    let context = AuthContext {
        state: (*state).clone(),
        session: (*session).clone(),
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

#[hook]
pub fn use_auth() -> Result<AuthContext, AuthError> {
    require_provider(use_context::<AuthContext>())
}

#[derive(Clone)]
pub struct UseLoginHandle {
    pub submit: Callback<(String, String)>,
    pub pending: bool,
    pub error: Option<ApiError>,
}

/// Inicia sesión con la respuesta, o devuelve el error para mostrarlo
pub fn apply_login_result(
    state: &AuthState,
    result: Result<LoginResponse, ApiError>,
) -> Option<ApiError> {
    match result {
        Ok(response) => {
            state.login_with_response(&response);
            None
        }
        Err(e) => {
            log::error!("❌ Error en login: {}", e);
            Some(e)
        }
    }
}

/// Login contra el backend + `AuthState::login` con la respuesta
#[hook]
pub fn use_login() -> Result<UseLoginHandle, AuthError> {
    let auth = use_auth();
    let pending = use_state(|| false);
    let error = use_state(|| None::<ApiError>);
    let auth = auth?;

    let submit = {
        let pending = pending.clone();
        let error = error.clone();
        Callback::from(move |(email, password): (String, String)| {
            let auth = auth.clone();
            let pending = pending.clone();
            let error = error.clone();
            pending.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = auth_service::login_user(&email, &password).await;
                error.set(apply_login_result(auth.state(), result));
                pending.set(false);
            });
        })
    };

    Ok(UseLoginHandle {
        submit,
        pending: *pending,
        error: (*error).clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    fn state() -> AuthState {
        AuthState::new(TokenStore::new(MemoryStorage::new(), "authToken"))
    }

    #[test]
    fn missing_provider_is_usage_error() {
        let result = require_provider::<AuthContext>(None);
        let error = result.err().unwrap();
        assert_eq!(error, AuthError::OutsideProvider);
        assert_eq!(error.to_string(), "use_auth debe usarse dentro de AuthProvider");
    }

    #[test]
    fn context_changes_when_session_changes() {
        let state = state();
        let before = AuthContext::new(state.clone());
        assert!(before == AuthContext::new(state.clone()));

        state.login("tok".into(), None);
        let after = AuthContext::new(state.clone());

        assert!(before != after);
        assert!(after.is_authenticated());
        assert_eq!(after.token(), Some("tok"));
        assert!(!before.is_authenticated());
    }

    #[test]
    fn contexts_of_different_states_differ() {
        assert!(AuthContext::new(state()) != AuthContext::new(state()));
    }

    #[test]
    fn context_actions_reach_shared_state() {
        let state = state();
        let context = AuthContext::new(state.clone());

        context.login("tok".into(), None);
        assert!(state.is_authenticated());
        context.logout();
        assert!(!state.is_authenticated());
        assert!(context.is_loading());
    }

    #[test]
    fn successful_login_result_starts_session() {
        let state = state();
        let response = LoginResponse {
            access_token: "jwt".into(),
            token_type: "Bearer".into(),
            user: Some(UserProfile {
                id: "1".into(),
                email: "admin@test.com".into(),
                nombre: Some("Admin".into()),
                created_at: None,
            }),
        };

        let error = apply_login_result(&state, Ok(response));

        assert_eq!(error, None);
        assert_eq!(state.token().as_deref(), Some("jwt"));
        assert_eq!(state.token_store().load().as_deref(), Some("jwt"));
        assert_eq!(state.user().map(|u| u.id), Some("1".to_string()));
    }

    #[test]
    fn failed_login_result_keeps_session_and_returns_error() {
        let state = state();
        state.login("previous".into(), None);
        let rejected = ApiError::Http {
            status: 401,
            status_text: "Unauthorized".into(),
            body: r#"{"detail":"Credenciales inválidas"}"#.into(),
        };

        let error = apply_login_result(&state, Err(rejected.clone()));

        assert_eq!(error, Some(rejected));
        assert_eq!(state.token().as_deref(), Some("previous"));
    }
}
