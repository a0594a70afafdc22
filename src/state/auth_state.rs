// ============================================================================
// AUTH STATE - Estado de sesión (token + usuario + loading)
// ============================================================================

use std::rc::Rc;

use crate::models::{LoginResponse, UserProfile};
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::state::token_store::TokenStore;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub is_loading: bool,
}

impl Session {
    /// Estado al montar: todavía no se ha mirado el storage
    pub fn loading() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

/// Suscripción de la sesión al [`TokenStore`]; se quita cuando muere el último clon de `AuthState`
struct StoreLink {
    store: TokenStore,
    subscription: SubscriptionId,
}

impl Drop for StoreLink {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

/// Estado de autenticación compartido por los componentes.
///
/// La copia en memoria del token sigue al [`TokenStore`]: si otra parte de la
/// app borra o cambia el token persistido, la sesión se actualiza sola.
#[derive(Clone)]
pub struct AuthState {
    session: ReactiveState<Session>,
    link: Rc<StoreLink>,
}

impl AuthState {
    pub fn new(store: TokenStore) -> Self {
        let session = ReactiveState::new(Session::loading());

        let mirror = session.clone();
        let subscription = store.subscribe(move |token| {
            if mirror.with(|s| s.token == *token) {
                return;
            }
            log::info!("🔄 Token cambiado fuera de la sesión, sincronizando");
            let token = token.clone();
            mirror.update(move |s| {
                if token.is_none() {
                    s.user = None;
                }
                s.token = token;
            });
        });

        Self {
            session,
            link: Rc::new(StoreLink { store, subscription }),
        }
    }

    /// Lee el token guardado (se llama una vez al montar).
    /// No se valida contra el backend.
    pub fn restore(&self) {
        let stored = self.link.store.load();
        match &stored {
            Some(_) => log::info!("🔑 Token encontrado en storage"),
            None => log::info!("ℹ️ No hay token guardado"),
        }
        self.session.update(move |s| {
            if let Some(token) = stored {
                s.token = Some(token);
            }
            s.is_loading = false;
        });
    }

    // Orden: memoria (sin avisar), storage, y recién entonces los subscribers.
    // Así nadie ve una sesión que no coincide con el token persistido.
    pub fn login(&self, token: String, user: Option<UserProfile>) {
        let persisted = token.clone();
        self.session.update_silently(move |s| {
            s.token = Some(token);
            s.user = user;
        });
        if let Err(e) = self.link.store.save(&persisted) {
            log::error!("❌ Error guardando token: {}", e);
        }
        self.session.notify();
        log::info!("✅ Sesión iniciada");
    }

    /// Aplica el token y el usuario de una respuesta de login/registro
    pub fn login_with_response(&self, response: &LoginResponse) {
        self.login(response.access_token.clone(), response.user.clone());
    }

    pub fn logout(&self) {
        self.session.update_silently(|s| {
            s.token = None;
            s.user = None;
        });
        if let Err(e) = self.link.store.clear() {
            log::error!("❌ Error borrando token: {}", e);
        }
        self.session.notify();
        log::info!("👋 Sesión cerrada");
    }

    pub fn token(&self) -> Option<String> {
        self.session.with(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.session.with(|s| s.user.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.session.with(|s| s.is_loading)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    pub fn snapshot(&self) -> Session {
        self.session.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Session) + 'static,
    {
        self.session.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.session.unsubscribe(id)
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.link.store
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.session.ptr_eq(&other.session)
    }
}
