// ============================================================================
// TOKEN STORE - Único punto de acceso al token persistido
// ============================================================================
// AuthState y ApiClient leen/escriben el token SOLO por aquí.
// Cada escritura notifica a los subscribers, así la copia en memoria de
// AuthState no se desincroniza cuando el ApiClient borra el token (401).
// ============================================================================

use std::rc::Rc;

use crate::config::CONFIG;
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::utils::storage::{BrowserStorage, MemoryStorage, StorageBackend, StorageError};

thread_local! {
    static SHARED: TokenStore = TokenStore::browser();
}

#[derive(Clone)]
pub struct TokenStore {
    backend: Rc<dyn StorageBackend>,
    key: Rc<str>,
    changes: ReactiveState<Option<String>>,
}

impl TokenStore {
    pub fn new<B>(backend: B, key: &str) -> Self
    where
        B: StorageBackend + 'static,
    {
        Self {
            backend: Rc::new(backend),
            key: Rc::from(key),
            changes: ReactiveState::new(None),
        }
    }

    /// localStorage del navegador; si no existe, memoria (el token no sobrevive a una recarga)
    pub fn browser() -> Self {
        if BrowserStorage::is_available() {
            Self::new(BrowserStorage::new(), &CONFIG.auth_token_key)
        } else {
            log::warn!("⚠️ localStorage no disponible, el token solo vivirá en memoria");
            Self::new(MemoryStorage::new(), &CONFIG.auth_token_key)
        }
    }

    /// Instancia única de la app (la usan AuthProvider y auth_service)
    pub fn shared() -> Self {
        SHARED.with(Clone::clone)
    }

    /// Token persistido. Un string vacío cuenta como ausente.
    pub fn load(&self) -> Option<String> {
        match self.backend.get_item(&self.key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::error!("❌ Error leyendo token: {}", e);
                None
            }
        }
    }

    pub fn save(&self, token: &str) -> Result<(), StorageError> {
        self.backend.set_item(&self.key, token)?;
        self.changes.set(Some(token.to_string()));
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove_item(&self.key)?;
        self.changes.set(None);
        Ok(())
    }

    /// Se llama después de cada `save`/`clear` con el nuevo valor
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Option<String>) + 'static,
    {
        self.changes.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.changes.subscriber_count()
    }
}
