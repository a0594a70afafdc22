// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod token_store;
pub mod auth_state;

pub use reactivity::*;
pub use token_store::*;
pub use auth_state::*;
