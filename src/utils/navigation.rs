use web_sys::window;

/// Navegación forzada (recarga completa de la página)
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Usa `window.location.href`; no pasa por el router de la app
#[derive(Clone, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        let Some(win) = window() else {
            log::warn!("⚠️ Sin window, no se puede navegar a {}", path);
            return;
        };
        if let Err(e) = win.location().set_href(path) {
            log::error!("❌ Error navegando a {}: {:?}", path, e);
        }
    }
}
