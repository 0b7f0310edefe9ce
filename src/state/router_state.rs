// ============================================================================
// ROUTER STATE - Ubicación actual (la única instancia del router la posee)
// ============================================================================

use crate::models::{Location, Route, RouteMatch};
use crate::router::{first_match, ROUTES};
use crate::state::ReactiveState;

#[derive(Clone)]
pub struct RouterState {
    pub location: ReactiveState<Location>,
}

impl RouterState {
    pub fn new(initial: Location) -> Self {
        Self {
            location: ReactiveState::new(initial),
        }
    }

    pub fn location(&self) -> Location {
        self.location.get()
    }

    /// Cambia la ubicación; no notifica si es la misma
    pub fn set_location(&self, location: Location) -> bool {
        if self.location.with(|current| *current == location) {
            return false;
        }
        log::info!("🧭 [ROUTER] {} -> {}", self.location.with(|l| l.pathname.clone()), location.pathname);
        self.location.set(location);
        true
    }

    /// Ruta activa para la ubicación actual
    pub fn current_route(&self) -> Option<(&'static Route, RouteMatch)> {
        self.location.with(|l| first_match(&ROUTES, &l.pathname))
    }
}

impl Default for RouterState {
    fn default() -> Self {
        Self::new(Location::default())
    }
}
