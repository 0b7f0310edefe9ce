// ============================================================================
// APP STATE - Estado global del shell
// ============================================================================
// Una sola instancia (la del App montado). Contiene:
// - la ubicación actual (RouterState)
// - el estado de carga de cada vista diferida
// - subscribers que re-renderizan cuando algo cambia
// ============================================================================

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use crate::models::{ChunkError, Location, RouteProps, ViewId};
use crate::state::{LazyView, LoadState, LoadTicket, RouterState};

/// Lo que debe mostrarse en el hueco de la vista
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outlet {
    /// Código de la vista aún descargándose
    Placeholder(ViewId),
    View { view: ViewId, props: RouteProps },
    Failed { view: ViewId, error: ChunkError },
    /// Ninguna ruta coincide
    NotFound(Location),
}

#[derive(Clone)]
pub struct AppState {
    pub router: RouterState,
    views: Rc<BTreeMap<ViewId, LazyView>>,
    change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new(initial: Location) -> Self {
        let views = ViewId::ALL
            .iter()
            .map(|view| (*view, LazyView::new(*view)))
            .collect();

        let state = Self {
            router: RouterState::new(initial),
            views: Rc::new(views),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        };

        let subscribers = state.change_subscribers.clone();
        state.router.location.subscribe(move || notify(&subscribers));
        state
    }

    pub fn lazy_view(&self, view: ViewId) -> &LazyView {
        // El mapa se construye con todas las variantes de ViewId
        &self.views[&view]
    }

    pub fn load_state(&self, view: ViewId) -> LoadState {
        self.lazy_view(view).state()
    }

    /// Suscribirse a cualquier cambio (ubicación o estado de carga)
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn notify_changes(&self) {
        notify(&self.change_subscribers);
    }

    /// Cambia la ubicación y pide la vista que corresponda
    pub fn navigate(&self, location: Location) -> Option<LoadTicket> {
        self.router.set_location(location);
        self.request_current_view()
    }

    /// Pide la vista de la ruta actual si aún no se pidió
    pub fn request_current_view(&self) -> Option<LoadTicket> {
        let (route, _) = self.router.current_route()?;
        self.request_view(route.view)
    }

    pub fn request_view(&self, view: ViewId) -> Option<LoadTicket> {
        let ticket = self.lazy_view(view).begin()?;
        log::info!("⏳ [LOADER] Cargando vista {}", view);
        self.notify_changes();
        Some(ticket)
    }

    /// Resultado de una descarga. La vista cambia de estado aunque ya no
    /// sea la ruta actual; el outlet siempre se calcula con la URL vigente.
    pub fn finish_load(&self, ticket: LoadTicket, result: Result<(), ChunkError>) {
        if let Err(e) = &result {
            log::error!("❌ [LOADER] Vista {} falló: {}", ticket.view, e);
        }
        if self.lazy_view(ticket.view).finish(ticket, result) {
            log::info!("✅ [LOADER] Vista {} -> {:?}", ticket.view, self.load_state(ticket.view));
            self.notify_changes();
        } else {
            log::debug!("[LOADER] Resultado obsoleto para {} ignorado", ticket.view);
        }
    }

    /// Failed -> Unrequested -> Loading
    pub fn retry(&self, view: ViewId) -> Option<LoadTicket> {
        if !self.lazy_view(view).reset() {
            return None;
        }
        log::info!("🔁 [LOADER] Reintentando vista {}", view);
        self.request_view(view)
    }

    /// Contenido del hueco de la vista para la URL actual
    pub fn outlet(&self) -> Outlet {
        let location = self.router.location();
        let Some((route, route_match)) = self.router.current_route() else {
            return Outlet::NotFound(location);
        };

        match self.load_state(route.view) {
            LoadState::Unrequested | LoadState::Loading => Outlet::Placeholder(route.view),
            LoadState::Ready => Outlet::View {
                view: route.view,
                props: RouteProps {
                    route_match,
                    location,
                    value: route.value.to_string(),
                },
            },
            LoadState::Failed(error) => Outlet::Failed {
                view: route.view,
                error,
            },
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Location::default())
    }
}

fn notify(subscribers: &Rc<RefCell<Vec<Rc<dyn Fn()>>>>) {
    let callbacks: Vec<_> = subscribers.borrow().clone();
    for callback in callbacks {
        callback();
    }
}
