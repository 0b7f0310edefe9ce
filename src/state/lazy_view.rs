// ============================================================================
// LAZY VIEW - Máquina de estados de carga de una vista
// ============================================================================
// Unrequested -> Loading -> Ready
//                        \-> Failed(error) -> (retry) Unrequested
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use crate::models::{ChunkError, ViewId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Unrequested,
    Loading,
    Ready,
    Failed(ChunkError),
}

/// Identifica una carga concreta; las de antes de un retry quedan obsoletas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub view: ViewId,
    generation: u32,
}

#[derive(Clone)]
pub struct LazyView {
    view: ViewId,
    state: Rc<RefCell<LoadState>>,
    generation: Rc<Cell<u32>>,
}

impl LazyView {
    pub fn new(view: ViewId) -> Self {
        Self {
            view,
            state: Rc::new(RefCell::new(LoadState::Unrequested)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Unrequested -> Loading. Si ya está cargando o lista no hay ticket.
    pub fn begin(&self) -> Option<LoadTicket> {
        let mut state = self.state.borrow_mut();
        if *state != LoadState::Unrequested {
            return None;
        }
        *state = LoadState::Loading;
        Some(LoadTicket {
            view: self.view,
            generation: self.generation.get(),
        })
    }

    /// Loading -> Ready | Failed. Devuelve false si el ticket es obsoleto.
    pub fn finish(&self, ticket: LoadTicket, result: Result<(), ChunkError>) -> bool {
        if ticket.view != self.view || ticket.generation != self.generation.get() {
            return false;
        }
        let mut state = self.state.borrow_mut();
        if *state != LoadState::Loading {
            return false;
        }
        *state = match result {
            Ok(()) => LoadState::Ready,
            Err(e) => LoadState::Failed(e),
        };
        true
    }

    /// Failed -> Unrequested (para reintentar)
    pub fn reset(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if !matches!(*state, LoadState::Failed(_)) {
            return false;
        }
        *state = LoadState::Unrequested;
        self.generation.set(self.generation.get().wrapping_add(1));
        true
    }
}
