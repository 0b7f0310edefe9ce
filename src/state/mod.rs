// ============================================================================
// STATE MODULE - Estado con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod router_state;
pub mod lazy_view;
pub mod app_state;

pub use reactivity::*;
pub use router_state::*;
pub use lazy_view::*;
pub use app_state::*;
