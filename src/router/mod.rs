// ============================================================================
// ROUTER MODULE - Rutas declaradas + coincidencia de paths
// ============================================================================

pub mod matcher;
pub mod routes;

pub use matcher::{first_match, is_active, match_path};
pub use routes::{NAV_LINKS, ROUTES};
