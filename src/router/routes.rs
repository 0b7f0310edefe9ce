// ============================================================================
// ROUTES - Tabla fija de rutas y enlaces del menú
// ============================================================================

use crate::models::{NavLink, PathMatch, Route, ViewId};

/// Rutas en orden de declaración
pub static ROUTES: [Route; 3] = [
    Route { path: "/", matching: PathMatch::Exact, view: ViewId::Home, value: "1" },
    Route { path: "/about", matching: PathMatch::Prefix, view: ViewId::About, value: "2" },
    Route { path: "/contact", matching: PathMatch::Prefix, view: ViewId::Contact, value: "3" },
];

pub static NAV_LINKS: [NavLink; 3] = [
    NavLink { to: "/", view: ViewId::Home, exact: true },
    NavLink { to: "/about", view: ViewId::About, exact: false },
    NavLink { to: "/contact", view: ViewId::Contact, exact: false },
];
