// ============================================================================
// MATCHER - Coincidencia de paths por segmentos
// ============================================================================
// - Literales sin distinguir mayúsculas, segmentos vacíos ignorados
//   (la barra final no importa).
// - `:nombre` captura un segmento como parámetro.
// - Prefix solo corta en límites de segmento: `/about` cubre `/about/team`
//   pero no `/aboutus`.
// ============================================================================

use std::collections::BTreeMap;
use crate::models::{NavLink, PathMatch, Route, RouteMatch};

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Compara un patrón contra un pathname
pub fn match_path(pattern: &str, matching: PathMatch, pathname: &str) -> Option<RouteMatch> {
    let wanted = segments(pattern);
    let actual = segments(pathname);

    if actual.len() < wanted.len() {
        return None;
    }
    if matching == PathMatch::Exact && actual.len() != wanted.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (expected, got) in wanted.iter().zip(actual.iter()) {
        if let Some(name) = expected.strip_prefix(':') {
            params.insert(name.to_string(), (*got).to_string());
        } else if !expected.eq_ignore_ascii_case(got) {
            return None;
        }
    }

    let url = format!("/{}", actual[..wanted.len()].join("/"));
    Some(RouteMatch {
        path: pattern.to_string(),
        url,
        is_exact: actual.len() == wanted.len(),
        params,
    })
}

/// Primera ruta que coincide, en orden de declaración (no la "mejor")
pub fn first_match<'a>(routes: &'a [Route], pathname: &str) -> Option<(&'a Route, RouteMatch)> {
    routes.iter().find_map(|route| {
        match_path(route.path, route.matching, pathname).map(|m| (route, m))
    })
}

/// Un enlace está activo si su destino coincide con la URL actual
pub fn is_active(link: &NavLink, pathname: &str) -> bool {
    match_path(link.to, link.matching(), pathname).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViewId;
    use crate::router::routes::{NAV_LINKS, ROUTES};

    fn view_at(pathname: &str) -> Option<ViewId> {
        first_match(&ROUTES, pathname).map(|(route, _)| route.view)
    }

    #[test]
    fn every_declared_path_renders_one_view() {
        assert_eq!(view_at("/"), Some(ViewId::Home));
        assert_eq!(view_at("/about"), Some(ViewId::About));
        assert_eq!(view_at("/contact"), Some(ViewId::Contact));
    }

    #[test]
    fn root_is_exact() {
        assert_eq!(view_at("/foo"), None);
        assert_ne!(view_at("/about"), Some(ViewId::Home));
    }

    #[test]
    fn non_root_paths_match_by_prefix() {
        assert_eq!(view_at("/about/team"), Some(ViewId::About));
        assert_eq!(view_at("/contact/form/2"), Some(ViewId::Contact));
        assert_eq!(view_at("/about/"), Some(ViewId::About));
    }

    #[test]
    fn prefix_respects_segment_boundaries() {
        assert_eq!(view_at("/aboutus"), None);
    }

    #[test]
    fn literal_match_ignores_case() {
        assert_eq!(view_at("/About"), Some(ViewId::About));
    }

    #[test]
    fn first_declared_route_wins() {
        let routes = [
            Route { path: "/about", matching: PathMatch::Prefix, view: ViewId::About, value: "a" },
            Route { path: "/about/team", matching: PathMatch::Exact, view: ViewId::Contact, value: "b" },
        ];
        let (route, m) = first_match(&routes, "/about/team").unwrap();
        assert_eq!(route.value, "a");
        assert_eq!(m.url, "/about");
        assert!(!m.is_exact);
    }

    #[test]
    fn params_are_captured() {
        let m = match_path("/users/:id", PathMatch::Prefix, "/users/42/edit").unwrap();
        assert_eq!(m.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(m.url, "/users/42");
    }

    #[test]
    fn exactly_one_link_is_active() {
        let active_at = |path: &str| -> Vec<ViewId> {
            NAV_LINKS.iter().filter(|l| is_active(l, path)).map(|l| l.view).collect()
        };
        assert_eq!(active_at("/about"), vec![ViewId::About]);
        assert_eq!(active_at("/"), vec![ViewId::Home]);
        assert_eq!(active_at("/contact/x"), vec![ViewId::Contact]);
        assert!(active_at("/missing").is_empty());
    }
}
