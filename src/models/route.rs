// ============================================================================
// ROUTE MODEL - Declaraciones estáticas de rutas y lo que recibe cada vista
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

/// Vistas cargadas de forma diferida (una por chunk asíncrono)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
    Home,
    About,
    Contact,
}

impl ViewId {
    pub const ALL: [ViewId; 3] = [ViewId::Home, ViewId::About, ViewId::Contact];

    /// Nombre del chunk asíncrono que contiene la vista
    /// (mismo nombre que produce el planificador a partir del fichero importado)
    pub fn chunk_name(self) -> &'static str {
        match self {
            ViewId::Home => "home.component",
            ViewId::About => "about.component",
            ViewId::Contact => "contact.component",
        }
    }

    /// Texto del enlace en el menú
    pub fn label(self) -> &'static str {
        match self {
            ViewId::Home => "Home",
            ViewId::About => "About",
            ViewId::Contact => "Contact",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.chunk_name())
    }
}

/// Política de coincidencia de una ruta
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathMatch {
    /// Mismo número de segmentos
    Exact,
    /// El patrón es prefijo del path (por segmentos completos)
    Prefix,
}

/// Ruta declarada: patrón + vista + payload fijo
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub matching: PathMatch,
    pub view: ViewId,
    pub value: &'static str,
}

/// Enlace del menú de navegación
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub to: &'static str,
    pub view: ViewId,
    pub exact: bool,
}

impl NavLink {
    pub fn matching(&self) -> PathMatch {
        if self.exact {
            PathMatch::Exact
        } else {
            PathMatch::Prefix
        }
    }
}

/// Resultado de comparar un patrón contra el path actual
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteMatch {
    /// Patrón declarado
    pub path: String,
    /// Parte del path que coincidió
    pub url: String,
    pub is_exact: bool,
    /// Valores capturados por segmentos `:nombre`
    pub params: BTreeMap<String, String>,
}

/// URL actual del navegador (sin origin)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: String::new(),
            hash: String::new(),
        }
    }

    /// Separa `"/about?x=1#top"` en sus partes
    pub fn parse(href: &str) -> Self {
        let (rest, hash) = match href.find('#') {
            Some(i) => (&href[..i], href[i..].to_string()),
            None => (href, String::new()),
        };
        let (pathname, search) = match rest.find('?') {
            Some(i) => (&rest[..i], rest[i..].to_string()),
            None => (rest, String::new()),
        };
        let pathname = if pathname.is_empty() { "/" } else { pathname };
        Self {
            pathname: pathname.to_string(),
            search,
            hash,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

/// Propiedades que recibe una vista al renderizarse
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteProps {
    pub route_match: RouteMatch,
    pub location: Location,
    pub value: String,
}

impl RouteProps {
    /// Segmentos del path que quedan tras la parte que coincidió
    /// (`/about/team` con `/about` -> `team`)
    pub fn remaining_path(&self) -> String {
        let matched = self.route_match.url.split('/').filter(|s| !s.is_empty()).count();
        self.location
            .pathname
            .split('/')
            .filter(|s| !s.is_empty())
            .skip(matched)
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_parse_splits_search_and_hash() {
        let loc = Location::parse("/about/team?tab=2#bio");
        assert_eq!(loc.pathname, "/about/team");
        assert_eq!(loc.search, "?tab=2");
        assert_eq!(loc.hash, "#bio");
    }

    #[test]
    fn location_parse_defaults_to_root() {
        assert_eq!(Location::parse("").pathname, "/");
        assert_eq!(Location::parse("?q=1").pathname, "/");
    }

    fn props(url: &str, pathname: &str) -> RouteProps {
        RouteProps {
            route_match: RouteMatch { url: url.to_string(), ..Default::default() },
            location: Location::new(pathname),
            value: "2".to_string(),
        }
    }

    #[test]
    fn remaining_path_counts_segments_not_bytes() {
        assert_eq!(props("/about", "/about/team").remaining_path(), "team");
        assert_eq!(props("/about", "//about/team").remaining_path(), "team");
        assert_eq!(props("/about", "/about//team/").remaining_path(), "team");
        assert_eq!(props("/about", "/about").remaining_path(), "");
        assert_eq!(props("/", "/").remaining_path(), "");
    }

    #[test]
    fn chunk_names_are_unique() {
        let mut names: Vec<_> = ViewId::ALL.iter().map(|v| v.chunk_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);
    }
}
