pub mod route;
pub mod chunk;

pub use route::{Location, NavLink, PathMatch, Route, RouteMatch, RouteProps, ViewId};
pub use chunk::{ChunkError, ChunkManifest, CHUNK_GLOBAL};
