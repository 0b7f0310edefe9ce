pub mod app;
pub mod nav_menu;
pub mod outlet;
pub mod pages;

pub use app::render_app;
pub use nav_menu::render_nav_menu;
pub use outlet::{render_outlet, render_placeholder};
