pub mod app;
pub mod build_menu;
pub mod field_view;
pub mod navbar;
pub mod node_dialog;
pub mod production_menu;

pub use app::App;
