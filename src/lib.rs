pub mod app;
pub mod catalog;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use state::AppState;
pub use storage::{load_ledger, resolve_data_path};
