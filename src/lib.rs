// Library surface for headless/integration tests and reuse.
pub mod app_dirs;
pub mod board;
pub mod celebration;
pub mod chains;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod record;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod ui;

pub use error::{GameError, Result};
