pub mod analysis;
pub mod config;
pub mod error;
pub mod nlp;
pub mod page;
pub mod render;
pub mod routes;
pub mod state;
pub mod translate;

pub use analysis::{Analysis, Analyzer};
pub use config::Config;
pub use error::AppError;
pub use routes::create_routes;
pub use state::AppState;
