pub mod config;
pub mod constants;
pub mod mirror;
pub mod routes;

pub use config::{Args, MirrorKind};
pub use mirror::MirrorHandle;
pub use routes::{router, AppState};
