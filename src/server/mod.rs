//! HTTP server: routes, handlers and the server builder

pub mod builder;
pub mod forms;
pub mod handlers;
pub mod rest;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{ActionResponse, AppState, Flash};
pub use rest::RestExposure;
