pub mod dto;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use errors::ApiError;
pub use routes::{create_doh_routes, RouteSettings};
pub use state::AppState;
