pub mod doh;
pub mod health;

pub use doh::{doh_get, doh_post, method_not_allowed};
pub use health::health_check;
