pub mod errors;
pub mod routes;

pub use errors::ErrorResponse;
pub use routes::{router, SharedService};
