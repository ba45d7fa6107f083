mod error;
mod routes;

pub use error::*;
pub use routes::*;
