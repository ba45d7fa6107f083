pub mod models;
pub mod record;
pub mod restful;

pub use models::Id;
pub use record::{FieldValue, Record};
