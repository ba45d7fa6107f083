pub mod dashboard;
pub mod gateway;
pub mod overview;

pub use dashboard::{Dashboard, Dataset, Refresh};
pub use gateway::{EntityGateway, RestGateway};
pub use overview::{SensorOverview, sensor_overview};
