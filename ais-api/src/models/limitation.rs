use serde::{Deserialize, Serialize};

use super::{Id, SensorType};

/// Threshold pair for one sensor type in one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limitation {
    /// Sensor type the thresholds apply to
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    /// Room the thresholds apply to
    pub room_id: Id,
    /// Upper bound
    pub max: i64,
    /// Lower bound
    pub min: i64,
}
