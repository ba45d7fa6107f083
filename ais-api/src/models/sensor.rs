use std::fmt;

use serde::{Deserialize, Serialize};

use super::Id;

/// Measured quantity. Labels are the backend's enum values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorType {
    #[serde(rename = "Температура")]
    Temperature,
    #[serde(rename = "Влажность")]
    Humidity,
    #[serde(rename = "Задымленность")]
    Smoke,
}

impl SensorType {
    pub const ALL: [SensorType; 3] = [SensorType::Temperature, SensorType::Humidity, SensorType::Smoke];

    pub fn label(&self) -> &'static str {
        match self {
            SensorType::Temperature => "Температура",
            SensorType::Humidity => "Влажность",
            SensorType::Smoke => "Задымленность",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    /// Sensor identifier
    pub id: Id,
    /// Room the sensor is installed in
    pub room_id: Id,
    /// Measured quantity
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    /// Whether readings are accepted
    pub active: bool,
}
