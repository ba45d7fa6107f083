use ais_api::Id;
use ais_api::models::{Indication, IndicationStatus, Limitation, Sensor};
use ais_api::restful::{indications_by_sensor, limitations_by_room, sensor};
use ais_client::{ApiClient, TransportError};
use serde::de::DeserializeOwned;

use crate::errors::ConsoleError;

/// Readings of one sensor next to the thresholds that classify them.
#[derive(Debug, Clone)]
pub struct SensorOverview {
    pub sensor_id: Id,
    pub indications: Vec<Indication>,
    pub sensor: Option<Sensor>,
    /// Room limitation matching the sensor's type.
    pub limitation: Option<Limitation>,
}

impl SensorOverview {
    pub fn count(&self, status: IndicationStatus) -> usize {
        self.indications.iter().filter(|i| i.status == status).count()
    }

    pub fn latest(&self) -> Option<&Indication> {
        self.indications.iter().max_by(|a, b| a.time.cmp(&b.time))
    }
}

/// Indications are required; the sensor and limitation lookups are best
/// effort and come back empty when they fail, except on an expired session.
pub async fn sensor_overview<C>(client: &C, sensor_id: Id) -> Result<SensorOverview, ConsoleError>
where
    C: ApiClient + ?Sized,
{
    let indications: Vec<Indication> = fetch(client, &indications_by_sensor(sensor_id)).await?;

    let sensor: Option<Sensor> = optional(fetch(client, &sensor(sensor_id)).await, "sensor")?;

    let limitation = match &sensor {
        Some(sensor) => {
            let limitations: Option<Vec<Limitation>> =
                optional(fetch(client, &limitations_by_room(sensor.room_id)).await, "limitations")?;
            limitations
                .unwrap_or_default()
                .into_iter()
                .find(|l| l.sensor_type == sensor.sensor_type)
        }
        None => None,
    };

    Ok(SensorOverview {
        sensor_id,
        indications,
        sensor,
        limitation,
    })
}

async fn fetch<C, T>(client: &C, path: &str) -> Result<T, TransportError>
where
    C: ApiClient + ?Sized,
    T: DeserializeOwned,
{
    let body = client.get(path).await?;
    Ok(serde_json::from_value(body)?)
}

fn optional<T>(result: Result<T, TransportError>, what: &str) -> Result<Option<T>, ConsoleError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_auth_expired() => Err(e.into()),
        Err(e) => {
            tracing::warn!("{what} lookup failed: {e}");
            Ok(None)
        }
    }
}
