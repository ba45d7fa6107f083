//! Backend paths. Templates name their placeholders after the record field
//! that fills them, so `{room_id}` is taken from a record's `room_id`.

use crate::Id;

pub const COMPANIES: &str = "/api/company";
pub const COMPANY: &str = "/api/company/{id}";

pub const ROOMS: &str = "/api/room";
pub const ROOM: &str = "/api/room/{id}";
pub const ROOMS_BY_COMPANY: &str = "/api/room/company/{company_id}";

pub const USERS: &str = "/api/user";
pub const USER: &str = "/api/user/{id}";
pub const USERS_BY_COMPANY: &str = "/api/user/company/{company_id}";

pub const SENSORS: &str = "/api/sensor";
pub const SENSOR: &str = "/api/sensor/{id}";
pub const SENSORS_BY_ROOM: &str = "/api/sensor/room/{room_id}";

pub const LIMITATIONS: &str = "/api/limitation";
pub const LIMITATION: &str = "/api/limitation/{type}/{room_id}";
pub const LIMITATIONS_BY_ROOM: &str = "/api/limitation/room/{room_id}";

pub const EVENTS_BY_SENSOR: &str = "/api/event/sensor/{sensor_id}";

pub const INDICATIONS_BY_SENSOR: &str = "/api/indication/sensor/{sensor_id}";

/// Substitutes every `{name}` in `template` with the matching value,
/// percent-encoded as a single path segment. Placeholders without a value
/// are left untouched.
pub fn expand<'a, I>(template: &str, values: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    values.into_iter().fold(template.to_string(), |path, (name, value)| {
        path.replace(&format!("{{{name}}}"), &urlencoding::encode(&value))
    })
}

pub fn sensor(id: Id) -> String {
    expand(SENSOR, [("id", id.to_string())])
}

pub fn limitations_by_room(room_id: Id) -> String {
    expand(LIMITATIONS_BY_ROOM, [("room_id", room_id.to_string())])
}

pub fn indications_by_sensor(sensor_id: Id) -> String {
    expand(INDICATIONS_BY_SENSOR, [("sensor_id", sensor_id.to_string())])
}
