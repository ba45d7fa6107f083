use std::sync::Arc;

use ais_api::models::{SensorType, UserRole};
use ais_api::restful::*;

use super::descriptor::*;

/// One shared descriptor per entity kind.
#[derive(Debug, Clone)]
pub struct Catalog {
    descriptors: [Arc<Descriptor>; 7],
}

impl Catalog {
    pub fn standard() -> Self {
        Self {
            descriptors: EntityKind::ALL.map(|kind| Arc::new(descriptor(kind))),
        }
    }

    pub fn get(&self, kind: EntityKind) -> Arc<Descriptor> {
        self.descriptors[kind as usize].clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Descriptor>> {
        self.descriptors.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn descriptor(kind: EntityKind) -> Descriptor {
    match kind {
        EntityKind::Companies => companies(),
        EntityKind::Rooms => rooms(),
        EntityKind::Users => users(),
        EntityKind::Sensors => sensors(),
        EntityKind::Limitations => limitations(),
        EntityKind::Events => events(),
        EntityKind::Indications => indications(),
    }
}

fn sensor_types() -> impl Iterator<Item = &'static str> {
    SensorType::ALL.into_iter().map(|t| t.label())
}

fn user_roles() -> impl Iterator<Item = &'static str> {
    UserRole::ALL.into_iter().map(|r| r.label())
}

fn companies() -> Descriptor {
    Descriptor {
        kind: EntityKind::Companies,
        title: "Companies",
        noun: "company",
        columns: vec![Column::plain("id"), Column::plain("name"), Column::plain("address")],
        identity: Identity::single("id"),
        create_fields: vec![
            FieldSpec::text("name", "Name").required(),
            FieldSpec::text("address", "Address").required(),
        ],
        edit_fields: vec![
            FieldSpec::text("name", "Name"),
            FieldSpec::text("address", "Address"),
        ],
        filter: FilterKind::None,
        routes: Routes {
            list: COMPANIES,
            create: Some(COMPANIES),
            update: Some(ItemRoute::path(COMPANY)),
            delete: Some(ItemRoute::path(COMPANY)),
        },
    }
}

fn rooms() -> Descriptor {
    Descriptor {
        kind: EntityKind::Rooms,
        title: "Rooms",
        noun: "room",
        columns: vec![
            Column::plain("id"),
            Column::plain("company_id"),
            Column::plain("number"),
            Column::plain("name"),
            Column::plain("description"),
        ],
        identity: Identity::single("id"),
        create_fields: vec![
            FieldSpec::number("company_id", "Company ID").required(),
            FieldSpec::number("number", "Number").required(),
            FieldSpec::text("name", "Name").required(),
            FieldSpec::text("description", "Description"),
        ],
        edit_fields: vec![
            FieldSpec::number("company_id", "Company ID").locked(),
            FieldSpec::number("number", "Number"),
            FieldSpec::text("name", "Name"),
            FieldSpec::text("description", "Description"),
        ],
        filter: FilterKind::CompanyId,
        routes: Routes {
            list: ROOMS_BY_COMPANY,
            create: Some(ROOMS),
            update: Some(ItemRoute::path(ROOM)),
            delete: Some(ItemRoute::path(ROOM)),
        },
    }
}

fn users() -> Descriptor {
    Descriptor {
        kind: EntityKind::Users,
        title: "Users",
        noun: "user",
        columns: vec![
            Column::plain("id"),
            Column::plain("company_id"),
            Column::plain("code"),
            Column::plain("full_name"),
            Column::plain("role"),
            Column::plain("login"),
        ],
        identity: Identity::single("id"),
        create_fields: vec![
            FieldSpec::number("company_id", "Company ID").required(),
            FieldSpec::number("code", "Code").required(),
            FieldSpec::text("full_name", "Full name").required(),
            FieldSpec::text("login", "Login").required(),
            FieldSpec::password("password", "Password").required(),
            FieldSpec::select("role", "Role", user_roles()).required(),
        ],
        edit_fields: vec![
            FieldSpec::number("company_id", "Company ID").locked(),
            FieldSpec::number("code", "Code"),
            FieldSpec::text("full_name", "Full name"),
            FieldSpec::text("login", "Login"),
            FieldSpec::password("password", "Password"),
            FieldSpec::select("role", "Role", user_roles()),
        ],
        filter: FilterKind::CompanyId,
        routes: Routes {
            list: USERS_BY_COMPANY,
            create: Some(USERS),
            update: Some(ItemRoute::path(USER)),
            delete: Some(ItemRoute::path(USER)),
        },
    }
}

fn sensors() -> Descriptor {
    Descriptor {
        kind: EntityKind::Sensors,
        title: "Sensors",
        noun: "sensor",
        columns: vec![
            Column::plain("id"),
            Column::plain("room_id"),
            Column::plain("type"),
            Column::badge("active", "ACTIVE", "INACTIVE"),
        ],
        identity: Identity::single("id"),
        create_fields: vec![
            FieldSpec::number("room_id", "Room ID").required(),
            FieldSpec::select("type", "Type", sensor_types()).required(),
            FieldSpec::boolean("active", "Active", "Active", "Inactive"),
        ],
        edit_fields: vec![
            FieldSpec::number("room_id", "Room ID").locked(),
            FieldSpec::select("type", "Type", sensor_types()),
            FieldSpec::boolean("active", "Active", "Active", "Inactive"),
        ],
        filter: FilterKind::RoomId,
        routes: Routes {
            list: SENSORS_BY_ROOM,
            create: Some(SENSORS),
            update: Some(ItemRoute::path(SENSOR)),
            delete: Some(ItemRoute::path(SENSOR)),
        },
    }
}

fn limitations() -> Descriptor {
    Descriptor {
        kind: EntityKind::Limitations,
        title: "Limitations",
        noun: "limitation",
        columns: vec![
            Column::plain("type"),
            Column::plain("room_id"),
            Column::plain("max"),
            Column::plain("min"),
        ],
        identity: Identity::composite("type", "room_id"),
        create_fields: vec![
            FieldSpec::select("type", "Type", sensor_types()).required(),
            FieldSpec::number("room_id", "Room ID").required(),
            FieldSpec::number("max", "Maximum").required(),
            FieldSpec::number("min", "Minimum").required(),
        ],
        edit_fields: vec![
            FieldSpec::select("type", "Type", sensor_types()).locked(),
            FieldSpec::number("room_id", "Room ID").locked(),
            FieldSpec::number("max", "Maximum"),
            FieldSpec::number("min", "Minimum"),
        ],
        filter: FilterKind::RoomId,
        routes: Routes {
            list: LIMITATIONS_BY_ROOM,
            create: Some(LIMITATIONS),
            update: Some(ItemRoute::path(LIMITATION)),
            delete: Some(ItemRoute::path(LIMITATION)),
        },
    }
}

// The backend addresses an event by sensor only and takes `time` from the body.
fn events() -> Descriptor {
    Descriptor {
        kind: EntityKind::Events,
        title: "Events",
        noun: "event",
        columns: vec![
            Column::plain("sensor_id"),
            Column::plain("time"),
            Column::badge("eliminated", "ELIMINATED", "NOT ELIMINATED"),
            Column::plain("description"),
        ],
        identity: Identity::composite("sensor_id", "time"),
        create_fields: Vec::new(),
        edit_fields: vec![
            FieldSpec::number("sensor_id", "Sensor ID").locked(),
            FieldSpec::text("time", "Time").locked(),
            FieldSpec::boolean("eliminated", "Eliminated", "Eliminated", "Not eliminated"),
            FieldSpec::text("description", "Description"),
        ],
        filter: FilterKind::SensorId,
        routes: Routes {
            list: EVENTS_BY_SENSOR,
            create: None,
            update: Some(ItemRoute::path(EVENTS_BY_SENSOR).with_body_key("time")),
            delete: None,
        },
    }
}

/// Readings are produced by the sensors themselves and are never edited here.
fn indications() -> Descriptor {
    Descriptor {
        kind: EntityKind::Indications,
        title: "Indications",
        noun: "indication",
        columns: vec![
            Column::plain("sensor_id"),
            Column::plain("time"),
            Column::plain("value"),
            Column::plain("status"),
        ],
        identity: Identity::composite("sensor_id", "time"),
        create_fields: Vec::new(),
        edit_fields: Vec::new(),
        filter: FilterKind::SensorId,
        routes: Routes {
            list: INDICATIONS_BY_SENSOR,
            create: None,
            update: None,
            delete: None,
        },
    }
}
