use std::sync::Arc;

use ais_api::{FieldValue, Record};
use ais_console::entity::catalog::descriptor;
use ais_console::entity::descriptor::EntityKind;
use ais_console::entity::filter::{FilterState, Scope};
use ais_console::entity::manager::EntityManager;
use ais_console::entity::modal::{ModalKind, Phase};
use ais_console::errors::{ConsoleError, ValidationError};
use pretty_assertions::assert_eq;

mod common;
use common::mock_gateway::{Call, MockGateway, MockRefresh};

fn manager(kind: EntityKind) -> EntityManager {
    EntityManager::new(Arc::new(descriptor(kind)))
}

fn record<const N: usize>(fields: [(&str, FieldValue); N]) -> Record {
    fields.into_iter().collect()
}

#[tokio::test]
async fn test_create_room_coerces_and_refreshes_parent() {
    let gateway = MockGateway::new();
    let refresh = MockRefresh::new();
    let mut rooms = manager(EntityKind::Rooms);

    rooms.open_create().unwrap();
    rooms.set_field("company_id", "7").unwrap();
    rooms.set_field("number", "3").unwrap();
    rooms.set_field("name", "Server Room").unwrap();
    rooms.submit(&gateway, &refresh).await.unwrap();

    assert_eq!(
        gateway.calls(),
        vec![Call::Create(
            EntityKind::Rooms,
            record([
                ("company_id", FieldValue::Integer(7)),
                ("number", FieldValue::Integer(3)),
                ("name", FieldValue::from("Server Room")),
            ])
        )]
    );
    assert_eq!(refresh.requests(), vec![(EntityKind::Rooms, Scope::Parent(7))]);
    assert!(!rooms.modal().is_open());
    assert_eq!(rooms.filter().state(), &FilterState::Filtered(7));
}

#[tokio::test]
async fn test_delete_limitation_passes_composite_identity() {
    let gateway = MockGateway::new();
    let refresh = MockRefresh::new();
    let mut limitations = manager(EntityKind::Limitations);

    let limitation = record([
        ("type", FieldValue::from("Температура")),
        ("room_id", FieldValue::Integer(4)),
        ("max", FieldValue::Integer(30)),
        ("min", FieldValue::Integer(10)),
    ]);
    limitations.open_delete(&limitation).unwrap();
    limitations.submit(&gateway, &refresh).await.unwrap();

    assert_eq!(
        gateway.calls(),
        vec![Call::Delete(
            EntityKind::Limitations,
            vec![FieldValue::from("Температура"), FieldValue::Integer(4)]
        )]
    );
    assert_eq!(refresh.requests(), vec![(EntityKind::Limitations, Scope::Parent(4))]);
}

#[tokio::test]
async fn test_single_identity_update_passes_one_argument() {
    let gateway = MockGateway::new();
    let refresh = MockRefresh::new();
    let mut companies = manager(EntityKind::Companies);

    companies
        .open_edit(&record([
            ("id", FieldValue::Integer(2)),
            ("name", FieldValue::from("Acme")),
            ("address", FieldValue::from("Main st.")),
        ]))
        .unwrap();
    companies.set_field("name", "Acme Ltd").unwrap();
    companies.submit(&gateway, &refresh).await.unwrap();

    let calls = gateway.calls();
    let Call::Update(kind, key, payload) = &calls[0] else {
        panic!("expected an update, got {calls:?}");
    };
    assert_eq!(*kind, EntityKind::Companies);
    assert_eq!(key, &vec![FieldValue::Integer(2)]);
    assert_eq!(payload.get("name"), Some(&FieldValue::from("Acme Ltd")));
    assert_eq!(refresh.requests(), vec![(EntityKind::Companies, Scope::All)]);
}

#[tokio::test]
async fn test_edit_event_uses_sensor_and_time() {
    let gateway = MockGateway::new();
    let refresh = MockRefresh::new();
    let mut events = manager(EntityKind::Events);
    events.enter_filter("5");

    events
        .open_edit(&record([
            ("sensor_id", FieldValue::Integer(5)),
            ("time", FieldValue::from("2024-03-01T10:00:00")),
            ("eliminated", FieldValue::Bool(false)),
            ("description", FieldValue::from("smoke")),
        ]))
        .unwrap();
    events.set_field("eliminated", "true").unwrap();
    events.submit(&gateway, &refresh).await.unwrap();

    assert_eq!(
        gateway.calls(),
        vec![Call::Update(
            EntityKind::Events,
            vec![FieldValue::Integer(5), FieldValue::from("2024-03-01T10:00:00")],
            record([
                ("sensor_id", FieldValue::Integer(5)),
                ("time", FieldValue::from("2024-03-01T10:00:00")),
                ("eliminated", FieldValue::Bool(true)),
                ("description", FieldValue::from("smoke")),
            ])
        )]
    );
    assert_eq!(refresh.requests(), vec![(EntityKind::Events, Scope::Parent(5))]);
}

#[tokio::test]
async fn test_edit_sensor_keeps_room_locked() {
    let gateway = MockGateway::new();
    let refresh = MockRefresh::new();
    let mut sensors = manager(EntityKind::Sensors);

    sensors
        .open_edit(&record([
            ("id", FieldValue::Integer(11)),
            ("room_id", FieldValue::Integer(4)),
            ("type", FieldValue::from("Температура")),
            ("active", FieldValue::Bool(true)),
        ]))
        .unwrap();

    let form = sensors.form().unwrap();
    assert!(form.fields.iter().any(|f| f.name == "room_id" && f.disabled));
    assert_eq!(
        sensors.set_field("room_id", "8"),
        Err(ValidationError::FieldLocked("room_id"))
    );

    sensors.set_field("type", "Влажность").unwrap();
    sensors.submit(&gateway, &refresh).await.unwrap();

    assert_eq!(
        gateway.calls(),
        vec![Call::Update(
            EntityKind::Sensors,
            vec![FieldValue::Integer(11)],
            record([
                ("room_id", FieldValue::Integer(4)),
                ("type", FieldValue::from("Влажность")),
                ("active", FieldValue::Bool(true)),
            ])
        )]
    );
}

#[tokio::test]
async fn test_boolean_survives_unchanged_edit() {
    let gateway = MockGateway::new();
    let refresh = MockRefresh::new();
    let mut sensors = manager(EntityKind::Sensors);

    sensors
        .open_edit(&record([
            ("id", FieldValue::Integer(1)),
            ("room_id", FieldValue::Integer(2)),
            ("type", FieldValue::from("Задымленность")),
            ("active", FieldValue::Bool(true)),
        ]))
        .unwrap();
    assert_eq!(sensors.modal().draft().and_then(|d| d.get("active")), Some("true"));

    sensors.submit(&gateway, &refresh).await.unwrap();

    let Call::Update(_, _, payload) = &gateway.calls()[0] else {
        panic!("expected an update");
    };
    assert_eq!(payload.get("active"), Some(&FieldValue::Bool(true)));
}

#[tokio::test]
async fn test_non_numeric_create_sends_zero() {
    let gateway = MockGateway::new();
    let refresh = MockRefresh::new();
    let mut limitations = manager(EntityKind::Limitations);
    limitations.enter_filter("4");

    limitations.open_create().unwrap();
    limitations.set_field("type", "Влажность").unwrap();
    limitations.set_field("room_id", "4").unwrap();
    limitations.set_field("max", "high").unwrap();
    limitations.set_field("min", "10").unwrap();
    limitations.submit(&gateway, &refresh).await.unwrap();

    let Call::Create(_, payload) = &gateway.calls()[0] else {
        panic!("expected a create");
    };
    assert_eq!(payload.get("max"), Some(&FieldValue::Integer(0)));
    assert_eq!(payload.get("min"), Some(&FieldValue::Integer(10)));
}

#[tokio::test]
async fn test_rejected_create_keeps_modal_open() {
    let gateway = MockGateway::rejecting(422, "field required");
    let refresh = MockRefresh::new();
    let mut companies = manager(EntityKind::Companies);

    companies.open_create().unwrap();
    companies.set_field("name", "Acme").unwrap();
    companies.set_field("address", "Main st.").unwrap();

    let error = companies.submit(&gateway, &refresh).await.unwrap_err();

    assert_eq!(error.to_string(), "field required");
    assert_eq!(companies.modal().kind(), Some(ModalKind::Create));
    assert_eq!(companies.modal().phase(), Some(Phase::Open));
    assert_eq!(companies.modal().draft().and_then(|d| d.get("name")), Some("Acme"));
    assert!(refresh.requests().is_empty());

    gateway.accept();
    companies.submit(&gateway, &refresh).await.unwrap();
    assert!(!companies.modal().is_open());
    assert_eq!(gateway.calls().len(), 2);
}

#[tokio::test]
async fn test_missing_required_field_issues_no_call() {
    let gateway = MockGateway::new();
    let refresh = MockRefresh::new();
    let mut users = manager(EntityKind::Users);

    users.open_create().unwrap();
    users.set_field("company_id", "1").unwrap();
    users.set_field("login", "op").unwrap();

    let error = users.submit(&gateway, &refresh).await.unwrap_err();

    assert!(matches!(
        error,
        ConsoleError::Validation(ValidationError::MissingFields(ref fields))
            if fields == &vec!["code", "full_name", "password", "role"]
    ));
    assert!(gateway.calls().is_empty());
    assert_eq!(users.modal().phase(), Some(Phase::Open));
}

#[tokio::test]
async fn test_empty_filter_refresh_is_rejected_locally() {
    let refresh = MockRefresh::new();

    for kind in [
        EntityKind::Rooms,
        EntityKind::Users,
        EntityKind::Sensors,
        EntityKind::Limitations,
        EntityKind::Events,
        EntityKind::Indications,
    ] {
        let mut section = manager(kind);
        let error = section.refresh(&refresh).await.unwrap_err();
        assert!(
            matches!(error, ConsoleError::Validation(ValidationError::MissingFilter { .. })),
            "{kind}: {error}"
        );
    }

    assert!(refresh.requests().is_empty());

    let mut companies = manager(EntityKind::Companies);
    assert_eq!(companies.refresh(&refresh).await.unwrap(), Scope::All);
    assert_eq!(refresh.requests(), vec![(EntityKind::Companies, Scope::All)]);
}

#[tokio::test]
async fn test_non_numeric_filter_is_rejected_locally() {
    let refresh = MockRefresh::new();

    for (kind, input) in [
        (EntityKind::Rooms, ".."),
        (EntityKind::Users, "abc"),
        (EntityKind::Sensors, r"1\2"),
        (EntityKind::Sensors, r"..\..\user\1"),
    ] {
        let mut section = manager(kind);
        section.enter_filter(input);

        let error = section.refresh(&refresh).await.unwrap_err();

        assert!(
            matches!(
                error,
                ConsoleError::Validation(ValidationError::InvalidFilter { ref value, .. }) if value == input
            ),
            "{kind}: {error}"
        );
        assert_eq!(section.filter().state(), &FilterState::Unfiltered);
    }

    assert!(refresh.requests().is_empty());
}

#[tokio::test]
async fn test_create_with_unparsed_parent_skips_refresh() {
    let gateway = MockGateway::new();
    let refresh = MockRefresh::new();
    let mut rooms = manager(EntityKind::Rooms);

    rooms.open_create().unwrap();
    rooms.set_field("company_id", "acme").unwrap();
    rooms.set_field("number", "3").unwrap();
    rooms.set_field("name", "Lab").unwrap();
    rooms.submit(&gateway, &refresh).await.unwrap();

    let Call::Create(_, payload) = &gateway.calls()[0] else {
        panic!("expected a create");
    };
    assert_eq!(payload.get("company_id"), Some(&FieldValue::Integer(0)));
    assert!(refresh.requests().is_empty());
    assert_eq!(rooms.filter().input(), "");
    assert_eq!(rooms.filter().state(), &FilterState::Unfiltered);
    assert!(!rooms.modal().is_open());
}

#[tokio::test]
async fn test_refresh_uses_current_filter_over_record_parent() {
    let gateway = MockGateway::new();
    let refresh = MockRefresh::new();
    let mut sensors = manager(EntityKind::Sensors);
    sensors.enter_filter("9");

    sensors
        .open_delete(&record([("id", FieldValue::Integer(1)), ("room_id", FieldValue::Integer(4))]))
        .unwrap();
    sensors.submit(&gateway, &refresh).await.unwrap();

    assert_eq!(refresh.requests(), vec![(EntityKind::Sensors, Scope::Parent(9))]);
}

#[tokio::test]
async fn test_second_modal_is_refused() {
    let mut rooms = manager(EntityKind::Rooms);
    rooms.open_create().unwrap();

    let room = record([("id", FieldValue::Integer(1)), ("company_id", FieldValue::Integer(7))]);
    assert_eq!(rooms.open_edit(&room), Err(ValidationError::ModalOpen));

    rooms.close();
    rooms.open_edit(&room).unwrap();
    assert_eq!(rooms.modal().kind(), Some(ModalKind::Edit));
}
