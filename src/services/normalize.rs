use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::models::{AppointmentKind, AppointmentStatus, AppointmentView, ServiceLine};

// Field probing over raw upstream records. The backend emits several
// casings and nesting shapes for the same logical value; every function
// here is pure, never panics, and represents absence as `None`.

/// First non-empty string among `keys`, trimmed.
fn text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        value
            .get(*k)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// First nested object among `keys`.
fn nested<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| value.get(*k))
        .find(|v| v.is_object())
}

/// Integer field, tolerating numeric strings.
fn integer(value: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().filter_map(|k| value.get(*k)).find_map(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Price field, tolerating numeric strings.
fn number(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().filter_map(|k| value.get(*k)).find_map(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Customer display name: explicit field first, then the nested user
/// object (username, full name, synthesized first+last), finally the
/// stringified object itself.
pub fn customer_name(record: &Value) -> Option<String> {
    if let Some(name) = text(record, &["customerName", "CustomerName", "customer_name"]) {
        return Some(name);
    }
    let user = nested(record, &["user", "customer", "Customer"])?;
    if let Some(name) = text(user, &["username", "userName", "fullName", "full_name", "name"]) {
        return Some(name);
    }
    let first = text(user, &["firstName", "first_name"]);
    let last = text(user, &["lastName", "last_name"]);
    if first.is_some() || last.is_some() {
        let joined = format!(
            "{} {}",
            first.unwrap_or_default(),
            last.unwrap_or_default()
        );
        return Some(joined.trim().to_string());
    }
    Some(user.to_string())
}

pub fn customer_email(record: &Value) -> Option<String> {
    text(record, &["customerEmail", "customer_email", "email"]).or_else(|| {
        nested(record, &["user", "customer", "Customer"])
            .and_then(|user| text(user, &["email", "Email"]))
    })
}

pub fn vehicle_plate(record: &Value) -> Option<String> {
    text(record, &["vehiclePlate", "licensePlate", "plate", "vehicle_plate"]).or_else(|| {
        nested(record, &["vehicle", "Vehicle", "car"])
            .and_then(|vehicle| text(vehicle, &["plate", "licensePlate", "plateNumber", "registration"]))
    })
}

pub fn vehicle_model(record: &Value) -> Option<String> {
    text(record, &["vehicleModel", "vehicle_model"]).or_else(|| {
        nested(record, &["vehicle", "Vehicle", "car"])
            .and_then(|vehicle| text(vehicle, &["model", "name"]))
    })
}

/// Ordered service line items: package items first, then custom
/// additions, duplicates preserved.
pub fn service_lines(record: &Value) -> Vec<ServiceLine> {
    let mut lines = Vec::new();
    if let Some(package) = nested(record, &["package", "servicePackage", "Package"]) {
        collect_lines(
            package.get("services").or_else(|| package.get("items")),
            &mut lines,
        );
    }
    collect_lines(
        record
            .get("customServices")
            .or_else(|| record.get("custom_services"))
            .or_else(|| record.get("services")),
        &mut lines,
    );
    lines
}

fn collect_lines(items: Option<&Value>, out: &mut Vec<ServiceLine>) {
    let Some(items) = items.and_then(Value::as_array) else {
        return;
    };
    for item in items {
        match item {
            Value::String(s) if !s.trim().is_empty() => out.push(ServiceLine {
                title: s.trim().to_string(),
                price: None,
            }),
            Value::Object(_) => {
                if let Some(title) = text(item, &["title", "name", "serviceName"]) {
                    out.push(ServiceLine {
                        title,
                        price: number(item, &["price", "Price", "cost"]),
                    });
                }
            }
            _ => {}
        }
    }
}

/// Comma-joined service summary. A flat `service` field wins; otherwise
/// the line items are flattened in encounter order.
pub fn service_summary(record: &Value) -> Option<String> {
    if let Some(service) = text(record, &["service", "serviceName", "service_name"]) {
        return Some(service);
    }
    let titles: Vec<String> = service_lines(record)
        .into_iter()
        .map(|line| line.title)
        .collect();
    if titles.is_empty() {
        None
    } else {
        Some(titles.join(", "))
    }
}

fn parse_schedule(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    None
}

pub fn normalize_appointment(record: &Value) -> AppointmentView {
    let status_label = text(record, &["status", "Status", "appointmentStatus"]);
    let scheduled_at = text(
        record,
        &["appointmentDate", "scheduledAt", "startTime", "date", "start_time"],
    );

    AppointmentView {
        id: integer(record, &["id", "appointmentID", "appointmentId", "ID"]),
        kind: text(record, &["type", "Type", "appointmentType"])
            .as_deref()
            .and_then(AppointmentKind::parse),
        status: status_label.as_deref().and_then(AppointmentStatus::parse),
        status_label,
        customer_name: customer_name(record),
        customer_email: customer_email(record),
        vehicle_plate: vehicle_plate(record),
        vehicle_model: vehicle_model(record),
        scheduled_time: scheduled_at.as_deref().and_then(parse_schedule),
        scheduled_at,
        completed_at: text(record, &["endTime", "completedAt", "end_time"]),
        total_price: number(record, &["totalPrice", "total_price", "price", "total"]),
        services: service_summary(record),
        service_lines: service_lines(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_display_name_wins() {
        let record = json!({
            "customerName": "Ana Petrović",
            "user": { "firstName": "Someone", "lastName": "Else" }
        });
        assert_eq!(customer_name(&record), Some("Ana Petrović".to_string()));
    }

    #[test]
    fn test_name_synthesized_from_first_and_last() {
        let record = json!({
            "user": { "firstName": "Marko", "lastName": "Kovač" }
        });
        assert_eq!(customer_name(&record), Some("Marko Kovač".to_string()));
    }

    #[test]
    fn test_synthesized_name_is_trimmed() {
        let record = json!({ "user": { "firstName": "Marko" } });
        assert_eq!(customer_name(&record), Some("Marko".to_string()));

        let record = json!({ "user": { "lastName": "Kovač" } });
        assert_eq!(customer_name(&record), Some("Kovač".to_string()));
    }

    #[test]
    fn test_username_preferred_over_first_last() {
        let record = json!({
            "user": { "username": "mkovac", "firstName": "Marko", "lastName": "Kovač" }
        });
        assert_eq!(customer_name(&record), Some("mkovac".to_string()));
    }

    #[test]
    fn test_nameless_user_object_is_stringified() {
        let record = json!({ "user": { "id": 9 } });
        assert_eq!(customer_name(&record), Some(r#"{"id":9}"#.to_string()));
    }

    #[test]
    fn test_no_candidate_yields_none() {
        assert_eq!(customer_name(&json!({ "id": 1 })), None);
        assert_eq!(vehicle_plate(&json!({ "id": 1 })), None);
        assert_eq!(service_summary(&json!({ "id": 1 })), None);
    }

    #[test]
    fn test_vehicle_fields_probe_nested_object() {
        let record = json!({
            "vehicle": { "plate": "ZG-1234-AB", "model": "Golf VII" }
        });
        assert_eq!(vehicle_plate(&record), Some("ZG-1234-AB".to_string()));
        assert_eq!(vehicle_model(&record), Some("Golf VII".to_string()));
    }

    #[test]
    fn test_flat_service_field_wins() {
        let record = json!({
            "service": "Oil change",
            "services": [{ "title": "Ignored", "price": 10 }]
        });
        assert_eq!(service_summary(&record), Some("Oil change".to_string()));
    }

    #[test]
    fn test_package_items_come_first_without_dedup() {
        let record = json!({
            "package": {
                "services": [
                    { "title": "Oil change", "price": 45.0 },
                    { "title": "Brake check", "price": 30.0 }
                ]
            },
            "customServices": [
                { "title": "Oil change", "price": 45.0 },
                { "title": "Tire rotation", "price": 25.0 }
            ]
        });
        assert_eq!(
            service_summary(&record),
            Some("Oil change, Brake check, Oil change, Tire rotation".to_string())
        );
    }

    #[test]
    fn test_string_line_items_are_accepted() {
        let record = json!({ "services": ["Detailing", "  ", "Polish"] });
        assert_eq!(
            service_lines(&record),
            vec![
                ServiceLine { title: "Detailing".to_string(), price: None },
                ServiceLine { title: "Polish".to_string(), price: None },
            ]
        );
    }

    #[test]
    fn test_prices_tolerate_numeric_strings() {
        let record = json!({ "services": [{ "name": "Wash", "price": "12.50" }] });
        assert_eq!(service_lines(&record)[0].price, Some(12.5));
        assert_eq!(number(&json!({ "totalPrice": "99" }), &["totalPrice"]), Some(99.0));
    }

    #[test]
    fn test_normalize_full_record() {
        let record = json!({
            "id": "42",
            "type": "Service",
            "status": "Pending",
            "appointmentDate": "2025-03-14T09:30:00Z",
            "totalPrice": 75.0,
            "user": { "firstName": "Iva", "lastName": "Horvat", "email": "iva@example.com" },
            "vehicle": { "plate": "ST-777-XY", "model": "Octavia" },
            "services": [{ "title": "Oil change", "price": 45.0 }, { "title": "Brake check", "price": 30.0 }]
        });
        let view = normalize_appointment(&record);
        assert_eq!(view.id, Some(42));
        assert_eq!(view.kind, Some(AppointmentKind::Service));
        assert_eq!(view.status, Some(AppointmentStatus::Pending));
        assert_eq!(view.status_label.as_deref(), Some("Pending"));
        assert_eq!(view.customer_name.as_deref(), Some("Iva Horvat"));
        assert_eq!(view.customer_email.as_deref(), Some("iva@example.com"));
        assert_eq!(view.vehicle_plate.as_deref(), Some("ST-777-XY"));
        assert_eq!(view.services.as_deref(), Some("Oil change, Brake check"));
        assert!(view.scheduled_time.is_some());
    }

    #[test]
    fn test_unknown_status_label_is_preserved() {
        let view = normalize_appointment(&json!({ "id": 1, "status": "OnHold" }));
        assert_eq!(view.status, None);
        assert_eq!(view.status_label.as_deref(), Some("OnHold"));
    }

    #[test]
    fn test_normalizer_is_idempotent() {
        let record = json!({
            "id": 7,
            "status": "Approved",
            "user": { "firstName": "Pero", "lastName": "Perić" },
            "package": { "services": [{ "title": "Inspection", "price": 20.0 }] }
        });
        let first = normalize_appointment(&record);
        let second = normalize_appointment(&record);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_schedule_parse_formats() {
        assert!(parse_schedule("2025-03-14T09:30:00Z").is_some());
        assert!(parse_schedule("2025-03-14 09:30:00").is_some());
        assert!(parse_schedule("2025-03-14 09:30").is_some());
        assert!(parse_schedule("next tuesday").is_none());
    }
}
