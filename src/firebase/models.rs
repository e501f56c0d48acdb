//! Wire models for the backend REST surfaces.
//!
//! Sessions are stored as Firestore documents whose fields use the typed
//! value encoding (`stringValue`, `timestampValue`, `arrayValue`,
//! `mapValue`). Each document carries the session under a single `session`
//! map field, so this module owns the translation between that envelope and
//! the domain types in [`super::resource`].

use super::error::FirebaseError;
use super::resource::{Exercise, Session, StoredSession};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed Firestore field value.
///
/// Serde's externally-tagged representation matches the wire encoding
/// exactly: `Value::StringValue("x")` serializes as `{"stringValue": "x"}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    StringValue(String),
    TimestampValue(String),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// A Firestore document. The `name` is the full resource path and is only
/// present on documents returned by the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// Response shape for listing a collection.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Response shape for the identity endpoints (`accounts:signUp` and
/// `accounts:signInWithPassword`).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub id_token: String,
    pub email: String,
    pub local_id: String,
}

/// Encode a session into a document carrying the `session` envelope field.
///
pub fn encode_session(session: &Session) -> Document {
    let exercises = session
        .exercises
        .iter()
        .map(|exercise| {
            let mut fields = BTreeMap::new();
            fields.insert(
                "name".to_string(),
                Value::StringValue(exercise.name.clone()),
            );
            fields.insert(
                "weight".to_string(),
                Value::StringValue(exercise.weight.clone()),
            );
            fields.insert(
                "sets".to_string(),
                Value::StringValue(exercise.sets.clone()),
            );
            fields.insert(
                "reps".to_string(),
                Value::StringValue(exercise.reps.clone()),
            );
            Value::MapValue(MapValue { fields })
        })
        .collect();

    let mut session_fields = BTreeMap::new();
    session_fields.insert(
        "category".to_string(),
        Value::StringValue(session.category.clone()),
    );
    session_fields.insert(
        "date".to_string(),
        Value::TimestampValue(session.date.to_rfc3339()),
    );
    session_fields.insert(
        "exercises".to_string(),
        Value::ArrayValue(ArrayValue { values: exercises }),
    );

    let mut fields = BTreeMap::new();
    fields.insert(
        "session".to_string(),
        Value::MapValue(MapValue {
            fields: session_fields,
        }),
    );

    Document { name: None, fields }
}

/// Decode the `session` envelope of a stored document back into a session.
///
pub fn decode_session(document: &Document) -> Result<Session, FirebaseError> {
    let session_fields = match document.fields.get("session") {
        Some(Value::MapValue(map)) => &map.fields,
        _ => return Err(malformed("missing session field")),
    };

    let category = match session_fields.get("category") {
        Some(Value::StringValue(category)) => category.clone(),
        _ => return Err(malformed("missing category")),
    };

    let date = match session_fields.get("date") {
        Some(Value::TimestampValue(timestamp)) => DateTime::parse_from_rfc3339(timestamp)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| malformed(&format!("unparseable date: {}", e)))?,
        _ => return Err(malformed("missing date")),
    };

    let exercises = match session_fields.get("exercises") {
        Some(Value::ArrayValue(array)) => array
            .values
            .iter()
            .map(decode_exercise)
            .collect::<Result<Vec<Exercise>, FirebaseError>>()?,
        _ => return Err(malformed("missing exercises")),
    };

    Ok(Session {
        category,
        date,
        exercises,
    })
}

/// Decode a stored document together with its server-assigned identifier.
///
pub fn decode_stored_session(document: &Document) -> Result<StoredSession, FirebaseError> {
    Ok(StoredSession {
        id: document_id(document)?,
        session: decode_session(document)?,
    })
}

/// Extract the trailing path segment of the document resource name.
///
pub fn document_id(document: &Document) -> Result<String, FirebaseError> {
    document
        .name
        .as_deref()
        .and_then(|name| name.rsplit('/').next())
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| malformed("document has no resource name"))
}

// Exercise fields are free text and the store never enforces their presence,
// so absent fields decode as empty strings rather than errors.
fn decode_exercise(value: &Value) -> Result<Exercise, FirebaseError> {
    let fields = match value {
        Value::MapValue(map) => &map.fields,
        _ => return Err(malformed("exercise entry is not a map")),
    };
    Ok(Exercise {
        name: string_field(fields, "name"),
        weight: string_field(fields, "weight"),
        sets: string_field(fields, "sets"),
        reps: string_field(fields, "reps"),
    })
}

fn string_field(fields: &BTreeMap<String, Value>, name: &str) -> String {
    match fields.get(name) {
        Some(Value::StringValue(value)) => value.clone(),
        _ => String::new(),
    }
}

fn malformed(message: &str) -> FirebaseError {
    FirebaseError::MalformedDocument(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_session() -> Session {
        Session {
            category: "Push Day".to_string(),
            date: Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
            exercises: vec![Exercise {
                name: "Bench Press".to_string(),
                weight: "60".to_string(),
                sets: "3".to_string(),
                reps: "10".to_string(),
            }],
        }
    }

    #[test]
    fn test_encode_session_uses_envelope() {
        let document = encode_session(&sample_session());
        let json = serde_json::to_value(&document).unwrap();

        assert_eq!(
            json["fields"]["session"]["mapValue"]["fields"]["category"]["stringValue"],
            "Push Day"
        );
        let exercises =
            &json["fields"]["session"]["mapValue"]["fields"]["exercises"]["arrayValue"]["values"];
        assert_eq!(
            exercises[0]["mapValue"]["fields"]["weight"]["stringValue"],
            "60"
        );
        // Outbound documents never carry a resource name
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_decode_recovers_encoded_session() {
        let session = sample_session();
        let decoded = decode_session(&encode_session(&session)).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn test_decode_rejects_document_without_envelope() {
        let document = Document {
            name: None,
            fields: BTreeMap::new(),
        };
        let error = decode_session(&document).unwrap_err();
        assert!(error.to_string().contains("missing session"));
    }

    #[test]
    fn test_decode_rejects_missing_category() {
        let mut document = encode_session(&sample_session());
        if let Some(Value::MapValue(map)) = document.fields.get_mut("session") {
            map.fields.remove("category");
        }
        let error = decode_session(&document).unwrap_err();
        assert!(error.to_string().contains("missing category"));
    }

    #[test]
    fn test_decode_tolerates_absent_exercise_fields() {
        let mut document = encode_session(&sample_session());
        if let Some(Value::MapValue(map)) = document.fields.get_mut("session") {
            map.fields.insert(
                "exercises".to_string(),
                Value::ArrayValue(ArrayValue {
                    values: vec![Value::MapValue(MapValue::default())],
                }),
            );
        }
        let session = decode_session(&document).unwrap();
        assert_eq!(session.exercises.len(), 1);
        assert!(session.exercises[0].name.is_empty());
        assert!(session.exercises[0].weight.is_empty());
    }

    #[test]
    fn test_document_id_takes_trailing_path_segment() {
        let mut document = encode_session(&sample_session());
        document.name = Some(
            "projects/demo/databases/(default)/documents/sessions/abc123".to_string(),
        );
        assert_eq!(document_id(&document).unwrap(), "abc123");

        document.name = None;
        assert!(document_id(&document).is_err());
    }

    #[test]
    fn test_value_wire_representation() {
        let value = Value::TimestampValue("2024-03-04T00:00:00+00:00".to_string());
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"timestampValue":"2024-03-04T00:00:00+00:00"}"#);
    }
}
