//! Shape checks for raw attendance submissions.
//!
//! `POST /attendance` accepts an arbitrary JSON object. Nothing reaches the
//! store until the object carries `student_id`, `date` and `status` with
//! usable types; unknown keys are ignored.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::models::NewAttendanceRequest;
use crate::models::attendance::DATE_FORMAT;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Returns `true` when `payload` would pass [`parse_attendance`]. Never fails.
pub fn attendance_is_valid(payload: &Value) -> bool {
    parse_attendance(payload).is_ok()
}

pub fn parse_attendance(payload: &Value) -> Result<NewAttendanceRequest, ValidationError> {
    let fields = payload.as_object().ok_or(ValidationError::NotAnObject)?;

    let student_id = coerce_integer(required(fields, "student_id")?).ok_or(
        ValidationError::WrongType {
            field: "student_id",
            expected: "an integer",
        },
    )?;

    let date = required(fields, "date")?
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
        .ok_or(ValidationError::WrongType {
            field: "date",
            expected: "a YYYY-MM-DD date",
        })?;

    let status = required(fields, "status")?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ValidationError::WrongType {
            field: "status",
            expected: "a non-empty string",
        })?;

    Ok(NewAttendanceRequest {
        student_id,
        date,
        status: status.to_string(),
    })
}

fn required<'a>(
    fields: &'a serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<&'a Value, ValidationError> {
    match fields.get(key) {
        None | Some(Value::Null) => Err(ValidationError::Missing(key)),
        Some(value) => Ok(value),
    }
}

/// Integers, whole floats and numeric strings are accepted; booleans are not.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_complete_payload() {
        let payload = json!({"student_id": 1, "date": "2024-03-05", "status": "Present"});
        let parsed = parse_attendance(&payload).expect("valid payload");

        assert_eq!(parsed.student_id, 1);
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(parsed.status, "Present");
        assert!(attendance_is_valid(&payload));
    }

    #[test]
    fn test_coerces_student_id() {
        for id in [json!("7"), json!(7.0), json!(" 7 ")] {
            let payload = json!({"student_id": id, "date": "2024-03-05", "status": "Absent"});
            assert_eq!(parse_attendance(&payload).unwrap().student_id, 7);
        }
    }

    #[test]
    fn test_out_of_range_student_id_is_not_clamped() {
        let payload = json!({"student_id": 9223372036854775808u64, "date": "2024-03-05", "status": "Present"});
        assert_eq!(
            parse_attendance(&payload),
            Err(ValidationError::WrongType {
                field: "student_id",
                expected: "an integer",
            })
        );

        let max = json!({"student_id": i64::MAX, "date": "2024-03-05", "status": "Present"});
        assert_eq!(parse_attendance(&max).unwrap().student_id, i64::MAX);
    }

    #[test]
    fn test_ignores_unknown_keys() {
        let payload = json!({
            "student_id": 2,
            "date": "2024-03-05",
            "status": "Absent",
            "is_deleted": true,
            "note": "late bus"
        });
        assert!(attendance_is_valid(&payload));
    }

    #[test]
    fn test_missing_fields() {
        let full = json!({"student_id": 1, "date": "2024-03-05", "status": "Present"});
        for key in ["student_id", "date", "status"] {
            let mut payload = full.clone();
            payload.as_object_mut().unwrap().remove(key);
            assert_eq!(parse_attendance(&payload), Err(ValidationError::Missing(key)));
            assert!(!attendance_is_valid(&payload));
        }

        let nulled = json!({"student_id": null, "date": "2024-03-05", "status": "Present"});
        assert_eq!(
            parse_attendance(&nulled),
            Err(ValidationError::Missing("student_id"))
        );
    }

    #[test]
    fn test_wrong_types() {
        let cases = [
            json!({"student_id": "abc", "date": "2024-03-05", "status": "Present"}),
            json!({"student_id": 1.5, "date": "2024-03-05", "status": "Present"}),
            json!({"student_id": 9223372036854775808u64, "date": "2024-03-05", "status": "Present"}),
            json!({"student_id": 9223372036854775808.0, "date": "2024-03-05", "status": "Present"}),
            json!({"student_id": 1e30, "date": "2024-03-05", "status": "Present"}),
            json!({"student_id": true, "date": "2024-03-05", "status": "Present"}),
            json!({"student_id": 1, "date": "2024-02-30", "status": "Present"}),
            json!({"student_id": 1, "date": "05/03/2024", "status": "Present"}),
            json!({"student_id": 1, "date": 20240305, "status": "Present"}),
            json!({"student_id": 1, "date": "2024-03-05", "status": ""}),
            json!({"student_id": 1, "date": "2024-03-05", "status": "   "}),
            json!({"student_id": 1, "date": "2024-03-05", "status": 1}),
        ];
        for payload in cases {
            assert!(!attendance_is_valid(&payload), "accepted {payload}");
        }
    }

    #[test]
    fn test_rejects_non_objects() {
        assert_eq!(parse_attendance(&json!([1, 2])), Err(ValidationError::NotAnObject));
        assert!(!attendance_is_valid(&json!("student_id")));
        assert!(!attendance_is_valid(&Value::Null));
    }
}
