//! Adoption request model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored request from a user to adopt a pet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub pet_id: String,
    pub user_id: String,
    pub created_at: String,
}

/// Request body for `POST /adoption`.
///
/// Both fields stay untyped so that a number or a string is accepted, matching
/// what browser clients actually send.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdoptionRequest {
    #[serde(default)]
    pub pet_id: Option<Value>,
    #[serde(default)]
    pub user_id: Option<Value>,
}

impl CreateAdoptionRequest {
    /// Both identifiers, if each one is present and truthy.
    pub fn identifiers(&self) -> Option<(String, String)> {
        let pet_id = identifier_field(self.pet_id.as_ref())?;
        let user_id = identifier_field(self.user_id.as_ref())?;
        Some((pet_id, user_id))
    }
}

/// Anything except `null`, `false`, `0` and `""` counts as present.
///
/// Strings are kept verbatim; other values are stored as their JSON text.
fn identifier_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> CreateAdoptionRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_string_identifiers() {
        let request = parse(json!({ "petId": "p1", "userId": "u1" }));
        assert_eq!(
            request.identifiers(),
            Some(("p1".to_string(), "u1".to_string()))
        );
    }

    #[test]
    fn test_numeric_identifiers_are_stringified() {
        let request = parse(json!({ "petId": 42, "userId": "u1" }));
        assert_eq!(
            request.identifiers(),
            Some(("42".to_string(), "u1".to_string()))
        );
    }

    #[test]
    fn test_falsy_identifiers_are_missing() {
        for falsy in [json!(""), json!(0), json!(0.0), json!(null), json!(false)] {
            let request = parse(json!({ "petId": falsy, "userId": "u1" }));
            assert_eq!(request.identifiers(), None, "petId {:?}", request.pet_id);
        }

        let request = parse(json!({ "petId": "p1" }));
        assert_eq!(request.identifiers(), None);
    }

    #[test]
    fn test_other_truthy_values_are_accepted() {
        let cases = [
            (json!("   "), "   "),
            (json!(true), "true"),
            (json!(["p"]), r#"["p"]"#),
            (json!({}), "{}"),
            (json!(-1), "-1"),
        ];
        for (value, stored) in cases {
            let request = parse(json!({ "petId": value, "userId": "u1" }));
            assert_eq!(
                request.identifiers(),
                Some((stored.to_string(), "u1".to_string()))
            );
        }
    }
}
