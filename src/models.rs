// Wire shapes for the relief API. Inputs mirror what the backend expects;
// records coming back from list endpoints are decoded loosely so a missing
// or unexpected field never makes a whole list fail.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Email/password pair sent to both `/auth/register` and `/auth/login`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response of the auth endpoints. Only `token` is used.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
}

/// Payload of `POST /aid/requests`. Unset optional fields are left out
/// of the JSON body entirely.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AidRequestInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DonorInput {
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct VolunteerInput {
    pub name: String,
    pub skills: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TaskInput {
    pub title: String,
}

/// An aid request as listed by the server.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AidRequest {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub urgency_level: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Donor {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Volunteer {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A volunteer task. The assigned volunteer shows up as `volunteerId`
/// once the server has linked one.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct VolunteerTask {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(
        default,
        rename = "volunteerId",
        alias = "volunteer_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub volunteer_id: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Render a JSON scalar the way a person would type it: strings without
/// quotes, null as empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
