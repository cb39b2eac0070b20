//! Wire types shared with the employee service.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// =============================================================================
// RECORDS
// =============================================================================

/// An employee as returned by `/employee` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub position_id: Uuid,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A position as returned by `/position` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: Uuid,
    pub name: String,
    pub salary: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// One page of employees. An empty `cursor` means there is no next page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeList {
    #[serde(default)]
    pub cursor: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub employees: Vec<Employee>,
}

impl EmployeeList {
    pub fn next_cursor(&self) -> Option<&str> {
        non_empty(&self.cursor)
    }
}

/// One page of positions. An empty `cursor` means there is no next page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionList {
    #[serde(default)]
    pub cursor: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub positions: Vec<Position>,
}

impl PositionList {
    pub fn next_cursor(&self) -> Option<&str> {
        non_empty(&self.cursor)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// The service marshals an empty result set as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployee {
    pub first_name: String,
    pub last_name: String,
    pub position_name: String,
    pub salary: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployee {
    pub first_name: String,
    pub last_name: String,
    pub position_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePosition {
    pub name: String,
    pub salary: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePosition {
    pub name: String,
    pub salary: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInRequest<'a> {
    pub id: &'a str,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Body of a successful `POST /auth/signin`.
///
/// The token is opaque. Older deployments answer `{ "id": token }`, the
/// current service answers `{ "message": token }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SignInResponse {
    /// The first non-empty token-bearing field, in `id`, `token`, `message`
    /// order.
    pub fn token(&self) -> Option<&str> {
        [&self.id, &self.token, &self.message]
            .into_iter()
            .find_map(|field| field.as_deref().filter(|t| !t.is_empty()))
    }
}

/// `{ "message": ... }` acknowledgement, returned by deletes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
