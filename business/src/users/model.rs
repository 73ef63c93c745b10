//! Wire types for the users API.

use serde::{Deserialize, Serialize};

/// A user as returned by `GET /users` and `GET /users/{id}`.
///
/// Nested objects default when missing so sparse payloads still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

impl UserRecord {
    pub fn company_name(&self) -> &str {
        &self.company.name
    }
}

impl Address {
    /// Single-line form used by the details page: `street, suite, city zipcode`.
    pub fn one_line(&self) -> String {
        let mut parts: Vec<&str> = [self.street.as_str(), self.suite.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();

        let locality = format!("{} {}", self.city, self.zipcode);
        let locality = locality.trim();
        if !locality.is_empty() {
            parts.push(locality);
        }

        parts.join(", ")
    }
}
