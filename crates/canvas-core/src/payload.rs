//! Decoded signed-request payload.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// The only algorithm a signed request may claim.
pub const ALGORITHM_HMAC_SHA256: &str = "HMAC-SHA256";

/// Authenticated payload of a signed request.
///
/// Only `algorithm` is interpreted by the verifier; every other field is
/// opaque application data. The accessors below are conveniences for the
/// fields the host platform usually sends and return `None` when a field is
/// missing or has an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SignedRequestPayload(Map<String, Value>);

impl SignedRequestPayload {
    pub(crate) fn from_object(object: Map<String, Value>) -> Self {
        Self(object)
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn algorithm(&self) -> Option<&str> {
        self.get("algorithm").and_then(Value::as_str)
    }

    /// Id of the user, present once the user has authorized the app.
    ///
    /// Numeric ids are rendered as decimal strings. An empty string or a
    /// numeric zero counts as no user.
    pub fn user_id(&self) -> Option<String> {
        match self.get("user_id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn oauth_token(&self) -> Option<&str> {
        self.get("oauth_token").and_then(Value::as_str)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("issued_at")
    }

    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.timestamp("expires")
    }

    /// `user.locale`, e.g. `en_US`.
    pub fn locale(&self) -> Option<&str> {
        self.user_field("locale")
    }

    /// `user.country`, e.g. `us`.
    pub fn country(&self) -> Option<&str> {
        self.user_field("country")
    }

    /// Deserialize the whole payload into an application type.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    fn user_field(&self, key: &str) -> Option<&str> {
        self.get("user")?.get(key)?.as_str()
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        let secs = self.get(key)?.as_i64()?;
        DateTime::from_timestamp(secs, 0)
    }
}
