//! Inbound alert payload sent by Gatus

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Status value that requests a diagnostic check
pub const CHECK_STATUS: &str = "check";

/// Alert webhook body: `{"name": ..., "status": ...}`
///
/// Decoding is lenient: keys match case-insensitively, absent or `null`
/// fields stay empty and unknown keys are skipped. A field of the wrong
/// type is still an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertPayload {
    /// Monitored service name, used verbatim as the check target host
    pub name: String,
    pub status: String,
}

impl AlertPayload {
    /// Exact, case-sensitive match on [`CHECK_STATUS`]
    pub fn requests_check(&self) -> bool {
        self.status == CHECK_STATUS
    }

    /// Decode the first JSON value in `body`, ignoring anything after it.
    ///
    /// A top-level `null` yields an empty payload. An empty body is an error.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::Deserializer::from_slice(body)
            .into_iter::<Option<AlertPayload>>()
            .next()
        {
            Some(payload) => Ok(payload?.unwrap_or_default()),
            None => Err(de::Error::custom("empty body")),
        }
    }
}

impl<'de> Deserialize<'de> for AlertPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AlertVisitor)
    }
}

struct AlertVisitor;

impl<'de> Visitor<'de> for AlertVisitor {
    type Value = AlertPayload;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an alert object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<AlertPayload, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut payload = AlertPayload::default();
        while let Some(key) = map.next_key::<String>()? {
            let field = if key.eq_ignore_ascii_case("name") {
                &mut payload.name
            } else if key.eq_ignore_ascii_case("status") {
                &mut payload.status
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            // Later duplicates win; `null` leaves the field untouched.
            if let Some(value) = map.next_value::<Option<String>>()? {
                *field = value;
            }
        }
        Ok(payload)
    }
}
