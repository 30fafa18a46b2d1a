use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Token header.
///
/// Informational only: it is signed along with the payload but never
/// consulted when a token is decoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub alg: String,
    pub typ: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Token payload.
///
/// A payload without `exp` deserializes with `exp = 0` and is therefore
/// always expired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier). Emitted as a JSON integer; a decimal
    /// string is also accepted on decode.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_subject"
    )]
    pub sub: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject valid for `ttl_seconds` from `now`.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `now` - Issue time (Unix timestamp)
    /// * `ttl_seconds` - Seconds until the token expires
    pub fn new(subject: i64, now: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: Some(subject),
            iat: now,
            exp: now.saturating_add(ttl_seconds),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is already invalid at the exact expiry instant.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SubjectRepr {
    Id(i64),
    Text(String),
}

fn deserialize_subject<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<SubjectRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(SubjectRepr::Id(id)) => Ok(Some(id)),
        Some(SubjectRepr::Text(text)) => text
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid subject: {}", text))),
    }
}
