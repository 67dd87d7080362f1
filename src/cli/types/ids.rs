//! ID types for ESPN site API entities.
//!
//! ESPN sends ids as JSON strings in most payloads and as numbers in a few
//! (standings, core API), so every id deserializes from either form.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

fn de_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    match Raw::deserialize(deserializer) {
        Ok(Raw::Text(s)) => Ok(s),
        Ok(Raw::Number(n)) => Ok(n.to_string()),
        Err(_) => Err(de::Error::custom("expected id as string or number")),
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(deserialize_with = "de_string_or_number")] pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Type-safe wrapper for ESPN team ids (e.g. `"30"` for USC).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use espn_wbb::TeamId;
    ///
    /// let team = TeamId::new("30");
    /// assert_eq!(team.as_str(), "30");
    /// assert_eq!(team.to_string(), "30");
    /// ```
    TeamId
);

string_id!(
    /// Type-safe wrapper for ESPN athlete ids.
    AthleteId
);

string_id!(
    /// Type-safe wrapper for ESPN event (game) ids.
    EventId
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_team_id_from_string() {
        let id: TeamId = serde_json::from_value(json!("30")).unwrap();
        assert_eq!(id, TeamId::new("30"));
    }

    #[test]
    fn test_team_id_from_number() {
        let id: TeamId = serde_json::from_value(json!(77)).unwrap();
        assert_eq!(id.as_str(), "77");
    }

    #[test]
    fn test_athlete_id_rejects_object() {
        let res = serde_json::from_value::<AthleteId>(json!({"id": 1}));
        assert!(res.is_err());
    }

    #[test]
    fn test_event_id_serializes_as_plain_string() {
        let id = EventId::new("401712345");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("401712345"));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(TeamId::default().is_empty());
        assert!(!TeamId::from("1").is_empty());
    }
}
