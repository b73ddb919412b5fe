// Typed models.
//
// Endpoint payloads are passed through as `serde_json::Value`; only the
// fields the client itself reads get a typed shape here.

use serde::Deserialize;

/// Profile fields fetched once at login and immutable for the life of
/// the session. Re-fetched only by a fresh `login`/`resume`.
#[derive(Debug, Clone)]
pub struct Profile {
    pub display_name: String,
    pub full_name: String,
    pub unit_system: UnitSystem,
}

/// The account's measurement system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum UnitSystem {
    #[serde(rename = "metric")]
    Metric,
    #[serde(rename = "statute_us")]
    StatuteUs,
    /// Any value this crate doesn't know about yet.
    #[serde(other)]
    Unknown,
}

/// `GET /userprofile-service/socialProfile` (the fields we keep).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SocialProfile {
    pub display_name: String,
    pub full_name: String,
}

/// `GET /userprofile-service/userprofile/user-settings` (the fields we keep).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserSettings {
    pub user_data: UserData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserData {
    pub measurement_system: UnitSystem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_known_values() {
        let settings: UserSettings = serde_json::from_str(
            r#"{"userData": {"measurementSystem": "metric"}}"#,
        )
        .expect("deserialize");
        assert_eq!(settings.user_data.measurement_system, UnitSystem::Metric);
    }

    #[test]
    fn unit_system_unknown_value() {
        let parsed: UnitSystem = serde_json::from_str(r#""nautical""#).expect("deserialize");
        assert_eq!(parsed, UnitSystem::Unknown);
    }
}
