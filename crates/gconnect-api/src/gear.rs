// Gear endpoints: listing, stats, per-activity-type defaults, and the
// default toggle (a POST that simulates PUT/DELETE via method override).

use serde_json::Value;
use tracing::debug;

use crate::client::ConnectClient;
use crate::endpoints::paths;
use crate::error::Error;

impl ConnectClient {
    /// Return all gear for the given user profile number.
    pub async fn get_gear(&self, user_profile_pk: u64) -> Result<Value, Error> {
        let params = [("userProfilePk", user_profile_pk.to_string())];
        debug!("requesting gear for user {user_profile_pk}");

        self.get_json(paths::GEAR_FILTER, &params).await
    }

    /// Return usage stats for one piece of gear.
    pub async fn get_gear_stats(&self, gear_uuid: &str) -> Result<Value, Error> {
        let path = format!("{}/stats/{gear_uuid}", paths::GEAR);
        debug!("requesting gear stats for {gear_uuid}");

        self.get_json(&path, &[]).await
    }

    /// Return the per-activity-type gear defaults.
    pub async fn get_gear_defaults(&self, user_profile_pk: u64) -> Result<Value, Error> {
        let path = format!("{}/user/{user_profile_pk}/activityTypes", paths::GEAR);
        debug!("requesting gear defaults for user {user_profile_pk}");

        self.get_json(&path, &[]).await
    }

    /// Set or clear a piece of gear as the default for an activity type.
    ///
    /// The service expects a POST with an `x-http-method-override` header:
    /// `PUT` to set the default, `DELETE` to clear it.
    pub async fn set_gear_default(
        &self,
        activity_type: &str,
        gear_uuid: &str,
        default: bool,
    ) -> Result<Value, Error> {
        let (suffix, method_override) = if default {
            ("/default/true", "PUT")
        } else {
            ("", "DELETE")
        };
        let path = format!(
            "{}/{gear_uuid}/activityType/{activity_type}{suffix}",
            paths::GEAR
        );
        debug!("setting gear default ({method_override}) for {gear_uuid}");

        self.post_with_override(&path, method_override).await
    }
}
