// Region selection and the static endpoint path table.
//
// Garmin runs two disjoint deployments (commercial garmin.com and the
// China-restricted garmin.cn). The difference is purely which base URLs
// are used; every service path below is identical on both.

/// Which Garmin Connect deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// Commercial deployment (`garmin.com`).
    #[default]
    Global,
    /// Region-restricted deployment (`garmin.cn`).
    China,
}

impl Region {
    /// Base URL of the Connect API host.
    pub fn api_base(&self) -> &'static str {
        match self {
            Self::Global => "https://connectapi.garmin.com",
            Self::China => "https://connectapi.garmin.cn",
        }
    }

    /// Base URL of the SSO service used for the credential handshake.
    pub fn sso_base(&self) -> &'static str {
        match self {
            Self::Global => "https://sso.garmin.com/sso",
            Self::China => "https://sso.garmin.cn/sso",
        }
    }
}

/// Service paths, relative to [`Region::api_base`].
///
/// One constant per upstream service endpoint; facade methods append
/// identifier and date segments as needed.
pub(crate) mod paths {
    pub const SOCIAL_PROFILE: &str = "/userprofile-service/socialProfile";
    pub const USER_SETTINGS: &str = "/userprofile-service/userprofile/user-settings";

    pub const DAILY_SUMMARY: &str = "/usersummary-service/usersummary/daily";
    pub const DAILY_HYDRATION: &str = "/usersummary-service/usersummary/hydration/daily";
    pub const DAILY_STEPS: &str = "/usersummary-service/stats/steps/daily";

    pub const SUMMARY_CHART: &str = "/wellness-service/wellness/dailySummaryChart";
    pub const FLOORS_CHART: &str = "/wellness-service/wellness/floorsChartData/daily";
    pub const DAILY_HEART_RATE: &str = "/wellness-service/wellness/dailyHeartRate";
    pub const DAILY_SLEEP: &str = "/wellness-service/wellness/dailySleepData";
    pub const DAILY_STRESS: &str = "/wellness-service/wellness/dailyStress";
    pub const DAILY_RESPIRATION: &str = "/wellness-service/wellness/daily/respiration";
    pub const DAILY_SPO2: &str = "/wellness-service/wellness/daily/spo2";
    pub const BODY_BATTERY: &str = "/wellness-service/wellness/bodyBattery/reports/daily";

    pub const WEIGHT_RANGE: &str = "/weight-service/weight/dateRange";
    pub const BLOOD_PRESSURE: &str = "/bloodpressure-service/bloodpressure/range";
    pub const RESTING_HR: &str = "/userstats-service/wellness/daily";
    pub const HRV: &str = "/hrv-service/hrv";

    pub const MAX_METRICS: &str = "/metrics-service/metrics/maxmet/daily";
    pub const TRAINING_READINESS: &str = "/metrics-service/metrics/trainingreadiness";
    pub const TRAINING_STATUS: &str = "/metrics-service/metrics/trainingstatus/aggregated";
    pub const FITNESS_STATS: &str = "/fitnessstats-service/activity";
    pub const PERSONAL_RECORDS: &str = "/personalrecord-service/personalrecord/prs";

    pub const EARNED_BADGES: &str = "/badge-service/badge/earned";
    pub const ADHOC_CHALLENGES: &str = "/adhocchallenge-service/adHocChallenge/historical";
    pub const BADGE_CHALLENGES: &str = "/badgechallenge-service/badgeChallenge/completed";
    pub const AVAILABLE_BADGE_CHALLENGES: &str = "/badgechallenge-service/badgeChallenge/available";
    pub const NON_COMPLETED_BADGE_CHALLENGES: &str =
        "/badgechallenge-service/badgeChallenge/non-completed";

    pub const ACTIVITIES_SEARCH: &str = "/activitylist-service/activities/search/activities";
    pub const ACTIVITY: &str = "/activity-service/activity";
    pub const ACTIVITY_TYPES: &str = "/activity-service/activity/activityTypes";

    pub const DOWNLOAD_ORIGINAL: &str = "/download-service/files/activity";
    pub const DOWNLOAD_TCX: &str = "/download-service/export/tcx/activity";
    pub const DOWNLOAD_GPX: &str = "/download-service/export/gpx/activity";
    pub const DOWNLOAD_KML: &str = "/download-service/export/kml/activity";
    pub const DOWNLOAD_CSV: &str = "/download-service/export/csv/activity";
    pub const UPLOAD: &str = "/upload-service/upload";

    pub const DEVICES: &str = "/device-service/deviceregistration/devices";
    pub const DEVICE: &str = "/device-service/deviceservice";

    pub const GOALS: &str = "/goal-service/goal/goals";

    pub const GEAR_FILTER: &str = "/gear-service/gear/filterGear";
    pub const GEAR: &str = "/gear-service/gear";

    pub const LOGOUT: &str = "/auth/logout";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_selects_disjoint_hosts() {
        assert_eq!(Region::Global.api_base(), "https://connectapi.garmin.com");
        assert_eq!(Region::China.api_base(), "https://connectapi.garmin.cn");
        assert_ne!(Region::Global.sso_base(), Region::China.sso_base());
    }

    #[test]
    fn default_region_is_global() {
        assert_eq!(Region::default(), Region::Global);
    }
}
