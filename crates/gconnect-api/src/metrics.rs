// Training metrics and records: max met, readiness, status, aggregated
// progress, and personal records.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::client::ConnectClient;
use crate::endpoints::paths;
use crate::error::Error;

/// Metric aggregated by the progress summary endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMetric {
    ElevationGain,
    Duration,
    Distance,
    MovingDuration,
}

impl ProgressMetric {
    fn as_str(self) -> &'static str {
        match self {
            Self::ElevationGain => "elevationGain",
            Self::Duration => "duration",
            Self::Distance => "distance",
            Self::MovingDuration => "movingDuration",
        }
    }
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl ConnectClient {
    /// Return max metric data (VO2 max et al.) for `date`.
    pub async fn get_max_metrics(&self, date: NaiveDate) -> Result<Value, Error> {
        let date = fmt_date(date);
        let path = format!("{}/{date}/{date}", paths::MAX_METRICS);
        debug!("requesting max metrics");

        self.get_json(&path, &[]).await
    }

    /// Return training readiness data for `date`.
    pub async fn get_training_readiness(&self, date: NaiveDate) -> Result<Value, Error> {
        let path = format!("{}/{}", paths::TRAINING_READINESS, fmt_date(date));
        debug!("requesting training readiness data");

        self.get_json(&path, &[]).await
    }

    /// Return aggregated training status data for `date`.
    pub async fn get_training_status(&self, date: NaiveDate) -> Result<Value, Error> {
        let path = format!("{}/{}", paths::TRAINING_STATUS, fmt_date(date));
        debug!("requesting training status data");

        self.get_json(&path, &[]).await
    }

    /// Return the lifetime progress summary between `start` and `end`,
    /// grouped by parent activity type, aggregated over `metric`.
    pub async fn get_progress_summary_between_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        metric: ProgressMetric,
    ) -> Result<Value, Error> {
        let params = [
            ("startDate", fmt_date(start)),
            ("endDate", fmt_date(end)),
            ("aggregation", "lifetime".to_owned()),
            ("groupByParentActivityType", "true".to_owned()),
            ("metric", metric.as_str().to_owned()),
        ];
        debug!("requesting progress summary from {start} to {end}");

        self.get_json(paths::FITNESS_STATS, &params).await
    }

    /// Return personal records for the current user.
    pub async fn get_personal_records(&self) -> Result<Value, Error> {
        let name = self.require_display_name()?;
        let path = format!("{}/{name}", paths::PERSONAL_RECORDS);
        debug!("requesting personal records");

        self.get_json(&path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_metric_wire_names() {
        assert_eq!(ProgressMetric::ElevationGain.as_str(), "elevationGain");
        assert_eq!(ProgressMetric::MovingDuration.as_str(), "movingDuration");
        assert_eq!(ProgressMetric::Distance.as_str(), "distance");
        assert_eq!(ProgressMetric::Duration.as_str(), "duration");
    }
}
