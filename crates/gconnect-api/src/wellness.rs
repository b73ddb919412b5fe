// Wellness endpoints: daily summaries, sleep, stress, heart data, and
// body measurements. All date arguments are calendar dates; payloads are
// returned as parsed JSON unchanged except where noted.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::client::ConnectClient;
use crate::endpoints::paths;
use crate::error::Error;

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl ConnectClient {
    /// Return the user's activity summary for `date`.
    ///
    /// Fails with [`Error::PrivacyProtected`] when the response flags the
    /// data as privacy-protected; no other endpoint carries that flag.
    pub async fn get_user_summary(&self, date: NaiveDate) -> Result<Value, Error> {
        let name = self.require_display_name()?;
        let path = format!("{}/{name}", paths::DAILY_SUMMARY);
        let params = [("calendarDate", fmt_date(date))];
        debug!("requesting user summary");

        let summary: Value = self.get_json(&path, &params).await?;
        if summary.get("privacyProtected").and_then(Value::as_bool) == Some(true) {
            return Err(Error::PrivacyProtected);
        }
        Ok(summary)
    }

    /// Return the daily summary merged with the body-composition
    /// `totalAverage` block for the same date.
    pub async fn get_stats_and_body(&self, date: NaiveDate) -> Result<Value, Error> {
        let summary = self.get_user_summary(date).await?;
        let composition = self.get_body_composition(date, None).await?;

        let mut merged = match summary {
            Value::Object(map) => map,
            other => {
                return Err(Error::Deserialization {
                    message: "daily summary is not a JSON object".into(),
                    body: other.to_string(),
                });
            }
        };
        if let Some(Value::Object(average)) = composition.get("totalAverage") {
            merged.extend(average.clone());
        }
        Ok(Value::Object(merged))
    }

    /// Return the daily summary chart (steps) data for `date`.
    pub async fn get_steps_data(&self, date: NaiveDate) -> Result<Value, Error> {
        let name = self.require_display_name()?;
        let path = format!("{}/{name}", paths::SUMMARY_CHART);
        let params = [("date", fmt_date(date))];
        debug!("requesting steps data");

        self.get_json(&path, &params).await
    }

    /// Return floors climbed data for `date`.
    pub async fn get_floors(&self, date: NaiveDate) -> Result<Value, Error> {
        let path = format!("{}/{}", paths::FLOORS_CHART, fmt_date(date));
        debug!("requesting floors data");

        self.get_json(&path, &[]).await
    }

    /// Return daily step totals between `start` and `end` inclusive.
    pub async fn get_daily_steps(&self, start: NaiveDate, end: NaiveDate) -> Result<Value, Error> {
        let path = format!("{}/{}/{}", paths::DAILY_STEPS, fmt_date(start), fmt_date(end));
        debug!("requesting daily steps data");

        self.get_json(&path, &[]).await
    }

    /// Return heart rate samples for `date`.
    pub async fn get_heart_rates(&self, date: NaiveDate) -> Result<Value, Error> {
        let name = self.require_display_name()?;
        let path = format!("{}/{name}", paths::DAILY_HEART_RATE);
        let params = [("date", fmt_date(date))];
        debug!("requesting heart rates");

        self.get_json(&path, &params).await
    }

    /// Return body composition data for `start` through `end`
    /// (`end` defaults to `start`).
    pub async fn get_body_composition(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Value, Error> {
        let end = end.unwrap_or(start);
        let params = [
            ("startDate", fmt_date(start)),
            ("endDate", fmt_date(end)),
        ];
        debug!("requesting body composition");

        self.get_json(paths::WEIGHT_RANGE, &params).await
    }

    /// Return body battery values by day for `start` through `end`
    /// (`end` defaults to `start`).
    pub async fn get_body_battery(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Value, Error> {
        let end = end.unwrap_or(start);
        let params = [
            ("startDate", fmt_date(start)),
            ("endDate", fmt_date(end)),
        ];
        debug!("requesting body battery data");

        self.get_json(paths::BODY_BATTERY, &params).await
    }

    /// Return blood pressure readings for `start` through `end`
    /// (`end` defaults to `start`).
    pub async fn get_blood_pressure(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Value, Error> {
        let end = end.unwrap_or(start);
        let path = format!(
            "{}/{}/{}",
            paths::BLOOD_PRESSURE,
            fmt_date(start),
            fmt_date(end)
        );
        let params = [("includeAll", "true".to_owned())];
        debug!("requesting blood pressure data");

        self.get_json(&path, &params).await
    }

    /// Return hydration data for `date`.
    pub async fn get_hydration_data(&self, date: NaiveDate) -> Result<Value, Error> {
        let path = format!("{}/{}", paths::DAILY_HYDRATION, fmt_date(date));
        debug!("requesting hydration data");

        self.get_json(&path, &[]).await
    }

    /// Return respiration data for `date`.
    pub async fn get_respiration_data(&self, date: NaiveDate) -> Result<Value, Error> {
        let path = format!("{}/{}", paths::DAILY_RESPIRATION, fmt_date(date));
        debug!("requesting respiration data");

        self.get_json(&path, &[]).await
    }

    /// Return pulse-ox (SpO2) data for `date`.
    pub async fn get_spo2_data(&self, date: NaiveDate) -> Result<Value, Error> {
        let path = format!("{}/{}", paths::DAILY_SPO2, fmt_date(date));
        debug!("requesting SpO2 data");

        self.get_json(&path, &[]).await
    }

    /// Return sleep data for `date`.
    pub async fn get_sleep_data(&self, date: NaiveDate) -> Result<Value, Error> {
        let name = self.require_display_name()?;
        let path = format!("{}/{name}", paths::DAILY_SLEEP);
        let params = [
            ("date", fmt_date(date)),
            ("nonSleepBufferMinutes", "60".to_owned()),
        ];
        debug!("requesting sleep data");

        self.get_json(&path, &params).await
    }

    /// Return stress data for `date`.
    pub async fn get_stress_data(&self, date: NaiveDate) -> Result<Value, Error> {
        let path = format!("{}/{}", paths::DAILY_STRESS, fmt_date(date));
        debug!("requesting stress data");

        self.get_json(&path, &[]).await
    }

    /// Return resting heart rate for `date`.
    pub async fn get_rhr_day(&self, date: NaiveDate) -> Result<Value, Error> {
        let name = self.require_display_name()?;
        let path = format!("{}/{name}", paths::RESTING_HR);
        let params = [
            ("fromDate", fmt_date(date)),
            ("untilDate", fmt_date(date)),
            ("metricId", "60".to_owned()),
        ];
        debug!("requesting resting heart rate data");

        self.get_json(&path, &params).await
    }

    /// Return heart rate variability (HRV) data for `date`.
    pub async fn get_hrv_data(&self, date: NaiveDate) -> Result<Value, Error> {
        let path = format!("{}/{}", paths::HRV, fmt_date(date));
        debug!("requesting HRV data");

        self.get_json(&path, &[]).await
    }
}
