// Activity endpoints: listing and date-ranged search, per-activity
// detail views, binary download, and file upload.

use std::path::Path;

use bytes::Bytes;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::client::ConnectClient;
use crate::endpoints::paths;
use crate::error::Error;

/// Output format for [`ConnectClient::download_activity`].
///
/// Each variant maps to a distinct download-service path; `Original` is
/// the device's recorded file wrapped in a zip, `Csv` is a split export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityDownloadFormat {
    Original,
    Tcx,
    Gpx,
    Kml,
    Csv,
}

impl ActivityDownloadFormat {
    fn base_path(self) -> &'static str {
        match self {
            Self::Original => paths::DOWNLOAD_ORIGINAL,
            Self::Tcx => paths::DOWNLOAD_TCX,
            Self::Gpx => paths::DOWNLOAD_GPX,
            Self::Kml => paths::DOWNLOAD_KML,
            Self::Csv => paths::DOWNLOAD_CSV,
        }
    }
}

/// Activity file formats accepted by [`ConnectClient::upload_activity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityUploadFormat {
    Fit,
    Gpx,
    Tcx,
}

impl ActivityUploadFormat {
    /// Match a file extension (case-insensitive) to an upload format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "fit" => Some(Self::Fit),
            "gpx" => Some(Self::Gpx),
            "tcx" => Some(Self::Tcx),
            _ => None,
        }
    }
}

const ACTIVITY_PAGE_SIZE: usize = 20;

impl ConnectClient {
    /// Return `limit` activities starting at offset `start`.
    pub async fn get_activities(&self, start: usize, limit: usize) -> Result<Value, Error> {
        let params = [
            ("start", start.to_string()),
            ("limit", limit.to_string()),
        ];
        debug!("requesting activities");

        self.get_json(paths::ACTIVITIES_SEARCH, &params).await
    }

    /// Return the most recent activity, if any.
    pub async fn get_last_activity(&self) -> Result<Option<Value>, Error> {
        let activities: Vec<Value> = self
            .get_json(
                paths::ACTIVITIES_SEARCH,
                &[("start", "0".to_owned()), ("limit", "1".to_owned())],
            )
            .await?;
        Ok(activities.into_iter().next_back())
    }

    /// Fetch every activity between `start` and `end` inclusive,
    /// optionally filtered by activity type (e.g. `"running"`).
    ///
    /// Pages through the search endpoint 20 activities at a time, the way
    /// the web interface loads on scroll, until an empty page is returned.
    pub async fn get_activities_by_date(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        activity_type: Option<&str>,
    ) -> Result<Vec<Value>, Error> {
        let mut base_params = vec![
            ("startDate", start.format("%Y-%m-%d").to_string()),
            ("endDate", end.format("%Y-%m-%d").to_string()),
        ];
        if let Some(kind) = activity_type {
            base_params.push(("activityType", kind.to_owned()));
        }
        debug!("requesting activities by date from {start} to {end}");

        self.paged_get(paths::ACTIVITIES_SEARCH, &base_params, 0, ACTIVITY_PAGE_SIZE)
            .await
    }

    /// Return the known activity types.
    pub async fn get_activity_types(&self) -> Result<Value, Error> {
        debug!("requesting activity types");
        self.get_json(paths::ACTIVITY_TYPES, &[]).await
    }

    /// Return an activity's summary view (including self-evaluation).
    pub async fn get_activity(&self, activity_id: u64) -> Result<Value, Error> {
        let path = format!("{}/{activity_id}", paths::ACTIVITY);
        debug!("requesting activity {activity_id}");

        self.get_json(&path, &[]).await
    }

    /// Return an activity's chart and polyline details.
    pub async fn get_activity_details(
        &self,
        activity_id: u64,
        max_chart_size: u32,
        max_polyline_size: u32,
    ) -> Result<Value, Error> {
        let path = format!("{}/{activity_id}/details", paths::ACTIVITY);
        let params = [
            ("maxChartSize", max_chart_size.to_string()),
            ("maxPolylineSize", max_polyline_size.to_string()),
        ];
        debug!("requesting details for activity {activity_id}");

        self.get_json(&path, &params).await
    }

    /// Return an activity's splits.
    pub async fn get_activity_splits(&self, activity_id: u64) -> Result<Value, Error> {
        let path = format!("{}/{activity_id}/splits", paths::ACTIVITY);
        debug!("requesting splits for activity {activity_id}");

        self.get_json(&path, &[]).await
    }

    /// Return an activity's split summaries.
    pub async fn get_activity_split_summaries(&self, activity_id: u64) -> Result<Value, Error> {
        let path = format!("{}/{activity_id}/split_summaries", paths::ACTIVITY);
        debug!("requesting split summaries for activity {activity_id}");

        self.get_json(&path, &[]).await
    }

    /// Return the weather recorded for an activity.
    pub async fn get_activity_weather(&self, activity_id: u64) -> Result<Value, Error> {
        let path = format!("{}/{activity_id}/weather", paths::ACTIVITY);
        debug!("requesting weather for activity {activity_id}");

        self.get_json(&path, &[]).await
    }

    /// Return time-in-zone heart rate data for an activity.
    pub async fn get_activity_hr_in_timezones(&self, activity_id: u64) -> Result<Value, Error> {
        let path = format!("{}/{activity_id}/hrTimeInZones", paths::ACTIVITY);
        debug!("requesting HR time in zones for activity {activity_id}");

        self.get_json(&path, &[]).await
    }

    /// Return exercise sets (strength activities).
    pub async fn get_activity_exercise_sets(&self, activity_id: u64) -> Result<Value, Error> {
        let path = format!("{}/{activity_id}/exerciseSets", paths::ACTIVITY);
        debug!("requesting exercise sets for activity {activity_id}");

        self.get_json(&path, &[]).await
    }

    /// Return the gear used for an activity.
    pub async fn get_activity_gear(&self, activity_id: u64) -> Result<Value, Error> {
        let params = [("activityId", activity_id.to_string())];
        debug!("requesting gear for activity {activity_id}");

        self.get_json(paths::GEAR_FILTER, &params).await
    }

    /// Download an activity in the requested format and return the raw
    /// bytes. `Original` returns zip content; extracting it is up to the
    /// caller.
    pub async fn download_activity(
        &self,
        activity_id: u64,
        format: ActivityDownloadFormat,
    ) -> Result<Bytes, Error> {
        let path = format!("{}/{activity_id}", format.base_path());
        debug!("downloading activity {activity_id} as {format:?}");

        self.get_bytes(&path).await
    }

    /// Upload an activity file (`.fit`, `.gpx`, or `.tcx`).
    ///
    /// The extension is validated before the file is read or any request
    /// is made; anything else fails with [`Error::Validation`].
    pub async fn upload_activity(&self, file: &Path) -> Result<Value, Error> {
        let extension = file
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if ActivityUploadFormat::from_extension(extension).is_none() {
            return Err(Error::Validation {
                message: format!(
                    "cannot upload {}: extension must be one of fit, gpx, tcx",
                    file.display()
                ),
            });
        }

        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("activity")
            .to_owned();
        let data = tokio::fs::read(file).await.map_err(|e| Error::Validation {
            message: format!("cannot read {}: {e}", file.display()),
        })?;

        debug!("uploading {file_name}");
        let part = reqwest::multipart::Part::bytes(data).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        self.post_multipart(paths::UPLOAD, form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_format_paths_are_distinct() {
        let formats = [
            ActivityDownloadFormat::Original,
            ActivityDownloadFormat::Tcx,
            ActivityDownloadFormat::Gpx,
            ActivityDownloadFormat::Kml,
            ActivityDownloadFormat::Csv,
        ];
        for (i, a) in formats.iter().enumerate() {
            for b in &formats[i + 1..] {
                assert_ne!(a.base_path(), b.base_path());
            }
        }
        assert_eq!(
            ActivityDownloadFormat::Original.base_path(),
            "/download-service/files/activity"
        );
    }

    #[test]
    fn upload_format_from_extension() {
        assert_eq!(
            ActivityUploadFormat::from_extension("FIT"),
            Some(ActivityUploadFormat::Fit)
        );
        assert_eq!(
            ActivityUploadFormat::from_extension("gpx"),
            Some(ActivityUploadFormat::Gpx)
        );
        assert_eq!(ActivityUploadFormat::from_extension("xml"), None);
        assert_eq!(ActivityUploadFormat::from_extension(""), None);
    }
}
