//! Publishing a day of health stats as a mem.ai note.

use chrono::NaiveDate;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::CliError;

const MEM_URL: &str = "https://api.mem.ai/v0/mems";

/// Render the note body: a dated heading, tags, and the raw stats in a
/// fenced code block.
pub fn note_content(date: NaiveDate, stats: &Value) -> String {
    let pretty = serde_json::to_string_pretty(stats).unwrap_or_else(|_| stats.to_string());
    format!(
        "# {} | Health stats | Vitals\n\n\
         #HealthStats #Garmin\n\n\
         ```\n{pretty}\n```\n",
        date.format("%d/%b/%Y")
    )
}

/// Post the note to mem.ai.
pub async fn publish(api_key: &str, date: NaiveDate, stats: &Value) -> Result<(), CliError> {
    debug!("posting note to mem.ai");

    let response = reqwest::Client::new()
        .post(MEM_URL)
        .header("Authorization", format!("ApiAccessToken {api_key}"))
        .json(&json!({ "content": note_content(date, stats) }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CliError::Publish {
            status: status.as_u16(),
            body,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_content_has_heading_tags_and_stats() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        let stats = json!({"totalSteps": 10421});

        let content = note_content(date, &stats);

        assert!(content.starts_with("# 01/Jun/2024 | Health stats | Vitals"));
        assert!(content.contains("#HealthStats #Garmin"));
        assert!(content.contains("\"totalSteps\": 10421"));
    }
}
