//! One-shot launch list fetch — the whole list in a single request.
//!
//! The endpoint returns a JSON array of launch objects. Each launch is
//! trimmed down to the handful of fields we keep. A launch missing one of
//! the required keys is skipped and logged rather than failing the run.

use crate::fetch::http_client::HttpClient;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Trimmed launch record kept from the one-shot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchSummary {
    /// Launch timestamp (UTC), taken from `date_utc`.
    pub date: String,
    /// Identifier of the launchpad used.
    pub launchpad_id: String,
    /// Identifier of the rocket.
    pub rocket_id: String,
    /// Whether the launch succeeded; null for upcoming launches.
    pub success: Option<bool>,
    /// Free-text details, if any.
    pub details: Option<String>,
}

/// Map a raw launch object to its summary.
///
/// Returns `None` when a required key (`date_utc`, `launchpad`, `rocket`)
/// is missing or has the wrong shape.
pub fn summarize(raw: &Value) -> Option<LaunchSummary> {
    Some(LaunchSummary {
        date: raw.get("date_utc")?.as_str()?.to_string(),
        launchpad_id: raw.get("launchpad")?.as_str()?.to_string(),
        rocket_id: raw.get("rocket")?.as_str()?.to_string(),
        success: raw.get("success").and_then(Value::as_bool),
        details: raw
            .get("details")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Fetch the full launch list and map it to summaries.
///
/// Unlike the paginated loop there is no progress to preserve, so a
/// non-success status or a body that is not a JSON array is an error.
pub async fn fetch_spacex(client: &HttpClient, url: &str) -> Result<Vec<LaunchSummary>> {
    let resp = client
        .get(url, &[])
        .await
        .context("failed to fetch launch list")?;

    if !resp.is_success() {
        bail!("launch endpoint returned status {}", resp.status);
    }

    let launches: Vec<Value> =
        serde_json::from_str(&resp.body).context("launch list body is not a JSON array")?;

    let total = launches.len();
    let mut summaries = Vec::with_capacity(total);
    for raw in &launches {
        match summarize(raw) {
            Some(s) => summaries.push(s),
            None => warn!(
                "skipping launch with missing required fields: {}",
                raw.get("id")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("<no id>")
            ),
        }
    }

    info!("kept {} of {total} launches", summaries.len());
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize_maps_fields() {
        let raw = json!({
            "id": "5eb87d4effd86e000604b38a",
            "date_utc": "2020-05-30T19:22:00.000Z",
            "launchpad": "5e9e4502f509094188566f88",
            "rocket": "5e9d0d95eda69973a809d1ec",
            "success": true,
            "details": "First crewed flight.",
            "flight_number": 94
        });

        let summary = summarize(&raw).unwrap();
        assert_eq!(summary.date, "2020-05-30T19:22:00.000Z");
        assert_eq!(summary.launchpad_id, "5e9e4502f509094188566f88");
        assert_eq!(summary.rocket_id, "5e9d0d95eda69973a809d1ec");
        assert_eq!(summary.success, Some(true));
        assert_eq!(summary.details.as_deref(), Some("First crewed flight."));
    }

    #[test]
    fn test_summarize_allows_null_success_and_details() {
        let raw = json!({
            "date_utc": "2026-01-01T00:00:00.000Z",
            "launchpad": "pad-1",
            "rocket": "rocket-1",
            "success": null,
            "details": null
        });

        let summary = summarize(&raw).unwrap();
        assert_eq!(summary.success, None);
        assert_eq!(summary.details, None);
    }

    #[test]
    fn test_summarize_rejects_missing_required_key() {
        let raw = json!({
            "date_utc": "2026-01-01T00:00:00.000Z",
            "rocket": "rocket-1"
        });
        assert!(summarize(&raw).is_none());

        // Wrong shape counts as missing
        let raw = json!({
            "date_utc": 12345,
            "launchpad": "pad-1",
            "rocket": "rocket-1"
        });
        assert!(summarize(&raw).is_none());
    }

    #[test]
    fn test_summary_serializes_with_output_field_names() {
        let summary = LaunchSummary {
            date: "2020-05-30T19:22:00.000Z".to_string(),
            launchpad_id: "pad-1".to_string(),
            rocket_id: "rocket-1".to_string(),
            success: Some(false),
            details: None,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains(r#""launchpad_id":"pad-1""#));
        assert!(json.contains(r#""rocket_id":"rocket-1""#));
        assert!(json.contains(r#""details":null"#));
    }
}
