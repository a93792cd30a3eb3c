//! Typed view of the enrichment result for human-readable output.
//!
//! The core state keeps the result payload as an opaque JSON value; this
//! module extracts the fields the CLI knows how to print. Extraction is
//! best-effort so schema drift on the server never breaks a run.

use serde::Deserialize;
use serde_json::Value;

/// The lean result schema emitted by the enrichment service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultSummary {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub ig_followers: Option<i64>,
    #[serde(default)]
    pub ig_size_score: Option<i64>,
    #[serde(default)]
    pub ig_health_score: Option<i64>,
    #[serde(default)]
    pub company_linkedin: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub number_employes: Option<i64>,
    #[serde(default)]
    pub prediction: Option<OrdersPrediction>,
}

/// Orders-estimation model output attached to the result
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersPrediction {
    pub predicted_orders_p10: i64,
    pub predicted_orders_p50: i64,
    pub predicted_orders_p90: i64,
    /// "high", "medium" or "low"
    pub prediction_confidence: String,
}

impl ResultSummary {
    /// Extract the known fields from a raw result payload.
    ///
    /// Returns `None` when the payload is not an object or a known field
    /// has an unexpected type; unknown fields are ignored, missing ones
    /// stay `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}
