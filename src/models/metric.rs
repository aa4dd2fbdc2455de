use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Sub-resources queried for the dashboard, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricLabel {
    Assets,
    Agents,
    Datalake,
    Events,
    VfcFlows,
    Dashboards,
    Rules,
    Cases,
    Predictions,
    AnomalyDetections,
}

impl MetricLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricLabel::Assets => "assets",
            MetricLabel::Agents => "agents",
            MetricLabel::Datalake => "datalake",
            MetricLabel::Events => "events",
            MetricLabel::VfcFlows => "vfc_flows",
            MetricLabel::Dashboards => "dashboards",
            MetricLabel::Rules => "rules",
            MetricLabel::Cases => "cases",
            MetricLabel::Predictions => "predictions",
            MetricLabel::AnomalyDetections => "anomaly_detections",
        }
    }

    /// Data lake results are reported as `objects`, everything else as `count`.
    pub fn count_field(&self) -> &'static str {
        match self {
            MetricLabel::Datalake => "objects",
            _ => "count",
        }
    }
}

impl std::fmt::Display for MetricLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    pub label: MetricLabel,
    pub count: u64,
    pub status: MetricStatus,
    pub message: Option<String>,
}

impl MetricResult {
    pub fn success(label: MetricLabel, count: u64) -> Self {
        Self {
            label,
            count,
            status: MetricStatus::Success,
            message: None,
        }
    }

    pub fn error(label: MetricLabel, message: impl Into<String>) -> Self {
        Self {
            label,
            count: 0,
            status: MetricStatus::Error,
            message: Some(message.into()),
        }
    }
}

impl Serialize for MetricResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.message.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(self.label.count_field(), &self.count)?;
        map.serialize_entry("status", &self.status)?;
        if let Some(message) = &self.message {
            map.serialize_entry("message", message)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub success: bool,
    pub metrics: BTreeMap<MetricLabel, MetricResult>,
    pub errors: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
}

impl DashboardMetrics {
    /// Assemble the aggregate response; `errors` stays null unless a leg failed.
    pub fn from_results(results: Vec<MetricResult>) -> Self {
        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.message.as_ref().map(|m| format!("{}: {m}", r.label)))
            .collect();

        Self {
            success: true,
            metrics: results.into_iter().map(|r| (r.label, r)).collect(),
            errors: if errors.is_empty() { None } else { Some(errors) },
            timestamp: Utc::now(),
        }
    }
}
