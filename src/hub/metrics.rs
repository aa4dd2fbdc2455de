//! Dashboard metrics: one count per Insights Hub sub-resource.

use futures_util::future::join_all;
use serde_json::Value;

use super::{InsightsHubClient, ASSETS_PATH};
use crate::models::{DashboardMetrics, MetricLabel, MetricResult};

/// Where the element count lives in a sub-resource's response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountRule {
    /// `{"page": {"totalElements": n}}`
    PageTotalElements,
    /// `{"totalElements": n}`
    TopLevelTotalElements,
}

impl CountRule {
    /// Missing or non-numeric fields count as zero.
    pub fn extract(&self, body: &Value) -> u64 {
        let field = match self {
            CountRule::PageTotalElements => body.pointer("/page/totalElements"),
            CountRule::TopLevelTotalElements => body.get("totalElements"),
        };
        field.and_then(Value::as_u64).unwrap_or(0)
    }
}

#[derive(Debug)]
pub struct SubResource {
    pub label: MetricLabel,
    pub path: &'static str,
    pub params: &'static [(&'static str, &'static str)],
    pub count_rule: CountRule,
}

pub const AGENT_TYPE_FILTER: &str = r#"{"typeId":{"contains":"core.mclib"}}"#;

const SIZE_ONE: &[(&str, &str)] = &[("size", "1")];

pub const SUB_RESOURCES: &[SubResource] = &[
    SubResource {
        label: MetricLabel::Assets,
        path: ASSETS_PATH,
        params: SIZE_ONE,
        count_rule: CountRule::PageTotalElements,
    },
    SubResource {
        label: MetricLabel::Agents,
        path: ASSETS_PATH,
        params: &[("size", "1"), ("filter", AGENT_TYPE_FILTER)],
        count_rule: CountRule::PageTotalElements,
    },
    SubResource {
        label: MetricLabel::Datalake,
        path: "/api/datalake/v3/objectMetadata",
        params: SIZE_ONE,
        count_rule: CountRule::TopLevelTotalElements,
    },
    SubResource {
        label: MetricLabel::Events,
        path: "/api/eventmanagement/v3/events",
        params: SIZE_ONE,
        count_rule: CountRule::PageTotalElements,
    },
    SubResource {
        label: MetricLabel::VfcFlows,
        path: "/api/visualflowcreator/v3/flows",
        params: SIZE_ONE,
        count_rule: CountRule::PageTotalElements,
    },
    SubResource {
        label: MetricLabel::Dashboards,
        path: "/api/dashboardmanagement/v3/dashboards",
        params: SIZE_ONE,
        count_rule: CountRule::PageTotalElements,
    },
    SubResource {
        label: MetricLabel::Rules,
        path: "/api/rulesmanagement/v3/rules",
        params: SIZE_ONE,
        count_rule: CountRule::PageTotalElements,
    },
    SubResource {
        label: MetricLabel::Cases,
        path: "/api/casemanagement/v3/cases",
        params: SIZE_ONE,
        count_rule: CountRule::PageTotalElements,
    },
    SubResource {
        label: MetricLabel::Predictions,
        path: "/api/prediction/v3/models",
        params: SIZE_ONE,
        count_rule: CountRule::PageTotalElements,
    },
    SubResource {
        label: MetricLabel::AnomalyDetections,
        path: "/api/anomalydetection/v3/models",
        params: SIZE_ONE,
        count_rule: CountRule::PageTotalElements,
    },
];

/// Query a single sub-resource. Failures are reported in the result, never returned.
pub async fn fetch(
    client: &InsightsHubClient,
    resource: &SubResource,
    authorization: &str,
) -> MetricResult {
    match client
        .get_json(resource.path, resource.params, authorization)
        .await
    {
        Ok(body) => MetricResult::success(resource.label, resource.count_rule.extract(&body)),
        Err(e) => {
            tracing::warn!(label = %resource.label, "Metric query failed: {e}");
            MetricResult::error(resource.label, e.to_string())
        }
    }
}

/// Fan out to every sub-resource concurrently and join the results.
pub async fn collect(client: &InsightsHubClient, authorization: &str) -> DashboardMetrics {
    let results = join_all(
        SUB_RESOURCES
            .iter()
            .map(|resource| fetch(client, resource, authorization)),
    )
    .await;

    let metrics = DashboardMetrics::from_results(results);
    if let Some(errors) = &metrics.errors {
        tracing::info!(
            failed = errors.len(),
            total = SUB_RESOURCES.len(),
            "Dashboard metrics collected with errors"
        );
    }
    metrics
}
