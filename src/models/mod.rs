pub mod metric;
pub mod submission;

pub use metric::{DashboardMetrics, MetricLabel, MetricResult, MetricStatus};
pub use submission::Submission;
