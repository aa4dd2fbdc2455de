use std::sync::Arc;

use crate::config::Config;
use crate::hub::InsightsHubClient;
use crate::store::SubmissionStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub submissions: SubmissionStore,
    pub hub: InsightsHubClient,
}
