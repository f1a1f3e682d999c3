use super::{ApiClient, ApiError};
use crate::{models::DashboardMetrics, normalize::normalize_metrics};

impl ApiClient {
    pub async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        let value = self.get(&["dashboard", "metrics"], &[]).await?;
        Ok(normalize_metrics(&value))
    }
}
