use crate::domain::model::{Credentials, FetchResult};
use async_trait::async_trait;

/// Anything that can turn a credential pair into a points value.
///
/// The Telegram layer depends on this port rather than on the portal client
/// directly, so conversation handling can be tested with a mock source.
#[async_trait]
pub trait PointsSource: Send + Sync {
    async fn fetch_points(&self, credentials: &Credentials) -> FetchResult;
}
