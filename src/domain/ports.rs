use crate::domain::model::{CacheMap, NotificationMessage};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page body as text. Non-2xx answers are errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one message. Failures are logged by the sink and reported as `false`.
    async fn send(&self, message: &NotificationMessage) -> bool;
}

pub trait CacheStore: Send + Sync {
    /// Never fails: a missing or unreadable cache is an empty one.
    fn load(&self) -> CacheMap;
    fn save(&self, entries: &CacheMap) -> Result<()>;
}

#[async_trait]
impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    async fn send(&self, message: &NotificationMessage) -> bool {
        (**self).send(message).await
    }
}

/// One run split into its three phases: observe, decide, act.
#[async_trait]
pub trait Pipeline: Send + Sync {
    type Observed: Send;
    type Planned: Send;
    type Report: Send;

    fn name(&self) -> &str;
    async fn extract(&self) -> Result<Self::Observed>;
    async fn transform(&self, observed: Self::Observed) -> Result<Self::Planned>;
    async fn load(&self, planned: Self::Planned) -> Result<Self::Report>;
}
