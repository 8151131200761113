use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("Making page request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("Page response status: {}", response.status());

        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }
}
