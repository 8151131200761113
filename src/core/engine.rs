use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct RunEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RunEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<P::Report> {
        let name = self.pipeline.name();
        tracing::info!("🔍 {} run started", name);

        let observed = self.pipeline.extract().await?;
        tracing::debug!("{}: observation phase done", name);

        let planned = self.pipeline.transform(observed).await?;
        tracing::debug!("{}: decision phase done", name);

        let report = self.pipeline.load(planned).await?;
        tracing::info!("🏁 {} run finished", name);

        Ok(report)
    }
}
