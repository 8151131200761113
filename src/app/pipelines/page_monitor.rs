use crate::config::toml_config::MonitorConfig;
use crate::core::change::{decide, ChangeKind};
use crate::core::extractor::{observe, Observation};
use crate::core::render::{self, PageChange};
use crate::domain::model::{CacheEntry, CacheMap, MonitoredSource, NotificationMessage};
use crate::domain::ports::{CacheStore, NotificationSink, PageFetcher, Pipeline};
use crate::utils::error::Result;
use chrono::{Local, NaiveDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Fetch or parse failed; the cached entry was left untouched.
    Unavailable { reason: String },
    Counted {
        previous: Option<u32>,
        current: u32,
        kind: ChangeKind,
        /// `None` when the policy chose not to notify.
        delivered: Option<bool>,
    },
}

#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: MonitoredSource,
    pub outcome: SourceOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct MonitorReport {
    pub sources: Vec<SourceReport>,
    pub cache_saved: bool,
}

impl MonitorReport {
    pub fn notifications_sent(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| matches!(s.outcome, SourceOutcome::Counted { delivered: Some(true), .. }))
            .count()
    }

    pub fn unavailable(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| matches!(s.outcome, SourceOutcome::Unavailable { .. }))
            .count()
    }

    pub fn updates_found(&self) -> bool {
        self.notifications_sent() > 0
    }
}

pub struct PlannedCheck {
    source: MonitoredSource,
    outcome: SourceOutcome,
    message: Option<NotificationMessage>,
}

pub struct MonitorPlan {
    checks: Vec<PlannedCheck>,
    cache: CacheMap,
}

pub struct PageMonitor<F: PageFetcher, N: NotificationSink, C: CacheStore> {
    fetcher: F,
    sink: N,
    cache: C,
    config: MonitorConfig,
}

impl<F: PageFetcher, N: NotificationSink, C: CacheStore> PageMonitor<F, N, C> {
    pub fn new(fetcher: F, sink: N, cache: C, config: MonitorConfig) -> Self {
        Self {
            fetcher,
            sink,
            cache,
            config,
        }
    }

    fn plan_source(
        &self,
        source: MonitoredSource,
        observation: Observation,
        cache: &mut CacheMap,
        now: NaiveDateTime,
    ) -> PlannedCheck {
        let count = match observation {
            Observation::Counted(count) => count.count(),
            Observation::Unavailable { reason } => {
                tracing::warn!("   ⚠️ {} unreadable, continuing: {}", source.display_name, reason);
                return PlannedCheck {
                    source,
                    outcome: SourceOutcome::Unavailable { reason },
                    message: None,
                };
            }
        };

        let key = source.cache_key();
        let previous = cache.get(&key).map(|entry| entry.observed_count);
        let decision = decide(self.config.notify_policy, previous, count);

        tracing::info!(
            "   📊 {}: previous {}, current {} ({:?})",
            source.display_name,
            previous.map_or_else(|| "-".to_string(), |p| p.to_string()),
            count,
            decision.kind
        );

        let message = decision.notify.then(|| {
            render::page_change(
                &self.config.sender(),
                &PageChange {
                    source: &source,
                    previous,
                    current: count,
                    kind: decision.kind,
                    checked_at: now,
                    run_url: self.config.run_url.as_deref(),
                },
            )
        });

        cache.insert(
            key,
            CacheEntry {
                url: source.url.clone(),
                observed_count: count,
                last_checked: now,
                label: source.display_name.clone(),
            },
        );

        PlannedCheck {
            source,
            outcome: SourceOutcome::Counted {
                previous,
                current: count,
                kind: decision.kind,
                delivered: None,
            },
            message,
        }
    }
}

#[async_trait::async_trait]
impl<F: PageFetcher, N: NotificationSink, C: CacheStore> Pipeline for PageMonitor<F, N, C> {
    type Observed = Vec<(MonitoredSource, Observation)>;
    type Planned = MonitorPlan;
    type Report = MonitorReport;

    fn name(&self) -> &str {
        "page monitor"
    }

    async fn extract(&self) -> Result<Self::Observed> {
        let mut observed = Vec::with_capacity(self.config.sources.len());
        for source in &self.config.sources {
            tracing::info!("🔍 Checking: {}", source.url);
            let observation = observe(self.fetcher.fetch(&source.url).await);
            observed.push((source.clone(), observation));
        }
        Ok(observed)
    }

    async fn transform(&self, observed: Self::Observed) -> Result<Self::Planned> {
        let mut cache = self.cache.load();
        let now = Local::now().naive_local();

        let checks = observed
            .into_iter()
            .map(|(source, observation)| self.plan_source(source, observation, &mut cache, now))
            .collect();

        Ok(MonitorPlan { checks, cache })
    }

    async fn load(&self, planned: Self::Planned) -> Result<Self::Report> {
        let mut report = MonitorReport::default();

        for check in planned.checks {
            let mut outcome = check.outcome;
            if let (Some(message), SourceOutcome::Counted { delivered, .. }) =
                (&check.message, &mut outcome)
            {
                *delivered = Some(self.sink.send(message).await);
            }
            report.sources.push(SourceReport {
                source: check.source,
                outcome,
            });
        }

        report.cache_saved = match self.cache.save(&planned.cache) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("❌ Cache could not be saved: {}", e);
                false
            }
        };

        if report.updates_found() {
            tracing::info!("🎉 {} notification(s) sent", report.notifications_sent());
        } else {
            tracing::info!("ℹ️ No notifications sent");
        }
        Ok(report)
    }
}
