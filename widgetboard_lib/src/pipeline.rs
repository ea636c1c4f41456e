//! Fetch → extract for indicator requests, and fetch → list for the startup
//! option population.

use std::time::Duration;

use datamule_api::Client;
use tokio::task::JoinSet;

use crate::catalog::Catalog;
use crate::error::WidgetError;
use crate::extract::extract_series;
use crate::options::list_options;
use crate::registry::WidgetRegistry;
use crate::types::{ComponentOption, IndicatorSeries};

/// The one pipeline every indicator widget goes through.
#[derive(Clone)]
pub struct IndicatorPipeline {
    client: Client,
}

impl IndicatorPipeline {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches `source` and extracts the series for `discriminator`.
    ///
    /// Single attempt. The fetch is the only await point; a failed fetch is
    /// returned as [`WidgetError::Fetch`] without touching the extractor.
    pub async fn series(
        &self,
        source: &str,
        discriminator: &str,
    ) -> Result<IndicatorSeries, WidgetError> {
        let raw = self.client.fetch_csv(source).await?;
        let series = extract_series(&raw, discriminator)?;
        tracing::debug!(
            "Extracted {} points for '{}' from {}",
            series.len(),
            discriminator,
            source
        );
        Ok(series)
    }

    /// Fetches `source` and lists its components. Any failure yields no options.
    pub async fn options(&self, source: &str) -> Vec<ComponentOption> {
        match self.client.fetch_csv(source).await {
            Ok(raw) => list_options(&raw),
            Err(e) => {
                tracing::warn!("Could not list options from {}: {}", source, e);
                Vec::new()
            }
        }
    }

    /// Resolves options for every indicator in `catalog` and builds the registry.
    ///
    /// Sources are fetched concurrently. Whatever has not finished within
    /// `deadline` is abandoned; those widgets, like failed ones, fall back to
    /// their catalog options (often none).
    pub async fn populate(&self, catalog: &Catalog, deadline: Duration) -> WidgetRegistry {
        let mut resolved: Vec<Option<Vec<ComponentOption>>> = vec![None; catalog.indicators.len()];

        let mut tasks = JoinSet::new();
        for (idx, entry) in catalog.indicators.iter().enumerate() {
            let pipeline = self.clone();
            let source = entry.source.clone();
            tasks.spawn(async move { (idx, pipeline.options(&source).await) });
        }

        let collect = async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((idx, options)) => resolved[idx] = Some(options),
                    Err(e) => tracing::error!("Option listing task failed: {}", e),
                }
            }
        };
        if tokio::time::timeout(deadline, collect).await.is_err() {
            tracing::warn!(
                "Option population exceeded {}s, continuing with what resolved",
                deadline.as_secs_f64()
            );
            tasks.abort_all();
        }

        let mut registry = WidgetRegistry::new();
        for (entry, live) in catalog.indicators.iter().zip(resolved) {
            let live = live.unwrap_or_default();
            let options = if live.is_empty() {
                entry.options.clone()
            } else {
                live
            };
            if options.is_empty() {
                tracing::warn!("Widget {} has no options", entry.endpoint);
            } else {
                tracing::info!(
                    "Widget {} resolved {} options",
                    entry.endpoint,
                    options.len()
                );
            }
            registry.insert_indicator(entry, options);
        }
        for widget in &catalog.widgets {
            registry.insert(widget.clone());
        }
        registry
    }
}
