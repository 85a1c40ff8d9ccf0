//! Per-company resolution orchestration.
//!
//! Companies are processed strictly sequentially: the search API enforces
//! per-key rate limits, so concurrent fan-out would only multiply 429s. The
//! only suspension points are network calls and the deliberate pacing
//! delays. No mutable state crosses company boundaries.

use anyhow::bail;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::company::{CandidateResult, ResolutionOutcome};
use crate::config::{ConfigError, SearchConfig};
use crate::fallback::FallbackResolver;
use crate::filter;
use crate::query;
use crate::rank::{self, RankContext};
use crate::search::SearchClient;

/// Resolves company names to ranked website candidates.
pub struct Resolver {
    config: SearchConfig,
    search: SearchClient,
    fallback: FallbackResolver,
}

impl Resolver {
    /// Build a resolver, validating the configuration up front. A missing
    /// API key or engine id fails here, before any company is attempted.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let search = SearchClient::new(config.clone());
        let fallback = FallbackResolver::new(config.probe_timeout_secs);
        Ok(Self { config, search, fallback })
    }

    /// Replace the fallback resolver, e.g. one with a probe base override.
    pub fn with_fallback(mut self, fallback: FallbackResolver) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Resolve one company. Never raises: any failure inside the per-company
    /// flow is converted into an `error` outcome so one company cannot abort
    /// the rest of a batch.
    pub async fn resolve_company(&self, company_name: &str) -> ResolutionOutcome {
        let name = company_name.trim();
        match self.resolve_links(name).await {
            Ok(links) => ResolutionOutcome::complete(name, links),
            Err(err) => {
                warn!("resolution failed for \"{name}\": {err:#}");
                ResolutionOutcome::error(name, format!("{err:#}"))
            }
        }
    }

    /// Resolve companies in order, applying the configured inter-company
    /// delay between entries.
    pub async fn resolve_companies(&self, company_names: &[String]) -> Vec<ResolutionOutcome> {
        let mut outcomes = Vec::with_capacity(company_names.len());
        for (index, name) in company_names.iter().enumerate() {
            if index > 0 && self.config.search_delay_ms > 0 {
                sleep(Duration::from_millis(self.config.search_delay_ms)).await;
            }
            info!("resolving company {}/{}: {name}", index + 1, company_names.len());
            outcomes.push(self.resolve_company(name).await);
        }
        outcomes
    }

    async fn resolve_links(&self, name: &str) -> anyhow::Result<Vec<CandidateResult>> {
        if name.is_empty() {
            bail!("company name is empty");
        }

        let guesses = query::domain_guesses(name);
        let queries = query::search_queries(name);
        let max_links = self.config.max_links_per_company;

        let mut accumulated: Vec<CandidateResult> = Vec::new();
        let mut distinct_domains: HashSet<String> = HashSet::new();

        for (index, search_query) in queries.iter().enumerate() {
            if index > 0 && self.config.query_delay_ms > 0 {
                sleep(Duration::from_millis(self.config.query_delay_ms)).await;
            }

            let items = self.search.execute_query(search_query).await;
            for candidate in filter::filter_items(items) {
                distinct_domains.insert(candidate.domain.clone());
                accumulated.push(candidate);
            }

            // Stop early once the distinct-domain quota is met.
            if distinct_domains.len() >= max_links {
                debug!(
                    "\"{name}\": {} distinct domains after {} of {} queries, stopping early",
                    distinct_domains.len(),
                    index + 1,
                    queries.len()
                );
                break;
            }
        }

        if accumulated.is_empty() {
            info!("\"{name}\": search exhausted with no results, entering fallback");
            accumulated.push(self.fallback.resolve(name, &guesses).await);
        }

        let deduped = filter::deduplicate(accumulated);
        let ctx = RankContext::new(name, &guesses);
        let mut ranked = rank::rank(deduped, &ctx);
        ranked.truncate(max_links);
        Ok(ranked)
    }
}
