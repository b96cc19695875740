//! The core Crawler implementation.
//!
//! This module defines the `Crawler` struct, the orchestrator that ties
//! together the scheduler, rate limiter, scope filter, and the injected
//! fetch/extract collaborators to execute a crawl. It owns no hidden
//! globals: all shared state is constructed here and passed to workers by
//! `Arc`, so multiple independent crawls can run in one process.

use crate::builder::CrawlConfig;
use crate::crawler::worker::{run_worker, WorkerContext};
use crate::error::CrawlError;
use crate::extract::LinkExtractor;
use crate::fetch::Fetcher;
use crate::rate_limit::DomainRateLimiter;
use crate::scheduler::Scheduler;
use crate::scope::ScopeFilter;
use crate::stats::StatCollector;
use futures_util::future::join_all;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

/// Orchestrates a single crawl run over a fixed pool of workers.
pub struct Crawler {
    scheduler: Arc<Scheduler>,
    limiter: Arc<DomainRateLimiter>,
    scope: Arc<ScopeFilter>,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    stats: Arc<StatCollector>,
    shutdown: Arc<AtomicBool>,
    config: CrawlConfig,
}

impl Crawler {
    pub(crate) fn new(
        scheduler: Arc<Scheduler>,
        limiter: Arc<DomainRateLimiter>,
        scope: Arc<ScopeFilter>,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
        config: CrawlConfig,
    ) -> Self {
        Crawler {
            scheduler,
            limiter,
            scope,
            fetcher,
            extractor,
            stats: Arc::new(StatCollector::new()),
            shutdown: Arc::new(AtomicBool::new(false)),
            config,
        }
    }

    /// A cloned handle to the statistics collector, valid during and
    /// after the crawl.
    pub fn stats(&self) -> Arc<StatCollector> {
        Arc::clone(&self.stats)
    }

    /// A cloned handle to the scheduler, useful for inspecting registry
    /// state after the crawl completes.
    pub fn scheduler(&self) -> Arc<Scheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Runs the crawl to completion.
    ///
    /// Spawns the configured number of workers and awaits them all with no
    /// timeout; the pool is done when every worker has observed an empty
    /// queue. Ctrl-C flips a shutdown flag that workers check between
    /// items, so an interrupted crawl still drains in-flight fetches.
    pub async fn start_crawl(self) -> Result<(), CrawlError> {
        info!(
            "starting crawl: workers={}, delay_ms={}, max_depth={}, limited={}, seeds_queued={}",
            self.config.workers,
            self.config.delay_ms,
            self.config
                .max_depth
                .map_or_else(|| "unlimited".to_string(), |d| d.to_string()),
            self.config.limit_to_seeds,
            self.scheduler.queued_len(),
        );

        let ctx = WorkerContext {
            scheduler: Arc::clone(&self.scheduler),
            limiter: Arc::clone(&self.limiter),
            scope: Arc::clone(&self.scope),
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
            stats: Arc::clone(&self.stats),
            delay_ms: self.config.delay_ms,
            max_depth: self.config.max_depth,
            shutdown: Arc::clone(&self.shutdown),
        };

        let handles: Vec<_> = (0..self.config.workers)
            .map(|id| tokio::spawn(run_worker(id, ctx.clone())))
            .collect();

        let mut pool = join_all(handles);
        let results = tokio::select! {
            results = &mut pool => results,
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, initiating graceful shutdown");
                self.shutdown.store(true, Ordering::SeqCst);
                pool.await
            }
        };

        for result in results {
            if let Err(e) = result {
                error!("worker task failed: {}", e);
            }
        }

        info!(
            "crawl finished: {} pages visited, {} identities registered, {} domains touched",
            self.stats.pages_visited.load(Ordering::SeqCst),
            self.scheduler.registry().len(),
            self.limiter.tracked_domains(),
        );
        Ok(())
    }
}
