//! The per-worker crawl loop.
//!
//! Each worker repeatedly pops a candidate from the shared queue, consults
//! the registry and the rate limiter, fetches the page via the injected
//! collaborators, and feeds discovered links back through admission. The
//! loop ends for a worker when it observes an empty queue; completion of
//! the pool is best-effort, not a hard barrier (a worker may exit while
//! another is still about to push new work).

use crate::crawl_url::CrawlUrl;
use crate::extract::LinkExtractor;
use crate::fetch::Fetcher;
use crate::rate_limit::{epoch_millis, DomainRateLimiter};
use crate::registry::UrlState;
use crate::scheduler::{Admission, QueuedUrl, Scheduler};
use crate::scope::ScopeFilter;
use crate::stats::StatCollector;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Upper bound on one cooldown nap, so a worker re-checks the queue for
/// other ready domains instead of sleeping out a whole delay window.
const COOLDOWN_TICK_MS: u64 = 20;

/// Everything a worker shares with its siblings.
#[derive(Clone)]
pub(crate) struct WorkerContext {
    pub scheduler: Arc<Scheduler>,
    pub limiter: Arc<DomainRateLimiter>,
    pub scope: Arc<ScopeFilter>,
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn LinkExtractor>,
    pub stats: Arc<StatCollector>,
    pub delay_ms: u64,
    pub max_depth: Option<u32>,
    pub shutdown: Arc<AtomicBool>,
}

pub(crate) async fn run_worker(id: usize, ctx: WorkerContext) {
    debug!("worker {} started", id);
    while !ctx.shutdown.load(Ordering::SeqCst) {
        let Some(item) = ctx.scheduler.next() else {
            break;
        };
        process_item(&ctx, item).await;
    }
    debug!("worker {} exiting", id);
}

async fn process_item(ctx: &WorkerContext, item: QueuedUrl) {
    let QueuedUrl { url, ready_at } = item;

    // Stale duplicate still in the queue from an earlier enqueue.
    match ctx.scheduler.registry().state(url.key()) {
        Some(UrlState::Processed) | None => return,
        Some(UrlState::Unknown) | Some(UrlState::Queued) => {}
    }

    let now = epoch_millis();
    if now < ready_at {
        // Re-offered item whose domain is still cooling down. Put it back
        // and nap briefly so a lone worker does not spin on the queue.
        let nap = (ready_at - now).min(COOLDOWN_TICK_MS);
        ctx.scheduler.requeue(url, ready_at);
        tokio::time::sleep(Duration::from_millis(nap)).await;
        return;
    }

    let domain = url.domain().to_string();
    if !ctx.limiter.is_eligible(&domain, now, ctx.delay_ms) {
        // Another worker touched the domain since this item was queued.
        let ready = ctx.limiter.ready_at(&domain, ctx.delay_ms);
        trace!("domain {} cooling down, re-offering {}", domain, url);
        ctx.stats.increment_cooldown_requeues();
        ctx.scheduler.requeue(url, ready);
        return;
    }

    // Commit to this fetch: record the pacing timestamp, then make the
    // state terminal. Success or failure, the identity is fetched at most
    // once.
    ctx.limiter.mark_fetched(&domain, now);
    ctx.scheduler.registry().mark_processed(url.key());
    ctx.stats.increment_pages_visited();

    println!("Visiting: {}", url);

    let body = match ctx.fetcher.fetch(url.url()).await {
        Ok(body) => body,
        Err(e) => {
            warn!("fetch failed for {}: {}", url, e);
            ctx.stats.increment_fetch_failures();
            return;
        }
    };
    ctx.stats.increment_pages_fetched();
    ctx.stats.add_bytes_fetched(body.len());

    for link in ctx.extractor.extract_links(url.url(), &body) {
        ctx.stats.increment_links_discovered();
        let child = match CrawlUrl::parse(&link, url.depth() + 1) {
            Ok(child) => child,
            // Malformed hrefs are expected page noise; drop silently.
            Err(_) => continue,
        };
        if !ctx.scope.is_allowed(&child) {
            ctx.stats.increment_out_of_scope();
            continue;
        }
        match ctx.scheduler.enqueue_discovered(child, ctx.max_depth) {
            Admission::Enqueued => ctx.stats.increment_urls_enqueued(),
            Admission::AlreadyKnown => ctx.stats.increment_duplicates_skipped(),
            Admission::BeyondDepth => ctx.stats.increment_beyond_depth(),
        }
    }
}
