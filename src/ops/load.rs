//! Load operation: plan, fetch, register.
//!
//! A run either registers every planned library or registers nothing. All
//! downloads are joined before any result is inspected; a single failure
//! aborts the run before the host loader is touched.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use crate::core::{DependencyTable, SearchPathIndex};
use crate::host::Host;
use crate::ops::errors::LoadError;
use crate::ops::register::register;
use crate::resolver::{plan, FetchAction, ResolutionDecision};
use crate::sources::fetcher::{sweep_stale_temp_files, STALE_TEMP_AGE};
use crate::sources::{FetchError, Fetcher, HttpClient};
use crate::util::fs::normalize_path;
use crate::util::{Config, GlobalContext};

/// Options for a load run.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Concurrent downloads (None = one per CPU, Some(1) = sequential)
    pub jobs: Option<usize>,

    /// Show a progress bar while downloading
    pub progress: bool,

    /// Fail instead of downloading
    pub offline: bool,
}

impl LoadOptions {
    /// Build options from configuration.
    pub fn from_config(config: &Config) -> Self {
        LoadOptions {
            jobs: config.fetch.jobs,
            progress: config.fetch.progress,
            offline: config.net.offline,
        }
    }
}

/// Summary of a successful load run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Dependencies already on the host search path
    pub available: usize,

    /// Dependencies served from the cache directory
    pub cached: usize,

    /// Paths downloaded during this run, in declaration order
    pub fetched: Vec<PathBuf>,

    /// Absolute paths registered with the host, in declaration order
    pub registered: Vec<PathBuf>,
}

/// Make every dependency in `table` resolvable by `host`.
pub fn load<C, H>(
    table: &DependencyTable,
    available: &SearchPathIndex,
    cache_dir: &Path,
    fetcher: &Fetcher<C>,
    host: &mut H,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError>
where
    C: HttpClient,
    H: Host + ?Sized,
{
    let plan = plan(table.specs(), available, cache_dir);

    let fetched = run_fetches(plan.pending_fetches(), cache_dir, fetcher, options)?;

    let registered = register(host, plan.paths_to_register())?;

    let report = LoadReport {
        available: plan.count(|d| *d == ResolutionDecision::AlreadyAvailable),
        cached: plan.count(|d| matches!(d, ResolutionDecision::CachedLocally(_))),
        fetched,
        registered,
    };

    tracing::info!(
        "Loaded {} libraries ({} on classpath, {} cached, {} downloaded)",
        table.len(),
        report.available,
        report.cached,
        report.fetched.len()
    );

    Ok(report)
}

/// Load the builtin libraries into `host` using the context's cache.
pub fn load_into_host<C, H>(
    ctx: &GlobalContext,
    host: &mut H,
    client: C,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError>
where
    C: HttpClient,
    H: Host + ?Sized,
{
    let table = DependencyTable::builtin()?;
    let available = SearchPathIndex::snapshot(host).map_err(LoadError::Host)?;
    let fetcher = Fetcher::new(client);

    load(&table, &available, &ctx.cache_dir(), &fetcher, host, options)
}

/// Run every pending download and join them all.
///
/// Returns the published paths in action order, or the first failure in
/// action order once every download has finished.
fn run_fetches<C: HttpClient>(
    actions: &[FetchAction],
    cache_dir: &Path,
    fetcher: &Fetcher<C>,
    options: &LoadOptions,
) -> Result<Vec<PathBuf>, LoadError> {
    if actions.is_empty() {
        return Ok(Vec::new());
    }

    if options.offline {
        return Err(LoadError::Offline {
            missing: actions.iter().map(|a| a.spec.name().to_string()).collect(),
        });
    }

    let swept = sweep_stale_temp_files(cache_dir, STALE_TEMP_AGE);
    if swept > 0 {
        tracing::debug!("removed {} abandoned download(s) from {}", swept, cache_dir.display());
    }

    let pb = if options.progress {
        let pb = ProgressBar::new(actions.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("downloading");
        Some(pb)
    } else {
        None
    };

    // Log lines must not be drawn over the bar.
    let log = |line: String| match &pb {
        Some(pb) => pb.suspend(|| tracing::info!("{}", line)),
        None => tracing::info!("{}", line),
    };

    let fetch_one = |action: &FetchAction| {
        log(format!("Started downloading: from {}", action.spec.source()));
        let result = fetcher.fetch(action);
        if let Ok(path) = &result {
            log(format!("Finished downloading: to {}", normalize_path(path).display()));
        }
        if let Some(pb) = &pb {
            pb.set_message(action.spec.name().to_string());
            pb.inc(1);
        }
        result
    };

    let results: Vec<Result<PathBuf, FetchError>> = if options.jobs == Some(1) || actions.len() == 1 {
        actions.iter().map(fetch_one).collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs.unwrap_or(0))
            .build()
            .map_err(LoadError::Workers)?;

        pool.install(|| actions.par_iter().map(fetch_one).collect())
    };

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let failures = results.iter().filter(|r| r.is_err()).count();
    if failures > 1 {
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            tracing::error!("{}", err);
        }
    }

    results.into_iter().map(|r| r.map_err(LoadError::from)).collect()
}
