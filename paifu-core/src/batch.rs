//! Parallel analysis of many matches with rayon.
//!
//! Matches share nothing but the read-only fan table, so each one runs as its
//! own rayon task. Results come back in input order.

use rayon::prelude::*;

use paifu_engine::analyzer::Analyzer;
use paifu_engine::errors::PaifuResult;
use paifu_engine::report::Report;
use paifu_engine::rule::AnalyzerRule;

use crate::match_log::{MatchLog, MatchReport};

#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Number of threads in the rayon pool. None = use rayon default (num CPUs).
    pub num_threads: Option<usize>,
    pub rule: AnalyzerRule,
}

/// Batch analyzer on a dedicated rayon ThreadPool.
pub struct BatchAnalyzer {
    pool: rayon::ThreadPool,
    rule: AnalyzerRule,
}

impl BatchAnalyzer {
    /// Build the thread pool. Fails only if rayon cannot spawn it.
    pub fn new(config: &BatchConfig) -> anyhow::Result<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = config.num_threads {
            builder = builder.num_threads(n);
        }
        let pool = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build thread pool: {}", e))?;
        Ok(Self {
            pool,
            rule: config.rule,
        })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Analyze every match in parallel. Output order matches `logs`.
    pub fn analyze_batch(&self, logs: &[MatchLog]) -> Vec<MatchReport> {
        let analyzer = Analyzer::new(self.rule);
        self.pool
            .install(|| logs.par_iter().map(|log| log.analyze(&analyzer)).collect())
    }

    /// Analyze fetched record payloads (`Wrapper` around `GameDetailRecords`).
    /// A record that fails to decode yields an error in its slot only.
    pub fn analyze_records(&self, records: &[Vec<u8>]) -> Vec<PaifuResult<Report>> {
        let analyzer = Analyzer::new(self.rule);
        self.pool.install(|| {
            records
                .par_iter()
                .map(|data| analyzer.analyze_record(data))
                .collect()
        })
    }
}

/// Convenience: analyze a batch on rayon's global thread pool.
pub fn analyze_batch_simple(logs: &[MatchLog], rule: AnalyzerRule) -> Vec<MatchReport> {
    let analyzer = Analyzer::new(rule);
    logs.par_iter().map(|log| log.analyze(&analyzer)).collect()
}
