//! Optimise command implementation
//!
//! Runs the seed search for the configured `(k, l, n)` and reports the
//! winner without touching any session.

use fairpick_optimiser::{OptimisationResult, OptimiserCache};
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::{CliError, Result};

/// Serialisable summary of an optimisation.
#[derive(Debug, Serialize)]
pub struct OptimiseReport {
    /// Generator family display name
    pub method: String,
    /// Winning seed
    pub seed: u64,
    /// Population variance of draw counts
    pub variance: f64,
    /// Standard deviation of draw counts
    pub std_dev: f64,
    /// Expected draws per name
    pub expected: f64,
    /// Candidates scored
    pub trials: usize,
    /// Strategy searched
    pub strategy: &'static str,
    /// Pool indices, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<Vec<usize>>,
}

impl OptimiseReport {
    /// Builds the report for `result`.
    pub fn new(result: &OptimisationResult, show_pool: bool) -> Self {
        let band = result.band();
        Self {
            method: result.family().name().to_string(),
            seed: result.seed(),
            variance: result.variance,
            std_dev: band.std_dev,
            expected: band.expected,
            trials: result.trials,
            strategy: result.strategy,
            pool: show_pool.then(|| result.pool.as_slice().to_vec()),
        }
    }
}

/// Run the optimise command
pub fn run(config: &AppConfig, format: &str, show_pool: bool) -> Result<()> {
    if !matches!(format, "table" | "json") {
        return Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: table, json",
            format
        )));
    }

    let params = config.params()?;
    let strategy = config.strategy_kind();
    info!("Starting optimisation...");
    info!("  Sessions (k): {}", params.sessions());
    info!("  Picks per session (l): {}", params.picks_per_session());
    info!("  Class size (n): {}", params.class_size());
    info!("  Strategy: {}", strategy);

    let mut cache = OptimiserCache::new();
    let result = cache.get_or_optimise(params, &strategy)?;
    let report = OptimiseReport::new(&result, show_pool);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let band = result.band();
        println!("Method:    {}", report.method);
        println!("Seed:      {}", report.seed);
        println!("Variance:  {:.4}", report.variance);
        println!("Std dev:   {:.2}", report.std_dev);
        println!(
            "Each name will be picked about {:.2} to {:.2} times.",
            band.lower(),
            band.upper()
        );
        if let Some(pool) = &report.pool {
            let numbers: Vec<String> = pool.iter().map(|i| (i + 1).to_string()).collect();
            println!("Pool:      {}", numbers.join(" "));
        }
    }

    info!("Optimisation complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::config_in;

    #[test]
    fn test_report_fields() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut cache = OptimiserCache::new();
        let result = cache
            .get_or_optimise(config.params().unwrap(), &config.strategy_kind())
            .unwrap();

        let report = OptimiseReport::new(&result, true);
        assert_eq!(report.method, "Uniform Shuffle");
        assert_eq!(report.variance, 0.0);
        assert_eq!(report.expected, 2.0);
        assert_eq!(report.pool.as_ref().map(Vec::len), Some(6));

        let json = serde_json::to_value(OptimiseReport::new(&result, false)).unwrap();
        assert!(json.get("pool").is_none());
        assert_eq!(json["strategy"], "shuffle");
    }

    #[test]
    fn test_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&config_in(dir.path()), "xml", false).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
