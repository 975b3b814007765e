/*!
 * Diagnostics
 * Opt-in tracing of step entry, context enrichment, and final decisions
 */

use crate::core::Decision;
use std::fmt;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Read-only observer of pipeline evaluation
///
/// Hooks fire in order: step entry, then enrichment when the step produced a
/// patch, and once per evaluation the final decision. Observers receive
/// borrows and return nothing, so swapping or disabling one cannot change
/// the computed result.
pub trait PipelineObserver: Send + Sync {
    fn step_entered(&self, pipeline: &str, step: &str);
    fn context_enriched(&self, pipeline: &str, step: &str, patch: &dyn fmt::Debug);
    fn decision_reached(&self, pipeline: &str, decision: &Decision);
}

/// Observer that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn step_entered(&self, _pipeline: &str, _step: &str) {}
    fn context_enriched(&self, _pipeline: &str, _step: &str, _patch: &dyn fmt::Debug) {}
    fn decision_reached(&self, _pipeline: &str, _decision: &Decision) {}
}

/// Observer that emits line-oriented traces through the `tracing` crate
///
/// Every line is tagged with the pipeline name for correlation across
/// concurrent evaluations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn step_entered(&self, pipeline: &str, step: &str) {
        debug!(target: "railguard", "[{}] entering step '{}'", pipeline, step);
    }

    fn context_enriched(&self, pipeline: &str, step: &str, patch: &dyn fmt::Debug) {
        debug!(
            target: "railguard",
            "[{}] step '{}' enriched context: {:?}", pipeline, step, patch
        );
    }

    fn decision_reached(&self, pipeline: &str, decision: &Decision) {
        debug!(target: "railguard", "[{}] final decision: {:?}", pipeline, decision);
    }
}

/// Initialize structured tracing for hosts that do not install their own
/// subscriber
///
/// Environment variables:
/// - RUST_LOG: set log level (default: info)
/// - RAILGUARD_TRACE_JSON: enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RAILGUARD_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        // JSON output for production/parsing
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        // Human-readable output for development
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).compact())
            .init();
    }
}
