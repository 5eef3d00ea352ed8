//! The "analysis ready" collaborator.
//!
//! Hosts that want a signal when a fresh analysis lands (a desktop
//! notification, a UI refresh) pass an implementation into the cache-aware
//! entry point. Explicit dependency injection instead of ambient global
//! state, so the core stays testable without a host environment.

use tracing::info;

use crate::analysis::RosterAnalysis;

pub trait AnalysisNotifier: Send + Sync {
    fn analysis_ready(&self, analysis: &RosterAnalysis);
}

/// Does nothing. The default for embedders that don't care.
pub struct NoopNotifier;

impl AnalysisNotifier for NoopNotifier {
    fn analysis_ready(&self, _analysis: &RosterAnalysis) {}
}

/// Logs one line per completed analysis. Used by the CLI.
pub struct LogNotifier;

impl AnalysisNotifier for LogNotifier {
    fn analysis_ready(&self, analysis: &RosterAnalysis) {
        info!(
            file = %analysis.file_identity.name,
            students = analysis.student_count,
            pass = analysis.final_score_stats.pass_count,
            fail = analysis.final_score_stats.fail_count,
            "analysis ready"
        );
    }
}
