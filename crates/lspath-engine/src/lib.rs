// Engine - rebuilds how a shell assembled PATH from a startup trace
// Pure and synchronous: events in, frozen AnalysisResult out

pub mod diagnostics;
pub mod flow;
pub mod heuristics;
pub mod lookup;
pub mod parser;
pub mod postprocess;
pub mod reconstruct;
mod session;
mod unify;

pub use flow::build_flow_graph;
pub use lookup::{which, CommandMatch};
pub use parser::{parse_line, parse_trace, split_path_list};
pub use postprocess::{reconcile, reconcile_with, DirProber, FsProber};
pub use reconstruct::{reconstruct, Reconstruction, Reconstructor};

use lspath_types::{AnalysisResult, TraceEvent};

// Façade API - the runtime and CLI layers go through these

/// Trace view: PATH as a fresh shell started from `baseline` would build it.
pub fn analyze_trace(events: &[TraceEvent], baseline: &str) -> AnalysisResult {
    analyze_trace_with(events, baseline, &FsProber)
}

pub fn analyze_trace_with(events: &[TraceEvent], baseline: &str, prober: &impl DirProber) -> AnalysisResult {
    let Reconstruction { nodes, mut entries } = reconstruct(events, baseline);
    reconcile_with(&mut entries, prober);
    let flow_nodes = build_flow_graph(nodes, &mut entries);

    AnalysisResult {
        diagnostics: diagnostics::for_trace(&flow_nodes, &entries),
        path_entries: entries,
        flow_nodes,
    }
}

/// Unified view: the live PATH, attributed through a sandboxed trace.
pub fn analyze_unified(
    live_path: &str,
    events: &[TraceEvent],
    baseline: &str,
    extra_system_dirs: &[String],
) -> AnalysisResult {
    analyze_unified_with(live_path, events, baseline, extra_system_dirs, &FsProber)
}

pub fn analyze_unified_with(
    live_path: &str,
    events: &[TraceEvent],
    baseline: &str,
    extra_system_dirs: &[String],
    prober: &impl DirProber,
) -> AnalysisResult {
    let trace = analyze_trace_with(events, baseline, prober);
    let mut result = unify::unify(live_path, trace, extra_system_dirs, prober);
    result.diagnostics = diagnostics::for_unified(&result.flow_nodes, &result.path_entries);
    result
}

/// Session view: the live PATH alone under one "Current Session" node.
pub fn analyze_session(live_path: &str) -> AnalysisResult {
    session::session_only(live_path, &FsProber)
}
