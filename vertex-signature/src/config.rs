//! Configuration for the refinement engine.

/// Passes granted on top of `2 × |V|` when no explicit budget is set.
pub const DEFAULT_EXTRA_PASSES: usize = 5;

/// Configuration for [`Engine`](crate::Engine).
///
/// The pass budget is the only safety bound on refinement. The default,
/// `2 × |V| + 5`, is enough for every finite simple graph because each
/// expansion grows tree depth by one and no path can outgrow the vertex count
/// before closing a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Explicit pass budget. `None` derives it from the vertex count.
    pub max_passes: Option<usize>,

    /// Slack added to `2 × |V|` when `max_passes` is `None`.
    pub extra_passes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_passes: None,
            extra_passes: DEFAULT_EXTRA_PASSES,
        }
    }
}

impl EngineConfig {
    /// Create a config with a fixed pass budget.
    ///
    /// A budget that is too small for the graph ends in
    /// `ConvergenceKind::NonConvergence`.
    pub fn with_max_passes(max_passes: usize) -> Self {
        Self {
            max_passes: Some(max_passes),
            ..Self::default()
        }
    }

    /// Create a config deriving the budget from the vertex count with custom slack.
    pub fn with_extra_passes(extra_passes: usize) -> Self {
        Self {
            max_passes: None,
            extra_passes,
        }
    }

    /// Resolve the pass budget for a graph with `vertex_count` vertices.
    pub fn pass_budget(&self, vertex_count: usize) -> usize {
        self.max_passes
            .unwrap_or_else(|| vertex_count.saturating_mul(2).saturating_add(self.extra_passes))
    }
}
