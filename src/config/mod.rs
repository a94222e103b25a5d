//! Configuration for the match orchestrator.

/// Configuration for a [`MatchOrchestrator`](crate::MatchOrchestrator)
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Whether to evaluate large catalogs in parallel
    pub use_parallel: bool,
    /// Minimum number of valid trials before the parallel path is taken
    pub parallel_threshold: usize,
    /// Log every decision at info level as it is produced
    pub log_decisions: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            use_parallel: true,
            parallel_threshold: 64,
            log_decisions: false,
        }
    }
}

impl MatchConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a match configuration
    #[must_use]
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::new()
    }
}

/// Builder for constructing a match configuration
#[derive(Debug, Clone)]
pub struct MatchConfigBuilder {
    config: MatchConfig,
}

impl Default for MatchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: MatchConfig::default(),
        }
    }

    /// Set whether to use parallel evaluation
    #[must_use]
    pub const fn use_parallel(mut self, parallel: bool) -> Self {
        self.config.use_parallel = parallel;
        self
    }

    /// Set the minimum catalog size for parallel evaluation
    #[must_use]
    pub const fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Set whether each decision is logged as it is produced
    #[must_use]
    pub const fn log_decisions(mut self, log: bool) -> Self {
        self.config.log_decisions = log;
        self
    }

    /// Build the match configuration
    #[must_use]
    pub const fn build(self) -> MatchConfig {
        self.config
    }
}
