/// Tuning values for building trees.
///
/// Passed explicitly to the builder; there is no process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Highest tree the builder accepts. Evaluation and drop recurse once
    /// per level, so this bounds the stack they use.
    pub max_depth: usize,
}

impl Config {
    pub const DEFAULT_MAX_DEPTH: usize = 1024;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
