/**
 * Limits of the definition substitution.
 */

/// Default ceiling for the length of a single substituted regex.
pub const DEFAULT_MAX_REGEX_LEN: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Substitution passes allowed before giving up; `None` means one more
    /// than the number of definitions.
    pub max_passes: Option<usize>,
    /// Length a regex may grow to during substitution.
    pub max_regex_len: usize,
}

impl Config {
    pub fn new() -> Self {
        Self{ max_passes: None, max_regex_len: DEFAULT_MAX_REGEX_LEN }
    }

    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = Some(passes);
        self
    }

    pub fn with_max_regex_len(mut self, len: usize) -> Self {
        self.max_regex_len = len;
        self
    }

    pub(crate) fn pass_ceiling(&self, definitions: usize) -> usize {
        self.max_passes.unwrap_or(definitions + 1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn ceiling_follows_definition_count() {
        assert_eq!(Config::default().pass_ceiling(4), 5);
        assert_eq!(Config::new().with_max_passes(2).pass_ceiling(4), 2);
    }
}
