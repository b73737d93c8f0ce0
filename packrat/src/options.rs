/// Matcher settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    memoize: bool,
    max_depth: usize,
}

impl Options {
    /// Memoization on, nesting capped at 50 000 rules.
    pub fn new() -> Self {
        Options {
            memoize: true,
            max_depth: 50_000,
        }
    }

    /// Turns the memo off. Results do not change, only the amount of work.
    pub fn memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// How deep rules may nest before the parse is abandoned with
    /// [`MatchError::StackLimitExceeded`](crate::MatchError::StackLimitExceeded).
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn is_memoized(&self) -> bool {
        self.memoize
    }

    pub fn depth_limit(&self) -> usize {
        self.max_depth
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert!(options.is_memoized());
        assert_eq!(options.depth_limit(), 50_000);
        assert_eq!(options, Options::new());
    }

    #[test]
    fn setters_chain() {
        let options = Options::new().memoize(false).max_depth(8);
        assert!(!options.is_memoized());
        assert_eq!(options.depth_limit(), 8);
    }
}
