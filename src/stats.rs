use crate::suite::Suite;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub tests: usize,
    pub suites: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub counts: Counts,
}

fn count_suites(suites: &[Suite]) -> usize {
    suites.len() + suites.iter().map(|s| count_suites(&s.suites)).sum::<usize>()
}

fn count_tests(suite: &Suite) -> usize {
    suite.tests.len() + suite.suites.iter().map(count_tests).sum::<usize>()
}

/// Suites below `all` (not `all` itself) and every test in the tree,
/// including tests declared directly on `all`.
pub fn stats(all: &Suite) -> Stats {
    Stats { counts: Counts { tests: count_tests(all), suites: count_suites(&all.suites) } }
}
