//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

#![allow(dead_code)]

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Funnel flow sizing and timing
pub mod funnel {
    use std::time::Duration;

    /// Number of matches presented in the first batch
    pub const BATCH_ONE_SIZE: usize = 3;

    /// Number of matches presented in the second batch
    pub const BATCH_TWO_SIZE: usize = 2;

    /// Total number of matches a session is built from
    pub const MATCH_COUNT: usize = BATCH_ONE_SIZE + BATCH_TWO_SIZE;

    /// Delay between completing batch one and showing batch two
    pub const BATCH_ADVANCE_DELAY: Duration = Duration::from_millis(400);

    /// Delay between completing batch two and showing the first gate
    pub const GATE_ADVANCE_DELAY: Duration = Duration::from_millis(600);
}

/// Ranges for locally synthesized decimal odds
pub mod odds {
    /// Home win odds range
    pub const HOME_MIN: f64 = 1.2;
    pub const HOME_MAX: f64 = 3.5;

    /// Draw odds range
    pub const DRAW_MIN: f64 = 2.8;
    pub const DRAW_MAX: f64 = 4.5;

    /// Away win odds range
    pub const AWAY_MIN: f64 = 1.5;
    pub const AWAY_MAX: f64 = 5.5;
}

/// Fallback fixture timing
pub mod fallback {
    /// Hours between consecutive fallback kickoffs, measured from load time
    pub const KICKOFF_SPACING_HOURS: i64 = 5;
}

/// UI polling intervals in milliseconds
pub mod polling {
    /// Polling interval for the interactive event loop
    pub const EVENT_POLL_MS: u64 = 50;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "TYPER_API_DOMAIN";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "TYPER_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "TYPER_HTTP_TIMEOUT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funnel_constants_are_consistent() {
        assert_eq!(
            funnel::MATCH_COUNT,
            funnel::BATCH_ONE_SIZE + funnel::BATCH_TWO_SIZE
        );
        assert!(funnel::BATCH_ONE_SIZE > 0);
        assert!(funnel::BATCH_TWO_SIZE > 0);
        // The gate transition is the longer of the two pauses
        assert!(funnel::GATE_ADVANCE_DELAY >= funnel::BATCH_ADVANCE_DELAY);
    }

    #[test]
    fn test_odds_ranges_are_ordered() {
        assert!(odds::HOME_MIN < odds::HOME_MAX);
        assert!(odds::DRAW_MIN < odds::DRAW_MAX);
        assert!(odds::AWAY_MIN < odds::AWAY_MAX);
        // All odds stay above even money
        assert!(odds::HOME_MIN > 1.0);
        assert!(odds::DRAW_MIN > 1.0);
        assert!(odds::AWAY_MIN > 1.0);
    }

    #[test]
    fn test_env_var_names_are_not_empty() {
        assert!(!env_vars::API_DOMAIN.is_empty());
        assert!(!env_vars::LOG_FILE.is_empty());
        assert!(!env_vars::HTTP_TIMEOUT.is_empty());
    }
}
