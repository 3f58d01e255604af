//! Football Match Prediction Funnel Library
//!
//! This library provides the logical core of a prediction funnel: a loader
//! that acquires five upcoming fixtures from several competition feeds (with
//! a built-in fallback set), and a state machine that walks a user through
//! two batches of predictions and two yes/no gates into one of three fixed
//! bonus offers.
//!
//! # Examples
//!
//! ```rust,no_run
//! use typer_funnel::config::Config;
//! use typer_funnel::error::AppError;
//! use typer_funnel::funnel::FunnelSession;
//! use typer_funnel::match_feed::{create_http_client, load_upcoming_matches};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = create_http_client(config.http_timeout_seconds)?;
//!
//!     // Never fails: degrades to the built-in fallback set
//!     let matches = load_upcoming_matches(&client, &config).await;
//!
//!     let mut session = FunnelSession::new();
//!     session.complete_load(matches);
//!
//!     for m in session.visible_batch() {
//!         println!("{} - {}", m.home_team, m.away_team);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod funnel;
pub mod logging;
pub mod match_feed;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use funnel::{FunnelSession, FunnelState, GateAnswer, OfferKind, PickOutcome, Prediction};
pub use match_feed::{Match, Odds, create_http_client, load_upcoming_matches};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
