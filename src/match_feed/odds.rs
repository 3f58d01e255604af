//! Local synthesis of display odds.
//!
//! The fixture feed carries no market prices, so each match gets a plausible
//! decimal odds triple sampled from fixed ranges.

use crate::constants::odds;
use crate::match_feed::models::Odds;
use rand::Rng;

/// Samples a decimal odds triple from the configured ranges,
/// rounded to two decimal places.
pub fn synthesize_odds<R: Rng + ?Sized>(rng: &mut R) -> Odds {
    Odds {
        home: format_odds(rng.random_range(odds::HOME_MIN..=odds::HOME_MAX)),
        draw: format_odds(rng.random_range(odds::DRAW_MIN..=odds::DRAW_MAX)),
        away: format_odds(rng.random_range(odds::AWAY_MIN..=odds::AWAY_MAX)),
    }
}

fn format_odds(value: f64) -> String {
    format!("{value:.2}")
}
