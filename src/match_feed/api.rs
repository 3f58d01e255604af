//! Fixture feed acquisition.
//!
//! One request per configured competition is issued in parallel; a failed
//! source contributes nothing and never aborts the load. The combined result
//! is filtered to future kickoffs, sorted and truncated to exactly
//! [`MATCH_COUNT`](crate::constants::funnel::MATCH_COUNT) matches, falling
//! back to the built-in set when live data is insufficient.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::constants::funnel::MATCH_COUNT;
use crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST;
use crate::error::AppError;
use crate::match_feed::extract::{flatten_fixture_payload, normalize_fixture};
use crate::match_feed::fallback::fallback_matches;
use crate::match_feed::models::Match;

/// A remote competition source the loader fans out to
#[derive(Debug, Clone, Copy)]
pub struct League {
    pub id: &'static str,
    pub label: &'static str,
}

/// The fixed competition list, one fixtures request each per load
pub const LEAGUES: [League; 4] = [
    League {
        id: "899985",
        label: "Ekstraklasa",
    },
    League {
        id: "901074",
        label: "La Liga",
    },
    League {
        id: "900326",
        label: "Premier League",
    },
    League {
        id: "899867",
        label: "Bundesliga",
    },
];

/// Creates a properly configured HTTP client with connection pooling and
/// timeout handling. All feed requests share one client so the pool is
/// actually exercised by the parallel fan-out.
pub fn create_http_client(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// Builds the fixtures endpoint URL for one competition.
pub fn build_fixtures_url(api_domain: &str, league_id: &str) -> String {
    format!("{api_domain}/api/score/events/{league_id}/fixtures")
}

/// Builds the small team logo URL, or an empty string when the feed supplied
/// no usable team identifier.
pub fn team_logo_url(api_domain: &str, team_id: &str) -> String {
    if team_id.is_empty() || team_id == "undefined" {
        return String::new();
    }
    format!("{api_domain}/api/images/teams/{team_id}/logo?size=small")
}

/// Loads the upcoming match list for a session.
///
/// Never fails: each source degrades to an empty contribution on error, and
/// when fewer than exactly [`MATCH_COUNT`] live matches survive the
/// future-time filter the whole live result is discarded in favor of the
/// built-in fallback set.
pub async fn load_upcoming_matches(client: &Client, config: &Config) -> Vec<Match> {
    let now = Utc::now();

    let fetch_futures: Vec<_> = LEAGUES
        .iter()
        .map(|league| fetch_league_fixtures(client, config, *league))
        .collect();

    let results = futures::future::join_all(fetch_futures).await;
    let all_matches: Vec<Match> = results.into_iter().flatten().collect();
    info!(
        "Combined fixture feed yielded {} raw matches across {} sources",
        all_matches.len(),
        LEAGUES.len()
    );

    match select_upcoming(all_matches, now) {
        Some(matches) => matches,
        None => {
            info!("Insufficient live fixtures, using built-in fallback set");
            let mut rng = SmallRng::from_os_rng();
            fallback_matches(now, &mut rng)
        }
    }
}

/// Filters to strictly-future parseable kickoffs, sorts ascending and takes
/// the first [`MATCH_COUNT`]. Returns `None` unless exactly that many
/// qualify. The sort is stable, so matches sharing a kickoff keep their
/// source order. Identifiers can collide across competition feeds; only the
/// first occurrence in source order is kept, so ids are unique within the
/// selected batch.
pub fn select_upcoming(matches: Vec<Match>, now: DateTime<Utc>) -> Option<Vec<Match>> {
    let mut seen_ids = HashSet::new();
    let mut timed: Vec<(DateTime<Utc>, Match)> = matches
        .into_iter()
        .filter(|m| seen_ids.insert(m.id.clone()))
        .filter_map(|m| match m.kickoff_utc() {
            Some(kickoff) if kickoff > now => Some((kickoff, m)),
            _ => None,
        })
        .collect();

    timed.sort_by_key(|(kickoff, _)| *kickoff);

    let selected: Vec<Match> = timed
        .into_iter()
        .take(MATCH_COUNT)
        .map(|(_, m)| m)
        .collect();

    (selected.len() == MATCH_COUNT).then_some(selected)
}

/// Fetches and normalizes one competition's fixtures. Any failure degrades
/// to an empty contribution for this source.
async fn fetch_league_fixtures(client: &Client, config: &Config, league: League) -> Vec<Match> {
    let url = build_fixtures_url(&config.api_domain, league.id);

    match fetch_json(client, &url).await {
        Ok(payload) => {
            let fixtures = flatten_fixture_payload(&payload);
            debug!(
                "Fetched {} raw fixtures for {} ({})",
                fixtures.len(),
                league.label,
                league.id
            );
            let mut rng = SmallRng::from_os_rng();
            fixtures
                .iter()
                .map(|fixture| normalize_fixture(fixture, league.label, &mut rng))
                .collect()
        }
        Err(e) => {
            warn!("Failed to fetch {} fixtures: {}", league.label, e);
            Vec::new()
        }
    }
}

/// Fetches a URL as JSON. Exactly one request is issued; any failure is
/// mapped and returned, leaving the degradation decision to the caller.
#[instrument(skip(client))]
async fn fetch_json(client: &Client, url: &str) -> Result<Value, AppError> {
    debug!("Fetching fixture data from URL: {url}");

    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return if e.is_timeout() {
                Err(AppError::network_timeout(url))
            } else if e.is_connect() {
                Err(AppError::network_connection(url, e.to_string()))
            } else {
                Err(AppError::ApiFetch(e))
            };
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(match status_code {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(reason, url),
            400..=499 => AppError::api_client_error(status_code, reason, url),
            502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
            _ => AppError::api_server_error(status_code, reason, url),
        });
    }

    let response_text = response.text().await.map_err(AppError::ApiFetch)?;
    debug!("Response length: {} bytes", response_text.len());

    match serde_json::from_str::<Value>(&response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            if response_text.trim().is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !response_text.trim_start().starts_with('{')
                && !response_text.trim_start().starts_with('[')
            {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}
