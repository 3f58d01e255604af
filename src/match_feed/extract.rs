//! Normalization of heterogeneous fixture payloads.
//!
//! The fixture gateway fronts several upstream providers and the response
//! shape varies with the competition: a bare array, an array wrapped in
//! `data` / `fixtures` / `matches`, or a `rounds` list where each round holds
//! its own `matches`. Field names inside a fixture vary too (nested team
//! objects vs. flat snake_case vs. camelCase). Every field is therefore
//! resolved through an ordered list of extraction rules, applied in priority
//! order until one yields a value.

use rand::Rng;
use serde_json::{Map, Value};
use tracing::debug;

use crate::match_feed::models::Match;
use crate::match_feed::odds::synthesize_odds;

/// Placeholder shown when a fixture carries no home team name
pub const HOME_PLACEHOLDER: &str = "home side";
/// Placeholder shown when a fixture carries no away team name
pub const AWAY_PLACEHOLDER: &str = "away side";

/// Internal tag carrying a round label down from the `rounds` wrapper shape
const ROUND_TAG: &str = "_round";

/// JSON pointers tried in order when resolving the fixture identifier
const MATCH_ID_RULES: &[&str] = &["/id", "/event_id"];

const HOME_TEAM_ID_RULES: &[&str] = &[
    "/homeTeam/id",
    "/home_team/id",
    "/homeTeamId",
    "/home_team_id",
];

const AWAY_TEAM_ID_RULES: &[&str] = &[
    "/awayTeam/id",
    "/away_team/id",
    "/awayTeamId",
    "/away_team_id",
];

const HOME_TEAM_NAME_RULES: &[&str] = &["/homeTeam/name", "/home_team/name"];

const AWAY_TEAM_NAME_RULES: &[&str] = &["/awayTeam/name", "/away_team/name"];

const KICKOFF_RULES: &[&str] = &["/startTime", "/start_time", "/date", "/utc_date", "/utcDate"];

const ROUND_RULES: &[&str] = &["/round", "/_round"];

/// Flattens any of the known response shapes into a plain list of raw
/// fixture objects. Items nested under `rounds` are tagged with their round's
/// label (from `round`, `name` or `id` on the round object) when the fixture
/// doesn't carry one itself. Unknown shapes flatten to an empty list.
pub fn flatten_fixture_payload(payload: &Value) -> Vec<Value> {
    if let Some(list) = payload.as_array() {
        return list.clone();
    }

    for wrapper in ["data", "fixtures", "matches"] {
        if let Some(list) = payload.get(wrapper).and_then(Value::as_array) {
            return list.clone();
        }
    }

    if let Some(rounds) = payload.get("rounds").and_then(Value::as_array) {
        let mut fixtures = Vec::new();
        for round_item in rounds {
            let Some(round_matches) = round_item.get("matches").and_then(Value::as_array) else {
                continue;
            };
            let round_label = ["round", "name", "id"]
                .iter()
                .find_map(|key| round_item.get(*key).and_then(value_as_string));

            for fixture in round_matches {
                fixtures.push(tag_round(fixture, round_label.as_deref()));
            }
        }
        return fixtures;
    }

    debug!("Unrecognized fixture payload shape, contributing no fixtures");
    Vec::new()
}

/// Maps a raw fixture object into a [`Match`], defaulting every missing
/// field rather than failing. Odds are synthesized locally since the feed
/// carries none.
pub fn normalize_fixture<R: Rng + ?Sized>(
    fixture: &Value,
    league_label: &str,
    rng: &mut R,
) -> Match {
    let id = extract_first(fixture, MATCH_ID_RULES)
        .unwrap_or_else(|| format!("gen-{}", rng.random_range(1_000_000u32..10_000_000)));

    let round = extract_first(fixture, ROUND_RULES).unwrap_or_else(|| league_label.to_string());

    Match {
        id,
        home_team: extract_first(fixture, HOME_TEAM_NAME_RULES)
            .unwrap_or_else(|| HOME_PLACEHOLDER.to_string()),
        home_team_id: extract_first(fixture, HOME_TEAM_ID_RULES).unwrap_or_default(),
        away_team: extract_first(fixture, AWAY_TEAM_NAME_RULES)
            .unwrap_or_else(|| AWAY_PLACEHOLDER.to_string()),
        away_team_id: extract_first(fixture, AWAY_TEAM_ID_RULES).unwrap_or_default(),
        date: extract_first(fixture, KICKOFF_RULES).unwrap_or_default(),
        round,
        odds: Some(synthesize_odds(rng)),
    }
}

/// Applies extraction rules in priority order until one succeeds.
fn extract_first(fixture: &Value, rules: &[&str]) -> Option<String> {
    rules
        .iter()
        .find_map(|pointer| fixture.pointer(pointer).and_then(value_as_string))
}

/// Accepts strings and numbers; feeds disagree on identifier types.
fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn tag_round(fixture: &Value, round_label: Option<&str>) -> Value {
    let Some(label) = round_label else {
        return fixture.clone();
    };
    let mut object = match fixture.as_object() {
        Some(map) => map.clone(),
        None => Map::new(),
    };
    object
        .entry(ROUND_TAG.to_string())
        .or_insert_with(|| Value::String(label.to_string()));
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use serde_json::json;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(1)
    }

    #[test]
    fn test_flatten_bare_array() {
        let payload = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(flatten_fixture_payload(&payload).len(), 2);
    }

    #[test]
    fn test_flatten_wrapped_arrays() {
        for wrapper in ["data", "fixtures", "matches"] {
            let payload = json!({ wrapper: [{"id": 1}] });
            assert_eq!(flatten_fixture_payload(&payload).len(), 1, "{wrapper}");
        }
    }

    #[test]
    fn test_flatten_rounds_tags_round_label() {
        let payload = json!({
            "rounds": [
                { "round": "Kolejka 5", "matches": [{"id": 1}, {"id": 2}] },
                { "name": "Kolejka 6", "matches": [{"id": 3}] },
                { "id": 7, "matches": [{"id": 4}] }
            ]
        });
        let fixtures = flatten_fixture_payload(&payload);
        assert_eq!(fixtures.len(), 4);
        assert_eq!(fixtures[0]["_round"], "Kolejka 5");
        assert_eq!(fixtures[2]["_round"], "Kolejka 6");
        assert_eq!(fixtures[3]["_round"], "7");
    }

    #[test]
    fn test_flatten_rounds_does_not_overwrite_existing_tag() {
        let payload = json!({
            "rounds": [
                { "round": "outer", "matches": [{"id": 1, "_round": "inner"}] }
            ]
        });
        let fixtures = flatten_fixture_payload(&payload);
        assert_eq!(fixtures[0]["_round"], "inner");
    }

    #[test]
    fn test_flatten_unknown_shape_is_empty() {
        assert!(flatten_fixture_payload(&json!({"status": "ok"})).is_empty());
        assert!(flatten_fixture_payload(&json!(null)).is_empty());
        assert!(flatten_fixture_payload(&json!("nope")).is_empty());
    }

    #[test]
    fn test_normalize_nested_team_objects() {
        let fixture = json!({
            "id": 555,
            "homeTeam": { "id": 8023, "name": "Lech Poznań" },
            "awayTeam": { "id": "8021", "name": "Legia Warszawa" },
            "startTime": "2026-09-01T18:30:00Z"
        });
        let m = normalize_fixture(&fixture, "Ekstraklasa", &mut rng());

        assert_eq!(m.id, "555");
        assert_eq!(m.home_team, "Lech Poznań");
        assert_eq!(m.home_team_id, "8023");
        assert_eq!(m.away_team, "Legia Warszawa");
        assert_eq!(m.away_team_id, "8021");
        assert_eq!(m.date, "2026-09-01T18:30:00Z");
        assert_eq!(m.round, "Ekstraklasa");
        assert!(m.odds.is_some());
    }

    #[test]
    fn test_normalize_flat_snake_case_fields() {
        let fixture = json!({
            "event_id": "abc-1",
            "home_team": { "name": "Real Madryt", "id": "8633" },
            "away_team": { "name": "FC Barcelona", "id": "8634" },
            "utc_date": "2026-09-02T20:00:00Z"
        });
        let m = normalize_fixture(&fixture, "La Liga", &mut rng());

        assert_eq!(m.id, "abc-1");
        assert_eq!(m.home_team, "Real Madryt");
        assert_eq!(m.date, "2026-09-02T20:00:00Z");
    }

    #[test]
    fn test_normalize_flat_id_fields() {
        let fixture = json!({
            "id": 9,
            "homeTeamId": 11,
            "away_team_id": "22",
            "date": "2026-09-03T12:00:00Z"
        });
        let m = normalize_fixture(&fixture, "Premier League", &mut rng());

        assert_eq!(m.home_team_id, "11");
        assert_eq!(m.away_team_id, "22");
    }

    #[test]
    fn test_normalize_defaults_for_missing_fields() {
        let m = normalize_fixture(&json!({}), "Bundesliga", &mut rng());

        assert!(m.id.starts_with("gen-"));
        assert_eq!(m.home_team, HOME_PLACEHOLDER);
        assert_eq!(m.away_team, AWAY_PLACEHOLDER);
        assert_eq!(m.home_team_id, "");
        assert_eq!(m.away_team_id, "");
        assert_eq!(m.date, "");
        assert_eq!(m.round, "Bundesliga");
    }

    #[test]
    fn test_normalize_prefers_fixture_round_over_label() {
        let tagged = json!({ "id": 1, "_round": "Kolejka 5" });
        assert_eq!(
            normalize_fixture(&tagged, "Ekstraklasa", &mut rng()).round,
            "Kolejka 5"
        );

        let explicit = json!({ "id": 1, "round": "Final", "_round": "Kolejka 5" });
        assert_eq!(
            normalize_fixture(&explicit, "Ekstraklasa", &mut rng()).round,
            "Final"
        );
    }

    #[test]
    fn test_nested_id_wins_over_flat_id() {
        let fixture = json!({
            "homeTeam": { "id": "nested" },
            "homeTeamId": "flat"
        });
        let m = normalize_fixture(&fixture, "Ekstraklasa", &mut rng());
        assert_eq!(m.home_team_id, "nested");
    }

    #[test]
    fn test_empty_string_fields_fall_through() {
        let fixture = json!({
            "homeTeam": { "id": "" },
            "homeTeamId": "flat"
        });
        let m = normalize_fixture(&fixture, "Ekstraklasa", &mut rng());
        assert_eq!(m.home_team_id, "flat");
    }
}
