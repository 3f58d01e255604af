use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decimal odds triple, kept as two-decimal strings for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Odds {
    pub home: String,
    pub draw: String,
    pub away: String,
}

/// A single upcoming fixture, normalized from whatever shape the feed returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Feed identifier, unique within one loaded batch
    pub id: String,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    /// May be empty when the feed supplied no identifier
    #[serde(rename = "homeTeamId")]
    pub home_team_id: String,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(rename = "awayTeamId")]
    pub away_team_id: String,
    /// Kickoff time as received from the feed; see [`Match::kickoff_utc`]
    pub date: String,
    /// Competition or round label
    pub round: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odds: Option<Odds>,
}

impl Match {
    /// Parses the kickoff timestamp into UTC.
    ///
    /// Accepts RFC 3339 first, then the naive datetime layouts some sources
    /// use; naive timestamps are treated as UTC. Returns `None` when the
    /// field is absent or unparseable, which excludes the match from display.
    pub fn kickoff_utc(&self) -> Option<DateTime<Utc>> {
        parse_kickoff(&self.date)
    }
}

/// Parses a feed timestamp into UTC, or `None` if no known layout matches.
pub fn parse_kickoff(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_match(date: &str) -> Match {
        Match {
            id: "1001".to_string(),
            home_team: "Lech Poznań".to_string(),
            home_team_id: "8023".to_string(),
            away_team: "Legia Warszawa".to_string(),
            away_team_id: "8021".to_string(),
            date: date.to_string(),
            round: "Ekstraklasa".to_string(),
            odds: None,
        }
    }

    #[test]
    fn test_kickoff_rfc3339() {
        let m = test_match("2026-09-01T18:30:00Z");
        assert_eq!(
            m.kickoff_utc(),
            Some(Utc.with_ymd_and_hms(2026, 9, 1, 18, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_kickoff_rfc3339_with_offset() {
        let m = test_match("2026-09-01T20:30:00+02:00");
        assert_eq!(
            m.kickoff_utc(),
            Some(Utc.with_ymd_and_hms(2026, 9, 1, 18, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_kickoff_naive_is_treated_as_utc() {
        let m = test_match("2026-09-01T18:30:00");
        assert_eq!(
            m.kickoff_utc(),
            Some(Utc.with_ymd_and_hms(2026, 9, 1, 18, 30, 0).unwrap())
        );

        let m = test_match("2026-09-01 18:30:00");
        assert_eq!(
            m.kickoff_utc(),
            Some(Utc.with_ymd_and_hms(2026, 9, 1, 18, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_kickoff_unparseable_is_none() {
        assert_eq!(test_match("").kickoff_utc(), None);
        assert_eq!(test_match("tomorrow").kickoff_utc(), None);
        assert_eq!(test_match("2026-09-01").kickoff_utc(), None);
    }

    #[test]
    fn test_match_serialization_uses_feed_field_names() {
        let m = test_match("2026-09-01T18:30:00Z");
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"homeTeam\":\"Lech Poznań\""));
        assert!(json.contains("\"awayTeamId\":\"8021\""));
        // No odds key when odds are absent
        assert!(!json.contains("\"odds\""));

        let back: Match = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
