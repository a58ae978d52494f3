//! Unit tests for the rankings snapshot and player directory

use super::*;
use crate::error::GolfError;
use crate::espn::types::{Competitor, Tournament};
use serde_json::json;
use tempfile::tempdir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn snapshot_json() -> Value {
    json!({
        "timestamp": "2025-07-20T12:00:00",
        "owgr": [
            { "rank": 1, "player": "Scottie Scheffler", "points": 18.52, "country": "USA" },
            { "rank": "2", "player": "Rory McIlroy", "points": "10.1", "country": "NIR" },
            { "rank": 3, "points": 7.0 }
        ],
        "datagolf": [
            { "rank": 1, "player": "SCOTTIE SCHEFFLER", "rating": 3.1 },
            { "rank": 2, "player": "Jon Rahm", "rating": "2.4", "tour": "LIV" }
        ],
        "fedex": [
            { "rank": 1, "player": "Scottie Scheffler", "points": 4806, "earnings": "$19,628,466" }
        ]
    })
}

fn ranked(name: &str, place: u32) -> Competitor {
    Competitor {
        name: name.to_string(),
        position_id: Some(place),
        ..Competitor::default()
    }
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn test_snapshot_accepts_strings_and_numbers() {
        let snapshot = RankingsSnapshot::from_value(snapshot_json()).unwrap();

        assert_eq!(snapshot.timestamp.as_deref(), Some("2025-07-20T12:00:00"));
        assert_eq!(snapshot.owgr.len(), 2, "entries without a player are dropped");
        assert_eq!(snapshot.owgr[0].value, "18.52");
        assert_eq!(snapshot.owgr[1].rank, "2");
        assert_eq!(snapshot.owgr[1].detail.as_deref(), Some("NIR"));
        assert_eq!(snapshot.datagolf[0].detail.as_deref(), Some("PGA"));
        assert_eq!(snapshot.datagolf[1].value, "2.4");
        assert_eq!(snapshot.fedex[0].value, "4806");
        assert!(!snapshot.is_fallback);
    }

    #[test]
    fn test_snapshot_missing_feeds_are_empty() {
        let snapshot = RankingsSnapshot::from_value(json!({ "owgr": [] })).unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.feed(RankingFeed::Fedex).is_empty());
    }

    #[test]
    fn test_snapshot_wrong_shape_is_error() {
        let result = RankingsSnapshot::from_value(json!({ "owgr": "oops" }));
        assert!(matches!(result, Err(GolfError::Json(_))));
    }

    #[test]
    fn test_fallback_from_leaderboard() {
        let mut competitors: Vec<Competitor> =
            (1..=40).rev().map(|p| ranked(&format!("Player {}", p), p)).collect();
        competitors.push(Competitor {
            name: "Unplaced".to_string(),
            ..Competitor::default()
        });
        let tournament = Tournament {
            competitors,
            ..Tournament::default()
        };

        let snapshot = RankingsSnapshot::from_leaderboard(&tournament);
        assert!(snapshot.is_fallback);
        assert_eq!(snapshot.owgr.len(), FALLBACK_RANKINGS_LEN);
        assert_eq!(snapshot.owgr[0].player, "Player 1");
        assert_eq!(snapshot.owgr[0].rank, "1");
        assert_eq!(snapshot.fedex[29].player, "Player 30");
        assert!(snapshot.datagolf.iter().all(|e| e.value == "N/A"));
    }

    #[test]
    fn test_value_units() {
        assert_eq!(value_unit(RankingFeed::Owgr), "pts");
        assert_eq!(value_unit(RankingFeed::Datagolf), "SG");
    }
}

#[cfg(test)]
mod directory_tests {
    use super::*;

    #[test]
    fn test_directory_merges_feeds_by_normalized_name() {
        let snapshot = RankingsSnapshot::from_value(snapshot_json()).unwrap();
        let directory = PlayerDirectory::from_snapshot(&snapshot);

        assert_eq!(directory.len(), 3);
        let scottie = directory.get("scottie scheffler").unwrap();
        assert_eq!(scottie.world.as_ref().unwrap().rank, "1");
        assert_eq!(scottie.skill.as_ref().unwrap().value, "3.1");
        assert_eq!(
            scottie.season.as_ref().unwrap().detail.as_deref(),
            Some("$19,628,466")
        );

        let rahm = directory.get("Jon Rahm").unwrap();
        assert!(rahm.world.is_none());
        assert_eq!(rahm.skill.as_ref().unwrap().detail.as_deref(), Some("LIV"));
    }

    #[test]
    fn test_directory_ignores_fallback() {
        let tournament = Tournament {
            competitors: vec![ranked("Player 1", 1)],
            ..Tournament::default()
        };
        let snapshot = RankingsSnapshot::from_leaderboard(&tournament);
        assert!(PlayerDirectory::from_snapshot(&snapshot).is_empty());
    }
}

#[cfg(test)]
mod loading_tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_get_rankings_from_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("rankings_data.json");
        std::fs::write(&file, snapshot_json().to_string()).unwrap();

        let client = crate::core::http::build_client().unwrap();
        let payload = get_rankings(&client, &RankingsSource::File(file))
            .await
            .unwrap();
        assert_eq!(payload["owgr"][0]["player"], "Scottie Scheffler");
    }

    #[tokio::test]
    async fn test_get_rankings_missing_file() {
        let client = crate::core::http::build_client().unwrap();
        let result = get_rankings(
            &client,
            &RankingsSource::File(PathBuf::from("/nonexistent/rankings.json")),
        )
        .await;
        assert!(matches!(result, Err(GolfError::Io(_))));
    }

    #[tokio::test]
    async fn test_get_rankings_from_url() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rankings_data.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_json()))
            .mount(&mock_server)
            .await;

        let client = crate::core::http::build_client().unwrap();
        let url = format!("{}/rankings_data.json", mock_server.uri());
        let payload = get_rankings(&client, &RankingsSource::Url(url))
            .await
            .unwrap();
        let snapshot = RankingsSnapshot::from_value(payload).unwrap();
        assert_eq!(snapshot.fedex.len(), 1);
    }
}
