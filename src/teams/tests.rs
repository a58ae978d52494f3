//! Unit tests for the team ranking composer

use super::*;
use crate::espn::positions::LiveEntry;
use crate::sheets::layout::Anchor;

fn slot(name: &str, position: &str, score: &str) -> RosterSlot {
    RosterSlot {
        player_name: name.to_string(),
        declared_position: position.to_string(),
        declared_score: score.to_string(),
        has_portrait: false,
    }
}

fn team(name: &str, active: Vec<RosterSlot>, bench: Vec<RosterSlot>) -> TeamRoster {
    TeamRoster {
        name: name.to_string(),
        league: LeagueTag::CL,
        declared_position: String::new(),
        anchor: Anchor::new(0, 0),
        active_players: active,
        bench_players: bench,
        empty_slots: 0,
    }
}

fn live(name: &str, place: u32, score: &str) -> LiveEntry {
    LiveEntry {
        name: name.to_string(),
        position: Position::Ranked { place, tied: false },
        position_display: place.to_string(),
        score: score.to_string(),
        thru: "F".to_string(),
    }
}

fn cut(name: &str) -> LiveEntry {
    LiveEntry {
        name: name.to_string(),
        position: Position::MissedCut,
        position_display: "MC".to_string(),
        score: "+7".to_string(),
        thru: "F".to_string(),
    }
}

#[cfg(test)]
mod slot_tests {
    use super::*;

    #[test]
    fn test_resolve_live_slot() {
        let map = LivePositionMap::from_entries(vec![live("Jon Rahm", 4, "-6")]);
        let standing = resolve_slot(&slot("Jon Rahm", "T9", "-2"), &map);
        assert_eq!(standing.source, SlotSource::Live);
        assert_eq!(standing.position.sort_key(), 4);
        assert_eq!(standing.score, "-6");
        assert_eq!(standing.thru.as_deref(), Some("F"));
    }

    #[test]
    fn test_resolve_declared_slot() {
        let map = LivePositionMap::default();
        let standing = resolve_slot(&slot("Jon Rahm", "T9", "-2"), &map);
        assert_eq!(standing.source, SlotSource::Declared);
        assert_eq!(
            standing.position,
            Position::Ranked {
                place: 9,
                tied: true
            }
        );
        assert_eq!(standing.position_display, "T9");
        assert_eq!(standing.score, "-2");
        assert_eq!(standing.thru, None);
    }

    #[test]
    fn test_resolve_missing_slot() {
        let map = LivePositionMap::default();
        for declared in ["-", "MC", "", "WD"] {
            let standing = resolve_slot(&slot("Nobody", declared, "+3"), &map);
            assert_eq!(standing.source, SlotSource::Missing);
            assert_eq!(standing.position, Position::MissedCut);
            assert_eq!(standing.position_display, "MC");
            assert_eq!(standing.score, "-");
        }
    }
}

#[cfg(test)]
mod standings_tests {
    use super::*;

    #[test]
    fn test_declared_leader_outranks_live_third() {
        let map = LivePositionMap::from_entries(vec![
            live("Scottie Scheffler", 3, "-5"),
            live("Sam Burns", 20, "E"),
        ]);
        let rosters = vec![
            team(
                "Team A",
                vec![
                    slot("Scottie Scheffler", "-", "-"),
                    slot("Sam Burns", "-", "-"),
                ],
                vec![],
            ),
            team("Team B", vec![slot("Sheet Only", "T1", "-10")], vec![]),
        ];

        let standings = compose_standings(&rosters, &map, RankingStrategy::Best);
        let order: Vec<(&str, usize)> = standings
            .iter()
            .map(|s| (s.name.as_str(), s.rank))
            .collect();
        assert_eq!(order, vec![("Team B", 1), ("Team A", 2)]);
        assert_eq!(standings[1].best_player.as_deref(), Some("Scottie Scheffler"));
        assert_eq!(standings[1].best_position, 3);
        assert_eq!(standings[0].best_position_display(), "T1");
    }

    #[test]
    fn test_live_leader_with_unknown_teammates() {
        let map = LivePositionMap::from_entries(vec![live("Rory McIlroy", 1, "-8")]);
        let rosters = vec![team(
            "Team Mamba",
            vec![
                slot("Rory McIlroy", "-", "-"),
                slot("Unknown One", "-", "-"),
                slot("Unknown Two", "MC", "-"),
            ],
            vec![],
        )];

        let standings = compose_standings(&rosters, &map, RankingStrategy::Best);
        let standing = &standings[0];
        assert_eq!(standing.ranking_key, 1.0);
        assert_eq!(standing.best_player.as_deref(), Some("Rory McIlroy"));
        assert_eq!(standing.active[1].position.sort_key(), MISSED_CUT_SENTINEL);
        assert_eq!(standing.active[2].position.sort_key(), MISSED_CUT_SENTINEL);
        assert_eq!(standing.active_in_tournament, 1);
    }

    #[test]
    fn test_bench_does_not_affect_key() {
        let map = LivePositionMap::from_entries(vec![
            live("Bench Star", 1, "-12"),
            live("Starter", 15, "-1"),
        ]);
        let rosters = vec![team(
            "Team Consistency",
            vec![slot("Starter", "-", "-")],
            vec![slot("Bench Star", "-", "-")],
        )];

        let standings = compose_standings(&rosters, &map, RankingStrategy::Best);
        assert_eq!(standings[0].best_position, 15);
        assert_eq!(standings[0].bench[0].position.sort_key(), 1);
    }

    #[test]
    fn test_team_with_no_placed_players_sorts_last() {
        let map = LivePositionMap::from_entries(vec![cut("Cut Guy"), live("Leader", 2, "-7")]);
        let rosters = vec![
            team("Oak Room's Revenge", vec![slot("Cut Guy", "-", "-")], vec![]),
            team("Fleetwood maX", vec![slot("Leader", "-", "-")], vec![]),
            team("Empty Team", vec![], vec![]),
        ];

        let standings = compose_standings(&rosters, &map, RankingStrategy::Best);
        let names: Vec<&str> = standings.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Fleetwood maX", "Oak Room's Revenge", "Empty Team"]);
        assert_eq!(standings[1].best_position_display(), "MC");
        assert_eq!(standings[1].active_in_tournament, 0);
        assert_eq!(standings[2].ranking_key, 999.0);
    }

    #[test]
    fn test_ties_keep_sheet_order() {
        let map = LivePositionMap::from_entries(vec![live("P1", 5, "-3"), live("P2", 5, "-3")]);
        let rosters = vec![
            team("First", vec![slot("P1", "-", "-")], vec![]),
            team("Second", vec![slot("P2", "-", "-")], vec![]),
        ];

        let standings = compose_standings(&rosters, &map, RankingStrategy::Best);
        assert_eq!(standings[0].name, "First");
        assert_eq!(standings[1].name, "Second");
        assert_eq!(standings[1].rank, 2);
    }

    #[test]
    fn test_average_strategy_uses_live_positions_only() {
        let map = LivePositionMap::from_entries(vec![
            live("A", 2, "-6"),
            live("B", 10, "-2"),
            cut("C"),
            live("D", 4, "-5"),
            live("E", 5, "-4"),
        ]);
        let rosters = vec![
            team(
                "Averaged",
                vec![slot("A", "-", "-"), slot("B", "-", "-"), slot("C", "-", "-")],
                vec![],
            ),
            team(
                "Steady",
                vec![slot("D", "-", "-"), slot("E", "-", "-"), slot("Sheet", "T1", "-")],
                vec![],
            ),
        ];

        let standings = compose_standings(&rosters, &map, RankingStrategy::Average);
        assert_eq!(standings[0].name, "Steady");
        assert_eq!(standings[0].ranking_key, 4.5);
        assert_eq!(standings[1].ranking_key, 6.0);

        let best = compose_standings(&rosters, &map, RankingStrategy::Best);
        assert_eq!(best[0].name, "Steady");
        assert_eq!(best[0].ranking_key, 1.0);
    }

    #[test]
    fn test_has_player_matching() {
        let map = LivePositionMap::default();
        let rosters = vec![team(
            "Team Early 2000's",
            vec![slot("Justin Thomas", "-", "-")],
            vec![slot("Jordan Spieth", "-", "-")],
        )];
        let standings = compose_standings(&rosters, &map, RankingStrategy::Best);
        assert!(standings[0].has_player_matching("spieth"));
        assert!(!standings[0].has_player_matching("woods"));
    }
}
