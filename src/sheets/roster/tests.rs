//! Unit tests for the roster grid parser

use super::*;
use serde_json::{json, Value};

fn image() -> Value {
    json!({ "valueType": "IMAGE", "url": "https://example.com/p.png" })
}

/// 12x8 grid with a single team anchored at (0, 1).
fn base_rows() -> Vec<Vec<Value>> {
    let mut rows = vec![vec![json!(""); 8]; 12];
    rows[0][1] = json!("Pinky Ring SZN");
    rows[0][3] = json!("T2");
    rows[0][4] = json!("RL");
    rows
}

fn grid(rows: Vec<Vec<Value>>) -> Grid {
    Grid::from_value(&json!(rows))
}

fn single_anchor() -> SheetLayout {
    SheetLayout {
        anchors: vec![Anchor::new(0, 1)],
        ..SheetLayout::default()
    }
}

fn names(slots: &[RosterSlot]) -> Vec<&str> {
    slots.iter().map(|s| s.player_name.as_str()).collect()
}

#[cfg(test)]
mod header_tests {
    use super::*;

    #[test]
    fn test_header_fields() {
        let team = parse_team(&grid(base_rows()), Anchor::new(0, 1), &single_anchor()).unwrap();
        assert_eq!(team.name, "Pinky Ring SZN");
        assert_eq!(team.declared_position, "T2");
        assert_eq!(team.league, LeagueTag::RL);
        assert_eq!(team.anchor, Anchor::new(0, 1));
        assert!(team.active_players.is_empty());
    }

    #[test]
    fn test_league_defaults_to_cl() {
        let mut rows = base_rows();
        rows[0][4] = json!("");
        let team = parse_team(&grid(rows.clone()), Anchor::new(0, 1), &single_anchor()).unwrap();
        assert_eq!(team.league, LeagueTag::CL);

        rows[0][4] = json!("premier");
        let team = parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).unwrap();
        assert_eq!(team.league, LeagueTag::CL);
    }

    #[test]
    fn test_no_team_name_yields_none() {
        let mut rows = base_rows();
        rows[0][1] = json!("");
        assert!(parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).is_none());
    }

    #[test]
    fn test_anchor_outside_grid_yields_none() {
        assert!(parse_team(&grid(base_rows()), Anchor::new(40, 40), &single_anchor()).is_none());
    }
}

#[cfg(test)]
mod slot_tests {
    use super::*;

    #[test]
    fn test_empty_slots_then_players_split_active_and_bench() {
        let mut rows = base_rows();
        rows[1][1] = json!("-");
        rows[2][2] = json!("-");
        for (i, name) in ["Scottie Scheffler", "Rory McIlroy", "Jon Rahm", "Tom Kim"]
            .iter()
            .enumerate()
        {
            rows[3 + i][1] = json!(name);
            rows[3 + i][2] = json!("T5");
            rows[3 + i][3] = json!(-4);
        }

        let team = parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).unwrap();
        assert_eq!(team.empty_slots, 2);
        assert_eq!(
            names(&team.active_players),
            vec!["Scottie Scheffler", "Rory McIlroy", "Jon Rahm"]
        );
        assert_eq!(names(&team.bench_players), vec!["Tom Kim"]);
        assert_eq!(team.active_players[0].declared_score, "-4");
    }

    #[test]
    fn test_portrait_in_first_column() {
        let mut rows = base_rows();
        rows[1][1] = image();
        rows[1][2] = json!("Xander Schauffele");
        rows[1][3] = json!("T3");
        rows[1][4] = json!(2);

        let team = parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).unwrap();
        let slot = &team.active_players[0];
        assert_eq!(slot.player_name, "Xander Schauffele");
        assert_eq!(slot.declared_position, "T3");
        assert_eq!(slot.declared_score, "+2");
        assert!(slot.has_portrait);
    }

    #[test]
    fn test_portrait_in_second_column() {
        let mut rows = base_rows();
        rows[1][2] = image();
        rows[1][3] = json!("Ludvig Aberg");
        rows[1][4] = json!("MC");
        rows[1][5] = json!("+6");

        let team = parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).unwrap();
        let slot = &team.active_players[0];
        assert_eq!(slot.player_name, "Ludvig Aberg");
        assert_eq!(slot.declared_position, "MC");
        assert_eq!(slot.declared_score, "+6");
        assert!(slot.has_portrait);
    }

    #[test]
    fn test_scan_finds_offset_name_and_defaults_missing_cells() {
        let mut rows = base_rows();
        rows[1][1] = json!(7);
        rows[1][3] = json!("Collin Morikawa");

        let team = parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).unwrap();
        let slot = &team.active_players[0];
        assert_eq!(slot.player_name, "Collin Morikawa");
        assert_eq!(slot.declared_position, "-");
        assert_eq!(slot.declared_score, "-");
        assert!(!slot.has_portrait);
    }

    #[test]
    fn test_rows_without_names_are_skipped() {
        let mut rows = base_rows();
        rows[1][1] = json!("ab");
        rows[2][1] = json!("12");
        rows[3][1] = json!("Max Homa");

        let team = parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).unwrap();
        assert_eq!(names(&team.active_players), vec!["Max Homa"]);
        assert_eq!(team.empty_slots, 0);
    }

    #[test]
    fn test_word_like_float_names_are_players() {
        let mut rows = base_rows();
        rows[1][1] = json!("Nan");
        rows[2][1] = json!("Infinity");
        rows[3][1] = json!("-4.5");

        let team = parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).unwrap();
        assert_eq!(names(&team.active_players), vec!["Nan", "Infinity"]);
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("12"));
        assert!(is_numeric(" -4.5 "));
        assert!(is_numeric("+3"));
        assert!(!is_numeric("nan"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("1.2.3"));
        assert!(!is_numeric("-"));
    }

    #[test]
    fn test_scan_stops_at_next_team_name() {
        let mut rows = base_rows();
        rows[1][1] = json!("Viktor Hovland");
        rows[2][1] = json!("Sam Burns");
        rows[3][1] = json!("Tony Finau");
        rows[4][1] = json!("Team Perspective");
        rows[5][1] = json!("Brian Harman");

        let team = parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).unwrap();
        assert_eq!(
            names(&team.active_players),
            vec!["Viktor Hovland", "Sam Burns", "Tony Finau"]
        );
        assert!(team.bench_players.is_empty());
    }

    #[test]
    fn test_short_marker_names_are_players() {
        let mut rows = base_rows();
        rows[1][1] = json!("Tom Team");

        let team = parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).unwrap();
        assert_eq!(names(&team.active_players), vec!["Tom Team"]);
    }

    #[test]
    fn test_scan_limited_to_slot_rows() {
        let mut rows = base_rows();
        rows[10][1] = json!("Too Far Down");
        let team = parse_team(&grid(rows), Anchor::new(0, 1), &single_anchor()).unwrap();
        assert_eq!(team.players().count(), 0);
    }

    #[test]
    fn test_large_bench_is_kept() {
        let mut rows = vec![vec![json!(""); 4]; 12];
        rows[0][0] = json!("Bad News Beavs");
        for r in 1..=9 {
            rows[r][0] = json!(format!("Player {}", r));
        }
        let layout = SheetLayout {
            anchors: vec![Anchor::new(0, 0)],
            ..SheetLayout::default()
        };
        let team = parse_team(&grid(rows), Anchor::new(0, 0), &layout).unwrap();
        assert_eq!(team.active_players.len(), 3);
        assert_eq!(team.bench_players.len(), 6);
    }
}

#[cfg(test)]
mod roster_tests {
    use super::*;

    #[test]
    fn test_parse_rosters_skips_empty_anchors() {
        let mut rows = base_rows();
        rows[1][1] = json!("Patrick Cantlay");
        let layout = SheetLayout {
            anchors: vec![Anchor::new(0, 1), Anchor::new(0, 6), Anchor::new(99, 0)],
            ..SheetLayout::default()
        };

        let teams = parse_rosters(&grid(rows), &layout);
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name, "Pinky Ring SZN");
    }

    #[test]
    fn test_parse_rosters_is_idempotent() {
        let mut rows = base_rows();
        rows[1][1] = image();
        rows[1][2] = json!("Hideki Matsuyama");
        rows[2][1] = json!("-");
        rows[3][1] = json!("Wyndham Clark");
        let g = grid(rows);
        let layout = single_anchor();

        assert_eq!(parse_rosters(&g, &layout), parse_rosters(&g, &layout));
    }
}
