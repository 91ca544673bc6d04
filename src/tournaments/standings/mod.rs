//! League tables for the round-robin groups.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    tournaments::{MatchStatus, Slot, matches::Match},
    util_resp::FailureResponse,
    validation::is_placeholder,
};

pub const WIN_POINTS: i64 = 2;
pub const LOSS_POINTS: i64 = 1;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub team: String,
    pub played: i64,
    pub wins: i64,
    pub losses: i64,
    pub points: i64,
    pub score_for: i64,
    pub score_against: i64,
    pub point_difference: i64,
}

impl TeamRecord {
    fn new(team: &str) -> TeamRecord {
        TeamRecord {
            team: team.to_string(),
            played: 0,
            wins: 0,
            losses: 0,
            points: 0,
            score_for: 0,
            score_against: 0,
            point_difference: 0,
        }
    }

    /// Records are ordered by points, then point difference, then points
    /// scored.
    fn sort_key(&self) -> (i64, i64, i64) {
        (self.points, self.point_difference, self.score_for)
    }
}

/// Builds the table for one group from its matches, best team first. Only
/// finished matches count; every resolved team appears even before it has
/// played.
pub fn compute(matches: &[Match]) -> Result<Vec<TeamRecord>, FailureResponse> {
    let mut records: HashMap<String, TeamRecord> = HashMap::new();
    for m in matches {
        for team in [&m.team1, &m.team2] {
            if !is_placeholder(team) {
                records
                    .entry(team.clone())
                    .or_insert_with(|| TeamRecord::new(team));
            }
        }
    }

    for m in matches {
        if m.status()? != MatchStatus::Finished {
            continue;
        }
        let Some(winner) = m.winner.as_deref() else {
            continue;
        };
        let (score1, score2) = m.scores()?.totals();
        for (slot, scored, conceded) in
            [(Slot::Team1, score1, score2), (Slot::Team2, score2, score1)]
        {
            let team = m.team(slot);
            let Some(record) = records.get_mut(team) else {
                continue;
            };
            record.played += 1;
            record.score_for += scored;
            record.score_against += conceded;
            record.point_difference = record.score_for - record.score_against;
            if team == winner {
                record.wins += 1;
                record.points += WIN_POINTS;
            } else {
                record.losses += 1;
                record.points += LOSS_POINTS;
            }
        }
    }

    Ok(records
        .into_values()
        .sorted_by(|a, b| {
            b.sort_key()
                .cmp(&a.sort_key())
                .then_with(|| a.team.cmp(&b.team))
        })
        .collect())
}

/// The group winner, unless two teams are level at the top.
pub fn leader(records: &[TeamRecord]) -> Option<&TeamRecord> {
    match records {
        [first, second, ..] if first.sort_key() == second.sort_key() => None,
        [first, ..] => Some(first),
        [] => None,
    }
}

/// Places in the table; teams that cannot be separated share a place and
/// the next place is skipped.
pub fn places(records: &[TeamRecord]) -> Vec<(&TeamRecord, i64)> {
    let mut places: Vec<(&TeamRecord, i64)> = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let place = match places.last() {
            Some((previous, place))
                if previous.sort_key() == record.sort_key() =>
            {
                *place
            }
            _ => i as i64 + 1,
        };
        places.push((record, place));
    }
    places
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::tournaments::sports::{
        Scores,
        volleyball::{Points, VolleyballScores},
    };

    fn played(code: &str, team1: &str, team2: &str, s1: i64, s2: i64) -> Match {
        let now = Utc::now().naive_utc();
        let scores = Scores::Volleyball(VolleyballScores {
            team1: Points { score: s1 },
            team2: Points { score: s2 },
        });
        Match {
            id: code.to_string(),
            sport: "volleyball".to_string(),
            division: "open".to_string(),
            match_code: code.to_string(),
            round: 1,
            match_number: 1,
            group_name: Some("A".to_string()),
            team1: team1.to_string(),
            team2: team2.to_string(),
            scores: scores.encode().unwrap(),
            status: "finished".to_string(),
            winner: Some(if s1 > s2 { team1 } else { team2 }.to_string()),
            tiebreak_needed: false,
            scheduled_time: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn two_wins_top_the_group() {
        let matches = [
            played("A1", "1-1", "1-2", 25, 20),
            played("A2", "1-1", "1-3", 25, 10),
            played("A3", "1-2", "1-3", 25, 23),
        ];
        let table = compute(&matches).unwrap();
        let order = table.iter().map(|r| r.team.as_str()).collect::<Vec<_>>();
        assert_eq!(order, vec!["1-1", "1-2", "1-3"]);
        assert_eq!(table[0].points, 4);
        assert_eq!(table[2].points, 2);
        assert_eq!(table[0].point_difference, 20);
        assert_eq!(leader(&table).unwrap().team, "1-1");
    }

    #[test]
    fn point_difference_breaks_level_points() {
        // everybody wins once
        let matches = [
            played("A1", "1-1", "1-2", 25, 10),
            played("A2", "1-1", "1-3", 20, 25),
            played("A3", "1-2", "1-3", 25, 23),
        ];
        let table = compute(&matches).unwrap();
        assert!(table.iter().all(|r| r.points == 3));
        assert_eq!(table[0].team, "1-1");
        assert_eq!(table[0].point_difference, 10);
    }

    #[test]
    fn identical_records_share_a_place() {
        let matches = [
            played("A1", "1-1", "1-2", 25, 20),
            played("A2", "1-2", "1-3", 25, 20),
            played("A3", "1-3", "1-1", 25, 20),
        ];
        let table = compute(&matches).unwrap();
        assert!(leader(&table).is_none());
        let places = places(&table);
        assert!(places.iter().all(|(_, place)| *place == 1));
    }

    #[test]
    fn unfinished_matches_do_not_count() {
        let mut pending = played("A1", "1-1", "1-2", 10, 5);
        pending.status = "in_progress".to_string();
        pending.winner = None;
        let table = compute(&[pending]).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.played == 0));
        assert!(leader(&table).is_none());
    }
}
