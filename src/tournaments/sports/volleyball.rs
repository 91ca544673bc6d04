use serde::{Deserialize, Serialize};

use super::Outcome;
use crate::{tournaments::Slot, validation::is_valid_score};

/// A set ends as soon as one side reaches this many points.
pub const SET_CAP: i64 = 25;
/// From this many points a two point lead also ends the set.
pub const LEAD_THRESHOLD: i64 = 21;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Points {
    pub score: i64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VolleyballScores {
    pub team1: Points,
    pub team2: Points,
}

/// Checks a final score as it is entered. Both sides at the cap is
/// impossible, as is a "finished" score of 21 or more that nobody is two
/// clear on (unless someone has hit the cap).
pub fn validate_entry(team1: i64, team2: i64) -> Result<(), String> {
    is_valid_score(team1)?;
    is_valid_score(team2)?;
    if team1 > SET_CAP && team2 > SET_CAP {
        return Err(format!("両チームが{SET_CAP}点を超えることはできません"));
    }
    let high = team1.max(team2);
    if high >= LEAD_THRESHOLD && (team1 - team2).abs() < 2 && high != SET_CAP {
        return Err(format!(
            "{LEAD_THRESHOLD}点以上では2点差が必要です（{SET_CAP}点到達時を除く）"
        ));
    }
    Ok(())
}

/// Whether the score ends the set.
pub fn is_decided(team1: i64, team2: i64) -> bool {
    team1 == SET_CAP
        || team2 == SET_CAP
        || (team1.max(team2) >= LEAD_THRESHOLD && (team1 - team2).abs() >= 2)
}

impl VolleyballScores {
    pub fn totals(&self) -> (i64, i64) {
        (self.team1.score, self.team2.score)
    }

    pub fn outcome(&self) -> Outcome {
        let (t1, t2) = self.totals();
        match (is_decided(t1, t2), Slot::ahead(t1, t2)) {
            (true, Some(slot)) => Outcome::Winner(slot),
            _ => Outcome::Undecided,
        }
    }
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VolleyballPatch {
    pub team1_score: Option<i64>,
    pub team2_score: Option<i64>,
}

impl VolleyballPatch {
    pub fn apply(&self, scores: &mut VolleyballScores) -> Result<(), String> {
        if let Some(score) = self.team1_score {
            is_valid_score(score)?;
            scores.team1.score = score;
        }
        if let Some(score) = self.team2_score {
            is_valid_score(score)?;
            scores.team2.score = score;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_validation() {
        assert!(validate_entry(25, 20).is_ok());
        assert!(validate_entry(25, 24).is_ok());
        assert!(validate_entry(23, 21).is_ok());
        assert!(validate_entry(15, 14).is_ok());
        assert!(validate_entry(22, 21).is_err());
        assert!(validate_entry(26, 27).is_err());
        assert!(validate_entry(-1, 10).is_err());
    }

    #[test]
    fn decision_rule() {
        assert!(is_decided(25, 24));
        assert!(is_decided(21, 19));
        assert!(!is_decided(21, 20));
        assert!(!is_decided(20, 10));
    }

    #[test]
    fn outcome_needs_a_decided_set() {
        let scores = |t1, t2| VolleyballScores {
            team1: Points { score: t1 },
            team2: Points { score: t2 },
        };
        assert_eq!(scores(25, 23).outcome(), Outcome::Winner(Slot::Team1));
        assert_eq!(scores(19, 21).outcome(), Outcome::Winner(Slot::Team2));
        assert_eq!(scores(20, 18).outcome(), Outcome::Undecided);
        assert_eq!(scores(25, 25).outcome(), Outcome::Undecided);
    }
}
