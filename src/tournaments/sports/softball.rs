use serde::{Deserialize, Serialize};

use super::{Outcome, double_option};
use crate::{tournaments::Slot, validation::is_valid_score};

pub const INNINGS: usize = 7;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Innings {
    pub innings: Vec<i64>,
}

impl Default for Innings {
    fn default() -> Self {
        Innings {
            innings: vec![0; INNINGS],
        }
    }
}

impl Innings {
    pub fn total(&self) -> i64 {
        self.innings.iter().sum()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SoftballScores {
    pub team1: Innings,
    pub team2: Innings,
    /// Name of the team that won rock-paper-scissors after a level game.
    #[serde(default)]
    pub janken_winner: Option<String>,
    #[serde(default)]
    pub is_home_first: bool,
}

impl SoftballScores {
    pub fn totals(&self) -> (i64, i64) {
        (self.team1.total(), self.team2.total())
    }

    pub fn outcome(&self, team1: &str, team2: &str) -> Outcome {
        let (t1, t2) = self.totals();
        if let Some(slot) = Slot::ahead(t1, t2) {
            return Outcome::Winner(slot);
        }

        match self.janken_winner.as_deref() {
            Some(w) if w == team1 => Outcome::Winner(Slot::Team1),
            Some(w) if w == team2 => Outcome::Winner(Slot::Team2),
            _ => Outcome::TiebreakNeeded,
        }
    }
}

fn normalise_innings(innings: &[i64]) -> Result<Vec<i64>, String> {
    if innings.len() > INNINGS {
        return Err(format!("イニングは{INNINGS}回までです"));
    }
    for score in innings {
        is_valid_score(*score)?;
    }
    let mut innings = innings.to_vec();
    innings.resize(INNINGS, 0);
    Ok(innings)
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SoftballPatch {
    pub team1_innings: Option<Vec<i64>>,
    pub team2_innings: Option<Vec<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub janken_winner: Option<Option<String>>,
    pub is_home_first: Option<bool>,
}

impl SoftballPatch {
    pub fn apply(&self, scores: &mut SoftballScores) -> Result<(), String> {
        if let Some(innings) = &self.team1_innings {
            scores.team1.innings = normalise_innings(innings)?;
        }
        if let Some(innings) = &self.team2_innings {
            scores.team2.innings = normalise_innings(innings)?;
        }
        if let Some(janken_winner) = &self.janken_winner {
            scores.janken_winner = janken_winner.clone();
        }
        if let Some(is_home_first) = self.is_home_first {
            scores.is_home_first = is_home_first;
        }
        Ok(())
    }
}
