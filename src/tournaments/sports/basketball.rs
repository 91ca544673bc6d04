use serde::{Deserialize, Serialize};

use super::Outcome;
use crate::{tournaments::Slot, validation::is_valid_score};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HalfScores {
    pub first_half: i64,
    pub second_half: i64,
    #[serde(default)]
    pub free_throw: i64,
}

impl HalfScores {
    pub fn regulation(&self) -> i64 {
        self.first_half + self.second_half
    }

    pub fn total(&self) -> i64 {
        self.regulation() + self.free_throw
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BasketballScores {
    pub team1: HalfScores,
    pub team2: HalfScores,
}

impl BasketballScores {
    pub fn totals(&self) -> (i64, i64) {
        (self.team1.total(), self.team2.total())
    }

    fn free_throws_entered(&self) -> bool {
        self.team1.free_throw != 0 || self.team2.free_throw != 0
    }

    /// A level game after two halves goes to a free-throw shootout. Until
    /// shootout scores have been entered the match cannot be decided, and
    /// if they still leave the totals level another round is needed.
    pub fn outcome(&self) -> Outcome {
        let regulation_tie = self.team1.regulation() == self.team2.regulation();
        if regulation_tie && !self.free_throws_entered() {
            return Outcome::TiebreakNeeded;
        }

        let (team1, team2) = self.totals();
        match Slot::ahead(team1, team2) {
            Some(slot) => Outcome::Winner(slot),
            None => Outcome::TiebreakNeeded,
        }
    }
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BasketballPatch {
    pub team1_first_half: Option<i64>,
    pub team1_second_half: Option<i64>,
    pub team1_free_throw: Option<i64>,
    pub team2_first_half: Option<i64>,
    pub team2_second_half: Option<i64>,
    pub team2_free_throw: Option<i64>,
}

impl BasketballPatch {
    pub fn apply(&self, scores: &mut BasketballScores) -> Result<(), String> {
        let fields = [
            (self.team1_first_half, &mut scores.team1.first_half),
            (self.team1_second_half, &mut scores.team1.second_half),
            (self.team1_free_throw, &mut scores.team1.free_throw),
            (self.team2_first_half, &mut scores.team2.first_half),
            (self.team2_second_half, &mut scores.team2.second_half),
            (self.team2_free_throw, &mut scores.team2.free_throw),
        ];
        for (value, target) in fields {
            if let Some(value) = value {
                is_valid_score(value)?;
                *target = value;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(t1: (i64, i64, i64), t2: (i64, i64, i64)) -> BasketballScores {
        BasketballScores {
            team1: HalfScores {
                first_half: t1.0,
                second_half: t1.1,
                free_throw: t1.2,
            },
            team2: HalfScores {
                first_half: t2.0,
                second_half: t2.1,
                free_throw: t2.2,
            },
        }
    }

    #[test]
    fn regulation_winner() {
        assert_eq!(
            scores((10, 12, 0), (8, 9, 0)).outcome(),
            Outcome::Winner(Slot::Team1)
        );
        assert_eq!(
            scores((4, 4, 0), (10, 0, 0)).outcome(),
            Outcome::Winner(Slot::Team2)
        );
    }

    #[test]
    fn level_game_needs_free_throws() {
        let mut s = scores((10, 10, 0), (12, 8, 0));
        assert_eq!(s.outcome(), Outcome::TiebreakNeeded);

        s.team1.free_throw = 2;
        assert_eq!(s.outcome(), Outcome::Winner(Slot::Team1));
        assert_eq!(s.totals(), (22, 20));
    }

    #[test]
    fn level_shootout_is_still_undecided() {
        assert_eq!(
            scores((10, 10, 1), (12, 8, 1)).outcome(),
            Outcome::TiebreakNeeded
        );
    }

    #[test]
    fn patch_rejects_negative_scores() {
        let mut s = BasketballScores::default();
        let patch = BasketballPatch {
            team2_second_half: Some(-1),
            ..Default::default()
        };
        assert!(patch.apply(&mut s).is_err());

        let patch = BasketballPatch {
            team1_first_half: Some(7),
            ..Default::default()
        };
        patch.apply(&mut s).unwrap();
        assert_eq!(s.team1.first_half, 7);
        assert_eq!(s.team2, HalfScores::default());
    }
}
