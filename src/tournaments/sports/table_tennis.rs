use serde::{Deserialize, Serialize};

use super::Outcome;
use crate::{tournaments::Slot, validation::is_valid_score};

/// Points needed to take a set, which must also be won by two clear points.
pub const SET_POINTS: i64 = 11;
/// Sets needed to take a game.
pub const SETS_TO_WIN: u32 = 2;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    MenSingles,
    WomenSingles,
    MenDoubles,
    WomenDoubles,
    MixedDoubles,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::MenSingles,
        Category::WomenSingles,
        Category::MenDoubles,
        Category::WomenDoubles,
        Category::MixedDoubles,
    ];
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetScore {
    pub team1: i64,
    pub team2: i64,
}

impl SetScore {
    pub fn winner(&self) -> Option<Slot> {
        let leader = Slot::ahead(self.team1, self.team2)?;
        let (high, low) = match leader {
            Slot::Team1 => (self.team1, self.team2),
            Slot::Team2 => (self.team2, self.team1),
        };
        (high >= SET_POINTS && high - low >= 2).then_some(leader)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Game {
    pub set1: SetScore,
    pub set2: SetScore,
    pub set3: SetScore,
}

impl Game {
    pub fn sets(&self) -> [SetScore; 3] {
        [self.set1, self.set2, self.set3]
    }

    pub fn sets_won(&self) -> (u32, u32) {
        self.sets()
            .iter()
            .fold((0, 0), |(t1, t2), set| match set.winner() {
                Some(Slot::Team1) => (t1 + 1, t2),
                Some(Slot::Team2) => (t1, t2 + 1),
                None => (t1, t2),
            })
    }

    pub fn winner(&self) -> Option<Slot> {
        let (t1, t2) = self.sets_won();
        if t1 >= SETS_TO_WIN {
            Some(Slot::Team1)
        } else if t2 >= SETS_TO_WIN {
            Some(Slot::Team2)
        } else {
            None
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableTennisScores {
    pub men_singles: Game,
    pub women_singles: Game,
    pub men_doubles: Game,
    pub women_doubles: Game,
    pub mixed_doubles: Game,
}

impl TableTennisScores {
    pub fn game(&self, category: Category) -> &Game {
        match category {
            Category::MenSingles => &self.men_singles,
            Category::WomenSingles => &self.women_singles,
            Category::MenDoubles => &self.men_doubles,
            Category::WomenDoubles => &self.women_doubles,
            Category::MixedDoubles => &self.mixed_doubles,
        }
    }

    pub fn game_mut(&mut self, category: Category) -> &mut Game {
        match category {
            Category::MenSingles => &mut self.men_singles,
            Category::WomenSingles => &mut self.women_singles,
            Category::MenDoubles => &mut self.men_doubles,
            Category::WomenDoubles => &mut self.women_doubles,
            Category::MixedDoubles => &mut self.mixed_doubles,
        }
    }

    /// Number of categories each team has won.
    pub fn category_wins(&self) -> (i64, i64) {
        Category::ALL.iter().fold((0, 0), |(t1, t2), category| {
            match self.game(*category).winner() {
                Some(Slot::Team1) => (t1 + 1, t2),
                Some(Slot::Team2) => (t1, t2 + 1),
                None => (t1, t2),
            }
        })
    }

    /// The team that has won more categories. Level counts (including
    /// nothing played yet) leave the match undecided.
    pub fn outcome(&self) -> Outcome {
        let (t1, t2) = self.category_wins();
        match Slot::ahead(t1, t2) {
            Some(slot) => Outcome::Winner(slot),
            None => Outcome::Undecided,
        }
    }
}

#[derive(Deserialize, Default, Debug, Clone, Copy)]
pub struct SetPatch {
    pub team1: Option<i64>,
    pub team2: Option<i64>,
}

#[derive(Deserialize, Default, Debug, Clone, Copy)]
pub struct GamePatch {
    pub set1: Option<SetPatch>,
    pub set2: Option<SetPatch>,
    pub set3: Option<SetPatch>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TableTennisPatch {
    pub men_singles: Option<GamePatch>,
    pub women_singles: Option<GamePatch>,
    pub men_doubles: Option<GamePatch>,
    pub women_doubles: Option<GamePatch>,
    pub mixed_doubles: Option<GamePatch>,
}

impl TableTennisPatch {
    fn game(&self, category: Category) -> Option<&GamePatch> {
        match category {
            Category::MenSingles => self.men_singles.as_ref(),
            Category::WomenSingles => self.women_singles.as_ref(),
            Category::MenDoubles => self.men_doubles.as_ref(),
            Category::WomenDoubles => self.women_doubles.as_ref(),
            Category::MixedDoubles => self.mixed_doubles.as_ref(),
        }
    }

    pub fn apply(&self, scores: &mut TableTennisScores) -> Result<(), String> {
        for category in Category::ALL {
            let Some(patch) = self.game(category) else {
                continue;
            };
            let game = scores.game_mut(category);
            let sets = [
                (patch.set1, &mut game.set1),
                (patch.set2, &mut game.set2),
                (patch.set3, &mut game.set3),
            ];
            for (set_patch, set) in sets {
                let Some(set_patch) = set_patch else {
                    continue;
                };
                if let Some(team1) = set_patch.team1 {
                    is_valid_score(team1)?;
                    set.team1 = team1;
                }
                if let Some(team2) = set_patch.team2 {
                    is_valid_score(team2)?;
                    set.team2 = team2;
                }
            }
        }
        Ok(())
    }
}
