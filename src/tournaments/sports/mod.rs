//! Per-sport score documents and the rules that decide a match from them.

use serde::{Deserialize, Deserializer};

use crate::tournaments::{Slot, Sport};

pub mod basketball;
pub mod softball;
pub mod table_tennis;
pub mod volleyball;

use basketball::{BasketballPatch, BasketballScores};
use softball::{SoftballPatch, SoftballScores};
use table_tennis::{TableTennisPatch, TableTennisScores};
use volleyball::{VolleyballPatch, VolleyballScores};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Slot),
    /// Scores are level and the sport's tie-break (free throws, janken)
    /// has to be played before the match can be decided.
    TiebreakNeeded,
    /// The scores do not determine a winner and there is no tie-break
    /// procedure to fall back on.
    Undecided,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scores {
    Basketball(BasketballScores),
    Softball(SoftballScores),
    TableTennis(TableTennisScores),
    Volleyball(VolleyballScores),
}

impl Scores {
    pub fn empty(sport: Sport) -> Scores {
        match sport {
            Sport::Basketball => Scores::Basketball(Default::default()),
            Sport::Softball => Scores::Softball(Default::default()),
            Sport::TableTennis => Scores::TableTennis(Default::default()),
            Sport::Volleyball => Scores::Volleyball(Default::default()),
        }
    }

    pub fn decode(sport: Sport, raw: &str) -> serde_json::Result<Scores> {
        Ok(match sport {
            Sport::Basketball => Scores::Basketball(serde_json::from_str(raw)?),
            Sport::Softball => Scores::Softball(serde_json::from_str(raw)?),
            Sport::TableTennis => {
                Scores::TableTennis(serde_json::from_str(raw)?)
            }
            Sport::Volleyball => Scores::Volleyball(serde_json::from_str(raw)?),
        })
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        match self {
            Scores::Basketball(s) => serde_json::to_string(s),
            Scores::Softball(s) => serde_json::to_string(s),
            Scores::TableTennis(s) => serde_json::to_string(s),
            Scores::Volleyball(s) => serde_json::to_string(s),
        }
    }

    /// Headline score of each side: points for basketball and volleyball,
    /// runs for softball, categories won for table tennis.
    pub fn totals(&self) -> (i64, i64) {
        match self {
            Scores::Basketball(s) => s.totals(),
            Scores::Softball(s) => s.totals(),
            Scores::TableTennis(s) => s.category_wins(),
            Scores::Volleyball(s) => s.totals(),
        }
    }

    /// Whether the scores are level before the sport's tie-break, i.e. a
    /// decided match was settled by free throws or janken.
    pub fn went_to_tiebreak(&self) -> bool {
        match self {
            Scores::Basketball(s) => {
                s.team1.regulation() == s.team2.regulation()
            }
            Scores::Softball(s) => {
                let (team1, team2) = s.totals();
                team1 == team2
            }
            Scores::TableTennis(_) | Scores::Volleyball(_) => false,
        }
    }

    pub fn outcome(&self, team1: &str, team2: &str) -> Outcome {
        match self {
            Scores::Basketball(s) => s.outcome(),
            Scores::Softball(s) => s.outcome(team1, team2),
            Scores::TableTennis(s) => s.outcome(),
            Scores::Volleyball(s) => s.outcome(),
        }
    }
}

/// Score fields accepted by the update and correction endpoints. Only the
/// group matching the match's sport is applied; absent fields are left
/// untouched.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct ScorePatch {
    #[serde(flatten)]
    pub basketball: BasketballPatch,
    #[serde(flatten)]
    pub softball: SoftballPatch,
    #[serde(flatten)]
    pub table_tennis: TableTennisPatch,
    #[serde(flatten)]
    pub volleyball: VolleyballPatch,
}

impl ScorePatch {
    pub fn apply(&self, scores: &mut Scores) -> Result<(), String> {
        match scores {
            Scores::Basketball(s) => self.basketball.apply(s),
            Scores::Softball(s) => self.softball.apply(s),
            Scores::TableTennis(s) => self.table_tennis.apply(s),
            Scores::Volleyball(s) => self.volleyball.apply(s),
        }
    }
}

/// Distinguishes a field sent as `null` (`Some(None)`) from one that was
/// left out (`None`, via `#[serde(default)]`).
pub(crate) fn double_option<'de, T, D>(
    de: D,
) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_documents_decode_back() {
        for sport in Sport::ALL {
            let scores = Scores::empty(sport);
            let raw = scores.encode().unwrap();
            assert_eq!(Scores::decode(sport, &raw).unwrap(), scores);
            assert_eq!(scores.totals(), (0, 0));
        }
    }

    #[test]
    fn patch_only_applies_to_its_sport() {
        let patch: ScorePatch = serde_json::from_str(
            r#"{"team1FirstHalf": 12, "team1Score": 25, "team2Innings": [1]}"#,
        )
        .unwrap();

        let mut scores = Scores::empty(Sport::Basketball);
        patch.apply(&mut scores).unwrap();
        assert_eq!(scores.totals(), (12, 0));

        let mut scores = Scores::empty(Sport::Volleyball);
        patch.apply(&mut scores).unwrap();
        assert_eq!(scores.totals(), (25, 0));

        let mut scores = Scores::empty(Sport::Softball);
        patch.apply(&mut scores).unwrap();
        assert_eq!(scores.totals(), (0, 1));
    }
}
