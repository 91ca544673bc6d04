//! Sports-day tournaments. Every sport is run as a fixed set of matches per
//! division; the modules below hold the per-sport rules, the bracket
//! layouts and the services that move teams through them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::util_resp::FailureResponse;

pub mod brackets;
pub mod handlers;
pub mod matches;
pub mod rankings;
pub mod sports;
pub mod standings;
pub mod statistics;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Basketball,
    Softball,
    #[serde(rename = "tabletennis")]
    TableTennis,
    Volleyball,
}

impl Sport {
    pub const ALL: [Sport; 4] = [
        Sport::Basketball,
        Sport::Softball,
        Sport::TableTennis,
        Sport::Volleyball,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Basketball => "basketball",
            Sport::Softball => "softball",
            Sport::TableTennis => "tabletennis",
            Sport::Volleyball => "volleyball",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Sport::Basketball => "バスケットボール",
            Sport::Softball => "ソフトボール",
            Sport::TableTennis => "卓球",
            Sport::Volleyball => "バレーボール",
        }
    }

    /// Basketball runs a separate bracket for each gender; everything else
    /// is a single mixed competition.
    pub fn divisions(&self) -> &'static [Division] {
        match self {
            Sport::Basketball => &[Division::Men, Division::Women],
            _ => &[Division::Open],
        }
    }

    /// Works out which division a request refers to. Basketball requests
    /// must name a gender; for the other sports it is ignored.
    pub fn division(
        &self,
        gender: Option<&str>,
    ) -> Result<Division, FailureResponse> {
        match self {
            Sport::Basketball => match gender {
                Some("men") => Ok(Division::Men),
                Some("women") => Ok(Division::Women),
                _ => Err(FailureResponse::BadRequest(
                    "Invalid gender parameter".to_string(),
                )),
            },
            _ => Ok(Division::Open),
        }
    }

    /// Like [`Sport::division`], but an absent gender means "every
    /// division" rather than an error.
    pub fn division_filter(
        &self,
        gender: Option<&str>,
    ) -> Result<Option<Division>, FailureResponse> {
        match (self, gender) {
            (Sport::Basketball, None) => Ok(None),
            (Sport::Basketball, gender) => self.division(gender).map(Some),
            _ => Ok(Some(Division::Open)),
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = FailureResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::ALL
            .into_iter()
            .find(|sport| sport.as_str() == s)
            .ok_or_else(|| {
                FailureResponse::BadRequest(format!("unknown sport: {s}"))
            })
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Division {
    Men,
    Women,
    Open,
}

impl Division {
    pub fn as_str(&self) -> &'static str {
        match self {
            Division::Men => "men",
            Division::Women => "women",
            Division::Open => "open",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Division::Men => "男子",
            Division::Women => "女子",
            Division::Open => "",
        }
    }

    /// The gender reported back to clients; the open division has none.
    pub fn gender(&self) -> Option<Division> {
        match self {
            Division::Open => None,
            other => Some(*other),
        }
    }
}

impl FromStr for Division {
    type Err = FailureResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "men" => Ok(Division::Men),
            "women" => Ok(Division::Women),
            "open" => Ok(Division::Open),
            other => Err(FailureResponse::BadRequest(format!(
                "unknown division: {other}"
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Waiting,
    InProgress,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Waiting => "waiting",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Finished => "finished",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = FailureResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(MatchStatus::Waiting),
            "in_progress" => Ok(MatchStatus::InProgress),
            "finished" => Ok(MatchStatus::Finished),
            other => Err(FailureResponse::BadRequest(format!(
                "unknown status: {other}"
            ))),
        }
    }
}

/// One side of a match.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Team1,
    Team2,
}

impl Slot {
    pub fn other(self) -> Slot {
        match self {
            Slot::Team1 => Slot::Team2,
            Slot::Team2 => Slot::Team1,
        }
    }

    /// The side with the larger value, if the values differ.
    pub fn ahead(team1: i64, team2: i64) -> Option<Slot> {
        match team1.cmp(&team2) {
            std::cmp::Ordering::Greater => Some(Slot::Team1),
            std::cmp::Ordering::Less => Some(Slot::Team2),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basketball_requires_gender() {
        assert_eq!(
            Sport::Basketball.division(Some("women")).unwrap(),
            Division::Women
        );
        assert!(Sport::Basketball.division(None).is_err());
        assert!(Sport::Basketball.division(Some("mixed")).is_err());
        assert_eq!(Sport::Softball.division(None).unwrap(), Division::Open);
    }

    #[test]
    fn sport_names_round_trip() {
        for sport in Sport::ALL {
            assert_eq!(sport.as_str().parse::<Sport>().unwrap(), sport);
        }
        assert!("curling".parse::<Sport>().is_err());
    }
}
