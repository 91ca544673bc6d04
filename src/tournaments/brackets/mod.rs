//! Static draws for every sport, together with the tables that say where
//! the winner (and for semifinals, the loser) of each match goes next and
//! what ranking a finishing team receives.

use itertools::Itertools;

use crate::tournaments::{Division, Slot, Sport};

pub mod templates;

/// Who occupies a slot when the draw is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entrant {
    Class(&'static str),
    WinnerOf(&'static str),
    LoserOf(&'static str),
    /// Winner of a preliminary league group.
    GroupLeader(&'static str),
}

impl Entrant {
    /// The team name written into the slot, with the match codes in
    /// placeholders carrying the division prefix.
    pub fn resolve(&self, prefix: &str) -> String {
        match self {
            Entrant::Class(class) => class.to_string(),
            Entrant::WinnerOf(code) => format!("{prefix}{code}勝者"),
            Entrant::LoserOf(code) => format!("{prefix}{code}敗者"),
            Entrant::GroupLeader(group) => group_leader(group),
        }
    }
}

pub fn group_leader(group: &str) -> String {
    format!("{group}組1位")
}

pub fn group_label(group: &str) -> String {
    format!("{group}組")
}

#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub code: &'static str,
    pub round: i64,
    pub match_number: i64,
    pub team1: Entrant,
    pub team2: Entrant,
    pub group: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Advancement {
    pub from: &'static str,
    pub to: &'static str,
    pub slot: Slot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub rank: Option<i64>,
    pub label: &'static str,
}

/// Which of the two teams of a finished match a placement applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finisher {
    Winner,
    Loser,
}

#[derive(Debug)]
pub struct Elimination {
    pub fixtures: &'static [Fixture],
    pub winners: &'static [Advancement],
    /// Semifinal losers, sent to the third-place match.
    pub losers: &'static [Advancement],
    pub final_code: &'static str,
    pub third_place_code: &'static str,
    pub round_losers: &'static [(i64, Placement)],
    pub semifinal_loser: Placement,
    /// First to fourth place.
    pub podium: [Placement; 4],
}

impl Elimination {
    pub fn fixture(&self, code: &str) -> Option<&'static Fixture> {
        self.fixtures.iter().find(|f| f.code == code)
    }

    pub fn winner_target(&self, code: &str) -> Option<&'static Advancement> {
        self.winners.iter().find(|a| a.from == code)
    }

    pub fn loser_target(&self, code: &str) -> Option<&'static Advancement> {
        self.losers.iter().find(|a| a.from == code)
    }

    /// Rankings to record once the match `code` has finished.
    pub fn placements(&self, code: &str) -> Vec<(Finisher, Placement)> {
        let [first, second, third, fourth] = self.podium;
        if code == self.final_code {
            return vec![(Finisher::Winner, first), (Finisher::Loser, second)];
        }
        if code == self.third_place_code {
            return vec![(Finisher::Winner, third), (Finisher::Loser, fourth)];
        }
        if self.loser_target(code).is_some() {
            return vec![(Finisher::Loser, self.semifinal_loser)];
        }

        let Some(fixture) = self.fixture(code) else {
            return vec![];
        };
        self.round_losers
            .iter()
            .find(|(round, _)| *round == fixture.round)
            .map(|(_, placement)| vec![(Finisher::Loser, *placement)])
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct Group {
    pub name: &'static str,
    pub classes: &'static [&'static str],
}

/// Preliminary round-robin groups whose winners meet in a final group.
#[derive(Debug)]
pub struct League {
    pub groups: &'static [Group],
    pub fixtures: &'static [Fixture],
    pub final_group: &'static str,
    /// Where each preliminary group's winner plays in the final group.
    pub final_slots: &'static [(&'static str, &'static str, Slot)],
}

impl League {
    pub fn final_slots_for<'a>(
        &'a self,
        group: &'a str,
    ) -> impl Iterator<Item = (&'static str, Slot)> + 'a {
        self.final_slots
            .iter()
            .filter(move |(g, _, _)| *g == group)
            .map(|(_, code, slot)| (*code, *slot))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Format {
    Elimination(&'static Elimination),
    League(&'static League),
}

impl Format {
    pub fn of(sport: Sport) -> Format {
        match sport {
            Sport::Basketball => Format::Elimination(&templates::BASKETBALL),
            Sport::Softball => Format::Elimination(&templates::SOFTBALL),
            Sport::TableTennis => Format::Elimination(&templates::TABLE_TENNIS),
            Sport::Volleyball => Format::League(&templates::VOLLEYBALL),
        }
    }

    pub fn fixtures(&self) -> &'static [Fixture] {
        match self {
            Format::Elimination(e) => e.fixtures,
            Format::League(l) => l.fixtures,
        }
    }

    /// Every class that takes part, in order of first appearance.
    pub fn classes(&self) -> Vec<&'static str> {
        self.fixtures()
            .iter()
            .flat_map(|f| [f.team1, f.team2])
            .filter_map(|entrant| match entrant {
                Entrant::Class(class) => Some(class),
                _ => None,
            })
            .unique()
            .collect()
    }
}

/// Prefix put in front of every match code of a division, so that codes
/// stay unique across the two basketball brackets.
pub fn code_prefix(sport: Sport, division: Division) -> &'static str {
    match (sport, division) {
        (Sport::Basketball, Division::Women) => "BW",
        (Sport::Basketball, _) => "BM",
        (Sport::TableTennis, _) => "TU",
        _ => "",
    }
}
