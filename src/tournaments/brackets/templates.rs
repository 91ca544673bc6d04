//! The fixed draws. Codes are written without the per-division prefix,
//! which is added when the matches are created.

use super::{
    Advancement, Elimination, Entrant::*, Fixture, Group, League, Placement,
};
use crate::tournaments::Slot::{Team1, Team2};

const fn fixture(
    code: &'static str,
    round: i64,
    match_number: i64,
    team1: super::Entrant,
    team2: super::Entrant,
) -> Fixture {
    Fixture {
        code,
        round,
        match_number,
        team1,
        team2,
        group: None,
    }
}

const fn to(
    from: &'static str,
    to: &'static str,
    slot: crate::tournaments::Slot,
) -> Advancement {
    Advancement { from, to, slot }
}

const fn label(label: &'static str) -> Placement {
    Placement { rank: None, label }
}

const fn ranked(rank: i64, label: &'static str) -> Placement {
    Placement {
        rank: Some(rank),
        label,
    }
}

const PODIUM: [Placement; 4] = [
    ranked(1, "1位"),
    ranked(2, "2位"),
    ranked(3, "3位"),
    ranked(4, "4位"),
];

pub static BASKETBALL: Elimination = Elimination {
    fixtures: &[
        fixture("A1", 1, 1, Class("1-5"), Class("2-4")),
        fixture("B1", 1, 2, Class("3-6"), Class("2-2")),
        fixture("B2", 1, 3, Class("1-4"), Class("3-4")),
        fixture("A2", 2, 1, Class("1-1"), Class("2-5")),
        fixture("A3", 2, 2, Class("3-1"), Class("1-2")),
        fixture("A4", 2, 3, Class("2-3"), Class("3-5")),
        fixture("A5", 2, 4, Class("1-6"), WinnerOf("A1")),
        fixture("B3", 2, 5, Class("3-3"), Class("2-1")),
        fixture("B4", 2, 6, Class("1-3"), Class("2-6")),
        fixture("B5", 2, 7, WinnerOf("B1"), Class("3-2")),
        fixture("B6", 2, 8, WinnerOf("B2"), Class("教職員")),
        fixture("A6", 3, 1, WinnerOf("A3"), WinnerOf("A2")),
        fixture("A7", 3, 2, WinnerOf("A5"), WinnerOf("A4")),
        fixture("B7", 3, 3, WinnerOf("B3"), WinnerOf("B5")),
        fixture("B8", 3, 4, WinnerOf("B4"), WinnerOf("B6")),
        fixture("B9", 4, 1, WinnerOf("A7"), WinnerOf("A6")),
        fixture("B10", 4, 2, WinnerOf("B7"), WinnerOf("B8")),
        fixture("A8", 5, 1, WinnerOf("B9"), WinnerOf("B10")),
        fixture("B11", 5, 2, LoserOf("B9"), LoserOf("B10")),
    ],
    winners: &[
        to("A1", "A5", Team2),
        to("B1", "B5", Team1),
        to("B2", "B6", Team1),
        to("A2", "A6", Team2),
        to("A3", "A6", Team1),
        to("A4", "A7", Team2),
        to("A5", "A7", Team1),
        to("B3", "B7", Team1),
        to("B4", "B8", Team1),
        to("B5", "B7", Team2),
        to("B6", "B8", Team2),
        to("A6", "B9", Team2),
        to("A7", "B9", Team1),
        to("B7", "B10", Team1),
        to("B8", "B10", Team2),
        to("B9", "A8", Team1),
        to("B10", "A8", Team2),
    ],
    losers: &[to("B9", "B11", Team1), to("B10", "B11", Team2)],
    final_code: "A8",
    third_place_code: "B11",
    round_losers: &[
        (1, label("ベスト19")),
        (2, label("ベスト16")),
        (3, label("ベスト8")),
    ],
    semifinal_loser: label("ベスト4"),
    podium: PODIUM,
};

pub static SOFTBALL: Elimination = Elimination {
    fixtures: &[
        fixture("A1", 1, 1, Class("2-4"), Class("2-3")),
        fixture("B1", 1, 2, Class("3-6"), Class("1-2")),
        fixture("B2", 1, 3, Class("1-1"), Class("3-2")),
        fixture("A2", 2, 1, Class("2-6"), Class("1-4")),
        fixture("A3", 2, 2, Class("2-1"), Class("1-6")),
        fixture("A4", 2, 3, Class("3-3"), Class("3-5")),
        fixture("A5", 2, 4, Class("2-2"), WinnerOf("A1")),
        fixture("B3", 2, 5, Class("3-4"), Class("3-1")),
        fixture("B4", 2, 6, Class("1-3"), Class("1-5")),
        fixture("B5", 2, 7, WinnerOf("B1"), Class("2-5")),
        fixture("B6", 2, 8, WinnerOf("B2"), Class("教職員")),
        fixture("A6", 3, 1, WinnerOf("A3"), WinnerOf("A2")),
        fixture("A7", 3, 2, WinnerOf("A5"), WinnerOf("A4")),
        fixture("B7", 3, 3, WinnerOf("B3"), WinnerOf("B5")),
        fixture("A8", 3, 4, WinnerOf("B4"), WinnerOf("B6")),
        fixture("A9", 4, 1, WinnerOf("A7"), WinnerOf("A6")),
        fixture("B8", 4, 2, WinnerOf("B7"), WinnerOf("A8")),
        fixture("B9", 5, 1, WinnerOf("A9"), WinnerOf("B8")),
        fixture("A10", 5, 2, LoserOf("A9"), LoserOf("B8")),
    ],
    winners: &[
        to("A1", "A5", Team2),
        to("B1", "B5", Team1),
        to("B2", "B6", Team1),
        to("A2", "A6", Team2),
        to("A3", "A6", Team1),
        to("A4", "A7", Team2),
        to("A5", "A7", Team1),
        to("B3", "B7", Team1),
        to("B4", "A8", Team1),
        to("B5", "B7", Team2),
        to("B6", "A8", Team2),
        to("A6", "A9", Team2),
        to("A7", "A9", Team1),
        to("B7", "B8", Team1),
        to("A8", "B8", Team2),
        to("A9", "B9", Team1),
        to("B8", "B9", Team2),
    ],
    losers: &[to("A9", "A10", Team1), to("B8", "A10", Team2)],
    final_code: "B9",
    third_place_code: "A10",
    round_losers: &[
        (1, ranked(19, "ベスト19")),
        (2, ranked(16, "ベスト16")),
        (3, ranked(8, "ベスト8")),
    ],
    semifinal_loser: ranked(4, "4位"),
    podium: PODIUM,
};

pub static TABLE_TENNIS: Elimination = Elimination {
    fixtures: &[
        fixture("A1", 1, 1, Class("2-3"), Class("3-1")),
        fixture("B1", 1, 2, Class("2-2"), Class("3-3")),
        fixture("B2", 1, 3, Class("2-1"), Class("1-3")),
        fixture("A2", 2, 1, Class("3-5"), Class("2-6")),
        fixture("A3", 2, 2, Class("1-2"), WinnerOf("A1")),
        fixture("A4", 2, 3, Class("3-4"), Class("3-6")),
        fixture("A5", 2, 4, Class("1-6"), Class("2-5")),
        fixture("B3", 2, 5, Class("1-5"), Class("2-4")),
        fixture("B4", 2, 6, WinnerOf("B1"), Class("3-2")),
        fixture("B5", 2, 7, Class("1-1"), Class("1-4")),
        fixture("B6", 2, 8, WinnerOf("B2"), Class("教職員")),
        fixture("A6", 3, 1, WinnerOf("A3"), WinnerOf("A2")),
        fixture("A7", 3, 2, WinnerOf("A4"), WinnerOf("A5")),
        fixture("B7", 3, 3, WinnerOf("B3"), WinnerOf("B4")),
        fixture("B8", 3, 4, WinnerOf("B5"), WinnerOf("B6")),
        fixture("A8", 4, 1, WinnerOf("A6"), WinnerOf("A7")),
        fixture("B9", 4, 2, WinnerOf("B7"), WinnerOf("B8")),
        fixture("A9", 5, 1, WinnerOf("A8"), WinnerOf("B9")),
        fixture("B10", 5, 2, LoserOf("A8"), LoserOf("B9")),
    ],
    winners: &[
        to("A1", "A3", Team2),
        to("B1", "B4", Team1),
        to("B2", "B6", Team1),
        to("A3", "A6", Team1),
        to("A2", "A6", Team2),
        to("A4", "A7", Team1),
        to("A5", "A7", Team2),
        to("B3", "B7", Team1),
        to("B4", "B7", Team2),
        to("B5", "B8", Team1),
        to("B6", "B8", Team2),
        to("A6", "A8", Team1),
        to("A7", "A8", Team2),
        to("B7", "B9", Team1),
        to("B8", "B9", Team2),
        to("A8", "A9", Team1),
        to("B9", "A9", Team2),
    ],
    losers: &[to("A8", "B10", Team1), to("B9", "B10", Team2)],
    final_code: "A9",
    third_place_code: "B10",
    round_losers: &[
        (1, label("ベスト19")),
        (2, label("ベスト16")),
        (3, label("ベスト8")),
    ],
    semifinal_loser: label("ベスト4"),
    podium: PODIUM,
};

const fn league(
    code: &'static str,
    round: i64,
    match_number: i64,
    group: &'static str,
    team1: super::Entrant,
    team2: super::Entrant,
) -> Fixture {
    Fixture {
        code,
        round,
        match_number,
        team1,
        team2,
        group: Some(group),
    }
}

pub static VOLLEYBALL: League = League {
    groups: &[
        Group {
            name: "A",
            classes: &["1-1", "1-2", "1-3"],
        },
        Group {
            name: "B",
            classes: &["2-1", "2-2", "2-3"],
        },
        Group {
            name: "C",
            classes: &["3-1", "3-2", "3-3"],
        },
    ],
    fixtures: &[
        league("A1", 1, 1, "A", Class("1-1"), Class("1-2")),
        league("A2", 1, 2, "A", Class("1-1"), Class("1-3")),
        league("A3", 1, 3, "A", Class("1-2"), Class("1-3")),
        league("B1", 1, 4, "B", Class("2-1"), Class("2-2")),
        league("B2", 1, 5, "B", Class("2-1"), Class("2-3")),
        league("B3", 1, 6, "B", Class("2-2"), Class("2-3")),
        league("C1", 1, 7, "C", Class("3-1"), Class("3-2")),
        league("C2", 1, 8, "C", Class("3-1"), Class("3-3")),
        league("C3", 1, 9, "C", Class("3-2"), Class("3-3")),
        league("F1", 2, 1, "F", GroupLeader("A"), GroupLeader("B")),
        league("F2", 2, 2, "F", GroupLeader("A"), GroupLeader("C")),
        league("F3", 2, 3, "F", GroupLeader("B"), GroupLeader("C")),
    ],
    final_group: "F",
    final_slots: &[
        ("A", "F1", Team1),
        ("A", "F2", Team1),
        ("B", "F1", Team2),
        ("B", "F3", Team1),
        ("C", "F2", Team2),
        ("C", "F3", Team2),
    ],
};
