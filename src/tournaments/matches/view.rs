use chrono::NaiveDateTime;
use serde::Serialize;

use super::Match;
use crate::{
    tournaments::{
        Division, MatchStatus,
        sports::{
            Scores,
            basketball::BasketballScores,
            softball::Innings,
            table_tennis::{Category, Game, SetScore},
            volleyball::VolleyballScores,
        },
    },
    util_resp::FailureResponse,
};

/// A match as returned by the API: the stored row plus the figures derived
/// from its scores.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: String,
    pub match_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Division>,
    pub round: i64,
    pub match_number: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub team1: String,
    pub team2: String,
    #[serde(flatten)]
    pub details: SportDetails,
    pub winner: Option<String>,
    pub scheduled_time: String,
    pub start_time: String,
    pub end_time: String,
    pub status: MatchStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Debug)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum SportDetails {
    Basketball {
        scores: BasketballScores,
        team1_total: i64,
        team2_total: i64,
        is_free_throw_needed: bool,
    },
    Softball {
        scores: SoftballScoresView,
        team1_total: i64,
        team2_total: i64,
        is_janken_needed: bool,
        janken_winner: Option<String>,
        is_home_first: bool,
    },
    TableTennis {
        men_singles: GameView,
        women_singles: GameView,
        men_doubles: GameView,
        women_doubles: GameView,
        mixed_doubles: GameView,
        team1_wins: i64,
        team2_wins: i64,
    },
    Volleyball {
        scores: VolleyballScores,
    },
}

#[derive(Serialize, Debug)]
pub struct SoftballScoresView {
    pub team1: Innings,
    pub team2: Innings,
}

#[derive(Serialize, Debug)]
pub struct SetsWon {
    pub team1: u32,
    pub team2: u32,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub set1: SetScore,
    pub set2: SetScore,
    pub set3: SetScore,
    pub sets_won: SetsWon,
    /// Name of the team that took the category.
    pub winner: Option<String>,
}

impl GameView {
    fn new(game: &Game, m: &Match) -> GameView {
        let (team1, team2) = game.sets_won();
        GameView {
            set1: game.set1,
            set2: game.set2,
            set3: game.set3,
            sets_won: SetsWon { team1, team2 },
            winner: game.winner().map(|slot| m.team(slot).to_string()),
        }
    }
}

impl MatchView {
    pub fn new(m: Match) -> Result<MatchView, FailureResponse> {
        let details = match m.scores()? {
            Scores::Basketball(scores) => {
                let (team1_total, team2_total) = scores.totals();
                SportDetails::Basketball {
                    scores,
                    team1_total,
                    team2_total,
                    is_free_throw_needed: m.tiebreak_needed,
                }
            }
            Scores::Softball(scores) => {
                let (team1_total, team2_total) = scores.totals();
                SportDetails::Softball {
                    scores: SoftballScoresView {
                        team1: scores.team1,
                        team2: scores.team2,
                    },
                    team1_total,
                    team2_total,
                    is_janken_needed: m.tiebreak_needed,
                    janken_winner: scores.janken_winner,
                    is_home_first: scores.is_home_first,
                }
            }
            Scores::TableTennis(scores) => {
                let (team1_wins, team2_wins) = scores.category_wins();
                let game =
                    |category: Category| GameView::new(scores.game(category), &m);
                SportDetails::TableTennis {
                    men_singles: game(Category::MenSingles),
                    women_singles: game(Category::WomenSingles),
                    men_doubles: game(Category::MenDoubles),
                    women_doubles: game(Category::WomenDoubles),
                    mixed_doubles: game(Category::MixedDoubles),
                    team1_wins,
                    team2_wins,
                }
            }
            Scores::Volleyball(scores) => SportDetails::Volleyball { scores },
        };

        Ok(MatchView {
            gender: m.division()?.gender(),
            status: m.status()?,
            id: m.id,
            match_code: m.match_code,
            round: m.round,
            match_number: m.match_number,
            group: m.group_name,
            team1: m.team1,
            team2: m.team2,
            details,
            winner: m.winner,
            scheduled_time: m.scheduled_time,
            start_time: m.start_time,
            end_time: m.end_time,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }

    pub fn list(matches: Vec<Match>) -> Result<Vec<MatchView>, FailureResponse> {
        matches.into_iter().map(MatchView::new).collect()
    }
}
