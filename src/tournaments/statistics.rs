use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    tournaments::{MatchStatus, Slot, matches::Match},
    util_resp::FailureResponse,
    validation::is_placeholder,
};

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HighestScore {
    pub score: i64,
    pub team: String,
    pub match_code: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_matches: usize,
    pub completed_matches: usize,
    pub highest_score: Option<HighestScore>,
    /// Finished matches that were settled by free throws or janken.
    pub tiebreak_matches: usize,
    pub last_updated: Option<NaiveDateTime>,
}

pub fn compute(matches: &[Match]) -> Result<Statistics, FailureResponse> {
    let mut completed_matches = 0;
    let mut tiebreak_matches = 0;
    let mut highest_score: Option<HighestScore> = None;

    for m in matches {
        if m.status()? == MatchStatus::Finished {
            completed_matches += 1;
            if m.tiebreak_needed {
                tiebreak_matches += 1;
            }
        }

        let (team1, team2) = m.scores()?.totals();
        for (slot, score) in [(Slot::Team1, team1), (Slot::Team2, team2)] {
            let team = m.team(slot);
            if score <= 0 || is_placeholder(team) {
                continue;
            }
            if highest_score.as_ref().is_none_or(|h| score > h.score) {
                highest_score = Some(HighestScore {
                    score,
                    team: team.to_string(),
                    match_code: m.match_code.clone(),
                });
            }
        }
    }

    Ok(Statistics {
        total_matches: matches.len(),
        completed_matches,
        highest_score,
        tiebreak_matches,
        last_updated: matches.iter().map(|m| m.updated_at).max(),
    })
}
