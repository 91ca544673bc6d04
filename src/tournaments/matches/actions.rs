//! The operations staff perform on a match during the day. Each runs in a
//! single transaction, so a refusal part-way through leaves nothing
//! behind.

use chrono::Local;
use diesel::{connection::LoadConnection, sqlite::Sqlite};
use serde::Deserialize;

use super::{Match, progress};
use crate::{
    tournaments::{
        MatchStatus, Slot, Sport,
        rankings,
        sports::{Outcome, ScorePatch, Scores, volleyball},
    },
    util_resp::{FailureResponse, bad_request, conflict},
};

#[derive(Deserialize, Debug)]
pub struct JankenForm {
    pub winner: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScoreForm {
    pub team1_score: i64,
    pub team2_score: i64,
}

fn clock() -> String {
    Local::now().format("%H:%M").to_string()
}

fn require_status(
    m: &Match,
    status: MatchStatus,
    message: &str,
) -> Result<(), FailureResponse> {
    if m.status()? != status {
        return conflict(message);
    }
    Ok(())
}

fn begin(m: &mut Match) -> Result<(), FailureResponse> {
    if m.unresolved() {
        return conflict("対戦チームが確定していないため、試合を開始できません");
    }
    m.set_status(MatchStatus::InProgress);
    m.start_time = clock();
    Ok(())
}

/// Records `winner` as having won `m` and moves everyone on.
fn complete(
    m: &mut Match,
    scores: &Scores,
    winner: Slot,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<(), FailureResponse> {
    m.set_scores(scores)?;
    m.winner = Some(m.team(winner).to_string());
    m.tiebreak_needed = scores.went_to_tiebreak();
    m.set_status(MatchStatus::Finished);
    if m.end_time.is_empty() {
        m.end_time = clock();
    }
    m.save(conn)?;
    tracing::info!(code = %m.match_code, winner = ?m.winner, "match finished");

    progress::advance(m, winner, conn)
}

#[tracing::instrument(skip(conn))]
pub fn start(
    sport: Sport,
    id: &str,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Match, FailureResponse> {
    conn.transaction::<_, FailureResponse, _>(|conn| {
        let mut m = Match::fetch(sport, id, conn)?;
        require_status(&m, MatchStatus::Waiting, "この試合は既に開始されています")?;
        begin(&mut m)?;
        m.save(conn)?;
        tracing::info!(code = %m.match_code, "match started");
        Ok(m)
    })
}

/// Decides a running match from its current scores. A level basketball or
/// softball game is flagged for its tie-break and stays in progress.
#[tracing::instrument(skip(conn))]
pub fn finish(
    sport: Sport,
    id: &str,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Match, FailureResponse> {
    conn.transaction::<_, FailureResponse, _>(|conn| {
        let mut m = Match::fetch(sport, id, conn)?;
        require_status(
            &m,
            MatchStatus::InProgress,
            "進行中の試合のみ終了できます",
        )?;

        let scores = m.scores()?;
        match scores.outcome(&m.team1, &m.team2) {
            Outcome::Winner(slot) => complete(&mut m, &scores, slot, conn)?,
            Outcome::TiebreakNeeded => {
                m.tiebreak_needed = true;
                m.save(conn)?;
                tracing::info!(code = %m.match_code, "level scores, tie-break needed");
            }
            Outcome::Undecided => {
                return conflict("勝敗が決まっていないため、試合を終了できません");
            }
        }
        Ok(m)
    })
}

/// Settles a level softball game by rock-paper-scissors. The result can
/// only be entered once.
#[tracing::instrument(skip(conn))]
pub fn janken(
    sport: Sport,
    id: &str,
    winner: &str,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Match, FailureResponse> {
    if sport != Sport::Softball {
        return bad_request("じゃんけんはソフトボールの試合でのみ使用できます");
    }

    conn.transaction::<_, FailureResponse, _>(|conn| {
        let mut m = Match::fetch(sport, id, conn)?;
        require_status(
            &m,
            MatchStatus::InProgress,
            "進行中の試合のみじゃんけんで決着できます",
        )?;
        let Scores::Softball(mut scores) = m.scores()? else {
            return Err(FailureResponse::ServerError(()));
        };
        if scores.janken_winner.is_some() {
            return conflict("じゃんけんの結果は既に記録されています");
        }
        let (team1, team2) = scores.totals();
        if team1 != team2 {
            return conflict("同点の試合のみじゃんけんで決着できます");
        }
        let slot = if winner == m.team1 {
            Slot::Team1
        } else if winner == m.team2 {
            Slot::Team2
        } else {
            return bad_request("勝者は対戦する2チームのどちらかを指定してください");
        };

        scores.janken_winner = Some(winner.to_string());
        complete(&mut m, &Scores::Softball(scores), slot, conn)?;
        Ok(m)
    })
}

/// Enters the final score of a volleyball game. A waiting match is started
/// on the way; a decided score finishes it.
#[tracing::instrument(skip(conn))]
pub fn submit_score(
    sport: Sport,
    id: &str,
    form: &ScoreForm,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Match, FailureResponse> {
    if sport != Sport::Volleyball {
        return bad_request("スコア入力はバレーボールの試合でのみ使用できます");
    }
    volleyball::validate_entry(form.team1_score, form.team2_score)
        .map_err(FailureResponse::BadRequest)?;

    conn.transaction::<_, FailureResponse, _>(|conn| {
        let mut m = Match::fetch(sport, id, conn)?;
        match m.status()? {
            MatchStatus::Finished => {
                return conflict("終了した試合は修正から編集してください");
            }
            MatchStatus::Waiting => begin(&mut m)?,
            MatchStatus::InProgress => {}
        }

        let scores = Scores::Volleyball(volleyball::VolleyballScores {
            team1: volleyball::Points {
                score: form.team1_score,
            },
            team2: volleyball::Points {
                score: form.team2_score,
            },
        });
        match scores.outcome(&m.team1, &m.team2) {
            Outcome::Winner(slot) => complete(&mut m, &scores, slot, conn)?,
            _ => {
                m.set_scores(&scores)?;
                m.save(conn)?;
            }
        }
        Ok(m)
    })
}

/// Changes the scores of a finished match. Refused once a match that
/// depends on the result has started; the new scores must still produce a
/// winner. Teams moved on by the old result are replaced and both teams'
/// rankings are rewritten.
#[tracing::instrument(skip(conn, patch))]
pub fn correct(
    sport: Sport,
    id: &str,
    patch: &ScorePatch,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Match, FailureResponse> {
    conn.transaction::<_, FailureResponse, _>(|conn| {
        let mut m = Match::fetch(sport, id, conn)?;
        require_status(
            &m,
            MatchStatus::Finished,
            "終了した試合のみ修正できます",
        )?;
        progress::ensure_correctable(&m, conn)?;

        let mut scores = m.scores()?;
        patch
            .apply(&mut scores)
            .map_err(FailureResponse::BadRequest)?;
        if let Scores::Volleyball(v) = &scores {
            volleyball::validate_entry(v.team1.score, v.team2.score)
                .map_err(FailureResponse::BadRequest)?;
        }

        let Outcome::Winner(slot) = scores.outcome(&m.team1, &m.team2) else {
            return conflict("修正後のスコアでは勝敗が決まりません");
        };

        let division = m.division()?;
        for team in [m.team1.clone(), m.team2.clone()] {
            rankings::clear(sport, division, &team, conn)?;
        }

        let previous = m.winner.clone();
        complete(&mut m, &scores, slot, conn)?;
        if previous != m.winner {
            tracing::info!(
                code = %m.match_code,
                ?previous,
                winner = ?m.winner,
                "correction changed the winner"
            );
        }
        Ok(m)
    })
}
