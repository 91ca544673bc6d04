//! Plain field-by-field edits of a match. Unlike the actions these apply
//! whatever they are given: nothing is advanced and no rule is checked
//! beyond the shape of the values.

use diesel::{connection::LoadConnection, sqlite::Sqlite};
use serde::Deserialize;

use super::Match;
use crate::{
    tournaments::{
        MatchStatus, Sport,
        sports::{ScorePatch, double_option},
    },
    util_resp::{FailureResponse, bad_request},
};

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MatchPatch {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub status: Option<MatchStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub winner: Option<Option<String>>,
    pub scheduled_time: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_free_throw_needed: Option<bool>,
    pub is_janken_needed: Option<bool>,
    #[serde(flatten)]
    pub scores: ScorePatch,
}

#[tracing::instrument(skip(conn, patch))]
pub fn update(
    sport: Sport,
    id: &str,
    patch: &MatchPatch,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Match, FailureResponse> {
    conn.transaction::<_, FailureResponse, _>(|conn| {
        let mut m = Match::fetch(sport, id, conn)?;

        for team in [&patch.team1, &patch.team2].into_iter().flatten() {
            if team.trim().is_empty() {
                return bad_request("チーム名を空にすることはできません");
            }
        }
        if let Some(team1) = &patch.team1 {
            m.team1 = team1.clone();
        }
        if let Some(team2) = &patch.team2 {
            m.team2 = team2.clone();
        }
        if let Some(status) = patch.status {
            m.set_status(status);
        }
        if let Some(winner) = &patch.winner {
            m.winner = winner.clone();
        }
        if let Some(scheduled_time) = &patch.scheduled_time {
            m.scheduled_time = scheduled_time.clone();
        }
        if let Some(start_time) = &patch.start_time {
            m.start_time = start_time.clone();
        }
        if let Some(end_time) = &patch.end_time {
            m.end_time = end_time.clone();
        }

        let tiebreak_needed = match sport {
            Sport::Basketball => patch.is_free_throw_needed,
            Sport::Softball => patch.is_janken_needed,
            Sport::TableTennis | Sport::Volleyball => None,
        };
        if let Some(tiebreak_needed) = tiebreak_needed {
            m.tiebreak_needed = tiebreak_needed;
        }

        let mut scores = m.scores()?;
        patch
            .scores
            .apply(&mut scores)
            .map_err(FailureResponse::BadRequest)?;
        m.set_scores(&scores)?;

        m.save(conn)?;
        Ok(m)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_winner_differ() {
        let patch: MatchPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.winner.is_none());

        let patch: MatchPatch =
            serde_json::from_str(r#"{"winner": null}"#).unwrap();
        assert_eq!(patch.winner, Some(None));

        let patch: MatchPatch = serde_json::from_str(
            r#"{"winner": "1-5", "status": "finished", "team1FreeThrow": 3}"#,
        )
        .unwrap();
        assert_eq!(patch.winner, Some(Some("1-5".to_string())));
        assert_eq!(patch.status, Some(MatchStatus::Finished));
        assert_eq!(patch.scores.basketball.team1_free_throw, Some(3));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(
            serde_json::from_str::<MatchPatch>(r#"{"status": "paused"}"#)
                .is_err()
        );
    }
}
