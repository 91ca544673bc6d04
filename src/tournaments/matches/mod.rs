use chrono::{NaiveDateTime, Utc};
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};

use crate::{
    schema::tournament_matches,
    tournaments::{
        Division, MatchStatus, Slot, Sport, brackets::code_prefix,
        sports::Scores,
    },
    util_resp::{FailureResponse, err_not_found},
    validation::is_placeholder,
};

pub mod actions;
pub mod draw;
pub mod patch;
pub mod progress;
pub mod view;

#[derive(Queryable, Selectable, Insertable, Clone, Debug)]
#[diesel(table_name = tournament_matches)]
#[diesel(check_for_backend(Sqlite))]
pub struct Match {
    pub id: String,
    pub sport: String,
    pub division: String,
    pub match_code: String,
    pub round: i64,
    pub match_number: i64,
    pub group_name: Option<String>,
    pub team1: String,
    pub team2: String,
    pub scores: String,
    pub status: String,
    pub winner: Option<String>,
    pub tiebreak_needed: bool,
    pub scheduled_time: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// The columns a match can change after it has been created.
#[derive(AsChangeset)]
#[diesel(table_name = tournament_matches)]
#[diesel(treat_none_as_null = true)]
struct MatchChanges<'a> {
    team1: &'a str,
    team2: &'a str,
    scores: &'a str,
    status: &'a str,
    winner: Option<&'a str>,
    tiebreak_needed: bool,
    scheduled_time: &'a str,
    start_time: &'a str,
    end_time: &'a str,
    updated_at: NaiveDateTime,
}

impl Match {
    /// Fetches a match of the given sport; matches belonging to another
    /// sport are treated as missing.
    pub fn fetch(
        sport: Sport,
        id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Match, FailureResponse> {
        let found = tournament_matches::table
            .filter(tournament_matches::id.eq(id))
            .filter(tournament_matches::sport.eq(sport.as_str()))
            .select(Match::as_select())
            .first(conn)
            .optional()?;

        match found {
            Some(m) => Ok(m),
            None => err_not_found(),
        }
    }

    pub fn by_code(
        sport: Sport,
        division: Division,
        code: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Option<Match>, FailureResponse> {
        Ok(tournament_matches::table
            .filter(tournament_matches::sport.eq(sport.as_str()))
            .filter(tournament_matches::division.eq(division.as_str()))
            .filter(tournament_matches::match_code.eq(code))
            .select(Match::as_select())
            .first(conn)
            .optional()?)
    }

    /// All matches of a sport, optionally restricted to one division,
    /// ordered by round and then match number.
    pub fn list(
        sport: Sport,
        division: Option<Division>,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Vec<Match>, FailureResponse> {
        let mut query = tournament_matches::table
            .filter(tournament_matches::sport.eq(sport.as_str()))
            .into_boxed();
        if let Some(division) = division {
            query =
                query.filter(tournament_matches::division.eq(division.as_str()));
        }

        Ok(query
            .order_by((
                tournament_matches::division.asc(),
                tournament_matches::round.asc(),
                tournament_matches::match_number.asc(),
            ))
            .select(Match::as_select())
            .load(conn)?)
    }

    pub fn in_group(
        sport: Sport,
        division: Division,
        group: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Vec<Match>, FailureResponse> {
        Ok(tournament_matches::table
            .filter(tournament_matches::sport.eq(sport.as_str()))
            .filter(tournament_matches::division.eq(division.as_str()))
            .filter(tournament_matches::group_name.eq(group))
            .order_by(tournament_matches::match_number.asc())
            .select(Match::as_select())
            .load(conn)?)
    }

    /// Writes every mutable column back and bumps `updated_at`.
    pub fn save(
        &mut self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<(), FailureResponse> {
        self.updated_at = Utc::now().naive_utc();
        diesel::update(
            tournament_matches::table
                .filter(tournament_matches::id.eq(&self.id)),
        )
        .set(MatchChanges {
            team1: &self.team1,
            team2: &self.team2,
            scores: &self.scores,
            status: &self.status,
            winner: self.winner.as_deref(),
            tiebreak_needed: self.tiebreak_needed,
            scheduled_time: &self.scheduled_time,
            start_time: &self.start_time,
            end_time: &self.end_time,
            updated_at: self.updated_at,
        })
        .execute(conn)?;
        Ok(())
    }

    pub fn sport(&self) -> Result<Sport, FailureResponse> {
        self.sport.parse()
    }

    pub fn division(&self) -> Result<Division, FailureResponse> {
        self.division.parse()
    }

    pub fn status(&self) -> Result<MatchStatus, FailureResponse> {
        self.status.parse()
    }

    pub fn set_status(&mut self, status: MatchStatus) {
        self.status = status.as_str().to_string();
    }

    pub fn scores(&self) -> Result<Scores, FailureResponse> {
        Ok(Scores::decode(self.sport()?, &self.scores)?)
    }

    pub fn set_scores(&mut self, scores: &Scores) -> Result<(), FailureResponse> {
        self.scores = scores.encode()?;
        Ok(())
    }

    pub fn team(&self, slot: Slot) -> &str {
        match slot {
            Slot::Team1 => &self.team1,
            Slot::Team2 => &self.team2,
        }
    }

    pub fn set_team(&mut self, slot: Slot, team: String) {
        match slot {
            Slot::Team1 => self.team1 = team,
            Slot::Team2 => self.team2 = team,
        }
    }

    /// Whether a slot still names the match that will fill it rather than
    /// a team.
    pub fn unresolved(&self) -> bool {
        is_placeholder(&self.team1) || is_placeholder(&self.team2)
    }

    /// The match code as it appears in the draw, without the division
    /// prefix.
    pub fn draw_code(&self) -> Result<&str, FailureResponse> {
        let prefix = code_prefix(self.sport()?, self.division()?);
        Ok(self
            .match_code
            .strip_prefix(prefix)
            .unwrap_or(&self.match_code))
    }
}
