//! Creating a division's matches from its fixed draw.

use chrono::{Local, Utc};
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::Serialize;
use uuid::Uuid;

use super::Match;
use crate::{
    schema::tournament_matches,
    tournaments::{
        Division, MatchStatus, Sport,
        brackets::{Format, code_prefix},
        rankings,
        sports::Scores,
    },
    util_resp::FailureResponse,
};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DrawSummary {
    pub message: String,
    pub deleted_count: usize,
    pub deleted_rankings_count: usize,
    pub matches_created: usize,
}

/// Throws away every match and ranking of the division and recreates the
/// draw, with every class back to "participating".
#[tracing::instrument(skip(conn))]
pub fn reset(
    sport: Sport,
    division: Division,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<DrawSummary, FailureResponse> {
    conn.transaction::<_, FailureResponse, _>(|conn| {
        let deleted_count = diesel::delete(
            tournament_matches::table
                .filter(tournament_matches::sport.eq(sport.as_str()))
                .filter(tournament_matches::division.eq(division.as_str())),
        )
        .execute(conn)?;
        let deleted_rankings_count =
            rankings::clear_division(sport, division, conn)?;

        let format = Format::of(sport);
        let prefix = code_prefix(sport, division);
        let now = Utc::now().naive_utc();
        let scheduled_time = Local::now().format("%Y-%m-%dT%H:%M").to_string();
        let scores = Scores::empty(sport).encode()?;

        for fixture in format.fixtures() {
            let m = Match {
                id: Uuid::now_v7().to_string(),
                sport: sport.as_str().to_string(),
                division: division.as_str().to_string(),
                match_code: format!("{prefix}{}", fixture.code),
                round: fixture.round,
                match_number: fixture.match_number,
                group_name: fixture.group.map(str::to_string),
                team1: fixture.team1.resolve(prefix),
                team2: fixture.team2.resolve(prefix),
                scores: scores.clone(),
                status: MatchStatus::Waiting.as_str().to_string(),
                winner: None,
                tiebreak_needed: false,
                scheduled_time: scheduled_time.clone(),
                start_time: String::new(),
                end_time: String::new(),
                created_at: now,
                updated_at: now,
            };
            diesel::insert_into(tournament_matches::table)
                .values(&m)
                .execute(conn)?;
        }

        for class in format.classes() {
            rankings::record_participating(sport, division, class, conn)?;
        }

        let matches_created = format.fixtures().len();
        tracing::info!(
            deleted_count,
            deleted_rankings_count,
            matches_created,
            "draw recreated"
        );

        Ok(DrawSummary {
            message: format!(
                "{}{}トーナメントをリセットしました",
                division.display_name(),
                sport.display_name()
            ),
            deleted_count,
            deleted_rankings_count,
            matches_created,
        })
    })
}

#[cfg(test)]
mod tests {
    use diesel::{Connection, SqliteConnection};
    use diesel_migrations::MigrationHarness;

    use super::*;
    use crate::MIGRATIONS;

    #[test]
    fn reset_replaces_the_division_only() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        conn.run_pending_migrations(MIGRATIONS).unwrap();

        let men = reset(Sport::Basketball, Division::Men, &mut conn).unwrap();
        assert_eq!(men.deleted_count, 0);
        assert_eq!(men.matches_created, 19);
        reset(Sport::Basketball, Division::Women, &mut conn).unwrap();

        let again = reset(Sport::Basketball, Division::Men, &mut conn).unwrap();
        assert_eq!(again.deleted_count, 19);
        assert_eq!(again.deleted_rankings_count, 19);

        let women =
            Match::list(Sport::Basketball, Some(Division::Women), &mut conn)
                .unwrap();
        assert_eq!(women.len(), 19);
        assert!(women.iter().all(|m| m.match_code.starts_with("BW")));

        let a5 = Match::by_code(Sport::Basketball, Division::Men, "BMA5", &mut conn)
            .unwrap()
            .unwrap();
        assert_eq!(a5.team1, "1-6");
        assert_eq!(a5.team2, "BMA1勝者");
        assert!(a5.unresolved());
    }

    #[test]
    fn volleyball_groups_are_tagged() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        conn.run_pending_migrations(MIGRATIONS).unwrap();

        reset(Sport::Volleyball, Division::Open, &mut conn).unwrap();
        let group_a =
            Match::in_group(Sport::Volleyball, Division::Open, "A", &mut conn)
                .unwrap();
        assert_eq!(group_a.len(), 3);
        let finals =
            Match::in_group(Sport::Volleyball, Division::Open, "F", &mut conn)
                .unwrap();
        assert_eq!(finals[0].team1, "A組1位");
    }
}
