use chrono::{NaiveDateTime, Utc};
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    schema::tournament_rankings,
    tournaments::{Division, Sport},
    util_resp::FailureResponse,
};

/// Label given to every class that is still in the competition.
pub const PARTICIPATING: &str = "参加中";
/// Label for classes knocked out in a preliminary league group.
pub const GROUP_STAGE_EXIT: &str = "予選敗退";

#[derive(Queryable, Selectable, Insertable, Clone, Debug)]
#[diesel(table_name = tournament_rankings)]
#[diesel(check_for_backend(Sqlite))]
pub struct Ranking {
    pub id: String,
    pub sport: String,
    pub division: String,
    pub class_name: String,
    pub rank: Option<i64>,
    pub rank_text: Option<String>,
    pub eliminated_at: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RankingView {
    pub id: String,
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Division>,
    pub rank: Option<i64>,
    pub rank_text: Option<String>,
    pub eliminated_at: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl RankingView {
    pub fn new(r: Ranking) -> Result<RankingView, FailureResponse> {
        Ok(RankingView {
            gender: r.division.parse::<Division>()?.gender(),
            id: r.id,
            class_name: r.class_name,
            rank: r.rank,
            rank_text: r.rank_text,
            eliminated_at: r.eliminated_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Body of a manual ranking update.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RankingForm {
    pub class_name: String,
    pub gender: Option<String>,
    pub rank: Option<i64>,
    pub rank_text: Option<String>,
    pub eliminated_at: Option<String>,
}

/// Creates or replaces the ranking of one class.
#[tracing::instrument(skip(conn))]
pub fn record(
    sport: Sport,
    division: Division,
    class_name: &str,
    rank: Option<i64>,
    rank_text: Option<&str>,
    eliminated_at: Option<&str>,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Ranking, FailureResponse> {
    let now = Utc::now().naive_utc();

    let existing = tournament_rankings::table
        .filter(tournament_rankings::sport.eq(sport.as_str()))
        .filter(tournament_rankings::division.eq(division.as_str()))
        .filter(tournament_rankings::class_name.eq(class_name))
        .select(Ranking::as_select())
        .first(conn)
        .optional()?;

    let id = match existing {
        Some(existing) => {
            diesel::update(
                tournament_rankings::table
                    .filter(tournament_rankings::id.eq(&existing.id)),
            )
            .set((
                tournament_rankings::rank.eq(rank),
                tournament_rankings::rank_text.eq(rank_text),
                tournament_rankings::eliminated_at.eq(eliminated_at),
                tournament_rankings::updated_at.eq(now),
            ))
            .execute(conn)?;
            existing.id
        }
        None => {
            let ranking = Ranking {
                id: Uuid::now_v7().to_string(),
                sport: sport.as_str().to_string(),
                division: division.as_str().to_string(),
                class_name: class_name.to_string(),
                rank,
                rank_text: rank_text.map(str::to_string),
                eliminated_at: eliminated_at.map(str::to_string),
                created_at: now,
                updated_at: now,
            };
            diesel::insert_into(tournament_rankings::table)
                .values(&ranking)
                .execute(conn)?;
            ranking.id
        }
    };

    Ok(tournament_rankings::table
        .filter(tournament_rankings::id.eq(id))
        .select(Ranking::as_select())
        .first(conn)?)
}

/// Marks a class as still in the competition.
pub fn record_participating(
    sport: Sport,
    division: Division,
    class_name: &str,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Ranking, FailureResponse> {
    record(sport, division, class_name, None, Some(PARTICIPATING), None, conn)
}

pub fn clear(
    sport: Sport,
    division: Division,
    class_name: &str,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<usize, FailureResponse> {
    Ok(diesel::delete(
        tournament_rankings::table
            .filter(tournament_rankings::sport.eq(sport.as_str()))
            .filter(tournament_rankings::division.eq(division.as_str()))
            .filter(tournament_rankings::class_name.eq(class_name)),
    )
    .execute(conn)?)
}

pub fn clear_division(
    sport: Sport,
    division: Division,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<usize, FailureResponse> {
    Ok(diesel::delete(
        tournament_rankings::table
            .filter(tournament_rankings::sport.eq(sport.as_str()))
            .filter(tournament_rankings::division.eq(division.as_str())),
    )
    .execute(conn)?)
}

/// Rankings of a division, best first. Unranked classes come last.
pub fn list(
    sport: Sport,
    division: Division,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Vec<Ranking>, FailureResponse> {
    let mut rankings = tournament_rankings::table
        .filter(tournament_rankings::sport.eq(sport.as_str()))
        .filter(tournament_rankings::division.eq(division.as_str()))
        .order_by(tournament_rankings::class_name.asc())
        .select(Ranking::as_select())
        .load(conn)?;
    rankings.sort_by_key(|r| (r.rank.is_none(), r.rank));
    Ok(rankings)
}

#[cfg(test)]
mod tests {
    use diesel::{Connection, SqliteConnection};
    use diesel_migrations::MigrationHarness;

    use super::*;
    use crate::MIGRATIONS;

    fn conn() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        conn.run_pending_migrations(MIGRATIONS).unwrap();
        conn
    }

    #[test]
    fn record_replaces_existing_row() {
        let mut conn = conn();
        let first = record_participating(
            Sport::Softball,
            Division::Open,
            "2-4",
            &mut conn,
        )
        .unwrap();
        let second = record(
            Sport::Softball,
            Division::Open,
            "2-4",
            Some(19),
            Some("ベスト19"),
            Some("A1"),
            &mut conn,
        )
        .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.rank, Some(19));
        assert_eq!(second.eliminated_at.as_deref(), Some("A1"));

        let all = list(Sport::Softball, Division::Open, &mut conn).unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn divisions_are_kept_apart() {
        let mut conn = conn();
        record_participating(Sport::Basketball, Division::Men, "1-1", &mut conn)
            .unwrap();
        record_participating(
            Sport::Basketball,
            Division::Women,
            "1-1",
            &mut conn,
        )
        .unwrap();

        assert_eq!(
            clear(Sport::Basketball, Division::Men, "1-1", &mut conn).unwrap(),
            1
        );
        assert_eq!(
            list(Sport::Basketball, Division::Women, &mut conn)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn ranked_classes_come_first() {
        let mut conn = conn();
        for (class, rank) in [("1-1", None), ("1-2", Some(2)), ("1-3", Some(1))]
        {
            record(
                Sport::Volleyball,
                Division::Open,
                class,
                rank,
                None,
                None,
                &mut conn,
            )
            .unwrap();
        }
        let order = list(Sport::Volleyball, Division::Open, &mut conn)
            .unwrap()
            .into_iter()
            .map(|r| r.class_name)
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["1-3", "1-2", "1-1"]);
    }
}
