use axum::{
    Router,
    routing::{get, post},
};
use diesel::{
    SqliteConnection,
    r2d2::{ConnectionManager, Pool},
};
use diesel_migrations::MigrationHarness;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    MIGRATIONS,
    state::{DbPool, SqlitePragmas},
    tournaments::handlers::{
        do_correct_match, do_finish_match, do_record_janken, do_record_ranking,
        do_reset_draw, do_start_match, do_submit_score, do_update_match,
        health, list_matches, list_rankings, view_match, view_standings,
        view_statistics,
    },
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An in-memory database only lives as long as its connection, so it is
/// given a pool of exactly one.
pub fn make_pool(db_url: &str) -> Result<DbPool, BoxError> {
    let pool = Pool::builder()
        .max_size(if db_url == ":memory:" { 1 } else { 10 })
        .connection_customizer(Box::new(SqlitePragmas))
        .build(ConnectionManager::<SqliteConnection>::new(db_url))?;
    Ok(pool)
}

pub fn run_migrations(pool: &DbPool) -> Result<(), BoxError> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "applied migrations");
    }
    Ok(())
}

pub fn create_app(pool: DbPool) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/:sport/matches", get(list_matches))
        .route(
            "/api/:sport/matches/:id",
            get(view_match).put(do_update_match),
        )
        .route("/api/:sport/matches/:id/start", post(do_start_match))
        .route("/api/:sport/matches/:id/finish", post(do_finish_match))
        .route("/api/:sport/matches/:id/correct", post(do_correct_match))
        .route("/api/:sport/matches/:id/janken", post(do_record_janken))
        .route("/api/:sport/matches/:id/score", post(do_submit_score))
        .route("/api/:sport/initialize", post(do_reset_draw))
        .route("/api/:sport/reset", post(do_reset_draw))
        .route(
            "/api/:sport/rankings",
            get(list_rankings).post(do_record_ranking),
        )
        .route("/api/:sport/statistics", get(view_statistics))
        .route("/api/:sport/standings", get(view_standings))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(pool)
}
