//! End-to-end tests that drive the API through an in-memory server.

use axum_test::TestServer;
use serde_json::{Value, json};

use crate::config::{create_app, make_pool, run_migrations};

mod table_tennis;
mod volleyball;

pub(crate) fn server() -> TestServer {
    let pool = make_pool(":memory:").unwrap();
    run_migrations(&pool).unwrap();
    TestServer::new(create_app(pool)).unwrap()
}

/// Creates the draw of one division and checks that it succeeded.
pub(crate) async fn initialize(
    server: &TestServer,
    sport: &str,
    gender: Option<&str>,
) -> Value {
    let res = server
        .post(&format!("/api/{sport}/initialize"))
        .json(&json!({ "gender": gender }))
        .await;
    res.assert_status_ok();
    res.json::<Value>()
}

pub(crate) async fn matches(
    server: &TestServer,
    sport: &str,
    gender: Option<&str>,
) -> Vec<Value> {
    let mut req = server.get(&format!("/api/{sport}/matches"));
    if let Some(gender) = gender {
        req = req.add_query_param("gender", gender);
    }
    let res = req.await;
    res.assert_status_ok();
    res.json::<Vec<Value>>()
}

pub(crate) async fn find(
    server: &TestServer,
    sport: &str,
    gender: Option<&str>,
    code: &str,
) -> Value {
    matches(server, sport, gender)
        .await
        .into_iter()
        .find(|m| m["matchCode"] == code)
        .unwrap_or_else(|| panic!("no match {code}"))
}

pub(crate) async fn id_of(
    server: &TestServer,
    sport: &str,
    gender: Option<&str>,
    code: &str,
) -> String {
    find(server, sport, gender, code).await["id"]
        .as_str()
        .unwrap()
        .to_string()
}

pub(crate) async fn rankings(
    server: &TestServer,
    sport: &str,
    gender: Option<&str>,
) -> Vec<Value> {
    let mut req = server.get(&format!("/api/{sport}/rankings"));
    if let Some(gender) = gender {
        req = req.add_query_param("gender", gender);
    }
    let res = req.await;
    res.assert_status_ok();
    res.json::<Vec<Value>>()
}

pub(crate) fn ranking_of<'a>(rankings: &'a [Value], class: &str) -> &'a Value {
    rankings
        .iter()
        .find(|r| r["className"] == class)
        .unwrap_or_else(|| panic!("no ranking for {class}"))
}
