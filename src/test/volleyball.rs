use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use super::{find, id_of, initialize, rankings, ranking_of, server};
use crate::tournaments::matches::progress::FINAL_GROUP_STARTED;

async fn score(server: &TestServer, code: &str, team1: i64, team2: i64) -> Value {
    let id = id_of(server, "volleyball", None, code).await;
    let res = server
        .post(&format!("/api/volleyball/matches/{id}/score"))
        .json(&json!({ "team1Score": team1, "team2Score": team2 }))
        .await;
    res.assert_status_ok();
    res.json::<Value>()
}

/// Plays a group so that the first team listed in it wins every game.
async fn sweep(server: &TestServer, group: &str) {
    for n in 1..=3 {
        score(server, &format!("{group}{n}"), 25, 10).await;
    }
}

#[tokio::test]
async fn group_winner_reaches_the_final_group() {
    let server = server();
    let summary = initialize(&server, "volleyball", None).await;
    assert_eq!(summary["matchesCreated"], 12);

    let a1 = score(&server, "A1", 25, 20).await;
    assert_eq!(a1["status"], "finished");
    assert_eq!(a1["winner"], "1-1");
    assert_eq!(a1["group"], "A");
    assert_eq!(a1["scores"]["team1"]["score"], 25);

    score(&server, "A2", 25, 10).await;
    assert_eq!(find(&server, "volleyball", None, "F1").await["team1"], "A組1位");
    score(&server, "A3", 23, 21).await;

    assert_eq!(find(&server, "volleyball", None, "F1").await["team1"], "1-1");
    assert_eq!(find(&server, "volleyball", None, "F2").await["team1"], "1-1");
    assert_eq!(find(&server, "volleyball", None, "F3").await["team1"], "B組1位");

    let table = rankings(&server, "volleyball", None).await;
    assert_eq!(ranking_of(&table, "1-1")["rankText"], "参加中");
    assert_eq!(ranking_of(&table, "1-2")["rankText"], "予選敗退");
    assert_eq!(ranking_of(&table, "1-3")["eliminatedAt"], "A組");

    let standings = server
        .get("/api/volleyball/standings")
        .await
        .json::<Vec<Value>>();
    assert_eq!(standings.len(), 4);
    assert_eq!(standings[0]["group"], "A");
    assert_eq!(standings[0]["completed"], true);
    assert_eq!(standings[0]["leader"], "1-1");
    assert_eq!(standings[0]["teams"][0]["points"], 4);
    assert_eq!(standings[0]["teams"][1]["team"], "1-2");
    assert_eq!(standings[1]["completed"], false);
    assert_eq!(standings[3]["label"], "決勝リーグ");
}

#[tokio::test]
async fn unfinished_scores_are_kept_and_impossible_ones_refused() {
    let server = server();
    initialize(&server, "volleyball", None).await;

    let b1 = id_of(&server, "volleyball", None, "B1").await;
    let res = server
        .post(&format!("/api/volleyball/matches/{b1}/score"))
        .json(&json!({ "team1Score": 22, "team2Score": 21 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(find(&server, "volleyball", None, "B1").await["status"], "waiting");

    let b1 = score(&server, "B1", 18, 15).await;
    assert_eq!(b1["status"], "in_progress");
    assert_eq!(b1["winner"], Value::Null);

    let b1 = score(&server, "B1", 19, 25).await;
    assert_eq!(b1["status"], "finished");
    assert_eq!(b1["winner"], "2-2");

    let id = id_of(&server, "volleyball", None, "B1").await;
    let res = server
        .post(&format!("/api/volleyball/matches/{id}/score"))
        .json(&json!({ "team1Score": 25, "team2Score": 0 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn final_group_hands_out_places_and_locks_the_groups() {
    let server = server();
    initialize(&server, "volleyball", None).await;
    for group in ["A", "B", "C"] {
        sweep(&server, group).await;
    }

    let f1 = find(&server, "volleyball", None, "F1").await;
    assert_eq!((f1["team1"].clone(), f1["team2"].clone()), (json!("1-1"), json!("2-1")));
    let f3 = find(&server, "volleyball", None, "F3").await;
    assert_eq!((f3["team1"].clone(), f3["team2"].clone()), (json!("2-1"), json!("3-1")));

    // before the final group starts a group result can still change
    let a1 = id_of(&server, "volleyball", None, "A1").await;
    let res = server
        .post(&format!("/api/volleyball/matches/{a1}/correct"))
        .json(&json!({ "team1Score": 20, "team2Score": 25 }))
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["winner"], "1-2");
    assert_eq!(find(&server, "volleyball", None, "F1").await["team1"], "1-2");
    let table = rankings(&server, "volleyball", None).await;
    assert_eq!(ranking_of(&table, "1-2")["rankText"], "参加中");
    assert_eq!(ranking_of(&table, "1-1")["rankText"], "予選敗退");

    score(&server, "F1", 25, 15).await;
    score(&server, "F2", 25, 15).await;
    score(&server, "F3", 15, 25).await;

    let table = rankings(&server, "volleyball", None).await;
    assert_eq!(ranking_of(&table, "1-2")["rank"], 1);
    assert_eq!(ranking_of(&table, "1-2")["rankText"], "1位");
    assert_eq!(ranking_of(&table, "3-1")["rankText"], "2位");
    assert_eq!(ranking_of(&table, "2-1")["rank"], 3);
    assert_eq!(table[0]["className"], "1-2");

    let res = server
        .post(&format!("/api/volleyball/matches/{a1}/correct"))
        .json(&json!({ "team1Score": 25, "team2Score": 20 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>()["error"], FINAL_GROUP_STARTED);
}

#[tokio::test]
async fn standings_are_only_for_league_sports() {
    let server = server();
    let res = server.get("/api/basketball/standings").await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn correction_that_levels_a_group_keeps_everyone_in() {
    let server = server();
    initialize(&server, "volleyball", None).await;
    sweep(&server, "A").await;

    let table = rankings(&server, "volleyball", None).await;
    assert_eq!(ranking_of(&table, "1-3")["rankText"], "予選敗退");
    assert_eq!(find(&server, "volleyball", None, "F1").await["team1"], "1-1");

    // every team now has one win, with identical scores for and against
    let a2 = id_of(&server, "volleyball", None, "A2").await;
    let res = server
        .post(&format!("/api/volleyball/matches/{a2}/correct"))
        .json(&json!({ "team1Score": 10, "team2Score": 25 }))
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["winner"], "1-3");

    let table = rankings(&server, "volleyball", None).await;
    assert_eq!(table.len(), 9);
    for class in ["1-1", "1-2", "1-3"] {
        let row = ranking_of(&table, class);
        assert_eq!(row["rankText"], "参加中", "{class}");
        assert_eq!(row["eliminatedAt"], Value::Null, "{class}");
    }

    assert_eq!(find(&server, "volleyball", None, "F1").await["team1"], "A組1位");
    assert_eq!(find(&server, "volleyball", None, "F2").await["team1"], "A組1位");
    let standings = server
        .get("/api/volleyball/standings")
        .await
        .json::<Vec<Value>>();
    assert_eq!(standings[0]["completed"], true);
    assert_eq!(standings[0]["leader"], Value::Null);
}
