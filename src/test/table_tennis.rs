use axum::http::StatusCode;
use serde_json::{Value, json};

use super::{find, id_of, initialize, rankings, ranking_of, server};

#[tokio::test]
async fn categories_decide_the_match() {
    let server = server();
    initialize(&server, "tabletennis", None).await;

    let a1 = id_of(&server, "tabletennis", None, "TUA1").await;
    server
        .post(&format!("/api/tabletennis/matches/{a1}/start"))
        .await
        .assert_status_ok();
    let res = server
        .put(&format!("/api/tabletennis/matches/{a1}"))
        .json(&json!({
            "menSingles": {
                "set1": { "team1": 11, "team2": 5 },
                "set2": { "team1": 9, "team2": 11 },
                "set3": { "team1": 12, "team2": 10 },
            },
            "mixedDoubles": { "set1": { "team1": 11, "team2": 10 } },
        }))
        .await;
    res.assert_status_ok();
    let body = res.json::<Value>();
    assert_eq!(body["menSingles"]["setsWon"]["team1"], 2);
    assert_eq!(body["menSingles"]["setsWon"]["team2"], 1);
    assert_eq!(body["menSingles"]["winner"], "2-3");
    assert_eq!(body["mixedDoubles"]["setsWon"]["team1"], 0);
    assert_eq!(body["team1Wins"], 1);
    assert_eq!(body["team2Wins"], 0);

    let res = server
        .post(&format!("/api/tabletennis/matches/{a1}/finish"))
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["winner"], "2-3");

    assert_eq!(find(&server, "tabletennis", None, "TUA3").await["team2"], "2-3");
    let table = rankings(&server, "tabletennis", None).await;
    assert_eq!(ranking_of(&table, "3-1")["rankText"], "ベスト19");
    assert_eq!(ranking_of(&table, "3-1")["eliminatedAt"], "TUA1");
}

#[tokio::test]
async fn level_categories_cannot_finish() {
    let server = server();
    initialize(&server, "tabletennis", None).await;

    let b1 = id_of(&server, "tabletennis", None, "TUB1").await;
    server
        .post(&format!("/api/tabletennis/matches/{b1}/start"))
        .await
        .assert_status_ok();
    let res = server
        .post(&format!("/api/tabletennis/matches/{b1}/finish"))
        .await;
    assert_eq!(res.status_code(), StatusCode::CONFLICT);

    let b1 = find(&server, "tabletennis", None, "TUB1").await;
    assert_eq!(b1["status"], "in_progress");
    assert_eq!(b1["winner"], Value::Null);
}
