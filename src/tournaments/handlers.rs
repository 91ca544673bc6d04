//! JSON endpoints under `/api/:sport`.

use axum::{
    Json,
    extract::{Path, Query, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    state::Conn,
    tournaments::{
        Division, MatchStatus, Sport,
        brackets::{Format, group_label},
        matches::{
            Match,
            actions::{self, JankenForm, ScoreForm},
            draw::{self, DrawSummary},
            patch::{self, MatchPatch},
            view::MatchView,
        },
        rankings::{self, RankingForm, RankingView},
        sports::ScorePatch,
        standings::{self, TeamRecord},
        statistics::{self, Statistics},
    },
    util_resp::{FailureResponse, StandardResponse, bad_request, success},
    validation::is_valid_class_name,
};

#[derive(Deserialize, Debug, Default)]
pub struct GenderParams {
    pub gender: Option<String>,
}

fn parse_sport(raw: &str) -> Result<Sport, FailureResponse> {
    raw.parse()
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_matches(
    Path(raw_sport): Path<String>,
    Query(params): Query<GenderParams>,
    mut conn: Conn,
) -> StandardResponse<Json<Vec<MatchView>>> {
    let sport = parse_sport(&raw_sport)?;
    let division = sport.division_filter(params.gender.as_deref())?;
    let matches = Match::list(sport, division, &mut *conn)?;
    success(MatchView::list(matches)?)
}

pub async fn view_match(
    Path((raw_sport, id)): Path<(String, String)>,
    mut conn: Conn,
) -> StandardResponse<Json<MatchView>> {
    let m = Match::fetch(parse_sport(&raw_sport)?, &id, &mut *conn)?;
    success(MatchView::new(m)?)
}

pub async fn do_update_match(
    Path((raw_sport, id)): Path<(String, String)>,
    mut conn: Conn,
    payload: Result<Json<MatchPatch>, JsonRejection>,
) -> StandardResponse<Json<MatchView>> {
    let Json(form) = payload?;
    let m = patch::update(parse_sport(&raw_sport)?, &id, &form, &mut *conn)?;
    success(MatchView::new(m)?)
}

pub async fn do_start_match(
    Path((raw_sport, id)): Path<(String, String)>,
    mut conn: Conn,
) -> StandardResponse<Json<MatchView>> {
    let m = actions::start(parse_sport(&raw_sport)?, &id, &mut *conn)?;
    success(MatchView::new(m)?)
}

pub async fn do_finish_match(
    Path((raw_sport, id)): Path<(String, String)>,
    mut conn: Conn,
) -> StandardResponse<Json<MatchView>> {
    let m = actions::finish(parse_sport(&raw_sport)?, &id, &mut *conn)?;
    success(MatchView::new(m)?)
}

pub async fn do_correct_match(
    Path((raw_sport, id)): Path<(String, String)>,
    mut conn: Conn,
    payload: Result<Json<ScorePatch>, JsonRejection>,
) -> StandardResponse<Json<MatchView>> {
    let Json(form) = payload?;
    let m = actions::correct(parse_sport(&raw_sport)?, &id, &form, &mut *conn)?;
    success(MatchView::new(m)?)
}

pub async fn do_record_janken(
    Path((raw_sport, id)): Path<(String, String)>,
    mut conn: Conn,
    payload: Result<Json<JankenForm>, JsonRejection>,
) -> StandardResponse<Json<MatchView>> {
    let Json(form) = payload?;
    let m =
        actions::janken(parse_sport(&raw_sport)?, &id, &form.winner, &mut *conn)?;
    success(MatchView::new(m)?)
}

pub async fn do_submit_score(
    Path((raw_sport, id)): Path<(String, String)>,
    mut conn: Conn,
    payload: Result<Json<ScoreForm>, JsonRejection>,
) -> StandardResponse<Json<MatchView>> {
    let Json(form) = payload?;
    let m = actions::submit_score(parse_sport(&raw_sport)?, &id, &form, &mut *conn)?;
    success(MatchView::new(m)?)
}

/// Serves both `/initialize` and `/reset`. The gender may come from the
/// body or the query string.
pub async fn do_reset_draw(
    Path(raw_sport): Path<String>,
    Query(params): Query<GenderParams>,
    mut conn: Conn,
    payload: Result<Json<GenderParams>, JsonRejection>,
) -> StandardResponse<Json<DrawSummary>> {
    let sport = parse_sport(&raw_sport)?;
    // a request without a JSON body falls back to the query string
    let body = match payload {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => GenderParams::default(),
        Err(e) => return Err(e.into()),
    };
    let gender = body.gender.or(params.gender);
    let division = sport.division(gender.as_deref())?;
    success(draw::reset(sport, division, &mut *conn)?)
}

pub async fn list_rankings(
    Path(raw_sport): Path<String>,
    Query(params): Query<GenderParams>,
    mut conn: Conn,
) -> StandardResponse<Json<Vec<RankingView>>> {
    let sport = parse_sport(&raw_sport)?;
    let division = sport.division(params.gender.as_deref())?;
    let rankings = rankings::list(sport, division, &mut *conn)?
        .into_iter()
        .map(RankingView::new)
        .collect::<Result<Vec<_>, _>>()?;
    success(rankings)
}

pub async fn do_record_ranking(
    Path(raw_sport): Path<String>,
    mut conn: Conn,
    payload: Result<Json<RankingForm>, JsonRejection>,
) -> StandardResponse<Json<RankingView>> {
    let Json(form) = payload?;
    let sport = parse_sport(&raw_sport)?;
    let division = sport.division(form.gender.as_deref())?;
    is_valid_class_name(&form.class_name)
        .map_err(FailureResponse::BadRequest)?;
    if form.rank.is_some_and(|rank| rank < 1) {
        return bad_request("順位は1以上で指定してください");
    }

    let ranking = rankings::record(
        sport,
        division,
        &form.class_name,
        form.rank,
        form.rank_text.as_deref(),
        form.eliminated_at.as_deref(),
        &mut *conn,
    )?;
    success(RankingView::new(ranking)?)
}

pub async fn view_statistics(
    Path(raw_sport): Path<String>,
    Query(params): Query<GenderParams>,
    mut conn: Conn,
) -> StandardResponse<Json<Statistics>> {
    let sport = parse_sport(&raw_sport)?;
    let division = sport.division_filter(params.gender.as_deref())?;
    let matches = Match::list(sport, division, &mut *conn)?;
    success(statistics::compute(&matches)?)
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GroupStandings {
    pub group: &'static str,
    pub label: String,
    pub completed: bool,
    pub leader: Option<String>,
    pub teams: Vec<TeamRecord>,
}

pub async fn view_standings(
    Path(raw_sport): Path<String>,
    mut conn: Conn,
) -> StandardResponse<Json<Vec<GroupStandings>>> {
    let sport = parse_sport(&raw_sport)?;
    let Format::League(league) = Format::of(sport) else {
        return bad_request("順位表はリーグ戦の競技でのみ利用できます");
    };

    let mut groups = vec![];
    let names = league
        .groups
        .iter()
        .map(|g| g.name)
        .chain([league.final_group]);
    for name in names {
        let matches = Match::in_group(sport, Division::Open, name, &mut *conn)?;
        let mut completed = !matches.is_empty();
        for m in &matches {
            completed &= m.status()? == MatchStatus::Finished;
        }
        let teams = standings::compute(&matches)?;
        let leader = completed
            .then(|| standings::leader(&teams).map(|r| r.team.clone()))
            .flatten();
        groups.push(GroupStandings {
            group: name,
            label: if name == league.final_group {
                "決勝リーグ".to_string()
            } else {
                group_label(name)
            },
            completed,
            leader,
            teams,
        });
    }
    success(groups)
}
