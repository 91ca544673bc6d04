//! Moving teams on once a match has been decided, and the check that a
//! decided match can still be changed.

use diesel::{connection::LoadConnection, sqlite::Sqlite};

use super::Match;
use crate::{
    tournaments::{
        Division, MatchStatus, Slot, Sport,
        brackets::{
            Elimination, Finisher, Format, League, code_prefix, group_label,
            group_leader,
        },
        rankings::{self, GROUP_STAGE_EXIT},
        standings,
    },
    util_resp::{FailureResponse, conflict},
};

pub const NEXT_MATCH_STARTED: &str =
    "次の試合が既に開始されているため、この試合は再編集できません。";
pub const FINAL_GROUP_STARTED: &str =
    "決勝リーグが既に開始されているため、この試合は再編集できません。";

/// Applies the consequences of `m` having been won by `winner`: the teams
/// move on to their next matches and the rankings are updated.
pub fn advance(
    m: &Match,
    winner: Slot,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<(), FailureResponse> {
    match Format::of(m.sport()?) {
        Format::Elimination(bracket) => advance_in_bracket(bracket, m, winner, conn),
        Format::League(league) => progress_league(league, m, conn),
    }
}

fn advance_in_bracket(
    bracket: &Elimination,
    m: &Match,
    winner: Slot,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<(), FailureResponse> {
    let sport = m.sport()?;
    let division = m.division()?;
    let prefix = code_prefix(sport, division);
    let code = m.draw_code()?;
    let winner_name = m.team(winner);
    let loser_name = m.team(winner.other());

    if let Some(next) = bracket.winner_target(code) {
        let target = format!("{prefix}{}", next.to);
        place(sport, division, &target, next.slot, winner_name, conn)?;
    }
    if let Some(next) = bracket.loser_target(code) {
        let target = format!("{prefix}{}", next.to);
        place(sport, division, &target, next.slot, loser_name, conn)?;
    }

    let placements = bracket.placements(code);
    if !placements.iter().any(|(f, _)| *f == Finisher::Winner) {
        rankings::record_participating(sport, division, winner_name, conn)?;
    }
    for (finisher, placement) in placements {
        let (team, eliminated_at) = match finisher {
            Finisher::Winner => (winner_name, None),
            Finisher::Loser => (loser_name, Some(m.match_code.as_str())),
        };
        rankings::record(
            sport,
            division,
            team,
            placement.rank,
            Some(placement.label),
            eliminated_at,
            conn,
        )?;
    }

    Ok(())
}

/// Writes `team` into one slot of the match `code`.
fn place(
    sport: Sport,
    division: Division,
    code: &str,
    slot: Slot,
    team: &str,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<(), FailureResponse> {
    match Match::by_code(sport, division, code, conn)? {
        Some(mut target) => {
            target.set_team(slot, team.to_string());
            target.save(conn)?;
            tracing::info!(next = code, ?slot, team, "team advanced");
        }
        None => {
            tracing::warn!(next = code, "advancement target is missing");
        }
    }
    Ok(())
}

/// Once every match of a group has finished, its table decides who goes
/// on: a preliminary group sends its winner into the final group, and the
/// final group hands out the places.
fn progress_league(
    league: &League,
    m: &Match,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<(), FailureResponse> {
    let sport = m.sport()?;
    let division = m.division()?;
    let Some(group) = m.group_name.as_deref() else {
        tracing::warn!(code = %m.match_code, "league match without a group");
        return Ok(());
    };

    let matches = Match::in_group(sport, division, group, conn)?;
    for other in &matches {
        if other.status()? != MatchStatus::Finished {
            return Ok(());
        }
    }
    let table = standings::compute(&matches)?;

    if group == league.final_group {
        for (record, position) in standings::places(&table) {
            let label = format!("{position}位");
            rankings::record(
                sport,
                division,
                &record.team,
                Some(position),
                Some(&label),
                None,
                conn,
            )?;
        }
        return Ok(());
    }

    let leader = standings::leader(&table);
    let finalist = match leader {
        Some(record) => record.team.clone(),
        None => {
            tracing::warn!(group, "group is level at the top, final slots left open");
            group_leader(group)
        }
    };
    for (code, slot) in league.final_slots_for(group) {
        place(sport, division, code, slot, &finalist, conn)?;
    }

    // a level group eliminates nobody until it is settled by hand
    let eliminated_at = group_label(group);
    for record in &table {
        match leader {
            Some(l) if l.team != record.team => {
                rankings::record(
                    sport,
                    division,
                    &record.team,
                    None,
                    Some(GROUP_STAGE_EXIT),
                    Some(&eliminated_at),
                    conn,
                )?;
            }
            _ => {
                rankings::record_participating(
                    sport,
                    division,
                    &record.team,
                    conn,
                )?;
            }
        }
    }
    Ok(())
}

/// The matches whose line-up depends on the result of `m`.
pub fn dependents(
    m: &Match,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<Vec<Match>, FailureResponse> {
    let sport = m.sport()?;
    let division = m.division()?;
    match Format::of(sport) {
        Format::Elimination(bracket) => {
            let code = m.draw_code()?;
            let prefix = code_prefix(sport, division);
            let mut next = vec![];
            for target in [bracket.winner_target(code), bracket.loser_target(code)]
                .into_iter()
                .flatten()
            {
                let target = format!("{prefix}{}", target.to);
                if let Some(found) = Match::by_code(sport, division, &target, conn)? {
                    next.push(found);
                }
            }
            Ok(next)
        }
        Format::League(league) => match m.group_name.as_deref() {
            Some(group) if group != league.final_group => {
                Match::in_group(sport, division, league.final_group, conn)
            }
            _ => Ok(vec![]),
        },
    }
}

/// A decided match may only be changed while nothing that depends on it
/// has started.
pub fn ensure_correctable(
    m: &Match,
    conn: &mut impl LoadConnection<Backend = Sqlite>,
) -> Result<(), FailureResponse> {
    let message = match Format::of(m.sport()?) {
        Format::Elimination(_) => NEXT_MATCH_STARTED,
        Format::League(_) => FINAL_GROUP_STARTED,
    };
    for next in dependents(m, conn)? {
        if next.status()? != MatchStatus::Waiting {
            tracing::info!(
                code = %m.match_code,
                blocked_by = %next.match_code,
                "correction refused"
            );
            return conflict(message);
        }
    }
    Ok(())
}
