use std::fmt::Write;

use minigolf_core::game_states::{GameState, Playing, Setup, Summary};
use minigolf_core::narrative::Narrative;
use minigolf_core::scoring::{par_differential, scorecard};
use minigolf_core::types::{Round, HOLES};

pub fn state(state: &GameState, narrative: &Narrative) -> String {
    match state {
        GameState::Setup(setup) => self::setup(setup, false),
        GameState::Paused(setup) => self::setup(setup, true),
        GameState::Playing(playing) => hole(playing, narrative),
        GameState::Summary(summary) => self::summary(summary),
    }
}

fn setup(setup: &Setup, paused: bool) -> String {
    let mut out = String::new();
    if paused {
        out.push_str("Back at setup. Your players are still here.\n");
    }
    let course = setup.course().course();
    let _ = writeln!(out, "Course: {} ({}, par {})", course.name, course.id, course.total_par());
    for (i, name) in setup.roster().names().iter().enumerate() {
        let shown = if name.trim().is_empty() { "(unnamed)" } else { name.as_str() };
        let _ = writeln!(out, "  {}. {}", i + 1, shown);
    }
    out.push_str("Type `start` when everyone is in.");
    out
}

fn hole(playing: &Playing, narrative: &Narrative) -> String {
    let round = playing.round();
    let course = round.course().course();
    let hole = round.hole();

    let mut out = String::new();
    let _ = writeln!(out, "{} | Hole {} of {} | Par {}", course.name, hole + 1, HOLES, round.par());
    let _ = writeln!(out, "{}", narrative.line(round.course(), hole));
    for (i, p) in round.players().iter().enumerate() {
        let strokes = p
            .score(hole)
            .map(|s| s.get().to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {}. {:<20} {:>3}  total {:>3}  {}",
            i + 1,
            p.name(),
            strokes,
            p.total(),
            par_differential(p, course, hole)
        );
    }
    out.push_str(if round.hole_complete() {
        "Type `next` to continue."
    } else {
        "Record a score with `score <player> <strokes>`."
    });
    out
}

pub fn card(round: &Round) -> String {
    let course = round.course().course();
    let mut out = String::new();

    let _ = write!(out, "{:<20}", "Hole");
    for h in 1..=HOLES {
        let _ = write!(out, "{:>3}", h);
    }
    out.push_str("  Out   In  Tot\n");
    let _ = write!(out, "{:<20}", "Par");
    for par in course.pars.iter() {
        let _ = write!(out, "{:>3}", par);
    }
    let front: u32 = course.pars[..9].iter().map(|p| u32::from(*p)).sum();
    let _ = writeln!(
        out,
        "  {:>3}  {:>3}  {:>3}",
        front,
        course.total_par() - front,
        course.total_par()
    );

    for row in scorecard(round) {
        let _ = write!(out, "{:<20}", row.name);
        for s in row.holes.iter() {
            match s {
                Some(s) => {
                    let _ = write!(out, "{:>3}", s);
                }
                None => out.push_str("  -"),
            }
        }
        let _ = writeln!(
            out,
            "  {:>3}  {:>3}  {:>3}  {}",
            row.front_nine, row.back_nine, row.total, row.differential
        );
    }
    out.trim_end().to_string()
}

fn summary(summary: &Summary) -> String {
    let course = summary.course().course();
    let mut out = String::new();
    let _ = writeln!(out, "Final leaderboard, {}", course.name);
    for standing in summary.leaderboard() {
        let _ = writeln!(
            out,
            "  {}. {:<20} {:>3} ({})",
            standing.position, standing.name, standing.total, standing.differential
        );
        for award in standing.awards.iter() {
            let _ = writeln!(out, "       {} on hole {}", award.achievement.label(), award.hole + 1);
        }
    }
    out.push_str("Type `new` for another round.");
    out
}
