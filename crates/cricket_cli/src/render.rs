//! Plain-text scorecards.

use std::fmt::{self, Write};

use cricket_core::analysis::{BattingRow, InningsCard};
use cricket_core::models::PlayerStatus;
use cricket_core::{InningsPhase, MatchSnapshot};

fn status_label(row: &BattingRow) -> &'static str {
    match row.status {
        PlayerStatus::Batting => "not out",
        PlayerStatus::Out => "out",
        PlayerStatus::RetiredHurt => "retired hurt",
        PlayerStatus::Available => "",
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn write_card(out: &mut String, card: &InningsCard) -> fmt::Result {
    writeln!(
        out,
        "{} innings: {}/{} ({} ov)",
        card.batting_team, card.runs, card.wickets, card.overs
    )?;

    writeln!(
        out,
        "{:<20} {:<13} {:>4} {:>4} {:>3} {:>3} {:>7}",
        "Batting", "", "R", "B", "4s", "6s", "SR"
    )?;
    for row in card.batting.iter().filter(|r| r.has_batted()) {
        writeln!(
            out,
            "{:<20} {:<13} {:>4} {:>4} {:>3} {:>3} {:>7.2}",
            row.name,
            status_label(row),
            row.runs,
            row.balls,
            row.fours,
            row.sixes,
            row.strike_rate
        )?;
    }

    let e = &card.extras;
    writeln!(
        out,
        "Extras: {} (wd {}, nb {}, b {}, lb {})",
        e.total, e.wides, e.no_balls, e.byes, e.leg_byes
    )?;

    if !card.fall_of_wickets.is_empty() {
        let fow: Vec<String> = card
            .fall_of_wickets
            .iter()
            .map(|w| format!("{}-{} ({}, {} ov)", w.wicket_number, w.score, w.batter, w.overs))
            .collect();
        writeln!(out, "Fall of wickets: {}", fow.join(", "))?;
    }

    writeln!(out, "{:<20} {:>5} {:>4} {:>3} {:>6}", "Bowling", "O", "R", "W", "Econ")?;
    for row in &card.bowling {
        writeln!(
            out,
            "{:<20} {:>5} {:>4} {:>3} {:>6.2}",
            row.name,
            row.overs.to_string(),
            row.runs_conceded,
            row.wickets,
            row.economy
        )?;
    }

    if !card.overs_breakdown.is_empty() {
        writeln!(out, "Overs:")?;
        for over in &card.overs_breakdown {
            writeln!(
                out,
                "  {:>2} {:<12} {}  ({})",
                over.number,
                over.bowler,
                over.balls.join(" "),
                over.runs
            )?;
        }
    }

    if let Some(p) = &card.highest_partnership {
        writeln!(
            out,
            "Highest partnership: {} off {} ({}, {} wicket)",
            p.runs,
            p.balls,
            p.batters.join(" & "),
            ordinal(p.wicket)
        )?;
    }
    Ok(())
}

/// Both innings followed by the match state line.
pub fn scorecard(snapshot: &MatchSnapshot) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let [one, two] = &snapshot.teams;
    writeln!(out, "{} v {} ({} overs)", one.name, two.name, snapshot.total_overs)?;

    for card in snapshot.scorecards() {
        writeln!(out)?;
        write_card(&mut out, &card)?;
    }

    writeln!(out)?;
    match (&snapshot.result, snapshot.phase) {
        (Some(result), _) => writeln!(out, "Result: {}", result)?,
        (None, InningsPhase::InningsOneComplete) => writeln!(
            out,
            "Innings break: target {}",
            snapshot.target.map_or(0, |t| t + 1)
        )?,
        (None, _) => writeln!(out, "In progress")?,
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
    }
}
