use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{Delivery, Innings};

/// Runs and legal balls added by one batting pair between wickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Partnership {
    /// The wicket this partnership is for (1 = opening stand).
    pub wicket: u32,
    pub runs: u32,
    pub balls: u32,
    /// The pair as named on the partnership's last ball; empty before it.
    pub batters: Vec<String>,
}

impl Partnership {
    fn from_segment(wicket: u32, deliveries: &[Delivery]) -> Self {
        let batters = deliveries
            .last()
            .map(|d| vec![d.striker.clone(), d.non_striker.clone()])
            .unwrap_or_default();
        Self {
            wicket,
            runs: deliveries.iter().map(Delivery::total_runs).sum(),
            balls: deliveries.iter().filter(|d| d.is_legal()).count() as u32,
            batters,
        }
    }
}

/// The stand in progress: everything after the last wicket.
pub fn current_partnership(innings: &Innings) -> Partnership {
    let deliveries = innings.ledger.deliveries();
    let start = deliveries.iter().rposition(Delivery::is_wicket).map_or(0, |i| i + 1);
    Partnership::from_segment(innings.wickets() + 1, &deliveries[start..])
}

/// Every partnership of the innings in order, the wicket ball closing each.
pub fn partnerships(innings: &Innings) -> Vec<Partnership> {
    innings
        .ledger
        .deliveries()
        .split_inclusive(Delivery::is_wicket)
        .enumerate()
        .map(|(i, segment)| Partnership::from_segment(i as u32 + 1, segment))
        .collect()
}

/// Highest stand of the innings; the earlier one wins a tie.
pub fn highest_partnership(innings: &Innings) -> Option<Partnership> {
    partnerships(innings).into_iter().reduce(|best, p| if p.runs > best.runs { p } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dismissal, ExtraKind, TeamSide};

    fn ball(runs: u32, striker: &str, non_striker: &str, out: bool) -> Delivery {
        Delivery {
            runs,
            extra: ExtraKind::None,
            striker: striker.into(),
            non_striker: non_striker.into(),
            bowler: "Zane".into(),
            dismissal: out.then_some(Dismissal::Bowled),
        }
    }

    #[test]
    fn test_empty_innings() {
        let innings = Innings::first(TeamSide::One, 20);
        let current = current_partnership(&innings);
        assert_eq!(current, Partnership { wicket: 1, ..Default::default() });
        assert_eq!(highest_partnership(&innings), None);
    }

    #[test]
    fn test_partnerships_split_at_wickets() {
        let mut innings = Innings::first(TeamSide::One, 20);
        innings.record(ball(4, "Asha", "Bilal", false));
        innings.record(ball(1, "Asha", "Bilal", false));
        innings.record(ball(0, "Bilal", "Asha", true));
        innings.record(ball(6, "Chen", "Asha", false));
        innings.record(Delivery { extra: ExtraKind::Wide, ..ball(0, "Chen", "Asha", false) });

        let all = partnerships(&innings);
        assert_eq!(all.len(), 2);
        assert_eq!((all[0].runs, all[0].balls), (5, 3));

        let current = current_partnership(&innings);
        assert_eq!(current.wicket, 2);
        assert_eq!((current.runs, current.balls), (7, 1));
        assert_eq!(current.batters, vec!["Chen".to_string(), "Asha".to_string()]);

        let best = highest_partnership(&innings).unwrap();
        assert_eq!(best.wicket, 2);
    }

    #[test]
    fn test_current_resets_on_wicket_ball() {
        let mut innings = Innings::first(TeamSide::One, 20);
        innings.record(ball(3, "Asha", "Bilal", false));
        innings.record(ball(1, "Asha", "Bilal", true));
        let current = current_partnership(&innings);
        assert_eq!((current.runs, current.balls), (0, 0));
        assert!(current.batters.is_empty());
        assert_eq!(highest_partnership(&innings).map(|p| p.runs), Some(4));
    }
}
