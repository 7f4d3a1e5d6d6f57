use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::delivery::{Delivery, BALLS_PER_OVER};

/// Overs in `completed.balls` notation (e.g. 13 legal balls = `2.1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct OversCount {
    pub completed: u32,
    pub balls: u32,
}

impl OversCount {
    pub fn from_legal_balls(legal_balls: u32) -> Self {
        Self { completed: legal_balls / BALLS_PER_OVER, balls: legal_balls % BALLS_PER_OVER }
    }

    pub fn legal_balls(&self) -> u32 {
        self.completed * BALLS_PER_OVER + self.balls
    }

    /// Overs as a true fraction (2.1 overs = 2.1666..).
    pub fn as_fraction(&self) -> f64 {
        self.legal_balls() as f64 / BALLS_PER_OVER as f64
    }
}

impl fmt::Display for OversCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.completed, self.balls)
    }
}

/// One over of an innings: its zero-based number and every delivery in it,
/// wides and no-balls included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Over {
    pub number: u32,
    pub deliveries: Vec<Delivery>,
}

impl Over {
    pub fn legal_balls(&self) -> u32 {
        self.deliveries.iter().filter(|d| d.is_legal()).count() as u32
    }

    pub fn runs(&self) -> u32 {
        self.deliveries.iter().map(Delivery::total_runs).sum()
    }

    pub fn wickets(&self) -> u32 {
        self.deliveries.iter().filter(|d| d.is_wicket()).count() as u32
    }

    /// Bowler of the last legal ball, i.e. who finished the over.
    pub fn bowler(&self) -> Option<&str> {
        self.deliveries.iter().rev().find(|d| d.is_legal()).map(|d| d.bowler.as_str())
    }
}

/// Ledger grouped into overs for display and over-boundary detection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct OverIndex {
    overs: Vec<Over>,
}

impl OverIndex {
    /// File a delivery given the legal-ball count before it. An over opens
    /// exactly when that count reaches a new multiple of six.
    pub fn record(&mut self, delivery: Delivery, legal_balls_before: u32) {
        let number = legal_balls_before / BALLS_PER_OVER;
        match self.overs.last_mut() {
            Some(over) if over.number == number => over.deliveries.push(delivery),
            _ => self.overs.push(Over { number, deliveries: vec![delivery] }),
        }
    }

    /// Remove the most recent delivery, dropping its over once empty.
    pub fn pop(&mut self) -> Option<Delivery> {
        let over = self.overs.last_mut()?;
        let delivery = over.deliveries.pop();
        if over.deliveries.is_empty() {
            self.overs.pop();
        }
        delivery
    }

    pub fn overs(&self) -> &[Over] {
        &self.overs
    }

    pub fn last(&self) -> Option<&Over> {
        self.overs.last()
    }

    pub fn len(&self) -> usize {
        self.overs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overs.is_empty()
    }
}
