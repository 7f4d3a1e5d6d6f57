//! Proptest strategies for scoring inputs.

use proptest::prelude::*;

use super::delivery::{DeliveryInput, Dismissal, End};

/// Any wicket-free delivery, weighted toward ordinary balls.
pub fn arb_delivery_input() -> impl Strategy<Value = DeliveryInput> {
    prop_oneof![
        6 => (0u32..=6).prop_map(DeliveryInput::runs),
        1 => (0u32..=4).prop_map(DeliveryInput::wide),
        1 => (0u32..=6).prop_map(DeliveryInput::no_ball),
        1 => (0u32..=4).prop_map(DeliveryInput::bye),
        1 => (0u32..=4).prop_map(DeliveryInput::leg_bye),
    ]
}

pub fn arb_end() -> impl Strategy<Value = End> {
    prop_oneof![Just(End::Striker), Just(End::NonStriker)]
}

pub fn arb_dismissal() -> impl Strategy<Value = Dismissal> {
    prop_oneof![
        Just(Dismissal::Bowled),
        Just(Dismissal::Caught),
        Just(Dismissal::Stumped),
        Just(Dismissal::Lbw),
        Just(Dismissal::HitWicket),
        arb_end().prop_map(|end| Dismissal::RunOut { end }),
    ]
}

/// A wicket delivery whose dismissal is possible on an ordinary ball.
pub fn arb_wicket_input() -> impl Strategy<Value = DeliveryInput> {
    (arb_dismissal(), 0u32..=2).prop_map(|(dismissal, runs)| match dismissal {
        Dismissal::RunOut { end } => DeliveryInput::run_out(end, runs),
        other => DeliveryInput::wicket(other),
    })
}
