//! Strike rotation.
//!
//! | Delivery                          | Ends swap when                                   |
//! |-----------------------------------|--------------------------------------------------|
//! | any wicket                        | never (the new batter takes the vacated end)     |
//! | wide, bye, leg-bye                | runs are odd                                     |
//! | ordinary or no-ball               | odd runs mid-over, even runs on the over's last  |
//!
//! The last-ball inversion folds in the change of ends between overs. A
//! no-ball is never the over's last legal ball, so it always takes the
//! mid-over rule.

use crate::models::{Delivery, ExtraKind};

/// Whether the striker and non-striker swap after `delivery`.
pub fn should_swap(delivery: &Delivery, completes_over: bool) -> bool {
    if delivery.is_wicket() {
        return false;
    }
    let odd = delivery.runs % 2 == 1;
    match delivery.extra {
        ExtraKind::Wide | ExtraKind::Bye | ExtraKind::LegBye => odd,
        ExtraKind::None | ExtraKind::NoBall => {
            if completes_over {
                !odd
            } else {
                odd
            }
        }
    }
}
