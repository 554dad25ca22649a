//! Per-group values derived for a given caller. Pure; recompute on every query.

use crate::ids::Address;
use crate::models::{Group, PayoutSlot};
use rust_decimal::Decimal;

#[derive(Clone, Debug, PartialEq)]
pub struct GroupSummary {
    pub progress_percentage: f64,
    pub has_received_payout: bool,
    pub needs_deposit: bool,
    pub next_recipient: Option<PayoutSlot>,
    pub is_next_recipient: bool,
    pub total_pot: Decimal,
}

impl GroupSummary {
    pub fn derive(group: &Group, caller: &Address) -> Self {
        let progress_percentage = if group.total_rounds == 0 {
            0.0
        } else {
            f64::from(group.current_round) / f64::from(group.total_rounds) * 100.0
        };
        let has_received_payout = group
            .payout_schedule
            .iter()
            .any(|s| s.paid && s.is_for(caller));
        let needs_deposit = !group.has_deposit(group.current_round, caller);
        let next_recipient = group.slot_for_round(group.current_round).cloned();
        let is_next_recipient = next_recipient.as_ref().is_some_and(|s| s.is_for(caller));
        Self {
            progress_percentage,
            has_received_payout,
            needs_deposit,
            next_recipient,
            is_next_recipient,
            total_pot: group.total_pot(),
        }
    }
}
