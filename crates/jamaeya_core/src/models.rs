//! Data models for savings groups, deposits, payout schedule and the mock wallet.
//! Wire format is camelCase JSON; ids use the typed wrappers from ids.rs.

use crate::ids::{Address, GroupId, InviteCode};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const MIN_MEMBERS: u32 = 2;
pub const MAX_MEMBERS: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Weekly,
    #[default]
    Monthly,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weekly" => Some(Interval::Weekly),
            "monthly" => Some(Interval::Monthly),
            _ => None,
        }
    }

    /// Time between two payment dates.
    pub fn period(&self) -> Duration {
        match self {
            Interval::Weekly => Duration::days(7),
            Interval::Monthly => Duration::days(30),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayoutOrder {
    #[default]
    Fixed,
    Random,
}

impl PayoutOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutOrder::Fixed => "fixed",
            PayoutOrder::Random => "random",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed" => Some(PayoutOrder::Fixed),
            "random" => Some(PayoutOrder::Random),
            _ => None,
        }
    }
}

impl std::fmt::Display for PayoutOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One contribution. Append-only within a group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub round: u32,
    pub address: Address,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// One payout schedule entry. `address` is None while the seat is unassigned;
/// `timestamp` is set once the payout is made.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutSlot {
    pub round: u32,
    pub address: Option<Address>,
    pub name: String,
    pub paid: bool,
    pub amount: Decimal,
    pub timestamp: Option<DateTime<Utc>>,
}

impl PayoutSlot {
    pub fn is_for(&self, who: &Address) -> bool {
        self.address.as_ref() == Some(who)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub member_count: u32,
    pub amount: Decimal,
    pub interval: Interval,
    pub payout_order: PayoutOrder,
    pub invite_code: InviteCode,
    pub current_round: u32,
    pub total_rounds: u32,
    pub next_payment_date: DateTime<Utc>,
    pub deposits: Vec<Deposit>,
    pub payout_schedule: Vec<PayoutSlot>,
}

impl Group {
    /// Pooled sum paid out each round: one contribution from every member.
    pub fn total_pot(&self) -> Decimal {
        self.amount * Decimal::from(self.member_count)
    }

    pub fn slot_for_round(&self, round: u32) -> Option<&PayoutSlot> {
        self.payout_schedule.iter().find(|s| s.round == round)
    }

    pub fn has_deposit(&self, round: u32, who: &Address) -> bool {
        self.deposits.iter().any(|d| d.round == round && &d.address == who)
    }
}

/// Parameters collected by the create flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDraft {
    pub name: String,
    pub member_count: u32,
    pub amount: Decimal,
    pub interval: Interval,
    pub payout_order: PayoutOrder,
}

impl Default for GroupDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            member_count: 5,
            amount: Decimal::from(10),
            interval: Interval::Monthly,
            payout_order: PayoutOrder::Fixed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
    pub is_connected: bool,
    pub account: String,
    pub balance: Decimal,
}
