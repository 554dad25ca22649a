//! Demo groups seeded on first load when nothing is persisted yet.

use crate::ids::{Address, GroupId, InviteCode};
use crate::models::{Deposit, Group, Interval, PayoutOrder, PayoutSlot};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

/// Placeholder identity used for "you" when no wallet is connected.
pub const DEMO_MEMBER_ADDRESS: &str = "user_address";
pub const DEMO_INVITE_CODE: &str = "demo123";

/// Schedule label for the caller's own seat.
pub const YOU_LABEL: &str = "أنت";

fn address(s: &str) -> Address {
    Address::parse(s).expect("fixture address literal is non-empty")
}

fn slot(round: u32, who: Address, name: &str, amount: Decimal) -> PayoutSlot {
    PayoutSlot {
        round,
        address: Some(who),
        name: name.to_string(),
        paid: false,
        amount,
        timestamp: None,
    }
}

fn fixed_id(id: &str) -> (GroupId, InviteCode) {
    (
        GroupId::parse(id).expect("fixture group id literal is non-empty"),
        InviteCode::parse(id).expect("fixture invite code literal is non-empty"),
    )
}

/// Two circles: a 5-round fixed-order one where `you` collect in round 2,
/// and a 4-round random-order one where `you` collect last.
pub fn demo_groups(now: DateTime<Utc>, you: &Address) -> Vec<Group> {
    let month_ago = now - Duration::days(30);

    let (friends_id, friends_code) = fixed_id(DEMO_INVITE_CODE);
    let friends_amount = Decimal::from(10);
    let friends_pot = Decimal::from(50);
    let mut first = slot(1, address("member1"), "أحمد", friends_pot);
    first.paid = true;
    first.timestamp = Some(month_ago);
    let friends = Group {
        id: friends_id,
        name: "جمعية الأصدقاء".to_string(),
        member_count: 5,
        amount: friends_amount,
        interval: Interval::Monthly,
        payout_order: PayoutOrder::Fixed,
        invite_code: friends_code,
        current_round: 2,
        total_rounds: 5,
        next_payment_date: now + Duration::days(7),
        deposits: vec![Deposit {
            round: 1,
            address: you.clone(),
            amount: friends_amount,
            timestamp: month_ago,
        }],
        payout_schedule: vec![
            first,
            slot(2, you.clone(), YOU_LABEL, friends_pot),
            slot(3, address("member3"), "سارة", friends_pot),
            slot(4, address("member4"), "محمد", friends_pot),
            slot(5, address("member5"), "فاطمة", friends_pot),
        ],
    };

    let (family_id, family_code) = fixed_id("family456");
    let family_pot = Decimal::from(100);
    let family = Group {
        id: family_id,
        name: "جمعية العائلة".to_string(),
        member_count: 4,
        amount: Decimal::from(25),
        interval: Interval::Monthly,
        payout_order: PayoutOrder::Random,
        invite_code: family_code,
        current_round: 1,
        total_rounds: 4,
        next_payment_date: now + Duration::days(14),
        deposits: Vec::new(),
        payout_schedule: vec![
            slot(1, address("member1"), "خالد", family_pot),
            slot(2, address("member2"), "نورة", family_pot),
            slot(3, address("member3"), "عبدالله", family_pot),
            slot(4, you.clone(), YOU_LABEL, family_pot),
        ],
    };

    vec![friends, family]
}
