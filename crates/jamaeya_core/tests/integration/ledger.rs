//! Group ledger: list/seed, deposit, create, join.

use crate::common::{memory_store, session_over};
use jamaeya_core::storage::{load_groups, GROUPS_KEY};
use jamaeya_core::{
    Address, Config, GroupDraft, GroupId, Interval, Jamaeya, JamaeyaError, KeyValueStore,
    PayoutOrder,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::Arc;

fn draft(members: u32, amount: Decimal) -> GroupDraft {
    GroupDraft {
        name: "Neighbours".to_string(),
        member_count: members,
        amount,
        interval: Interval::Weekly,
        payout_order: PayoutOrder::Random,
    }
}

#[tokio::test]
async fn first_list_seeds_and_persists_demo_fixture() {
    let store = memory_store();
    assert!(store.get(GROUPS_KEY).unwrap().is_none());
    let app = session_over(store.clone());

    let groups = app.ledger().list_groups().await.expect("list");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].id.as_str(), "demo123");
    assert_eq!(groups[1].id.as_str(), "family456");
    assert_eq!(load_groups(&*store).unwrap(), Some(groups.clone()));

    // Second listing reads the persisted copy instead of regenerating.
    let again = app.ledger().list_groups().await.expect("list");
    assert_eq!(again, groups);
}

#[tokio::test]
async fn deposit_appends_one_record_for_current_round() {
    let store = memory_store();
    let app = session_over(store.clone());
    let before = app.ledger().list_groups().await.unwrap();
    let id = GroupId::parse("demo123").unwrap();

    let deposit = app.deposit(&id).await.expect("deposit");

    let after = app.ledger().get_group(&id).await.expect("group");
    let old = &before[0];
    assert_eq!(after.deposits.len(), old.deposits.len() + 1);
    assert_eq!(after.deposits.last(), Some(&deposit));
    assert_eq!(deposit.round, old.current_round);
    assert_eq!(deposit.amount, old.amount);
    assert_eq!(deposit.address, app.caller());
    // Round and payouts are untouched.
    assert_eq!(after.current_round, old.current_round);
    assert_eq!(after.payout_schedule, old.payout_schedule);
    // Persisted state round-trips to the same value.
    let persisted = load_groups(&*store).unwrap().unwrap();
    assert_eq!(persisted[0], after);
    assert_eq!(persisted[1], before[1]);
}

#[tokio::test]
async fn deposit_to_unknown_group_is_not_found_and_leaves_ledger_unchanged() {
    let store = memory_store();
    let app = session_over(store.clone());
    app.ledger().list_groups().await.unwrap();
    let snapshot = store.get(GROUPS_KEY).unwrap();

    let err = app
        .deposit(&GroupId::parse("no-such-group").unwrap())
        .await
        .expect_err("unknown id");
    assert!(matches!(err, JamaeyaError::NotFound(ref id) if id == "no-such-group"));
    assert!(err.is_user_error());
    assert_eq!(store.get(GROUPS_KEY).unwrap(), snapshot);
}

#[tokio::test]
async fn duplicate_deposits_are_not_rejected() {
    let app = session_over(memory_store());
    let id = GroupId::parse("family456").unwrap();
    app.deposit(&id).await.expect("first");
    app.deposit(&id).await.expect("second");
    let g = app.ledger().get_group(&id).await.unwrap();
    assert_eq!(g.deposits.len(), 2);
    assert!(g.deposits.iter().all(|d| d.round == 1));
}

#[tokio::test]
async fn concurrent_deposits_are_all_kept() {
    let store = memory_store();
    let app = Arc::new(session_over(store));
    let id = GroupId::parse("family456").unwrap();
    app.ledger().list_groups().await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            let who = Address::random();
            app.ledger().deposit_to_group(&id, &who).await
        }));
    }
    for h in handles {
        h.await.expect("join").expect("deposit");
    }
    let g = app.ledger().get_group(&id).await.unwrap();
    assert_eq!(g.deposits.len(), 8);
}

#[tokio::test]
async fn create_group_persists_full_schedule() {
    let app = session_over(memory_store());
    let created = app.create_group(draft(6, Decimal::new(125, 1))).await.expect("create");

    assert_eq!(created.total_rounds, 6);
    assert_eq!(created.current_round, 1);
    assert_eq!(created.total_pot(), Decimal::from(75));
    let rounds: BTreeSet<u32> = created.payout_schedule.iter().map(|s| s.round).collect();
    assert_eq!(rounds, (1..=6).collect::<BTreeSet<u32>>());
    assert_eq!(
        created.payout_schedule.iter().filter(|s| s.is_for(&app.caller())).count(),
        1
    );
    assert_ne!(created.invite_code.as_str(), "demo123");

    let groups = app.ledger().list_groups().await.unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[2], created);
}

#[tokio::test]
async fn create_group_rejects_out_of_range_input() {
    let store = memory_store();
    let app = session_over(store.clone());
    for bad in [draft(1, Decimal::from(10)), draft(21, Decimal::from(10)), draft(5, Decimal::ZERO)] {
        let err = app.create_group(bad).await.expect_err("invalid draft");
        assert!(matches!(err, JamaeyaError::Validation(_)));
    }
    // Validation happens before anything is touched.
    assert!(store.get(GROUPS_KEY).unwrap().is_none());
}

#[tokio::test]
async fn join_accepts_only_demo_code() {
    let app = session_over(memory_store());
    let id = app.join("demo123").await.expect("join");
    assert_eq!(id.as_str(), "demo123");
    assert_eq!(app.join("DEMO123").await.expect("join").as_str(), "demo123");

    for code in ["family456", "demo1234", "xyz", "  DEMO123 ", "demo123\n"] {
        let err = app.join(code).await.expect_err("invalid");
        assert!(matches!(err, JamaeyaError::InvalidCode(ref c) if c == code), "{code:?}");
    }
    assert!(matches!(app.join("   ").await, Err(JamaeyaError::Validation(_))));
}

#[tokio::test]
async fn join_does_not_mutate_ledger() {
    let store = memory_store();
    let app = session_over(store.clone());
    app.ledger().list_groups().await.unwrap();
    let snapshot = store.get(GROUPS_KEY).unwrap();
    app.join("demo123").await.unwrap();
    assert_eq!(store.get(GROUPS_KEY).unwrap(), snapshot);
}

#[tokio::test]
async fn not_found_deposit_on_fresh_store_writes_nothing() {
    let store = memory_store();
    let app = session_over(store.clone());

    let err = app
        .deposit(&GroupId::parse("no-such-group").unwrap())
        .await
        .expect_err("unknown id");
    assert!(matches!(err, JamaeyaError::NotFound(_)));
    assert!(store.get(GROUPS_KEY).unwrap().is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn join_on_fresh_store_writes_nothing() {
    let store = memory_store();
    let app = session_over(store.clone());

    assert_eq!(app.join("demo123").await.expect("join").as_str(), "demo123");
    assert!(app.join("xyz").await.is_err());
    assert!(store.get(GROUPS_KEY).unwrap().is_none());

    // The id it returned is the one seeding later produces.
    let id = GroupId::parse("demo123").unwrap();
    assert_eq!(app.ledger().get_group(&id).await.expect("group").id, id);
}

#[tokio::test]
async fn join_with_code_of_no_stored_group_is_not_found() {
    let store = memory_store();
    let mut cfg = Config::instant("unused");
    cfg.demo_invite_code = "other".to_string();
    let app = Jamaeya::new(store.clone(), &cfg).expect("session");

    let err = app.join("OTHER").await.expect_err("no group carries the code");
    assert!(matches!(err, JamaeyaError::NotFound(ref c) if c == "other"));
    assert!(store.get(GROUPS_KEY).unwrap().is_none());
}
