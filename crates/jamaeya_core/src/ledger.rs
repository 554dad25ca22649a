//! Group ledger: list, deposit, create, join. Every mutation persists the whole ledger.
//! Read-modify-write happens under one async lock so concurrent calls do not drop updates.

use crate::config::{simulate, Latency};
use crate::error::{JamaeyaError, Result};
use crate::fixtures::{demo_groups, YOU_LABEL};
use crate::ids::{Address, GroupId, InviteCode};
use crate::models::{Deposit, Group, GroupDraft, PayoutOrder, PayoutSlot, MAX_MEMBERS, MIN_MEMBERS};
use crate::storage::{self, KeyValueStore};
use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

const DEFAULT_GROUP_NAME: &str = "جمعية جديدة";

pub struct GroupLedger {
    store: Arc<dyn KeyValueStore>,
    latency: Latency,
    demo_member: Address,
    demo_invite_code: InviteCode,
    write_lock: Mutex<()>,
}

impl GroupLedger {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        latency: Latency,
        demo_member: Address,
        demo_invite_code: InviteCode,
    ) -> Self {
        Self {
            store,
            latency,
            demo_member,
            demo_invite_code,
            write_lock: Mutex::new(()),
        }
    }

    /// Persisted groups, seeding the demo fixture on first use. Caller must hold `write_lock`.
    fn load_or_seed(&self) -> Result<Vec<Group>> {
        if let Some(groups) = storage::load_groups(self.store.as_ref())? {
            return Ok(groups);
        }
        let groups = demo_groups(Utc::now(), &self.demo_member);
        storage::save_groups(self.store.as_ref(), &groups)?;
        tracing::info!(count = groups.len(), "ledger: seeded demo groups");
        Ok(groups)
    }

    /// Persisted groups, or the fixture that would be seeded, without writing anything.
    fn peek(&self) -> Result<Vec<Group>> {
        match storage::load_groups(self.store.as_ref())? {
            Some(groups) => Ok(groups),
            None => Ok(demo_groups(Utc::now(), &self.demo_member)),
        }
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        simulate(self.latency.fetch).await;
        let _guard = self.write_lock.lock().await;
        self.load_or_seed()
    }

    pub async fn get_group(&self, group_id: &GroupId) -> Result<Group> {
        let _guard = self.write_lock.lock().await;
        if !self.peek()?.iter().any(|g| &g.id == group_id) {
            return Err(JamaeyaError::NotFound(group_id.to_string()));
        }
        self.load_or_seed()?
            .into_iter()
            .find(|g| &g.id == group_id)
            .ok_or_else(|| JamaeyaError::NotFound(group_id.to_string()))
    }

    /// Dashboard filter on name or invite code, case-insensitive.
    pub async fn search_groups(&self, term: &str) -> Result<Vec<Group>> {
        let groups = self.list_groups().await?;
        Ok(filter_groups(groups, term))
    }

    /// Record the caller's contribution for the group's current round.
    /// Does not advance the round, pay out, or check balance / duplicate deposits.
    pub async fn deposit_to_group(&self, group_id: &GroupId, caller: &Address) -> Result<Deposit> {
        {
            let _guard = self.write_lock.lock().await;
            if !self.peek()?.iter().any(|g| &g.id == group_id) {
                tracing::warn!(group_id = %group_id, "ledger::deposit_to_group: unknown group");
                return Err(JamaeyaError::NotFound(group_id.to_string()));
            }
        }

        simulate(self.latency.deposit).await;

        let _guard = self.write_lock.lock().await;
        let mut groups = self.load_or_seed()?;
        let group = groups
            .iter_mut()
            .find(|g| &g.id == group_id)
            .ok_or_else(|| JamaeyaError::NotFound(group_id.to_string()))?;
        let deposit = Deposit {
            round: group.current_round,
            address: caller.clone(),
            amount: group.amount,
            timestamp: Utc::now(),
        };
        group.deposits.push(deposit.clone());
        storage::save_groups(self.store.as_ref(), &groups)?;
        tracing::info!(
            group_id = %group_id,
            round = deposit.round,
            amount = %deposit.amount,
            caller = %caller,
            "ledger::deposit_to_group"
        );
        Ok(deposit)
    }

    /// Validate the draft, build a group with a full payout schedule and persist it.
    pub async fn create_group(&self, draft: GroupDraft, creator: &Address) -> Result<Group> {
        validate_draft(&draft)?;
        simulate(self.latency.submit).await;

        let group = build_group(draft, creator, &mut rand::thread_rng());
        let _guard = self.write_lock.lock().await;
        let mut groups = self.load_or_seed()?;
        groups.push(group.clone());
        storage::save_groups(self.store.as_ref(), &groups)?;
        tracing::info!(
            group_id = %group.id,
            members = group.member_count,
            amount = %group.amount,
            order = %group.payout_order,
            "ledger::create_group"
        );
        Ok(group)
    }

    /// Resolve an invite code. Only the configured demo code is accepted; the ledger is not changed.
    pub async fn join_group(&self, code: &str, caller: &Address) -> Result<GroupId> {
        if code.trim().is_empty() {
            return Err(JamaeyaError::validation("invite code is required"));
        }
        simulate(self.latency.submit).await;

        if !self.demo_invite_code.matches(code) {
            tracing::warn!(code, caller = %caller, "ledger::join_group: invalid code");
            return Err(JamaeyaError::InvalidCode(code.to_string()));
        }
        let _guard = self.write_lock.lock().await;
        let id = self
            .peek()?
            .into_iter()
            .find(|g| g.invite_code == self.demo_invite_code)
            .map(|g| g.id)
            .ok_or_else(|| JamaeyaError::NotFound(self.demo_invite_code.to_string()))?;
        tracing::info!(group_id = %id, caller = %caller, "ledger::join_group");
        Ok(id)
    }
}

pub fn validate_draft(draft: &GroupDraft) -> Result<()> {
    if !(MIN_MEMBERS..=MAX_MEMBERS).contains(&draft.member_count) {
        return Err(JamaeyaError::validation(format!(
            "member count must be between {} and {}, got {}",
            MIN_MEMBERS, MAX_MEMBERS, draft.member_count
        )));
    }
    if draft.amount <= Decimal::ZERO {
        return Err(JamaeyaError::validation(format!(
            "amount must be greater than 0, got {}",
            draft.amount
        )));
    }
    Ok(())
}

/// Creator takes round 1 for fixed order, a random round otherwise; other seats stay open.
fn build_group<R: Rng>(draft: GroupDraft, creator: &Address, rng: &mut R) -> Group {
    let now = Utc::now();
    let total_rounds = draft.member_count;
    let pot = draft.amount * Decimal::from(draft.member_count);
    let creator_round = match draft.payout_order {
        PayoutOrder::Fixed => 1,
        PayoutOrder::Random => rng.gen_range(1..=total_rounds),
    };
    let payout_schedule = (1..=total_rounds)
        .map(|round| {
            let mine = round == creator_round;
            PayoutSlot {
                round,
                address: mine.then(|| creator.clone()),
                name: if mine { YOU_LABEL.to_string() } else { String::new() },
                paid: false,
                amount: pot,
                timestamp: None,
            }
        })
        .collect();
    let name = draft.name.trim();
    Group {
        id: GroupId::generate(),
        name: if name.is_empty() { DEFAULT_GROUP_NAME.to_string() } else { name.to_string() },
        member_count: draft.member_count,
        amount: draft.amount,
        interval: draft.interval,
        payout_order: draft.payout_order,
        invite_code: InviteCode::generate(),
        current_round: 1,
        total_rounds,
        next_payment_date: now + draft.interval.period(),
        deposits: Vec::new(),
        payout_schedule,
    }
}

pub fn filter_groups(groups: Vec<Group>, term: &str) -> Vec<Group> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return groups;
    }
    groups
        .into_iter()
        .filter(|g| {
            g.name.to_lowercase().contains(&needle)
                || g.invite_code.as_str().to_lowercase().contains(&needle)
        })
        .collect()
}
