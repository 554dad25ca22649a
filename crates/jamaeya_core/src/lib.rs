//! Jamaeya client core: savings-group ledger, mock wallet and local storage.
//! `Jamaeya` wires one store into both; the library never touches global state.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod fixtures;
pub mod ids;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod summary;
pub mod wallet;

pub use config::{Config, Latency};
pub use error::{JamaeyaError, Result};
pub use ids::{Address, GroupId, InviteCode};
pub use ledger::GroupLedger;
pub use models::{Deposit, Group, GroupDraft, Interval, PayoutOrder, PayoutSlot, WalletState};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use summary::GroupSummary;
pub use wallet::WalletStore;

/// One user session: wallet plus ledger over a shared store.
pub struct Jamaeya {
    wallet: WalletStore,
    ledger: GroupLedger,
    demo_address: Address,
}

impl Jamaeya {
    pub fn new(store: Arc<dyn KeyValueStore>, config: &Config) -> Result<Self> {
        let demo_address = Address::parse(&config.demo_address)?;
        let invite_code = InviteCode::parse(&config.demo_invite_code)?;
        let wallet = WalletStore::load(store.clone(), config.latency)?;
        let ledger = GroupLedger::new(store, config.latency, demo_address.clone(), invite_code);
        Ok(Self {
            wallet,
            ledger,
            demo_address,
        })
    }

    /// Open an on-disk session at `config.storage_path`.
    pub fn open(config: &Config) -> Result<Self> {
        let store = SqliteStore::open(&config.storage_path)?;
        tracing::debug!(path = ?config.storage_path, "jamaeya: storage ready");
        Self::new(Arc::new(store), config)
    }

    pub fn wallet(&self) -> &WalletStore {
        &self.wallet
    }

    pub fn ledger(&self) -> &GroupLedger {
        &self.ledger
    }

    /// Connected account, or the demo placeholder identity when disconnected.
    pub fn caller(&self) -> Address {
        self.wallet.account().unwrap_or_else(|| self.demo_address.clone())
    }

    pub async fn deposit(&self, group_id: &GroupId) -> Result<Deposit> {
        let caller = self.caller();
        self.ledger.deposit_to_group(group_id, &caller).await
    }

    pub async fn create_group(&self, draft: GroupDraft) -> Result<Group> {
        let caller = self.caller();
        self.ledger.create_group(draft, &caller).await
    }

    pub async fn join(&self, code: &str) -> Result<GroupId> {
        let caller = self.caller();
        self.ledger.join_group(code, &caller).await
    }

    /// Groups matching `term` with their summaries for the current caller.
    pub async fn summaries(&self, term: &str) -> Result<Vec<(Group, GroupSummary)>> {
        let caller = self.caller();
        let groups = self.ledger.search_groups(term).await?;
        Ok(groups
            .into_iter()
            .map(|g| {
                let summary = GroupSummary::derive(&g, &caller);
                (g, summary)
            })
            .collect())
    }
}
