//! Mock wallet: random account and balance on connect, restored from storage on load.

use crate::config::{simulate, Latency};
use crate::error::{JamaeyaError, Result};
use crate::ids::Address;
use crate::models::WalletState;
use crate::storage::{KeyValueStore, WALLET_ACCOUNT_KEY, WALLET_BALANCE_KEY, WALLET_CONNECTED_KEY};
use rand::Rng;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

pub const MIN_BALANCE: i64 = 50;
pub const MAX_BALANCE: i64 = 500;
/// Balance assumed when a connected wallet was persisted without one.
pub const RESTORED_BALANCE: i64 = 100;

pub struct WalletStore {
    store: Arc<dyn KeyValueStore>,
    latency: Latency,
    state: Mutex<WalletState>,
}

impl WalletStore {
    /// Restore the persisted wallet, or start disconnected.
    pub fn load(store: Arc<dyn KeyValueStore>, latency: Latency) -> Result<Self> {
        let state = restore(store.as_ref())?;
        tracing::debug!(connected = state.is_connected, "wallet::load");
        Ok(Self {
            store,
            latency,
            state: Mutex::new(state),
        })
    }

    pub fn state(&self) -> WalletState {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Connected account as an address, if any.
    pub fn account(&self) -> Option<Address> {
        let state = self.state();
        if !state.is_connected {
            return None;
        }
        Address::parse(&state.account).ok()
    }

    pub async fn connect(&self) -> Result<WalletState> {
        simulate(self.latency.connect).await;

        let account = Address::random();
        let balance = Decimal::from(rand::thread_rng().gen_range(MIN_BALANCE..MAX_BALANCE));
        let next = WalletState {
            is_connected: true,
            account: account.to_string(),
            balance,
        };
        if let Err(e) = persist(self.store.as_ref(), &next) {
            // Leave no partial record behind; the in-memory state stays as it was.
            if let Err(cleanup) = clear(self.store.as_ref()) {
                tracing::warn!(error = %cleanup, "wallet::connect: rollback failed");
            }
            tracing::warn!(error = %e, "wallet::connect: persist failed");
            return Err(e);
        }
        *self.state.lock().map_err(|_| JamaeyaError::LockPoisoned)? = next.clone();
        tracing::info!(account = %account, balance = %balance, "wallet::connect");
        Ok(next)
    }

    pub fn disconnect(&self) -> Result<()> {
        *self.state.lock().map_err(|_| JamaeyaError::LockPoisoned)? = WalletState::default();
        clear(self.store.as_ref())?;
        tracing::info!("wallet::disconnect");
        Ok(())
    }
}

fn persist(store: &dyn KeyValueStore, state: &WalletState) -> Result<()> {
    store.set(WALLET_CONNECTED_KEY, "true")?;
    store.set(WALLET_ACCOUNT_KEY, &state.account)?;
    store.set(WALLET_BALANCE_KEY, &state.balance.to_string())
}

/// Remove all three wallet keys, attempting each even if an earlier one fails.
fn clear(store: &dyn KeyValueStore) -> Result<()> {
    let results = [
        store.remove(WALLET_CONNECTED_KEY),
        store.remove(WALLET_ACCOUNT_KEY),
        store.remove(WALLET_BALANCE_KEY),
    ];
    results.into_iter().collect()
}

fn restore(store: &dyn KeyValueStore) -> Result<WalletState> {
    if store.get(WALLET_CONNECTED_KEY)?.as_deref() != Some("true") {
        return Ok(WalletState::default());
    }
    let account = match store.get(WALLET_ACCOUNT_KEY)? {
        Some(a) if !a.trim().is_empty() => a,
        _ => return Ok(WalletState::default()),
    };
    let balance = store
        .get(WALLET_BALANCE_KEY)?
        .and_then(|b| Decimal::from_str(b.trim()).ok())
        .unwrap_or_else(|| Decimal::from(RESTORED_BALANCE));
    Ok(WalletState {
        is_connected: true,
        account,
        balance,
    })
}
