//! Shared mock collaborators for the integration suites: a settable
//! price feed, a recording native-transfer primitive, a malicious
//! re-entrant variant, and an allowance-enforcing token contract.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use strongroom_ledger::{
    AccountId, LedgerConfig, LedgerError, NativeTransfer, PriceFeed, PriceFeedError, PriceQuote,
    TokenAddress, TokenCallError, TokenContract, TransferFailure, VaultLedger,
};

/// One whole native unit (18 decimals).
pub const ONE_NATIVE: u128 = 1_000_000_000_000_000_000;

/// One dollar in the 6-decimal unit of account.
pub const USD: u128 = 1_000_000;

// ---------------------------------------------------------------------------
// MockFeed
// ---------------------------------------------------------------------------

/// A price feed whose quote can be changed or withdrawn mid-test.
pub struct MockFeed {
    quote: Mutex<Option<PriceQuote>>,
}

impl MockFeed {
    pub fn new(price: i128, decimals: u8) -> Arc<Self> {
        Arc::new(Self {
            quote: Mutex::new(Some(PriceQuote { price, decimals })),
        })
    }

    pub fn set_price(&self, price: i128, decimals: u8) {
        *self.quote.lock().unwrap() = Some(PriceQuote { price, decimals });
    }

    pub fn set_unavailable(&self) {
        *self.quote.lock().unwrap() = None;
    }
}

impl PriceFeed for MockFeed {
    fn latest_price(&self) -> Result<PriceQuote, PriceFeedError> {
        self.quote
            .lock()
            .unwrap()
            .ok_or_else(|| PriceFeedError::new("feed offline"))
    }
}

// ---------------------------------------------------------------------------
// MockNative
// ---------------------------------------------------------------------------

/// Native transfer primitive that records sends and can be forced to
/// fail.
pub struct MockNative {
    pub fail: AtomicBool,
    pub sent: Mutex<Vec<(AccountId, u128)>>,
}

impl MockNative {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

impl NativeTransfer for MockNative {
    fn transfer(&self, dest: &AccountId, amount: u128) -> Result<(), TransferFailure> {
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(TransferFailure {
                dest: dest.clone(),
                amount,
            });
        }
        self.sent.lock().unwrap().push((dest.clone(), amount));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ReentrantNative
// ---------------------------------------------------------------------------

/// A native transfer primitive that calls back into the ledger from
/// inside the transfer-out, the way a malicious recipient contract
/// would. The nested attempt's outcome is stored for the test to
/// inspect.
pub struct ReentrantNative {
    ledger: Mutex<Weak<VaultLedger>>,
    pub reentry_result: Mutex<Option<Result<u128, LedgerError>>>,
}

impl ReentrantNative {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            ledger: Mutex::new(Weak::new()),
            reentry_result: Mutex::new(None),
        })
    }

    /// Points the attacker at its target; must be called once the
    /// ledger exists (the ledger owns the transfer primitive, so the
    /// reference has to arrive after construction).
    pub fn arm(&self, ledger: &Arc<VaultLedger>) {
        *self.ledger.lock().unwrap() = Arc::downgrade(ledger);
    }
}

impl NativeTransfer for ReentrantNative {
    fn transfer(&self, dest: &AccountId, amount: u128) -> Result<(), TransferFailure> {
        if let Some(ledger) = self.ledger.lock().unwrap().upgrade() {
            let attempt = ledger.withdraw_native(dest, amount);
            *self.reentry_result.lock().unwrap() = Some(attempt);
        }
        // The outer transfer itself succeeds.
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockToken
// ---------------------------------------------------------------------------

/// A fungible token with transferFrom allowance semantics. Custody
/// lives here, as it does on-chain: the vault's holding is just this
/// contract's balance entry for the vault account.
pub struct MockToken {
    address: TokenAddress,
    vault: AccountId,
    decimals: Option<u8>,
    balances: Mutex<HashMap<AccountId, u128>>,
    /// owner → amount approved for the vault to pull.
    allowances: Mutex<HashMap<AccountId, u128>>,
    pub fail_pulls: AtomicBool,
    pub fail_sends: AtomicBool,
}

impl MockToken {
    pub fn new(seed: u8, vault: &AccountId, decimals: Option<u8>) -> Arc<Self> {
        Arc::new(Self {
            address: TokenAddress::from_bytes([seed; 20]),
            vault: vault.clone(),
            decimals,
            balances: Mutex::new(HashMap::new()),
            allowances: Mutex::new(HashMap::new()),
            fail_pulls: AtomicBool::new(false),
            fail_sends: AtomicBool::new(false),
        })
    }

    pub fn mint(&self, owner: &AccountId, amount: u128) {
        *self.balances.lock().unwrap().entry(owner.clone()).or_insert(0) += amount;
    }

    pub fn approve(&self, owner: &AccountId, amount: u128) {
        self.allowances.lock().unwrap().insert(owner.clone(), amount);
    }

    fn err(&self, reason: &str) -> TokenCallError {
        TokenCallError::new(self.address, reason)
    }
}

impl TokenContract for MockToken {
    fn address(&self) -> TokenAddress {
        self.address
    }

    fn transfer_from(
        &self,
        owner: &AccountId,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<(), TokenCallError> {
        if self.fail_pulls.load(Ordering::SeqCst) {
            return Err(self.err("forced transferFrom failure"));
        }

        let mut allowances = self.allowances.lock().unwrap();
        let allowed = allowances.get(owner).copied().unwrap_or(0);
        if allowed < amount {
            return Err(self.err("insufficient allowance"));
        }

        let mut balances = self.balances.lock().unwrap();
        let held = balances.get(owner).copied().unwrap_or(0);
        if held < amount {
            return Err(self.err("insufficient balance"));
        }

        allowances.insert(owner.clone(), allowed - amount);
        balances.insert(owner.clone(), held - amount);
        *balances.entry(recipient.clone()).or_insert(0) += amount;
        Ok(())
    }

    fn transfer(&self, dest: &AccountId, amount: u128) -> Result<(), TokenCallError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(self.err("forced transfer failure"));
        }

        let mut balances = self.balances.lock().unwrap();
        let held = balances.get(&self.vault).copied().unwrap_or(0);
        if held < amount {
            return Err(self.err("insufficient vault balance"));
        }

        balances.insert(self.vault.clone(), held - amount);
        *balances.entry(dest.clone()).or_insert(0) += amount;
        Ok(())
    }

    fn balance_of(&self, owner: &AccountId) -> u128 {
        self.balances.lock().unwrap().get(owner).copied().unwrap_or(0)
    }

    fn decimals(&self) -> Option<u8> {
        self.decimals
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A ledger wired to a 2000.00000000-USD native feed (8-decimal report)
/// and a recording native transfer.
pub struct Harness {
    pub vault: Arc<VaultLedger>,
    pub feed: Arc<MockFeed>,
    pub native: Arc<MockNative>,
    pub deployer: AccountId,
    pub vault_account: AccountId,
}

pub fn harness(ceiling_usd: u128) -> Harness {
    let deployer = AccountId::new("deployer");
    let vault_account = AccountId::new("vault");
    let feed = MockFeed::new(200_000_000_000, 8);
    let native = MockNative::new();

    let vault = Arc::new(VaultLedger::new(LedgerConfig {
        deployer: deployer.clone(),
        vault_account: vault_account.clone(),
        native_price_feed: feed.clone(),
        native_transfer: native.clone(),
        initial_ceiling_usd: ceiling_usd,
    }));

    Harness {
        vault,
        feed,
        native,
        deployer,
        vault_account,
    }
}
