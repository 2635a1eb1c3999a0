use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

use crate::{Account, Error};

/// Owns every account balance. All access goes through a single
/// reader/writer lock over the whole map: transfers take it exclusively,
/// reads share it.
#[derive(Debug, Default)]
pub struct LedgerStore {
    accounts: RwLock<HashMap<String, Decimal>>,
}

impl LedgerStore {
    /// Builds the store from initial balances. Accounts cannot be added later.
    /// A repeated name replaces the earlier entry.
    pub fn new(initial: impl IntoIterator<Item = Account>) -> Self {
        let accounts = initial
            .into_iter()
            .map(|account| (account.name, account.balance))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    /// Moves `amount` from `from` to `to`, returning both new balances.
    ///
    /// Checks run in a fixed order and the first failure wins: sender exists,
    /// receiver exists, distinct accounts, positive amount, sufficient funds.
    /// Both balances are computed before either is written, so a failure
    /// leaves the ledger untouched.
    pub fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<(Decimal, Decimal), Error> {
        let mut accounts = self.accounts.write();

        let from_balance = *accounts
            .get(from)
            .ok_or_else(|| Error::account_not_found(from))?;
        let to_balance = *accounts
            .get(to)
            .ok_or_else(|| Error::account_not_found(to))?;
        if from == to {
            return Err(Error::SelfTransfer);
        }
        if amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount);
        }
        if from_balance < amount {
            return Err(Error::InsufficientFunds);
        }

        let new_from = from_balance - amount;
        let new_to = to_balance
            .checked_add(amount)
            .ok_or(Error::BalanceOverflow)?;

        // Both keys were found above under the same guard.
        if let Some(balance) = accounts.get_mut(from) {
            *balance = new_from;
        }
        if let Some(balance) = accounts.get_mut(to) {
            *balance = new_to;
        }
        drop(accounts);

        info!(from, to, %amount, "transfer successful");
        Ok((new_from, new_to))
    }

    /// Point-in-time copy of every account, ordered by name.
    pub fn get_all_accounts(&self) -> BTreeMap<String, Account> {
        self.accounts
            .read()
            .iter()
            .map(|(name, balance)| (name.clone(), Account::new(name.clone(), *balance)))
            .collect()
    }

    /// Point-in-time copy of a single account.
    pub fn get_account(&self, name: &str) -> Option<Account> {
        self.accounts
            .read()
            .get(name)
            .map(|balance| Account::new(name, *balance))
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}
