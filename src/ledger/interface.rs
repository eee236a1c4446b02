use crate::{
    ledger::error::LedgerError,
    models::{Account, Money},
};

pub trait LedgerInterface {
    /// Credits `amount` to the account.
    fn deposit(&self, account: &mut Account, amount: Money) -> Result<(), LedgerError>;

    /// Debits `amount` from the account, never below zero.
    fn withdraw(&self, account: &mut Account, amount: Money) -> Result<(), LedgerError>;

    /// Moves `amount` from `source` to `destination`. Either both balances
    /// change or neither does.
    fn transfer(
        &self,
        source: &mut Account,
        destination: &mut Account,
        amount: Money,
    ) -> Result<(), LedgerError>;
}
