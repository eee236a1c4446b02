//! Ledger engine: balance mutation rules for in-memory accounts.
//!
//! The engine never talks to storage. Callers load the accounts, hand them in,
//! and persist the result themselves.

pub mod error;
pub mod interface;

use crate::{
    ledger::{error::LedgerError, interface::LedgerInterface},
    models::{Account, Money},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Ledger;

impl Ledger {
    pub fn new() -> Self {
        Ledger
    }

    fn ensure_positive(amount: Money) -> Result<(), LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(())
    }

    fn debited(account: &Account, amount: Money) -> Result<Money, LedgerError> {
        if amount > account.balance {
            return Err(LedgerError::InsufficientFunds {
                balance: account.balance,
                requested: amount,
            });
        }
        // Cannot underflow: amount is positive and at most the balance.
        account
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::BalanceOverflow)
    }

    fn credited(account: &Account, amount: Money) -> Result<Money, LedgerError> {
        account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)
    }
}

impl LedgerInterface for Ledger {
    fn deposit(&self, account: &mut Account, amount: Money) -> Result<(), LedgerError> {
        Self::ensure_positive(amount)?;

        account.balance = Self::credited(account, amount)?;

        Ok(())
    }

    fn withdraw(&self, account: &mut Account, amount: Money) -> Result<(), LedgerError> {
        Self::ensure_positive(amount)?;

        account.balance = Self::debited(account, amount)?;

        Ok(())
    }

    fn transfer(
        &self,
        source: &mut Account,
        destination: &mut Account,
        amount: Money,
    ) -> Result<(), LedgerError> {
        Self::ensure_positive(amount)?;

        if source.number == destination.number {
            return Err(LedgerError::SameAccount);
        }

        let source_balance = Self::debited(source, amount)?;
        let destination_balance = Self::credited(destination, amount)?;

        source.balance = source_balance;
        destination.balance = destination_balance;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::models::Customer};

    fn account(number: &str, balance: i64) -> Account {
        Account::new(Customer::named("John"), number.to_string())
            .with_balance(Money::from_minor_units(balance))
    }

    #[test]
    fn test_deposit_adds_to_balance() {
        let ledger = Ledger::new();
        let mut acc = account("0011000001", 0);

        ledger.deposit(&mut acc, Money::from_minor_units(1_000)).unwrap();
        ledger.deposit(&mut acc, Money::from_minor_units(250)).unwrap();

        assert_eq!(acc.balance, Money::from_minor_units(1_250));
    }

    #[test]
    fn test_non_positive_amounts_are_rejected_without_mutation() {
        let ledger = Ledger::new();
        let mut source = account("0011000001", 500);
        let mut dest = account("0011000002", 500);

        for raw in [0, -1, -10_000] {
            let amount = Money::from_minor_units(raw);

            assert_eq!(
                ledger.deposit(&mut source, amount),
                Err(LedgerError::InvalidAmount(amount))
            );
            assert_eq!(
                ledger.withdraw(&mut source, amount),
                Err(LedgerError::InvalidAmount(amount))
            );
            assert_eq!(
                ledger.transfer(&mut source, &mut dest, amount),
                Err(LedgerError::InvalidAmount(amount))
            );
        }

        assert_eq!(source.balance, Money::from_minor_units(500));
        assert_eq!(dest.balance, Money::from_minor_units(500));
    }

    #[test]
    fn test_withdraw_up_to_balance() {
        let ledger = Ledger::new();
        let mut acc = account("0011000001", 1_000);

        ledger.withdraw(&mut acc, Money::from_minor_units(400)).unwrap();
        assert_eq!(acc.balance, Money::from_minor_units(600));

        ledger.withdraw(&mut acc, Money::from_minor_units(600)).unwrap();
        assert_eq!(acc.balance, Money::ZERO);
    }

    #[test]
    fn test_withdraw_more_than_balance_fails() {
        let ledger = Ledger::new();
        let mut acc = account("0011000001", 10_000);

        let result = ledger.withdraw(&mut acc, Money::from_minor_units(15_000));

        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert_eq!(acc.balance, Money::from_minor_units(10_000));
    }

    #[test]
    fn test_transfer_conserves_total() {
        let ledger = Ledger::new();
        let mut source = account("0011000001", 7_500);
        let mut dest = account("0011000002", 2_500);

        ledger
            .transfer(&mut source, &mut dest, Money::from_minor_units(5_000))
            .unwrap();

        assert_eq!(source.balance, Money::from_minor_units(2_500));
        assert_eq!(dest.balance, Money::from_minor_units(7_500));
        assert_eq!(
            source.balance.minor_units() + dest.balance.minor_units(),
            10_000
        );
    }

    #[test]
    fn test_transfer_to_same_account_is_rejected() {
        let ledger = Ledger::new();
        let mut source = account("0011000001", 1_000);
        let mut copy = source.clone();

        let result = ledger.transfer(&mut source, &mut copy, Money::from_minor_units(100));

        assert_eq!(result, Err(LedgerError::SameAccount));
        assert_eq!(source.balance, Money::from_minor_units(1_000));
    }

    #[test]
    fn test_transfer_with_insufficient_funds_leaves_both_untouched() {
        let ledger = Ledger::new();
        let mut source = account("0011000001", 100);
        let mut dest = account("0011000002", 0);

        let result = ledger.transfer(&mut source, &mut dest, Money::from_minor_units(101));

        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert_eq!(source.balance, Money::from_minor_units(100));
        assert_eq!(dest.balance, Money::ZERO);
    }

    #[test]
    fn test_transfer_overflowing_destination_debits_nothing() {
        let ledger = Ledger::new();
        let mut source = account("0011000001", 100);
        let mut dest = account("0011000002", i64::MAX);

        let result = ledger.transfer(&mut source, &mut dest, Money::from_minor_units(1));

        assert_eq!(result, Err(LedgerError::BalanceOverflow));
        assert_eq!(source.balance, Money::from_minor_units(100));
    }
}
