//! Caller-facing account operations.
//!
//! Each operation reloads the accounts it touches under their per-account
//! locks, lets the ledger validate and apply the change, and writes the result
//! back before releasing the locks.

pub mod error;
pub mod interface;
pub mod locks;

use {
    crate::{
        bank::{
            error::BankError,
            interface::BankInterface,
            locks::AccountLocks,
        },
        ledger::{Ledger, error::LedgerError, interface::LedgerInterface},
        metrics::{
            ACCOUNT_OPENING_TIME_SECONDS, DEPOSIT_TIME_SECONDS, OPERATIONS_FAILED_TOTAL,
            OPERATIONS_PROCESSED_TOTAL, STATEMENT_TIME_SECONDS, TRANSFER_TIME_SECONDS,
            WITHDRAW_TIME_SECONDS,
        },
        models::{Account, Customer, Money},
        persistence::interface::PersistenceInterface,
        provisioning::AccountProvisioner,
        statement::StatementView,
    },
    std::sync::Arc,
    tracing::{error, info, warn},
};

/// Checks that an account number is present and numeric.
pub fn validate_number(number: &str) -> Result<(), BankError> {
    if number.is_empty() {
        return Err(BankError::InvalidInput("account number is missing".to_string()));
    }
    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BankError::InvalidInput(format!(
            "invalid account number: {}",
            number
        )));
    }
    Ok(())
}

/// Parses a decimal amount such as `"100"` or `"12.50"`. Sign is kept; the
/// ledger decides whether the value is acceptable.
pub fn parse_amount(raw: &str) -> Result<Money, BankError> {
    raw.parse::<Money>()
        .map_err(|e| BankError::InvalidInput(format!("invalid amount {:?}: {}", raw, e)))
}

pub struct Bank {
    ledger: Ledger,
    persistence: Arc<dyn PersistenceInterface>,
    provisioner: AccountProvisioner,
    locks: AccountLocks,
}

impl Bank {
    pub fn new(persistence: Arc<dyn PersistenceInterface>, provisioner: AccountProvisioner) -> Self {
        Bank {
            ledger: Ledger::new(),
            persistence,
            provisioner,
            locks: AccountLocks::new(),
        }
    }

    /// Load, mutate and save one account while holding its lock.
    fn update_account<F>(&self, number: &str, mutate: F) -> Result<StatementView, BankError>
    where
        F: FnOnce(&Ledger, &mut Account) -> Result<(), LedgerError>,
    {
        validate_number(number)?;

        self.locks.with_locked(&[number], || {
            let mut account = self.persistence.find_account(number)?;
            mutate(&self.ledger, &mut account)?;
            self.persistence
                .save_balance(&account.number, account.balance)?;

            Ok(StatementView::from(&account))
        })
    }

    /// Both accounts stay locked until the two balances are stored together.
    fn move_funds(&self, from: &str, to: &str, amount: Money) -> Result<StatementView, BankError> {
        validate_number(from)?;
        validate_number(to)?;
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount(amount));
        }
        if from == to {
            return Err(BankError::SameAccount);
        }

        self.locks.with_locked(&[from, to], || {
            let mut source = self.persistence.find_account(from)?;
            let mut destination = self.persistence.find_account(to)?;

            self.ledger.transfer(&mut source, &mut destination, amount)?;
            self.persistence.save_transfer(&source, &destination)?;

            info!(
                "Transferred {} from {} to {}",
                amount, source.number, destination.number
            );
            Ok(StatementView::from(&source))
        })
    }

    fn track(
        operation: &str,
        result: Result<StatementView, BankError>,
    ) -> Result<StatementView, BankError> {
        match &result {
            Ok(view) => {
                OPERATIONS_PROCESSED_TOTAL
                    .with_label_values(&[operation])
                    .inc();
                info!("{} succeeded for account {}", operation, view.number);
            }
            Err(e) => {
                OPERATIONS_FAILED_TOTAL
                    .with_label_values(&[operation, e.code()])
                    .inc();
                if e.is_rejection() {
                    warn!("{} rejected: {}", operation, e);
                } else {
                    error!("{} failed: {}", operation, e);
                }
            }
        }
        result
    }
}

impl BankInterface for Bank {
    fn open_account(&self, customer: Customer) -> Result<StatementView, BankError> {
        let result = crate::measure!(ACCOUNT_OPENING_TIME_SECONDS, {
            if !customer.has_name() {
                Err(BankError::InvalidInput("customer name is missing".to_string()))
            } else {
                self.provisioner
                    .open(self.persistence.as_ref(), customer)
                    .map(|account| StatementView::from(&account))
                    .map_err(BankError::from)
            }
        });

        Self::track("open_account", result)
    }

    fn deposit(&self, number: &str, amount: Money) -> Result<StatementView, BankError> {
        let result = crate::measure!(DEPOSIT_TIME_SECONDS, {
            self.update_account(number, |ledger, account| ledger.deposit(account, amount))
        });

        Self::track("deposit", result)
    }

    fn withdraw(&self, number: &str, amount: Money) -> Result<StatementView, BankError> {
        let result = crate::measure!(WITHDRAW_TIME_SECONDS, {
            self.update_account(number, |ledger, account| ledger.withdraw(account, amount))
        });

        Self::track("withdraw", result)
    }

    fn transfer(&self, from: &str, to: &str, amount: Money) -> Result<StatementView, BankError> {
        let result = crate::measure!(TRANSFER_TIME_SECONDS, {
            self.move_funds(from, to, amount)
        });

        Self::track("transfer", result)
    }

    fn get_statement(&self, number: &str) -> Result<StatementView, BankError> {
        let result = crate::measure!(STATEMENT_TIME_SECONDS, {
            validate_number(number)
                .and_then(|_| self.persistence.find_account(number).map_err(BankError::from))
                .map(|account| StatementView::from(&account))
        });

        Self::track("statement", result)
    }
}
