use {
    crate::{
        ledger::error::LedgerError, models::Money, persistence::error::PersistenceError,
        provisioning::ProvisioningError,
    },
    thiserror::Error,
};

/// Every way a bank operation can fail. Validation variants are raised before
/// any state changes; `Persistence` and `PartialTransferFailure` mean the
/// operation was computed but not (fully) recorded.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("the amount should be greater than zero, got {0}")]
    InvalidAmount(Money),
    #[error("insufficient funds: balance is {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },
    #[error("cannot transfer from an account to itself")]
    SameAccount,
    #[error("the resulting balance would overflow")]
    BalanceOverflow,
    #[error("account {0} not found")]
    AccountNotFound(String),
    #[error("persistence error: {0}")]
    Persistence(PersistenceError),
    #[error(
        "transfer partially recorded: {persisted} was updated but {failed} was not ({reason}); reconciliation required"
    )]
    PartialTransferFailure {
        persisted: String,
        failed: String,
        reason: String,
    },
    #[error("no free account number after {0} attempts")]
    AccountNumberExhausted(u32),
    #[error("failed to acquire lock for account {0}")]
    FailedToAcquireAccountLock(String),
}

impl BankError {
    /// Stable machine-readable code for each variant.
    pub fn code(&self) -> &'static str {
        match self {
            BankError::InvalidInput(_) => "invalid_input",
            BankError::InvalidAmount(_) => "invalid_amount",
            BankError::InsufficientFunds { .. } => "insufficient_funds",
            BankError::SameAccount => "same_account",
            BankError::BalanceOverflow => "balance_overflow",
            BankError::AccountNotFound(_) => "account_not_found",
            BankError::Persistence(_) => "persistence_error",
            BankError::PartialTransferFailure { .. } => "partial_transfer_failure",
            BankError::AccountNumberExhausted(_) => "account_number_exhausted",
            BankError::FailedToAcquireAccountLock(_) => "lock_failure",
        }
    }

    /// True when the request was rejected before anything was mutated.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            BankError::InvalidInput(_)
                | BankError::InvalidAmount(_)
                | BankError::InsufficientFunds { .. }
                | BankError::SameAccount
                | BankError::BalanceOverflow
                | BankError::AccountNotFound(_)
        )
    }
}

impl From<LedgerError> for BankError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InvalidAmount(amount) => BankError::InvalidAmount(amount),
            LedgerError::InsufficientFunds { balance, requested } => {
                BankError::InsufficientFunds { balance, requested }
            }
            LedgerError::SameAccount => BankError::SameAccount,
            LedgerError::BalanceOverflow => BankError::BalanceOverflow,
        }
    }
}

impl From<PersistenceError> for BankError {
    fn from(e: PersistenceError) -> Self {
        match e {
            PersistenceError::AccountNotFound(number) => BankError::AccountNotFound(number),
            PersistenceError::PartialWrite {
                persisted,
                failed,
                source,
            } => BankError::PartialTransferFailure {
                persisted,
                failed,
                reason: source.to_string(),
            },
            other => BankError::Persistence(other),
        }
    }
}

impl From<ProvisioningError> for BankError {
    fn from(e: ProvisioningError) -> Self {
        match e {
            ProvisioningError::Exhausted(attempts) => BankError::AccountNumberExhausted(attempts),
            ProvisioningError::Persistence(inner) => inner.into(),
            other => BankError::InvalidInput(other.to_string()),
        }
    }
}
