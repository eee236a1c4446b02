use {crate::models::Money, thiserror::Error};

/// Reasons the ledger refuses a balance mutation. All of them are raised
/// before the account is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("the amount should be greater than zero, got {0}")]
    InvalidAmount(Money),
    #[error("insufficient funds: balance is {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },
    #[error("cannot transfer from an account to itself")]
    SameAccount,
    #[error("the resulting balance would overflow")]
    BalanceOverflow,
}
