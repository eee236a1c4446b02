use crate::{
    models::{Account, Money},
    persistence::error::PersistenceError,
};

/// Durable account storage, keyed by account number.
pub trait PersistenceInterface: Send + Sync {
    /// Loads the current persisted state of an account.
    fn find_account(&self, number: &str) -> Result<Account, PersistenceError>;

    /// Overwrites the balance of an existing account.
    fn save_balance(&self, number: &str, balance: Money) -> Result<(), PersistenceError>;

    /// Stores a new account with its customer and returns the assigned row id.
    /// Fails with `DuplicateAccountNumber` if the number is already in use.
    fn create_account(&self, account: &Account) -> Result<i64, PersistenceError>;

    /// Stores the balances of both transfer legs.
    ///
    /// The default writes them one after the other and reports a failed second
    /// write as `PartialWrite`. Stores that support transactions should
    /// override it with an all-or-nothing write.
    fn save_transfer(&self, source: &Account, destination: &Account) -> Result<(), PersistenceError> {
        self.save_balance(&source.number, source.balance)?;

        self.save_balance(&destination.number, destination.balance)
            .map_err(|e| PersistenceError::PartialWrite {
                persisted: source.number.clone(),
                failed: destination.number.clone(),
                source: Box::new(e),
            })
    }
}
