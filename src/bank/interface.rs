use crate::{
    bank::error::BankError,
    models::{Customer, Money},
    statement::StatementView,
};

pub trait BankInterface {
    /// Opens a zero-balance account under a freshly generated number.
    fn open_account(&self, customer: Customer) -> Result<StatementView, BankError>;

    fn deposit(&self, number: &str, amount: Money) -> Result<StatementView, BankError>;

    fn withdraw(&self, number: &str, amount: Money) -> Result<StatementView, BankError>;

    /// Moves funds between two accounts and returns the statement of the debited one.
    fn transfer(&self, from: &str, to: &str, amount: Money) -> Result<StatementView, BankError>;

    fn get_statement(&self, number: &str) -> Result<StatementView, BankError>;
}
