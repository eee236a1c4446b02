pub mod customer;
pub mod money;

pub use {customer::Customer, money::Money};

/// A bank account: the owning customer, an immutable number and the current balance.
///
/// Values of this type are snapshots of the persisted row. They are loaded fresh
/// for every operation and never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub customer: Customer,
    pub number: String,
    pub balance: Money,
}

impl Account {
    /// Opens an account with a zero balance.
    pub fn new(customer: Customer, number: String) -> Self {
        Account {
            customer,
            number,
            balance: Money::ZERO,
        }
    }

    pub fn with_balance(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }
}
