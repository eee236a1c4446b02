//! SQLite-backed account storage.

pub mod error;
pub mod interface;

use {
    crate::{
        models::{Account, Customer, Money},
        persistence::{error::PersistenceError, interface::PersistenceInterface},
    },
    rusqlite::{Connection, ErrorCode, OptionalExtension, Transaction, params},
    std::sync::{Mutex, MutexGuard},
    tracing::debug,
};

pub struct Persistence {
    conn: Mutex<Connection>,
}

impl Persistence {
    pub fn new(db_path: &str) -> Result<Self, PersistenceError> {
        Self::from_connection(Connection::open(db_path)?)
    }

    pub fn in_memory() -> Result<Self, PersistenceError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, PersistenceError> {
        let persistence = Persistence {
            conn: Mutex::new(conn),
        };
        persistence.init_db()?;
        Ok(persistence)
    }

    fn init_db(&self) -> Result<(), PersistenceError> {
        self.acquire_connection()?.execute_batch(
            "PRAGMA foreign_keys = ON;
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone_number TEXT NOT NULL,
                address TEXT NOT NULL,
                gender TEXT NOT NULL,
                date_of_birth TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                account_number TEXT NOT NULL UNIQUE,
                balance INTEGER NOT NULL CHECK (balance >= 0)
            );",
        )?;
        Ok(())
    }

    fn acquire_connection(&self) -> Result<MutexGuard<'_, Connection>, PersistenceError> {
        self.conn
            .lock()
            .map_err(|_| PersistenceError::FailedToAcquireConnectionLock)
    }

    fn update_balance(
        tx: &Transaction<'_>,
        number: &str,
        balance: Money,
    ) -> Result<(), PersistenceError> {
        let updated = tx.execute(
            "UPDATE accounts SET balance = ?1 WHERE account_number = ?2",
            params![balance.minor_units(), number],
        )?;

        if updated == 0 {
            return Err(PersistenceError::AccountNotFound(number.to_string()));
        }
        Ok(())
    }
}

fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl PersistenceInterface for Persistence {
    fn find_account(&self, number: &str) -> Result<Account, PersistenceError> {
        let conn = self.acquire_connection()?;

        let account = conn
            .query_row(
                "SELECT u.name, u.email, u.phone_number, u.address, u.gender, u.date_of_birth,
                        a.account_number, a.balance
                 FROM users u JOIN accounts a ON u.id = a.user_id
                 WHERE a.account_number = ?1",
                params![number],
                |row| {
                    Ok(Account {
                        customer: Customer {
                            name: row.get(0)?,
                            email: row.get(1)?,
                            phone: row.get(2)?,
                            address: row.get(3)?,
                            gender: row.get(4)?,
                            date_of_birth: row.get(5)?,
                        },
                        number: row.get(6)?,
                        balance: Money::from_minor_units(row.get(7)?),
                    })
                },
            )
            .optional()?;

        account.ok_or_else(|| PersistenceError::AccountNotFound(number.to_string()))
    }

    fn save_balance(&self, number: &str, balance: Money) -> Result<(), PersistenceError> {
        let mut conn = self.acquire_connection()?;
        let tx = conn.transaction()?;

        Self::update_balance(&tx, number, balance)?;

        tx.commit()?;
        debug!("Saved balance {} for account {}", balance, number);
        Ok(())
    }

    fn create_account(&self, account: &Account) -> Result<i64, PersistenceError> {
        let mut conn = self.acquire_connection()?;
        let tx = conn.transaction()?;

        let customer = &account.customer;
        tx.execute(
            "INSERT INTO users (name, email, phone_number, address, gender, date_of_birth)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                customer.name,
                customer.email,
                customer.phone,
                customer.address,
                customer.gender,
                customer.date_of_birth,
            ],
        )?;
        let user_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO accounts (user_id, account_number, balance) VALUES (?1, ?2, ?3)",
            params![user_id, account.number, account.balance.minor_units()],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                PersistenceError::DuplicateAccountNumber(account.number.clone())
            } else {
                PersistenceError::Database(e)
            }
        })?;
        let account_id = tx.last_insert_rowid();

        tx.commit()?;
        Ok(account_id)
    }

    /// Both balances are written in one transaction; nothing is stored if either update fails.
    fn save_transfer(&self, source: &Account, destination: &Account) -> Result<(), PersistenceError> {
        let mut conn = self.acquire_connection()?;
        let tx = conn.transaction()?;

        Self::update_balance(&tx, &source.number, source.balance)?;
        Self::update_balance(&tx, &destination.number, destination.balance)?;

        tx.commit()?;
        Ok(())
    }
}
