//! Account provisioning: number generation and first write of a new account.

use {
    crate::{
        config::ProvisioningConfig,
        metrics::ACCOUNT_NUMBER_COLLISIONS_TOTAL,
        models::{Account, Customer},
        persistence::{error::PersistenceError, interface::PersistenceInterface},
    },
    rand::Rng,
    thiserror::Error,
    tracing::{info, warn},
};

#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("account number prefix must be ASCII digits, got {0:?}")]
    InvalidPrefix(String),
    #[error("account number digit count must be between 1 and 18, got {0}")]
    InvalidDigitCount(u32),
    #[error("no free account number after {0} attempts")]
    Exhausted(u32),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Produces account numbers made of a fixed prefix and a random numeral of
/// exactly `digits` digits (for 7 digits: 1,000,000 to 9,999,999).
#[derive(Debug, Clone)]
pub struct AccountNumberGenerator {
    prefix: String,
    low: u64,
    high: u64,
}

impl AccountNumberGenerator {
    pub fn new(prefix: impl Into<String>, digits: u32) -> Result<Self, ProvisioningError> {
        let prefix = prefix.into();
        if !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProvisioningError::InvalidPrefix(prefix));
        }
        if !(1..=18).contains(&digits) {
            return Err(ProvisioningError::InvalidDigitCount(digits));
        }

        Ok(AccountNumberGenerator {
            prefix,
            low: 10_u64.pow(digits - 1),
            high: 10_u64.pow(digits) - 1,
        })
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        format!("{}{}", self.prefix, rng.random_range(self.low..=self.high))
    }

    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::rng())
    }
}

/// Opens accounts, drawing a new number whenever the store reports a collision.
pub struct AccountProvisioner {
    generator: AccountNumberGenerator,
    max_attempts: u32,
}

impl AccountProvisioner {
    pub fn new(generator: AccountNumberGenerator, max_attempts: u32) -> Self {
        AccountProvisioner {
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &ProvisioningConfig) -> Result<Self, ProvisioningError> {
        let generator = AccountNumberGenerator::new(config.prefix.clone(), config.digits)?;
        Ok(Self::new(generator, config.max_attempts))
    }

    pub fn open(
        &self,
        persistence: &dyn PersistenceInterface,
        customer: Customer,
    ) -> Result<Account, ProvisioningError> {
        let mut account = Account::new(customer, String::new());

        for attempt in 1..=self.max_attempts {
            account.number = self.generator.generate();

            match persistence.create_account(&account) {
                Ok(id) => {
                    info!("Opened account {} (id {})", account.number, id);
                    return Ok(account);
                }
                Err(PersistenceError::DuplicateAccountNumber(number)) => {
                    ACCOUNT_NUMBER_COLLISIONS_TOTAL.inc();
                    warn!(
                        "Account number {} already taken (attempt {}/{})",
                        number, attempt, self.max_attempts
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ProvisioningError::Exhausted(self.max_attempts))
    }
}
