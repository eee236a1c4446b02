use {
    crate::{
        bank::{Bank, error::BankError, interface::BankInterface},
        http_server::start_http_service,
        models::Customer,
        persistence::{Persistence, error::PersistenceError},
        provisioning::{AccountProvisioner, ProvisioningError},
    },
    std::sync::Arc,
    thiserror::Error,
    tokio::signal::ctrl_c,
    tracing::{error, info},
};

mod macros;

pub mod bank;
pub mod config;
pub mod http_server;
pub mod ledger;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod persistence;
pub mod provisioning;
pub mod statement;

#[derive(Debug, Error)]
pub enum CofferError {
    #[error("failed to open the account store: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("invalid provisioning settings: {0}")]
    Provisioning(#[from] ProvisioningError),
    #[error("failed to open the demo account: {0}")]
    DemoAccount(#[from] BankError),
    #[error("background task failed: {0}")]
    Worker(String),
    #[error("failed to coordinate shutdown: {0}")]
    Shutdown(String),
}

pub struct Coffer {
    pub bank: Arc<Bank>,
    pub config: config::CofferServerConfig,
}

impl Coffer {
    /// Opens the database and wires the bank on top of it. The connection is
    /// closed when the last reference to the bank is dropped.
    pub fn new(config: config::CofferServerConfig) -> Result<Self, CofferError> {
        let persistence = Arc::new(Persistence::new(&config.persistence.db_path)?);
        let provisioner = AccountProvisioner::from_config(&config.provisioning)?;

        info!("Opened account store at {}", config.persistence.db_path);

        Ok(Coffer {
            bank: Arc::new(Bank::new(persistence, provisioner)),
            config,
        })
    }

    async fn open_demo_account(&self) -> Result<(), CofferError> {
        let bank = Arc::clone(&self.bank);
        let view = tokio::task::spawn_blocking(move || bank.open_account(Customer::demo()))
            .await
            .map_err(|e| CofferError::Worker(e.to_string()))??;

        info!(
            "Account successfully created for user: {} ({})",
            view.name, view.number
        );
        Ok(())
    }

    fn service_outcome(
        res: Result<std::io::Result<()>, tokio::task::JoinError>,
    ) -> Result<(), CofferError> {
        match res {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(CofferError::Worker(e.to_string())),
            Err(e) => Err(CofferError::Worker(e.to_string())),
        }
    }

    pub async fn run(&self) -> Result<(), CofferError> {
        let (shutdown_sender, _) = tokio::sync::broadcast::channel::<()>(1);
        let mut services = tokio::task::JoinSet::new();

        if self.config.provisioning.open_demo_account {
            self.open_demo_account().await?;
        }

        {
            let http_bank = Arc::clone(&self.bank);
            let http_config = self.config.http.clone();
            let shutdown_receiver = shutdown_sender.subscribe();
            services.spawn(async move {
                start_http_service(http_config, http_bank, shutdown_receiver).await
            })
        };

        tokio::select! {
            _ = ctrl_c() => {
                info!("Shutdown signal received, stopping services...");
                shutdown_sender.send(()).map_err(|e| CofferError::Shutdown(e.to_string()))?;

                while let Some(res) = services.join_next().await {
                    Self::service_outcome(res)?;
                }

                info!("All services stopped");
            }
            Some(res) = services.join_next() => {
                Self::service_outcome(res)?;
                error!("Service exited before shutdown was requested");
                return Err(CofferError::Worker("service exited unexpectedly".to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_fails_when_http_port_is_taken() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();
        let config = crate::config::CofferServerConfig::from_toml(&format!(
            r#"
            [http]
            address = "127.0.0.1"
            port = {port}

            [persistence]
            db_path = ":memory:"
            "#
        ))
        .unwrap();

        let app = Coffer::new(config).unwrap();
        let result = app.run().await;

        assert!(matches!(result, Err(CofferError::Worker(_))));
    }
}
