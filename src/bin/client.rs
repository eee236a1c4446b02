//! Load generator: workers open accounts, deposit and transfer at random.

use {
    clap::Parser,
    coffer::{
        config::CofferClientConfig, logging::init_logging, models::Money,
        statement::StatementView,
    },
    rand::{Rng, SeedableRng, seq::IndexedRandom},
    reqwest::Client,
    rust_decimal::{Decimal, prelude::ToPrimitive},
    std::{sync::Arc, time::Duration},
    tokio::sync::RwLock,
    tracing::{error, info, warn},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = CofferClientConfig::from_file(&args.config)
        .map_err(|e| format!("Failed to load client configuration file: {}", e))?;

    init_logging(config.debug, &config.log_dir)?;

    let base_url = format!("http://{}:{}", config.http.address, config.http.port);
    let client = Client::builder().timeout(Duration::from_secs(5)).build()?;
    let account_numbers = Arc::new(RwLock::new(Vec::<String>::new()));

    let mut join_handles = Vec::new();
    for i in 0..config.client.tasks {
        let handle = tokio::spawn(run_worker(
            i,
            client.clone(),
            base_url.clone(),
            account_numbers.clone(),
            config.clone(),
        ));
        join_handles.push(handle);
    }

    info!("Starting load generator with {} tasks...", config.client.tasks);
    for handle in join_handles {
        if let Err(e) = handle.await {
            error!("One of the worker tasks failed: {}", e);
        }
    }
    Ok(())
}

/// Sends a request and decodes the statement. Failures are logged and yield `None`.
async fn call(
    request: reqwest::RequestBuilder,
    worker_id: u32,
    what: &str,
) -> Option<StatementView> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("[Worker {}] {} request failed: {}", worker_id, what, e);
            return None;
        }
    };

    let status = response.status();
    if status.is_success() {
        return match response.json::<StatementView>().await {
            Ok(view) => Some(view),
            Err(e) => {
                warn!("[Worker {}] {} returned an unreadable statement: {}", worker_id, what, e);
                None
            }
        };
    }

    let body = response.text().await.unwrap_or_default();
    warn!("[Worker {}] {} failed ({}): {}", worker_id, what, status, body);
    None
}

async fn run_worker(
    worker_id: u32,
    client: Client,
    base_url: String,
    account_numbers: Arc<RwLock<Vec<String>>>,
    config: CofferClientConfig,
) {
    let mut rng = rand::rngs::StdRng::from_os_rng();
    let create_chance = config.client.create_chance;
    let deposit_chance = config.client.deposit_chance;

    loop {
        let operation_chance = rng.random_range(0..100);

        if operation_chance < create_chance || account_numbers.read().await.is_empty() {
            let name = format!("Load Worker {}", worker_id);
            let request = client
                .post(format!("{}/accounts", base_url))
                .query(&[("name", name.as_str()), ("phone", "(000) 000 0000")]);

            if let Some(view) = call(request, worker_id, "open account").await {
                info!("[Worker {}] Opened account {}", worker_id, view.number);
                account_numbers.write().await.push(view.number);
            }
        } else if operation_chance < create_chance + deposit_chance {
            let Some(number) = ({ account_numbers.read().await.choose(&mut rng).cloned() }) else {
                continue;
            };

            let amount = format!("{}.{:02}", rng.random_range(1..500), rng.random_range(0..100));
            let request = client
                .post(format!("{}/deposit", base_url))
                .query(&[("number", number.as_str()), ("amount", amount.as_str())]);

            if let Some(view) = call(request, worker_id, "deposit").await {
                info!(
                    "[Worker {}] Deposited {} into {}, balance {}",
                    worker_id, amount, number, view.balance
                );
            }
        } else {
            let (source, destination) = {
                let numbers = account_numbers.read().await;
                if numbers.len() < 2 {
                    continue;
                }
                let sample: Vec<&String> = numbers.choose_multiple(&mut rng, 2).collect();
                (sample[0].clone(), sample[1].clone())
            };

            let request = client
                .get(format!("{}/statement", base_url))
                .query(&[("number", source.as_str())]);
            let Some(statement) = call(request, worker_id, "statement").await else {
                continue;
            };

            let cents = (statement.balance * Decimal::ONE_HUNDRED)
                .trunc()
                .to_i64()
                .unwrap_or(0);
            if cents <= 0 {
                continue;
            }
            let amount = Money::from_minor_units(rng.random_range(1..=cents)).to_string();

            let request = client.post(format!("{}/transfer", base_url)).query(&[
                ("from", source.as_str()),
                ("to", destination.as_str()),
                ("amount", amount.as_str()),
            ]);

            if call(request, worker_id, "transfer").await.is_some() {
                info!(
                    "[Worker {}] Transferred {} from {} to {}",
                    worker_id, amount, source, destination
                );
            }
        }

        tokio::time::sleep(Duration::from_millis(config.client.pause_ms)).await;
    }
}
