use {
    crate::bank::error::BankError,
    dashmap::DashMap,
    std::sync::{Arc, Mutex, MutexGuard},
};

/// One mutex per account number. Holding it serializes load, mutate and save
/// for that account within this process.
///
/// An entry lives only while some caller holds or waits on it.
#[derive(Default)]
pub struct AccountLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self, number: &str) -> Arc<Mutex<()>> {
        self.locks.entry(number.to_string()).or_default().value().clone()
    }

    /// Drops the map entry if `handle` and the map are its only owners.
    fn release(&self, number: &str, handle: Arc<Mutex<()>>) {
        // The shard lock held by `remove_if` excludes a concurrent `handle` clone.
        self.locks.remove_if(number, |_, lock| {
            Arc::ptr_eq(lock, &handle) && Arc::strong_count(lock) == 2
        });
    }

    /// Runs `operation` while holding the locks of every account in `numbers`.
    ///
    /// Locks are taken in ascending number order and each number only once, so
    /// callers locking overlapping sets cannot deadlock.
    pub fn with_locked<T, F>(&self, numbers: &[&str], operation: F) -> Result<T, BankError>
    where
        F: FnOnce() -> Result<T, BankError>,
    {
        let mut ordered = numbers.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let handles: Vec<(&str, Arc<Mutex<()>>)> = ordered
            .into_iter()
            .map(|number| (number, self.handle(number)))
            .collect();

        let result = {
            let mut guards = Vec::with_capacity(handles.len());
            let mut acquired = Ok(());
            for (number, lock) in &handles {
                match acquire(lock, number) {
                    Ok(guard) => guards.push(guard),
                    Err(e) => {
                        acquired = Err(e);
                        break;
                    }
                }
            }
            acquired.and_then(|_| operation())
        };

        for (number, handle) in handles {
            self.release(number, handle);
        }
        result
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.len()
    }
}

fn acquire<'a>(lock: &'a Mutex<()>, number: &str) -> Result<MutexGuard<'a, ()>, BankError> {
    lock.lock()
        .map_err(|_| BankError::FailedToAcquireAccountLock(number.to_string()))
}
