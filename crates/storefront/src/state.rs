use crate::di::{DependenciesInject, RepositoryDeps};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::{sync::Mutex, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .finish()
    }
}

impl AppState {
    pub fn new(repos: RepositoryDeps, ledger_timeout: Duration) -> Self {
        let mut registry = Registry::default();

        let di_container = DependenciesInject::new(repos, ledger_timeout, &mut registry);

        Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}
