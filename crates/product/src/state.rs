use crate::{abstract_trait::product::repository::DynProductStore, di::DependenciesInject};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("registry", &self.registry)
            .finish()
    }
}

impl AppState {
    pub fn new(store: DynProductStore) -> Self {
        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(store, &mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
        }
    }
}
