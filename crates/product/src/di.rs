use crate::{
    abstract_trait::product::{
        repository::DynProductStore,
        service::{DynProductCommandService, DynProductQueryService},
    },
    service::{ProductCommandService, ProductQueryService},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_store: DynProductStore,
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(store: DynProductStore, registry: &mut Registry) -> Self {
        let product_query = Arc::new(ProductQueryService::new(store.clone(), registry));
        let product_command = Arc::new(ProductCommandService::new(store.clone(), registry));

        Self {
            product_store: store,
            product_query,
            product_command,
        }
    }
}
