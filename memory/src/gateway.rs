//! Memory gateway - a named set of datasets.

use crate::Dataset;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// The in-memory datastore connection.
#[derive(Debug)]
pub struct MemoryGateway {
    name: String,
    datasets: RwLock<HashMap<String, Arc<Dataset>>>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new("default")
    }
}

impl MemoryGateway {
    /// Create a gateway with no datasets.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datasets: RwLock::new(HashMap::new()),
        }
    }

    /// Gateway name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a dataset, creating it if it does not exist yet.
    pub fn dataset(&self, name: &str) -> Arc<Dataset> {
        if let Some(dataset) = self.find_dataset(name) {
            return dataset;
        }
        let mut datasets = self.datasets.write().unwrap_or_else(PoisonError::into_inner);
        datasets
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Dataset::new(name)))
            .clone()
    }

    /// Get an existing dataset.
    pub fn find_dataset(&self, name: &str) -> Option<Arc<Dataset>> {
        self.datasets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Names of all datasets.
    pub fn dataset_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .datasets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}
