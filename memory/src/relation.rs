//! Memory relation - restrictable handle over a dataset.

use crate::dataset::InsertError;
use crate::filter::RowFilter;
use crate::{Dataset, MemoryGateway, ADAPTER};
use rowmap_core::{Record, RelationName, Value};
use rowmap_relation::{
    Relation, RelationError, RelationRef, RelationResult, RelationSignature, Restriction,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A named view (custom finder) defined on a relation.
pub type ViewFn =
    Arc<dyn Fn(&MemoryRelation, &[Value]) -> RelationResult<RelationRef> + Send + Sync>;

/// Relation over a memory dataset.
#[derive(Clone)]
pub struct MemoryRelation {
    name: RelationName,
    gateway: String,
    dataset: Arc<Dataset>,
    primary_key: String,
    restrictions: Vec<Restriction>,
    views: Arc<BTreeMap<String, ViewFn>>,
}

impl MemoryRelation {
    /// Start defining a relation named `name` on `gateway`.
    ///
    /// The dataset defaults to the relation name.
    pub fn builder(gateway: &MemoryGateway, name: impl Into<RelationName>) -> RelationBuilder<'_> {
        let name = name.into();
        RelationBuilder {
            gateway,
            dataset: name.as_str().to_string(),
            name,
            primary_key: "id".to_string(),
            views: BTreeMap::new(),
        }
    }

    /// Restrictions applied so far.
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    /// Restrict by `attribute = value`.
    pub fn where_eq(&self, attribute: &str, value: impl Into<Value>) -> RelationRef {
        self.restrict(Restriction::eq(attribute, value))
    }

    fn filter(&self) -> RelationResult<RowFilter> {
        RowFilter::compile(&self.restrictions)
    }
}

impl fmt::Debug for MemoryRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRelation")
            .field("name", &self.name)
            .field("dataset", &self.dataset.name())
            .field("restrictions", &self.restrictions)
            .field("views", &self.views.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Relation for MemoryRelation {
    fn name(&self) -> &RelationName {
        &self.name
    }

    fn adapter(&self) -> &str {
        ADAPTER
    }

    fn gateway(&self) -> &str {
        &self.gateway
    }

    fn dataset(&self) -> &str {
        self.dataset.name()
    }

    fn primary_key(&self) -> &str {
        &self.primary_key
    }

    fn signature(&self) -> RelationSignature {
        RelationSignature {
            name: self.name.clone(),
            restrictions: self.restrictions.clone(),
        }
    }

    fn restrict(&self, restriction: Restriction) -> RelationRef {
        let mut restricted = self.clone();
        restricted.restrictions.push(restriction);
        Arc::new(restricted)
    }

    fn view_names(&self) -> Vec<&str> {
        self.views.keys().map(String::as_str).collect()
    }

    fn view(&self, name: &str, args: &[Value]) -> Option<RelationResult<RelationRef>> {
        self.views.get(name).map(|view| view(self, args))
    }

    fn to_vec(&self) -> RelationResult<Vec<Record>> {
        let filter = self.filter()?;
        Ok(self.dataset.select(|r| filter.accepts(r)))
    }

    fn insert(&self, records: Vec<Record>) -> RelationResult<Vec<Record>> {
        trace!(relation = %self.name, count = records.len(), "insert");
        self.dataset
            .insert(&self.primary_key, records)
            .map_err(|err| match err {
                InsertError::DuplicateKey(key) => {
                    RelationError::duplicate_key(self.name.clone(), key)
                }
                InsertError::KeySpaceExhausted => {
                    RelationError::key_space_exhausted(self.name.clone())
                }
            })
    }

    fn update(&self, changes: &Record) -> RelationResult<Vec<Record>> {
        let filter = self.filter()?;
        if let Some(new_key) = changes.get(&self.primary_key) {
            let changes_key = self
                .dataset
                .select(|r| filter.accepts(r))
                .iter()
                .any(|row| row.get(&self.primary_key) != Some(new_key));
            if changes_key {
                return Err(RelationError::primary_key_change(
                    self.name.clone(),
                    &self.primary_key,
                ));
            }
        }
        trace!(relation = %self.name, restrictions = self.restrictions.len(), "update");
        Ok(self.dataset.update(|r| filter.accepts(r), changes))
    }

    fn delete(&self) -> RelationResult<Vec<Record>> {
        let filter = self.filter()?;
        trace!(relation = %self.name, restrictions = self.restrictions.len(), "delete");
        Ok(self.dataset.delete(|r| filter.accepts(r)))
    }
}

/// Builder for a memory relation.
pub struct RelationBuilder<'g> {
    gateway: &'g MemoryGateway,
    name: RelationName,
    dataset: String,
    primary_key: String,
    views: BTreeMap<String, ViewFn>,
}

impl<'g> RelationBuilder<'g> {
    /// Back the relation by a differently named dataset.
    pub fn dataset(mut self, name: impl Into<String>) -> Self {
        self.dataset = name.into();
        self
    }

    /// Set the primary key attribute.
    pub fn primary_key(mut self, attr: impl Into<String>) -> Self {
        self.primary_key = attr.into();
        self
    }

    /// Define a view.
    pub fn view<F>(mut self, name: impl Into<String>, view: F) -> Self
    where
        F: Fn(&MemoryRelation, &[Value]) -> RelationResult<RelationRef> + Send + Sync + 'static,
    {
        self.views.insert(name.into(), Arc::new(view));
        self
    }

    /// Define a view restricting `attribute` to its single argument.
    pub fn view_by(self, name: impl Into<String>, attribute: impl Into<String>) -> Self {
        let name = name.into();
        let view_name = name.clone();
        let attribute = attribute.into();
        self.view(name, move |relation, args| {
            let value = single_arg(&view_name, args)?;
            Ok(relation.where_eq(&attribute, value))
        })
    }

    /// Build the relation. Every relation gets a `by_pk` view.
    pub fn build(self) -> RelationRef {
        let primary_key = self.primary_key.clone();
        let builder = if self.views.contains_key("by_pk") {
            self
        } else {
            self.view_by("by_pk", primary_key)
        };
        Arc::new(MemoryRelation {
            dataset: builder.gateway.dataset(&builder.dataset),
            gateway: builder.gateway.name().to_string(),
            name: builder.name,
            primary_key: builder.primary_key,
            restrictions: Vec::new(),
            views: Arc::new(builder.views),
        })
    }
}

fn single_arg(view: &str, args: &[Value]) -> RelationResult<Value> {
    match args {
        [value] => Ok(value.clone()),
        _ => Err(RelationError::invalid_arguments(
            view,
            format!("expected 1 argument, got {}", args.len()),
        )),
    }
}
