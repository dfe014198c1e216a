//! Reusable resource pool.
//!
//! The pool is a flat catalogue of resources. Assigning a pool entry to a
//! task copies it; later edits to either side do not affect the other.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ProjectError, ProjectResult};
use crate::models::Resource;

/// Flat list of resources available for assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    resources: Vec<Resource>,
}

impl ResourcePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource to the pool.
    ///
    /// # Errors
    /// `DuplicateResource` if the pool already has a resource with the same
    /// ID or name.
    pub fn add(&mut self, resource: Resource) -> ProjectResult<()> {
        if self
            .resources
            .iter()
            .any(|r| r.id == resource.id || r.name == resource.name)
        {
            return Err(ProjectError::DuplicateResource(resource.name));
        }
        debug!(
            "event=pool_resource_added id={} name={}",
            resource.id, resource.name
        );
        self.resources.push(resource);
        Ok(())
    }

    /// Builder form of [`add`](Self::add). Duplicates are skipped and logged.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        if let Err(err) = self.add(resource) {
            debug!("event=pool_resource_skipped reason=\"{err}\"");
        }
        self
    }

    /// Looks up a resource by ID.
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Removes a resource from the pool.
    ///
    /// Copies already assigned to tasks are unaffected.
    pub fn remove(&mut self, id: &str) -> ProjectResult<Resource> {
        let index = self
            .resources
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ProjectError::ResourceNotFound(id.to_string()))?;
        debug!("event=pool_resource_removed id={id}");
        Ok(self.resources.remove(index))
    }

    /// Pool entries not yet assigned (by name) to the given resource list.
    pub fn unassigned<'a>(
        &'a self,
        assigned: &'a [Resource],
    ) -> impl Iterator<Item = &'a Resource> {
        self.resources
            .iter()
            .filter(move |r| !assigned.iter().any(|a| a.name == r.name))
    }

    /// Iterates over pool entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.resources.iter()
    }

    /// Number of pool entries.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
