//! Resource model.
//!
//! Resources are the people, crews, and equipment billed against a task.
//! Each carries two hourly rates: what the client is billed and what the
//! resource actually costs. Only the cost rate feeds the cost rollup.

use serde::{Deserialize, Serialize};

use super::lenient;

/// A resource assigned to a task, or held in a resource pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Unique resource identifier.
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Price per hour billed to the client.
    #[serde(default, alias = "rate", deserialize_with = "lenient::number")]
    pub bill_rate: f64,
    /// Internal cost per hour.
    #[serde(default, alias = "cost", deserialize_with = "lenient::number")]
    pub cost_rate: f64,
}

impl Resource {
    /// Creates a resource with zero rates.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            bill_rate: 0.0,
            cost_rate: 0.0,
        }
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the hourly bill rate.
    pub fn with_bill_rate(mut self, bill_rate: f64) -> Self {
        self.bill_rate = bill_rate;
        self
    }

    /// Sets the hourly cost rate.
    pub fn with_cost_rate(mut self, cost_rate: f64) -> Self {
        self.cost_rate = cost_rate;
        self
    }

    /// Cost of this resource over `hours` of work.
    ///
    /// Non-finite rates count as zero.
    #[inline]
    pub fn cost_for(&self, hours: f64) -> f64 {
        lenient::finite_or_zero(self.cost_rate) * hours
    }

    /// Copies this resource under a new identity.
    pub fn copy_as(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }
}
