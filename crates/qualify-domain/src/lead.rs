//! Lead snapshot

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable snapshot of a lead for one qualification run
///
/// The engine never mutates a lead; it serialises it into every oracle request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Opaque identifier, echoed into the result
    pub id: String,

    /// Trading name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,

    /// Industry (e.g. `restaurant`)
    pub industry: String,

    /// Geographic market
    pub location: String,

    /// Headcount, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,

    /// Public website, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Any further attributes gathered upstream
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Lead {
    /// Create a lead with the required fields
    pub fn new(
        id: impl Into<String>,
        industry: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            business_name: None,
            industry: industry.into(),
            location: location.into(),
            employee_count: None,
            website: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Set the business name
    pub fn with_business_name(mut self, name: impl Into<String>) -> Self {
        self.business_name = Some(name.into());
        self
    }

    /// Set the headcount
    pub fn with_employee_count(mut self, count: u32) -> Self {
        self.employee_count = Some(count);
        self
    }

    /// Set the website
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Add a free-form attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
