use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::Observation;

/// The raw in-memory price table, as loaded. Never mutated by the core.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, observations: Vec<Observation>) -> Self {
        Self {
            name: name.into(),
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Distinct commodity labels, sorted.
    pub fn commodities(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|o| o.commodity.as_str())
            .unique()
            .sorted()
            .map(str::to_string)
            .collect()
    }
}
