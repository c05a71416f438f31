//! Game variable access for settings that follow a variable at runtime.

use std::collections::BTreeMap;

/// Identifier of a game variable. ID 0 is never a valid variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct VariableId(pub u16);

impl VariableId {
    /// Interprets a configured variable ID; anything below 1 disables the
    /// variable lookup.
    pub fn configured(value: i64) -> Option<Self> {
        u16::try_from(value).ok().filter(|v| *v >= 1).map(Self)
    }
}

/// Read-only view of the host's variable store.
pub trait VariableOracle: Send + Sync {
    /// Current value of the variable. Unset variables read as 0.
    fn value(&self, id: VariableId) -> i64;
}

/// Variable store backed by a map, for tools and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct VariableTable(BTreeMap<VariableId, i64>);

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: VariableId, value: i64) -> Self {
        self.set(id, value);
        self
    }

    pub fn set(&mut self, id: VariableId, value: i64) {
        self.0.insert(id, value);
    }
}

impl VariableOracle for VariableTable {
    fn value(&self, id: VariableId) -> i64 {
        self.0.get(&id).copied().unwrap_or(0)
    }
}
