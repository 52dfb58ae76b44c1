use serde::{Deserialize, Serialize};

/// Roster used until the caller loads its own saved set.
pub const DEFAULT_LOCAL_ASSIGNEES: &[&str] =
    &["Vincent THELA", "Martin BALOYI", "Refiloe RAMONYANE"];

/// The user-editable set of assignee names considered part of the local
/// team. Owned and persisted by the caller; serializes as a plain array so
/// it round-trips through whatever storage the caller uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalAssignees {
    names: Vec<String>,
}

impl LocalAssignees {
    /// Build a set from caller-provided names, dropping duplicates while
    /// keeping first-seen order.
    pub fn new(names: Vec<String>) -> Self {
        let mut set = Self { names: Vec::new() };
        for name in names {
            set.add(&name);
        }
        set
    }

    pub fn add(&mut self, name: &str) {
        if !self.contains(name) {
            self.names.push(name.to_string());
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.names.retain(|n| n != name);
    }

    pub fn reset_to_default(&mut self) {
        *self = Self::default();
    }

    /// Case-sensitive exact membership.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for LocalAssignees {
    fn default() -> Self {
        Self {
            names: DEFAULT_LOCAL_ASSIGNEES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Whether an incident's assignee belongs to the local team.
pub fn is_local(assigned_to: &str, local: &LocalAssignees) -> bool {
    local.contains(assigned_to)
}
