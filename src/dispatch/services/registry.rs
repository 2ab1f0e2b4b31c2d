//! Name-indexed agent registry.

use super::{DispatchError, DispatchResult};
use crate::agent::domain::AgentName;
use crate::agent::ports::Agent;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

fn unavailable(err: impl std::fmt::Display) -> DispatchError {
    DispatchError::RegistryUnavailable(Arc::new(std::io::Error::other(err.to_string())))
}

/// Registered agents keyed by name.
#[derive(Default)]
pub struct AgentRegistry {
    agents: RwLock<BTreeMap<AgentName, Arc<dyn Agent>>>,
}

impl AgentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `agent` under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DuplicateAgent`] when the name is taken, or
    /// [`DispatchError::RegistryUnavailable`] when lock acquisition fails.
    pub fn register(&self, agent: Arc<dyn Agent>) -> DispatchResult<()> {
        let mut agents = self.agents.write().map_err(unavailable)?;
        let name = agent.name().clone();
        if agents.contains_key(&name) {
            return Err(DispatchError::DuplicateAgent(name));
        }
        agents.insert(name, agent);
        Ok(())
    }

    /// Returns the agent registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::RegistryUnavailable`] when lock acquisition
    /// fails.
    pub fn get(&self, name: &AgentName) -> DispatchResult<Option<Arc<dyn Agent>>> {
        let agents = self.agents.read().map_err(unavailable)?;
        Ok(agents.get(name).cloned())
    }

    /// Returns every registered agent ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::RegistryUnavailable`] when lock acquisition
    /// fails.
    pub fn all(&self) -> DispatchResult<Vec<Arc<dyn Agent>>> {
        let agents = self.agents.read().map_err(unavailable)?;
        Ok(agents.values().cloned().collect())
    }

    /// Returns the registered names in order.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::RegistryUnavailable`] when lock acquisition
    /// fails.
    pub fn names(&self) -> DispatchResult<Vec<AgentName>> {
        let agents = self.agents.read().map_err(unavailable)?;
        Ok(agents.keys().cloned().collect())
    }
}
