//! Registry data model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Team owning one or more components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
}

/// Opaque external links attached to a component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sonar: Option<String>,
}

/// A deployable service that may expose a health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Stable identifier
    pub id: String,
    /// Display and endpoint name
    pub name: String,
    /// Owning team id
    #[serde(default)]
    pub owner: Option<String>,
    /// Whether the component exposes a health endpoint at all
    #[serde(default)]
    pub health_enabled: bool,
    /// Deployed once and only checkable from the central landscape
    #[serde(default)]
    pub central_service: bool,
    /// Shared library rather than a running service
    #[serde(default)]
    pub is_library: bool,
    #[serde(default)]
    pub links: ComponentLinks,
}

impl Component {
    /// Create a health-enabled component with no owner
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: None,
            health_enabled: true,
            central_service: false,
            is_library: false,
            links: ComponentLinks::default(),
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_health_enabled(mut self, enabled: bool) -> Self {
        self.health_enabled = enabled;
        self
    }

    pub fn with_central_service(mut self, central: bool) -> Self {
        self.central_service = central;
        self
    }

    pub fn with_library(mut self, is_library: bool) -> Self {
        self.is_library = is_library;
        self
    }
}

/// A deployment environment components are probed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landscape {
    pub id: String,
    pub name: String,
    /// Base network address used to build probe endpoints
    pub route: String,
    #[serde(default)]
    pub is_central: bool,
}

impl Landscape {
    pub fn new(id: impl Into<String>, name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            route: route.into(),
            is_central: false,
        }
    }

    pub fn central(mut self) -> Self {
        self.is_central = true;
        self
    }
}

/// Read-only snapshot of teams, components and landscapes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub landscapes: Vec<Landscape>,
}

impl Registry {
    /// Whether at least one landscape is designated central
    pub fn has_central_landscape(&self) -> bool {
        self.landscapes.iter().any(|l| l.is_central)
    }

    pub fn landscape(&self, id: &str) -> Option<&Landscape> {
        self.landscapes.iter().find(|l| l.id == id)
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Team display name for a component owner, if the owner is known
    pub fn team_name(&self, team_id: &str) -> Option<&str> {
        self.teams
            .iter()
            .find(|t| t.id == team_id)
            .map(|t| t.name.as_str())
    }

    /// Map of team id to team name
    pub fn team_names(&self) -> HashMap<String, String> {
        self.teams
            .iter()
            .map(|t| (t.id.clone(), t.name.clone()))
            .collect()
    }

    /// Merge another registry into this one; entries with the same id are replaced
    pub fn merge(mut self, other: Self) -> Self {
        for team in other.teams {
            match self.teams.iter_mut().find(|t| t.id == team.id) {
                Some(existing) => *existing = team,
                None => self.teams.push(team),
            }
        }
        for component in other.components {
            match self.components.iter_mut().find(|c| c.id == component.id) {
                Some(existing) => *existing = component,
                None => self.components.push(component),
            }
        }
        for landscape in other.landscapes {
            match self.landscapes.iter_mut().find(|l| l.id == landscape.id) {
                Some(existing) => *existing = landscape,
                None => self.landscapes.push(landscape),
            }
        }
        self
    }
}
