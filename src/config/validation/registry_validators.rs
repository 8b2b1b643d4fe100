//! Registry validators

use super::trait_def::Validate;
use crate::core::registry::Registry;
use std::collections::HashSet;
use tracing::debug;

impl Validate for Registry {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating registry");

        let mut team_ids = HashSet::new();
        for team in &self.teams {
            if team.id.trim().is_empty() {
                return Err(format!("Team {:?} has an empty id", team.name));
            }
            if !team_ids.insert(team.id.as_str()) {
                return Err(format!("Duplicate team id: {}", team.id));
            }
        }

        let mut component_ids = HashSet::new();
        for component in &self.components {
            if component.id.trim().is_empty() {
                return Err(format!("Component {:?} has an empty id", component.name));
            }
            if !component_ids.insert(component.id.as_str()) {
                return Err(format!("Duplicate component id: {}", component.id));
            }
            if let Some(owner) = &component.owner {
                if !team_ids.contains(owner.as_str()) {
                    return Err(format!(
                        "Component {} is owned by unknown team {}",
                        component.id, owner
                    ));
                }
            }
        }

        let mut landscape_ids = HashSet::new();
        for landscape in &self.landscapes {
            if landscape.id.trim().is_empty() {
                return Err(format!("Landscape {:?} has an empty id", landscape.name));
            }
            if !landscape_ids.insert(landscape.id.as_str()) {
                return Err(format!("Duplicate landscape id: {}", landscape.id));
            }
            if landscape.route.trim().is_empty() {
                return Err(format!("Landscape {} has an empty route", landscape.id));
            }
        }

        Ok(())
    }
}
