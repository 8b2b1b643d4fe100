//! Registry fixtures
//!
//! Factories build real registry values with sensible defaults.

use landscape_health::{Component, Landscape, Registry, Team};

/// Factory for components
pub struct ComponentFactory;

impl ComponentFactory {
    /// Health-enabled service `c{n}` named `service-{n}`
    pub fn service(n: usize) -> Component {
        Component::new(format!("c{}", n), format!("service-{}", n))
    }

    /// `count` consecutive services starting at `c1`
    pub fn services(count: usize) -> Vec<Component> {
        (1..=count).map(Self::service).collect()
    }

    /// Central-only service
    pub fn central_service(id: &str, name: &str) -> Component {
        Component::new(id, name).with_central_service(true)
    }
}

/// Factory for registries
pub struct RegistryFactory;

impl RegistryFactory {
    pub fn eu10() -> Landscape {
        Landscape::new("eu10", "EU10", "cfapps.eu10.example.com")
    }

    pub fn us20() -> Landscape {
        Landscape::new("us20", "US20", "cfapps.us20.example.com")
    }

    pub fn central() -> Landscape {
        Landscape::new("central", "Central", "cfapps.central.example.com").central()
    }

    /// Two teams, seven components (one central-only, one disabled, one library)
    /// and three landscapes including a central one
    pub fn standard() -> Registry {
        Registry {
            teams: vec![
                Team {
                    id: "identity".to_string(),
                    name: "Identity".to_string(),
                },
                Team {
                    id: "platform".to_string(),
                    name: "Platform".to_string(),
                },
            ],
            components: vec![
                Component::new("c1", "accounts").with_owner("identity"),
                Component::new("c2", "billing").with_owner("platform"),
                Component::new("c3", "catalog").with_owner("platform"),
                Component::new("c4", "dispatch"),
                ComponentFactory::central_service("c5", "registry").with_owner("platform"),
                Component::new("c6", "legacy").with_health_enabled(false),
                Component::new("c7", "client-sdk")
                    .with_owner("identity")
                    .with_library(true),
            ],
            landscapes: vec![Self::eu10(), Self::us20(), Self::central()],
        }
    }
}
