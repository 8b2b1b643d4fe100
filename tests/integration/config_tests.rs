//! Configuration integration tests
//!
//! Load complete configuration files from disk and check how they feed the
//! engine.

#[cfg(test)]
mod tests {
    use crate::common::RegistryFactory;
    use crate::{assert_err, assert_ok};
    use landscape_health::config::Validate;
    use landscape_health::{Config, HealthError, PollOptions};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    const FULL_CONFIG: &str = r#"
engine:
  stale_time_secs: 45
  gc_time_secs: 600
  retry_attempts: 2
  auto_refresh_secs: 30

transport:
  endpoint_template: "https://{component_name}.{route}/actuator/health"
  timeout_secs: 8
  headers:
    x-portal-key: secret

server:
  port: 9090

registry:
  teams:
    - id: identity
      name: Identity
  components:
    - id: c1
      name: accounts
      owner: identity
      health_enabled: true
    - id: c2
      name: registry
      health_enabled: true
      central_service: true
    - id: c3
      name: docs
  landscapes:
    - id: eu10
      name: EU10
      route: cfapps.eu10.example.com
    - id: central
      name: Central
      route: cfapps.central.example.com
      is_central: true
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_full_config_file() {
        let file = write_config(FULL_CONFIG);
        let config = assert_ok!(Config::from_file(file.path()).await);

        let cache = config.engine.cache_config();
        assert_eq!(cache.stale_time, Duration::from_secs(45));
        assert_eq!(cache.gc_time, Duration::from_secs(600));
        assert_eq!(config.engine.auto_refresh(), Some(Duration::from_secs(30)));
        assert_eq!(config.transport.timeout_secs, 8);
        assert_eq!(
            config.transport.headers.get("x-portal-key").map(String::as_str),
            Some("secret")
        );
        assert_eq!(config.server.address(), "0.0.0.0:9090");

        let registry = &config.registry;
        assert_eq!(registry.components.len(), 3);
        assert!(!registry.component("c3").unwrap().health_enabled);
        assert!(registry.component("c2").unwrap().central_service);
        assert_eq!(registry.team_name("identity"), Some("Identity"));
        assert!(PollOptions::for_registry(registry).central_landscape_exists);
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let error = assert_err!(Config::from_file("/nonexistent/landscape-health.yaml").await);
        assert!(matches!(error, HealthError::Config(_)));
    }

    #[tokio::test]
    async fn test_invalid_registry_is_rejected() {
        let content = FULL_CONFIG.replace("owner: identity", "owner: payments");
        let file = write_config(&content);

        let error = assert_err!(Config::from_file(file.path()).await);
        let message = error.to_string();
        assert!(message.contains("Registry error"), "{}", message);
        assert!(message.contains("unknown team payments"), "{}", message);
    }

    #[tokio::test]
    async fn test_stale_time_longer_than_gc_time_is_rejected() {
        let content = FULL_CONFIG.replace("gc_time_secs: 600", "gc_time_secs: 30");
        let file = write_config(&content);

        let error = assert_err!(Config::from_file(file.path()).await);
        assert!(error.to_string().contains("Engine config error"));
    }

    #[test]
    fn test_env_overrides_apply_over_file_values() {
        let mut config = assert_ok!(Config::from_yaml(FULL_CONFIG));
        assert_ok!(config.apply_env_overrides(vec![
            ("LANDSCAPE_HEALTH_STALE_TIME_SECS".to_string(), "20".to_string()),
            ("LANDSCAPE_HEALTH_PORT".to_string(), "7070".to_string()),
            ("UNRELATED".to_string(), "ignored".to_string()),
        ]));

        assert_eq!(config.engine.stale_time_secs, 20);
        assert_eq!(config.engine.gc_time_secs, 600);
        assert_eq!(config.server.port, 7070);
        assert_ok!(config.validate());
    }

    #[test]
    fn test_fixture_registry_is_valid() {
        assert_ok!(RegistryFactory::standard().validate());
    }
}
