use std::env;

use crate::domain::entities::NamingConvention;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Host prepended to every built URL, e.g. `https://api.example.com`
    pub api_host: Option<String>,
    /// Path namespace between host and resource, e.g. `api/v1`
    pub api_namespace: Option<String>,
    /// Key casing the mocked API uses unless a model type overrides it
    pub naming: NamingConvention,
    /// Status a successful create mock responds with
    pub success_status: u16,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            api_host: None,
            api_namespace: None,
            naming: NamingConvention::CamelCase,
            success_status: 200,
        }
    }
}

impl HarnessConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            api_host: env::var("CRUDMOCK_API_HOST")
                .ok()
                .map(|host| host.trim_end_matches('/').to_string()),
            api_namespace: env::var("CRUDMOCK_API_NAMESPACE")
                .ok()
                .map(|ns| ns.trim_matches('/').to_string()),
            naming: env::var("CRUDMOCK_NAMING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.naming),
            success_status: env::var("CRUDMOCK_SUCCESS_STATUS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.success_status),
        }
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.api_host = Some(host.trim_end_matches('/').to_string());
        self
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.api_namespace = Some(namespace.trim_matches('/').to_string());
        self
    }

    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.api_host, None);
        assert_eq!(config.api_namespace, None);
        assert_eq!(config.naming, NamingConvention::CamelCase);
        assert_eq!(config.success_status, 200);
    }

    #[test]
    fn test_from_env() {
        env::set_var("CRUDMOCK_API_HOST", "https://api.test/");
        env::set_var("CRUDMOCK_API_NAMESPACE", "/v2/");
        env::set_var("CRUDMOCK_NAMING", "snake");
        env::set_var("CRUDMOCK_SUCCESS_STATUS", "not-a-status");

        let config = HarnessConfig::from_env();
        assert_eq!(config.api_host.as_deref(), Some("https://api.test"));
        assert_eq!(config.api_namespace.as_deref(), Some("v2"));
        assert_eq!(config.naming, NamingConvention::SnakeCase);
        assert_eq!(config.success_status, 200); // Unparseable falls back

        for var in [
            "CRUDMOCK_API_HOST",
            "CRUDMOCK_API_NAMESPACE",
            "CRUDMOCK_NAMING",
            "CRUDMOCK_SUCCESS_STATUS",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_builders_trim_slashes() {
        let config = HarnessConfig::default()
            .with_host("https://api.example.com/")
            .with_namespace("/api/v1/")
            .with_naming(NamingConvention::SnakeCase);
        assert_eq!(config.api_host.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.api_namespace.as_deref(), Some("api/v1"));
        assert_eq!(config.naming, NamingConvention::SnakeCase);
    }
}
