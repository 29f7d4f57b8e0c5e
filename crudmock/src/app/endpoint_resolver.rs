//! URL resolution for mocked endpoints

use crate::domain::ports::RecordStore;

/// URL the store's adapter would request for a model type (and record id).
///
/// Takes the model type, not a fixture name: `admin` and `user` fixtures
/// both resolve to the `user` endpoints.
pub async fn resolve_url<S>(store: &S, model_type: &str, id: Option<&str>) -> String
where
    S: RecordStore + ?Sized,
{
    store.adapter_for(model_type).await.build_url(model_type, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStore;
    use crate::config::HarnessConfig;
    use crate::domain::entities::{NamingConvention, StoreAdapter};

    #[tokio::test]
    async fn test_resolves_through_store_adapter() {
        let store = InMemoryStore::from_config(&HarnessConfig::default().with_namespace("api"));
        assert_eq!(resolve_url(&store, "widget", None).await, "/api/widgets");
        assert_eq!(resolve_url(&store, "widget", Some("7")).await, "/api/widgets/7");
    }

    #[tokio::test]
    async fn test_per_type_adapter_wins() {
        let store = InMemoryStore::from_config(
            &HarnessConfig::default().with_naming(NamingConvention::CamelCase),
        )
        .with_adapter("lineItem", StoreAdapter::active_model());
        assert_eq!(resolve_url(&store, "lineItem", Some("2")).await, "/line_items/2");
        assert_eq!(resolve_url(&store, "orderItem", None).await, "/orderItems");
    }
}
