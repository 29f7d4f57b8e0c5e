//! CRUD mock handlers
//!
//! Each handler is a single shot: it validates its arguments and resolves
//! the fixture's model type, optionally loads records, and registers one
//! stub. Argument and fixture errors surface before anything is loaded or
//! stubbed. An interceptor that refuses the stub fails the call after the
//! records are loaded; they stay in the store until teardown.
//!
//! A successful mock answers with the configured success status; a failed
//! one answers 500 and touches nothing in the store.

use serde_json::{json, Value};

use crate::app::argument_normalizer::{normalize, normalize_list};
use crate::app::context::HarnessContext;
use crate::app::payload_shaper::envelope;
use crate::domain::entities::{FixtureRecord, HttpMethod, MockEndpoint, StubOptions};
use crate::domain::ports::{FixtureFactory, RecordStore, RequestInterceptor};
use crate::error::HarnessError;

/// Status every simulated remote failure responds with
pub const FAILURE_STATUS: u16 = 500;

/// What a handler registered and which records it loaded
#[derive(Debug, Clone)]
pub struct CrudMock {
    pub endpoint: MockEndpoint,
    pub records: Vec<FixtureRecord>,
}

/// Mock `GET /<models>` for `name, count?, trait..., options?, succeed?`.
///
/// The records are loaded straight into the store, so the stub answers with
/// an empty collection; the request only has to succeed.
pub async fn handle_find_many<S, F, I>(
    ctx: &HarnessContext<S, F, I>,
    args: &[Value],
) -> Result<CrudMock, HarnessError>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    let request = normalize_list(args, "handle_find_many")?;
    let model_type = ctx
        .factory()
        .lookup_model_for_fixture_name(&request.fixture_name)
        .await?;
    let url = ctx.build_url(&model_type, None).await;

    let (records, status) = if request.succeed {
        let count = request.count.unwrap_or(1);
        (
            ctx.make_fixtures(&request, count).await?,
            ctx.config().success_status,
        )
    } else {
        (Vec::new(), FAILURE_STATUS)
    };

    let endpoint = ctx
        .stub_endpoint_for_http_request(
            &url,
            envelope(&model_type, json!([])),
            StubOptions::method(HttpMethod::Get).with_status(status),
        )
        .await?;

    tracing::debug!(
        model_type = %model_type,
        url = %url,
        records = records.len(),
        status,
        "mocked find many"
    );
    Ok(CrudMock { endpoint, records })
}

/// Mock `POST /<models>` for `name, trait..., options?, succeed?`.
///
/// On success one record is created and returned in the response envelope.
/// On failure nothing is created and the status is 500.
pub async fn handle_create<S, F, I>(
    ctx: &HarnessContext<S, F, I>,
    args: &[Value],
) -> Result<CrudMock, HarnessError>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    let request = normalize(args, "handle_create")?;
    let model_type = ctx
        .factory()
        .lookup_model_for_fixture_name(&request.fixture_name)
        .await?;
    let url = ctx.build_url(&model_type, None).await;

    let (records, body, status) = if request.succeed {
        let record = ctx.make_fixture(&request).await?;
        let body = ctx.build_ajax_http_response(&model_type, &record).await;
        (vec![record], body, ctx.config().success_status)
    } else {
        (Vec::new(), json!({}), FAILURE_STATUS)
    };

    let endpoint = ctx
        .stub_endpoint_for_http_request(
            &url,
            body,
            StubOptions::method(HttpMethod::Post).with_status(status),
        )
        .await?;

    tracing::debug!(model_type = %model_type, url = %url, status, "mocked create");
    Ok(CrudMock { endpoint, records })
}

/// Mock `PUT /<models>/<id>`. The store is left alone.
pub async fn handle_update<S, F, I>(
    ctx: &HarnessContext<S, F, I>,
    model_type: &str,
    id: &str,
    succeed: bool,
) -> Result<CrudMock, HarnessError>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    mock_record_request(ctx, HttpMethod::Put, "handle_update", model_type, id, succeed).await
}

/// Mock `DELETE /<models>/<id>`. The store is left alone.
pub async fn handle_delete<S, F, I>(
    ctx: &HarnessContext<S, F, I>,
    model_type: &str,
    id: &str,
    succeed: bool,
) -> Result<CrudMock, HarnessError>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    mock_record_request(ctx, HttpMethod::Delete, "handle_delete", model_type, id, succeed).await
}

async fn mock_record_request<S, F, I>(
    ctx: &HarnessContext<S, F, I>,
    method: HttpMethod,
    context: &str,
    model_type: &str,
    id: &str,
    succeed: bool,
) -> Result<CrudMock, HarnessError>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    if model_type.is_empty() {
        return Err(HarnessError::invalid_arguments(context, "needs a model type"));
    }
    if id.is_empty() {
        return Err(HarnessError::invalid_arguments(context, "needs a record id"));
    }

    let url = ctx.build_url(model_type, Some(id)).await;
    let status = if succeed { 200 } else { FAILURE_STATUS };

    let endpoint = ctx
        .stub_endpoint_for_http_request(
            &url,
            json!({}),
            StubOptions::method(method).with_status(status),
        )
        .await?;

    tracing::debug!(method = %method, url = %url, status, "mocked record request");
    Ok(CrudMock {
        endpoint,
        records: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::adapters::InMemoryStore;
    use crate::config::HarnessConfig;
    use crate::error::InterceptError;
    use crate::test_utils::{
        test_context, test_context_with_config, test_factory, test_snake_context,
    };

    struct RefusingInterceptor;

    #[async_trait]
    impl RequestInterceptor for RefusingInterceptor {
        async fn register_stub(&self, endpoint: MockEndpoint) -> Result<(), InterceptError> {
            Err(InterceptError::Rejected(endpoint.url))
        }

        async fn clear_all_stubs(&self) -> Result<(), InterceptError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_find_many_loads_records_and_stubs_empty_collection() {
        let (ctx, store, stubs) = test_context();
        let mock = ctx
            .handle_find_many(&[json!("user"), json!(3), json!("silly")])
            .await
            .unwrap();

        assert_eq!(mock.records.len(), 3);
        assert_eq!(store.record_count("user"), 3);
        assert_eq!(mock.endpoint.url, "/users");
        assert_eq!(mock.endpoint.http_method, HttpMethod::Get);

        let response = stubs.intercept(HttpMethod::Get, "/users", None).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({"user": []}));
    }

    #[tokio::test]
    async fn test_find_many_uses_model_type_of_named_fixture() {
        let (ctx, store, _) = test_context();
        let mock = ctx
            .handle_find_many(&[json!("admin"), json!(2)])
            .await
            .unwrap();

        assert_eq!(mock.endpoint.url, "/users");
        assert_eq!(mock.endpoint.response_body, json!({"user": []}));
        assert!(store
            .all("user")
            .iter()
            .all(|r| r.get("type") == Some(&json!("superuser"))));
    }

    #[tokio::test]
    async fn test_find_many_reports_what_the_store_holds() {
        let (ctx, store, _) = test_context();
        let mock = ctx
            .handle_find_many(&[json!("user"), json!(3), json!({"name": "Same"})])
            .await
            .unwrap();

        let reported: Vec<_> = mock
            .records
            .iter()
            .filter_map(FixtureRecord::as_record)
            .cloned()
            .collect();
        assert_eq!(reported.len(), 3);
        assert_eq!(reported, store.all("user"));
    }

    #[tokio::test]
    async fn test_find_many_rejects_shared_id_before_loading() {
        let (ctx, store, stubs) = test_context();
        let err = ctx
            .handle_find_many(&[json!("user"), json!(3), json!({"id": 5})])
            .await
            .unwrap_err();

        assert!(matches!(err, HarnessError::InvalidArguments { .. }));
        assert_eq!(store.len(), 0);
        assert_eq!(stubs.stub_count(), 0);
    }

    #[tokio::test]
    async fn test_refused_stub_propagates_and_teardown_unloads() {
        let store = Arc::new(InMemoryStore::new());
        let ctx = HarnessContext::new(
            store.clone(),
            Arc::new(test_factory()),
            Arc::new(RefusingInterceptor),
            HarnessConfig::default(),
        );

        let err = ctx
            .handle_find_many(&[json!("user"), json!(2)])
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::Intercept(InterceptError::Rejected(_))));
        assert_eq!(store.record_count("user"), 2);

        ctx.reset().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_find_many_failure_loads_nothing() {
        let (ctx, store, _) = test_context();
        let mock = ctx
            .handle_find_many(&[json!("user"), json!(2), json!(false)])
            .await
            .unwrap();

        assert_eq!(mock.endpoint.status, 500);
        assert!(mock.records.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_create_success() {
        let (ctx, store, stubs) = test_context();
        let mock = ctx
            .handle_create(&[json!("user"), json!({"name": "Dude"})])
            .await
            .unwrap();

        assert_eq!(store.record_count("user"), 1);
        let record = mock.records[0].as_record().unwrap().clone();

        let response = stubs.intercept(HttpMethod::Post, "/users", None).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body["user"]["id"], record.id_value);
        assert_eq!(response.body["user"]["name"], json!("Dude"));
    }

    #[tokio::test]
    async fn test_create_failure_creates_nothing_and_returns_500() {
        let (ctx, store, stubs) = test_context();
        let mock = ctx
            .handle_create(&[json!("user"), json!(false)])
            .await
            .unwrap();

        assert!(mock.records.is_empty());
        assert_eq!(store.len(), 0);
        let response = stubs.intercept(HttpMethod::Post, "/users", None).unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.body, json!({}));
    }

    #[tokio::test]
    async fn test_create_failure_ignores_configured_success_status() {
        let config = HarnessConfig {
            success_status: 201,
            ..HarnessConfig::default()
        };
        let (ctx, _, _) = test_context_with_config(config);

        let ok = ctx.handle_create(&[json!("user")]).await.unwrap();
        assert_eq!(ok.endpoint.status, 201);

        let failed = ctx
            .handle_create(&[json!("user"), json!("silly"), json!(false)])
            .await
            .unwrap();
        assert_eq!(failed.endpoint.status, 500);
    }

    #[tokio::test]
    async fn test_create_snake_cases_response_keys() {
        let (ctx, _, _) = test_snake_context();
        let mock = ctx
            .handle_create(&[json!("user"), json!({"firstName": "Dude"})])
            .await
            .unwrap();

        assert_eq!(mock.endpoint.url, "/users");
        let body = &mock.endpoint.response_body["user"];
        assert_eq!(body["first_name"], json!("Dude"));
        assert!(body.get("firstName").is_none());
    }

    #[tokio::test]
    async fn test_handlers_without_name_have_no_side_effects() {
        let (ctx, store, stubs) = test_context();

        assert!(ctx.handle_create(&[]).await.is_err());
        assert!(ctx.handle_create(&[json!(false)]).await.is_err());
        assert!(ctx.handle_find_many(&[json!(2)]).await.is_err());
        assert!(ctx.handle_update("", "7", true).await.is_err());
        assert!(ctx.handle_delete("widget", "", false).await.is_err());

        assert_eq!(store.len(), 0);
        assert_eq!(stubs.stub_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_fixture_propagates_before_stubbing() {
        let (ctx, _, stubs) = test_context();
        let err = ctx.handle_create(&[json!("ghost")]).await.unwrap_err();
        assert!(matches!(err, HarnessError::Factory(_)));
        assert_eq!(stubs.stub_count(), 0);
    }

    #[tokio::test]
    async fn test_update() {
        let (ctx, store, stubs) = test_context();

        let failed = ctx.handle_update("widget", "7", false).await.unwrap();
        assert_eq!(failed.endpoint.url, "/widgets/7");
        assert_eq!(failed.endpoint.http_method, HttpMethod::Put);
        assert_eq!(
            stubs.intercept(HttpMethod::Put, "/widgets/7", None).unwrap().status,
            500
        );

        ctx.handle_update("widget", "7", true).await.unwrap();
        assert_eq!(
            stubs.intercept(HttpMethod::Put, "/widgets/7", None).unwrap().status,
            200
        );
        assert_eq!(stubs.stub_count(), 1);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let (ctx, store, stubs) = test_context();
        ctx.push_record("widget", json!({"id": 7})).await.unwrap();

        let mock = ctx.handle_delete("widget", "7", true).await.unwrap();
        assert_eq!(mock.endpoint.http_method, HttpMethod::Delete);
        assert_eq!(mock.endpoint.response_body, json!({}));

        let response = stubs
            .intercept(HttpMethod::Delete, "/widgets/7", None)
            .unwrap();
        assert_eq!(response.status, 200);
        // The record stays; deleting it is the code under test's job
        assert_eq!(store.record_count("widget"), 1);
    }
}
