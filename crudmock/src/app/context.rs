//! Harness context
//!
//! The store, fixture engine and interceptor a test is bound to, plus the
//! harness configuration. Produced by `TestSession::setup` and passed to every
//! mock call; cloning it shares the same collaborators.

use std::sync::Arc;

use serde_json::Value;

use crate::app::argument_normalizer::{normalize, normalize_list};
use crate::app::crud_handlers::{self, CrudMock};
use crate::app::{endpoint_resolver, payload_shaper, stub_registrar};
use crate::config::HarnessConfig;
use crate::domain::entities::{
    FixtureRecord, MockEndpoint, MockRequestDescriptor, NamingConvention, Record, StubOptions,
};
use crate::domain::ports::{FixtureFactory, RecordStore, RequestInterceptor};
use crate::error::HarnessError;

pub struct HarnessContext<S, F, I>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    store: Arc<S>,
    factory: Arc<F>,
    interceptor: Arc<I>,
    config: HarnessConfig,
}

impl<S, F, I> Clone for HarnessContext<S, F, I>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            factory: self.factory.clone(),
            interceptor: self.interceptor.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, F, I> HarnessContext<S, F, I>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    pub fn new(store: Arc<S>, factory: Arc<F>, interceptor: Arc<I>, config: HarnessConfig) -> Self {
        Self {
            store,
            factory,
            interceptor,
            config,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn factory(&self) -> &Arc<F> {
        &self.factory
    }

    pub fn interceptor(&self) -> &Arc<I> {
        &self.interceptor
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    // --- Store proxies ---

    pub async fn find(&self, model_type: &str, id: &str) -> Result<Record, HarnessError> {
        Ok(self.store.find(model_type, id).await?)
    }

    pub async fn push_payload(
        &self,
        model_type: &str,
        payload: Value,
    ) -> Result<Vec<Record>, HarnessError> {
        Ok(self.store.push_payload(model_type, payload).await?)
    }

    pub async fn push_record(&self, model_type: &str, payload: Value) -> Result<Record, HarnessError> {
        let Value::Object(payload) = payload else {
            return Err(HarnessError::invalid_arguments(
                "push_record",
                format!("payload for '{}' must be an object", model_type),
            ));
        };
        Ok(self.store.push(model_type, payload).await?)
    }

    pub async fn use_fixture_adapter(&self) {
        self.store.use_fixture_adapter().await;
        tracing::info!("switched store to the fixture adapter");
    }

    pub async fn using_active_model_serializer(&self, model_type: &str) -> bool {
        self.store.serializer_for(model_type).await == NamingConvention::SnakeCase
    }

    pub async fn build_url(&self, model_type: &str, id: Option<&str>) -> String {
        endpoint_resolver::resolve_url(self.store.as_ref(), model_type, id).await
    }

    // --- Fixtures ---

    /// Build one fixture from `name, trait..., options?` and load it
    pub async fn make(&self, args: &[Value]) -> Result<FixtureRecord, HarnessError> {
        let request = normalize(args, "make")?;
        self.make_fixture(&request).await
    }

    /// Build `count` fixtures from `name, count?, trait..., options?` and load them
    pub async fn make_list(&self, args: &[Value]) -> Result<Vec<FixtureRecord>, HarnessError> {
        let request = normalize_list(args, "make_list")?;
        self.make_fixtures(&request, request.count.unwrap_or(1)).await
    }

    pub async fn make_fixture(
        &self,
        request: &MockRequestDescriptor,
    ) -> Result<FixtureRecord, HarnessError> {
        let model_type = self
            .factory
            .lookup_model_for_fixture_name(&request.fixture_name)
            .await?;
        let payload = self.factory.build(request).await?;
        self.materialize(&model_type, payload).await
    }

    pub async fn make_fixtures(
        &self,
        request: &MockRequestDescriptor,
        count: usize,
    ) -> Result<Vec<FixtureRecord>, HarnessError> {
        let model_type = self
            .factory
            .lookup_model_for_fixture_name(&request.fixture_name)
            .await?;
        let payloads = self.factory.build_list(request, count).await?;

        let mut records = Vec::with_capacity(payloads.len());
        for payload in payloads {
            records.push(self.materialize(&model_type, payload).await?);
        }
        Ok(records)
    }

    /// Records when the store simulates a backend, raw fixtures otherwise
    async fn materialize(
        &self,
        model_type: &str,
        payload: serde_json::Map<String, Value>,
    ) -> Result<FixtureRecord, HarnessError> {
        if self.store.adapter_for(model_type).await.simulate_remote_response {
            let record = self.store.push(model_type, payload).await?;
            Ok(FixtureRecord::Record(record))
        } else {
            self.store.load_fixture(model_type, payload.clone()).await;
            Ok(FixtureRecord::Json(payload))
        }
    }

    // --- Responses and stubs ---

    /// Envelope for a single-resource response, keys cased for the model's API
    pub async fn build_ajax_http_response(&self, model_type: &str, fixture: &FixtureRecord) -> Value {
        let naming = self.store.serializer_for(model_type).await;
        payload_shaper::shape(model_type, naming, fixture)
    }

    pub async fn stub_endpoint_for_http_request(
        &self,
        url: &str,
        response_body: Value,
        options: StubOptions,
    ) -> Result<MockEndpoint, HarnessError> {
        Ok(stub_registrar::register_stub(self.interceptor.as_ref(), url, response_body, options).await?)
    }

    // --- CRUD mocks ---

    pub async fn handle_find_many(&self, args: &[Value]) -> Result<CrudMock, HarnessError> {
        crud_handlers::handle_find_many(self, args).await
    }

    pub async fn handle_create(&self, args: &[Value]) -> Result<CrudMock, HarnessError> {
        crud_handlers::handle_create(self, args).await
    }

    pub async fn handle_update(
        &self,
        model_type: &str,
        id: &str,
        succeed: bool,
    ) -> Result<CrudMock, HarnessError> {
        crud_handlers::handle_update(self, model_type, id, succeed).await
    }

    pub async fn handle_delete(
        &self,
        model_type: &str,
        id: &str,
        succeed: bool,
    ) -> Result<CrudMock, HarnessError> {
        crud_handlers::handle_delete(self, model_type, id, succeed).await
    }

    /// Unload every record, restart fixture counters, restore the store's
    /// configured adapter and drop every stub. Every step runs even if an
    /// earlier one fails; the first error is returned.
    pub async fn reset(&self) -> Result<(), HarnessError> {
        let models = self.factory.reset_models(self.store.as_ref()).await;
        self.store.reset_adapters().await;
        let stubs = self.interceptor.clear_all_stubs().await;
        models?;
        stubs?;
        Ok(())
    }
}
