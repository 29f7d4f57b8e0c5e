//! Test session lifecycle
//!
//! `setup` binds the harness to an application's services and hands out the
//! context every mock call takes. `teardown` must run after every test: it
//! unloads all records, restarts fixture counters and clears every stub. It is
//! idempotent and a no-op on a session that was never set up.

use std::sync::Arc;

use crate::app::context::HarnessContext;
use crate::config::HarnessConfig;
use crate::domain::ports::{FixtureFactory, RecordStore, RequestInterceptor};
use crate::error::HarnessError;

/// The running application's services the harness binds to
pub struct ServiceContainer<S, F, I>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    store: Arc<S>,
    factory: Arc<F>,
    interceptor: Arc<I>,
}

impl<S, F, I> ServiceContainer<S, F, I>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    pub fn new(store: Arc<S>, factory: Arc<F>, interceptor: Arc<I>) -> Self {
        Self {
            store,
            factory,
            interceptor,
        }
    }

    pub fn lookup_store(&self) -> Arc<S> {
        self.store.clone()
    }

    pub fn lookup_factory(&self) -> Arc<F> {
        self.factory.clone()
    }

    pub fn lookup_interceptor(&self) -> Arc<I> {
        self.interceptor.clone()
    }
}

pub struct TestSession<S, F, I>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    config: HarnessConfig,
    context: Option<HarnessContext<S, F, I>>,
}

impl<S, F, I> TestSession<S, F, I>
where
    S: RecordStore,
    F: FixtureFactory,
    I: RequestInterceptor,
{
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            context: None,
        }
    }

    /// Bind to `app`. A session that is already bound is torn down first so
    /// nothing from the previous binding leaks into the new one.
    pub async fn setup(
        &mut self,
        app: &ServiceContainer<S, F, I>,
    ) -> Result<HarnessContext<S, F, I>, HarnessError> {
        if self.context.is_some() {
            tracing::warn!("setup called on a bound session, tearing down first");
            self.teardown().await?;
        }

        let context = HarnessContext::new(
            app.lookup_store(),
            app.lookup_factory(),
            app.lookup_interceptor(),
            self.config.clone(),
        );
        self.context = Some(context.clone());
        tracing::info!("test session set up");
        Ok(context)
    }

    pub fn is_set_up(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Result<&HarnessContext<S, F, I>, HarnessError> {
        self.context.as_ref().ok_or(HarnessError::NotSetUp)
    }

    /// Return the store and stub registry to a pristine state
    pub async fn teardown(&mut self) -> Result<(), HarnessError> {
        let Some(context) = &self.context else {
            tracing::debug!("teardown on a session that was never set up");
            return Ok(());
        };

        context.reset().await?;
        tracing::info!("test session torn down");
        Ok(())
    }
}
