//! Tower integration.
//!
//! - [`Pipeline`] is a `tower::Service<MailItem>` whose future is always
//!   immediately ready
//! - [`RealMailService`] is a `tower::Service<MailItem>` that never fails
//! - [`StageLayer`] puts any [`Stage`] in front of an existing service,
//!   short-circuiting on the first [`StageError`]

use std::{
    convert::Infallible,
    future::{Future, Ready, ready},
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tower::{Layer, Service};

use crate::{MailItem, Pipeline, PipelineHook, RealMailService, Stage, StageError};

/// Tower `Service` implementation for `Pipeline`.
///
/// Runs synchronously inside `call`; the returned future is already resolved.
impl<HK: PipelineHook> Service<MailItem> for Pipeline<HK> {
    type Response = MailItem;
    type Error = StageError;
    type Future = Ready<Result<MailItem, StageError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: MailItem) -> Self::Future {
        ready(self.run(req))
    }
}

impl Service<MailItem> for RealMailService {
    type Response = MailItem;
    type Error = Infallible;
    type Future = Ready<Result<MailItem, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: MailItem) -> Self::Future {
        ready(Ok(req))
    }
}

/// Tower `Service` wrapper that runs a stage before the inner service.
///
/// The stage's output is forwarded to the inner service. A stage error is
/// returned without calling the inner service at all.
pub struct StageService<S, T> {
    stage: Arc<S>,
    inner: T,
}

impl<S, T: Clone> Clone for StageService<S, T> {
    fn clone(&self) -> Self {
        Self {
            stage: Arc::clone(&self.stage),
            inner: self.inner.clone(),
        }
    }
}

impl<S, T> Service<MailItem> for StageService<S, T>
where
    S: Stage,
    T: Service<MailItem, Response = MailItem> + Clone + Send + 'static,
    T::Error: Into<tower::BoxError>,
    T::Future: Send + 'static,
{
    type Response = MailItem;
    type Error = tower::BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<MailItem, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, req: MailItem) -> Self::Future {
        let processed = self.stage.process(req);
        // The instance polled ready in `poll_ready` must be the one called.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let item = processed.map_err(tower::BoxError::from)?;
            inner.call(item).await.map_err(Into::<tower::BoxError>::into)
        })
    }
}

/// Tower `Layer` that applies [`StageService`] to a service stack.
///
/// The stage is shared between every service the layer produces, so stateful
/// stages such as [`Thief`](crate::Thief) keep one running total.
pub struct StageLayer<S> {
    stage: Arc<S>,
}

impl<S> StageLayer<S> {
    pub fn new(stage: S) -> Self {
        Self {
            stage: Arc::new(stage),
        }
    }

    /// Build a layer around a stage that is already shared elsewhere.
    pub fn shared(stage: Arc<S>) -> Self {
        Self { stage }
    }
}

impl<S> Clone for StageLayer<S> {
    fn clone(&self) -> Self {
        Self {
            stage: Arc::clone(&self.stage),
        }
    }
}

impl<S, T> Layer<T> for StageLayer<S> {
    type Service = StageService<S, T>;

    fn layer(&self, inner: T) -> Self::Service {
        StageService {
            stage: Arc::clone(&self.stage),
            inner,
        }
    }
}
