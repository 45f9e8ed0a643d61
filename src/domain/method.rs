//! Handler contract for registered remote methods
//!
//! Every handler implements [`RemoteMethod`]. Plain closures are adapted
//! with [`FnMethod`], closures over typed parameters with [`TypedMethod`],
//! so the registry only ever stores one shape.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::marker::PhantomData;

use super::call::MethodCall;

/// Result returned by a handler
pub type MethodResult = anyhow::Result<Value>;

/// A locally registered unit of behavior invoked by name.
///
/// Handlers receive the whole call envelope. Returning `Err` is reported
/// to the remote caller as a generic execution failure; the error itself
/// only reaches the registry's diagnostic sink.
#[async_trait]
pub trait RemoteMethod: Send + Sync + 'static {
    /// Invoke the method
    async fn call_method(&self, call: &MethodCall) -> MethodResult;
}

/// Adapter turning an async closure into a [`RemoteMethod`]
pub struct FnMethod<F> {
    handler: F,
}

impl<F, Fut> FnMethod<F>
where
    F: Fn(MethodCall) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MethodResult> + Send + 'static,
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl<F, Fut> RemoteMethod for FnMethod<F>
where
    F: Fn(MethodCall) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MethodResult> + Send + 'static,
{
    async fn call_method(&self, call: &MethodCall) -> MethodResult {
        (self.handler)(call.clone()).await
    }
}

/// Adapter that decodes `parameter` into `P` and encodes the returned `R`
pub struct TypedMethod<F, P, R> {
    handler: F,
    _phantom: PhantomData<fn(P) -> R>,
}

impl<F, P, R, Fut> TypedMethod<F, P, R>
where
    F: Fn(P) -> Fut + Send + Sync + 'static,
    P: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<F, P, R, Fut> RemoteMethod for TypedMethod<F, P, R>
where
    F: Fn(P) -> Fut + Send + Sync + 'static,
    P: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
{
    async fn call_method(&self, call: &MethodCall) -> MethodResult {
        let parameter: P = serde_json::from_value(call.parameter.clone())?;
        let output = (self.handler)(parameter).await?;
        Ok(serde_json::to_value(output)?)
    }
}
