//! Domain layer - call envelope, results and the handler contract
//!
//! This module contains the types every other layer speaks in: the
//! incoming [`MethodCall`], the normalized [`CallResult`], the
//! [`RemoteMethod`] handler trait and the [`DiagnosticSink`] contract.

pub mod call;
pub mod diagnostics;
pub mod method;
pub mod result;

pub use call::MethodCall;
pub use diagnostics::{DiagnosticSink, FanoutDiagnostics, NoopDiagnostics};
pub use method::{FnMethod, MethodResult, RemoteMethod, TypedMethod};
pub use result::{CallFailure, CallResult, FailureKind};
