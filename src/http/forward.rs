//! Generic backend forwarding.
//!
//! # Data Flow
//! ```text
//! handler (parsed input)
//!     → forward(dispatcher, op, render)
//!     → dispatcher.call(op)          breaker gate + deadline + outcome
//!     → payload code check           non-000 → that code's envelope
//!     → render(payload)              backend message → JSON view
//!     → ApiResponse::success
//! ```
//!
//! Every route goes through this one function; handlers only differ in the
//! operation they pass and the view they render.

use std::future::Future;
use tonic::Status;

use crate::gateway::Dispatcher;
use crate::http::error::ApiError;
use crate::http::response::ApiResponse;
use crate::resilience::CallContext;
use crate::rpc::messages::Envelope;
use crate::rpc::status::CODE_OK;

/// Call `op` through `dispatcher` and render its payload as a success envelope.
///
/// `render` returns `None` when a successful payload is missing its data.
pub async fn forward<C, Resp, D, Op, Fut, R>(
    dispatcher: &Dispatcher<C>,
    op: Op,
    render: R,
) -> Result<ApiResponse<D>, ApiError>
where
    C: Clone,
    Op: FnOnce(C, CallContext) -> Fut,
    Fut: Future<Output = Result<Resp, Status>>,
    Resp: Envelope,
    R: FnOnce(Resp) -> Option<D>,
{
    let response = dispatcher.call(op).await?;

    if response.code() != CODE_OK {
        tracing::debug!(
            backend = %dispatcher.name(),
            code = %response.code(),
            message = %response.message(),
            "Backend reported application error"
        );
        return Err(ApiError::application(response.code(), response.message()));
    }

    render(response).map(ApiResponse::success).ok_or_else(|| {
        tracing::error!(backend = %dispatcher.name(), "Backend success response carried no data");
        ApiError::internal("backend returned an empty response")
    })
}
