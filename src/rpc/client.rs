//! Unary gRPC calls without generated stubs.

use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::metadata::errors::InvalidMetadataValue;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::Channel;
use tonic::{Request, Status};

/// Issue one unary call on `channel` to the fully qualified method `path`.
pub(crate) async fn unary<Req, Resp>(
    channel: Channel,
    path: &'static str,
    request: Request<Req>,
) -> Result<Resp, Status>
where
    Req: prost::Message + Send + Sync + 'static,
    Resp: prost::Message + Default + Send + Sync + 'static,
{
    let mut grpc = tonic::client::Grpc::new(channel);
    grpc.ready()
        .await
        .map_err(|e| Status::unavailable(format!("service was not ready: {}", e)))?;

    let codec: ProstCodec<Req, Resp> = ProstCodec::default();
    grpc.unary(request, PathAndQuery::from_static(path), codec)
        .await
        .map(tonic::Response::into_inner)
}

/// `Bearer <token>` as an outgoing `authorization` value.
pub fn bearer_metadata(token: &str) -> Result<MetadataValue<Ascii>, InvalidMetadataValue> {
    format!("Bearer {}", token).parse()
}

/// Attach `authorization` metadata to an outgoing request.
pub fn with_authorization<M>(mut request: Request<M>, value: MetadataValue<Ascii>) -> Request<M> {
    request.metadata_mut().insert("authorization", value);
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_metadata() {
        let value = bearer_metadata("abc.def").unwrap();
        let request = with_authorization(Request::new(()), value);
        let value = request.metadata().get("authorization").unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer abc.def");
    }

    #[test]
    fn test_bearer_rejects_control_characters() {
        assert!(bearer_metadata("bad\ntoken").is_err());
    }
}
