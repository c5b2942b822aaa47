use async_trait::async_trait;
use mpic_types::{CheckRequest, CheckResponse, Perspective};

/// Indirection over however a check actually reaches a remote perspective
/// (an RPC hop, an HTTPS call to a worker in another region, or — for
/// tests and the demo CLI — an in-process call straight into `mpic-caa`/
/// `mpic-dcv`). The coordinator never depends on a concrete transport.
#[async_trait]
pub trait RemoteCaller: Send + Sync {
    async fn call(
        &self,
        perspective: &Perspective,
        request: &CheckRequest,
    ) -> anyhow::Result<CheckResponse>;
}
