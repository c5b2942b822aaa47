use async_trait::async_trait;
use mpic_caa::CaaChecker;
use mpic_dcv::DcvChecker;
use mpic_types::{CheckRequest, CheckResponse, Perspective};

/// Stands in for the network hop to a remote perspective by invoking the
/// real checkers in-process. A genuine deployment would replace this with
/// an RPC client to the perspective's own worker; the coordinator's
/// `RemoteCaller` trait is exactly the seam that makes the swap possible.
pub struct InProcessRemoteCaller {
    caa_checker: CaaChecker,
    dcv_checker: DcvChecker,
}

impl InProcessRemoteCaller {
    pub fn new(caa_checker: CaaChecker, dcv_checker: DcvChecker) -> Self {
        Self {
            caa_checker,
            dcv_checker,
        }
    }
}

#[async_trait]
impl mpic_coordinator::RemoteCaller for InProcessRemoteCaller {
    async fn call(
        &self,
        perspective: &Perspective,
        request: &CheckRequest,
    ) -> anyhow::Result<CheckResponse> {
        let response = match request {
            CheckRequest::Caa {
                target,
                caa_check_parameters,
            } => {
                self.caa_checker
                    .check_caa(&perspective.code, target, caa_check_parameters)
                    .await
            }
            CheckRequest::Dcv {
                target,
                dcv_check_parameters,
            } => {
                let method = dcv_check_parameters
                    .validation_method
                    .ok_or_else(|| anyhow::anyhow!("dcv_check_parameters.validation_method is required"))?;
                self.dcv_checker
                    .check_dcv(&perspective.code, target, method, dcv_check_parameters)
                    .await
            }
        };
        Ok(response)
    }
}
