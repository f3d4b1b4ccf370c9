//! Mock transport for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::errors::ApiResult;
use crate::repository::{ApiRequest, ApiTransport, RawResponse};

mock! {
    pub Transport {}

    #[async_trait]
    impl ApiTransport for Transport {
        async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse>;
    }
}
