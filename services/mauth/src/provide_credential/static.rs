use crate::Credential;
use async_trait::async_trait;
use nuve_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider returns the service id and key it was built with.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider.
    pub fn new(service_id: &str, service_key: &str) -> Self {
        Self {
            credential: Credential::new(service_id, service_key),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
