use async_trait::async_trait;
use nuve_core::Result;
use nuve_core::{Context, ProvideCredential, ProvideCredentialChain};

use crate::credential::Credential;
use crate::provide_credential::EnvCredentialProvider;

/// DefaultCredentialProvider resolves the Nuve service id and key.
///
/// On its own it only reads `NUVE_SERVICE_ID` and `NUVE_SERVICE_KEY`. A
/// client built from a `Config` that names a service puts a
/// [`StaticCredentialProvider`](crate::StaticCredentialProvider) in front, so
/// explicit credentials win over the environment:
///
/// 1. Credentials from `Config` (when set)
/// 2. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a provider that only reads the environment.
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Replace the whole lookup order, e.g. to drop the environment lookup.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Consult `provider` before the environment.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nuve_mauth::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::new()
    ///     .push_front(StaticCredentialProvider::new("svc1", "c2VydmljZS1rZXk"));
    /// ```
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
