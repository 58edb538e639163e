use async_trait::async_trait;
use tracing::warn;

/// Finds the account that deployed a contract.
#[async_trait]
pub trait DeployerResolver: Send + Sync {
    async fn resolve(&self, chain_id: u64, contract: &str) -> Option<String>;
}

/// Returns one configured address for every contract. There is no real
/// lookup behind this; swap in an RPC or explorer backed resolver when one
/// exists.
#[derive(Debug, Clone)]
pub struct MockDeployerResolver {
    address: String,
}

impl MockDeployerResolver {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

#[async_trait]
impl DeployerResolver for MockDeployerResolver {
    async fn resolve(&self, chain_id: u64, contract: &str) -> Option<String> {
        warn!(chain_id, contract, deployer = %self.address, "deployer.mocked");
        Some(self.address.clone())
    }
}
