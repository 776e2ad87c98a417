//! Gas-limit checks wired for the node's header validation and payload building.

use super::{
    constants::DEFAULT_DESIRED_GAS_LIMIT,
    gas::{calc_gas_limit, gas_limit_range, gas_limit_range_at, verify_gas_limit},
    GasLimitRange, GasLimitSpec,
};
use alloy_consensus::BlockHeader;
use reth_consensus::ConsensusError;
use std::sync::Arc;

/// Validates header gas limits against their parent.
#[derive(Debug)]
pub struct GasLimitValidator<ChainSpec> {
    chain_spec: Arc<ChainSpec>,
}

impl<ChainSpec> Clone for GasLimitValidator<ChainSpec> {
    fn clone(&self) -> Self {
        Self { chain_spec: self.chain_spec.clone() }
    }
}

impl<ChainSpec> GasLimitValidator<ChainSpec>
where
    ChainSpec: GasLimitSpec,
{
    /// Create a new gas limit validator
    pub fn new(chain_spec: Arc<ChainSpec>) -> Self {
        Self { chain_spec }
    }

    /// Returns the chain spec.
    pub fn chain_spec(&self) -> &Arc<ChainSpec> {
        &self.chain_spec
    }

    /// Inclusive range of gas limits `header` may declare.
    pub fn gas_limit_range<H: BlockHeader>(&self, header: &H, parent: &H) -> GasLimitRange {
        gas_limit_range(self.chain_spec.as_ref(), parent, header)
    }

    /// Verify the header gas limit against its parent.
    pub fn validate_header_against_parent<H: BlockHeader>(
        &self,
        header: &H,
        parent: &H,
    ) -> Result<(), ConsensusError> {
        if let Err(err) = verify_gas_limit(self.chain_spec.as_ref(), parent, header) {
            tracing::warn!(
                "Failed to validate gas limit, block_number: {}, err: {}",
                header.number(),
                err
            );
            return Err(err.into())
        }
        Ok(())
    }

    /// Gas limit for the block built on top of `parent` at `timestamp`, as close to
    /// `desired_gas_limit` as the range allows.
    pub fn gas_limit_for_next_block<H: BlockHeader>(
        &self,
        parent: &H,
        timestamp: u64,
        desired_gas_limit: u64,
    ) -> u64 {
        let block_number = parent.number().saturating_add(1);
        gas_limit_range_at(self.chain_spec.as_ref(), parent, block_number, timestamp)
            .clamp(desired_gas_limit)
    }
}

/// Gas-limit settings of a block producer.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct GasLimitBuilderConfig {
    /// Desired gas limit.
    pub desired_gas_limit: u64,
}

impl GasLimitBuilderConfig {
    /// Create new builder config.
    pub const fn new() -> Self {
        Self { desired_gas_limit: DEFAULT_DESIRED_GAS_LIMIT }
    }

    /// Set desired gas limit.
    pub const fn with_gas_limit(mut self, desired_gas_limit: u64) -> Self {
        self.desired_gas_limit = desired_gas_limit;
        self
    }

    /// Returns the gas limit for `header` based on its parent and the desired gas limit.
    pub fn gas_limit<S, H>(&self, chain_spec: &S, parent: &H, header: &H) -> u64
    where
        S: GasLimitSpec,
        H: BlockHeader,
    {
        calc_gas_limit(chain_spec, parent, header, self.desired_gas_limit)
    }
}

impl Default for GasLimitBuilderConfig {
    fn default() -> Self {
        Self::new()
    }
}
