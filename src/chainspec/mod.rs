//! Chain specification carrying the fork schedule and constants of the gas-limit rules.
use crate::{
    consensus::{GasLimitParams, GasLimitSpec, ELASTICITY_MULTIPLIER},
    hardforks::{experimental::ExperimentalHardfork, ExperimentalHardforks},
};
use alloy_chains::Chain;
use reth_chainspec::ForkCondition;
use reth_ethereum_forks::{ChainHardforks, EthereumHardfork, EthereumHardforks};

pub mod parser;

pub use parser::ChainSpecError;

/// Gas-limit chain spec type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasLimitChainSpec {
    /// Chain the schedule belongs to.
    pub chain: Chain,
    /// Ethereum and experimental hardforks.
    pub hardforks: ChainHardforks,
    /// Factor applied to the parent gas limit on the London transition block.
    pub elasticity_multiplier: u64,
    /// Bound divisor and minimum before EIP-7782.
    pub gas_limit_params: GasLimitParams,
    /// Bound divisor and minimum from EIP-7782 on.
    pub eip7782_gas_limit_params: GasLimitParams,
}

impl GasLimitChainSpec {
    /// Creates a spec for `chain` with the default constants.
    pub fn new(chain: Chain, hardforks: ChainHardforks) -> Self {
        Self {
            chain,
            hardforks,
            elasticity_multiplier: ELASTICITY_MULTIPLIER,
            gas_limit_params: GasLimitParams::ETHEREUM,
            eip7782_gas_limit_params: GasLimitParams::EIP7782,
        }
    }

    /// Ethereum mainnet.
    pub fn mainnet() -> Self {
        Self::new(Chain::mainnet(), ExperimentalHardfork::mainnet())
    }

    /// Sepolia testnet.
    pub fn sepolia() -> Self {
        Self::new(Chain::sepolia(), ExperimentalHardfork::sepolia())
    }

    /// Dev network, London and EIP-7782 active from genesis.
    pub fn dev() -> Self {
        Self::new(Chain::dev(), ExperimentalHardfork::dev())
    }

    /// Sets the London activation.
    pub fn with_london(mut self, condition: ForkCondition) -> Self {
        self.hardforks.insert(EthereumHardfork::London, condition);
        self
    }

    /// Sets the EIP-7782 activation.
    pub fn with_eip7782(mut self, condition: ForkCondition) -> Self {
        self.hardforks.insert(ExperimentalHardfork::Eip7782, condition);
        self
    }

    /// Sets the elasticity multiplier.
    pub const fn with_elasticity_multiplier(mut self, elasticity_multiplier: u64) -> Self {
        self.elasticity_multiplier = elasticity_multiplier;
        self
    }

    /// Sets the pre-EIP-7782 bound divisor and minimum.
    ///
    /// # Panics
    ///
    /// If `params.bound_divisor` is zero.
    pub const fn with_gas_limit_params(mut self, params: GasLimitParams) -> Self {
        assert!(params.bound_divisor != 0, "gas limit bound divisor must not be zero");
        self.gas_limit_params = params;
        self
    }

    /// Sets the EIP-7782 bound divisor and minimum.
    ///
    /// # Panics
    ///
    /// If `params.bound_divisor` is zero.
    pub const fn with_eip7782_gas_limit_params(mut self, params: GasLimitParams) -> Self {
        assert!(params.bound_divisor != 0, "EIP-7782 gas limit bound divisor must not be zero");
        self.eip7782_gas_limit_params = params;
        self
    }
}

impl Default for GasLimitChainSpec {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl EthereumHardforks for GasLimitChainSpec {
    fn ethereum_fork_activation(&self, fork: EthereumHardfork) -> ForkCondition {
        self.hardforks.fork(fork)
    }
}

impl ExperimentalHardforks for GasLimitChainSpec {
    fn experimental_fork_activation(&self, fork: ExperimentalHardfork) -> ForkCondition {
        self.hardforks.fork(fork)
    }
}

impl GasLimitSpec for GasLimitChainSpec {
    fn elasticity_multiplier(&self) -> u64 {
        self.elasticity_multiplier
    }

    fn gas_limit_params(&self) -> GasLimitParams {
        self.gas_limit_params
    }

    fn eip7782_gas_limit_params(&self) -> GasLimitParams {
        self.eip7782_gas_limit_params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_london_activation() {
        let spec = GasLimitChainSpec::mainnet();
        assert!(!spec.is_london_active_at_block(12_964_999));
        assert!(spec.is_london_active_at_block(12_965_000));
        assert!(!spec.is_eip7782_active_at(u64::MAX, u64::MAX));
    }

    #[test]
    fn test_builder_overrides() {
        let spec = GasLimitChainSpec::mainnet()
            .with_eip7782(ForkCondition::Timestamp(1_800_000_000))
            .with_elasticity_multiplier(4)
            .with_gas_limit_params(GasLimitParams::new(512, 10_000));

        assert!(!spec.is_eip7782_active_at(30_000_000, 1_799_999_999));
        assert!(spec.is_eip7782_active_at(30_000_000, 1_800_000_000));
        assert_eq!(GasLimitSpec::elasticity_multiplier(&spec), 4);
        assert_eq!(spec.gas_limit_params_at(30_000_000, 0), GasLimitParams::new(512, 10_000));
        assert_eq!(spec.gas_limit_params_at(30_000_000, 1_800_000_000), GasLimitParams::EIP7782);
    }

    #[test]
    #[should_panic(expected = "gas limit bound divisor must not be zero")]
    fn test_zero_bound_divisor_rejected() {
        let _ = GasLimitChainSpec::mainnet().with_gas_limit_params(GasLimitParams::new(0, 5_000));
    }

    #[test]
    #[should_panic(expected = "EIP-7782 gas limit bound divisor must not be zero")]
    fn test_zero_eip7782_bound_divisor_rejected() {
        let _ = GasLimitChainSpec::mainnet()
            .with_eip7782_gas_limit_params(GasLimitParams::new(0, 2_500));
    }

    #[test]
    fn test_eip7782_by_block() {
        let spec = GasLimitChainSpec::sepolia().with_eip7782(ForkCondition::Block(100));
        assert!(!spec.is_eip7782_active_at(99, u64::MAX));
        assert!(spec.is_eip7782_active_at(100, 0));
    }
}
