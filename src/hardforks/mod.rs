//! Hard forks that change gas-limit accounting on top of the Ethereum schedule.
use reth_chainspec::{ChainSpec, ForkCondition, Hardforks};
use reth_ethereum_forks::EthereumHardforks;

pub mod experimental;

use experimental::ExperimentalHardfork;

/// Extends [`EthereumHardforks`] with forks that are not part of the Ethereum schedule yet.
pub trait ExperimentalHardforks: EthereumHardforks {
    /// Retrieves [`ForkCondition`] by an [`ExperimentalHardfork`]. If `fork` is not present,
    /// returns [`ForkCondition::Never`].
    fn experimental_fork_activation(&self, fork: ExperimentalHardfork) -> ForkCondition;

    /// Convenience method to check if [`ExperimentalHardfork::Eip7782`] is active at the given
    /// block number and timestamp.
    ///
    /// The fork may be scheduled either by block or by timestamp, so both are consulted.
    fn is_eip7782_active_at(&self, block_number: u64, timestamp: u64) -> bool {
        let condition = self.experimental_fork_activation(ExperimentalHardfork::Eip7782);
        condition.active_at_block(block_number) || condition.active_at_timestamp(timestamp)
    }
}

impl ExperimentalHardforks for ChainSpec {
    fn experimental_fork_activation(&self, fork: ExperimentalHardfork) -> ForkCondition {
        self.fork(fork)
    }
}
