//! Gas-limit range rules for Ethereum-style block validation and payload building.
//!
//! The allowed gas limit of a block is derived from its parent's gas limit, re-based on the
//! block that activates London (elasticity) and on the block that activates EIP-7782.
pub mod chainspec;
pub mod consensus;
pub mod hardforks;

pub use chainspec::GasLimitChainSpec;
pub use consensus::{
    calc_gas_limit, gas_limit_range, verify_gas_limit, GasLimitError, GasLimitParams,
    GasLimitRange, GasLimitSpec,
};
pub use hardforks::{experimental::ExperimentalHardfork, ExperimentalHardforks};
