//! Gas-limit range calculation and validation.
//!
//! All range arithmetic is modular `u64` arithmetic so bounds match other clients bit for bit. A
//! parent gas limit smaller than the bound divisor therefore yields an empty range
//! (`low > high`) rather than a saturated one.

use super::{
    constants::{
        ELASTICITY_MULTIPLIER, GAS_LIMIT_BOUND_DIVISOR, GAS_LIMIT_BOUND_DIVISOR_EIP7782,
        MIN_GAS_LIMIT, MIN_GAS_LIMIT_EIP7782,
    },
    error::GasLimitError,
};
use crate::hardforks::ExperimentalHardforks;
use alloy_consensus::BlockHeader;
use reth_chainspec::{ChainSpec, EthChainSpec, ForkCondition};
use reth_ethereum_forks::{EthereumHardfork, EthereumHardforks};
use tracing::{debug, trace, warn};

/// Bound divisor and minimum gas limit of one protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GasLimitParams {
    /// Denominator bounding the change between consecutive blocks.
    pub bound_divisor: u64,
    /// Lowest gas limit a block may declare.
    pub min_gas_limit: u64,
}

impl GasLimitParams {
    /// Parameters in effect before EIP-7782.
    pub const ETHEREUM: Self = Self::new(GAS_LIMIT_BOUND_DIVISOR, MIN_GAS_LIMIT);
    /// Parameters in effect from EIP-7782 on.
    pub const EIP7782: Self = Self::new(GAS_LIMIT_BOUND_DIVISOR_EIP7782, MIN_GAS_LIMIT_EIP7782);

    /// Creates a new parameter pair.
    pub const fn new(bound_divisor: u64, min_gas_limit: u64) -> Self {
        Self { bound_divisor, min_gas_limit }
    }

    /// Computes the allowed delta (`Δ`) around `parent_gas_limit`.
    ///
    /// Wraps to `u64::MAX` when `parent_gas_limit < bound_divisor`.
    ///
    /// # Panics
    ///
    /// If `bound_divisor` is zero.
    #[inline]
    pub const fn max_diff(&self, parent_gas_limit: u64) -> u64 {
        (parent_gas_limit / self.bound_divisor).wrapping_sub(1)
    }

    /// Inclusive range around an already re-based parent gas limit.
    #[inline]
    pub fn range(&self, parent_gas_limit: u64) -> GasLimitRange {
        let max_diff = self.max_diff(parent_gas_limit);
        GasLimitRange {
            low: parent_gas_limit.wrapping_sub(max_diff).max(self.min_gas_limit),
            high: parent_gas_limit.wrapping_add(max_diff),
        }
    }
}

impl Default for GasLimitParams {
    fn default() -> Self {
        Self::ETHEREUM
    }
}

/// Inclusive range of valid gas limits for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasLimitRange {
    /// Lowest allowed gas limit.
    pub low: u64,
    /// Highest allowed gas limit.
    pub high: u64,
}

impl GasLimitRange {
    /// Returns `true` if `gas_limit` lies within `[low, high]`.
    #[inline]
    pub const fn contains(&self, gas_limit: u64) -> bool {
        gas_limit >= self.low && gas_limit <= self.high
    }

    /// Moves `gas_limit` into the range.
    ///
    /// Unlike [`u64::clamp`] this never panics: on an empty range a value below `low` yields
    /// `low` and anything else yields `high`.
    #[inline]
    pub const fn clamp(&self, gas_limit: u64) -> u64 {
        if gas_limit < self.low {
            return self.low
        }
        if gas_limit > self.high {
            return self.high
        }
        gas_limit
    }

    /// Returns `true` if no gas limit satisfies the range.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.low > self.high
    }
}

/// Chain configuration consulted by the gas-limit rules.
///
/// Fork activation comes from [`ExperimentalHardforks`] (and its [`EthereumHardforks`]
/// supertrait for London), the numeric constants from the methods below.
///
/// [`EthereumHardforks`]: reth_ethereum_forks::EthereumHardforks
pub trait GasLimitSpec: ExperimentalHardforks {
    /// Factor applied to the parent gas limit on the London transition block.
    fn elasticity_multiplier(&self) -> u64 {
        ELASTICITY_MULTIPLIER
    }

    /// Bound divisor and minimum before EIP-7782.
    fn gas_limit_params(&self) -> GasLimitParams {
        GasLimitParams::ETHEREUM
    }

    /// Bound divisor and minimum from EIP-7782 on.
    fn eip7782_gas_limit_params(&self) -> GasLimitParams {
        GasLimitParams::EIP7782
    }

    /// Parameters that apply to a block with the given number and timestamp.
    fn gas_limit_params_at(&self, block_number: u64, timestamp: u64) -> GasLimitParams {
        if self.is_eip7782_active_at(block_number, timestamp) {
            self.eip7782_gas_limit_params()
        } else {
            self.gas_limit_params()
        }
    }
}

impl GasLimitSpec for ChainSpec {
    /// Elasticity of the base-fee params in effect at the London activation.
    fn elasticity_multiplier(&self) -> u64 {
        let params = match self.ethereum_fork_activation(EthereumHardfork::London) {
            ForkCondition::Timestamp(timestamp) => {
                EthChainSpec::base_fee_params_at_timestamp(self, timestamp)
            }
            ForkCondition::Block(block) |
            ForkCondition::TTD { activation_block_number: block, .. } => {
                EthChainSpec::base_fee_params_at_block(self, block)
            }
            ForkCondition::Never => EthChainSpec::base_fee_params_at_timestamp(self, 0),
        };
        u64::try_from(params.elasticity_multiplier).unwrap_or_else(|_| {
            warn!(
                target: "consensus::gas_limit",
                elasticity_multiplier = %params.elasticity_multiplier,
                "Elasticity multiplier exceeds u64, saturating"
            );
            u64::MAX
        })
    }
}

/// One-time re-basing of the parent gas limit on the block that activates a fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasLimitTransition {
    /// Parent gas limit is multiplied by the elasticity multiplier.
    London,
    /// Parent gas limit is halved.
    Eip7782,
}

impl GasLimitTransition {
    /// Transitions in the order they are applied.
    pub const ORDERED: [Self; 2] = [Self::London, Self::Eip7782];

    /// Returns `true` if the fork is active at the given block number and timestamp.
    pub fn is_active<S: GasLimitSpec>(self, spec: &S, block_number: u64, timestamp: u64) -> bool {
        match self {
            Self::London => spec.is_london_active_at_block(block_number),
            Self::Eip7782 => spec.is_eip7782_active_at(block_number, timestamp),
        }
    }

    /// Returns `true` if the fork is inactive at `parent` and active at the given block.
    pub fn activates_at<S, H>(
        self,
        spec: &S,
        parent: &H,
        block_number: u64,
        timestamp: u64,
    ) -> bool
    where
        S: GasLimitSpec,
        H: BlockHeader,
    {
        !self.is_active(spec, parent.number(), parent.timestamp()) &&
            self.is_active(spec, block_number, timestamp)
    }

    /// Re-bases `gas_limit` into the unit used after the fork.
    pub fn rebase<S: GasLimitSpec>(self, spec: &S, gas_limit: u64) -> u64 {
        match self {
            Self::London => gas_limit.wrapping_mul(spec.elasticity_multiplier()),
            Self::Eip7782 => gas_limit / 2,
        }
    }
}

/// Returns the inclusive range of valid gas limits for `header`, taking all fork transitions and
/// the minimum gas limit into account.
pub fn gas_limit_range<S, H>(spec: &S, parent: &H, header: &H) -> GasLimitRange
where
    S: GasLimitSpec,
    H: BlockHeader,
{
    gas_limit_range_at(spec, parent, header.number(), header.timestamp())
}

/// Same as [`gas_limit_range`] for a block that only exists as a number and timestamp yet.
pub fn gas_limit_range_at<S, H>(
    spec: &S,
    parent: &H,
    block_number: u64,
    timestamp: u64,
) -> GasLimitRange
where
    S: GasLimitSpec,
    H: BlockHeader,
{
    let mut parent_gas_limit = parent.gas_limit();
    for transition in GasLimitTransition::ORDERED {
        if transition.activates_at(spec, parent, block_number, timestamp) {
            let rebased = transition.rebase(spec, parent_gas_limit);
            trace!(
                target: "consensus::gas_limit",
                ?transition,
                block_number,
                from = parent_gas_limit,
                to = rebased,
                "Re-based parent gas limit on fork transition"
            );
            parent_gas_limit = rebased;
        }
    }

    let range = spec.gas_limit_params_at(block_number, timestamp).range(parent_gas_limit);
    if range.is_empty() {
        warn!(
            target: "consensus::gas_limit",
            block_number,
            parent_gas_limit,
            low = range.low,
            high = range.high,
            "Empty gas limit range, parent gas limit below bound divisor"
        );
    } else {
        trace!(
            target: "consensus::gas_limit",
            block_number,
            low = range.low,
            high = range.high,
            "Computed gas limit range"
        );
    }
    range
}

/// Verifies the header gas limit against the increase/decrease allowed by its parent.
pub fn verify_gas_limit<S, H>(spec: &S, parent: &H, header: &H) -> Result<(), GasLimitError>
where
    S: GasLimitSpec,
    H: BlockHeader,
{
    let range = gas_limit_range(spec, parent, header);
    if !range.contains(header.gas_limit()) {
        debug!(
            target: "consensus::gas_limit",
            block_number = header.number(),
            gas_limit = header.gas_limit(),
            low = range.low,
            high = range.high,
            "Gas limit out of range"
        );
        return Err(GasLimitError::InvalidGasLimit {
            parent_gas_limit: parent.gas_limit(),
            low: range.low,
            high: range.high,
            gas_limit: header.gas_limit(),
        })
    }
    Ok(())
}

/// Computes the gas limit of the block after `parent`. It aims to keep the gas limit close to
/// `desired_gas_limit`, but within valid bounds.
///
/// Only the number and timestamp of `header` are read.
pub fn calc_gas_limit<S, H>(spec: &S, parent: &H, header: &H, desired_gas_limit: u64) -> u64
where
    S: GasLimitSpec,
    H: BlockHeader,
{
    gas_limit_range(spec, parent, header).clamp(desired_gas_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainspec::GasLimitChainSpec;
    use alloy_consensus::Header;
    use reth_chainspec::ForkCondition;

    fn header(number: u64, timestamp: u64, gas_limit: u64) -> Header {
        Header { number, timestamp, gas_limit, ..Default::default() }
    }

    /// London from block 10, EIP-7782 from timestamp 1_000.
    fn spec() -> GasLimitChainSpec {
        GasLimitChainSpec::dev()
            .with_london(ForkCondition::Block(10))
            .with_eip7782(ForkCondition::Timestamp(1_000))
    }

    #[test]
    fn test_chain_spec_elasticity_read_at_london() {
        use reth_chainspec::{BaseFeeParams, BaseFeeParamsKind};
        use reth_ethereum_forks::{ChainHardforks, Hardfork};

        let chain_spec = ChainSpec {
            hardforks: ChainHardforks::new(vec![
                (EthereumHardfork::Berlin.boxed(), ForkCondition::Block(50)),
                (EthereumHardfork::London.boxed(), ForkCondition::Block(100)),
            ]),
            base_fee_params: BaseFeeParamsKind::Variable(
                vec![
                    (EthereumHardfork::Berlin.boxed(), BaseFeeParams::new(8, 3)),
                    (EthereumHardfork::London.boxed(), BaseFeeParams::new(8, 4)),
                ]
                .into(),
            ),
            ..Default::default()
        };
        assert_eq!(GasLimitSpec::elasticity_multiplier(&chain_spec), 4);
        assert_eq!(GasLimitSpec::elasticity_multiplier(reth_chainspec::MAINNET.as_ref()), 2);

        let parent = header(99, 0, 30_000_000);
        assert_eq!(
            gas_limit_range(&chain_spec, &parent, &header(100, 0, 0)),
            GasLimitRange { low: 119_882_814, high: 120_117_186 }
        );
    }

    #[test]
    fn test_max_diff() {
        assert_eq!(GasLimitParams::ETHEREUM.max_diff(30_000_000), 30_000_000 / 1024 - 1);
        assert_eq!(GasLimitParams::ETHEREUM.max_diff(1023), u64::MAX);
    }

    #[test]
    fn test_range_without_transition() {
        let spec = spec();
        let parent = header(20, 100, 30_000_000);
        let range = gas_limit_range(&spec, &parent, &header(21, 112, 0));
        // 30_000_000 / 1024 = 29_296, minus one
        assert_eq!(range, GasLimitRange { low: 29_970_705, high: 30_029_295 });
    }

    #[test]
    fn test_london_transition_doubles_base() {
        let spec = spec();
        let parent = header(9, 100, 30_000_000);
        let range = gas_limit_range(&spec, &parent, &header(10, 112, 0));
        assert_eq!(range, GasLimitRange { low: 59_941_408, high: 60_058_592 });
    }

    #[test]
    fn test_london_transition_uses_configured_elasticity() {
        let spec = spec().with_elasticity_multiplier(4);
        let parent = header(9, 100, 30_000_000);
        let range = gas_limit_range(&spec, &parent, &header(10, 112, 0));
        // 120_000_000 / 1024 = 117_187, minus one
        assert_eq!(range, GasLimitRange { low: 119_882_814, high: 120_117_186 });

        // no re-basing after the transition block
        let parent = header(10, 112, 30_000_000);
        let range = gas_limit_range(&spec, &parent, &header(11, 124, 0));
        assert_eq!(range, GasLimitRange { low: 29_970_705, high: 30_029_295 });
    }

    #[test]
    fn test_london_rebase_wraps() {
        let spec = spec();
        let parent = header(9, 100, u64::MAX / 2 + 1);
        assert_eq!(GasLimitTransition::London.rebase(&spec, parent.gas_limit), 0);

        // base wraps to zero, so Δ wraps to u64::MAX and the range spans everything above the
        // minimum
        let range = gas_limit_range(&spec, &parent, &header(10, 112, 0));
        assert_eq!(range, GasLimitRange { low: 5_000, high: u64::MAX });
    }

    #[test]
    fn test_london_only_fires_on_transition_block() {
        let spec = spec();
        let plain = GasLimitRange { low: 29_970_705, high: 30_029_295 };
        // both active
        assert_eq!(gas_limit_range(&spec, &header(10, 0, 30_000_000), &header(11, 0, 0)), plain);
        // both inactive
        assert_eq!(gas_limit_range(&spec, &header(8, 0, 30_000_000), &header(9, 0, 0)), plain);
        // active at parent only
        assert_eq!(gas_limit_range(&spec, &header(10, 0, 30_000_000), &header(9, 0, 0)), plain);
    }

    #[test]
    fn test_eip7782_transition_halves_base() {
        let spec = spec();
        let parent = header(20, 999, 30_000_000);
        let range = gas_limit_range(&spec, &parent, &header(21, 1_000, 0));
        // 15_000_000 / 2048 = 7_324, minus one
        assert_eq!(range, GasLimitRange { low: 14_992_677, high: 15_007_323 });
    }

    #[test]
    fn test_eip7782_after_transition_keeps_base() {
        let spec = spec();
        let parent = header(21, 1_000, 30_000_000);
        let range = gas_limit_range(&spec, &parent, &header(22, 1_006, 0));
        // 30_000_000 / 2048 = 14_648, minus one
        assert_eq!(range, GasLimitRange { low: 29_985_353, high: 30_014_647 });
    }

    #[test]
    fn test_both_transitions_on_one_block() {
        let spec = GasLimitChainSpec::dev()
            .with_london(ForkCondition::Block(10))
            .with_eip7782(ForkCondition::Block(10));
        let parent = header(9, 0, 30_000_000);
        let range = gas_limit_range(&spec, &parent, &header(10, 0, 0));
        // 30_000_000 * 2 / 2, then EIP-7782 constants
        assert_eq!(range, GasLimitRange { low: 29_985_353, high: 30_014_647 });
    }

    #[test]
    fn test_params_follow_header_not_parent() {
        let spec = spec();
        // timestamps going backwards: EIP-7782 active at parent only
        let parent = header(20, 1_500, 30_000_000);
        let range = gas_limit_range(&spec, &parent, &header(21, 900, 0));
        assert_eq!(range, GasLimitRange { low: 29_970_705, high: 30_029_295 });
    }

    #[test]
    fn test_minimum_gas_limit_floor() {
        let spec = spec();
        let parent = header(20, 0, 5_002);
        let range = gas_limit_range(&spec, &parent, &header(21, 0, 0));
        assert_eq!(range, GasLimitRange { low: 5_000, high: 5_005 });
    }

    #[test]
    fn test_parent_below_divisor_wraps() {
        let spec = spec();
        let parent = header(20, 0, 1_000);
        let range = gas_limit_range(&spec, &parent, &header(21, 0, 0));
        // Δ wraps to u64::MAX: high wraps to parent - 1, low falls back to the minimum
        assert_eq!(range, GasLimitRange { low: 5_000, high: 999 });
        assert!(range.is_empty());
        assert!(verify_gas_limit(&spec, &parent, &header(21, 0, 1_000)).is_err());
        assert_eq!(calc_gas_limit(&spec, &parent, &header(21, 0, 0), 3_000), 5_000);
        assert_eq!(calc_gas_limit(&spec, &parent, &header(21, 0, 0), 10_000), 999);
    }

    #[test]
    fn test_verify_inclusive_bounds() {
        let spec = spec();
        let parent = header(20, 0, 30_000_000);
        let GasLimitRange { low, high } = gas_limit_range(&spec, &parent, &header(21, 0, 0));

        assert!(verify_gas_limit(&spec, &parent, &header(21, 0, low)).is_ok());
        assert!(verify_gas_limit(&spec, &parent, &header(21, 0, high)).is_ok());
        assert_eq!(
            verify_gas_limit(&spec, &parent, &header(21, 0, low - 1)),
            Err(GasLimitError::InvalidGasLimit {
                parent_gas_limit: 30_000_000,
                low,
                high,
                gas_limit: low - 1
            })
        );
        assert!(verify_gas_limit(&spec, &parent, &header(21, 0, high + 1)).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = GasLimitError::InvalidGasLimit {
            parent_gas_limit: 30_000_000,
            low: 29_970_705,
            high: 30_029_295,
            gas_limit: 40_000_000,
        };
        assert_eq!(
            err.to_string(),
            "invalid gas limit: parent 30000000 -> want [29970705, 30029295], have 40000000"
        );
    }

    #[test]
    fn test_calc_gas_limit_clamps() {
        let spec = spec();
        let parent = header(20, 0, 30_000_000);
        let next = header(21, 0, 0);

        assert_eq!(calc_gas_limit(&spec, &parent, &next, 0), 29_970_705);
        assert_eq!(calc_gas_limit(&spec, &parent, &next, u64::MAX), 30_029_295);
        assert_eq!(calc_gas_limit(&spec, &parent, &next, 30_000_001), 30_000_001);
    }

    #[test]
    fn test_calc_gas_limit_ignores_header_gas_limit() {
        let spec = spec();
        let parent = header(20, 0, 30_000_000);
        assert_eq!(
            calc_gas_limit(&spec, &parent, &header(21, 0, 0), 36_000_000),
            calc_gas_limit(&spec, &parent, &header(21, 0, 36_000_000), 36_000_000)
        );
    }
}
