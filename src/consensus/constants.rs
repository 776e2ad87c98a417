//! Gas-limit protocol constants.

/// Bound divisor of the gas limit, used in update calculations before EIP-7782.
pub const GAS_LIMIT_BOUND_DIVISOR: u64 = 1024;
/// Minimum the gas limit may ever be before EIP-7782.
pub const MIN_GAS_LIMIT: u64 = 5_000;

/// Bound divisor starting from EIP-7782. Blocks come twice as often, so each block may move the
/// gas limit half as far.
pub const GAS_LIMIT_BOUND_DIVISOR_EIP7782: u64 = 2 * GAS_LIMIT_BOUND_DIVISOR;
/// Minimum gas limit starting from EIP-7782.
pub const MIN_GAS_LIMIT_EIP7782: u64 = MIN_GAS_LIMIT / 2;

/// Elasticity multiplier applied to the parent gas limit on the London transition block.
pub const ELASTICITY_MULTIPLIER: u64 = 2;

/// Gas limit a block producer aims for when none is configured.
pub const DEFAULT_DESIRED_GAS_LIMIT: u64 = 36_000_000;
