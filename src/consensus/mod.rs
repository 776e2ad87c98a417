pub mod constants;
pub mod error;
pub mod gas;
pub mod validation;

pub use constants::*;
pub use error::GasLimitError;
pub use gas::{
    calc_gas_limit, gas_limit_range, gas_limit_range_at, verify_gas_limit, GasLimitParams,
    GasLimitRange, GasLimitSpec, GasLimitTransition,
};
pub use validation::{GasLimitBuilderConfig, GasLimitValidator};
