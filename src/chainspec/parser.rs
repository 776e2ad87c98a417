//! Builds a [`GasLimitChainSpec`] from a genesis file.
//!
//! London comes from the standard `londonBlock` field. The remaining settings are read from
//! extra `config` fields:
//!
//! | field                         | meaning                               |
//! |-------------------------------|---------------------------------------|
//! | `eip7782Block`                | EIP-7782 activation block             |
//! | `eip7782Time`                 | EIP-7782 activation timestamp         |
//! | `elasticityMultiplier`        | London re-basing factor               |
//! | `gasLimitBoundDivisor`        | bound divisor before EIP-7782         |
//! | `minGasLimit`                 | minimum gas limit before EIP-7782     |
//! | `eip7782GasLimitBoundDivisor` | bound divisor from EIP-7782 on        |
//! | `eip7782MinGasLimit`          | minimum gas limit from EIP-7782 on    |
use super::GasLimitChainSpec;
use crate::{consensus::GasLimitParams, hardforks::experimental::ExperimentalHardfork};
use alloy_chains::Chain;
use alloy_genesis::Genesis;
use reth_chainspec::ForkCondition;
use reth_ethereum_forks::{ChainHardforks, EthereumHardfork, Hardfork};
use std::path::Path;
use tracing::debug;

/// Errors raised while loading a chain spec.
#[derive(Debug, thiserror::Error)]
pub enum ChainSpecError {
    /// The genesis file could not be read.
    #[error("failed to read genesis file: {0}")]
    Io(#[from] std::io::Error),
    /// The genesis is not valid JSON.
    #[error("failed to deserialize genesis: {0}")]
    Json(#[from] serde_json::Error),
    /// A config field has the wrong type.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidField {
        /// Name of the field.
        field: &'static str,
        /// Deserialization failure.
        reason: String,
    },
    /// A bound divisor of zero would make every range computation divide by zero.
    #[error("config field `{0}` must not be zero")]
    ZeroBoundDivisor(&'static str),
}

impl GasLimitChainSpec {
    /// Builds the spec from a parsed genesis.
    pub fn from_genesis(genesis: &Genesis) -> Result<Self, ChainSpecError> {
        let config = &genesis.config;
        let extra_u64 = |field: &'static str| -> Result<Option<u64>, ChainSpecError> {
            config
                .extra_fields
                .get_deserialized::<u64>(field)
                .transpose()
                .map_err(|err| ChainSpecError::InvalidField { field, reason: err.to_string() })
        };

        let eip7782 = match (extra_u64("eip7782Block")?, extra_u64("eip7782Time")?) {
            (Some(_), Some(_)) => {
                return Err(ChainSpecError::InvalidField {
                    field: "eip7782Time",
                    reason: "conflicts with `eip7782Block`, set only one".to_string(),
                })
            }
            (Some(block), None) => ForkCondition::Block(block),
            (None, Some(time)) => ForkCondition::Timestamp(time),
            (None, None) => ForkCondition::Never,
        };
        let london = config.london_block.map_or(ForkCondition::Never, ForkCondition::Block);

        let hardforks = ChainHardforks::new(vec![
            (EthereumHardfork::London.boxed(), london),
            (ExperimentalHardfork::Eip7782.boxed(), eip7782),
        ]);
        let mut spec = Self::new(Chain::from_id(config.chain_id), hardforks);

        if let Some(multiplier) = extra_u64("elasticityMultiplier")? {
            spec.elasticity_multiplier = multiplier;
        }
        spec.gas_limit_params = params(
            spec.gas_limit_params,
            ("gasLimitBoundDivisor", extra_u64("gasLimitBoundDivisor")?),
            extra_u64("minGasLimit")?,
        )?;
        spec.eip7782_gas_limit_params = params(
            spec.eip7782_gas_limit_params,
            ("eip7782GasLimitBoundDivisor", extra_u64("eip7782GasLimitBoundDivisor")?),
            extra_u64("eip7782MinGasLimit")?,
        )?;

        debug!(
            target: "chainspec",
            chain = %spec.chain,
            ?london,
            ?eip7782,
            elasticity_multiplier = spec.elasticity_multiplier,
            "Loaded gas limit chain spec from genesis"
        );
        Ok(spec)
    }

    /// Parses a genesis JSON string.
    pub fn from_genesis_json(json: &str) -> Result<Self, ChainSpecError> {
        let genesis: Genesis = serde_json::from_str(json)?;
        Self::from_genesis(&genesis)
    }

    /// Reads and parses a genesis JSON file.
    pub fn from_genesis_file(path: impl AsRef<Path>) -> Result<Self, ChainSpecError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_genesis_json(&json)
    }
}

fn params(
    defaults: GasLimitParams,
    (divisor_field, bound_divisor): (&'static str, Option<u64>),
    min_gas_limit: Option<u64>,
) -> Result<GasLimitParams, ChainSpecError> {
    let bound_divisor = bound_divisor.unwrap_or(defaults.bound_divisor);
    if bound_divisor == 0 {
        return Err(ChainSpecError::ZeroBoundDivisor(divisor_field))
    }
    Ok(GasLimitParams::new(bound_divisor, min_gas_limit.unwrap_or(defaults.min_gas_limit)))
}
