use reth_consensus::ConsensusError;

/// Gas-limit consensus errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GasLimitError {
    /// The header gas limit lies outside the inclusive range allowed by its parent.
    #[error("invalid gas limit: parent {parent_gas_limit} -> want [{low}, {high}], have {gas_limit}")]
    InvalidGasLimit {
        /// Gas limit declared by the parent header, before any fork re-basing.
        parent_gas_limit: u64,
        /// Lowest allowed gas limit.
        low: u64,
        /// Highest allowed gas limit.
        high: u64,
        /// Gas limit declared by the header.
        gas_limit: u64,
    },
}

impl From<GasLimitError> for ConsensusError {
    fn from(err: GasLimitError) -> Self {
        ConsensusError::Other(err.to_string())
    }
}
