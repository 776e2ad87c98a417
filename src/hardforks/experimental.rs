use reth_chainspec::ForkCondition;
use reth_ethereum_forks::{hardfork, ChainHardforks, EthereumHardfork, Hardfork};

hardfork!(
    /// The name of an experimental hardfork.
    ///
    /// When building a list of hardforks for a chain, it's still expected to mix with
    /// [`EthereumHardfork`].
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    ExperimentalHardfork {
        /// `EIP-7782`: halves the slot time and, with it, the per-block gas limit.
        Eip7782,
    }
);

impl ExperimentalHardfork {
    /// Ethereum mainnet forks up to London. EIP-7782 is not scheduled.
    pub fn mainnet() -> ChainHardforks {
        ChainHardforks::new(vec![
            (EthereumHardfork::Frontier.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Homestead.boxed(), ForkCondition::Block(1150000)),
            (EthereumHardfork::Dao.boxed(), ForkCondition::Block(1920000)),
            (EthereumHardfork::Tangerine.boxed(), ForkCondition::Block(2463000)),
            (EthereumHardfork::SpuriousDragon.boxed(), ForkCondition::Block(2675000)),
            (EthereumHardfork::Byzantium.boxed(), ForkCondition::Block(4370000)),
            (EthereumHardfork::Constantinople.boxed(), ForkCondition::Block(7280000)),
            (EthereumHardfork::Petersburg.boxed(), ForkCondition::Block(7280000)),
            (EthereumHardfork::Istanbul.boxed(), ForkCondition::Block(9069000)),
            (EthereumHardfork::MuirGlacier.boxed(), ForkCondition::Block(9200000)),
            (EthereumHardfork::Berlin.boxed(), ForkCondition::Block(12244000)),
            (EthereumHardfork::London.boxed(), ForkCondition::Block(12965000)),
            (Self::Eip7782.boxed(), ForkCondition::Never),
        ])
    }

    /// Sepolia forks up to London. EIP-7782 is not scheduled.
    pub fn sepolia() -> ChainHardforks {
        ChainHardforks::new(vec![
            (EthereumHardfork::Frontier.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Homestead.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Dao.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Tangerine.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::SpuriousDragon.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Byzantium.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Constantinople.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Petersburg.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Istanbul.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::MuirGlacier.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Berlin.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::London.boxed(), ForkCondition::Block(0)),
            (Self::Eip7782.boxed(), ForkCondition::Never),
        ])
    }

    /// Dev network list of hardforks, everything active at genesis.
    pub fn dev() -> ChainHardforks {
        ChainHardforks::new(vec![
            (EthereumHardfork::Frontier.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Homestead.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Tangerine.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::SpuriousDragon.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Byzantium.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Constantinople.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Petersburg.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Istanbul.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::Berlin.boxed(), ForkCondition::Block(0)),
            (EthereumHardfork::London.boxed(), ForkCondition::Block(0)),
            (Self::Eip7782.boxed(), ForkCondition::Timestamp(0)),
        ])
    }
}
