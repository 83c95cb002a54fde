pub mod cache;
pub mod config;
pub mod frequency;
pub mod game;
pub mod provider;
pub mod render;
pub mod selector;
pub mod session;
pub mod word_source;

pub use config::Config;
pub use frequency::{CommonnessOracle, ZipfTable};
pub use game::{GameState, GameStatus, GuessOutcome, mask};
pub use provider::{HttpWordProvider, ProviderError, WordProvider};
pub use selector::WordSelector;
pub use session::Session;
pub use word_source::WordSource;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("词源错误: {0}")]
    Provider(#[from] ProviderError),
    #[error("词频表错误: {0}")]
    Frequency(String),
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
