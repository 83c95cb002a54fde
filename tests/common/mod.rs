#![allow(dead_code)]

use async_trait::async_trait;
use hangman::config::WordsConfig;
use hangman::{GameState, ProviderError, WordProvider, WordSelector, WordSource, ZipfTable};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// 按顺序返回预设响应的词源，响应用完后重复最后一个
pub struct ScriptedProvider {
    responses: Mutex<Vec<Result<Vec<String>, ProviderError>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Result<Vec<&str>, ProviderError>>) -> Self {
        let responses = responses
            .into_iter()
            .rev()
            .map(|r| r.map(|words| words.into_iter().map(String::from).collect()))
            .collect();
        Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(words: Vec<&str>) -> Self {
        Self::new(vec![Ok(words)])
    }

    pub fn failing() -> Self {
        Self::new(vec![Err(ProviderError::Timeout)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WordProvider for ScriptedProvider {
    async fn fetch_words(&self, _length: usize) -> Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut responses = self.responses.lock().unwrap();
        let response = if responses.len() > 1 {
            responses.pop()
        } else {
            responses.last().map(|r| match r {
                Ok(words) => Ok(words.clone()),
                Err(_) => Err(ProviderError::Timeout),
            })
        };
        response.unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// 测试用词频表
pub fn test_oracle() -> ZipfTable {
    ZipfTable::parse(
        "apple 4.6\nhouse 5.6\nwater 5.5\nblue 5.2\ntree 4.9\nkitchen 4.8\nmorning 5.2\nquilt 3.4",
    )
    .unwrap()
}

pub fn create_source(
    provider: ScriptedProvider,
    ttl: Duration,
) -> WordSource<ScriptedProvider, ZipfTable> {
    WordSource::new(provider, test_oracle(), ttl)
}

pub fn create_selector(provider: ScriptedProvider) -> WordSelector<ScriptedProvider, ZipfTable> {
    WordSelector::new(create_source(provider, Duration::ZERO), WordsConfig::default())
}

/// 依次猜多个字母
pub fn guess_letters(game: &mut GameState, letters: &str) {
    for c in letters.split(',') {
        game.guess_letter(c);
    }
}
