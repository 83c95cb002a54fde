use crate::Result;
use crate::cache::TtlCache;
use crate::config::WordsConfig;
use crate::frequency::CommonnessOracle;
use crate::provider::WordProvider;
use std::time::Duration;
use tracing::{debug, warn};

/// 缓存键：目标长度与词频下限
type CandidateKey = (usize, u64);

/// 去掉非字母字符并转为小写
pub fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 从外部词源获取候选词，并按长度和常用程度过滤
pub struct WordSource<P, O> {
    provider: P,
    oracle: O,
    cache: TtlCache<CandidateKey, Vec<String>>,
}

impl<P, O> WordSource<P, O>
where
    P: WordProvider,
    O: CommonnessOracle,
{
    pub fn new(provider: P, oracle: O, cache_ttl: Duration) -> Self {
        WordSource {
            provider,
            oracle,
            cache: TtlCache::new(cache_ttl),
        }
    }

    pub fn from_config(provider: P, oracle: O, config: &WordsConfig) -> Self {
        Self::new(provider, oracle, config.cache_ttl())
    }

    /// 获取候选词，结果按 `(target_length, min_commonness)` 缓存
    pub async fn fetch_candidates(
        &self,
        target_length: usize,
        min_commonness: f64,
    ) -> Result<Vec<String>> {
        let key = (target_length, min_commonness.to_bits());
        if let Some(words) = self.cache.get(&key) {
            debug!("候选词缓存命中: 长度 {}, {} 个词", target_length, words.len());
            return Ok(words);
        }

        let raw = self.provider.fetch_words(target_length).await?;
        let candidates = self.filter(raw, target_length, min_commonness);
        debug!(
            "获取候选词: 长度 {}, 词频下限 {}, {} 个词",
            target_length,
            min_commonness,
            candidates.len()
        );

        self.cache.insert(key, candidates.clone());
        debug!("候选词缓存: {} 个键", self.cache.len());
        Ok(candidates)
    }

    /// 与 `fetch_candidates` 相同，但词源失败时返回空列表
    pub async fn candidates_or_empty(
        &self,
        target_length: usize,
        min_commonness: f64,
    ) -> Vec<String> {
        match self.fetch_candidates(target_length, min_commonness).await {
            Ok(words) => words,
            Err(e) => {
                warn!("获取候选词失败: {}", e);
                Vec::new()
            }
        }
    }

    fn filter(&self, raw: Vec<String>, target_length: usize, min_commonness: f64) -> Vec<String> {
        raw.iter()
            .map(|token| normalize(token))
            .filter(|word| !word.is_empty() && word.len() == target_length)
            .filter(|word| self.oracle.commonness(word, "en") >= min_commonness)
            .collect()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}
