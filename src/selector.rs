use crate::config::WordsConfig;
use crate::frequency::CommonnessOracle;
use crate::provider::WordProvider;
use crate::session::Session;
use crate::word_source::WordSource;
use rand::prelude::*;
use tracing::{debug, warn};

/// 为会话挑选谜底词，尽量避免重复
pub struct WordSelector<P, O> {
    source: WordSource<P, O>,
    config: WordsConfig,
}

/// 单次抽取的结果
enum Draw {
    Fresh(String),
    Repeat(String),
    Empty,
}

impl<P, O> WordSelector<P, O>
where
    P: WordProvider,
    O: CommonnessOracle,
{
    pub fn new(source: WordSource<P, O>, config: WordsConfig) -> Self {
        WordSelector { source, config }
    }

    pub fn source(&self) -> &WordSource<P, O> {
        &self.source
    }

    pub fn fallback_word(&self) -> &str {
        &self.config.fallback_word
    }

    /// 挑选一个指定长度的词并记入会话
    ///
    /// 最多尝试 `max_pick_attempts` 次寻找本会话未出过的词，
    /// 都失败时接受下一次抽到的词。任何一次候选为空都直接使用固定词。
    pub async fn pick_word(&self, session: &mut Session, target_length: usize) -> String {
        let word = self.choose(session, target_length).await;
        session.record_word(&word);
        word
    }

    async fn choose(&self, session: &Session, target_length: usize) -> String {
        for attempt in 1..=self.config.max_pick_attempts {
            match self.draw(session, target_length).await {
                Draw::Fresh(word) => {
                    debug!("第 {} 次尝试选中新词", attempt);
                    return word;
                }
                Draw::Repeat(_) => continue,
                Draw::Empty => return self.fallback(target_length),
            }
        }

        debug!(
            "{} 次尝试都只有用过的词，接受重复",
            self.config.max_pick_attempts
        );
        match self.draw(session, target_length).await {
            Draw::Fresh(word) | Draw::Repeat(word) => word,
            Draw::Empty => self.fallback(target_length),
        }
    }

    async fn draw(&self, session: &Session, target_length: usize) -> Draw {
        let candidates = self
            .source
            .candidates_or_empty(target_length, self.config.min_commonness)
            .await;

        if candidates.is_empty() {
            return Draw::Empty;
        }

        let fresh: Vec<&String> = candidates
            .iter()
            .filter(|word| !session.has_used(word))
            .collect();

        let mut rng = rand::rng();
        match fresh.choose(&mut rng) {
            Some(word) => Draw::Fresh((*word).clone()),
            None => match candidates.choose(&mut rng) {
                Some(word) => Draw::Repeat(word.clone()),
                None => Draw::Empty,
            },
        }
    }

    fn fallback(&self, target_length: usize) -> String {
        warn!(
            "长度 {} 没有可用的候选词，使用固定词 {}",
            target_length, self.config.fallback_word
        );
        self.config.fallback_word.clone()
    }
}
