use crate::game::GameState;
use std::collections::HashSet;
use tracing::{Span, info, info_span};
use uuid::Uuid;

/// 一次会话的上下文：已出过的词和当前对局
///
/// 会话在进程启动时创建，结束时通过 [`Session::end`] 销毁。
/// 新开一局会整体替换当前对局，已用词在整个会话内保留。
#[derive(Debug)]
pub struct Session {
    used_words: HashSet<String>,
    current: Option<GameState>,
    rounds_played: usize,
    span: Span,
}

impl Session {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        let span = info_span!("session", %id);
        span.in_scope(|| info!("会话开始"));

        Session {
            used_words: HashSet::new(),
            current: None,
            rounds_played: 0,
            span,
        }
    }

    pub fn has_used(&self, word: &str) -> bool {
        self.used_words.contains(word)
    }

    /// 记录本次会话已出过的词
    pub fn record_word(&mut self, word: &str) {
        self.used_words.insert(word.to_string());
    }

    pub fn used_words(&self) -> &HashSet<String> {
        &self.used_words
    }

    /// 开始新的一局，替换之前的对局
    pub fn start_round(&mut self, secret_word: String, max_attempts: u32) -> &mut GameState {
        self.rounds_played += 1;
        self.span.in_scope(|| {
            info!(
                "第 {} 局开始: 词长 {}",
                self.rounds_played,
                secret_word.len()
            )
        });
        self.current.insert(GameState::with_attempts(secret_word, max_attempts))
    }

    pub fn current(&self) -> Option<&GameState> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut GameState> {
        self.current.as_mut()
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// 结束会话，已用词随之清空
    pub fn end(self) {
        let _guard = self.span.enter();
        info!(
            "会话结束: 共 {} 局, 用过 {} 个词",
            self.rounds_played,
            self.used_words.len()
        );
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
