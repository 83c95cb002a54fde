use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// 默认的最大错误次数
pub const MAX_ATTEMPTS: u32 = 6;

/// 未猜中字母的占位符
pub const PLACEHOLDER: char = '_';

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won => write!(f, "won"),
            GameStatus::Lost => write!(f, "lost"),
        }
    }
}

/// 被忽略的输入，不产生提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotASingleLetter,
    EmptyWord,
    GameOver,
}

/// 一次猜测的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// 字母在词中
    Hit(char),
    /// 字母不在词中，消耗一次机会
    Miss(char),
    /// 整词猜对
    Solved,
    /// 整词猜错，消耗一次机会
    WrongWord,
    /// 重复的字母，状态不变
    AlreadyTried(char),
    Ignored(IgnoreReason),
}

impl GuessOutcome {
    /// 需要展示给玩家的提示
    pub fn advisory(&self) -> Option<String> {
        match self {
            GuessOutcome::AlreadyTried(c) => Some(format!("'{}' 已经猜过了。", c)),
            _ => None,
        }
    }

    /// 状态是否发生了变化
    pub fn changed_state(&self) -> bool {
        matches!(
            self,
            GuessOutcome::Hit(_) | GuessOutcome::Miss(_) | GuessOutcome::Solved | GuessOutcome::WrongWord
        )
    }
}

/// 一局游戏的全部状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    secret_word: String,
    attempts_remaining: u32,
    guessed_letters: BTreeSet<char>,
    wrong_letters: Vec<char>,
    status: GameStatus,
}

impl GameState {
    /// 以默认的错误次数开始新的一局
    pub fn new(secret_word: impl Into<String>) -> Self {
        Self::with_attempts(secret_word, MAX_ATTEMPTS)
    }

    pub fn with_attempts(secret_word: impl Into<String>, max_attempts: u32) -> Self {
        let secret_word = secret_word.into();
        debug_assert!(secret_word.len() >= 3, "词长至少为 3: {}", secret_word);
        debug_assert!(secret_word.chars().all(|c| c.is_ascii_lowercase()));

        GameState {
            secret_word,
            attempts_remaining: max_attempts,
            guessed_letters: BTreeSet::new(),
            wrong_letters: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    pub fn wrong_letters(&self) -> &[char] {
        &self.wrong_letters
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn word_length(&self) -> usize {
        self.secret_word.len()
    }

    /// 遮盖后的词，用于展示
    pub fn masked(&self) -> String {
        mask(&self.secret_word, &self.guessed_letters)
    }

    /// 猜一个字母
    pub fn guess_letter(&mut self, raw: &str) -> GuessOutcome {
        if self.is_over() {
            return GuessOutcome::Ignored(IgnoreReason::GameOver);
        }

        let Some(letter) = parse_letter(raw) else {
            return GuessOutcome::Ignored(IgnoreReason::NotASingleLetter);
        };

        if self.guessed_letters.contains(&letter) {
            return GuessOutcome::AlreadyTried(letter);
        }

        self.guessed_letters.insert(letter);

        let hit = self.secret_word.contains(letter);
        if !hit {
            self.wrong_letters.push(letter);
            self.consume_attempt();
        }

        self.update_status();

        if hit {
            GuessOutcome::Hit(letter)
        } else {
            GuessOutcome::Miss(letter)
        }
    }

    /// 猜整个词
    pub fn guess_word(&mut self, raw: &str) -> GuessOutcome {
        if self.is_over() {
            return GuessOutcome::Ignored(IgnoreReason::GameOver);
        }

        let guess = raw.trim().to_lowercase();
        if guess.is_empty() {
            return GuessOutcome::Ignored(IgnoreReason::EmptyWord);
        }

        if guess == self.secret_word {
            self.guessed_letters.extend(self.secret_word.chars());
            self.status = GameStatus::Won;
            return GuessOutcome::Solved;
        }

        // 整词猜错只扣次数，不记入错误字母
        self.consume_attempt();
        if self.attempts_remaining == 0 {
            self.status = GameStatus::Lost;
        }
        GuessOutcome::WrongWord
    }

    fn consume_attempt(&mut self) {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
    }

    fn update_status(&mut self) {
        if revealed(&self.secret_word, &self.guessed_letters) {
            self.status = GameStatus::Won;
        } else if self.attempts_remaining == 0 {
            self.status = GameStatus::Lost;
        }
    }
}

/// 输入去空白并转小写后必须恰好是一个字母
fn parse_letter(raw: &str) -> Option<char> {
    let guess = raw.trim().to_lowercase();
    let mut chars = guess.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Some(c),
        _ => None,
    }
}

/// 未猜中的字母显示为占位符，字符之间用空格分隔
pub fn mask(word: &str, guessed: &BTreeSet<char>) -> String {
    word.chars()
        .map(|c| if guessed.contains(&c) { c } else { PLACEHOLDER })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// 词中每个字母是否都已猜中
pub fn revealed(word: &str, guessed: &BTreeSet<char>) -> bool {
    word.chars().all(|c| guessed.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(s: &str) -> BTreeSet<char> {
        s.chars().collect()
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("apple", &letters("")), "_ _ _ _ _");
        assert_eq!(mask("apple", &letters("p")), "_ p p _ _");
        assert_eq!(mask("apple", &letters("aple")), "a p p l e");
        assert!(revealed("apple", &letters("aelpz")));
        assert!(!revealed("apple", &letters("ape")));
    }

    #[test]
    fn test_mask_length_matches_word() {
        for word in ["cat", "garden", "relationship"] {
            for guessed in ["", "e", "aeiou", "abcdefghijklmnopqrstuvwxyz"] {
                let masked = mask(word, &letters(guessed));
                assert_eq!(masked.split(' ').count(), word.len());
                assert_eq!(masked.replace(' ', "") == word, revealed(word, &letters(guessed)));
            }
        }
    }

    #[test]
    fn test_new_game() {
        let game = GameState::new("apple");
        assert_eq!(game.attempts_remaining(), 6);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.guessed_letters().is_empty());
        assert!(game.wrong_letters().is_empty());
        assert_eq!(game.word_length(), 5);
    }

    #[test]
    fn test_guess_letter_normalizes_input() {
        let mut game = GameState::new("apple");
        assert_eq!(game.guess_letter("  P "), GuessOutcome::Hit('p'));
        assert!(game.guessed_letters().contains(&'p'));
    }

    #[test]
    fn test_invalid_letter_input_is_ignored() {
        let mut game = GameState::new("apple");
        let before = game.clone();

        for input in ["", "   ", "ab", "1", "?", "é", "p p"] {
            assert_eq!(
                game.guess_letter(input),
                GuessOutcome::Ignored(IgnoreReason::NotASingleLetter),
                "输入 {:?}",
                input
            );
        }
        assert_eq!(game, before);
    }

    #[test]
    fn test_duplicate_letter_rejected() {
        let mut game = GameState::new("apple");
        game.guess_letter("z");
        let before = game.clone();

        let outcome = game.guess_letter("Z");
        assert_eq!(outcome, GuessOutcome::AlreadyTried('z'));
        assert!(outcome.advisory().is_some());
        assert!(!outcome.changed_state());
        assert_eq!(game, before);
    }

    #[test]
    fn test_wrong_letters_kept_in_guess_order() {
        let mut game = GameState::new("apple");
        for c in ["z", "b", "p", "q"] {
            game.guess_letter(c);
        }
        assert_eq!(game.wrong_letters(), &['z', 'b', 'q']);
        assert_eq!(game.attempts_remaining(), 3);
    }

    #[test]
    fn test_win_checked_before_loss() {
        let mut game = GameState::with_attempts("cat", 1);
        game.guess_letter("c");
        game.guess_letter("a");
        assert_eq!(game.guess_letter("t"), GuessOutcome::Hit('t'));
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_guess_word_correct() {
        let mut game = GameState::new("apple");
        for c in ["x", "y", "z", "q", "w"] {
            game.guess_letter(c);
        }
        assert_eq!(game.attempts_remaining(), 1);

        assert_eq!(game.guess_word("  APPLE "), GuessOutcome::Solved);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.masked(), "a p p l e");
        assert_eq!(game.attempts_remaining(), 1);
    }

    #[test]
    fn test_guess_word_wrong_does_not_touch_wrong_letters() {
        let mut game = GameState::new("apple");
        assert_eq!(game.guess_word("grape"), GuessOutcome::WrongWord);
        assert_eq!(game.attempts_remaining(), 5);
        assert!(game.wrong_letters().is_empty());
        assert!(game.guessed_letters().is_empty());
    }

    #[test]
    fn test_guess_word_empty_ignored() {
        let mut game = GameState::new("apple");
        assert_eq!(
            game.guess_word("   "),
            GuessOutcome::Ignored(IgnoreReason::EmptyWord)
        );
        assert_eq!(game.attempts_remaining(), 6);
    }

    #[test]
    fn test_wrong_words_lose() {
        let mut game = GameState::new("apple");
        for _ in 0..5 {
            game.guess_word("lemon");
        }
        assert_eq!(game.status(), GameStatus::InProgress);
        game.guess_word("mango");
        assert_eq!(game.attempts_remaining(), 0);
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let mut game = GameState::new("cat");
        game.guess_word("cat");
        let won = game.clone();

        assert_eq!(game.guess_letter("z"), GuessOutcome::Ignored(IgnoreReason::GameOver));
        assert_eq!(game.guess_word("dog"), GuessOutcome::Ignored(IgnoreReason::GameOver));
        assert_eq!(game, won);

        let mut game = GameState::with_attempts("cat", 1);
        game.guess_letter("z");
        assert_eq!(game.status(), GameStatus::Lost);
        let lost = game.clone();
        assert_eq!(game.guess_word("cat"), GuessOutcome::Ignored(IgnoreReason::GameOver));
        assert_eq!(game, lost);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(GameStatus::InProgress.to_string(), "in progress");
        assert_eq!(GameStatus::Won.to_string(), "won");
        assert_eq!(GameStatus::Lost.to_string(), "lost");
    }
}
