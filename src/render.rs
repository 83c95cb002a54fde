use crate::game::{GameState, GameStatus};
use std::fmt::Write;

const STAGES: [&str; 7] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n      |\n=========",
];

/// 按已用次数的比例取绞刑架图，最后一次机会用完时画出完整的人
///
/// 剩余次数大于上限或上限为 0 时使用初始图。
pub fn art(attempts_remaining: u32, max_attempts: u32) -> &'static str {
    let Some(used) = max_attempts.checked_sub(attempts_remaining) else {
        return STAGES[0];
    };
    if max_attempts == 0 {
        return STAGES[0];
    }

    let last = STAGES.len() - 1;
    if used >= max_attempts {
        return STAGES[last];
    }

    // 还有机会时不画完整的人
    let stage = (used as u64 * last as u64).div_ceil(max_attempts as u64) as usize;
    STAGES[stage.min(last - 1)]
}

fn list_or_dash<I: IntoIterator<Item = char>>(letters: I) -> String {
    let joined = letters
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() { "-".to_string() } else { joined }
}

/// 渲染一局的完整画面
pub fn summary(game: &GameState, max_attempts: u32, advisory: Option<&str>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", art(game.attempts_remaining(), max_attempts));
    let _ = writeln!(
        out,
        "剩余次数: {}    状态: {}    词长: {}",
        game.attempts_remaining(),
        game.status(),
        game.word_length()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "    {}", game.masked());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "猜错: {}",
        list_or_dash(game.wrong_letters().iter().copied())
    );
    let _ = writeln!(
        out,
        "猜过: {}",
        list_or_dash(game.guessed_letters().iter().copied())
    );

    if let Some(advisory) = advisory {
        let _ = writeln!(out, "提示: {}", advisory);
    }

    match game.status() {
        GameStatus::InProgress => {}
        GameStatus::Won => {
            let _ = writeln!(out, "你赢了。答案: {}", game.secret_word());
        }
        GameStatus::Lost => {
            let _ = writeln!(out, "你输了。答案: {}", game.secret_word());
        }
    }

    out
}
