use clap::Parser;
use hangman::render;
use hangman::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[clap(name = "hangman", version, about = "终端猜词游戏")]
struct Cli {
    /// 第一局的词长
    #[clap(short, long)]
    length: Option<usize>,
    /// 配置文件（不含扩展名）
    #[clap(short, long, default_value = "config")]
    config: String,
    /// 覆盖配置中的日志级别
    #[clap(long)]
    log_level: Option<String>,
}

/// 玩家输入的一行命令
#[derive(Debug, PartialEq, Eq)]
enum Command {
    New(Option<usize>),
    Solve(String),
    Letter(String),
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "new" | "again" => Command::New(rest.parse().ok()),
            "solve" => Command::Solve(rest.to_string()),
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Letter(line.to_string()),
        }
    }
}

const HELP: &str = "\
命令:
  <字母>          猜一个字母
  solve <单词>    猜整个词
  new [长度]      开始新的一局（3-12，默认沿用上一局）
  help            显示帮助
  quit            退出";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_from(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    Config::init_with(config)?;
    let config = Config::get();

    // 日志写到 stderr，stdout 留给游戏画面
    tracing_subscriber::registry()
        .with(EnvFilter::new(config.log_filter()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("配置加载成功: {:?}", config);

    let provider = HttpWordProvider::new(&config.provider)?;
    let oracle = ZipfTable::load_or_bundled(config.words.frequency_file.as_deref());
    let source = WordSource::from_config(provider, oracle, &config.words);
    let selector = WordSelector::new(source, config.words.clone());

    let mut session = Session::new();
    let max_attempts = config.game.max_attempts;
    let mut length = config.clamp_length(cli.length.unwrap_or(config.game.default_length));

    println!("猜词游戏\n{}\n", HELP);
    start_round(&selector, &mut session, length, max_attempts).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::New(requested) => {
                if let Some(requested) = requested {
                    length = config.clamp_length(requested);
                }
                start_round(&selector, &mut session, length, max_attempts).await;
            }
            Command::Solve(word) => guess(&mut session, max_attempts, |game| game.guess_word(&word)),
            Command::Letter(letter) => {
                guess(&mut session, max_attempts, |game| game.guess_letter(&letter))
            }
        }
    }

    session.end();
    Ok(())
}

async fn start_round<P, O>(
    selector: &WordSelector<P, O>,
    session: &mut Session,
    length: usize,
    max_attempts: u32,
) where
    P: WordProvider,
    O: CommonnessOracle,
{
    println!("正在挑选长度为 {} 的词...", length);
    let word = selector.pick_word(session, length).await;
    let game = session.start_round(word, max_attempts);
    println!("{}", render::summary(game, max_attempts, None));
}

fn guess<F>(session: &mut Session, max_attempts: u32, apply: F)
where
    F: FnOnce(&mut GameState) -> GuessOutcome,
{
    let Some(game) = session.current_mut() else {
        println!("还没有进行中的对局，输入 new 开始");
        return;
    };

    let outcome = apply(game);
    tracing::debug!("猜测结果: {:?}", outcome);

    if outcome.changed_state() || outcome.advisory().is_some() {
        let advisory = outcome.advisory();
        println!("{}", render::summary(game, max_attempts, advisory.as_deref()));
        if game.is_over() {
            tracing::info!("对局结束: {}", game.status());
            println!("输入 new 再来一局，或 quit 退出");
        }
    }
}
