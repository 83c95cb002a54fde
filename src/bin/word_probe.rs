use clap::{Arg, Command};
use hangman::{Config, HttpWordProvider, Session, WordSelector, WordSource, ZipfTable};
use hangman::frequency::CommonnessOracle;

#[tokio::main]
async fn main() {
    let matches = Command::new("词源探测")
        .version("1.0")
        .about("检查词源返回的候选词和词频过滤结果")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config")
                .help("配置文件（不含扩展名）"),
        )
        .subcommand(
            Command::new("candidates")
                .about("列出指定长度的候选词")
                .arg(Arg::new("length").help("词长").required(true).index(1))
                .arg(
                    Arg::new("min")
                        .long("min")
                        .takes_value(true)
                        .help("词频下限，默认使用配置值"),
                ),
        )
        .subcommand(
            Command::new("score")
                .about("查询单词的词频分数")
                .arg(Arg::new("word").help("单词").required(true).index(1)),
        )
        .subcommand(
            Command::new("pick")
                .about("模拟一个会话连续挑词")
                .arg(Arg::new("length").help("词长").required(true).index(1))
                .arg(
                    Arg::new("count")
                        .long("count")
                        .takes_value(true)
                        .default_value("1")
                        .help("挑选次数"),
                ),
        )
        .get_matches();

    let config_name = matches.value_of("config").unwrap_or("config");
    let config = match Config::load_from(config_name) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("配置加载失败: {}", e);
            return;
        }
    };

    let oracle = ZipfTable::load_or_bundled(config.words.frequency_file.as_deref());

    if let Some(("score", args)) = matches.subcommand() {
        let word = args.value_of("word").unwrap_or_default();
        println!("{}: {:.2}", word, oracle.commonness(word, "en"));
        return;
    }

    let provider = match HttpWordProvider::new(&config.provider) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("无法创建词源客户端: {}", e);
            return;
        }
    };
    let source = WordSource::from_config(provider, oracle, &config.words);

    match matches.subcommand() {
        Some(("candidates", args)) => {
            let Some(length) = parse_arg::<usize>(args.value_of("length"), "词长") else {
                return;
            };
            let min = match args.value_of("min") {
                Some(min) => match parse_arg::<f64>(Some(min), "词频下限") {
                    Some(min) => min,
                    None => return,
                },
                None => config.words.min_commonness,
            };

            match source.fetch_candidates(length, min).await {
                Ok(words) if words.is_empty() => println!("没有符合条件的候选词"),
                Ok(words) => {
                    println!("长度 {} 的候选词 ({} 个):", length, words.len());
                    for word in words {
                        println!(
                            "  {} ({:.2})",
                            word,
                            source.oracle().commonness(&word, "en")
                        );
                    }
                }
                Err(e) => eprintln!("获取候选词失败: {}", e),
            }
        }
        Some(("pick", args)) => {
            let Some(length) = parse_arg::<usize>(args.value_of("length"), "词长") else {
                return;
            };
            let Some(count) = parse_arg::<usize>(args.value_of("count"), "挑选次数") else {
                return;
            };

            let selector = WordSelector::new(source, config.words.clone());
            let mut session = Session::new();
            for i in 1..=count {
                let word = selector.pick_word(&mut session, length).await;
                println!("{}: {}", i, word);
            }
            session.end();
        }
        _ => {
            println!("请使用 --help 查看可用命令");
        }
    }
}

fn parse_arg<T: std::str::FromStr>(value: Option<&str>, name: &str) -> Option<T> {
    let parsed = value.and_then(|v| v.parse().ok());
    if parsed.is_none() {
        eprintln!("{}无效: {}", name, value.unwrap_or(""));
    }
    parsed
}
