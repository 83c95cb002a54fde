use anyhow::Result;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::time::Duration;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub words: WordsConfig,
    pub game: GameConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub url: String,
    /// 每次请求的候选词数量
    pub batch_size: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WordsConfig {
    /// Zipf 词频下限，低于此值的词视为生僻词
    pub min_commonness: f64,
    pub cache_ttl_secs: u64,
    pub max_pick_attempts: usize,
    /// 候选词为空时使用的固定词
    pub fallback_word: String,
    #[serde(default)]
    pub frequency_file: Option<String>,
}

impl WordsConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    pub max_attempts: u32,
    pub min_length: usize,
    pub max_length: usize,
    pub default_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub level: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            url: "https://random-word-api.herokuapp.com/word".to_string(),
            batch_size: 100,
            timeout_secs: 5,
            user_agent: concat!("hangman/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for WordsConfig {
    fn default() -> Self {
        WordsConfig {
            min_commonness: 3.5,
            cache_ttl_secs: 600,
            max_pick_attempts: 30,
            fallback_word: "streamlit".to_string(),
            frequency_file: None,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_attempts: 6,
            min_length: 3,
            max_length: 12,
            default_length: 5,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderConfig::default(),
            words: WordsConfig::default(),
            game: GameConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// 从指定文件加载配置，文件不存在时使用默认值
    pub fn load_from(name: &str) -> Result<Self> {
        let defaults = Config::default();
        let config = config::Config::builder()
            .set_default("provider.url", defaults.provider.url)?
            .set_default("provider.batch_size", defaults.provider.batch_size as i64)?
            .set_default("provider.timeout_secs", defaults.provider.timeout_secs as i64)?
            .set_default("provider.user_agent", defaults.provider.user_agent)?
            .set_default("words.min_commonness", defaults.words.min_commonness)?
            .set_default("words.cache_ttl_secs", defaults.words.cache_ttl_secs as i64)?
            .set_default(
                "words.max_pick_attempts",
                defaults.words.max_pick_attempts as i64,
            )?
            .set_default("words.fallback_word", defaults.words.fallback_word)?
            .set_default("game.max_attempts", defaults.game.max_attempts as i64)?
            .set_default("game.min_length", defaults.game.min_length as i64)?
            .set_default("game.max_length", defaults.game.max_length as i64)?
            .set_default("game.default_length", defaults.game.default_length as i64)?
            .set_default("log.level", defaults.log.level)?
            .add_source(config::File::with_name(name).required(false))
            .add_source(config::Environment::with_prefix("HANGMAN").separator("__"))
            .build()?;

        let config = config.try_deserialize::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    /// 初始化全局配置
    pub fn init() -> Result<()> {
        Self::init_with(Self::load()?)
    }

    pub fn init_with(config: Config) -> Result<()> {
        CONFIG
            .set(config)
            .map_err(|_| anyhow::anyhow!("配置已经初始化"))?;
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static Config {
        CONFIG.get().expect("配置未初始化，请先调用 Config::init()")
    }

    fn validate(&self) -> Result<()> {
        let game = &self.game;
        if game.min_length < 3 {
            anyhow::bail!("game.min_length 不能小于 3");
        }
        if game.min_length > game.max_length {
            anyhow::bail!(
                "game.min_length ({}) 大于 game.max_length ({})",
                game.min_length,
                game.max_length
            );
        }
        if game.max_attempts == 0 {
            anyhow::bail!("game.max_attempts 至少为 1");
        }
        let fallback = &self.words.fallback_word;
        if fallback.len() < 3 || !fallback.chars().all(|c| c.is_ascii_lowercase()) {
            anyhow::bail!("words.fallback_word 必须是至少 3 个小写字母: {}", fallback);
        }
        Ok(())
    }

    pub fn log_filter(&self) -> String {
        format!("hangman={}", self.log.level)
    }

    /// 把用户选择的长度限制在允许范围内
    pub fn clamp_length(&self, length: usize) -> usize {
        length.clamp(self.game.min_length, self.game.max_length)
    }
}
