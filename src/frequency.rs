use crate::{Error, Result};
use std::collections::HashMap;
use tracing::{debug, warn};

/// 内置的英文词频表
const BUNDLED_EN: &str = include_str!("../data/zipf_en.txt");

/// 给出某个词在指定语言中的常用程度
pub trait CommonnessOracle: Send + Sync {
    /// 未知词或不支持的语言返回 0.0
    fn commonness(&self, word: &str, lang: &str) -> f64;
}

/// 英文词频表，分数为 Zipf 标度（每十亿词中出现次数的以 10 为底的对数）
///
/// 日常词大约在 4 到 7 之间，表中没有的词记为 0。
#[derive(Debug, Clone, Default)]
pub struct ZipfTable {
    scores: HashMap<String, f64>,
}

impl ZipfTable {
    /// 内置的英文词频表
    pub fn bundled() -> Self {
        // 内置数据在测试中校验过，解析失败只可能来自编辑错误
        Self::parse(BUNDLED_EN).unwrap_or_default()
    }

    /// 从文件加载词频表
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// 优先加载配置的词频文件，失败时退回内置表
    pub fn load_or_bundled(path: Option<&str>) -> Self {
        match path {
            Some(path) => match Self::load_from_file(path) {
                Ok(table) => {
                    debug!("已加载词频表 {}: {} 个词", path, table.len());
                    table
                }
                Err(e) => {
                    warn!("无法加载词频表 {}: {}, 使用内置词频表", path, e);
                    Self::bundled()
                }
            },
            None => Self::bundled(),
        }
    }

    /// 每行 `word zipf`，`#` 开头为注释
    pub fn parse(content: &str) -> Result<Self> {
        let mut scores = HashMap::new();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (Some(word), Some(score), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(Error::Frequency(format!("第{}行格式错误: {}", i + 1, line)));
            };

            let score: f64 = score
                .parse()
                .map_err(|_| Error::Frequency(format!("第{}行分数无效: {}", i + 1, score)))?;

            scores.insert(word.to_lowercase(), score);
        }

        Ok(ZipfTable { scores })
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl CommonnessOracle for ZipfTable {
    fn commonness(&self, word: &str, lang: &str) -> f64 {
        if lang != "en" {
            return 0.0;
        }
        self.scores
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(0.0)
    }
}
