use crate::config::ProviderConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("请求超时")]
    Timeout,
    #[error("HTTP请求失败: {0}")]
    Http(#[source] reqwest::Error),
    #[error("词源返回错误状态码: {0}")]
    Status(StatusCode),
    #[error("响应不是合法的JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("无效的词源地址: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Http(e)
        }
    }
}

/// 外部随机词来源
#[async_trait]
pub trait WordProvider: Send + Sync {
    /// 获取一批长度不小于 `length` 的原始词
    async fn fetch_words(&self, length: usize) -> Result<Vec<String>, ProviderError>;
}

/// 通过 HTTP 接口获取随机词
pub struct HttpWordProvider {
    client: reqwest::Client,
    base_url: Url,
    batch_size: usize,
}

impl HttpWordProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;

        Ok(HttpWordProvider {
            client,
            base_url: Url::parse(&config.url)?,
            batch_size: config.batch_size,
        })
    }

    fn request_url(&self, length: usize) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("number", &self.batch_size.to_string())
            .append_pair("length", &length.max(3).to_string());
        url
    }
}

#[async_trait]
impl WordProvider for HttpWordProvider {
    async fn fetch_words(&self, length: usize) -> Result<Vec<String>, ProviderError> {
        let url = self.request_url(length);
        debug!("请求随机词: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body = response.text().await?;
        parse_words(&body)
    }
}

/// 解析词源响应，非数组的JSON视为空列表
pub fn parse_words(body: &str) -> Result<Vec<String>, ProviderError> {
    let value: Value = serde_json::from_str(body)?;

    let words = match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(words)
}
