//! Headline search via NewsAPI.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::{get_json, required_str, RetryPolicy, Tool};

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";
const MAX_ARTICLES: usize = 5;

/// Search recent articles for a topic.
pub struct NewsLookup {
    client: reqwest::Client,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl NewsLookup {
    pub fn new(api_key: Option<String>, retry: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            retry,
        }
    }
}

#[async_trait]
impl Tool for NewsLookup {
    fn name(&self) -> &str {
        "news_tool"
    }

    fn description(&self) -> &str {
        "Search recent news headlines about a topic. Returns up to 5 articles."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Topic to search for, e.g. 'electric vehicles'"
                }
            },
            "required": ["query"]
        })
    }

    async fn run(&self, input: &Map<String, Value>) -> anyhow::Result<Value> {
        let query = required_str(self.name(), input, "query")?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("NEWS_API_KEY is not configured"))?;

        tracing::info!(query, "Searching news");

        let url = format!(
            "{}?q={}&apiKey={}",
            NEWS_API_URL,
            urlencoding::encode(query),
            urlencoding::encode(api_key)
        );

        let body: Value = self
            .retry
            .retry("newsapi", || get_json(&self.client, &url))
            .await?;

        summarize_articles(query, &body)
    }
}

/// Reduce a NewsAPI response to title/source/date triples.
fn summarize_articles(query: &str, body: &Value) -> anyhow::Result<Value> {
    let raw = body
        .get("articles")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut articles = Vec::with_capacity(MAX_ARTICLES);
    for article in raw.iter().take(MAX_ARTICLES) {
        let title = article
            .get("title")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Article is missing 'title'"))?;
        let source = article
            .pointer("/source/name")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Article is missing 'source.name'"))?;
        let published_at = article
            .get("publishedAt")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Article is missing 'publishedAt'"))?;

        articles.push(json!({
            "title": title,
            "source": source,
            "published_at": published_at,
        }));
    }

    Ok(json!({ "query": query, "articles": articles }))
}
