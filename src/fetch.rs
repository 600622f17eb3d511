use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::settings::Settings;

static RIVER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/missouri-rivers/([^/]+)/?$").unwrap());

const MIN_LINK_TEXT_CHARS: usize = 3;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url}: {source}")]
    Url {
        url: String,
        source: url::ParseError,
    },
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// A river page discovered on the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiverLink {
    pub name: String,
    pub url: String,
    pub id: String,
}

pub struct Fetcher {
    client: reqwest::Client,
    base: Url,
    index_path: String,
}

impl Fetcher {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        let base = Url::parse(&settings.base_url).map_err(|source| FetchError::Url {
            url: settings.base_url.clone(),
            source,
        })?;
        Ok(Fetcher {
            client,
            base,
            index_path: settings.index_path.clone(),
        })
    }

    pub fn index_url(&self) -> Result<Url, FetchError> {
        self.base.join(&self.index_path).map_err(|source| FetchError::Url {
            url: self.index_path.clone(),
            source,
        })
    }

    /// Fetch the rivers index and return the river pages it links to.
    pub async fn river_links(&self) -> Result<Vec<RiverLink>, FetchError> {
        let index = self.index_url()?;
        info!("Fetching river index: {}", index);
        let html = self.get(index.as_str()).await?;
        let links = parse_river_links(&html, &self.base, &self.index_path);
        info!("Found {} rivers", links.len());
        Ok(links)
    }

    pub async fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// Collect river page links from index markup, first occurrence per id.
pub fn parse_river_links(html: &str, base: &Url, index_path: &str) -> Vec<RiverLink> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    let mut links: Vec<RiverLink> = Vec::new();
    for el in document.select(&selector) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        if !href.contains("/missouri-rivers/") || href == index_path {
            continue;
        }

        let name = el.text().collect::<String>().trim().to_string();
        if name.chars().count() < MIN_LINK_TEXT_CHARS {
            continue;
        }

        let Ok(full) = base.join(href) else {
            continue;
        };
        let Some(id) = RIVER_ID_RE
            .captures(full.as_str())
            .map(|c| c[1].to_string())
        else {
            continue;
        };

        if links.iter().any(|l| l.id == id) {
            continue;
        }
        links.push(RiverLink {
            name,
            url: full.to_string(),
            id,
        });
    }
    links
}
