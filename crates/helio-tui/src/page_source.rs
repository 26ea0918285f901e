use tokio::sync::mpsc;
use tracing::{debug, info};

/// Page shown when no `--page` is given
const WELCOME_PAGE: &str = include_str!("../assets/welcome.html");

/// Where the host page comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PageSource {
    Builtin,
    Url(String),
    File(String),
}

impl PageSource {
    pub(crate) fn parse(arg: Option<&str>) -> Self {
        match arg {
            None => Self::Builtin,
            Some(s) if s.starts_with("http://") || s.starts_with("https://") => Self::Url(s.to_string()),
            Some(s) => Self::File(s.to_string()),
        }
    }

    pub(crate) fn describe(&self) -> &str {
        match self {
            Self::Builtin => "welcome page",
            Self::Url(s) | Self::File(s) => s,
        }
    }

    async fn fetch(&self) -> Result<String, String> {
        match self {
            Self::Builtin => Ok(WELCOME_PAGE.to_string()),
            Self::Url(url) => fetch_url(url).await.map_err(|e| e.to_string()),
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| format!("{}: {}", path, e)),
        }
    }
}

async fn fetch_url(url: &str) -> reqwest::Result<String> {
    debug!(url, "Fetching page");
    reqwest::get(url).await?.error_for_status()?.text().await
}

/// Load the page in the background; the result arrives on the returned channel
pub(crate) fn spawn_load(source: PageSource) -> mpsc::Receiver<Result<String, String>> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let result = source.fetch().await;
        if let Ok(html) = &result {
            info!(source = source.describe(), bytes = html.len(), "Page loaded");
        }
        let _ = tx.send(result).await;
    });
    rx
}
