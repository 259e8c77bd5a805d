use std::cell::RefCell;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use crate::error::PageError;
use crate::traits::PageQuery;

/// Loads the rendered markup of a profile page
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Build a fetcher; `session_cookie` is sent as the `li_at` cookie when set
    pub fn new(session_cookie: Option<&str>) -> Result<Self, PageError> {
        let mut headers = HeaderMap::new();
        match session_cookie.map(|c| HeaderValue::from_str(&format!("li_at={c}"))) {
            Some(Ok(value)) => {
                headers.insert(COOKIE, value);
            }
            Some(Err(_)) => warn!("Session cookie contains invalid characters, ignoring it"),
            None => {}
        }

        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36")
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch `source` over HTTP when it is a URL, otherwise read it as a saved page
    pub async fn fetch(&self, source: &str) -> Result<String, PageError> {
        if source.starts_with("http") {
            info!("Fetching profile page {}", source);
            let response = self.client.get(source).send().await?;
            if !response.status().is_success() {
                return Err(PageError::Status {
                    url: source.to_string(),
                    status: response.status(),
                });
            }
            Ok(response.text().await?)
        } else {
            info!("Reading saved profile page {}", source);
            Ok(tokio::fs::read_to_string(source).await?)
        }
    }
}

/// A parsed snapshot of a rendered page.
///
/// Snapshots have no interactive state, so actions only need a target to
/// exist in the markup. They are recorded in order for inspection, and those
/// without a target are also recorded separately.
pub struct HtmlPage<'a> {
    document: &'a Html,
    actions: RefCell<Vec<String>>,
    missing_targets: RefCell<Vec<String>>,
}

impl<'a> HtmlPage<'a> {
    pub fn new(document: &'a Html) -> Self {
        Self {
            document,
            actions: RefCell::new(Vec::new()),
            missing_targets: RefCell::new(Vec::new()),
        }
    }

    /// Selectors of the actions invoked so far
    #[cfg(test)]
    pub fn actions(&self) -> Vec<String> {
        self.actions.borrow().clone()
    }

    /// Selectors of invoked actions that matched nothing
    #[cfg(test)]
    pub fn missing_targets(&self) -> Vec<String> {
        self.missing_targets.borrow().clone()
    }
}

fn parse_selector(selector: &str) -> Result<Selector, PageError> {
    Selector::parse(selector).map_err(|e| PageError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{e:?}"),
    })
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

#[async_trait(?Send)]
impl<'a> PageQuery for HtmlPage<'a> {
    type Element = ElementRef<'a>;

    async fn get_text(&self, selector: &str) -> Result<Option<String>, PageError> {
        let selector = parse_selector(selector)?;
        Ok(self.document.select(&selector).next().map(text_of))
    }

    async fn get_all(&self, selector: &str) -> Result<Vec<ElementRef<'a>>, PageError> {
        let selector = parse_selector(selector)?;
        Ok(self.document.select(&selector).collect())
    }

    async fn get_all_within(
        &self,
        scope: &ElementRef<'a>,
        selector: &str,
    ) -> Result<Vec<ElementRef<'a>>, PageError> {
        let selector = parse_selector(selector)?;
        Ok(scope.select(&selector).collect())
    }

    async fn get_text_within(
        &self,
        scope: &ElementRef<'a>,
        selector: &str,
    ) -> Result<Option<String>, PageError> {
        let selector = parse_selector(selector)?;
        Ok(scope.select(&selector).next().map(text_of))
    }

    async fn get_attribute(
        &self,
        element: &ElementRef<'a>,
        name: &str,
    ) -> Result<Option<String>, PageError> {
        Ok(element.value().attr(name).map(str::to_string))
    }

    async fn get_text_spans(
        &self,
        scope: &ElementRef<'a>,
        selector: &str,
    ) -> Result<Vec<String>, PageError> {
        let selector = parse_selector(selector)?;
        Ok(scope
            .select(&selector)
            .map(|span| text_of(span).trim().to_string())
            .collect())
    }

    async fn invoke_action(&self, selector: &str) -> Result<(), PageError> {
        let parsed = parse_selector(selector)?;
        if self.document.select(&parsed).next().is_none() {
            warn!("No element for action {}, fields behind it may come back empty", selector);
            self.missing_targets.borrow_mut().push(selector.to_string());
        }
        self.actions.borrow_mut().push(selector.to_string());
        Ok(())
    }
}
