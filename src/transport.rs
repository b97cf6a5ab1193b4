use std::{sync::Arc, time::Duration};

use reqwest::{header::HeaderMap, redirect::Policy, Client, StatusCode};
use reqwest_cookie_store::{CookieStore, CookieStoreMutex};
use tracing::trace;

use crate::{
    error::Result,
    media::{CookieSnapshot, SessionCookie},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 10;

#[derive(Debug)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub body: Vec<u8>,
    /// Final URL after any redirect chain, falling back to the requested URL.
    pub effective_url: String,
}

#[async_trait::async_trait]
pub trait PageTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;

    fn cookies(&self) -> CookieSnapshot;
}

pub struct HttpTransport {
    client: Client,
    jar: Arc<CookieStoreMutex>,
}

impl HttpTransport {
    pub fn new(headers: HeaderMap) -> Result<Self> {
        let jar = Arc::new(CookieStoreMutex::new(CookieStore::default()));

        let client = Client::builder()
            .default_headers(headers)
            .cookie_provider(Arc::clone(&jar))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, jar })
    }
}

#[async_trait::async_trait]
impl PageTransport for HttpTransport {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let effective_url = response.url().to_string();
        trace!(%status, %effective_url, "Request finished");

        let body = response.bytes().await?.to_vec();

        Ok(FetchedPage {
            status,
            body,
            effective_url,
        })
    }

    fn cookies(&self) -> CookieSnapshot {
        let Ok(store) = self.jar.lock() else {
            return CookieSnapshot::default();
        };

        store
            .iter_unexpired()
            .map(|cookie| SessionCookie {
                name: cookie.name().to_string(),
                value: cookie.value().to_string(),
                domain: cookie.domain().map(str::to_string),
                path: cookie.path().map(str::to_string),
            })
            .collect()
    }
}
