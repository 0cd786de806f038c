//! Scraping of the website's HTML pages, for data the API doesn't expose.
//!
//! Every page of the website is rendered client-side from a JSON document stored in the
//! `data-page` attribute of the `<div id="app">` element. Scraping means locating that element,
//! decoding the document and checking it describes the expected page. Scraped values are
//! best-effort: anything the page may omit is an `Option`.

mod post;
mod user;

pub use self::post::{parse_post_page, ScrapedPost, ScrapedPostError, ScrapedPostFile};
pub use self::user::{parse_user_page, ScrapedUser, ScrapedUserError};

use crate::client::{Client, Transport};
use crate::error::Result as ImgchestResult;

use once_cell::sync::Lazy;

use scraper::{Html, Selector};

use serde::Deserialize;

static APP_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("#app").unwrap());

/// Why the page document couldn't be found or decoded.
#[derive(Debug)]
enum AnchorError {
    MissingElement,
    MissingAttribute,
    InvalidJson(serde_json::Error),
}

/// The page document, before its props are interpreted.
#[derive(Debug, Deserialize)]
struct DataPage {
    /// Name of the client-side component rendering the page, e.g. `"Post/Show"`.
    #[serde(default)]
    component: String,
    /// `null` and absent props both read as no props.
    #[serde(default)]
    props: Option<serde_json::Map<String, serde_json::Value>>,
}

impl DataPage {
    /// Whether the page was rendered by `name` or one of its sub-components (`name/...`).
    fn is_component(&self, name: &str) -> bool {
        match self.component.strip_prefix(name) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// HTTP status of the page if it's an error page rather than the requested content.
    fn error_status(&self) -> Option<u16> {
        if !self.is_component("Error") {
            return None;
        }

        let status = self
            .props
            .as_ref()
            .and_then(|props| props.get("status"))
            .and_then(serde_json::Value::as_u64);
        Some(status.and_then(|s| u16::try_from(s).ok()).unwrap_or(404))
    }

    fn into_props(self) -> serde_json::Value {
        serde_json::Value::Object(self.props.unwrap_or_default())
    }
}

fn data_page(html: &Html) -> Result<DataPage, AnchorError> {
    let app = html
        .select(&APP_SELECTOR)
        .next()
        .ok_or(AnchorError::MissingElement)?;
    let attr = app
        .value()
        .attr("data-page")
        .ok_or(AnchorError::MissingAttribute)?;

    serde_json::from_str(attr).map_err(AnchorError::InvalidJson)
}

impl<T: Transport> Client<T> {
    /// Scrape a post from its page.
    ///
    /// ```no_run
    /// # use imgchest::client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> imgchest::error::Result<()> {
    /// let client = Client::new()?;
    /// let post = client.get_scraped_post("3qe4gdvj4j2").await?;
    ///
    /// for file in &post.files {
    ///     println!("{}", file.link);
    /// }
    /// # Ok(()) }
    /// ```
    ///
    /// _Note: doesn't need a token. This depends on the website's markup and breaks when it
    /// changes, see [`ScrapedPostError::is_markup_drift`]._
    pub async fn get_scraped_post(&self, id: &str) -> ImgchestResult<ScrapedPost> {
        let url = self.web_endpoint(&["p", id])?;
        let text = self.web_page(url).await?;

        // The parsed DOM isn't `Send`, keep it off the async task.
        let post = tokio::task::spawn_blocking(move || parse_post_page(&text)).await??;

        Ok(post)
    }

    /// Scrape a user from their profile page. Profiles show statistics that
    /// [`Client::get_user`] doesn't return.
    ///
    /// _Note: doesn't need a token. This depends on the website's markup and breaks when it
    /// changes._
    pub async fn get_scraped_user(&self, name: &str) -> ImgchestResult<ScrapedUser> {
        let url = self.web_endpoint(&["u", name])?;
        let text = self.web_page(url).await?;

        let user = tokio::task::spawn_blocking(move || parse_user_page(&text)).await??;

        Ok(user)
    }
}
