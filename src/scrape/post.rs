use super::{data_page, AnchorError};
use crate::error::Result as ImgchestResult;
use crate::post::PostPrivacy;
use crate::utils::empty_string_as_none;

use chrono::{offset::Utc, DateTime};

use scraper::Html;

use serde::{Deserialize, Serialize};

use std::num::NonZeroU32;

use thiserror::Error;

/// Why a post page couldn't be scraped.
#[derive(Debug, Error)]
pub enum ScrapedPostError {
    /// The element holding the page document wasn't found.
    #[error("missing {0}")]
    MissingElement(&'static str),

    /// The element holding the page document lacks an attribute.
    #[error("missing attribute {0}")]
    MissingAttribute(&'static str),

    /// The page document isn't JSON, or doesn't describe a post the way it used to.
    #[error("invalid data page")]
    InvalidDataPage(#[source] serde_json::Error),

    /// The page document is well formed but lacks something a post always has.
    #[error("missing field {0}")]
    MissingField(&'static str),

    /// The page was rendered by an unexpected component.
    #[error("unexpected page component {0:?}")]
    UnexpectedComponent(String),

    /// The page says the post has fewer files than it lists.
    #[error("page lists {found} files but the post has {expected}")]
    InconsistentFiles { expected: u64, found: usize },

    /// The website answered with an error page: the post was removed, is private, or never
    /// existed.
    #[error("post unavailable (status {status})")]
    PostUnavailable { status: u16 },
}

impl ScrapedPostError {
    /// Whether the failure means the website's markup changed, as opposed to the post
    /// legitimately not being available.
    pub fn is_markup_drift(&self) -> bool {
        !matches!(self, ScrapedPostError::PostUnavailable { .. })
    }
}

impl From<AnchorError> for ScrapedPostError {
    fn from(e: AnchorError) -> Self {
        match e {
            AnchorError::MissingElement => ScrapedPostError::MissingElement("app div"),
            AnchorError::MissingAttribute => ScrapedPostError::MissingAttribute("data-page"),
            AnchorError::InvalidJson(e) => ScrapedPostError::InvalidDataPage(e),
        }
    }
}

/// A post, as shown on its page.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct ScrapedPost {
    pub id: String,
    pub title: String,
    /// `None` for anonymous posts.
    pub username: Option<String>,
    pub privacy: Option<PostPrivacy>,
    pub views: Option<u64>,
    pub nsfw: Option<bool>,
    /// Number of files in the post. Falls back to the number of listed files.
    pub image_count: u64,
    pub created: Option<DateTime<Utc>>,
    /// Files, in the order the page lists them.
    pub files: Vec<ScrapedPostFile>,
}

/// A file, as shown on its post's page.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct ScrapedPostFile {
    pub id: String,
    #[serde(default, with = "empty_string_as_none")]
    pub description: Option<String>,
    /// The file itself. For videos, this is an animated preview.
    pub link: String,
    /// The video, if the file is one.
    #[serde(default)]
    pub video_link: Option<String>,
    #[serde(default)]
    pub position: Option<NonZeroU32>,
}

#[derive(Debug, Deserialize)]
struct PostProps {
    #[serde(default)]
    post: Option<PagePost>,
}

#[derive(Debug, Deserialize)]
struct PagePost {
    id: String,
    title: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    privacy: Option<String>,
    #[serde(default)]
    views: Option<u64>,
    #[serde(default)]
    nsfw: Option<serde_json::Value>,
    #[serde(default)]
    image_count: Option<u64>,
    #[serde(default)]
    created: Option<DateTime<Utc>>,
    files: Vec<ScrapedPostFile>,
}

impl ScrapedPost {
    /// Scrape a post out of a parsed post page.
    pub fn from_html(html: &Html) -> Result<Self, ScrapedPostError> {
        let page = data_page(html)?;

        if let Some(status) = page.error_status() {
            return Err(ScrapedPostError::PostUnavailable { status });
        }
        if !page.is_component("Post") {
            return Err(ScrapedPostError::UnexpectedComponent(page.component));
        }

        let props: PostProps = serde_json::from_value(page.into_props())
            .map_err(ScrapedPostError::InvalidDataPage)?;
        let post = props.post.ok_or(ScrapedPostError::MissingField("post"))?;

        if post.id.is_empty() {
            return Err(ScrapedPostError::MissingField("id"));
        }
        if post.files.is_empty() {
            return Err(ScrapedPostError::MissingField("files"));
        }

        let image_count = post.image_count.unwrap_or(post.files.len() as u64);
        if image_count < post.files.len() as u64 {
            return Err(ScrapedPostError::InconsistentFiles {
                expected: image_count,
                found: post.files.len(),
            });
        }

        let nsfw = post.nsfw.and_then(|v| match v {
            serde_json::Value::Bool(b) => Some(b),
            serde_json::Value::Number(n) => n.as_u64().map(|n| n != 0),
            _ => None,
        });

        Ok(ScrapedPost {
            id: post.id,
            title: post.title,
            username: post.username.filter(|name| !name.is_empty()),
            privacy: post.privacy.and_then(|p| p.parse().ok()),
            views: post.views,
            nsfw,
            image_count,
            created: post.created,
            files: post.files,
        })
    }
}

/// Scrape a post out of the HTML of its page.
pub fn parse_post_page(text: &str) -> ImgchestResult<ScrapedPost> {
    let html = Html::parse_document(text);
    Ok(ScrapedPost::from_html(&html)?)
}
