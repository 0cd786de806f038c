use crate::client::{Client, Transport};
use crate::error::Result as ImgchestResult;

use either::Either;

use futures::stream::unfold;
use futures::{Stream, StreamExt};

use serde::{Deserialize, Serialize};

use serde_with::{serde_as, BoolFromInt, DisplayFromStr, PickFirst};

use std::collections::HashMap;

/// How to sort the results of a [`ListPostsBuilder`].
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most popular first.
    #[default]
    Popular,
    /// Newest first.
    New,
    /// Oldest first.
    Old,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Popular => "popular",
            SortOrder::New => "new",
            SortOrder::Old => "old",
        }
    }
}

/// A post, as shown in listings.
#[serde_as]
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ListPostsPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub link: String,
    #[serde_as(as = "BoolFromInt")]
    pub nsfw: bool,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub score: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub comments: u64,
    pub views: u64,
    pub thumbnail: Thumbnail,
    /// Fields this crate doesn't know about.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// The file shown as a post's preview in listings.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Thumbnail {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub link: String,
    /// Fields this crate doesn't know about.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ListPostsPage {
    data: Vec<ListPostsPost>,
    #[serde(default)]
    links: Option<PageLinks>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
struct PageLinks {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    current_page: u64,
    last_page: u64,
}

impl ListPostsPage {
    /// Whether the page after this one may hold more posts. Without pagination information,
    /// only an empty page ends the listing.
    fn has_next(&self) -> bool {
        if self.data.is_empty() {
            return false;
        }

        match (&self.links, &self.meta) {
            (Some(links), _) => links.next.is_some(),
            (None, Some(meta)) => meta.current_page < meta.last_page,
            (None, None) => true,
        }
    }
}

/// A listing query.
///
/// ```
/// # use imgchest::list::{ListPostsBuilder, SortOrder};
/// let query = ListPostsBuilder::new()
///     .sort(SortOrder::New)
///     .page(2)
///     .username("LunarLandr")
///     .profile(true);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ListPostsBuilder {
    sort: SortOrder,
    page: u64,
    username: Option<String>,
    profile: bool,
}

impl Default for ListPostsBuilder {
    fn default() -> Self {
        ListPostsBuilder {
            sort: SortOrder::default(),
            page: 1,
            username: None,
            profile: false,
        }
    }
}

impl ListPostsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// The page to fetch, or to start streaming from. Pages start at 1; 0 is treated as 1.
    pub fn page(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    /// Only list posts uploaded by `username`.
    pub fn username<S: Into<String>>(mut self, username: S) -> Self {
        self.username = Some(username.into());
        self
    }

    /// List posts the way the user's own profile page does.
    pub fn profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    /// Fetch a single page. Shorthand for [`Client::list_posts`].
    pub async fn send<T: Transport>(
        self,
        client: &Client<T>,
    ) -> ImgchestResult<Vec<ListPostsPost>> {
        client.list_posts(self).await
    }

    /// Stream every post from the configured page on. Shorthand for
    /// [`Client::list_posts_stream`].
    pub fn into_stream<T: Transport>(
        self,
        client: &Client<T>,
    ) -> impl Stream<Item = ImgchestResult<ListPostsPost>> + Send + '_ {
        client.list_posts_stream(self)
    }
}

impl<T: Transport> Client<T> {
    /// Returns a single page of posts.
    ///
    /// _Note: this uses an undocumented endpoint of the website and doesn't need a token._
    pub async fn list_posts(&self, query: ListPostsBuilder) -> ImgchestResult<Vec<ListPostsPost>> {
        Ok(self.list_posts_page(&query).await?.data)
    }

    /// Returns a Stream over every post matching the query, fetching one page at a time.
    ///
    /// ```no_run
    /// # use imgchest::client::Client;
    /// # use imgchest::list::{ListPostsBuilder, SortOrder};
    /// use futures::prelude::*;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> imgchest::error::Result<()> {
    /// let client = Client::new()?;
    ///
    /// let posts = client.list_posts_stream(ListPostsBuilder::new().sort(SortOrder::New));
    /// futures::pin_mut!(posts);
    ///
    /// while let Some(post) = posts.next().await {
    ///     println!("{}", post?.title);
    /// }
    /// # Ok(()) }
    /// ```
    ///
    /// The stream ends after the last page, or right after yielding an error.
    pub fn list_posts_stream(
        &self,
        query: ListPostsBuilder,
    ) -> impl Stream<Item = ImgchestResult<ListPostsPost>> + Send + '_ {
        unfold(Some(query), move |query| self.list_posts_step(query))
            .map(futures::stream::iter)
            .flatten()
    }

    async fn list_posts_step(
        &self,
        query: Option<ListPostsBuilder>,
    ) -> Option<(
        impl Iterator<Item = ImgchestResult<ListPostsPost>>,
        Option<ListPostsBuilder>,
    )> {
        // `query` is `None` once the listing is over, either because the previous page was the
        // last one or because it errored.
        let mut query = query?;

        let page = match self.list_posts_page(&query).await {
            Err(e) => return Some((Either::Left(std::iter::once(Err(e))), None)),
            Ok(page) if page.data.is_empty() => return None,
            Ok(page) => page,
        };

        let next = if page.has_next() {
            query.page += 1;
            Some(query)
        } else {
            None
        };

        Some((Either::Right(page.data.into_iter().map(Ok)), next))
    }

    async fn list_posts_page(&self, query: &ListPostsBuilder) -> ImgchestResult<ListPostsPage> {
        let mut url = self.web_endpoint(&["api", "posts"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("sort", query.sort.as_str());
            pairs.append_pair("page", &query.page.to_string());
            if let Some(username) = &query.username {
                pairs.append_pair("username", username);
            }
            if query.profile {
                pairs.append_pair("profile", "true");
            }
        }

        self.web_json(url).await
    }
}
