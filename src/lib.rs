//! Wrapper crate for the [imgchest.com](https://imgchest.com) API.
//!
//! ## Usage
//!
//! First, create a [`Client`]. Most API endpoints need a token, which you can generate from your
//! account settings on the website.
//!
//! ```no_run
//! # use imgchest::client::Client;
//! # fn main() -> Result<(), imgchest::error::Error> {
//! let client = Client::new()?.with_token("my-api-token");
//! # Ok(()) }
//! ```
//!
//! Now it's ready to go! For example you can get post `3qe4gdvj4j2` like this:
//!
//! ```no_run
//! # use imgchest::client::Client;
//! # #[tokio::main]
//! # async fn main() -> Result<(), imgchest::error::Error> {
//! # let client = Client::new()?.with_token("my-api-token");
//! let post = client.get_post("3qe4gdvj4j2").await?;
//!
//! assert_eq!(post.id, "3qe4gdvj4j2");
//! # Ok(()) }
//! ```
//!
//! Or upload some images:
//!
//! ```no_run
//! # use imgchest::client::Client;
//! # use imgchest::post::{CreatePostBuilder, PostPrivacy, UploadPostFile};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = Client::new()?.with_token("my-api-token");
//! let post = CreatePostBuilder::new()
//!     .title("Holiday")
//!     .privacy(PostPrivacy::Hidden)
//!     .file(UploadPostFile::from_path("beach.jpg").await?)
//!     .send(&client)
//!     .await?;
//!
//! println!("https://imgchest.com/p/{}", post.id);
//! # Ok(()) }
//! ```
//!
//! Browsing posts doesn't need a token. Listings can be consumed page by page, or as a stream
//! that fetches pages lazily:
//!
//! ```no_run
//! # use futures::prelude::*;
//! # use imgchest::client::Client;
//! # use imgchest::list::{ListPostsBuilder, SortOrder};
//! # #[tokio::main]
//! # async fn main() -> Result<(), imgchest::error::Error> {
//! # let client = Client::new()?;
//! let posts = client
//!     .list_posts_stream(ListPostsBuilder::new().sort(SortOrder::New))
//!     .take(20);
//! futures::pin_mut!(posts);
//!
//! while let Some(post) = posts.next().await {
//!     println!("{}", post?.title);
//! }
//! # Ok(()) }
//! ```
//!
//! ## Scraping
//!
//! Some data is only shown on the website: anonymous posts, files of posts you don't own,
//! profile statistics. The [`scrape`] module extracts it from the HTML pages. It depends on the
//! website's markup, so expect it to break when the website changes.
//!
//! ## Rate Limiting
//!
//! The API allows 60 requests per minute per token. With the `rate-limit` feature (enabled by
//! default), a [`Client`] and its clones stay under 55 requests per minute, waiting when the
//! budget is spent. Requests to the website aren't counted.
//!
//! [`Client`]: client/struct.Client.html

mod utils;

/// Client related structures.
pub mod client;

/// Error management.
pub mod error;

/// Post management.
pub mod post;

/// File management.
pub mod file;

/// User lookup.
pub mod user;

/// Post listings.
pub mod list;

pub mod scrape;
