use crate::client::{Client, Transport};
use crate::error::Result as ImgchestResult;

use chrono::{offset::Utc, DateTime};

use reqwest::Method;

use serde::{Deserialize, Serialize};

/// A user, as returned by the API.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct User {
    pub username: String,
    /// Visibility of the user's profile, e.g. `"public"`.
    pub privacy: String,
    /// Number of posts created by this user.
    pub posts: u64,
    /// Number of comments written by this user.
    pub comments: u64,
    /// Number of times this user has been flagged.
    pub flagged: u64,
    pub created: DateTime<Utc>,
}

impl<T: Transport> Client<T> {
    /// Returns the user with the given name.
    ///
    /// ```no_run
    /// # use imgchest::client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> imgchest::error::Result<()> {
    /// let client = Client::new()?.with_token("my-api-token");
    /// let user = client.get_user("LunarLandr").await?;
    ///
    /// println!("{} has {} posts", user.username, user.posts);
    /// # Ok(()) }
    /// ```
    ///
    /// _Note: requires a token. For statistics the API doesn't expose, see
    /// [`Client::get_scraped_user`]._
    pub async fn get_user(&self, username: &str) -> ImgchestResult<User> {
        let url = self.api_endpoint(&["v1", "user", username])?;
        let request = self.authorized(Method::GET, url)?;

        self.api_json(request).await
    }
}
