use crate::client::{Client, FormPart, RequestBody, Transport};
use crate::error::{Error, InvalidRequestError, Result as ImgchestResult};
use crate::file::{FileUpdate, PostFile};
use crate::utils::bool_to_str;

use chrono::{offset::Utc, DateTime};

use derivative::Derivative;

use reqwest::Method;

use serde::{Deserialize, Serialize};

use serde_with::{serde_as, BoolFromInt, PickFirst};

use std::{fmt, path::Path, str::FromStr};

use thiserror::Error;

/// Titles shorter than this are refused by the API.
pub const MIN_TITLE_LEN: usize = 3;

/// Who can see a post.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PostPrivacy {
    /// Listed on the front page and on the uploader's profile.
    Public,
    /// Only reachable through its link.
    Hidden,
    /// Only visible to the uploader.
    Secret,
}

impl PostPrivacy {
    /// The value used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            PostPrivacy::Public => "public",
            PostPrivacy::Hidden => "hidden",
            PostPrivacy::Secret => "secret",
        }
    }
}

impl fmt::Display for PostPrivacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown post privacy {0:?}")]
pub struct ParsePrivacyError(String);

impl FromStr for PostPrivacy {
    type Err = ParsePrivacyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(PostPrivacy::Public),
            "hidden" => Ok(PostPrivacy::Hidden),
            "secret" => Ok(PostPrivacy::Secret),
            _ => Err(ParsePrivacyError(s.to_string())),
        }
    }
}

/// Structure representing a post, as returned by the API.
#[serde_as]
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub username: String,
    pub privacy: PostPrivacy,
    pub report_status: i32,
    pub views: u64,
    #[serde_as(as = "PickFirst<(_, BoolFromInt)>")]
    pub nsfw: bool,
    pub image_count: u64,
    pub created: DateTime<Utc>,
    /// The files of this post, ordered by position.
    #[serde(rename = "images")]
    pub files: Vec<PostFile>,
    /// Only present if the current user owns this post.
    #[serde(default)]
    pub delete_url: Option<String>,
}

/// A file waiting to be uploaded.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct UploadPostFile {
    file_name: String,
    #[derivative(Debug = "ignore")]
    data: Vec<u8>,
}

impl UploadPostFile {
    /// Create this from bytes.
    pub fn from_bytes(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        UploadPostFile {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Read the file at `path`, naming the upload after it.
    pub async fn from_path<P>(path: P) -> std::io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "missing or non unicode file name",
                )
            })?
            .to_string();

        let data = tokio::fs::read(path).await?;

        Ok(Self::from_bytes(file_name, data))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn into_part(self) -> FormPart {
        FormPart::File {
            name: String::from("images[]"),
            file_name: self.file_name,
            data: self.data,
        }
    }
}

fn check_title(title: Option<&str>) -> Result<(), InvalidRequestError> {
    match title.map(|t| t.chars().count()) {
        Some(len) if len < MIN_TITLE_LEN => Err(InvalidRequestError::TitleTooShort { len }),
        _ => Ok(()),
    }
}

fn text_part(name: &str, value: &str) -> FormPart {
    FormPart::Text {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// A builder for creating a post.
///
/// ```no_run
/// # use imgchest::client::Client;
/// # use imgchest::post::{CreatePostBuilder, PostPrivacy, UploadPostFile};
/// # #[tokio::main]
/// # async fn main() -> imgchest::error::Result<()> {
/// let client = Client::new()?.with_token("my-api-token");
///
/// let post = CreatePostBuilder::new()
///     .title("Cats")
///     .privacy(PostPrivacy::Hidden)
///     .file(UploadPostFile::from_bytes("cat.png", std::fs::read("cat.png").unwrap()))
///     .send(&client)
///     .await?;
///
/// println!("created {}", post.id);
/// # Ok(()) }
/// ```
#[derive(Debug, Default)]
pub struct CreatePostBuilder {
    title: Option<String>,
    privacy: Option<PostPrivacy>,
    anonymous: Option<bool>,
    nsfw: Option<bool>,
    files: Vec<UploadPostFile>,
}

impl CreatePostBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title. It must be at least 3 characters long.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the post privacy. The service defaults to [`PostPrivacy::Hidden`].
    pub fn privacy(mut self, privacy: PostPrivacy) -> Self {
        self.privacy = Some(privacy);
        self
    }

    /// Whether the post should be tied to the user.
    pub fn anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = Some(anonymous);
        self
    }

    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = Some(nsfw);
        self
    }

    /// Add a file. Files keep the order in which they are added.
    pub fn file(mut self, file: UploadPostFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn files<I: IntoIterator<Item = UploadPostFile>>(mut self, files: I) -> Self {
        self.files.extend(files);
        self
    }

    /// Upload the post. Shorthand for [`Client::create_post`].
    pub async fn send<T: Transport>(self, client: &Client<T>) -> ImgchestResult<Post> {
        client.create_post(self).await
    }

    fn into_body(self) -> Result<RequestBody, InvalidRequestError> {
        check_title(self.title.as_deref())?;
        if self.files.is_empty() {
            return Err(InvalidRequestError::MissingFiles);
        }

        let mut parts = Vec::with_capacity(self.files.len() + 4);
        if let Some(title) = &self.title {
            parts.push(text_part("title", title));
        }
        if let Some(privacy) = self.privacy {
            parts.push(text_part("privacy", privacy.as_str()));
        }
        if let Some(anonymous) = self.anonymous {
            parts.push(text_part("anonymous", bool_to_str(anonymous)));
        }
        if let Some(nsfw) = self.nsfw {
            parts.push(text_part("nsfw", bool_to_str(nsfw)));
        }
        parts.extend(self.files.into_iter().map(UploadPostFile::into_part));

        Ok(RequestBody::Multipart(parts))
    }
}

/// A builder for updating an existing post.
///
/// Post fields, new files and file descriptions can be changed in one go; [`send`][Self::send]
/// issues one request per kind of change.
#[derive(Debug)]
pub struct UpdatePostBuilder {
    id: String,
    title: Option<String>,
    privacy: Option<PostPrivacy>,
    nsfw: Option<bool>,
    new_files: Vec<UploadPostFile>,
    file_updates: Vec<FileUpdate>,
}

impl UpdatePostBuilder {
    /// Start an empty update of the post `id`.
    pub fn new(id: impl Into<String>) -> Self {
        UpdatePostBuilder {
            id: id.into(),
            title: None,
            privacy: None,
            nsfw: None,
            new_files: Vec::new(),
            file_updates: Vec::new(),
        }
    }

    /// Update the title. It must be at least 3 characters long.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn privacy(mut self, privacy: PostPrivacy) -> Self {
        self.privacy = Some(privacy);
        self
    }

    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = Some(nsfw);
        self
    }

    /// Append a new file to the post.
    pub fn add_file(mut self, file: UploadPostFile) -> Self {
        self.new_files.push(file);
        self
    }

    /// Change the description of one of the post's files.
    pub fn file_update(mut self, update: FileUpdate) -> Self {
        self.file_updates.push(update);
        self
    }

    /// Apply the update. Shorthand for [`Client::update_post`].
    pub async fn send<T: Transport>(self, client: &Client<T>) -> ImgchestResult<Post> {
        client.update_post(self).await
    }

    fn has_post_fields(&self) -> bool {
        self.title.is_some() || self.privacy.is_some() || self.nsfw.is_some()
    }

    fn validate(&self) -> Result<(), InvalidRequestError> {
        if self.id.is_empty() {
            return Err(InvalidRequestError::EmptyId);
        }
        check_title(self.title.as_deref())?;
        if !self.has_post_fields() && self.new_files.is_empty() && self.file_updates.is_empty() {
            return Err(InvalidRequestError::EmptyUpdate);
        }
        for update in &self.file_updates {
            update.validate()?;
        }

        Ok(())
    }

    fn form(&self) -> Vec<(String, String)> {
        let mut form = Vec::new();
        if let Some(title) = &self.title {
            form.push((String::from("title"), title.clone()));
        }
        if let Some(privacy) = self.privacy {
            form.push((String::from("privacy"), privacy.to_string()));
        }
        if let Some(nsfw) = self.nsfw {
            form.push((String::from("nsfw"), bool_to_str(nsfw).to_string()));
        }
        form
    }
}

fn files_body<I>(files: I) -> Result<RequestBody, InvalidRequestError>
where
    I: IntoIterator<Item = UploadPostFile>,
{
    let parts: Vec<_> = files.into_iter().map(UploadPostFile::into_part).collect();
    if parts.is_empty() {
        return Err(InvalidRequestError::MissingFiles);
    }

    Ok(RequestBody::Multipart(parts))
}

impl<T: Transport> Client<T> {
    /// Returns the post with the given ID.
    ///
    /// ```no_run
    /// # use imgchest::client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> imgchest::error::Result<()> {
    /// let client = Client::new()?.with_token("my-api-token");
    /// let post = client.get_post("3qe4gdvj4j2").await?;
    ///
    /// assert_eq!(post.id, "3qe4gdvj4j2");
    /// # Ok(()) }
    /// ```
    ///
    /// _Note: requires a token._
    pub async fn get_post(&self, id: &str) -> ImgchestResult<Post> {
        let url = self.api_endpoint(&["v1", "post", id])?;
        let request = self.authorized(Method::GET, url)?;

        self.api_json(request).await
    }

    /// Create a post. Nothing is sent if the builder is invalid.
    ///
    /// _Note: requires a token._
    pub async fn create_post(&self, builder: CreatePostBuilder) -> ImgchestResult<Post> {
        let body = builder.into_body()?;
        let url = self.api_endpoint(&["v1", "post"])?;

        let mut request = self.authorized(Method::POST, url)?;
        request.body = body;

        self.api_json(request).await
    }

    /// Apply a [`UpdatePostBuilder`]. Post fields are patched first, then new files are
    /// uploaded, then file descriptions are changed. Stops at the first failing step.
    ///
    /// _Note: requires a token._
    pub async fn update_post(&self, builder: UpdatePostBuilder) -> ImgchestResult<Post> {
        builder.validate()?;
        let post_url = self.api_endpoint(&["v1", "post", &builder.id])?;

        let mut post = None;

        if builder.has_post_fields() {
            // The service silently ignores multipart bodies on this route.
            let mut request = self.authorized(Method::PATCH, post_url.clone())?;
            request.body = RequestBody::Form(builder.form());

            post = Some(self.api_json(request).await?);
        }

        if !builder.new_files.is_empty() {
            post = Some(self.add_post_files(&builder.id, builder.new_files).await?);
        }

        if !builder.file_updates.is_empty() {
            self.update_files_bulk(builder.file_updates).await?;
            post = None;
        }

        match post {
            Some(post) => Ok(post),
            None => self.api_json(self.authorized(Method::GET, post_url)?).await,
        }
    }

    /// Delete a post.
    ///
    /// _Note: requires a token._
    pub async fn delete_post(&self, id: &str) -> ImgchestResult<()> {
        let url = self.api_endpoint(&["v1", "post", id])?;
        let request = self.authorized(Method::DELETE, url)?;

        self.api_completed(request).await?;
        Ok(())
    }

    /// Favorite or unfavorite a post. Returns `true` if the post is now a favorite.
    ///
    /// _Note: requires a token._
    pub async fn favorite_post(&self, id: &str) -> ImgchestResult<bool> {
        let url = self.api_endpoint(&["v1", "post", id, "favorite"])?;
        let request = self.authorized(Method::POST, url)?;

        match self.api_completed(request).await?.as_deref() {
            Some("Favorite added.") => Ok(true),
            Some("Favorite removed.") => Ok(false),
            Some(other) => Err(Error::UnexpectedResponse(format!(
                "unknown favorite message {:?}",
                other
            ))),
            None => Err(Error::UnexpectedResponse(String::from(
                "favorite response has no message",
            ))),
        }
    }

    /// Append files to a post.
    ///
    /// _Note: requires a token._
    pub async fn add_post_files<I>(&self, id: &str, files: I) -> ImgchestResult<Post>
    where
        I: IntoIterator<Item = UploadPostFile>,
    {
        let body = files_body(files)?;
        let url = self.api_endpoint(&["v1", "post", id, "add"])?;

        let mut request = self.authorized(Method::POST, url)?;
        request.body = body;

        self.api_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Request, ScriptedTransport};
    use chrono::TimeZone;
    use std::num::NonZeroU32;

    const POST: &str = include_str!("mocked/post_3qe4gdvj4j2.json");

    fn client(transport: &ScriptedTransport) -> Client<ScriptedTransport> {
        Client::with_transport(transport.clone()).with_token("secret")
    }

    fn multipart(request: &Request) -> &[FormPart] {
        match &request.body {
            RequestBody::Multipart(parts) => parts,
            other => panic!("expected a multipart body, got {:?}", other),
        }
    }

    fn file_names(parts: &[FormPart]) -> Vec<&str> {
        parts
            .iter()
            .filter_map(|part| match part {
                FormPart::File { file_name, .. } => Some(file_name.as_str()),
                FormPart::Text { .. } => None,
            })
            .collect()
    }

    #[test]
    fn privacy_from_str() {
        assert_eq!("public".parse(), Ok(PostPrivacy::Public));
        assert_eq!("hidden".parse(), Ok(PostPrivacy::Hidden));
        assert_eq!("secret".parse(), Ok(PostPrivacy::Secret));
        assert_eq!(
            "private".parse::<PostPrivacy>(),
            Err(ParsePrivacyError(String::from("private")))
        );
    }

    #[test]
    fn privacy_to_string() {
        assert_eq!(PostPrivacy::Public.to_string(), "public");
        assert_eq!(PostPrivacy::Hidden.to_string(), "hidden");
        assert_eq!(PostPrivacy::Secret.to_string(), "secret");
    }

    #[test]
    fn post_from_json() {
        let post: Post = serde_json::from_str::<crate::client::ApiResponse<Post>>(POST)
            .unwrap()
            .data;

        assert_eq!(post.id, "3qe4gdvj4j2");
        assert_eq!(post.title, "Donkey Kong - Video Game From The Mid 80's");
        assert_eq!(post.username, "LunarLandr");
        assert_eq!(post.privacy, PostPrivacy::Public);
        assert_eq!(post.report_status, 1);
        assert_eq!(post.views, 198);
        assert!(!post.nsfw);
        assert_eq!(post.image_count, 2);
        assert_eq!(post.created, Utc.with_ymd_and_hms(2019, 11, 3, 0, 36, 0).unwrap());
        assert_eq!(post.delete_url, None);

        assert_eq!(post.files.len(), 2);
        assert_eq!(post.files[0].id, "nw7w6cmlvye");
        assert_eq!(
            post.files[0].description.as_deref(),
            Some("Released in the arcades in 1981.")
        );
        assert_eq!(
            post.files[0].link,
            "https://cdn.imgchest.com/files/nw7w6cmlvye.png"
        );
        assert_eq!(post.files[0].position, NonZeroU32::new(1).unwrap());
        assert_eq!(post.files[0].original_name, None);

        assert_eq!(post.files[1].id, "kwye3cpag4b");
        assert_eq!(post.files[1].description, None);
        assert_eq!(post.files[1].position, NonZeroU32::new(2).unwrap());
        assert_eq!(post.files[1].original_name.as_deref(), Some("systems.png"));
    }

    #[test]
    fn post_ignores_unknown_fields() {
        let mut json: serde_json::Value = serde_json::from_str(POST).unwrap();
        json["data"]["brand_new_field"] = serde_json::json!({ "nested": [1, 2, 3] });

        let post: crate::client::ApiResponse<Post> = serde_json::from_value(json).unwrap();
        assert_eq!(post.data.id, "3qe4gdvj4j2");
    }

    #[test]
    fn post_missing_field_fails() {
        for field in ["id", "title", "privacy", "created", "images"] {
            let mut json: serde_json::Value = serde_json::from_str(POST).unwrap();
            json["data"].as_object_mut().unwrap().remove(field);

            let result = serde_json::from_value::<crate::client::ApiResponse<Post>>(json);
            assert!(result.is_err(), "missing {} should fail", field);
        }
    }

    #[test]
    fn post_mistyped_field_fails() {
        let mut json: serde_json::Value = serde_json::from_str(POST).unwrap();
        json["data"]["views"] = serde_json::json!("many");

        assert!(serde_json::from_value::<crate::client::ApiResponse<Post>>(json).is_err());
    }

    #[tokio::test]
    async fn get_post_by_id() {
        let transport = ScriptedTransport::new().respond(200, POST);
        let post = client(&transport).get_post("3qe4gdvj4j2").await.unwrap();

        assert_eq!(post.id, "3qe4gdvj4j2");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(
            requests[0].url.as_str(),
            "https://api.imgchest.com/v1/post/3qe4gdvj4j2"
        );
    }

    #[tokio::test]
    async fn get_post_not_found() {
        let transport = ScriptedTransport::new().respond(404, r#"{"error":"not found"}"#);

        match client(&transport).get_post("nope").await {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("not found"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn get_post_bad_payload() {
        let transport = ScriptedTransport::new().respond(200, r#"{"data":{"id":"abc"}}"#);

        assert!(matches!(
            client(&transport).get_post("abc").await,
            Err(Error::Deserialize(_))
        ));
    }

    #[tokio::test]
    async fn get_post_without_token() {
        let transport = ScriptedTransport::new();
        let client = Client::with_transport(transport.clone());

        assert!(matches!(
            client.get_post("abc").await,
            Err(Error::MissingToken)
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn create_post_with_two_files() {
        let transport = ScriptedTransport::new().respond(200, POST);

        let post = CreatePostBuilder::new()
            .file(UploadPostFile::from_bytes("donkey.png", b"first".to_vec()))
            .file(UploadPostFile::from_bytes("systems.png", b"second".to_vec()))
            .privacy(PostPrivacy::Hidden)
            .send(&client(&transport))
            .await
            .unwrap();

        assert_eq!(post.files.len(), 2);
        assert_eq!(post.files[0].id, "nw7w6cmlvye");
        assert_eq!(post.files[1].id, "kwye3cpag4b");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url.as_str(), "https://api.imgchest.com/v1/post");

        let parts = multipart(&requests[0]);
        assert_eq!(file_names(parts), ["donkey.png", "systems.png"]);
        assert!(parts.contains(&text_part("privacy", "hidden")));
        assert!(parts
            .iter()
            .filter(|part| matches!(part, FormPart::File { .. }))
            .all(|part| part.name() == "images[]"));
    }

    #[tokio::test]
    async fn create_post_sends_options() {
        let transport = ScriptedTransport::new().respond(200, POST);

        CreatePostBuilder::new()
            .title("Donkey Kong")
            .anonymous(true)
            .nsfw(false)
            .files(vec![UploadPostFile::from_bytes("a.png", b"a".to_vec())])
            .send(&client(&transport))
            .await
            .unwrap();

        let requests = transport.requests();
        let parts = multipart(&requests[0]);

        assert_eq!(
            &parts[..3],
            [
                text_part("title", "Donkey Kong"),
                text_part("anonymous", "true"),
                text_part("nsfw", "false"),
            ]
        );
    }

    #[tokio::test]
    async fn create_post_without_files() {
        let transport = ScriptedTransport::new().respond(200, POST);

        let result = CreatePostBuilder::new()
            .title("Nothing here")
            .send(&client(&transport))
            .await;

        assert!(matches!(
            result,
            Err(Error::InvalidRequest(InvalidRequestError::MissingFiles))
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn create_post_short_title() {
        let transport = ScriptedTransport::new().respond(200, POST);

        let result = CreatePostBuilder::new()
            .title("ab")
            .file(UploadPostFile::from_bytes("a.png", b"a".to_vec()))
            .send(&client(&transport))
            .await;

        assert!(matches!(
            result,
            Err(Error::InvalidRequest(InvalidRequestError::TitleTooShort { len: 2 }))
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn update_post_fields() {
        let transport = ScriptedTransport::new().respond(200, POST);

        UpdatePostBuilder::new("3qe4gdvj4j2")
            .title("Donkey Kong")
            .privacy(PostPrivacy::Secret)
            .send(&client(&transport))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::PATCH);
        assert_eq!(
            requests[0].body,
            RequestBody::Form(vec![
                ("title".into(), "Donkey Kong".into()),
                ("privacy".into(), "secret".into()),
            ])
        );
    }

    #[tokio::test]
    async fn update_post_all_steps() {
        let transport = ScriptedTransport::new()
            .respond(200, POST)
            .respond(200, POST)
            .respond(200, r#"{"data":[]}"#)
            .respond(200, POST);

        UpdatePostBuilder::new("3qe4gdvj4j2")
            .nsfw(true)
            .add_file(UploadPostFile::from_bytes("new.png", b"new".to_vec()))
            .file_update(FileUpdate::new("nw7w6cmlvye", "A new description"))
            .send(&client(&transport))
            .await
            .unwrap();

        let requests = transport.requests();
        let steps: Vec<_> = requests
            .iter()
            .map(|r| (r.method.clone(), r.url.path().to_string()))
            .collect();

        assert_eq!(
            steps,
            [
                (Method::PATCH, String::from("/v1/post/3qe4gdvj4j2")),
                (Method::POST, String::from("/v1/post/3qe4gdvj4j2/add")),
                (Method::PATCH, String::from("/v1/files")),
                (Method::GET, String::from("/v1/post/3qe4gdvj4j2")),
            ]
        );
        assert_eq!(file_names(multipart(&requests[1])), ["new.png"]);
    }

    #[tokio::test]
    async fn update_post_stops_at_first_error() {
        let transport = ScriptedTransport::new().respond(403, r#"{"message":"Forbidden."}"#);

        let result = UpdatePostBuilder::new("3qe4gdvj4j2")
            .title("Donkey Kong")
            .add_file(UploadPostFile::from_bytes("new.png", b"new".to_vec()))
            .send(&client(&transport))
            .await;

        assert!(matches!(result, Err(Error::Api { status: 403, .. })));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn update_post_validation() {
        let transport = ScriptedTransport::new();
        let client = client(&transport);

        assert!(matches!(
            UpdatePostBuilder::new("").title("Title").send(&client).await,
            Err(Error::InvalidRequest(InvalidRequestError::EmptyId))
        ));
        assert!(matches!(
            UpdatePostBuilder::new("abc").send(&client).await,
            Err(Error::InvalidRequest(InvalidRequestError::EmptyUpdate))
        ));
        assert!(matches!(
            UpdatePostBuilder::new("abc")
                .file_update(FileUpdate::new("def", ""))
                .send(&client)
                .await,
            Err(Error::InvalidRequest(InvalidRequestError::EmptyDescription))
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn delete_post() {
        let transport = ScriptedTransport::new().respond(200, r#"{"success":"true"}"#);

        client(&transport).delete_post("abc").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].url.path(), "/v1/post/abc");
    }

    #[tokio::test]
    async fn favorite_post() {
        let transport = ScriptedTransport::new()
            .respond(200, r#"{"success":"true","message":"Favorite added."}"#)
            .respond(200, r#"{"success":"true","message":"Favorite removed."}"#)
            .respond(200, r#"{"success":"true","message":"Huh?"}"#);
        let client = client(&transport);

        assert!(client.favorite_post("abc").await.unwrap());
        assert!(!client.favorite_post("abc").await.unwrap());
        assert!(matches!(
            client.favorite_post("abc").await,
            Err(Error::UnexpectedResponse(_))
        ));
    }

    #[tokio::test]
    async fn add_post_files_requires_files() {
        let transport = ScriptedTransport::new();

        assert!(matches!(
            client(&transport).add_post_files("abc", Vec::new()).await,
            Err(Error::InvalidRequest(InvalidRequestError::MissingFiles))
        ));
        assert!(transport.requests().is_empty());
    }
}
