use crate::client::{Client, RequestBody, Transport};
use crate::error::{InvalidRequestError, Result as ImgchestResult};
use crate::utils::empty_string_as_none;

use chrono::{offset::Utc, DateTime};

use reqwest::Method;

use serde::{Deserialize, Serialize};

use std::num::NonZeroU32;

/// A file attached to a [`Post`](crate::post::Post).
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct PostFile {
    pub id: String,
    #[serde(default, with = "empty_string_as_none")]
    pub description: Option<String>,
    /// Where the file itself can be downloaded.
    pub link: String,
    /// Position of the file in its post, starting at 1.
    pub position: NonZeroU32,
    pub created: DateTime<Utc>,
    /// Only present if the current user uploaded this file.
    #[serde(default)]
    pub original_name: Option<String>,
}

/// A new description for a file.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct FileUpdate {
    pub id: String,
    /// The API doesn't allow clearing a description, so this can't be empty.
    pub description: String,
}

impl FileUpdate {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        FileUpdate {
            id: id.into(),
            description: description.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), InvalidRequestError> {
        if self.id.is_empty() {
            return Err(InvalidRequestError::EmptyId);
        }
        if self.description.is_empty() {
            return Err(InvalidRequestError::EmptyDescription);
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct BulkFileUpdate<'a> {
    data: &'a [FileUpdate],
}

impl<T: Transport> Client<T> {
    /// Returns the file with the given ID.
    ///
    /// _Note: requires a token. The service has been seen answering this endpoint with no data,
    /// which surfaces as [`Error::Deserialize`](crate::error::Error::Deserialize)._
    pub async fn get_file(&self, id: &str) -> ImgchestResult<PostFile> {
        let url = self.api_endpoint(&["v1", "file", id])?;
        let request = self.authorized(Method::GET, url)?;

        self.api_json(request).await
    }

    /// Change the description of a file.
    ///
    /// _Note: requires a token._
    pub async fn update_file(&self, id: &str, description: &str) -> ImgchestResult<()> {
        FileUpdate::new(id, description).validate()?;
        let url = self.api_endpoint(&["v1", "file", id])?;

        let mut request = self.authorized(Method::PATCH, url)?;
        request.body = RequestBody::Form(vec![(
            String::from("description"),
            description.to_string(),
        )]);

        self.api_completed(request).await?;
        Ok(())
    }

    /// Delete a file.
    ///
    /// _Note: requires a token._
    pub async fn delete_file(&self, id: &str) -> ImgchestResult<()> {
        let url = self.api_endpoint(&["v1", "file", id])?;
        let request = self.authorized(Method::DELETE, url)?;

        self.api_completed(request).await?;
        Ok(())
    }

    /// Change the descriptions of many files with a single request. Returns the updated files.
    ///
    /// Every update is validated before anything is sent.
    ///
    /// _Note: requires a token._
    pub async fn update_files_bulk<I>(&self, files: I) -> ImgchestResult<Vec<PostFile>>
    where
        I: IntoIterator<Item = FileUpdate>,
    {
        let data: Vec<_> = files.into_iter().collect();
        if data.is_empty() {
            return Err(InvalidRequestError::EmptyUpdate.into());
        }
        for update in &data {
            update.validate()?;
        }

        let url = self.api_endpoint(&["v1", "files"])?;
        let mut request = self.authorized(Method::PATCH, url)?;
        request.body = RequestBody::Json(serde_json::to_vec(&BulkFileUpdate { data: &data })?);

        self.api_json(request).await
    }
}
