use super::{data_page, AnchorError};
use crate::error::Result as ImgchestResult;
use crate::utils::mdy_date;

use chrono::NaiveDate;

use scraper::Html;

use serde::{Deserialize, Serialize};

use thiserror::Error;

/// Why a profile page couldn't be scraped.
#[derive(Debug, Error)]
pub enum ScrapedUserError {
    #[error("missing {0}")]
    MissingElement(&'static str),

    #[error("missing attribute {0}")]
    MissingAttribute(&'static str),

    #[error("invalid data page")]
    InvalidDataPage(#[source] serde_json::Error),

    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("unexpected page component {0:?}")]
    UnexpectedComponent(String),

    /// The website answered with an error page, usually because the user doesn't exist.
    #[error("user unavailable (status {status})")]
    UserUnavailable { status: u16 },
}

impl ScrapedUserError {
    /// Whether the failure means the website's markup changed, as opposed to the user
    /// legitimately not being available.
    pub fn is_markup_drift(&self) -> bool {
        !matches!(self, ScrapedUserError::UserUnavailable { .. })
    }
}

impl From<AnchorError> for ScrapedUserError {
    fn from(e: AnchorError) -> Self {
        match e {
            AnchorError::MissingElement => ScrapedUserError::MissingElement("app div"),
            AnchorError::MissingAttribute => ScrapedUserError::MissingAttribute("data-page"),
            AnchorError::InvalidJson(e) => ScrapedUserError::InvalidDataPage(e),
        }
    }
}

/// A user, as shown on their profile page.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct ScrapedUser {
    pub name: String,
    pub posts: u64,
    pub comments: u64,
    /// Profiles only show the day the account was created.
    #[serde(with = "mdy_date")]
    pub created: NaiveDate,
    /// Total views of the user's posts.
    pub post_views: Option<u64>,
    pub experience: Option<u64>,
    /// Number of posts the user favorited.
    pub favorites: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UserProps {
    #[serde(default, rename = "targetUser")]
    target_user: Option<TargetUser>,
}

#[derive(Debug, Deserialize)]
struct TargetUser {
    username: String,
    post_count: u64,
    comment_count: u64,
    #[serde(with = "mdy_date")]
    created_at: NaiveDate,
    #[serde(default)]
    post_views: Option<u64>,
    #[serde(default)]
    experience: Option<u64>,
    #[serde(default)]
    favorite_count: Option<u64>,
}

impl ScrapedUser {
    /// Scrape a user out of a parsed profile page.
    pub fn from_html(html: &Html) -> Result<Self, ScrapedUserError> {
        let page = data_page(html)?;

        if let Some(status) = page.error_status() {
            return Err(ScrapedUserError::UserUnavailable { status });
        }
        if !page.is_component("User") {
            return Err(ScrapedUserError::UnexpectedComponent(page.component));
        }

        let props: UserProps = serde_json::from_value(page.into_props())
            .map_err(ScrapedUserError::InvalidDataPage)?;
        let user = props
            .target_user
            .ok_or(ScrapedUserError::MissingField("targetUser"))?;

        if user.username.is_empty() {
            return Err(ScrapedUserError::MissingField("username"));
        }

        Ok(ScrapedUser {
            name: user.username,
            posts: user.post_count,
            comments: user.comment_count,
            created: user.created_at,
            post_views: user.post_views,
            experience: user.experience,
            favorites: user.favorite_count,
        })
    }
}

/// Scrape a user out of the HTML of their profile page.
pub fn parse_user_page(text: &str) -> ImgchestResult<ScrapedUser> {
    let html = Html::parse_document(text);
    Ok(ScrapedUser::from_html(&html)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn user_error(text: &str) -> ScrapedUserError {
        match parse_user_page(text) {
            Err(Error::InvalidScrapedUser(e)) => e,
            other => panic!("unexpected result: {:?}", other),
        }
    }

    fn page(document: serde_json::Value) -> String {
        format!(
            r#"<html><body><div id="app" data-page="{}"></div></body></html>"#,
            document.to_string().replace('&', "&amp;").replace('"', "&quot;")
        )
    }

    #[test]
    fn user_page() {
        let user = parse_user_page(include_str!("../mocked/user_page.html")).unwrap();

        assert_eq!(
            user,
            ScrapedUser {
                name: String::from("LunarLandr"),
                posts: 12,
                comments: 3,
                created: NaiveDate::from_ymd_opt(2019, 11, 2).unwrap(),
                post_views: Some(5_473),
                experience: Some(1_290),
                favorites: Some(41),
            }
        );
    }

    #[test]
    fn statistics_are_optional() {
        let text = page(serde_json::json!({
            "component": "User/Show",
            "props": {
                "targetUser": {
                    "username": "quiet",
                    "post_count": 0,
                    "comment_count": 0,
                    "created_at": "01/31/2024"
                }
            }
        }));

        let user = parse_user_page(&text).unwrap();

        assert_eq!(user.created, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(user.post_views, None);
        assert_eq!(user.experience, None);
        assert_eq!(user.favorites, None);
    }

    #[test]
    fn bad_date() {
        let text = page(serde_json::json!({
            "component": "User/Show",
            "props": {
                "targetUser": {
                    "username": "quiet",
                    "post_count": 0,
                    "comment_count": 0,
                    "created_at": "2024-01-31"
                }
            }
        }));

        assert!(matches!(
            user_error(&text),
            ScrapedUserError::InvalidDataPage(_)
        ));
    }

    #[test]
    fn missing_target_user() {
        let text = page(serde_json::json!({ "component": "User/Show", "props": {} }));

        let error = user_error(&text);
        assert!(matches!(error, ScrapedUserError::MissingField("targetUser")));
        assert!(error.is_markup_drift());
    }

    #[test]
    fn missing_props() {
        for document in [
            serde_json::json!({ "component": "User/Show" }),
            serde_json::json!({ "component": "User/Show", "props": null }),
        ] {
            let error = user_error(&page(document));
            assert!(matches!(error, ScrapedUserError::MissingField("targetUser")));
        }
    }

    #[test]
    fn users_index_is_not_a_profile() {
        let text = page(serde_json::json!({ "component": "Users/Index", "props": {} }));

        assert!(matches!(
            user_error(&text),
            ScrapedUserError::UnexpectedComponent(c) if c == "Users/Index"
        ));
    }

    #[test]
    fn unknown_user() {
        let text = page(serde_json::json!({ "component": "Error", "props": { "status": 404 } }));

        let error = user_error(&text);
        assert!(matches!(
            error,
            ScrapedUserError::UserUnavailable { status: 404 }
        ));
        assert!(!error.is_markup_drift());
    }

    #[test]
    fn post_page_is_not_a_profile() {
        assert!(matches!(
            user_error(include_str!("../mocked/post_page.html")),
            ScrapedUserError::UnexpectedComponent(c) if c == "Post/Show"
        ));
    }
}
