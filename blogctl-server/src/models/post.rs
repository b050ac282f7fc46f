//! Post title/content validation and post records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{UserId, ValidationError};

/// Store-assigned post identifier
pub type PostId = i64;

/// Maximum length for post titles, in characters
const MAX_TITLE_LEN: usize = 256;

/// Maximum size for post content, in bytes
const MAX_CONTENT_BYTES: usize = 64 * 1024;

/// Validated post title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    /// Create a new post title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 256 characters
    ///
    /// # Example
    /// ```
    /// use blogctl_server::models::PostTitle;
    ///
    /// assert!(PostTitle::new("Hello").is_ok());
    /// assert!(PostTitle::new("").is_err());
    /// assert!(PostTitle::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
                unit: "characters",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for PostTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated post body. Stored verbatim; only blank bodies are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }

        if s.len() > MAX_CONTENT_BYTES {
            return Err(ValidationError::TooLong {
                field: "content",
                max: MAX_CONTENT_BYTES,
                unit: "bytes",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Post record as stored and as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author fields joined onto a single post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub name: String,
}

/// Post with its author's name, for the detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: PostAuthor,
}

/// Insert payload. `created_at` doubles as the initial `updated_at`.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub content: PostContent,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Build an insert payload stamped with the current time.
    pub fn new(title: PostTitle, content: PostContent, author_id: UserId) -> Self {
        Self::with_created_at(title, content, author_id, Utc::now())
    }

    pub fn with_created_at(
        title: PostTitle,
        content: PostContent,
        author_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title,
            content,
            author_id,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn valid_titles() {
        assert!(PostTitle::new("Hello").is_ok());
        assert!(PostTitle::new("a").is_ok());
        assert!(PostTitle::new("  Trimmed  ").is_ok());
    }

    #[test]
    fn title_rejects_empty_and_whitespace() {
        assert!(matches!(
            PostTitle::new("").unwrap_err(),
            ValidationError::Empty { field: "title" }
        ));
        assert!(matches!(
            PostTitle::new(" \t\n").unwrap_err(),
            ValidationError::Empty { field: "title" }
        ));
    }

    #[test]
    fn title_max_length_counts_characters() {
        assert!(PostTitle::new(&"é".repeat(256)).is_ok());

        let err = PostTitle::new(&"a".repeat(257)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 256, .. }));
    }

    #[test]
    fn title_is_trimmed() {
        let title = PostTitle::new("  hello  ").unwrap();
        assert_eq!(title.as_str(), "hello");
    }

    #[test]
    fn content_kept_verbatim() {
        let content = PostContent::new("  line one\nline two\n").unwrap();
        assert_eq!(content.as_str(), "  line one\nline two\n");
    }

    #[test]
    fn content_rejects_blank() {
        assert!(matches!(
            PostContent::new("").unwrap_err(),
            ValidationError::Empty { field: "content" }
        ));
        assert!(PostContent::new("   ").is_err());
    }

    #[test]
    fn content_size_limit() {
        assert!(PostContent::new(&"x".repeat(64 * 1024)).is_ok());

        // Multi-byte characters count by encoded size.
        let err = PostContent::new(&"é".repeat(32 * 1024 + 1)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooLong {
                field: "content",
                unit: "bytes",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "content exceeds maximum length of 65536 bytes"
        );
    }

    #[test]
    fn post_serializes_camel_case() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let post = Post {
            id: 7,
            title: "Hello".into(),
            content: "World".into(),
            author_id: 2,
            created_at: at,
            updated_at: at,
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["authorId"], 2);
        assert_eq!(json["createdAt"], "2024-01-02T03:04:05Z");
        assert_eq!(json["updatedAt"], "2024-01-02T03:04:05Z");
        assert!(json.get("author_id").is_none());
    }

    #[test]
    fn post_with_author_flattens() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let post = PostWithAuthor {
            post: Post {
                id: 1,
                title: "t".into(),
                content: "c".into(),
                author_id: 2,
                created_at: at,
                updated_at: at,
            },
            author: PostAuthor {
                name: "Alice".into(),
            },
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["title"], "t");
        assert_eq!(json["author"]["name"], "Alice");
    }
}
