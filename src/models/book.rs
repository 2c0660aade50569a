use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A catalog entry as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier assigned on creation (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub published_date: DateTime<Utc>,
}

/// Payload for creating a book.
///
/// Every field is optional at the deserialization level so that a missing
/// field surfaces as a validation failure rather than a JSON error.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub author: Option<String>,
    #[validate(required, length(min = 1))]
    pub isbn: Option<String>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    #[validate(required, length(min = 1))]
    pub published_date: Option<String>,
}

/// Payload for updating a book. Absent fields keep their stored value.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub published_date: Option<String>,
}

/// Query string accepted by `GET /api/books`.
///
/// `page` stays a string so that a non-numeric value does not reject the request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookQuery {
    pub id: Option<String>,
    pub query: Option<String>,
    pub page: Option<String>,
}

/// A fully validated book ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub published_date: DateTime<Utc>,
}

/// Field-level changes applied by an update.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
}

impl NewBook {
    pub fn into_book(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            description: self.description,
            published_date: self.published_date,
        }
    }
}

impl BookChanges {
    pub fn apply_to(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(isbn) = self.isbn {
            book.isbn = isbn;
        }
        if let Some(description) = self.description {
            book.description = description;
        }
        if let Some(published_date) = self.published_date {
            book.published_date = published_date;
        }
    }
}

/// Parses a publication date given either as RFC 3339 or as `YYYY-MM-DD`.
///
/// Bare dates are taken as midnight UTC.
pub fn parse_published_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn complete_input() -> BookInput {
        BookInput {
            title: Some("Dune".into()),
            author: Some("Frank Herbert".into()),
            isbn: Some("9780441013593".into()),
            description: Some("Spice and sand".into()),
            published_date: Some("1965-08-01".into()),
        }
    }

    #[test]
    fn test_book_input_validation() {
        assert!(complete_input().validate().is_ok());

        let missing_title = BookInput {
            title: None,
            ..complete_input()
        };
        assert!(missing_title.validate().is_err());

        let empty_isbn = BookInput {
            isbn: Some(String::new()),
            ..complete_input()
        };
        assert!(empty_isbn.validate().is_err());

        let missing_date = BookInput {
            published_date: None,
            ..complete_input()
        };
        assert!(missing_date.validate().is_err());
    }

    #[test]
    fn test_parse_published_date() {
        let expected = Utc.with_ymd_and_hms(1965, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_published_date("1965-08-01"), Some(expected));
        assert_eq!(parse_published_date("1965-08-01T00:00:00Z"), Some(expected));
        assert_eq!(parse_published_date("1965-08-01T02:00:00+02:00"), Some(expected));
        assert_eq!(parse_published_date("August 1965"), None);
        assert_eq!(parse_published_date(""), None);
    }

    #[test]
    fn test_book_serializes_camel_case() {
        let book = Book {
            id: Uuid::nil(),
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            isbn: "9780441013593".into(),
            description: "Spice and sand".into(),
            published_date: Utc.with_ymd_and_hms(1965, 8, 1, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(json["publishedDate"], "1965-08-01T00:00:00Z");
        assert!(json.get("published_date").is_none());
    }

    #[test]
    fn test_changes_only_touch_given_fields() {
        let mut book = Book {
            id: Uuid::new_v4(),
            title: "Old".into(),
            author: "Someone".into(),
            isbn: "1".into(),
            description: "d".into(),
            published_date: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
        };
        let before = book.clone();

        BookChanges {
            title: Some("New".into()),
            isbn: Some(String::new()),
            ..Default::default()
        }
        .apply_to(&mut book);

        assert_eq!(book.title, "New");
        assert_eq!(book.isbn, "");
        assert_eq!(book.author, before.author);
        assert_eq!(book.published_date, before.published_date);
    }
}
