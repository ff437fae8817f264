//! Borrowing — a loan of a [`Book`] to a [`User`].

use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::error::{LibrisError, ValidationError};
use crate::id::BorrowingId;
use crate::resource::{Identifiable, Resource};
use crate::time::{Date, wire_date};
use crate::user::User;

/// A book loan. `status` is `true` once the book has been returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Borrowing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<BorrowingId>,
    #[serde(with = "wire_date", skip_serializing_if = "Option::is_none")]
    pub date_borrowed: Option<Date>,
    #[serde(with = "wire_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    #[serde(with = "wire_date", skip_serializing_if = "Option::is_none")]
    pub return_date: Option<Date>,
    /// A payload without `status` leaves it unset; only [`Default`] starts a
    /// new loan as not returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<Book>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Default for Borrowing {
    fn default() -> Self {
        Self {
            id: None,
            date_borrowed: None,
            due_date: None,
            return_date: None,
            status: Some(false),
            book: None,
            user: None,
        }
    }
}

impl Borrowing {
    /// Create a builder for constructing a [`Borrowing`].
    #[must_use]
    pub fn builder() -> BorrowingBuilder {
        BorrowingBuilder::default()
    }
}

impl Identifiable for Borrowing {
    type Id = BorrowingId;

    fn id(&self) -> Option<BorrowingId> {
        self.id
    }
}

impl Resource for Borrowing {
    const NAME: &'static str = "Borrowing";
    const PATH: &'static str = "api/borrowings";

    /// # Errors
    ///
    /// Returns [`ValidationError::DateOrder`] when the due or return date
    /// precedes the borrowing date.
    fn validate(&self) -> Result<(), LibrisError> {
        let Some(borrowed) = self.date_borrowed else {
            return Ok(());
        };
        if self.due_date.is_some_and(|due| due < borrowed) {
            return Err(ValidationError::DateOrder {
                field: "due_date",
                other: "date_borrowed",
            }
            .into());
        }
        if self.return_date.is_some_and(|returned| returned < borrowed) {
            return Err(ValidationError::DateOrder {
                field: "return_date",
                other: "date_borrowed",
            }
            .into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Borrowing`].
#[derive(Debug, Default)]
pub struct BorrowingBuilder {
    inner: Borrowing,
}

impl BorrowingBuilder {
    #[must_use]
    pub fn id(mut self, id: BorrowingId) -> Self {
        self.inner.id = Some(id);
        self
    }

    #[must_use]
    pub fn date_borrowed(mut self, date: Date) -> Self {
        self.inner.date_borrowed = Some(date);
        self
    }

    #[must_use]
    pub fn due_date(mut self, date: Date) -> Self {
        self.inner.due_date = Some(date);
        self
    }

    #[must_use]
    pub fn return_date(mut self, date: Date) -> Self {
        self.inner.return_date = Some(date);
        self
    }

    #[must_use]
    pub fn status(mut self, returned: bool) -> Self {
        self.inner.status = Some(returned);
        self
    }

    #[must_use]
    pub fn book(mut self, book: Book) -> Self {
        self.inner.book = Some(book);
        self
    }

    #[must_use]
    pub fn user(mut self, user: User) -> Self {
        self.inner.user = Some(user);
        self
    }

    /// Consume the builder, validate, and return a [`Borrowing`].
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Validation`] if the dates are out of order.
    pub fn build(self) -> Result<Borrowing, LibrisError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn should_default_status_to_not_returned() {
        assert_eq!(Borrowing::default().status, Some(false));
    }

    #[test]
    fn should_leave_status_unset_when_missing_from_payload() {
        let borrowing: Borrowing =
            serde_json::from_str(r#"{ "id": 1, "due_date": "2026-03-01" }"#).unwrap();
        assert_eq!(borrowing.status, None);

        let json = serde_json::to_value(&borrowing).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "due_date": "2026-03-01" })
        );
    }

    #[test]
    fn should_reject_due_date_before_borrow_date() {
        let result = Borrowing::builder()
            .date_borrowed(date(2021, 9, 10))
            .due_date(date(2021, 9, 1))
            .build();
        assert!(matches!(
            result,
            Err(LibrisError::Validation(ValidationError::DateOrder {
                field: "due_date",
                ..
            }))
        ));
    }

    #[test]
    fn should_encode_dates_in_wire_format_and_omit_missing_ones() {
        let borrowing = Borrowing::builder()
            .date_borrowed(date(2021, 9, 1))
            .due_date(date(2021, 9, 15))
            .build()
            .unwrap();
        let json = serde_json::to_value(&borrowing).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date_borrowed": "2021-09-01",
                "due_date": "2021-09-15",
                "status": false
            })
        );
    }

    #[test]
    fn should_decode_wire_dates_into_the_same_calendar_date() {
        let original = Borrowing::builder()
            .date_borrowed(date(2021, 12, 31))
            .return_date(date(2022, 1, 2))
            .build()
            .unwrap();
        let wire = serde_json::to_string(&original).unwrap();
        let decoded: Borrowing = serde_json::from_str(&wire).unwrap();
        assert_eq!(decoded.date_borrowed, Some(date(2021, 12, 31)));
        assert_eq!(decoded.return_date, Some(date(2022, 1, 2)));
        assert!(decoded.due_date.is_none());
    }

    #[test]
    fn should_treat_unreadable_dates_as_missing() {
        let borrowing: Borrowing =
            serde_json::from_str(r#"{ "id": 2, "due_date": "someday", "return_date": null }"#)
                .unwrap();
        assert!(borrowing.due_date.is_none());
        assert!(borrowing.return_date.is_none());
    }
}
