//! Book — a title held by the library, with its stock and late fine.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{LibrisError, ValidationError};
use crate::id::BookId;
use crate::resource::{Identifiable, Resource};

/// A book title in the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Fine charged per late day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Copies owned by the library.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Book {
    /// Create a builder for constructing a [`Book`].
    #[must_use]
    pub fn builder() -> BookBuilder {
        BookBuilder::default()
    }
}

impl Identifiable for Book {
    type Id = BookId;

    fn id(&self) -> Option<BookId> {
        self.id
    }
}

impl Resource for Book {
    const NAME: &'static str = "Book";
    const PATH: &'static str = "api/books";

    /// # Errors
    ///
    /// Returns [`ValidationError::Negative`] when `quantity` or
    /// `fine_amount` is below zero.
    fn validate(&self) -> Result<(), LibrisError> {
        if self.quantity.is_some_and(|q| q < 0) {
            return Err(ValidationError::Negative { field: "quantity" }.into());
        }
        if self.fine_amount.is_some_and(|fine| fine < 0.0) {
            return Err(ValidationError::Negative {
                field: "fine_amount",
            }
            .into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Book`].
#[derive(Debug, Default)]
pub struct BookBuilder {
    inner: Book,
}

impl BookBuilder {
    #[must_use]
    pub fn id(mut self, id: BookId) -> Self {
        self.inner.id = Some(id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.inner.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.inner.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn fine_amount(mut self, fine_amount: f64) -> Self {
        self.inner.fine_amount = Some(fine_amount);
        self
    }

    #[must_use]
    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.inner.publisher = Some(publisher.into());
        self
    }

    #[must_use]
    pub fn quantity(mut self, quantity: i32) -> Self {
        self.inner.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.inner.category = Some(category);
        self
    }

    /// Consume the builder, validate, and return a [`Book`].
    ///
    /// # Errors
    ///
    /// Returns [`LibrisError::Validation`] if `quantity` or `fine_amount` is
    /// negative.
    pub fn build(self) -> Result<Book, LibrisError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
