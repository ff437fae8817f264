//! Typed identifier newtypes backed by the server's numeric keys.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw server key.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Access the raw server key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Book`](crate::book::Book).
    BookId
);

define_id!(
    /// Unique identifier for a [`Borrowing`](crate::borrowing::Borrowing).
    BorrowingId
);

define_id!(
    /// Unique identifier for a [`Spaces`](crate::spaces::Spaces) reservation.
    SpacesId
);

define_id!(
    /// Unique identifier for a [`Category`](crate::category::Category).
    CategoryId
);

define_id!(
    /// Unique identifier for a [`User`](crate::user::User).
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = BookId::new(1201);
        let text = id.to_string();
        let parsed: BookId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_plain_number() {
        let json = serde_json::to_string(&SpacesId::new(123)).unwrap();
        assert_eq!(json, "123");
        let parsed: SpacesId = serde_json::from_str("123").unwrap();
        assert_eq!(parsed.get(), 123);
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_id() {
        let result = BorrowingId::from_str("abc");
        assert!(result.is_err());
    }

    #[test]
    fn should_ignore_surrounding_whitespace_when_parsing() {
        let id: UserId = " 7 ".parse().unwrap();
        assert_eq!(id, UserId::from(7));
    }
}
