//! Identity-based merging of selection collections.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::resource::Identifiable;

/// Prepend the candidates that are not yet part of `collection`.
///
/// `None` candidates and candidates without an identifier are skipped, as are
/// candidates whose identifier is already present, either in `collection` or
/// earlier in `candidates`. Accepted candidates keep their relative order and
/// come before the untouched `collection`.
///
/// When nothing is accepted the original slice is returned borrowed, so
/// callers can detect the no-op without comparing elements.
pub fn add_to_collection_if_missing<'a, 'c, T, I>(collection: &'a [T], candidates: I) -> Cow<'a, [T]>
where
    T: Identifiable + Clone + 'c,
    I: IntoIterator<Item = Option<&'c T>>,
{
    let mut known: HashSet<T::Id> = collection.iter().filter_map(Identifiable::id).collect();
    let added: Vec<T> = candidates
        .into_iter()
        .flatten()
        .filter(|candidate| candidate.id().is_some_and(|id| known.insert(id)))
        .cloned()
        .collect();

    if added.is_empty() {
        return Cow::Borrowed(collection);
    }

    let mut merged = added;
    merged.extend_from_slice(collection);
    Cow::Owned(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SpacesId;
    use crate::spaces::Spaces;

    fn spaces(id: i64) -> Spaces {
        Spaces {
            id: Some(SpacesId::new(id)),
            ..Spaces::default()
        }
    }

    fn ids(items: &[Spaces]) -> Vec<i64> {
        items.iter().filter_map(|s| s.id.map(SpacesId::get)).collect()
    }

    #[test]
    fn should_add_to_an_empty_collection() {
        let candidate = spaces(123);
        let merged = add_to_collection_if_missing(&[], [Some(&candidate)]);
        assert_eq!(ids(&merged), vec![123]);
    }

    #[test]
    fn should_not_add_when_already_present() {
        let candidate = spaces(123);
        let collection = vec![spaces(123), spaces(456)];
        let merged = add_to_collection_if_missing(&collection, [Some(&candidate)]);
        assert!(matches!(merged, Cow::Borrowed(_)));
        assert_eq!(merged.as_ptr(), collection.as_ptr());
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn should_prepend_missing_candidate() {
        let candidate = spaces(123);
        let collection = vec![spaces(456)];
        let merged = add_to_collection_if_missing(&collection, [Some(&candidate)]);
        assert_eq!(ids(&merged), vec![123, 456]);
    }

    #[test]
    fn should_add_only_unique_candidates() {
        let candidates = [spaces(123), spaces(456), spaces(17579)];
        let collection = vec![spaces(123)];
        let merged = add_to_collection_if_missing(&collection, candidates.iter().map(Some));
        assert_eq!(merged.len(), 3);
        assert_eq!(ids(&merged), vec![456, 17579, 123]);
    }

    #[test]
    fn should_collapse_duplicates_within_candidates() {
        let first = spaces(123);
        let second = spaces(456);
        let merged = add_to_collection_if_missing(
            &[],
            [Some(&first), Some(&second), Some(&first)],
        );
        assert_eq!(ids(&merged), vec![123, 456]);
    }

    #[test]
    fn should_return_original_when_candidates_are_missing() {
        let collection = vec![spaces(123)];
        let merged = add_to_collection_if_missing(&collection, [None, None]);
        assert!(matches!(merged, Cow::Borrowed(_)));
        assert_eq!(merged.as_ptr(), collection.as_ptr());
    }

    #[test]
    fn should_skip_candidates_without_identifier() {
        let unsaved = Spaces::default();
        let collection: Vec<Spaces> = Vec::new();
        let merged = add_to_collection_if_missing(&collection, [Some(&unsaved)]);
        assert!(matches!(merged, Cow::Borrowed(_)));
        assert!(merged.is_empty());
    }

    #[test]
    fn should_be_idempotent() {
        let candidate = spaces(123);
        let once = add_to_collection_if_missing(&[spaces(456)], [Some(&candidate)]).into_owned();
        let twice = add_to_collection_if_missing(&once, [Some(&candidate)]);
        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(ids(&twice), vec![123, 456]);
    }
}
