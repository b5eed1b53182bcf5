//! Final plan assembly: fragment deduplication and the distinct flag.

use std::collections::HashSet;

use crate::plan::{GraphQuery, MatchFragment, NodeBinding, Predicate};

/// Deduplicates fragments by structural equality, keeping first-seen order,
/// and marks the query distinct whenever any traversal fragment remains.
/// One-to-many traversals multiply root rows; distinct folds them back.
pub(crate) fn assemble(
    root: NodeBinding,
    fragments: Vec<MatchFragment>,
    predicate: Predicate,
) -> GraphQuery {
    let mut seen = HashSet::new();
    let mut match_fragments = Vec::new();
    for fragment in fragments {
        if seen.insert(fragment.clone()) {
            match_fragments.push(fragment);
        }
    }

    let distinct = !match_fragments.is_empty();
    GraphQuery {
        root,
        match_fragments,
        predicate,
        distinct,
    }
}
