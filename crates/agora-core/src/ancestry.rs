//! Materialized reply paths.
//!
//! A post's ancestry lists the ids of its ancestors from the thread root down
//! to its parent, each followed by a comma: a reply to post 7, itself a reply
//! to post 3, has ancestry `"3,7,"`. Thread roots have an empty ancestry.
//! Subtree membership is then a string prefix test, which storage expresses
//! as `LIKE` without recursion.

use crate::constants::ANCESTRY_SEPARATOR;
use crate::models::PostId;

/// Ancestry of a new reply to `parent_id`, whose own ancestry is `parent_ancestry`.
pub fn child_ancestry(parent_ancestry: &str, parent_id: PostId) -> String {
    format!("{parent_ancestry}{parent_id}{ANCESTRY_SEPARATOR}")
}

/// SQL condition: post row `sub` lies in the reply subtree of post row
/// `root` (a post is in its own subtree). Both aliases need `id` and
/// `ancestry` columns.
pub fn subtree_condition_sql(sub: &str, root: &str) -> String {
    format!(
        "({sub}.id = {root}.id OR ({sub}.ancestry != '' \
         AND {sub}.ancestry LIKE {root}.ancestry || {root}.id || '{ANCESTRY_SEPARATOR}%'))"
    )
}

/// Ancestor ids, thread root first. Malformed components are skipped.
pub fn parse(ancestry: &str) -> Vec<PostId> {
    ancestry
        .split(ANCESTRY_SEPARATOR)
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_ancestry_appends_parent() {
        assert_eq!(child_ancestry("", 3), "3,");
        assert_eq!(child_ancestry("3,", 7), "3,7,");
    }

    #[test]
    fn parse_round_trips_ids() {
        assert_eq!(parse("3,7,"), vec![3, 7]);
        assert!(parse("").is_empty());
        assert_eq!(parse("3,x,11,"), vec![3, 11]);
    }

    #[test]
    fn subtree_condition_ends_prefix_on_a_separator() {
        let sql = subtree_condition_sql("sub", "root");
        assert!(sql.starts_with("(sub.id = root.id OR"));
        assert!(sql.contains("sub.ancestry LIKE root.ancestry || root.id || ',%'"));
    }
}
