//! Relation vocabulary.
//!
//! Relations are plain strings on the wire. All of them are fixed constants
//! except the sentiment relation, whose name carries the branch length of the
//! family-tree chain it terminates (`sent_3` for a three-kid branch).

pub const ENROLLS: &str = "enrolls";
pub const FRIEND_OF: &str = "friend_of";
pub const COLLABORATES_WITH: &str = "collaborates_with";
pub const ANCESTOR_OF: &str = "ancestor_of";
pub const HELD_BY: &str = "held_by";
pub const BOUGHT_BY: &str = "bought_by";

/// Prefix shared by every parametric sentiment relation.
pub const SENTIMENT_PREFIX: &str = "sent";

/// Sentiment relation name for a branch of `branch_length` kids.
pub fn sentiment(branch_length: u32) -> String {
    format!("{SENTIMENT_PREFIX}_{branch_length}")
}

/// Decode the branch length from a sentiment relation name, `None` when the
/// relation is not a sentiment relation.
pub fn sentiment_branch_length(relation: &str) -> Option<u32> {
    let rest = relation.strip_prefix(SENTIMENT_PREFIX)?.strip_prefix('_')?;
    rest.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_encodes_branch_length() {
        assert_eq!(sentiment(3), "sent_3");
        assert_eq!(sentiment_branch_length("sent_3"), Some(3));
        assert_eq!(sentiment_branch_length("sent_12"), Some(12));
    }

    #[test]
    fn non_sentiment_relations_do_not_decode() {
        assert_eq!(sentiment_branch_length(ANCESTOR_OF), None);
        assert_eq!(sentiment_branch_length("sent"), None);
        assert_eq!(sentiment_branch_length("sent_x"), None);
    }
}
