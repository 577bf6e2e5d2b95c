use serde::{Deserialize, Serialize};

/// The grouping identifiers carried in a graphic record's `RECORD_TAG`
/// field, written as `"<tag_id> <seq_id> [<sub_id>]"`.
///
/// Records sharing a `tag_id` belong to one figure; within a copper figure a
/// non-zero `sub_id` marks the record as part of a hole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTag {
    pub tag_id: String,
    pub seq_id: Option<String>,
    pub sub_id: Option<String>,
}

impl RecordTag {
    pub fn parse(raw: &str) -> Self {
        let parts: Vec<&str> = raw.split_whitespace().collect();
        Self {
            tag_id: parts.first().map(|s| s.to_string()).unwrap_or_default(),
            seq_id: parts.get(1).map(|s| s.to_string()),
            sub_id: if parts.len() == 3 {
                Some(parts[2].to_string())
            } else {
                None
            },
        }
    }

    /// True when the record belongs to the outer boundary of its figure.
    pub fn is_boundary(&self) -> bool {
        matches!(self.sub_id.as_deref(), None | Some("0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_part_tag() {
        let tag = RecordTag::parse("12 3");
        assert_eq!(tag.tag_id, "12");
        assert_eq!(tag.seq_id.as_deref(), Some("3"));
        assert_eq!(tag.sub_id, None);
        assert!(tag.is_boundary());
    }

    #[test]
    fn test_parse_three_part_tag() {
        let tag = RecordTag::parse("12 3 2");
        assert_eq!(tag.sub_id.as_deref(), Some("2"));
        assert!(!tag.is_boundary());
        assert!(RecordTag::parse("12 3 0").is_boundary());
    }

    #[test]
    fn test_parse_empty_tag() {
        let tag = RecordTag::parse("");
        assert_eq!(tag.tag_id, "");
        assert_eq!(tag.seq_id, None);
    }
}
