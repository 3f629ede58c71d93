use serde::{Deserialize, Serialize};

/// A stored tag.
///
/// Tags only record their name. Which products carry a tag is answered by a
/// query over the product/tag association, never by a list kept on the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct TagRecord<TagId> {
    /// Unique identifier for the tag
    pub id: TagId,
    /// The tag's name, unique and case-sensitive
    pub name: String,
}
