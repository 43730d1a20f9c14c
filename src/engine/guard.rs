//! Schema node validation, run as each node is evaluated

use crate::error::{Result, TransformError};
use crate::schema::SchemaNode;

/// Reject nodes whose construction flags cannot both apply.
pub fn validate(node: &SchemaNode) -> Result<()> {
    if node.single_param && node.multi_param {
        return Err(TransformError::ConflictingConstruction {
            field: node.field_name().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flag_passes() {
        assert!(validate(&SchemaNode::field("a").single_param()).is_ok());
        assert!(validate(&SchemaNode::field("a").multi_param()).is_ok());
        assert!(validate(&SchemaNode::field("a")).is_ok());
    }

    #[test]
    fn test_both_flags_fail() {
        let err = validate(&SchemaNode::field("a").single_param().multi_param()).unwrap_err();
        assert!(err.is_schema_error());
    }
}
