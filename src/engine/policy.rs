//! Per-node instantiation policy
//!
//! Precedence: custom hook, single-argument construction, spread construction,
//! then the default merge (wrapped in the model when one is set). Anything
//! else passes through unchanged.

use serde_json::Value;
use tracing::{debug, trace};

use super::{walker, Traversal};
use crate::error::Result;
use crate::model::Model;
use crate::schema::SchemaNode;
use crate::value::{is_falsy, spread, Fields, Mapped};

/// Transform the value found at a node's terminal path segment.
///
/// Sequences fan out element by element unless the node spreads them into
/// its constructor.
pub(crate) fn evaluate(
    value: &Value,
    node: &SchemaNode,
    parent: &Value,
    cx: &Traversal<'_>,
    depth: usize,
) -> Result<Mapped> {
    match value {
        Value::Array(items) if !node.multi_param => items
            .iter()
            .map(|item| apply(item, node, parent, cx, depth))
            .collect::<Result<Vec<_>>>()
            .map(Mapped::Array),
        _ => apply(value, node, parent, cx, depth),
    }
}

fn apply(
    target: &Value,
    node: &SchemaNode,
    parent: &Value,
    cx: &Traversal<'_>,
    depth: usize,
) -> Result<Mapped> {
    trace!(field = node.field_name(), depth, "applying node");

    if let Some(hook) = &node.on_transform {
        let transformed = match target {
            Value::Object(_) => Mapped::Object(merge(target, node, cx, depth)?),
            other => Mapped::from(other),
        };
        let parent = (depth > 0).then_some(parent);
        return Ok(hook(node.model.as_ref(), transformed, parent, cx.root));
    }

    if node.single_param {
        return Ok(match &node.model {
            Some(model) if !is_falsy(target) => construct(model, vec![Mapped::from(target)]),
            _ => Mapped::from(target),
        });
    }

    if node.multi_param {
        return Ok(match (target, &node.model) {
            (Value::Array(items), Some(model)) => {
                construct(model, items.iter().map(Mapped::from).collect())
            }
            _ => Mapped::from(target),
        });
    }

    match target {
        Value::Object(_) => {
            let merged = Mapped::Object(merge(target, node, cx, depth)?);
            Ok(match &node.model {
                Some(model) => construct(model, vec![merged]),
                None => merged,
            })
        }
        other => Ok(Mapped::from(other)),
    }
}

/// Own fields of `target` overlaid with the node's include, one level deeper.
fn merge(target: &Value, node: &SchemaNode, cx: &Traversal<'_>, depth: usize) -> Result<Fields> {
    let mut fields = target.as_object().map(spread).unwrap_or_default();
    fields.extend(walker::walk(target, node.include.as_ref(), cx, depth + 1)?);
    Ok(fields)
}

fn construct(model: &Model, args: Vec<Mapped>) -> Mapped {
    debug!(model = model.name(), args = args.len(), "constructing instance");
    Mapped::Instance(model.construct(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn traversal(root: &Value) -> Traversal<'_> {
        Traversal {
            root,
            max_depth: 8,
        }
    }

    #[test]
    fn test_single_param_skips_include() {
        let model = Model::record("Wrapper");
        let node = SchemaNode::field("v")
            .with_model(model.clone())
            .single_param()
            .include(SchemaNode::field("inner").with_model(Model::record("Inner")));
        let data = json!({"inner": {"x": 1}});
        let out = evaluate(&data, &node, &data, &traversal(&data), 1).unwrap();
        let instance = out.as_instance().unwrap();
        assert!(instance.is_instance_of(&model));
        assert!(instance.field("inner").unwrap().as_instance().is_none());
    }

    #[test]
    fn test_multi_param_keeps_sequence_whole() {
        let model = Model::record("Point");
        let node = SchemaNode::field("p").with_model(model.clone()).multi_param();
        let data = json!([3, 4]);
        let out = evaluate(&data, &node, &data, &traversal(&data), 1).unwrap();
        assert!(out.is_instance_of(&model));
        assert_eq!(out.get("1"), Some(&Mapped::from(4_i64)));
    }

    #[test]
    fn test_nested_arrays_pass_through() {
        let model = Model::record("Cell");
        let node = SchemaNode::field("grid").with_model(model);
        let data = json!([[{"x": 1}], {"x": 2}]);
        let out = evaluate(&data, &node, &data, &traversal(&data), 1).unwrap();
        assert_eq!(out.at(0), Some(&Mapped::from(json!([{"x": 1}]))));
        assert!(out.at(1).unwrap().as_instance().is_some());
    }

    #[test]
    fn test_hook_sees_scalar_target() {
        let node = SchemaNode::field("n").on_transform(|_, value, parent, _| {
            assert!(parent.is_some());
            Mapped::from(value.as_i64().unwrap_or_default() * 2)
        });
        let data = json!({"n": 21});
        let out = evaluate(&data["n"], &node, &data, &traversal(&data), 1).unwrap();
        assert_eq!(out, Mapped::from(42_i64));
    }
}
