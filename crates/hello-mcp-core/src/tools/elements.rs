//! Periodic table lookup tools

use std::sync::Arc;

use super::periodic_table::{self, MAX_ATOMIC_NUMBER, MIN_ATOMIC_NUMBER};
use super::registry::{DispatchResult, ToolFailure, ToolRegistry, ToolSpec};
use super::schema::{BoundArguments, ParamKind, ParameterSchema};
use crate::logging::Logger;
use crate::types::ToolResult;

/// Lookup by key (Chinese name, English name or symbol)
pub const GET_ELEMENT: &str = "get_element";
/// Lookup by ordinal position (atomic number)
pub const GET_ELEMENT_BY_POSITION: &str = "get_element_by_position";

/// Register both lookup tools on `registry`
pub fn register_element_tools(registry: &mut ToolRegistry) -> DispatchResult<()> {
    registry.register_fn(
        ToolSpec::new(GET_ELEMENT, "Look up a periodic table element by its name").with_parameters(
            ParameterSchema::new().required(
                "name",
                ParamKind::String,
                "Chinese name of the element, e.g. '氢' or '氦'; English names and symbols also match",
            ),
        ),
        get_element,
    )?;

    registry.register_fn(
        ToolSpec::new(
            GET_ELEMENT_BY_POSITION,
            "Look up a periodic table element by its position (atomic number)",
        )
        .with_parameters(ParameterSchema::new().required(
            "position",
            ParamKind::Integer,
            "Atomic number of the element, from 1 to 118",
        )),
        get_element_by_position,
    )?;

    Ok(())
}

/// Registry holding only the periodic table tools
pub fn element_registry(logger: Arc<dyn Logger>) -> DispatchResult<ToolRegistry> {
    let mut registry = ToolRegistry::new(logger);
    register_element_tools(&mut registry)?;
    Ok(registry)
}

fn get_element(args: &BoundArguments) -> Result<ToolResult, ToolFailure> {
    let name = args.get_str("name").unwrap_or_default().trim();
    if name.is_empty() {
        return Err(ToolFailure::new("element name must not be empty"));
    }

    periodic_table::find(name)
        .map(|e| ToolResult::success(e.describe()))
        .ok_or_else(|| ToolFailure::new(format!("element not found: {}", name)))
}

fn get_element_by_position(args: &BoundArguments) -> Result<ToolResult, ToolFailure> {
    // Binding already rejected a missing position; 0 falls into the range check
    let position = args.get_i64("position").unwrap_or_default();

    if !(MIN_ATOMIC_NUMBER..=MAX_ATOMIC_NUMBER).contains(&position) {
        return Err(ToolFailure::new(format!(
            "atomic number out of range: must be between {} and {}, got {}",
            MIN_ATOMIC_NUMBER, MAX_ATOMIC_NUMBER, position
        )));
    }

    periodic_table::by_atomic_number(position)
        .map(|e| ToolResult::success(e.describe()))
        .ok_or_else(|| ToolFailure::new(format!("element not found at position {}", position)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::tools::periodic_table::PERIODIC_TABLE;
    use crate::tools::DispatchError;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        element_registry(Arc::new(NoOpLogger)).unwrap()
    }

    #[test]
    fn test_registry_lists_both_tools() {
        let names: Vec<_> = registry().list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec![GET_ELEMENT, GET_ELEMENT_BY_POSITION]);
    }

    #[test]
    fn test_position_and_key_agree_for_every_element() {
        let registry = registry();
        for element in PERIODIC_TABLE.iter() {
            let by_position = registry
                .dispatch(GET_ELEMENT_BY_POSITION, &json!({ "position": element.atomic_number }))
                .unwrap();
            let by_key = registry
                .dispatch(GET_ELEMENT, &json!({ "name": element.name }))
                .unwrap();
            assert!(!by_position.is_error, "position {}", element.atomic_number);
            assert_eq!(by_position, by_key);
        }
    }

    #[test]
    fn test_hydrogen_by_key() {
        let result = registry().dispatch(GET_ELEMENT, &json!({ "name": "氢" })).unwrap();
        let text = result.text();
        assert!(!result.is_error);
        assert!(text.contains("atomic number: 1"));
        assert!(text.contains("symbol: H"));
    }

    #[test]
    fn test_carbon_by_position() {
        let result = registry()
            .dispatch(GET_ELEMENT_BY_POSITION, &json!({ "position": 6 }))
            .unwrap();
        assert!(result.text().contains("symbol: C"));
        assert!(result.text().contains("Carbon"));
    }

    #[test]
    fn test_out_of_range_positions() {
        let registry = registry();
        for position in [0, 119, -5, 200] {
            let result = registry
                .dispatch(GET_ELEMENT_BY_POSITION, &json!({ "position": position }))
                .unwrap();
            assert!(result.is_error, "position {}", position);
            assert!(result.text().contains("out of range"));
            assert!(result.text().contains("between 1 and 118"));
        }
    }

    #[test]
    fn test_unbound_position_is_out_of_range() {
        let failure = get_element_by_position(&BoundArguments::default()).unwrap_err();
        assert!(failure.0.contains("out of range"));
        assert!(failure.0.ends_with("got 0"));

        let err = registry().dispatch(GET_ELEMENT_BY_POSITION, &json!({})).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArgument { ref field, .. } if field == "position"));
    }

    #[test]
    fn test_empty_and_unknown_keys_are_tool_errors() {
        let registry = registry();

        let empty = registry.dispatch(GET_ELEMENT, &json!({ "name": "  " })).unwrap();
        assert!(empty.is_error);
        assert!(empty.text().contains("must not be empty"));

        let unknown = registry.dispatch(GET_ELEMENT, &json!({ "name": "钻石" })).unwrap();
        assert!(unknown.is_error);
        assert!(unknown.text().contains("not found"));
    }

    #[test]
    fn test_float_position_coercion() {
        let registry = registry();
        let from_float = registry
            .dispatch(GET_ELEMENT_BY_POSITION, &json!({ "position": 6.0 }))
            .unwrap();
        let from_int = registry
            .dispatch(GET_ELEMENT_BY_POSITION, &json!({ "position": 6 }))
            .unwrap();
        assert_eq!(from_float, from_int);

        for bad in [json!(6.5), json!("6")] {
            let err = registry
                .dispatch(GET_ELEMENT_BY_POSITION, &json!({ "position": bad }))
                .unwrap_err();
            assert!(matches!(err, DispatchError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn test_missing_argument_is_invalid() {
        let err = registry().dispatch(GET_ELEMENT, &json!({})).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArgument { ref field, .. } if field == "name"));
    }
}
