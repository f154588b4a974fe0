//! Typed parameter schemas and argument binding
//!
//! A tool declares its parameters once as a [`ParameterSchema`]. The same
//! value renders the JSON Schema advertised to clients and binds the untyped
//! argument bag of an incoming call into [`BoundArguments`], so coercion rules
//! live in exactly one place.

use std::collections::HashMap;

use serde_json::{json, Map, Value};

/// Declared type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    /// Integral value; accepts floats with no fractional part (6.0 -> 6)
    Integer,
    /// Real value; accepts any JSON number
    Number,
    Boolean,
}

impl ParamKind {
    /// JSON Schema type name
    pub fn json_type(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
        }
    }
}

/// One declared parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterField {
    pub name: String,
    pub kind: ParamKind,
    pub description: String,
    pub required: bool,
}

/// Bound argument value after coercion
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Real(f64),
    Bool(bool),
}

/// Why an argument bag failed to bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    /// Offending field, empty when the bag itself is malformed
    pub field: String,
    pub reason: String,
}

impl BindError {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Ordered parameter declarations of a tool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSchema {
    fields: Vec<ParameterField>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required parameter
    pub fn required(self, name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        self.field(name, kind, description, true)
    }

    /// Declare an optional parameter
    pub fn optional(self, name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        self.field(name, kind, description, false)
    }

    fn field(
        mut self,
        name: impl Into<String>,
        kind: ParamKind,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.fields.push(ParameterField {
            name: name.into(),
            kind,
            description: description.into(),
            required,
        });
        self
    }

    pub fn fields(&self) -> &[ParameterField] {
        &self.fields
    }

    /// Render as a JSON Schema object
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| {
                (
                    f.name.clone(),
                    json!({ "type": f.kind.json_type(), "description": f.description }),
                )
            })
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Bind an argument bag against this schema.
    ///
    /// Undeclared keys are ignored. `null` is treated as an empty bag.
    pub fn bind(&self, arguments: &Value) -> Result<BoundArguments, BindError> {
        let empty = Map::new();
        let bag = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(BindError::new(
                    "",
                    format!("arguments must be an object, got {}", json_kind(other)),
                ))
            }
        };

        let mut values = HashMap::with_capacity(self.fields.len());
        for field in &self.fields {
            match bag.get(&field.name) {
                None | Some(Value::Null) if field.required => {
                    return Err(BindError::new(&field.name, "missing required argument"));
                }
                None | Some(Value::Null) => {}
                Some(raw) => {
                    let value = coerce(field.kind, raw).map_err(|reason| BindError::new(&field.name, reason))?;
                    values.insert(field.name.clone(), value);
                }
            }
        }

        Ok(BoundArguments { values })
    }
}

fn coerce(kind: ParamKind, raw: &Value) -> Result<ArgValue, String> {
    match (kind, raw) {
        (ParamKind::String, Value::String(s)) => Ok(ArgValue::Str(s.clone())),
        (ParamKind::Boolean, Value::Bool(b)) => Ok(ArgValue::Bool(*b)),
        (ParamKind::Integer, Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(ArgValue::Int(i));
            }
            if n.is_u64() {
                return Err(format!("integer {} is out of range", n));
            }
            let f = n.as_f64().ok_or_else(|| format!("{} is not a valid number", n))?;
            integral(f).map(ArgValue::Int)
        }
        (ParamKind::Number, Value::Number(n)) => n
            .as_f64()
            .map(ArgValue::Real)
            .ok_or_else(|| format!("{} is not a valid number", n)),
        (kind, other) => Err(format!(
            "expected {}, got {}",
            kind.json_type(),
            json_kind(other)
        )),
    }
}

/// Accept a float only if it is an exact integer inside the i64 range
fn integral(f: f64) -> Result<i64, String> {
    // 2^63 is exactly representable; anything at or above it overflows i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !f.is_finite() {
        return Err(format!("{} is not a finite number", f));
    }
    if f.fract() != 0.0 {
        return Err(format!("{} has a fractional part", f));
    }
    if f < -LIMIT || f >= LIMIT {
        return Err(format!("{} is out of range", f));
    }
    Ok(f as i64)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Arguments that passed schema binding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    values: HashMap<String, ArgValue>,
}

impl BoundArguments {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ArgValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ArgValue::Real(f)) => Some(*f),
            Some(ArgValue::Int(i)) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ArgValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_schema() -> ParameterSchema {
        ParameterSchema::new().required("position", ParamKind::Integer, "atomic number")
    }

    #[test]
    fn test_json_schema_rendering() {
        let schema = ParameterSchema::new()
            .required("name", ParamKind::String, "element name")
            .optional("verbose", ParamKind::Boolean, "more detail");
        let json = schema.to_json_schema();

        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"]["name"]["type"], "string");
        assert_eq!(json["properties"]["verbose"]["type"], "boolean");
        assert_eq!(json["required"], json!(["name"]));

        let bound = schema.bind(&json!({ "name": "碳", "verbose": true })).unwrap();
        assert_eq!(bound.get_str("name"), Some("碳"));
        assert_eq!(bound.get_bool("verbose"), Some(true));
        assert_eq!(bound.get_bool("name"), None);
        assert!(schema.bind(&json!({ "name": "碳", "verbose": "yes" })).is_err());
    }

    #[test]
    fn test_integer_accepts_integral_float() {
        let from_int = position_schema().bind(&json!({ "position": 6 })).unwrap();
        let from_float = position_schema().bind(&json!({ "position": 6.0 })).unwrap();
        assert_eq!(from_int.get_i64("position"), Some(6));
        assert_eq!(from_int, from_float);
    }

    #[test]
    fn test_integer_rejects_fraction_and_wrong_types() {
        for bad in [json!(6.5), json!("6"), json!(true), json!([6])] {
            let err = position_schema().bind(&json!({ "position": bad })).unwrap_err();
            assert_eq!(err.field, "position");
        }
    }

    #[test]
    fn test_integer_rejects_out_of_range_values() {
        assert!(position_schema().bind(&json!({ "position": u64::MAX })).is_err());
        assert!(position_schema().bind(&json!({ "position": 1e300 })).is_err());
        assert_eq!(
            position_schema()
                .bind(&json!({ "position": -5 }))
                .unwrap()
                .get_i64("position"),
            Some(-5)
        );
    }

    #[test]
    fn test_missing_required_field() {
        let err = position_schema().bind(&json!({})).unwrap_err();
        assert_eq!(err.field, "position");
        assert!(err.reason.contains("missing"));

        let err = position_schema().bind(&json!({ "position": null })).unwrap_err();
        assert_eq!(err.field, "position");
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let schema = ParameterSchema::new().optional("limit", ParamKind::Number, "limit");
        let bound = schema.bind(&Value::Null).unwrap();
        assert!(bound.is_empty());

        let bound = schema.bind(&json!({ "limit": 2 })).unwrap();
        assert_eq!(bound.get_f64("limit"), Some(2.0));
    }

    #[test]
    fn test_non_object_bag_is_rejected() {
        let err = position_schema().bind(&json!([1, 2])).unwrap_err();
        assert!(err.field.is_empty());
        assert!(err.reason.contains("array"));
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let bound = position_schema()
            .bind(&json!({ "position": 1, "unit": "mol" }))
            .unwrap();
        assert_eq!(bound.len(), 1);
    }
}
