use super::types::Schema;
use crate::graph::ParameterType;

/// Map an abstract parameter type onto an OpenAPI schema fragment.
///
/// Total: anything other than integer or UUID, including an unspecified
/// type, is a plain string.
pub fn parameter_schema(param_type: &ParameterType) -> Schema {
    match param_type {
        ParameterType::Integer => Schema::of_type("integer"),
        ParameterType::Uuid => Schema::of_type("string").with_format("uuid"),
        ParameterType::Unspecified | ParameterType::String | ParameterType::Other(_) => {
            Schema::of_type("string")
        }
    }
}
