//! Tool descriptors and their parameter schemas.

use crate::error::ToolError;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A callable function the model may emit a call for
///
/// Deserializes from both the OpenAI wrapped form
/// (`{"type": "function", "function": {...}}`) and the bare function object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Tool {
    /// Function name, embedded in generated rule names
    pub name: String,
    /// Human-readable description (not used by the grammar)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter schema
    #[serde(default)]
    pub parameters: Parameters,
}

impl Tool {
    /// Create a tool with no parameters
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: Parameters::new(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append an optional property
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.parameters.properties.insert(name.into(), schema);
        self
    }

    /// Append a property and mark it required
    #[must_use]
    pub fn with_required_property(
        mut self,
        name: impl Into<String>,
        schema: PropertySchema,
    ) -> Self {
        let name = name.into();
        self.parameters.required.insert(name.clone());
        self.parameters.properties.insert(name, schema);
        self
    }

    /// Replace the parameter schema
    #[must_use]
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Decode a tool from a JSON value
    ///
    /// # Errors
    ///
    /// Returns error if the value is not a tool descriptor
    pub fn from_value(value: Value) -> Result<Self, ToolError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Object schema of a tool's arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Properties in declaration order
    #[serde(default)]
    pub properties: IndexMap<String, PropertySchema>,
    /// Names of required properties
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub required: IndexSet<String>,
}

impl Parameters {
    /// Create an empty parameter schema
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tool takes no arguments at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Whether `name` is listed as required
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Required properties, in declaration order
    pub fn required_properties(&self) -> impl Iterator<Item = (&str, &PropertySchema)> {
        self.properties
            .iter()
            .filter(|(name, _)| self.is_required(name))
            .map(|(name, schema)| (name.as_str(), schema))
    }

    /// Optional properties, in declaration order
    pub fn optional_properties(&self) -> impl Iterator<Item = (&str, &PropertySchema)> {
        self.properties
            .iter()
            .filter(|(name, _)| !self.is_required(name))
            .map(|(name, schema)| (name.as_str(), schema))
    }

    /// Required names that do not name a declared property
    pub fn undeclared_required(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .filter(|name| !self.properties.contains_key(name.as_str()))
            .map(String::as_str)
    }
}

/// Schema of a single property
///
/// Only the keys that shape the grammar are kept; `enum` wins over `type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Allowed literal values
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Declared type or union of types
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_spec: Option<TypeSpec>,
}

impl PropertySchema {
    /// Schema with a single declared type
    #[must_use]
    pub fn of_type(name: impl Into<String>) -> Self {
        Self {
            enum_values: None,
            type_spec: Some(TypeSpec::Single(name.into())),
        }
    }

    /// Schema with a union of declared types
    #[must_use]
    pub fn union<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enum_values: None,
            type_spec: Some(TypeSpec::Union(names.into_iter().map(Into::into).collect())),
        }
    }

    /// Schema restricted to literal values
    #[must_use]
    pub fn enumeration(values: Vec<Value>) -> Self {
        Self {
            enum_values: Some(values),
            type_spec: None,
        }
    }

    /// Set the declared type, keeping any enum
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.type_spec = Some(TypeSpec::Single(name.into()));
        self
    }

    /// Enum values, if a non-empty enum is declared
    #[must_use]
    pub fn enum_values(&self) -> Option<&[Value]> {
        self.enum_values
            .as_deref()
            .filter(|values| !values.is_empty())
    }
}

/// `type` keyword: one name or a union
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    /// `"type": "string"`
    Single(String),
    /// `"type": ["string", "null"]`
    Union(Vec<String>),
}

impl TypeSpec {
    /// Declared type names in order
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::Single(name) => std::slice::from_ref(name),
            Self::Union(names) => names,
        }
    }

    /// The single declared type, if this is not a union
    #[must_use]
    pub fn single(&self) -> Option<&str> {
        match self {
            Self::Single(name) => Some(name.as_str()),
            Self::Union(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct FunctionDescriptor {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<Parameters>,
}

impl TryFrom<Value> for Tool {
    type Error = serde_json::Error;

    /// Accepts `{"type": "function", "function": {...}}` or the bare function
    /// object; errors inside the function object are reported as they are
    fn try_from(mut value: Value) -> Result<Self, Self::Error> {
        let function = if value.get("function").is_some_and(Value::is_object) {
            value["function"].take()
        } else {
            value
        };
        let function: FunctionDescriptor = serde_json::from_value(function)?;
        Ok(Self {
            name: function.name,
            description: function.description,
            parameters: function.parameters.unwrap_or_default(),
        })
    }
}
