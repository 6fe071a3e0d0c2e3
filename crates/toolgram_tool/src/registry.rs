//! Ordered, duplicate-free collection of tools.

use crate::error::ToolError;
use crate::schema::Tool;
use indexmap::IndexMap;

/// Set of tools keyed by name
///
/// Iteration order is insertion order, which is the order `call_<name>`
/// alternatives appear in the dispatch rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolSet {
    /// Registered tools by name
    tools: IndexMap<String, Tool>,
}

impl ToolSet {
    /// Create a new empty set
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Build a set from tools in order
    ///
    /// # Errors
    ///
    /// Returns error if two tools share a name
    pub fn from_tools<I>(tools: I) -> Result<Self, ToolError>
    where
        I: IntoIterator<Item = Tool>,
    {
        let mut set = Self::new();
        for tool in tools {
            set.insert(tool)?;
        }
        Ok(set)
    }

    /// Decode a JSON array of tool descriptors
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or names repeat
    pub fn from_json_str(json: &str) -> Result<Self, ToolError> {
        let tools: Vec<Tool> = serde_json::from_str(json)?;
        Self::from_tools(tools)
    }

    /// Add a tool
    ///
    /// # Errors
    ///
    /// Returns error if a tool with the same name is already present
    pub fn insert(&mut self, tool: Tool) -> Result<(), ToolError> {
        if self.tools.contains_key(&tool.name) {
            return Err(ToolError::AlreadyRegistered { name: tool.name });
        }
        self.tools.insert(tool.name.clone(), tool);
        Ok(())
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Check if a tool is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// Tools in order
    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values()
    }

    /// Number of tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl<'a> IntoIterator for &'a ToolSet {
    type Item = &'a Tool;
    type IntoIter = indexmap::map::Values<'a, String, Tool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.values()
    }
}
