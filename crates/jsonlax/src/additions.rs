//! Tagged-object reconstruction registry.
//!
//! A mapping whose sentinel entry names a registered type is handed, minus
//! the sentinel, to the registered function; the function's return value
//! replaces the mapping in the parse result. Registration is validated up
//! front so parse-time dispatch is a plain table lookup.

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use crate::options::OptionsError;
use crate::value::{Mapping, Value};

/// Sentinel key looked up in mappings when `create_additions` is enabled.
pub const DEFAULT_CREATE_ID: &str = "json_class";

/// A reconstruction function: receives the mapping with the sentinel entry
/// already removed and produces the replacement value.
pub type CreateFn = dyn Fn(Mapping) -> Result<Value, String> + Send + Sync;

/// Registry mapping type-name strings to reconstruction functions.
///
/// # Examples
///
/// ```
/// use jsonlax::{AdditionsRegistry, Key};
///
/// let mut registry = AdditionsRegistry::new();
/// registry
///     .register("Wrapped", |mapping| {
///         mapping
///             .get(&Key::from("inner"))
///             .cloned()
///             .ok_or_else(|| "missing inner".to_string())
///     })
///     .unwrap();
/// assert!(registry.contains("Wrapped"));
/// ```
#[derive(Clone)]
pub struct AdditionsRegistry {
    create_id: String,
    creators: HashMap<String, Arc<CreateFn>>,
}

impl Default for AdditionsRegistry {
    fn default() -> Self {
        Self {
            create_id: DEFAULT_CREATE_ID.to_string(),
            creators: HashMap::new(),
        }
    }
}

impl AdditionsRegistry {
    /// An empty registry using [`DEFAULT_CREATE_ID`] as its sentinel key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the sentinel key. The key must not be empty.
    pub fn set_create_id(&mut self, create_id: impl Into<String>) -> Result<(), OptionsError> {
        let create_id = create_id.into();
        if create_id.is_empty() {
            return Err(OptionsError::EmptyCreateId);
        }
        self.create_id = create_id;
        Ok(())
    }

    /// Registers a reconstruction function under a type name.
    ///
    /// The name must not be empty; registering the same name twice replaces
    /// the earlier function.
    pub fn register<F>(&mut self, name: impl Into<String>, create: F) -> Result<(), OptionsError>
    where
        F: Fn(Mapping) -> Result<Value, String> + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(OptionsError::EmptyAdditionName);
        }
        self.creators.insert(name, Arc::new(create));
        Ok(())
    }

    /// The sentinel key dispatched on.
    #[must_use]
    pub fn create_id(&self) -> &str {
        &self.create_id
    }

    /// Whether a function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.creators.contains_key(name)
    }

    /// Whether no functions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Arc<CreateFn>> {
        self.creators.get(name)
    }
}

impl fmt::Debug for AdditionsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.creators.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("AdditionsRegistry")
            .field("create_id", &self.create_id)
            .field("types", &names)
            .finish()
    }
}
