//! Operator registry.
//!
//! The registry holds the ordered unary and binary operator keywords the
//! tokenizer, validator and tree builder recognise. Position in each list is
//! the precedence rank of the operator within its arity class: index 0 has the
//! highest precedence. It is picked first as a split point, so it ends up
//! closest to the root.
//!
//! A registry is a plain value that can be handed to the parser explicitly.
//! For callers that prefer one configuration for the whole process there is a
//! global instance behind a lock; it is meant to be written once at startup
//! and read by every parse afterwards.

use std::sync::RwLock;

use lazy_static::lazy_static;

/// Default unary operator keywords.
pub const DEFAULT_UNARY_OPERATORS: &[&str] = &["not"];

/// Default binary operator keywords, highest precedence first.
pub const DEFAULT_BINARY_OPERATORS: &[&str] = &["or", "and", "implies", "excludes", "requires"];

/// Ordered unary and binary operator keywords.
///
/// No validation is performed on the contents. Callers are responsible for
/// supplying non-empty keywords that do not contain whitespace or
/// parentheses, and for keeping the two lists disjoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatorRegistry {
    unary_operators: Vec<String>,
    binary_operators: Vec<String>,
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_UNARY_OPERATORS.iter().copied(),
            DEFAULT_BINARY_OPERATORS.iter().copied(),
        )
    }
}

impl OperatorRegistry {
    /// Creates a registry from two ordered keyword lists.
    pub fn new<U, B>(unary: U, binary: B) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            unary_operators: unary.into_iter().map(Into::into).collect(),
            binary_operators: binary.into_iter().map(Into::into).collect(),
        }
    }

    /// The unary operators, highest precedence first.
    pub fn unary_operators(&self) -> &[String] {
        &self.unary_operators
    }

    /// The binary operators, highest precedence first.
    pub fn binary_operators(&self) -> &[String] {
        &self.binary_operators
    }

    /// Replaces the unary operator list.
    pub fn set_unary_operators<I>(&mut self, operators: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.unary_operators = operators.into_iter().map(Into::into).collect();
    }

    /// Replaces the binary operator list.
    pub fn set_binary_operators<I>(&mut self, operators: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.binary_operators = operators.into_iter().map(Into::into).collect();
    }

    /// Whether `symbol` is a configured unary operator.
    pub fn is_unary(&self, symbol: &str) -> bool {
        self.unary_operators.iter().any(|op| op == symbol)
    }

    /// Whether `symbol` is a configured binary operator.
    pub fn is_binary(&self, symbol: &str) -> bool {
        self.binary_operators.iter().any(|op| op == symbol)
    }

    /// Whether `symbol` is a configured operator of either arity.
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.is_unary(symbol) || self.is_binary(symbol)
    }

    /// A symbol is a feature when it is neither a configured operator nor a
    /// bare parenthesis.
    pub fn is_feature(&self, symbol: &str) -> bool {
        !self.is_operator(symbol) && symbol != "(" && symbol != ")"
    }

    /// Precedence rank of a unary operator (0 is highest).
    pub fn unary_rank(&self, symbol: &str) -> Option<usize> {
        self.unary_operators.iter().position(|op| op == symbol)
    }

    /// Precedence rank of a binary operator (0 is highest).
    pub fn binary_rank(&self, symbol: &str) -> Option<usize> {
        self.binary_operators.iter().position(|op| op == symbol)
    }

    /// Loads a registry from its JSON form.
    ///
    /// ```text
    /// {"unary_operators": ["not"], "binary_operators": ["and", "or"]}
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Saves the registry as pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: RwLock<OperatorRegistry> = RwLock::new(OperatorRegistry::default());
}

/// Returns a snapshot of the process-wide registry.
///
/// A poisoned lock still holds a fully written registry (writers only swap
/// whole values), so the snapshot is taken from it regardless.
pub fn global_registry() -> OperatorRegistry {
    match GLOBAL_REGISTRY.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replaces the process-wide registry. Affects every later parse that reads
/// the global configuration.
pub fn set_global_registry(registry: OperatorRegistry) {
    #[cfg(feature = "logging")]
    log::debug!(
        "global operator registry set: unary={:?} binary={:?}",
        registry.unary_operators(),
        registry.binary_operators()
    );
    match GLOBAL_REGISTRY.write() {
        Ok(mut guard) => *guard = registry,
        Err(poisoned) => *poisoned.into_inner() = registry,
    }
}

/// Replaces the unary operator list of the process-wide registry.
pub fn set_global_unary_operators<I>(operators: I)
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut registry = global_registry();
    registry.set_unary_operators(operators);
    set_global_registry(registry);
}

/// Replaces the binary operator list of the process-wide registry.
pub fn set_global_binary_operators<I>(operators: I)
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut registry = global_registry();
    registry.set_binary_operators(operators);
    set_global_registry(registry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_operators() {
        let registry = OperatorRegistry::default();
        assert_eq!(registry.unary_operators(), ["not"]);
        assert_eq!(
            registry.binary_operators(),
            ["or", "and", "implies", "excludes", "requires"]
        );
    }

    #[test]
    fn test_classification() {
        let registry = OperatorRegistry::default();
        assert!(registry.is_unary("not"));
        assert!(!registry.is_unary("or"));
        assert!(registry.is_binary("implies"));
        assert!(registry.is_feature("Engine"));
        assert!(!registry.is_feature("requires"));
        assert!(!registry.is_feature("("));
        assert!(!registry.is_feature(")"));
        // keywords are case-sensitive
        assert!(registry.is_feature("NOT"));
    }

    #[test]
    fn test_ranks() {
        let registry = OperatorRegistry::default();
        assert_eq!(registry.binary_rank("or"), Some(0));
        assert_eq!(registry.binary_rank("requires"), Some(4));
        assert_eq!(registry.binary_rank("not"), None);
        assert_eq!(registry.unary_rank("not"), Some(0));
    }

    #[test]
    fn test_setters_replace_lists() {
        let mut registry = OperatorRegistry::default();
        registry.set_unary_operators(["neg", "not"]);
        registry.set_binary_operators(vec!["&".to_string(), "|".to_string()]);
        assert_eq!(registry.unary_rank("not"), Some(1));
        assert!(registry.is_binary("|"));
        assert!(registry.is_feature("or"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_configuration() {
        let registry =
            OperatorRegistry::from_json(r#"{"unary_operators":["!"],"binary_operators":["&&","||"]}"#)
                .unwrap();
        assert_eq!(registry, OperatorRegistry::new(["!"], ["&&", "||"]));

        let json = registry.to_json().unwrap();
        assert_eq!(OperatorRegistry::from_json(&json).unwrap(), registry);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_configuration_rejects_missing_lists() {
        assert!(OperatorRegistry::from_json(r#"{"unary_operators":["not"]}"#).is_err());
    }
}
