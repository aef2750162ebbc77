//! Field rule chains and the registry that owns them.

use crate::traits::ValidationRule;
use indexmap::IndexMap;

/// Ordered rules bound to one field.
///
/// Rules run in insertion order and their failures are reported in the
/// same order.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to the chain.
    pub fn rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append an already boxed rule.
    pub fn push(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ValidationRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule_name()).collect()
    }
}

impl From<Vec<Box<dyn ValidationRule>>> for RuleSet {
    fn from(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }
}

impl FromIterator<Box<dyn ValidationRule>> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Box<dyn ValidationRule>>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Field name to rule chain, in registration order.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    fields: IndexMap<String, RuleSet>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rules for a field, replacing any previous chain.
    ///
    /// A replaced field keeps its original position.
    pub fn insert(&mut self, field: impl Into<String>, rules: RuleSet) -> Option<RuleSet> {
        self.fields.insert(field.into(), rules)
    }

    pub fn get(&self, field: &str) -> Option<&RuleSet> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Registered field names in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{EmailRule, LengthRule, RequiredRule};

    #[test]
    fn rule_set_keeps_order() {
        let rules = RuleSet::new()
            .rule(RequiredRule::new())
            .rule(LengthRule::min(3))
            .rule(EmailRule);

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.rule_names(), vec!["required", "min_length", "email"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut registry = RuleRegistry::new();
        registry.insert("user", RuleSet::new().rule(RequiredRule::new()));
        registry.insert("email", RuleSet::new().rule(EmailRule));

        let previous = registry.insert("user", RuleSet::new().rule(LengthRule::min(3)));

        assert_eq!(previous.map(|r| r.len()), Some(1));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.field_names().collect::<Vec<_>>(), vec!["user", "email"]);
        assert_eq!(
            registry.get("user").map(RuleSet::rule_names),
            Some(vec!["min_length"])
        );
    }

    #[test]
    fn iter_pairs_fields_with_rules() {
        let mut registry = RuleRegistry::new();
        registry.insert("user", RuleSet::new().rule(RequiredRule::new()).rule(LengthRule::min(3)));
        registry.insert("email", RuleSet::new().rule(EmailRule));

        let listed: Vec<(&str, Vec<&'static str>)> = registry
            .iter()
            .map(|(field, rules)| (field, rules.rule_names()))
            .collect();
        assert_eq!(
            listed,
            vec![("user", vec!["required", "min_length"]), ("email", vec!["email"])]
        );
    }

    #[test]
    fn collects_boxed_rules() {
        let boxed: Vec<Box<dyn ValidationRule>> =
            vec![Box::new(RequiredRule::new()), Box::new(EmailRule)];
        let rules: RuleSet = boxed.into_iter().collect();
        assert_eq!(rules.rule_names(), vec!["required", "email"]);
    }
}
