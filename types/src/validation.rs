//! Declarative form validation.
//!
//! Rules are plain data ([`Rule`]) so they can be built in code or shipped by
//! the backend alongside user-defined fields. A [`FormSchema`] is compiled
//! once into a [`CompiledSchema`], which owns the compiled regular
//! expressions and can be reused for every validation pass.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    Pattern { regex: String, message: String },
    OneOf(Vec<String>),
    Range { min: Option<f64>, max: Option<f64> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field '{field}' has an invalid pattern")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

impl FormSchema {
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn compile(self) -> Result<CompiledSchema, SchemaError> {
        let mut patterns = HashMap::new();
        for field in &self.fields {
            for rule in &field.rules {
                if let Rule::Pattern { regex, .. } = rule {
                    let compiled = Regex::new(regex).map_err(|source| SchemaError::InvalidPattern {
                        field: field.name.clone(),
                        source,
                    })?;
                    patterns.insert(regex.clone(), compiled);
                }
            }
        }

        Ok(CompiledSchema {
            schema: self,
            patterns,
        })
    }
}

/// Field values keyed by field name.
pub type FormValues = HashMap<String, String>;

/// First failing message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", messages.join("; "))
    }
}

#[derive(Debug, Clone)]
pub struct CompiledSchema {
    schema: FormSchema,
    patterns: HashMap<String, Regex>,
}

impl CompiledSchema {
    pub fn fields(&self) -> &[FieldSchema] {
        &self.schema.fields
    }

    pub fn validate(&self, values: &FormValues) -> ValidationErrors {
        self.check(self.schema.fields.iter(), values)
    }

    /// Validate only the named fields, e.g. the ones on one drawer step.
    pub fn validate_fields(&self, names: &[&str], values: &FormValues) -> ValidationErrors {
        let fields = self
            .schema
            .fields
            .iter()
            .filter(|f| names.contains(&f.name.as_str()));
        self.check(fields, values)
    }

    fn check<'a>(
        &self,
        fields: impl Iterator<Item = &'a FieldSchema>,
        values: &FormValues,
    ) -> ValidationErrors {
        let mut errors = BTreeMap::new();
        for field in fields {
            let value = values.get(&field.name).map(|v| v.trim()).unwrap_or("");
            if value.is_empty() && !field.is_required() {
                continue;
            }
            if let Some(message) = field.rules.iter().find_map(|rule| self.apply(field, rule, value)) {
                errors.insert(field.name.clone(), message);
            }
        }
        ValidationErrors(errors)
    }

    fn apply(&self, field: &FieldSchema, rule: &Rule, value: &str) -> Option<String> {
        let label = &field.label;
        let length = value.chars().count();

        match rule {
            Rule::Required if value.is_empty() => Some(format!("{label} is required")),
            Rule::MinLength(min) if length < *min => {
                Some(format!("{label} must be at least {min} characters"))
            }
            Rule::MaxLength(max) if length > *max => {
                Some(format!("{label} must be at most {max} characters"))
            }
            Rule::Email if !EMAIL.is_match(value) => {
                Some(format!("{label} must be a valid email address"))
            }
            Rule::Pattern { regex, message } => {
                let matches = self.patterns.get(regex).is_some_and(|re| re.is_match(value));
                (!matches).then(|| message.clone())
            }
            Rule::OneOf(options) if !options.iter().any(|o| o == value) => {
                Some(format!("{label} must be one of: {}", options.join(", ")))
            }
            Rule::Range { min, max } => match value.parse::<f64>() {
                Err(_) => Some(format!("{label} must be a number")),
                Ok(n) if min.is_some_and(|min| n < min) || max.is_some_and(|max| n > max) => {
                    Some(range_message(label, *min, *max))
                }
                Ok(_) => None,
            },
            _ => None,
        }
    }
}

fn range_message(label: &str, min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{label} must be between {min} and {max}"),
        (Some(min), None) => format!("{label} must be at least {min}"),
        (None, Some(max)) => format!("{label} must be at most {max}"),
        (None, None) => format!("{label} is out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn schema() -> CompiledSchema {
        FormSchema::default()
            .field(
                FieldSchema::new("username", "Username")
                    .rule(Rule::Required)
                    .rule(Rule::MinLength(3))
                    .rule(Rule::Pattern {
                        regex: "^[a-z0-9_.]+$".into(),
                        message: "Username may only contain a-z, 0-9, _ and .".into(),
                    }),
            )
            .field(FieldSchema::new("email", "Email").rule(Rule::Email))
            .field(
                FieldSchema::new("age", "Age").rule(Rule::Range {
                    min: Some(16.0),
                    max: Some(99.0),
                }),
            )
            .compile()
            .unwrap()
    }

    #[test]
    fn first_failing_rule_wins() {
        let errors = schema().validate(&values(&[("username", "ab")]));

        assert_eq!(
            errors.get("username"),
            Some("Username must be at least 3 characters")
        );
    }

    #[test]
    fn optional_empty_fields_are_skipped() {
        let errors = schema().validate(&values(&[("username", "lina.k"), ("email", "  ")]));
        assert!(errors.is_empty(), "{errors}");
    }

    #[test]
    fn pattern_and_email_messages() {
        let errors = schema().validate(&values(&[
            ("username", "Lina K"),
            ("email", "lina@"),
            ("age", "12"),
        ]));

        assert_eq!(
            errors.get("username"),
            Some("Username may only contain a-z, 0-9, _ and .")
        );
        assert_eq!(errors.get("email"), Some("Email must be a valid email address"));
        assert_eq!(errors.get("age"), Some("Age must be between 16 and 99"));
    }

    #[test]
    fn validate_fields_limits_scope() {
        let errors = schema().validate_fields(&["email"], &values(&[("email", "x@y.io")]));
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn invalid_pattern_fails_compilation() {
        let result = FormSchema::default()
            .field(FieldSchema::new("code", "Code").rule(Rule::Pattern {
                regex: "([a-z".into(),
                message: "bad".into(),
            }))
            .compile();

        assert!(matches!(result, Err(SchemaError::InvalidPattern { field, .. }) if field == "code"));
    }

    #[test]
    fn rules_round_trip_as_tagged_data() {
        let rule: Rule = serde_json::from_str(r#"{"rule": "max_length", "value": 12}"#).unwrap();
        assert_eq!(rule, Rule::MaxLength(12));

        let rule: Rule = serde_json::from_str(r#"{"rule": "required"}"#).unwrap();
        assert_eq!(rule, Rule::Required);
    }
}
