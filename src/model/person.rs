use serde::Serialize;

use crate::record::{Decode, FieldPath, Fields, Record, ValidationErrors};
use serde_json::Value;

/// A person with a name and an age.
///
/// Both fields are required. `age` accepts integers, integral floats and
/// integer strings (`"30"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub name: String,
    pub age: i64,
}

impl Person {
    /// Creates a new Person instance.
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `age` - Age in years
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

impl Decode for Person {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::open(input, path)?;
        let name = fields.required("name");
        let age = fields.required("age");
        fields.finish(|| Some(Self { name: name?, age: age? }))
    }
}

impl Record for Person {
    const NAME: &'static str = "Person";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ValidationError;
    use serde_json::json;

    #[test]
    fn test_decode_person() {
        let person = Person::decode(&json!({"name": "Alice", "age": 30})).unwrap();
        assert_eq!(person, Person::new("Alice", 30));
        assert_eq!(person.to_mapping(), json!({"name": "Alice", "age": 30}));
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = Person::decode(&json!({})).unwrap_err();
        assert_eq!(
            err.errors(),
            &[
                ValidationError::MissingField("name".into()),
                ValidationError::MissingField("age".into()),
            ]
        );
    }
}
