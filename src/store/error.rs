use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of `required` was absent or blank. The message names every required
    /// field, not only the ones that were missing.
    #[error("{} are required", list_fields(.required))]
    MissingField { required: &'static [&'static str] },
}

fn list_fields(fields: &[&str]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out += if i + 1 == fields.len() { " and " } else { ", " };
        }
        out += field;
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_fields_in_order() {
        let err = ValidationError::MissingField { required: &["text", "author"] };
        assert_eq!(err.to_string(), "Text and author are required");

        let err = ValidationError::MissingField { required: &["a", "b", "c"] };
        assert_eq!(err.to_string(), "A, b and c are required");
    }
}
