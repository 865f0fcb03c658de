use validator::ValidationErrors;

/// Flatten validator output into `field: message` lines, sorted by field so
/// the notification text is stable.
pub fn format_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut messages = Vec::new();
    for (field, field_errors) in fields {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| match error.code.as_ref() {
                    "email" => "Invalid email format".to_string(),
                    "length" => "Invalid length".to_string(),
                    "must_match" => "Values do not match".to_string(),
                    _ => format!("Invalid {field}"),
                });
            messages.push(format!("{field}: {message}"));
        }
    }

    if messages.is_empty() {
        messages.push("Validation failed".to_string());
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::OwnerLoginRequest;
    use validator::Validate;

    #[test]
    fn formats_custom_messages() {
        let request = OwnerLoginRequest {
            national_id: "12345".into(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            format_validation_errors(&errors),
            vec!["national_id: National ID must be exactly 10 digits".to_string()]
        );
    }
}
