pub mod product;

use validator::ValidationErrors;

/// Flattens validator output into `field: message` lines.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match error.code.as_ref() {
                        "length" => "Invalid length".to_string(),
                        "range" => "Value out of range".to_string(),
                        _ => format!("Invalid {field}"),
                    });
                format!("{field}: {message}")
            })
        })
        .collect();

    messages.sort();
    messages
}
