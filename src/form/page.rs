//! HTML rendering for the form page.

use std::fmt::Write as _;

use crate::form::name::SubmittedName;

/// Shown when a submission carries no usable name.
pub const VALIDATION_MESSAGE: &str = "Please enter your name.";

/// What the handler decided to show above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Not a submission: the empty form only.
    Form,
    /// A submission with a usable name.
    Greeting(SubmittedName),
    /// A submission whose name was missing or blank.
    Validation,
}

impl FormOutcome {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormOutcome::Form => "form",
            FormOutcome::Greeting(_) => "greeting",
            FormOutcome::Validation => "validation",
        }
    }
}

/// Render the full page: outcome message, form, then the diagnostics
/// fragment. `diagnostics_html` must already be escaped.
pub fn render_page(outcome: &FormOutcome, diagnostics_html: &str) -> String {
    let mut html = String::with_capacity(1024 + diagnostics_html.len());
    html.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Greeter</title>\n</head>\n<body>\n",
    );

    match outcome {
        FormOutcome::Form => {}
        FormOutcome::Greeting(name) => {
            let _ = writeln!(html, "<h2>Hello, {}!</h2>", name.as_ref());
        }
        FormOutcome::Validation => {
            let _ = writeln!(html, "<p style=\"color:red;\">{VALIDATION_MESSAGE}</p>");
        }
    }

    html.push_str(concat!(
        "<form method=\"post\" action=\"\">\n",
        "<label for=\"name\">Enter your name:</label>\n",
        "<input type=\"text\" name=\"name\" id=\"name\" required>\n",
        "<button type=\"submit\">Submit</button>\n",
        "</form>\n",
    ));

    html.push_str(diagnostics_html);
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_form_has_no_message() {
        let html = render_page(&FormOutcome::Form, "");
        assert!(html.contains("<form method=\"post\""));
        assert!(html.contains("name=\"name\""));
        assert!(!html.contains("Hello,"));
        assert!(!html.contains(VALIDATION_MESSAGE));
    }

    #[test]
    fn test_greeting_precedes_form() {
        let name = SubmittedName::parse(Some("Ann")).unwrap();
        let html = render_page(&FormOutcome::Greeting(name), "");
        let greeting = html.find("<h2>Hello, Ann!</h2>").unwrap();
        let form = html.find("<form").unwrap();
        assert!(greeting < form);
    }

    #[test]
    fn test_validation_message() {
        let html = render_page(&FormOutcome::Validation, "");
        assert!(html.contains(VALIDATION_MESSAGE));
        assert!(!html.contains("Hello,"));
    }

    #[test]
    fn test_diagnostics_appended_after_form() {
        let html = render_page(&FormOutcome::Form, "<section id=\"diagnostics\"></section>\n");
        let form_end = html.find("</form>").unwrap();
        let diagnostics = html.find("id=\"diagnostics\"").unwrap();
        assert!(form_end < diagnostics);
        assert!(html.ends_with("</html>\n"));
    }
}
