//! HTML rendering of a [`DiagnosticsReport`].

use std::fmt::Write as _;

use crate::diagnostics::report::DiagnosticsReport;
use crate::security::escape_html;

/// Render the report as a self-contained `<section>` fragment.
/// Every key and value is escaped.
pub fn render_html(report: &DiagnosticsReport) -> String {
    let mut html = String::from("<section id=\"diagnostics\">\n<h1>Diagnostics</h1>\n");

    for section in &report.sections {
        let _ = writeln!(html, "<h2>{}</h2>", escape_html(section.title));
        html.push_str("<table border=\"1\">\n");
        for entry in &section.entries {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&entry.key),
                escape_html(&entry.value)
            );
        }
        html.push_str("</table>\n");
    }

    html.push_str("</section>\n");
    html
}
