//! Table Row Markup
//!
//! Builds the `<tr>` fragment for one source line:
//!
//! ```text
//! <tr class="coverFull" data-html-tooltip="All branches covered">
//!   <td class="line"><a name="12">12</a></td>
//!   <td class="hits">2/2</td>
//!   <td class="code">...sanitized markup...</td>
//! </tr>
//! ```
//!
//! (rendered without the line breaks shown above)

/// Name of the tooltip attribute read by the report viewer
pub const TOOLTIP_ATTRIBUTE: &str = "data-html-tooltip";

/// Escape text node content
#[must_use]
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value (always emitted in double quotes)
#[must_use]
pub fn escape_attribute(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&#39;")
}

/// One rendered source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRow<'a> {
    /// CSS class of the row
    pub class: &'a str,
    /// Tooltip, omitted from the markup when `None`
    pub tooltip: Option<&'a str>,
    /// 1-based line number, used as anchor name and visible text
    pub line: u32,
    /// Text of the hits column
    pub hits: &'a str,
    /// Already sanitized code markup, embedded verbatim
    pub code: &'a str,
}

impl CoverageRow<'_> {
    /// Render the row as an HTML fragment
    #[must_use]
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(96 + self.code.len());

        html.push_str("<tr class=\"");
        html.push_str(&escape_attribute(self.class));
        html.push('"');
        if let Some(tooltip) = self.tooltip {
            html.push(' ');
            html.push_str(TOOLTIP_ATTRIBUTE);
            html.push_str("=\"");
            html.push_str(&escape_attribute(tooltip));
            html.push('"');
        }
        html.push('>');

        let line = self.line.to_string();
        html.push_str("<td class=\"line\"><a name=\"");
        html.push_str(&line);
        html.push_str("\">");
        html.push_str(&line);
        html.push_str("</a></td>");

        html.push_str("<td class=\"hits\">");
        html.push_str(&escape_text(self.hits));
        html.push_str("</td>");

        html.push_str("<td class=\"code\">");
        html.push_str(self.code);
        html.push_str("</td>");

        html.push_str("</tr>");
        html
    }
}
