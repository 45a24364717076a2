//! Line based text reports.
//!
//! Formatters push lines into a [`Report`] and render it exactly once.
//! Every line, including the last one, is terminated by a newline.
use lazy_static::lazy_static;

use std::fmt;

lazy_static! {
    /// Separates the entries of a list.
    pub static ref DIVIDER: String = "-".repeat(50);
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    /// Start a report with a title followed by an empty line.
    pub fn titled<S: Into<String>>(title: S) -> Self {
        let mut report = Self::default();
        report.line(title);
        report.blank();
        report
    }

    pub fn line<S: Into<String>>(&mut self, line: S) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line(String::new())
    }

    /// Close an entry of a list.
    pub fn divider(&mut self) -> &mut Self {
        self.blank().line(DIVIDER.as_str()).blank()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_report_renders_nothing() {
        assert_eq!(Report::default().render(), "");
    }

    #[test]
    fn titled_report_has_a_blank_line() {
        assert_eq!(Report::titled("Title:").render(), "Title:\n\n");
    }

    #[test]
    fn divider_is_surrounded_by_blank_lines() {
        let mut report = Report::default();
        report.line("entry").divider();
        assert_eq!(
            report.render(),
            format!("entry\n\n{}\n\n", "-".repeat(50))
        );
    }
}
