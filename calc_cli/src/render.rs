//! Plain-text rendering of calculator forms and results.

use std::fmt::Write as _;

use calc_core::engine::{Container, FieldError, FormattedOutput, InputField, CALCULATION_ERROR_TITLE};
use calc_core::{CalculatorMeta, ROM_DISCLAIMER};

/// Text container: accumulates what a terminal should print.
#[derive(Debug, Default)]
pub struct TextContainer {
    buf: String,
    /// End of the mounted form; `clear` truncates back to here
    results_start: usize,
}

impl TextContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

/// One line describing a form field, e.g.
/// `thickness  Thickness [in]  required, 2..48`
pub fn describe_field(field: &InputField) -> String {
    let mut line = format!("{:<22} {}", field.name, field.label);
    if let Some(unit) = field.unit {
        let _ = write!(line, " [{}]", unit);
    }
    match (field.required, field.default) {
        (true, _) => line.push_str("  required"),
        (false, Some(default)) => {
            let _ = write!(line, "  default {}", default);
        }
        (false, None) => line.push_str("  optional"),
    }
    match (field.min, field.max) {
        (Some(min), Some(max)) => {
            let _ = write!(line, ", {}..{}", min, max);
        }
        (Some(min), None) => {
            let _ = write!(line, ", >= {}", min);
        }
        (None, Some(max)) => {
            let _ = write!(line, ", <= {}", max);
        }
        (None, None) => {}
    }
    line
}

fn write_rows(buf: &mut String, rows: &[FormattedOutput]) {
    let width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    for row in rows {
        let _ = writeln!(buf, "  {:<width$}  {}", row.label, row.display, width = width);
    }
}

impl Container for TextContainer {
    fn mount(&mut self, meta: &CalculatorMeta, fields: &[InputField]) {
        self.buf.clear();
        let _ = writeln!(self.buf, "{}", meta.title);
        let _ = writeln!(self.buf, "{}", "=".repeat(meta.title.chars().count()));
        if fields.is_empty() {
            let _ = writeln!(self.buf, "(no inputs)");
        }
        for field in fields {
            let _ = writeln!(self.buf, "  {}", describe_field(field));
        }
        self.results_start = self.buf.len();
    }

    fn clear(&mut self) {
        self.buf.truncate(self.results_start);
    }

    fn show_field_errors(&mut self, errors: &[FieldError]) {
        let _ = writeln!(self.buf, "Please correct the following:");
        for error in errors {
            let _ = writeln!(self.buf, "  - {}", error);
        }
    }

    fn show_results(&mut self, rows: &[FormattedOutput], details: &[FormattedOutput]) {
        write_rows(&mut self.buf, rows);
        if !details.is_empty() {
            let _ = writeln!(self.buf, "Details:");
            write_rows(&mut self.buf, details);
        }
        let _ = writeln!(self.buf, "{}", ROM_DISCLAIMER);
    }

    fn show_failure(&mut self, message: &str) {
        let _ = writeln!(self.buf, "{}", message);
    }

    fn show_error(&mut self, message: &str) {
        let _ = writeln!(self.buf, "{}", CALCULATION_ERROR_TITLE);
        let _ = writeln!(self.buf, "  {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::engine::{CalculatorEngine, FormData, Formatter};
    use calc_core::CalculatorId;

    #[test]
    fn test_describe_field() {
        let field = InputField::required("thickness", "Thickness").unit("in").min(2.0).max(48.0);
        let line = describe_field(&field);
        assert!(line.starts_with("thickness"));
        assert!(line.ends_with("Thickness [in]  required, 2..48"));

        let optional = InputField::optional("coats", "Coats", 2.0).min(1.0);
        assert!(describe_field(&optional).ends_with("Coats  default 2, >= 1"));
    }

    #[test]
    fn test_render_keeps_form_and_replaces_results() {
        let module = CalculatorId::Paint.module();
        let mut text = TextContainer::new();
        let mut engine = CalculatorEngine::attach(module, Formatter::default(), &mut text);
        assert!(text.as_str().starts_with("Paint Calculator\n"));

        engine.calculate(&FormData::new());
        engine.render(&mut text);
        assert!(text.as_str().contains("Paintable area is required"));

        let form: FormData = [("area", "600")].into_iter().collect();
        engine.calculate(&form);
        engine.render(&mut text);
        assert!(!text.as_str().contains("is required"));
        assert!(text.as_str().contains("3.50 gal"));
        assert!(text.as_str().trim_end().ends_with(ROM_DISCLAIMER));
    }

    #[test]
    fn test_placeholder_failure() {
        let mut text = TextContainer::new();
        let mut engine = CalculatorEngine::attach(CalculatorId::Roofing.module(), Formatter::default(), &mut text);
        assert!(text.as_str().contains("(no inputs)"));
        engine.calculate(&FormData::new());
        engine.render(&mut text);
        assert!(text.as_str().trim_end().ends_with("Not implemented"));
    }
}
