//! Textual rendering of examples and the documentation side effect

use std::fmt;

use super::record::{Example, Expected};

const DOC_SECTION: &str = "Examples:";
const DOC_INDENT: &str = "        ";

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arguments: Vec<String> = self
            .positional_args()
            .iter()
            .map(ToString::to_string)
            .chain(
                self.named_args()
                    .iter()
                    .map(|(name, value)| format!("{name}={value}")),
            )
            .collect();

        write!(
            f,
            "{}(\n    {}\n)",
            self.target().name(),
            arguments.join(",\n    ")
        )?;

        if let Expected::Value(expected) = self.expected_return() {
            let pretty =
                serde_json::to_string_pretty(expected).unwrap_or_else(|_| expected.to_string());
            write!(f, "\n == \n{pretty}")?;
        } else if let Some(raises) = self.expected_exception() {
            write!(f, "\nraises {raises}")?;
        }
        Ok(())
    }
}

/// Append `example` to its target's documentation, under an `Examples:` section.
pub(crate) fn append_to_doc(example: &Example) {
    let rendering = example.to_string();
    example
        .target()
        .update_doc(|doc| with_example_section(doc, &rendering));
}

fn with_example_section(doc: Option<&str>, rendering: &str) -> String {
    let mut updated = doc.unwrap_or_default().to_string();
    if !updated.contains(DOC_SECTION) {
        updated.push('\n');
        updated.push_str(DOC_SECTION);
        updated.push_str("\n\n");
    }
    for line in rendering.lines() {
        updated.push_str(DOC_INDENT);
        updated.push_str(line);
        updated.push('\n');
    }
    updated.push('\n');
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::ExpectedException;
    use crate::function::ExampleFn;
    use serde_json::{json, Value};

    fn record(expected: Expected, raises: Option<ExpectedException>) -> Example {
        let target = ExampleFn::builder("render_tests", "add")
            .build(|_| Ok(Value::Null))
            .unwrap();
        Example::new(
            target,
            vec![json!(1)],
            vec![("number_2".to_string(), json!("two"))],
            expected,
            raises,
        )
        .unwrap()
    }

    #[test]
    fn test_render_call() {
        let rendered = record(Expected::NotSet, None).to_string();
        assert_eq!(rendered, "add(\n    1,\n    number_2=\"two\"\n)");
    }

    #[test]
    fn test_render_returns_and_raises() {
        let returns = record(Expected::Value(json!(3)), None).to_string();
        assert!(returns.ends_with("\n == \n3"));

        let raises = record(Expected::NotSet, Some("ValueError".into())).to_string();
        assert!(raises.ends_with("\nraises ValueError"));
    }

    #[test]
    fn test_doc_section_inserted_once() {
        let first = with_example_section(Some("Adds."), "add(\n    1\n)");
        assert_eq!(first, "Adds.\nExamples:\n\n        add(\n            1\n        )\n\n");

        let second = with_example_section(Some(&first), "add()");
        assert_eq!(second.matches(DOC_SECTION).count(), 1);
        assert!(second.ends_with("        add()\n\n"));
    }

    #[test]
    fn test_doc_section_without_doc() {
        let doc = with_example_section(None, "f()");
        assert!(doc.starts_with("\nExamples:"));
    }
}
