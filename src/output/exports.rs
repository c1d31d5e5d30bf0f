use anyhow::Result;
use std::io::Write;

use crate::config::OutputFormat;
use crate::variables::VariableMap;

use super::tables::variables_table;

/// Writes the collected variables in the requested format.
///
/// - Export: `export KEY="VALUE"` lines a POSIX shell can `eval`
/// - JSON: a single object, keys sorted
/// - Table: a Key/Value table for reading
pub fn export_variables(
    variables: &VariableMap,
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Export => export_shell(variables, output),
        OutputFormat::Json => export_json(variables, output),
        OutputFormat::Table => {
            writeln!(output, "{}", variables_table(variables))?;
            Ok(())
        }
    }
}

fn export_shell(variables: &VariableMap, output: &mut dyn Write) -> Result<()> {
    for (key, value) in variables {
        writeln!(output, "export {key}=\"{}\"", shell_escape(value))?;
    }
    Ok(())
}

fn export_json(variables: &VariableMap, output: &mut dyn Write) -> Result<()> {
    let json = serde_json::to_string_pretty(variables)?;
    writeln!(output, "{json}")?;
    Ok(())
}

/// Escapes the characters that keep their meaning inside double quotes.
fn shell_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(variables: &VariableMap, format: OutputFormat) -> String {
        let mut output = Vec::new();
        export_variables(variables, format, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn sample() -> VariableMap {
        VariableMap::from([
            ("ZED".to_string(), "last".to_string()),
            ("API_URL".to_string(), "https://api.example.com".to_string()),
        ])
    }

    #[test]
    fn test_export_is_sorted() {
        assert_eq!(
            render(&sample(), OutputFormat::Export),
            "export API_URL=\"https://api.example.com\"\nexport ZED=\"last\"\n"
        );
    }

    #[test]
    fn test_export_escapes_shell_characters() {
        let variables = VariableMap::from([(
            "TRICKY".to_string(),
            r#"say "hi" to $USER `now` \o/"#.to_string(),
        )]);

        assert_eq!(
            render(&variables, OutputFormat::Export),
            "export TRICKY=\"say \\\"hi\\\" to \\$USER \\`now\\` \\\\o/\"\n"
        );
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(render(&VariableMap::new(), OutputFormat::Export), "");
    }

    #[test]
    fn test_export_json() {
        let output = render(&sample(), OutputFormat::Json);
        let parsed: VariableMap = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, sample());
        assert!(output.find("API_URL").unwrap() < output.find("ZED").unwrap());
    }

    #[test]
    fn test_export_table() {
        let output = render(&sample(), OutputFormat::Table);
        assert!(output.contains("Key"));
        assert!(output.contains("Value"));
        assert!(output.contains("API_URL"));
        assert!(output.contains("https://api.example.com"));
    }
}
