//! Help text for `-h/--help`.

use crate::arguments::option_name;
use crate::prompt::Prompt;
use crate::question::Kind;

struct Row {
    flags: String,
    kind: String,
    description: String,
    note: Option<String>,
}

fn startup_rows() -> Vec<Row> {
    vec![
        Row {
            flags: "-v, --version".to_string(),
            kind: String::new(),
            description: "Print the version number and exit".to_string(),
            note: None,
        },
        Row {
            flags: "-h, --help".to_string(),
            kind: String::new(),
            description: "Show this help message and exit".to_string(),
            note: None,
        },
    ]
}

fn option_rows(prompt: &Prompt) -> Vec<Row> {
    prompt
        .items()
        .filter(|(key, _)| prompt.options().contains(key))
        .map(|(key, item)| {
            let long = option_name(key);
            let flags = match &item.alias {
                Some(alias) => format!("-{alias}, {long}"),
                None => format!("    {long}"),
            };

            let question = item.static_question();
            let kind = question
                .and_then(|question| question.kind().type_label())
                .map(|label| format!("[{label}]"))
                .unwrap_or_default();

            let mut notes = Vec::new();
            if let Some(question) = question {
                let choices = question.declared_choices();
                if !choices.is_empty() {
                    let quoted: Vec<String> = choices
                        .iter()
                        .map(|choice| format!("'{}'", choice.value))
                        .collect();
                    notes.push(format!("choices: {}", quoted.join(", ")));
                }
                if let Some(default) = question.fixed_default_label() {
                    notes.push(format!("default: {default}"));
                }
                if question.is_required() {
                    notes.push("required".to_string());
                }
            }

            Row {
                flags,
                kind,
                description: item.description.clone(),
                note: (!notes.is_empty()).then(|| format!("({})", notes.join(", "))),
            }
        })
        .collect()
}

fn write_section(out: &mut String, title: &str, rows: &[Row], flags_width: usize, kind_width: usize) {
    out.push_str(title);
    out.push_str(":\n");

    let description_column = 2 + flags_width + 2 + kind_width + 2;
    for row in rows {
        let line = format!(
            "  {:flags_width$}  {:kind_width$}  {}",
            row.flags, row.kind, row.description
        );
        out.push_str(line.trim_end());
        out.push('\n');

        if let Some(note) = &row.note {
            out.push_str(&" ".repeat(description_column));
            out.push_str(note);
            out.push('\n');
        }
    }
}

/// Renders usage text: the invocation line, the description, the startup
/// options and one entry per question that accepts a command-line value.
pub fn render(prompt: &Prompt, name: &str, description: Option<&str>) -> String {
    let mut out = String::new();

    out.push_str("Usage: ");
    out.push_str(name);
    for positional in prompt.positionals() {
        out.push(' ');
        out.push_str(&positional.to_string());
    }
    out.push('\n');

    if let Some(description) = description {
        out.push('\n');
        out.push_str(description);
        out.push('\n');
    }

    let startup = startup_rows();
    let options = option_rows(prompt);

    let flags_width = startup
        .iter()
        .chain(&options)
        .map(|row| row.flags.len())
        .max()
        .unwrap_or(0);
    let kind_width = options
        .iter()
        .map(|row| row.kind.len())
        .max()
        .unwrap_or(0)
        .max(Kind::MultiSelect.type_label().map_or(0, |label| label.len() + 2));

    out.push('\n');
    write_section(&mut out, "Startup", &startup, flags_width, kind_width);

    if !options.is_empty() {
        out.push('\n');
        write_section(&mut out, "Options", &options, flags_width, kind_width);
    }

    out.trim_end().to_string()
}
