use std::collections::{HashMap, HashSet};

use leon::Template;

use crate::answers::Answers;
use crate::error::Result;

/// Flattens answers into template values. Lists are joined with `,`.
pub fn build_answer_context(answers: &Answers) -> HashMap<String, String> {
    answers
        .iter()
        .map(|(key, answer)| {
            let value = match answer.as_list() {
                Some(values) => values.join(","),
                None => answer.to_string(),
            };
            (key.to_string(), value)
        })
        .collect()
}

/// Find all tokens in all arguments of templates of command.
pub fn get_tokens(templates: &[Template]) -> HashSet<String> {
    let mut tokens = HashSet::new();

    for template in templates {
        for key in template.keys() {
            let _ = tokens.insert((*key).to_string());
        }
    }

    tokens
}

pub fn get_templates(command: &[String]) -> Result<Vec<Template>> {
    let mut templates: Vec<Template> = Vec::new();

    for argument in command {
        templates.push(Template::parse(argument.as_ref())?);
    }

    Ok(templates)
}

pub fn interpolate_command(
    context: &HashMap<String, String>,
    templates: &[Template],
) -> Result<Vec<String>> {
    let mut interpolated_arguments: Vec<String> = Vec::new();

    for template in templates {
        interpolated_arguments.push(template.render(&context)?);
    }

    Ok(interpolated_arguments)
}
