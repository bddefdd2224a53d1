use std::{fs, path::PathBuf};

use crate::{
    app_state::AppState,
    cli::GenerateArgs,
    errors::AppResult,
    models::domain::question::{OptionLabel, QuestionSet},
    services::csv_export::{export_filename, export_to_file, questions_to_json},
};

/// Generates a set for the topic, prints it and writes any requested exports.
pub async fn generate(state: &mut AppState, args: &GenerateArgs) -> AppResult<()> {
    let questions = state.request_questions(&args.topic).await?.clone();
    let topic = state.topic().to_string();

    println!("{}", render_question_set(&topic, &questions));

    let csv_path = match (&args.csv, args.export) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(PathBuf::from(export_filename(&topic))),
        (None, false) => None,
    };
    if let Some(path) = csv_path {
        export_to_file(&path, questions.as_slice())?;
        println!("CSV written to {}", path.display());
    }

    if let Some(path) = &args.json {
        fs::write(path, questions_to_json(questions.as_slice())?)?;
        println!("JSON written to {}", path.display());
    }

    Ok(())
}

pub fn render_question_set(topic: &str, questions: &QuestionSet) -> String {
    let mut out = format!("{} questions for \"{}\"\n", questions.len(), topic);
    for (i, question) in questions.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, question.prompt));
        for label in OptionLabel::ALL {
            let marker = if question.correct_label() == Some(label) { "*" } else { " " };
            out.push_str(&format!("  {}{}) {}\n", marker, label, question.option(label)));
        }
    }
    out
}
