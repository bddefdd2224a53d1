use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::question::{Question, QuestionSet},
        dto::question_record::QuestionRecord,
    },
};

pub const EXPORT_FILENAME_SUFFIX: &str = "_MCQs.csv";

static UNSAFE_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("UNSAFE_FILENAME_CHARS is a valid regex pattern")
});

/// `"{topic}_MCQs.csv"`, with characters that would break a path replaced.
pub fn export_filename(topic: &str) -> String {
    let topic = UNSAFE_FILENAME_CHARS.replace_all(topic.trim(), "_");
    format!("{}{}", topic, EXPORT_FILENAME_SUFFIX)
}

/// Writes one row per question. The header is emitted with the first row,
/// so no questions means no output at all.
pub fn write_questions<W: Write>(writer: W, questions: &[Question]) -> AppResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for question in questions {
        csv_writer.serialize(QuestionRecord::from(question))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn questions_to_csv(questions: &[Question]) -> AppResult<String> {
    let mut buffer = Vec::new();
    write_questions(&mut buffer, questions)?;
    String::from_utf8(buffer).map_err(|e| AppError::FileError(e.to_string()))
}

pub fn export_to_file(path: &Path, questions: &[Question]) -> AppResult<()> {
    let file = File::create(path)?;
    write_questions(file, questions)?;
    log::info!("Exported {} questions to {}", questions.len(), path.display());
    Ok(())
}

/// Rejects the whole file on the first row that is not a well-formed
/// question, naming the row (1-based, header excluded).
pub fn read_questions<R: Read>(reader: R) -> AppResult<Vec<Question>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut questions = Vec::new();
    for (row, record) in csv_reader.deserialize::<QuestionRecord>().enumerate() {
        let question = Question::try_from(record?).map_err(|e| {
            log::warn!("Rejecting CSV row {}: {}", row + 1, e);
            AppError::ValidationError(format!("row {}: {}", row + 1, e))
        })?;
        questions.push(question);
    }
    Ok(questions)
}

/// Loads a previously exported file for another attempt.
pub fn import_questions(path: &Path) -> AppResult<QuestionSet> {
    let file = File::open(path)?;
    let questions = read_questions(file)?;
    QuestionSet::new(questions).ok_or_else(|| {
        AppError::ValidationError(format!("{} contains no questions", path.display()))
    })
}

/// Pretty-printed JSON array in the same flat shape as the CSV rows.
pub fn questions_to_json(questions: &[Question]) -> AppResult<String> {
    let records: Vec<QuestionRecord> = questions.iter().map(QuestionRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(|e| AppError::FileError(e.to_string()))
}
