pub mod gemini;
pub mod generated_question;
pub mod question_record;
pub mod request;
