pub mod question;
pub mod quiz_session;
pub use question::{OptionLabel, Question, QuestionSet};
pub use quiz_session::{AnswerOutcome, QuizResult, QuizSession, SessionStatus};
