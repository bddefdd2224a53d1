pub mod generate_handler;
pub mod quiz_handler;

pub use generate_handler::generate;
pub use quiz_handler::{quiz, QuizPrompt, TerminalPrompt};
