use std::fmt;

use serde::{Deserialize, Serialize};

pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; OPTION_COUNT] =
        [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn index(self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        };
        write!(f, "{}", c)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub prompt: String,
    pub options: [String; OPTION_COUNT],
    pub correct_answer: String, // empty when the generator omitted it
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            correct_answer: correct_answer.into(),
        }
    }

    /// A question can be shown only with a prompt and four distinct
    /// options. The error text reads after a subject, e.g. "question 3 ...".
    pub fn check_well_formed(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("has no prompt text".to_string());
        }

        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].iter().any(|earlier| earlier.trim() == option.trim()) {
                return Err(format!("repeats option '{}'", option.trim()));
            }
        }

        Ok(())
    }

    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    /// Exact, case-sensitive comparison after trimming both sides.
    pub fn is_correct(&self, selected: &str) -> bool {
        selected.trim() == self.correct_answer.trim()
    }

    pub fn correct_label(&self) -> Option<OptionLabel> {
        OptionLabel::ALL
            .into_iter()
            .find(|label| self.is_correct(self.option(*label)))
    }
}

/// An ordered batch of questions from one successful fetch. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet(Vec<Question>);

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            None
        } else {
            Some(Self(questions))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    // Always false.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Question> {
        self.0
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
