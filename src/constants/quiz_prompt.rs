pub const QUESTION_SHAPE_EXAMPLE: &str = r#"{
    "question": "Sample question?",
    "options": ["Option 1", "Option 2", "Option 3", "Option 4"],
    "answer": "Correct option"
}"#;

/// Instruction sent to the generation service for one topic.
pub fn question_generation_prompt(topic: &str, question_count: u16) -> String {
    format!(
        "Generate {count} multiple-choice questions (MCQs) in JSON format for the topic: {topic}. \
Return a JSON array where every element has exactly four options and an answer that repeats \
the text of the correct option. The structure of each element should be:\n{shape}",
        count = question_count,
        topic = topic,
        shape = QUESTION_SHAPE_EXAMPLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_topic_count_and_shape() {
        let prompt = question_generation_prompt("Photosynthesis", 25);

        assert!(prompt.starts_with("Generate 25 multiple-choice questions"));
        assert!(prompt.contains("for the topic: Photosynthesis."));
        assert!(prompt.contains("\"options\": [\"Option 1\""));
        assert!(prompt.ends_with('}'));
    }
}
