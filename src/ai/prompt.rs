//! Reusable prompts using Handlebars for templating. Handlebars adds
//! additional security controls since it can't do much out of the box
//! without registering your own helpers, which suits prompt text that
//! gets filled with untrusted user input.

use std::fmt;

use handlebars::Handlebars;

#[derive(Debug)]
pub enum Prompt {
    TeachbackIntro,
    TeachbackNextQuestion,
    TeachbackFeedback,
    Flashcards,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Prompt> for String {
    fn from(item: Prompt) -> String {
        format!("{:?}", item)
    }
}

const TEACHBACK_INTRO_PROMPT: &str = r#"You are a cheerful and enthusiastic question-asker for a student in {{audience}} studying {{topic}}.
The difficulty level is {{difficulty}}. {{difficulty_guidance}}
Your role is to ask questions about {{topic}} in an indirect, conversational way.
Be happy, encouraging, and positive throughout the conversation.
Instead of asking direct questions like "What is X?", use indirect phrasing like "I'm curious about X" or "I'd love to know more about X".
Do not provide explanations, commentary, or feedback during the conversation.
Do not acknowledge if answers are correct or incorrect.
Simply ask one question at a time and wait for the answer.
Start with a cheerful introduction: "Hi there! I'm excited to chat with you about {{topic}}. Let's begin!"
Then immediately ask your first question in an indirect, friendly way without any additional commentary."#;

const TEACHBACK_NEXT_QUESTION_PROMPT: &str = r"Just ask the next question about the topic in an indirect, cheerful way. Do not provide any commentary, feedback, or acknowledgment of the previous answer. Keep your response friendly and positive, but focused on asking the next question.";

const TEACHBACK_FEEDBACK_PROMPT: &str = r#"You are providing feedback to a student who has been answering questions about {{topic}}.
Address the student directly using "you" and "your" (not "the student" or "they").
Provide constructive feedback on their answers, summarizing their strengths and areas for improvement.
Keep your feedback concise, encouraging, and specific.
Start with "Here's your feedback:" and then provide the feedback in a conversational tone."#;

const FLASHCARDS_PROMPT: &str = r#"Generate {{count}} high-quality flashcards from the study material below{{#if subject}} for the subject {{subject}}{{/if}}. The flashcards should:
1. Focus on key concepts, definitions, or problem-solving techniques
2. Have clear, concise questions
3. Provide comprehensive but succinct answers
4. Cover different topics from the material to ensure broad understanding
5. Include proper subject-specific terminology

Format every flashcard on its own pair of lines, exactly like this:
Q: The question text
A: The answer text

Do not add numbering, commentary, or anything else around the flashcards.

STUDY MATERIAL:
{{material}}"#;

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_template_string(&Prompt::TeachbackIntro.to_string(), TEACHBACK_INTRO_PROMPT)
        .expect("Failed to register template");
    registry
        .register_template_string(
            &Prompt::TeachbackNextQuestion.to_string(),
            TEACHBACK_NEXT_QUESTION_PROMPT,
        )
        .expect("Failed to register template");
    registry
        .register_template_string(
            &Prompt::TeachbackFeedback.to_string(),
            TEACHBACK_FEEDBACK_PROMPT,
        )
        .expect("Failed to register template");
    registry
        .register_template_string(&Prompt::Flashcards.to_string(), FLASHCARDS_PROMPT)
        .expect("Failed to register template");
    registry
}
