//! Milestone content generation: prompt templates and verdict parsing.
//!
//! Difficulty scaling is a prompting contract, not something enforced in
//! code: the milestone index is embedded verbatim in the instruction text so
//! the completion service anchors difficulty to it.

use crate::completion::ChatMessage;
use crate::error::Result;
use crate::session::Session;
use minijinja::{Environment, context};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const MILESTONE_SYSTEM_TEMPLATE: &str = r#"You are a programming tutor generating one exercise at a time along a learning path.

Rules for every exercise you produce:
- Write a short problem statement appropriate for milestone number {{ milestone_index }} of the path. Difficulty must grow with the milestone number: milestone 1 is a beginner warm-up, later milestones get strictly harder.
- Give exactly one function signature the learner must implement, idiomatic for {{ language }}.
- List 3 to 5 test cases as input/expected-output pairs, including at least one edge case.
- Do NOT include any solution code or hints toward the implementation.
- Output plain text only, no markdown fences."#;

const MILESTONE_USER_TEMPLATE: &str = r#"Generate milestone {{ milestone_index }} in {{ language }} about: {{ topic }}"#;

const EVALUATION_TEMPLATE: &str = r#"You are grading a learner's solution to a programming exercise. The file below contains the exercise description in comments followed by the learner's code.

Reply with exactly one word: PASS if the code correctly solves the described exercise, FAIL otherwise. No punctuation, no explanation.

{{ source }}"#;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("milestone_system", MILESTONE_SYSTEM_TEMPLATE)
        .expect("static template is valid");
    env.add_template("milestone_user", MILESTONE_USER_TEMPLATE)
        .expect("static template is valid");
    env.add_template("evaluation", EVALUATION_TEMPLATE)
        .expect("static template is valid");
    env
});

/// Builds the system/user message pair requesting the session's current
/// milestone. The rendered text always embeds the literal milestone numeral,
/// the language name and the verbatim topic.
pub fn build_milestone_messages(session: &Session) -> Result<Vec<ChatMessage>> {
    let ctx = context! {
        milestone_index => session.milestone_index(),
        language => session.language().to_string(),
        topic => session.topic(),
    };

    let system = TEMPLATES.get_template("milestone_system")?.render(&ctx)?;
    let user = TEMPLATES.get_template("milestone_user")?.render(&ctx)?;

    Ok(vec![ChatMessage::system(system), ChatMessage::user(user)])
}

/// Builds the single-message evaluation prompt for a submitted solution.
pub fn build_evaluation_messages(source: &str) -> Result<Vec<ChatMessage>> {
    let rendered = TEMPLATES
        .get_template("evaluation")?
        .render(context! { source => source })?;

    Ok(vec![ChatMessage::user(rendered)])
}

/// Prefixes every line of `text` with the comment token and a single space,
/// producing the playground artifact body.
pub fn comment_out(text: &str, token: &str) -> String {
    let mut out = String::with_capacity(text.len() + token.len() * 8);
    for line in text.lines() {
        out.push_str(token);
        out.push(' ');
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Outcome of an evaluation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Strict equality gate: `Pass` only if the response, after trimming
    /// surrounding whitespace, is byte-for-byte `"PASS"`. Every other
    /// outcome is `Fail` — near-matches are not interpreted.
    pub fn from_response(response: &str) -> Self {
        if response.trim() == "PASS" {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    #[test]
    fn test_milestone_prompt_embeds_index_language_topic() {
        let mut session = Session::new("binary trees", Language::Rust);
        session.advance();
        session.advance();

        let messages = build_milestone_messages(&session).unwrap();
        assert_eq!(messages.len(), 2);

        let combined = format!("{}\n{}", messages[0].content, messages[1].content);
        assert!(combined.contains('3'));
        assert!(combined.contains("rust"));
        assert!(combined.contains("binary trees"));
        // The user message carries the request with the literal numeral
        assert!(messages[1].content.contains("milestone 3"));
    }

    #[test]
    fn test_milestone_prompt_forbids_solutions() {
        let session = Session::new("sorting", Language::Python);
        let messages = build_milestone_messages(&session).unwrap();
        assert!(messages[0].content.contains("Do NOT include any solution code"));
    }

    #[test]
    fn test_evaluation_prompt_is_single_user_message() {
        let messages = build_evaluation_messages("def f(): pass").unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].content.contains("def f(): pass"));
        assert!(messages[0].content.contains("PASS"));
        assert!(messages[0].content.contains("FAIL"));
    }

    #[test]
    fn test_comment_out_prefixes_every_line() {
        let text = "Problem:\n\nWrite a function.";
        let commented = comment_out(text, "//");
        assert_eq!(commented, "// Problem:\n// \n// Write a function.\n");

        let commented = comment_out("one line", "#");
        assert_eq!(commented, "# one line\n");
    }

    #[test]
    fn test_verdict_is_a_strict_equality_gate() {
        assert_eq!(Verdict::from_response("PASS"), Verdict::Pass);
        assert_eq!(Verdict::from_response(" PASS\n"), Verdict::Pass);
        assert_eq!(Verdict::from_response("PASS."), Verdict::Fail);
        assert_eq!(Verdict::from_response("pass"), Verdict::Fail);
        assert_eq!(Verdict::from_response("FAIL"), Verdict::Fail);
        assert_eq!(Verdict::from_response(""), Verdict::Fail);
        assert_eq!(Verdict::from_response("Sure! PASS"), Verdict::Fail);
    }
}
