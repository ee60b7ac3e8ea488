const INSTRUCTIONS: &str = "\
Analyze ALL claims in the following text and determine if the facts are TRUE, FALSE, or INSUFFICIENT_INFORMATION.

IMPORTANT: If the text contains multiple claims, evaluate the OVERALL truthfulness. If ANY claim is false, the verdict should be FALSE.

Respond ONLY in this format:
Verdict: [TRUE/FALSE/INSUFFICIENT_INFORMATION]
Reason: [Brief explanation addressing ALL claims]

Text: ";

/// Fact-check prompt around the user's text, embedded verbatim.
pub fn build_prompt(text: &str) -> String {
    format!("{}{}", INSTRUCTIONS, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_original_text_after_instructions() {
        let text = "The Moon is made of CHEESE!! see http://x.com";
        let prompt = build_prompt(text);
        assert!(prompt.ends_with(&format!("Text: {}", text)));
        assert!(prompt.starts_with("Analyze ALL claims"));
    }

    #[test]
    fn asks_for_two_line_conjunctive_answer() {
        let prompt = build_prompt("x");
        assert!(prompt.contains("If ANY claim is false, the verdict should be FALSE."));
        assert!(prompt.contains("Verdict: [TRUE/FALSE/INSUFFICIENT_INFORMATION]\nReason: "));
    }
}
