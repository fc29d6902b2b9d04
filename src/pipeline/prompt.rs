use super::task::CommentStyle;

/// Builds the instruction prompt sent to the completion service.
///
/// The prompt carries the full annotation policy so that any backend
/// receives identical constraints. This is a pure function: the same
/// inputs always produce the same prompt text.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Assemble the prompt for one file
    pub fn build(content: &str, language_hint: &str, style: CommentStyle) -> String {
        let style_directive = match style {
            CommentStyle::Basic => {
                "Keep comments very brief and only for the most important elements."
            }
            CommentStyle::Advanced => {
                "Add slightly more detailed comments but still be concise."
            }
        };

        format!(
            "You are a code documentation expert. Add minimal, focused comments to the \
             following {language_hint} code with these strict rules:\n\
             1. DO NOT modify any existing code - only add comments\n\
             2. Add comments ONLY for:\n\
             \x20  - Function declarations (brief description of purpose)\n\
             \x20  - Complex logic blocks\n\
             \x20  - Important class and type declarations\n\
             \x20  - Critical business logic\n\
             3. Keep comments brief and to the point\n\
             4. Comment no more than 20% of the code lines\n\
             5. Use the appropriate comment style for the language\n\
             6. Return the COMPLETE code with your minimal comments added\n\
             7. Do not wrap the result in delimiters or code fences naming the language\n\
             {style_directive}\n\
             \n\
             CODE:\n\
             {content}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        let a = PromptBuilder::build("fn main() {}", "rs", CommentStyle::Basic);
        let b = PromptBuilder::build("fn main() {}", "rs", CommentStyle::Basic);
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_embeds_content_at_end() {
        let content = "function add(a,b){return a+b;}";
        let prompt = PromptBuilder::build(content, "js", CommentStyle::Basic);
        assert!(prompt.ends_with(content));
    }

    #[test]
    fn test_prompt_names_language() {
        let prompt = PromptBuilder::build("print(1)", "py", CommentStyle::Basic);
        assert!(prompt.contains("py code"));
    }

    #[test]
    fn test_prompt_carries_policy() {
        let prompt = PromptBuilder::build("x", "js", CommentStyle::Basic);
        assert!(prompt.contains("DO NOT modify any existing code"));
        assert!(prompt.contains("no more than 20% of the code lines"));
        assert!(prompt.contains("COMPLETE code"));
        assert!(prompt.contains("code fences"));
    }

    #[test]
    fn test_style_changes_directive() {
        let basic = PromptBuilder::build("x", "js", CommentStyle::Basic);
        let advanced = PromptBuilder::build("x", "js", CommentStyle::Advanced);

        assert_ne!(basic, advanced);
        assert!(basic.contains("very brief"));
        assert!(advanced.contains("more detailed"));
    }
}
