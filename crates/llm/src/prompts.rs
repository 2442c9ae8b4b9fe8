//! Prompt templates for inconsistency analysis

use slidecheck_core::SlideRecord;

/// Placeholder replaced by the rendered slide content.
const CONTENT_PLACEHOLDER: &str = "{presentation_content}";

/// Prompts larger than this are sent anyway but logged, since the whole deck
/// goes out in one request.
pub const LARGE_PROMPT_BYTES: usize = 2_000_000;

const INCONSISTENCY_PROMPT: &str = r#"You are an AI assistant specialized in finding factual and logical inconsistencies in presentation slide content.
You will be provided with a JSON array of slide content. Each object in the array represents a slide and contains its slide number, text content, and table data.

Your task is to analyze this content across all slides to identify any:
1. Conflicting numerical data (e.g., revenue figures, percentages, time savings).
2. Contradictory textual claims (e.g., "market is highly competitive" vs. "few competitors").
3. Timeline mismatches (e.g., conflicting dates or forecasts).
4. Any other logical inconsistencies.

Please provide a clear and structured output in Markdown format. For each inconsistency you find, specify the following:
- **Issue:** A brief description of the inconsistency.
- **Slides:** The slide numbers involved.
- **Details:** The specific conflicting information and where it is located.

If you find no inconsistencies, state "No inconsistencies found."

Here is the presentation content:
{presentation_content}
"#;

/// Render slide records as the JSON array embedded in the prompt.
pub fn render_slide_content(slides: &[SlideRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(slides)
}

/// Build the full inconsistency-analysis prompt for a deck.
pub fn build_inconsistency_prompt(slides: &[SlideRecord]) -> serde_json::Result<String> {
    let content = render_slide_content(slides)?;
    let prompt = INCONSISTENCY_PROMPT.replace(CONTENT_PLACEHOLDER, &content);

    if prompt.len() > LARGE_PROMPT_BYTES {
        log::warn!(
            "Prompt is {} bytes for {} slides; the model may reject or truncate it",
            prompt.len(),
            slides.len()
        );
    }

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_MARKER: &str = "Here is the presentation content:\n";

    fn sample_slides() -> Vec<SlideRecord> {
        let mut intro = SlideRecord::new(1);
        intro.add_text("Acme cuts onboarding time by 50%");
        intro.add_text("Market has \"few competitors\"");

        let mut numbers = SlideRecord::new(2);
        numbers.add_text("Onboarding time reduced by 30%");
        numbers.add_table(vec![
            vec!["Year".into(), "Revenue".into()],
            vec!["2024".into(), "$2.1M".into()],
            vec!["2025".into()],
        ]);

        vec![intro, numbers, SlideRecord::new(3)]
    }

    fn content_of(prompt: &str) -> &str {
        let start = prompt.find(CONTENT_MARKER).unwrap() + CONTENT_MARKER.len();
        prompt[start..].trim_end()
    }

    #[test]
    fn test_prompt_lists_all_categories() {
        let prompt = build_inconsistency_prompt(&sample_slides()).unwrap();

        assert!(prompt.contains("Conflicting numerical data"));
        assert!(prompt.contains("Contradictory textual claims"));
        assert!(prompt.contains("Timeline mismatches"));
        assert!(prompt.contains("Any other logical inconsistencies"));
        assert!(prompt.contains("- **Issue:**"));
        assert!(prompt.contains("- **Slides:**"));
        assert!(prompt.contains("- **Details:**"));
        assert!(prompt.contains("\"No inconsistencies found.\""));
        assert!(!prompt.contains(CONTENT_PLACEHOLDER));
    }

    #[test]
    fn test_content_parses_back_to_same_records() {
        let slides = sample_slides();
        let prompt = build_inconsistency_prompt(&slides).unwrap();

        let parsed: Vec<SlideRecord> = serde_json::from_str(content_of(&prompt)).unwrap();
        assert_eq!(parsed, slides);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let first = build_inconsistency_prompt(&sample_slides()).unwrap();
        let second = build_inconsistency_prompt(&sample_slides()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_placeholder_in_slide_text_is_left_alone() {
        let mut slide = SlideRecord::new(1);
        slide.add_text("Template uses {presentation_content}");

        let prompt = build_inconsistency_prompt(&[slide.clone()]).unwrap();
        let parsed: Vec<SlideRecord> = serde_json::from_str(content_of(&prompt)).unwrap();
        assert_eq!(parsed, vec![slide]);
    }

    #[test]
    fn test_render_empty_deck() {
        assert_eq!(render_slide_content(&[]).unwrap(), "[]");
    }
}
