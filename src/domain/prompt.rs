use crate::domain::diff::FilteredDiff;

pub const DIFFS_START_MARKER: &str = "---DIFFS START---";
pub const DIFFS_END_MARKER: &str = "---DIFFS END---";
pub const SUMMARY_MARKER: &str = "Standup:";

const INSTRUCTIONS: &str = "\
You are an assistant that writes daily standup summaries for developers.
Your task is:
- Summarize the changes below in plain English, for teammates at a standup meeting.
- DO NOT copy, quote, or refer to code or diffs. You can ONLY refer to filenames.
- Do NOT reproduce any part of the code diffs in your answer.
- Only describe the type of changes, improvements, bug fixes, or features.
- Start with: 'Yesterday I worked on...'
- Always answer in dashed list and not in paragraphs.";

const CLOSING: &str = "Write your standup summary below (no code):";

/// Builds the completion payload from already filtered diffs.
///
/// Callers short-circuit on an empty diff list before reaching this point.
pub fn build_prompt<'a, I>(diffs: I) -> String
where
    I: IntoIterator<Item = &'a FilteredDiff>,
{
    let activity = diffs
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "\n{INSTRUCTIONS}\n\n{DIFFS_START_MARKER}\n{activity}\n{DIFFS_END_MARKER}\n\n{CLOSING}\n{SUMMARY_MARKER}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_blocks_with_blank_line_between_markers() {
        let diffs = [
            FilteredDiff::from_parts("src/a.rs", "+fn a() {}"),
            FilteredDiff::from_parts("src/b.rs", "-old\n+new"),
        ];
        let prompt = build_prompt(&diffs);

        let expected = "---DIFFS START---\nFile: src/a.rs\n+fn a() {}\n\nFile: src/b.rs\n-old\n+new\n---DIFFS END---";
        assert!(prompt.contains(expected), "prompt was:\n{prompt}");
    }

    #[test]
    fn carries_model_instructions() {
        let prompt = build_prompt(&[FilteredDiff::from_parts("x.rs", "+x")]);

        assert!(prompt.contains("Start with: 'Yesterday I worked on...'"));
        assert!(prompt.contains("dashed list"));
        assert!(prompt.contains("Do NOT reproduce any part of the code diffs"));
        assert!(prompt.trim_end().ends_with(SUMMARY_MARKER));
    }

    #[test]
    fn diff_markers_appear_once_in_order() {
        let prompt = build_prompt(&[FilteredDiff::from_parts("x.rs", "+x")]);
        let start = prompt.find(DIFFS_START_MARKER).expect("start marker");
        let end = prompt.find(DIFFS_END_MARKER).expect("end marker");

        assert!(start < end);
        assert_eq!(prompt.matches(DIFFS_START_MARKER).count(), 1);
        assert_eq!(prompt.matches(DIFFS_END_MARKER).count(), 1);
    }
}
