use std::path::Path;

use rednote_common::PostRecord;

pub const TITLE_PREVIEW_CHARS: usize = 100;
pub const COMMENTS_PREVIEW_CHARS: usize = 150;

/// First `max` chars of `text`, with `...` appended only when something was
/// cut.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Text handed to the analysis stage: a count line, the CSV path, one block
/// per post, and the CSV path again at the end.
pub fn build_summary(topic: &str, records: &[PostRecord], csv_path: &Path) -> String {
    let csv_path = csv_path.display();
    let mut out = format!(
        "Successfully scraped {} posts for topic '{}'.\nCSV file saved to: {}\n\nSummary of scraped posts:\n",
        records.len(),
        topic,
        csv_path
    );

    for record in records {
        out.push_str(&format!(
            "\nPost {}:\n  Title: {}\n  URL: {}\n  Comments: {}\n",
            record.post_number,
            truncate_with_ellipsis(&record.title, TITLE_PREVIEW_CHARS),
            record.url,
            truncate_with_ellipsis(&record.comments, COMMENTS_PREVIEW_CHARS),
        ));
    }

    out.push_str(&format!("\n\nCSV file path: {csv_path}"));
    out
}
