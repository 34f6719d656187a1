//! Plain-text rendering of ranked lines and annotated files
//!
//! Rendering produces lines of text; printing is left to the caller.
//!
//! ```text
//! [X] 42 | 1.5s | a.py:17  load_rows
//! [!]  3 | 12ms | a.py:9   parse
//! ```

use crate::analysis::HotLineEntry;
use crate::domain::NormalizedName;
use crate::format::{format_count, format_duration_column, severity_tier, ColumnWidths};
use crate::index::MultiSourceIndex;

/// Render a ranked list, one line per entry
#[must_use]
pub fn render_hot_lines(entries: &[HotLineEntry], widths: &ColumnWidths) -> Vec<String> {
    let location_width = entries
        .iter()
        .map(|e| e.file_base_name.chars().count() + e.line.to_string().len() + 1)
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|entry| {
            let stat = Some(entry.stat());
            let location = format!("{}:{}", entry.file_base_name, entry.line);
            format!(
                "{} {}{}{location:<location_width$}  {}",
                severity_tier(entry.time).marker(),
                format_count(stat, widths),
                format_duration_column(stat, widths),
                entry.function_name,
            )
        })
        .collect()
}

/// Render `content` with one count/duration column pair per enabled source.
///
/// Lines without data in a source show the placeholder in that source's
/// columns. The severity marker follows the time summed over all sources.
#[must_use]
pub fn render_annotated_file(
    content: &str,
    name: &NormalizedName,
    index: &MultiSourceIndex,
) -> Vec<String> {
    let widths = index.widths();
    let number_width = content.lines().count().max(1).to_string().len();

    content
        .lines()
        .zip(1..)
        .map(|(text, line)| {
            let mut rendered = match index.combined_line_stat(name, line) {
                Some(total) if !total.is_empty() => severity_tier(total.time).marker().to_string(),
                _ => "   ".to_string(),
            };
            rendered.push(' ');
            for source_index in 0..index.len() {
                let stat = index.line_stat(source_index, name, line);
                rendered.push_str(&format_count(stat, widths));
                rendered.push_str(&format_duration_column(stat, widths));
            }
            rendered.push_str(&format!("{line:>number_width$}  {text}"));
            rendered
        })
        .collect()
}
