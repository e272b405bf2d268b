//! Built-in message formats.

use crate::appender::{MessageFormattingStrategy, StatementLog};

/// `now|elapsed|category|connection id|prepared|sql` on one line.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleLineFormat;

impl MessageFormattingStrategy for SingleLineFormat {
    fn format_message(&self, entry: &StatementLog<'_>) -> String {
        format!(
            "{}|{}|{}|connection {}|{}|{}",
            entry.now,
            entry.elapsed_ms,
            entry.category,
            entry.connection_id,
            single_line(entry.prepared),
            single_line(entry.sql)
        )
    }
}

/// Header line followed by the prepared and effective SQL.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultiLineFormat;

impl MessageFormattingStrategy for MultiLineFormat {
    fn format_message(&self, entry: &StatementLog<'_>) -> String {
        format!(
            "#{} | took {}ms | {} | connection {}\n{}\n{};",
            entry.now, entry.elapsed_ms, entry.category, entry.connection_id, entry.prepared, entry.sql
        )
    }
}

/// Collapse line breaks so a statement stays on one log line.
fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
