use std::fmt::Write;

use crate::catalog::WallpaperRecord;

const INSERT_COLUMNS: &str = "id, user_id, title, description, file_path, file_size, width, \
                              height, category, tags, format, views, likes, created_at, updated_at";

/// Escape backslashes and single/double quotes so free text can be embedded
/// in the generated statement.
pub fn escape_sql(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// Render the hand-off script: a `USE` statement followed by one multi-row
/// INSERT covering exactly the newly allocated records. Returns `None` for
/// zero rows — a no-op run must not emit a statement.
pub fn render_insert_script(database: &str, records: &[WallpaperRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let mut script = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(script, "USE {};", database);
    let _ = writeln!(script, "INSERT INTO wallpapers ({}) VALUES", INSERT_COLUMNS);

    let tuples: Vec<String> = records.iter().map(render_tuple).collect();
    script.push_str(&tuples.join(",\n"));
    script.push_str(";\n");

    Some(script)
}

fn render_tuple(record: &WallpaperRecord) -> String {
    format!(
        "({}, {}, '{}', '{}', '{}', '{}', {}, {}, '{}', '{}', '{}', {}, {}, '{}', '{}')",
        record.id,
        record.user_id,
        escape_sql(&record.title),
        escape_sql(&record.description),
        escape_sql(&record.file_path),
        escape_sql(&record.file_size),
        record.width,
        record.height,
        escape_sql(&record.category),
        escape_sql(&record.tags.join(" ")),
        escape_sql(&record.format),
        record.views,
        record.likes,
        record.created_at,
        record.updated_at,
    )
}
