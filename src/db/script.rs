//! Multi-statement SQL script splitting.
//!
//! SQLite's `execute` takes one statement at a time, and trigger bodies embed
//! `;` terminators of their own, so a seed script has to be split with a
//! little care: a `CREATE TRIGGER ... BEGIN ... END;` block is one unit.

/// Split a script into executable statements. `--` comment lines and blank
/// lines are dropped; statement text is joined with single spaces.
pub(crate) fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut buf = String::new();
    let mut in_trigger = false;

    for raw in script.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("--") {
            continue;
        }
        let lower = line.to_ascii_lowercase();
        if lower.starts_with("create trigger") {
            in_trigger = true;
        }
        buf.push_str(line);
        buf.push(' ');

        // Whole token only: a trailing word like "weekend;" must not close
        // the trigger body.
        let complete = if in_trigger {
            lower.split_whitespace().next_back() == Some("end;")
        } else {
            line.ends_with(';')
        };
        if complete {
            statements.push(buf.trim().to_string());
            buf.clear();
            in_trigger = false;
        }
    }

    // Unterminated trailing statement.
    let tail = buf.trim();
    if !tail.is_empty() {
        statements.push(tail.to_string());
    }

    statements
}
