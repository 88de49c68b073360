//! Reattaching source comments.
//!
//! Comments the front end attached to declarations are printed around the
//! declaration. Comments between statements are not attached to anything,
//! so they are recovered from the raw text between sibling nodes.


/// Text emitted before a declaration: the leading comment, if any, on its
/// own line, then the position for the declaration itself.
pub fn before_decl(leading: Option<&str>, indent: &str) -> String {
    match leading {
        Some(text) => format!("\n{indent}{}\n{indent}", text.replace("\r\n", "\n")),
        None => format!("\n{indent}"),
    }
}

/// Text emitted after a declaration carrying a trailing comment.
pub fn after_decl(trailing: &str) -> String {
    format!("\t{trailing}")
}

fn trim(line: &str) -> &str {
    line.trim_matches(|c| matches!(c, '\r' | '\n' | '\t' | ' '))
}

/// Render the raw text between two siblings.
///
/// The text is split into trimmed lines and the last line, the
/// indentation of the next sibling, is dropped. On the first line only
/// what follows a comment opener is kept, since it starts on the line
/// of the previous sibling. Returns at least a newline.
pub fn between_nodes(text: &str, indent: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').map(trim).collect();
    lines.pop();
    let Some(first) = lines.first_mut() else {
        return "\n".to_owned();
    };
    let line = *first;
    let opener = match (line.find("//"), line.find("/*")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    *first = match opener {
        Some(pos) => &line[pos..],
        None => "",
    };

    let mut out = String::from(" ");
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            out.push_str(indent);
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}
