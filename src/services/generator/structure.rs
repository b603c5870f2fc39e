//! Structural Completion
//!
//! Deterministic post-processing of generated content. Missing structural
//! markers are synthesized and injected at fixed insertion points; markers
//! already present are left alone, so `complete(complete(x)) == complete(x)`.
//!
//! - document: leading `# Title`, a metadata block after the title, and a
//!   closing `## Next Steps` section
//! - prototype: doctype, `<html>` root, `<head>` with charset, viewport and
//!   title, `<body>`, closing tags, and a metadata comment before `</body>`

use concept_forge_quality_gates::ArtifactKind;

use crate::models::DomainCategory;

/// Marker that opens the metadata block in both artifact kinds.
pub const META_MARKER: &str = "<!-- concept-forge:meta";

/// Inputs to structural completion besides the raw text.
#[derive(Debug, Clone)]
pub struct StructureContext {
    pub title: String,
    pub category: DomainCategory,
}

/// Complete raw content for its artifact kind.
pub fn complete(kind: ArtifactKind, raw: &str, ctx: &StructureContext) -> String {
    let stripped = strip_code_fences(raw);
    match kind {
        ArtifactKind::Document => complete_document(stripped.trim(), ctx),
        ArtifactKind::Prototype => complete_prototype(stripped.trim(), ctx),
    }
}

/// Derive a short title from a description: its first line, at most eight
/// words, without trailing punctuation.
pub fn title_from_description(description: &str) -> String {
    let first_line = description.trim().lines().next().unwrap_or("");
    let title = first_line
        .split_whitespace()
        .take(8)
        .collect::<Vec<_>>()
        .join(" ");
    let title = title.trim_end_matches(|c: char| c.is_ascii_punctuation());
    if title.is_empty() {
        "Untitled Concept".to_string()
    } else {
        title.to_string()
    }
}

/// Remove a Markdown code fence wrapping the whole payload.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    // Drop the opening fence line (with its optional language tag)
    let body = match trimmed.find('\n') {
        Some(newline) => &trimmed[newline + 1..],
        None => return "",
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn meta_block(kind: ArtifactKind, ctx: &StructureContext) -> String {
    format!(
        "{} kind={} category={} -->",
        META_MARKER,
        kind,
        ctx.category.as_str()
    )
}

// ============================================================================
// Document
// ============================================================================

const NEXT_STEPS: &str = "## Next Steps\n\n\
- Validate the riskiest assumptions with 5 to 10 target customers.\n\
- Build a clickable prototype of the primary flow.\n\
- Define launch metrics and review them after the first 30 days.";

fn is_title_line(line: &str) -> bool {
    line.starts_with('#') && !line.starts_with("##")
}

fn has_next_steps(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim();
        line.starts_with('#') && line.trim_start_matches('#').trim().eq_ignore_ascii_case("next steps")
    })
}

fn complete_document(text: &str, ctx: &StructureContext) -> String {
    let (title_line, rest) = match text.split_once('\n') {
        Some((first, rest)) if is_title_line(first.trim()) => (first.trim().to_string(), rest.trim()),
        None if is_title_line(text) => (text.to_string(), ""),
        _ => (format!("# {}", ctx.title), text),
    };

    let mut parts: Vec<String> = vec![title_line];
    if !rest.contains(META_MARKER) {
        parts.push(meta_block(ArtifactKind::Document, ctx));
    }
    if !rest.is_empty() {
        parts.push(rest.to_string());
    }
    if !has_next_steps(rest) {
        parts.push(NEXT_STEPS.to_string());
    }

    let mut out = parts.join("\n\n");
    out.push('\n');
    out
}

// ============================================================================
// Prototype
// ============================================================================

/// Find an opening tag `<name` followed by `>`, whitespace or `/`.
fn find_open_tag(lower: &str, name: &str) -> Option<usize> {
    let needle = format!("<{}", name);
    let bytes = lower.as_bytes();
    let mut from = 0;
    while let Some(rel) = lower[from..].find(&needle) {
        let at = from + rel;
        match bytes.get(at + needle.len()) {
            Some(b'>') | Some(b'/') => return Some(at),
            Some(b) if b.is_ascii_whitespace() => return Some(at),
            _ => from = at + needle.len(),
        }
    }
    None
}

/// Index just past the `>` closing the tag that starts at `start`.
fn tag_end(lower: &str, start: usize) -> Option<usize> {
    lower[start..].find('>').map(|gt| start + gt + 1)
}

fn insert(text: &mut String, at: usize, fragment: &str) {
    text.insert_str(at, fragment);
}

fn complete_prototype(text: &str, ctx: &StructureContext) -> String {
    let mut html = text.to_string();

    // Doctype at the start
    if !html.to_ascii_lowercase().starts_with("<!doctype") {
        if html.to_ascii_lowercase().contains("<!doctype") {
            // Doctype buried after leading junk: keep it, but nothing may precede it
            let lower = html.to_ascii_lowercase();
            if let Some(at) = lower.find("<!doctype") {
                html = html[at..].to_string();
            }
        } else {
            html.insert_str(0, "<!DOCTYPE html>\n");
        }
    }

    // <html> root
    let lower = html.to_ascii_lowercase();
    if find_open_tag(&lower, "html").is_none() {
        let after_doctype = tag_end(&lower, 0).unwrap_or(html.len());
        let body = html[after_doctype..].trim().to_string();
        html = format!(
            "{}\n<html lang=\"en\">\n{}\n</html>",
            &html[..after_doctype],
            body
        );
    }
    if !html.to_ascii_lowercase().contains("</html>") {
        html.push_str("\n</html>");
    }

    // <head> right after <html ...>
    let lower = html.to_ascii_lowercase();
    if find_open_tag(&lower, "head").is_none() {
        if let Some(at) = find_open_tag(&lower, "html").and_then(|s| tag_end(&lower, s)) {
            insert(&mut html, at, "\n<head>\n</head>");
        }
    }

    // </head> before <body>, else right after <head ...>
    let lower = html.to_ascii_lowercase();
    if !lower.contains("</head>") {
        let at = find_open_tag(&lower, "body")
            .or_else(|| find_open_tag(&lower, "head").and_then(|s| tag_end(&lower, s)));
        if let Some(at) = at {
            insert(&mut html, at, "\n</head>\n");
        }
    }

    // Head essentials before </head>
    let lower = html.to_ascii_lowercase();
    let mut head_items = String::new();
    if !lower.contains("charset") {
        head_items.push_str("<meta charset=\"utf-8\">\n");
    }
    if !lower.contains("name=\"viewport\"") && !lower.contains("name='viewport'") {
        head_items
            .push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    }
    if find_open_tag(&lower, "title").is_none() {
        head_items.push_str(&format!("<title>{}</title>\n", escape_html(&ctx.title)));
    }
    if !head_items.is_empty() {
        if let Some(at) = lower.find("</head>") {
            insert(&mut html, at, &head_items);
        }
    }

    // <body> between </head> and </html>
    let lower = html.to_ascii_lowercase();
    if find_open_tag(&lower, "body").is_none() {
        if let (Some(head_close), Some(html_close)) = (lower.find("</head>"), lower.rfind("</html>")) {
            let start = head_close + "</head>".len();
            if start <= html_close {
                let inner = html[start..html_close].trim().to_string();
                html = format!(
                    "{}\n<body>\n{}\n</body>\n{}",
                    &html[..start],
                    inner,
                    &html[html_close..]
                );
            }
        }
    }
    let lower = html.to_ascii_lowercase();
    if !lower.contains("</body>") {
        if let Some(at) = lower.rfind("</html>") {
            insert(&mut html, at, "</body>\n");
        }
    }

    // Metadata comment before </body>
    let lower = html.to_ascii_lowercase();
    if !html.contains(META_MARKER) {
        if let Some(at) = lower.rfind("</body>") {
            let block = format!("{}\n", meta_block(ArtifactKind::Prototype, ctx));
            insert(&mut html, at, &block);
        }
    }

    let mut out = html.trim().to_string();
    out.push('\n');
    out
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
