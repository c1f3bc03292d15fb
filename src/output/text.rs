//! Human-friendly text output formatting
//!
//! Used when --format text is specified.

use super::types::*;

/// Show control characters the way they would be typed in a template
fn visible(text: &str) -> String {
    text.escape_debug().to_string()
}

/// Format FindResult as human-readable text
pub fn format_find_result(result: &FindResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pattern: {}\n", result.pattern));
    output.push_str(&format!("Engine:  {}\n", result.engine_pattern));
    output.push_str(&format!(
        "Search:  {} over [{}..{}], eol {}\n",
        result.direction, result.range_start, result.range_end, result.eol_mode
    ));
    output.push('\n');

    if result.matched {
        for (i, m) in result.matches.iter().enumerate() {
            output.push_str(&format!(
                "Match {}: \"{}\" at {} (length {})\n",
                i + 1,
                visible(&m.text),
                m.start,
                m.length
            ));
            for cap in &m.captures {
                output.push_str(&format!(
                    "  Group {}: \"{}\" [{}..{}]\n",
                    cap.group,
                    visible(&cap.text),
                    cap.start,
                    cap.end
                ));
            }
        }
        output.push('\n');
        output.push_str(&format!(
            "{} match{} found\n",
            result.match_count,
            if result.match_count == 1 { "" } else { "es" }
        ));
    } else {
        output.push_str("No matches found\n");
    }

    output
}

/// Format ReplaceResult as human-readable text
pub fn format_replace_result(result: &ReplaceResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pattern:  {}\n", result.pattern));
    output.push_str(&format!(
        "Template: {} → \"{}\"\n",
        result.template,
        visible(&result.expanded_template)
    ));
    output.push('\n');

    for splice in &result.replacements {
        output.push_str(&format!(
            "At {}: {} byte{} → \"{}\"\n",
            splice.position,
            splice.removed,
            if splice.removed == 1 { "" } else { "s" },
            visible(&splice.inserted)
        ));
    }
    if !result.replacements.is_empty() {
        output.push('\n');
    }

    output.push_str(&format!(
        "{} replacement{} made\n",
        result.replacements_made,
        if result.replacements_made == 1 {
            ""
        } else {
            "s"
        }
    ));

    if result.written {
        if let Some(path) = &result.file_path {
            output.push_str(&format!("Written: {}\n", path));
        }
        if let Some(backup) = &result.backup_path {
            output.push_str(&format!("Backup:  {}\n", backup));
        }
    } else {
        output.push('\n');
        output.push_str(&result.result);
        if !result.result.ends_with('\n') {
            output.push('\n');
        }
    }

    output
}

/// Format TranslateResult as human-readable text
pub fn format_translate_result(result: &TranslateResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pattern:    {}\n", result.pattern));
    output.push_str(&format!("Translated: {}\n", result.translated));
    output.push_str(&format!("Engine:     {}\n", result.engine_source));
    output.push_str(&format!(
        "Options:    {}\n",
        if result.options.is_empty() {
            "none".to_string()
        } else {
            result.options.join(", ")
        }
    ));
    output.push_str(&format!("EOL mode:   {}\n", result.eol_mode));

    match &result.error {
        Some(error) => output.push_str(&format!("\n✗ Invalid: {}\n", error)),
        None => output.push_str("\n✓ Valid\n"),
    }

    output
}

/// Format ExpandResult as human-readable text
pub fn format_expand_result(result: &ExpandResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Template: {}\n", result.template));
    output.push_str(&format!("Expanded: \"{}\"\n", visible(&result.expanded)));
    output.push('\n');

    for part in &result.parts {
        match part {
            TemplatePart::Text(text) => {
                output.push_str(&format!("  text   \"{}\"\n", visible(text)))
            }
            TemplatePart::Group(n) => output.push_str(&format!("  group  {}\n", n)),
        }
    }

    output
}
