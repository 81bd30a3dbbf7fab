//! Rendering rules as stylesheet text.

use std::fmt::Write;

use canvas_model::CssRule;

/// Render rules as CSS.
///
/// Rules without selectors produce no output; rules without declarations
/// render as an empty block so their identity survives a reparse.
/// Unconstrained rules come first, in order; rules with a breakpoint are
/// grouped into one `@media (max-width: W)` block per width, in order of
/// first appearance.
pub fn render_css<'a, I>(rules: I) -> String
where
    I: IntoIterator<Item = &'a CssRule>,
{
    let mut plain = Vec::new();
    let mut media: Vec<(&str, Vec<&CssRule>)> = Vec::new();

    for rule in rules {
        if rule.selectors.is_empty() {
            continue;
        }
        if rule.max_width.is_empty() {
            plain.push(rule);
            continue;
        }
        let width = rule.max_width.as_str();
        match media.iter_mut().find(|entry| entry.0 == width) {
            Some(entry) => entry.1.push(rule),
            None => media.push((width, vec![rule])),
        }
    }

    let mut out = String::new();
    for rule in plain {
        write_rule(&mut out, rule);
    }
    for (width, group) in media {
        let _ = writeln!(out, "@media (max-width: {width}){{");
        for rule in group {
            write_rule(&mut out, rule);
        }
        out.push_str("}\n");
    }
    out
}

fn write_rule(out: &mut String, rule: &CssRule) {
    out.push_str(&rule.selector_text());
    out.push('{');
    for (property, value) in &rule.style {
        let _ = write!(out, "{property}:{value};");
    }
    out.push_str("}\n");
}
