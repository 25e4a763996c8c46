//! Email template rendering.
//!
//! Substitutes `{{variable}}` placeholders in a subject/html/text triple and
//! appends the tenant's signature and legal notice blocks. Pure: same
//! inputs always produce the same output, no I/O.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").expect("valid tag regex");
    static ref WS_RE: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}

/// Source template bodies, as stored.
#[derive(Debug, Clone)]
pub struct TemplateSource<'a> {
    pub subject: &'a str,
    pub html_body: &'a str,
    pub text_body: &'a str,
}

/// Tenant-specific blocks appended after the rendered body.
#[derive(Debug, Clone, Default)]
pub struct TenantBlocks<'a> {
    /// Signature HTML; appended inside a bordered block when non-blank.
    pub signature_html: Option<&'a str>,
    /// Legal notice (RGPD) markdown; converted and appended when non-blank.
    pub legal_markdown: Option<&'a str>,
}

/// Fully rendered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Renders a template against a variable map and tenant blocks.
///
/// Every `{{key}}` present in the map is replaced everywhere it occurs;
/// keys absent from the map are left as literal `{{key}}` text. The
/// signature block is appended before the legal block, in both html and
/// text.
pub fn render(
    template: &TemplateSource<'_>,
    variables: &HashMap<String, String>,
    blocks: &TenantBlocks<'_>,
) -> RenderedEmail {
    let subject = substitute(template.subject, variables);
    let mut html = substitute(template.html_body, variables);
    let mut text = substitute(template.text_body, variables);

    if let Some(signature) = non_blank(blocks.signature_html) {
        html.push_str(
            "\n<div style=\"margin-top:24px;padding-top:16px;border-top:1px solid #ddd;\">\n",
        );
        html.push_str(signature);
        html.push_str("\n</div>");

        text.push_str("\n\n--\n");
        text.push_str(&strip_tags(signature));
    }

    if let Some(legal) = non_blank(blocks.legal_markdown) {
        html.push_str(
            "\n<div style=\"margin-top:16px;padding:12px;background:#f5f5f5;font-size:12px;color:#666;\">\n",
        );
        html.push_str(&markdown_to_html(legal));
        html.push_str("\n</div>");

        text.push_str("\n\n");
        text.push_str(legal);
    }

    RenderedEmail {
        subject,
        html,
        text,
    }
}

/// Replaces every `{{key}}` occurrence for each key in the map.
pub fn substitute(input: &str, variables: &HashMap<String, String>) -> String {
    let mut out = input.to_string();
    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        out = out.replace(&placeholder, value);
    }
    out
}

/// Strips HTML tags and collapses whitespace to single spaces.
pub fn strip_tags(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    WS_RE.replace_all(&without_tags, " ").trim().to_string()
}

/// Converts a minimal line-oriented markdown subset to HTML.
///
/// Supported: `#`/`##`/`###` headings, `- ` bullets, `**bold**`, blank
/// line → `<br>`, anything else → paragraph.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() + 64);
    let mut in_list = false;

    for line in markdown.lines() {
        let trimmed = line.trim();

        if let Some(item) = trimmed.strip_prefix("- ") {
            if !in_list {
                out.push_str("<ul>");
                in_list = true;
            }
            out.push_str("<li>");
            out.push_str(&bold_spans(item));
            out.push_str("</li>");
            continue;
        }

        if in_list {
            out.push_str("</ul>");
            in_list = false;
        }

        if let Some(heading) = trimmed.strip_prefix("### ") {
            out.push_str("<h3>");
            out.push_str(&bold_spans(heading));
            out.push_str("</h3>");
        } else if let Some(heading) = trimmed.strip_prefix("## ") {
            out.push_str("<h2>");
            out.push_str(&bold_spans(heading));
            out.push_str("</h2>");
        } else if let Some(heading) = trimmed.strip_prefix("# ") {
            out.push_str("<h1>");
            out.push_str(&bold_spans(heading));
            out.push_str("</h1>");
        } else if trimmed.is_empty() {
            out.push_str("<br>");
        } else {
            out.push_str("<p>");
            out.push_str(&bold_spans(trimmed));
            out.push_str("</p>");
        }
    }

    if in_list {
        out.push_str("</ul>");
    }

    out
}

/// Replaces `**bold**` pairs with `<strong>` spans; an unmatched trailing
/// marker is left verbatim.
fn bold_spans(line: &str) -> String {
    let parts: Vec<&str> = line.split("**").collect();
    if parts.len() < 3 {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + 16);
    let mut open = false;
    for (i, part) in parts.iter().enumerate() {
        out.push_str(part);
        if i + 1 < parts.len() {
            if !open && i + 2 == parts.len() {
                // odd marker count: the last one has no closing pair
                out.push_str("**");
            } else {
                out.push_str(if open { "</strong>" } else { "<strong>" });
                open = !open;
            }
        }
    }
    out
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn template<'a>() -> TemplateSource<'a> {
        TemplateSource {
            subject: "Partenariat {{campaign_title}}",
            html_body: "<p>Bonjour {{contact_name}},</p><p>{{campaign_title}} vous attend.</p>",
            text_body: "Bonjour {{contact_name}},\n{{campaign_title}} vous attend.",
        }
    }

    #[test]
    fn test_substitute_replaces_all_occurrences() {
        let rendered = render(
            &template(),
            &vars(&[
                ("campaign_title", "Panneau LED"),
                ("contact_name", "Claire"),
            ]),
            &TenantBlocks::default(),
        );
        assert_eq!(rendered.subject, "Partenariat Panneau LED");
        assert!(rendered.html.contains("Bonjour Claire"));
        assert!(rendered.html.contains("Panneau LED vous attend"));
        assert!(rendered.text.contains("Panneau LED vous attend"));
        assert!(!rendered.html.contains("{{"));
    }

    #[test]
    fn test_unknown_placeholders_left_verbatim() {
        let rendered = render(
            &template(),
            &vars(&[("campaign_title", "Panneau LED")]),
            &TenantBlocks::default(),
        );
        assert!(rendered.html.contains("{{contact_name}}"));
        assert!(rendered.text.contains("{{contact_name}}"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let variables = vars(&[("campaign_title", "T"), ("contact_name", "C")]);
        let blocks = TenantBlocks {
            signature_html: Some("<p>FC Exemple</p>"),
            legal_markdown: Some("# RGPD\nVos données."),
        };
        let first = render(&template(), &variables, &blocks);
        let second = render(&template(), &variables, &blocks);
        assert_eq!(first, second);
    }

    #[test]
    fn test_signature_appended_to_html_and_text() {
        let blocks = TenantBlocks {
            signature_html: Some("<p>FC <b>Exemple</b><br>Stade municipal</p>"),
            legal_markdown: None,
        };
        let rendered = render(&template(), &vars(&[]), &blocks);
        assert!(rendered.html.contains("border-top"));
        assert!(rendered.html.contains("FC <b>Exemple</b>"));
        // text gets the tag-stripped, whitespace-collapsed version
        assert!(rendered.text.contains("FC Exemple Stade municipal"));
        assert!(!rendered.text.contains('<'));
    }

    #[test]
    fn test_blank_blocks_append_nothing() {
        let blocks = TenantBlocks {
            signature_html: Some("   "),
            legal_markdown: Some(""),
        };
        let rendered = render(&template(), &vars(&[]), &blocks);
        let plain = render(&template(), &vars(&[]), &TenantBlocks::default());
        assert_eq!(rendered, plain);
    }

    #[test]
    fn test_signature_then_legal_order() {
        let blocks = TenantBlocks {
            signature_html: Some("<p>SIGNATURE-MARK</p>"),
            legal_markdown: Some("LEGAL-MARK"),
        };
        let rendered = render(&template(), &vars(&[]), &blocks);

        let html_sig = rendered.html.find("SIGNATURE-MARK").unwrap();
        let html_legal = rendered.html.find("LEGAL-MARK").unwrap();
        assert!(html_sig < html_legal);

        let text_sig = rendered.text.find("SIGNATURE-MARK").unwrap();
        let text_legal = rendered.text.find("LEGAL-MARK").unwrap();
        assert!(text_sig < text_legal);
    }

    #[test]
    fn test_legal_markdown_raw_in_text() {
        let blocks = TenantBlocks {
            signature_html: None,
            legal_markdown: Some("# RGPD\n- droit d'accès"),
        };
        let rendered = render(&template(), &vars(&[]), &blocks);
        assert!(rendered.html.contains("<h1>RGPD</h1>"));
        assert!(rendered.html.contains("<li>droit d'accès</li>"));
        assert!(rendered.text.contains("# RGPD\n- droit d'accès"));
    }

    #[test]
    fn test_strip_tags_collapses_whitespace() {
        assert_eq!(
            strip_tags("<p>FC   Exemple</p>\n<p>Stade</p>"),
            "FC Exemple Stade"
        );
        assert_eq!(strip_tags("plain"), "plain");
        assert_eq!(strip_tags("<br><br>"), "");
    }

    #[test]
    fn test_markdown_headings() {
        assert_eq!(markdown_to_html("# Un"), "<h1>Un</h1>");
        assert_eq!(markdown_to_html("## Deux"), "<h2>Deux</h2>");
        assert_eq!(markdown_to_html("### Trois"), "<h3>Trois</h3>");
    }

    #[test]
    fn test_markdown_bullets_grouped() {
        assert_eq!(
            markdown_to_html("- un\n- deux\ntexte"),
            "<ul><li>un</li><li>deux</li></ul><p>texte</p>"
        );
    }

    #[test]
    fn test_markdown_list_closed_at_end() {
        assert_eq!(markdown_to_html("- seul"), "<ul><li>seul</li></ul>");
    }

    #[test]
    fn test_markdown_blank_line_is_break() {
        assert_eq!(
            markdown_to_html("ligne\n\nsuite"),
            "<p>ligne</p><br><p>suite</p>"
        );
    }

    #[test]
    fn test_markdown_bold() {
        assert_eq!(
            markdown_to_html("vos **droits** garantis"),
            "<p>vos <strong>droits</strong> garantis</p>"
        );
    }

    #[test]
    fn test_markdown_unmatched_bold_marker_left() {
        assert_eq!(
            markdown_to_html("**a** reste **ouvert"),
            "<p><strong>a</strong> reste **ouvert</p>"
        );
        assert_eq!(markdown_to_html("pas de **gras"), "<p>pas de **gras</p>");
    }
}
