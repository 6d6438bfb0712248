//! Summary Markdown
//!
//! Renders AI-generated summaries with pulldown-cmark. Summaries come from
//! a model, so raw HTML in them is shown as text instead of injected,
//! links open in a new tab, and links or images with a script-capable
//! scheme keep only their text.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render a summary to HTML safe for `inner_html`
pub fn render_summary(text: &str) -> String {
    let events = transform_events(Parser::new_ext(text, options()));
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Render a single line (strips the outer `<p>`)
pub fn render_inline(text: &str) -> String {
    let html = render_summary(text);
    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Relative URLs and http(s)/mailto only
fn is_safe_url(url: &str) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme
    let cleaned: String = url.chars().filter(|c| !c.is_ascii_whitespace() && !c.is_control()).collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    if cleaned[..colon].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = &cleaned[..colon];
    SAFE_SCHEMES.iter().any(|safe| scheme.eq_ignore_ascii_case(safe))
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    // Whether each open link/image was kept
    let mut kept: Vec<bool> = Vec::new();
    for event in parser {
        match event {
            // Raw HTML becomes visible text
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

            Event::Start(Tag::Link { dest_url, title, .. }) => {
                let safe = is_safe_url(&dest_url);
                kept.push(safe);
                if !safe {
                    tracing::warn!("dropping link with unsafe url {:?}", dest_url.as_ref());
                    continue;
                }
                let html = format!(
                    r#"<a href="{}" title="{}" target="_blank" rel="noopener noreferrer">"#,
                    escape_attr(&dest_url),
                    escape_attr(&title)
                );
                events.push(Event::Html(CowStr::from(html)));
            }
            Event::End(TagEnd::Link) => {
                if kept.pop().unwrap_or(false) {
                    events.push(Event::Html(CowStr::from("</a>")));
                }
            }

            Event::Start(tag @ Tag::Image { .. }) => {
                let safe = matches!(&tag, Tag::Image { dest_url, .. } if is_safe_url(dest_url));
                kept.push(safe);
                if safe {
                    events.push(Event::Start(tag));
                } else {
                    tracing::warn!("dropping image with unsafe url");
                }
            }
            Event::End(TagEnd::Image) => {
                if kept.pop().unwrap_or(false) {
                    events.push(Event::End(TagEnd::Image));
                }
            }

            other => events.push(other),
        }
    }
    events
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_summary("**3 tasks** are overdue\n\n- Review\n- Deploy");
        assert!(html.contains("<strong>3 tasks</strong>"));
        assert!(html.contains("<li>Review</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_summary("Before <script>alert(1)</script> after");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_links_open_in_new_tab() {
        let html = render_summary("See [the board](https://prizm.example/b/1)");
        assert!(html.contains(r#"href="https://prizm.example/b/1""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains("the board</a>"));
    }

    #[test]
    fn test_script_links_keep_only_text() {
        for source in [
            "[click](javascript:alert(document.cookie))",
            "[click](JaVaScript:alert(1))",
            "[click](java\tscript:alert(1))",
            "[click](data:text/html;base64,PHNjcmlwdD4=)",
            "<javascript:alert(1)>",
        ] {
            let html = render_summary(source);
            assert!(!html.contains("<a"), "{source} rendered {html}");
            assert!(!html.to_ascii_lowercase().contains("javascript:alert(document"), "{source}");
        }
        assert!(render_summary("[click](javascript:alert(document.cookie))").contains("click"));
    }

    #[test]
    fn test_scheme_check_ignores_padding() {
        assert!(!is_safe_url("java\tscript:alert(1)"));
        assert!(!is_safe_url(" javascript:alert(1)"));
        assert!(!is_safe_url("vbscript:msgbox(1)"));
        assert!(is_safe_url("HTTPS://prizm.example"));
        assert!(is_safe_url("notes/a:b"));
        assert!(is_safe_url("#summary"));
    }

    #[test]
    fn test_relative_and_mail_links_are_kept() {
        let html = render_summary("[task](/tasks/7?tab=notes) or [mail](mailto:ops@prizm.example)");
        assert!(html.contains(r#"href="/tasks/7?tab=notes""#));
        assert!(html.contains(r#"href="mailto:ops@prizm.example""#));
    }

    #[test]
    fn test_script_image_is_dropped() {
        let html = render_summary("![chart](javascript:alert(1))");
        assert!(!html.contains("<img"));
        assert!(html.contains("chart"));
    }

    #[test]
    fn test_inline_strips_paragraph() {
        assert_eq!(render_inline("Mostly *on track*"), "Mostly <em>on track</em>");
    }
}
