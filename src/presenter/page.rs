use crate::presenter::{DisplayState, ErrorView, RenderMode, escape};

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:720px;margin:2rem auto;padding:0 1rem;line-height:1.6;color:#222}\
.meta span{margin-right:1rem;color:#666}\
.summary{background:#f6f7fb;border-radius:8px;padding:1rem}\
.link-item{padding:.25rem 0;overflow:hidden;text-overflow:ellipsis;white-space:nowrap}\
.hint{color:#999}\
.error{color:#b00020}";

fn wrap(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

/// Standalone page for a result view.
pub fn render_document(state: &DisplayState) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<div class=\"meta\">{}</div>\n",
        state.title, state.meta
    );
    if let Some(summary) = &state.summary {
        body.push_str(&format!(
            "<section class=\"summary\">\n<h2>Summary</h2>\n<div>{summary}</div>\n</section>\n"
        ));
    }
    body.push_str(&format!(
        "<section class=\"links\">\n<h2>Links ({})</h2>\n{}\n</section>\n<footer>{}</footer>",
        state.link_count, state.links, state.action_label
    ));
    wrap(&state.title, &body)
}

/// Standalone page for a failed action.
pub fn render_error_document(error: &ErrorView) -> String {
    let action = match error.retry {
        RenderMode::Summarize => "summarize",
        RenderMode::ExtractLinksOnly => "links",
    };
    let body = format!(
        "<h1>Something went wrong</h1>\n<p class=\"error\">{}</p>\n<p class=\"hint\">Retry with <code>leapread {action}</code>.</p>",
        escape(&error.message)
    );
    wrap("Error", &body)
}
