use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^- (.+)$").unwrap());
static LIST_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)(<li>.*</li>)").unwrap());

/// Render a summary's markdown subset to markup.
///
/// The text is escaped first, so any markup in it shows up literally. Then
/// `**bold**`, `*italic*`, `- ` list items (wrapped in one list), blank-line
/// paragraphs and single line breaks are converted, in that order. Nested or
/// malformed markdown is not handled.
pub fn render_markdown(text: &str) -> String {
    let html = html_escape::encode_text(text);
    let html = BOLD.replace_all(&html, "<strong>$1</strong>");
    let html = ITALIC.replace_all(&html, "<em>$1</em>");
    let html = LIST_ITEM.replace_all(&html, "<li>$1</li>");
    let html = LIST_SPAN.replace(&html, "<ul>$1</ul>");
    html.replace("\n\n", "<br><br>").replace('\n', "<br>")
}
