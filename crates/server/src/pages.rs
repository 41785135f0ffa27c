//! Server-rendered section pages. Each page carries the navigation bar, its
//! position in the scroll order and links to its neighbours.

use std::fmt::Write as _;

use server_api::SkillGroup;
use shared::{
    domain::ProfileSettings,
    protocol::{Toast, ToastVariant},
    sections::label_for,
};

use crate::app_state::AppState;

/// Content fetched from the backend for one page. Missing pieces render as
/// placeholders so a backend outage never takes the public site down.
#[derive(Debug, Default)]
pub(crate) struct PageContent {
    pub(crate) profile: Option<ProfileSettings>,
    pub(crate) skills: Vec<SkillGroup>,
    /// Outcome of a form post, shown above the section body.
    pub(crate) notice: Option<Toast>,
}

pub(crate) fn scroll_indicator(index: usize, total: usize) -> String {
    format!("{} / {total}", index + 1)
}

pub(crate) fn render_section(
    state: &AppState,
    path: &str,
    index: usize,
    content: &PageContent,
) -> String {
    let total = state.sections.len();
    let label = label_for(path).unwrap_or(path);

    let mut head = String::new();
    if let Some(prev) = index.checked_sub(1).and_then(|i| state.sections.path_at(i)) {
        let _ = write!(head, r#"<link rel="prev" href="{}">"#, escape(prev));
    }
    if let Some(next) = state.sections.path_at(index + 1) {
        let _ = write!(head, r#"<link rel="next" href="{}">"#, escape(next));
    }

    let body = format!(
        r#"<main class="section" data-section-index="{index}">
<h1>{title}</h1>
{notice}{content}
</main>
<div class="scroll-indicator">{indicator}</div>"#,
        title = escape(label),
        notice = content.notice.as_ref().map(toast_html).unwrap_or_default(),
        content = section_body(path, content),
        indicator = scroll_indicator(index, total),
    );
    layout(state, label, &head, path, &body)
}

pub(crate) fn render_not_found(state: &AppState, path: &str) -> String {
    let body = format!(
        r#"<main class="not-found">
<h1>404</h1>
<p>Oops! Page not found: <code>{}</code></p>
<a href="/">Return to Home</a>
</main>"#,
        escape(path)
    );
    layout(state, "Not found", "", path, &body)
}

fn layout(state: &AppState, title: &str, head: &str, active: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
{head}
</head>
<body>
{nav}
{body}
</body>
</html>
"#,
        title = escape(title),
        nav = nav_bar(state, active),
    )
}

fn nav_bar(state: &AppState, active: &str) -> String {
    let mut nav = String::from("<nav>");
    for path in state.sections.paths() {
        let label = label_for(path).unwrap_or(path);
        let class = if path == active { r#" class="active""# } else { "" };
        let _ = write!(nav, r#"<a href="{}"{class}>{}</a>"#, escape(path), escape(label));
    }
    nav.push_str("</nav>");
    nav
}

fn toast_html(toast: &Toast) -> String {
    let variant = match toast.variant {
        ToastVariant::Default => "default",
        ToastVariant::Destructive => "destructive",
    };
    let description = toast
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>", escape(d)))
        .unwrap_or_default();
    format!(
        r#"<div role="status" class="toast toast-{variant}"><strong>{}</strong>{description}</div>
"#,
        escape(&toast.title)
    )
}

fn section_body(path: &str, content: &PageContent) -> String {
    let profile = content.profile.as_ref();
    match path {
        "/" => match profile {
            Some(p) => format!("<p class=\"lead\">{}</p>", escape(&p.full_name)),
            None => String::new(),
        },
        "/about" => profile
            .and_then(|p| p.bio.as_deref())
            .map(|bio| format!("<p>{}</p>", escape(bio)))
            .unwrap_or_default(),
        "/skills" => skills_body(&content.skills),
        "/resume" => match profile.and_then(|p| p.resume_url.as_deref()) {
            Some(url) => format!(r#"<a href="{}">Download resume</a>"#, escape(url)),
            None => "<p>Resume coming soon.</p>".to_string(),
        },
        "/contact" => contact_body(profile),
        _ => String::new(),
    }
}

fn skills_body(groups: &[SkillGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = write!(out, "<section><h2>{}</h2><ul>", escape(&group.category));
        for skill in &group.skills {
            let _ = write!(
                out,
                r#"<li>{} <meter min="0" max="100" value="{}"></meter></li>"#,
                escape(&skill.name),
                skill.proficiency
            );
        }
        out.push_str("</ul></section>");
    }
    out
}

fn contact_body(profile: Option<&ProfileSettings>) -> String {
    let mut out = String::from("<ul class=\"links\">");
    if let Some(p) = profile {
        let links = [
            ("Email", p.email.as_deref().map(|e| format!("mailto:{e}"))),
            ("GitHub", p.github_url.clone()),
            ("LinkedIn", p.linkedin_url.clone()),
            ("Instagram", p.instagram_url.clone()),
            ("Ko-fi", p.kofi_url.clone()),
        ];
        for (label, href) in links {
            if let Some(href) = href {
                let _ = write!(out, r#"<li><a href="{}">{label}</a></li>"#, escape(&href));
            }
        }
    }
    out.push_str("</ul>");
    out.push_str(
        r#"<form method="post" action="/contact">
<input name="name" maxlength="100" required>
<input name="email" type="email" maxlength="255" required>
<textarea name="message" maxlength="5000" required></textarea>
<button type="submit">Send</button>
</form>"#,
    );
    out
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_is_one_based() {
        assert_eq!(scroll_indicator(0, 9), "1 / 9");
        assert_eq!(scroll_indicator(8, 9), "9 / 9");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
