use crate::api::flash::Flash;
use crate::utils::html::escape;

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:0 auto;padding:1rem}\
nav a{margin-right:1rem}table{border-collapse:collapse;width:100%}\
td,th{border-bottom:1px solid #ddd;padding:.3rem;text-align:left}\
.flash{padding:.6rem;margin:1rem 0;border-radius:4px}\
.flash-success{background:#e6f4ea}.flash-error{background:#fce8e6}\
form.inline{display:inline}fieldset{margin:1rem 0}";

/// Wrap a page body in the shared shell (navigation plus flash banner)
pub fn page(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let banner = flash
        .map(|f| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                f.kind.as_str(),
                escape(&f.message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Balthazaar</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href="/">Dashboard</a><a href="/clients/new">New client</a><a href="/links">Intake links</a><a href="/settings">Settings</a></nav>
{banner}
<h1>{title}</h1>
{body}
</body>
</html>"#,
        title = escape(title),
    )
}

/// Minimal shell for the public intake page (no owner navigation)
pub fn public_page(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let banner = flash
        .map(|f| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                f.kind.as_str(),
                escape(&f.message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{banner}
<h1>{title}</h1>
{body}
</body>
</html>"#,
        title = escape(title),
    )
}

/// A POST button rendered as its own small form
pub fn post_button(action: &str, label: &str) -> String {
    format!(
        r#"<form class="inline" method="post" action="{}"><button type="submit">{}</button></form>"#,
        escape(action),
        escape(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_escapes_flash() {
        let flash = Flash::error("<script>alert(1)</script>");
        let html = page("Dashboard", Some(&flash), "<p>body</p>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"class="flash flash-error""#));
        assert!(html.contains("<p>body</p>"));
    }
}
