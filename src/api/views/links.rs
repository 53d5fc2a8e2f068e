use chrono::{DateTime, Utc};

use super::layout::{page, post_button};
use crate::api::flash::Flash;
use crate::services::intake_url;
use crate::storage::ShareableLink;
use crate::utils::TimeParser;
use crate::utils::html::escape;

fn status(link: &ShareableLink, now: DateTime<Utc>) -> String {
    if !link.is_active {
        "inactive".to_string()
    } else if link.is_expired(now) {
        "expired".to_string()
    } else {
        match link.expires_at {
            Some(exp) => format!("active, {} left", TimeParser::format_remaining(now, exp)),
            None => "active".to_string(),
        }
    }
}

pub fn links_page(
    links: &[ShareableLink],
    base_url: &str,
    now: DateTime<Utc>,
    flash: Option<&Flash>,
) -> String {
    let mut body = String::from(
        r#"<form method="post" action="/links/new">
<label>Label <input name="label"></label>
<label>Expires <input name="expires_at" placeholder="7d, 2w, 2026-12-31 or RFC3339"></label>
<button type="submit">Create link</button>
</form>"#,
    );

    if links.is_empty() {
        body.push_str("<p>No intake links yet.</p>");
    } else {
        body.push_str(
            "<table><thead><tr><th>Label</th><th>URL</th><th>Status</th><th>Uses</th><th>Expires</th><th></th></tr></thead><tbody>",
        );
        for link in links {
            let url = intake_url(base_url, &link.token);
            body.push_str(&format!(
                r#"<tr><td>{label}</td><td><a href="{url}">{url}</a></td><td>{status}</td><td>{uses}</td><td>{expires}</td><td>{toggle} {delete}</td></tr>"#,
                label = escape(&link.label),
                url = escape(&url),
                status = status(link, now),
                uses = link.use_count,
                expires = link
                    .expires_at
                    .map(|e| e.format("%Y-%m-%d %H:%M UTC").to_string())
                    .unwrap_or_else(|| "never".to_string()),
                toggle = post_button(
                    &format!("/links/{}/toggle", link.id),
                    if link.is_active { "Deactivate" } else { "Activate" }
                ),
                delete = post_button(&format!("/links/{}/delete", link.id), "Delete"),
            ));
        }
        body.push_str("</tbody></table>");
    }

    page("Intake links", flash, &body)
}
