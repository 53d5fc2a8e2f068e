use super::layout::{page, post_button};
use crate::api::flash::Flash;
use crate::storage::{Client, ClientDetail, QueryWithReports, SocialHandle, SubscriptionTier};
use crate::utils::html::escape;

fn handles_list(handles: &[SocialHandle]) -> String {
    if handles.is_empty() {
        return "<em>none</em>".to_string();
    }
    let items: String = handles
        .iter()
        .map(|h| format!("<li>{}: {}</li>", escape(&h.platform), escape(&h.handle)))
        .collect();
    format!("<ul>{}</ul>", items)
}

fn query_section(entry: &QueryWithReports) -> String {
    let q = &entry.query;
    let period = match (q.period_start, q.period_end) {
        (None, None) => "open".to_string(),
        (start, end) => format!(
            "{} to {}",
            start.map(|d| d.to_string()).unwrap_or_else(|| "...".to_string()),
            end.map(|d| d.to_string()).unwrap_or_else(|| "...".to_string()),
        ),
    };

    let reports: String = if entry.reports.is_empty() {
        "<p>No reports yet.</p>".to_string()
    } else {
        let rows: String = entry
            .reports
            .iter()
            .map(|r| {
                format!(
                    "<tr><td>#{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    r.id,
                    r.status,
                    r.created_at.format("%Y-%m-%d %H:%M"),
                    r.generated_at
                        .map(|g| g.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default(),
                )
            })
            .collect();
        format!(
            "<table><thead><tr><th>Report</th><th>Status</th><th>Created</th><th>Generated</th></tr></thead><tbody>{}</tbody></table>",
            rows
        )
    };

    format!(
        r#"<section class="query" id="query-{id}">
<h3>Query #{id}</h3>
<p>Frequency: {frequency} &middot; Auto-run: {auto} &middot; Period: {period}</p>
<p>Keywords ({kw_count}): {keywords}</p>
<p>Countries ({c_count}): {countries}</p>
{run} {toggle}
{reports}
</section>"#,
        id = q.id,
        frequency = q.frequency,
        auto = if q.auto_run { "on" } else { "off" },
        period = period,
        kw_count = q.keywords.len(),
        keywords = escape(&q.keywords.join(", ")),
        c_count = q.countries.len(),
        countries = escape(&q.countries.join(", ")),
        run = post_button(&format!("/queries/{}/run", q.id), "Run report"),
        toggle = post_button(
            &format!("/queries/{}/toggle-auto", q.id),
            if q.auto_run { "Disable auto-run" } else { "Enable auto-run" }
        ),
        reports = reports,
    )
}

pub fn client_detail_page(detail: &ClientDetail, flash: Option<&Flash>) -> String {
    let c = &detail.client;

    let competitors: String = if detail.competitors.is_empty() {
        "<p>No competitors tracked.</p>".to_string()
    } else {
        detail
            .competitors
            .iter()
            .map(|comp| {
                format!(
                    r#"<div class="competitor"><h3>{}</h3><p>{}</p><p>YouTube: {} &middot; Vimeo: {} &middot; Reviews: {}</p>{}</div>"#,
                    escape(if comp.name.is_empty() { &comp.website } else { &comp.name }),
                    escape(&comp.website),
                    escape(&comp.youtube_url),
                    escape(&comp.vimeo_url),
                    escape(&comp.review_page_url),
                    handles_list(&comp.social_handles),
                )
            })
            .collect()
    };

    let queries: String = detail.queries.iter().map(query_section).collect();

    let body = format!(
        r#"<p><a href="/clients/{id}/edit">Edit</a> {delete}</p>
<dl>
<dt>Website</dt><dd>{website}</dd>
<dt>Contact</dt><dd>{contact} &lt;{email}&gt;</dd>
<dt>Tier</dt><dd>{tier}</dd>
<dt>Created</dt><dd>{created}</dd>
<dt>Total reports</dt><dd>{report_count}</dd>
</dl>
<h2>Social handles</h2>
{handles}
<h2>Competitors</h2>
{competitors}
<h2>Queries</h2>
{queries}"#,
        id = c.id,
        delete = post_button(&format!("/clients/{}/delete", c.id), "Delete"),
        website = escape(&c.website),
        contact = escape(&c.contact_name),
        email = escape(&c.contact_email),
        tier = escape(&c.subscription_tier),
        created = c.created_at.format("%Y-%m-%d %H:%M"),
        report_count = detail.report_count(),
        handles = handles_list(&c.social_handles),
    );

    page(&c.name, flash, &body)
}

pub fn edit_client_page(
    client: &Client,
    tiers: &[SubscriptionTier],
    flash: Option<&Flash>,
) -> String {
    let options: String = tiers
        .iter()
        .map(|t| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(&t.slug),
                if t.slug == client.subscription_tier { " selected" } else { "" },
                escape(&t.name),
            )
        })
        .collect();

    let body = format!(
        r#"<form method="post" action="/clients/{id}/edit">
<label>Name* <input name="client_name" value="{name}" required></label>
<label>Website* <input name="client_website" value="{website}" required></label>
<label>Contact name* <input name="contact_name" value="{contact}" required></label>
<label>Contact email* <input type="email" name="contact_email" value="{email}" required></label>
<label>Subscription <select name="subscription_tier">{options}</select></label>
<button type="submit">Save</button>
</form>
<p><a href="/clients/{id}">Back</a></p>"#,
        id = client.id,
        name = escape(&client.name),
        website = escape(&client.website),
        contact = escape(&client.contact_name),
        email = escape(&client.contact_email),
    );

    page(&format!("Edit {}", client.name), flash, &body)
}
