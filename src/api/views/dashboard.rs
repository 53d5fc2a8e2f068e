use super::layout::page;
use crate::api::flash::Flash;
use crate::services::Dashboard;
use crate::utils::html::escape;

pub fn dashboard_page(dashboard: &Dashboard, flash: Option<&Flash>) -> String {
    let stats = &dashboard.stats;
    let mut body = format!(
        r#"<section id="stats">
<p><strong>{}</strong> clients, <strong>{}</strong> competitors, <strong>{}</strong> queries, <strong>{}</strong> reports</p>
</section>"#,
        stats.clients, stats.competitors, stats.queries, stats.reports
    );

    if dashboard.clients.is_empty() {
        body.push_str(r#"<p>No clients yet. <a href="/clients/new">Add the first one</a>.</p>"#);
    } else {
        body.push_str(
            "<table><thead><tr><th>Name</th><th>Website</th><th>Contact</th><th>Tier</th><th>Created</th></tr></thead><tbody>",
        );
        for client in &dashboard.clients {
            body.push_str(&format!(
                r#"<tr><td><a href="/clients/{}">{}</a></td><td>{}</td><td>{} &lt;{}&gt;</td><td>{}</td><td>{}</td></tr>"#,
                client.id,
                escape(&client.name),
                escape(&client.website),
                escape(&client.contact_name),
                escape(&client.contact_email),
                escape(&client.subscription_tier),
                client.created_at.format("%Y-%m-%d"),
            ));
        }
        body.push_str("</tbody></table>");
    }

    page("Dashboard", flash, &body)
}
