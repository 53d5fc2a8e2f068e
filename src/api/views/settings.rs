use super::layout::{page, post_button};
use crate::api::flash::Flash;
use crate::storage::SubscriptionTier;
use crate::utils::html::escape;

fn tier_row(tier: &SubscriptionTier) -> String {
    format!(
        r#"<tr><td>{order}</td><td>{name}</td><td>{slug}</td><td>{price}</td><td>{months}</td><td>{active}</td>
<td><form method="post" action="/settings/tiers/{id}/edit">
<input name="name" value="{name}"> <input name="slug" value="{slug}" size="10">
<input name="price" value="{price}" size="8"> <input name="duration_months" value="{months}" size="3">
<textarea name="features" rows="3">{features}</textarea>
<button type="submit">Save</button></form>
{toggle} {delete}</td></tr>"#,
        id = tier.id,
        order = tier.sort_order,
        name = escape(&tier.name),
        slug = escape(&tier.slug),
        price = tier.price_display(),
        months = tier.duration_months,
        active = if tier.is_active { "yes" } else { "no" },
        features = escape(&tier.features.join("\n")),
        toggle = post_button(
            &format!("/settings/tiers/{}/toggle", tier.id),
            if tier.is_active { "Disable" } else { "Enable" }
        ),
        delete = post_button(&format!("/settings/tiers/{}/delete", tier.id), "Delete"),
    )
}

pub fn settings_page(tiers: &[SubscriptionTier], flash: Option<&Flash>) -> String {
    let rows: String = tiers.iter().map(tier_row).collect();

    let body = format!(
        r#"<h2>Subscription tiers</h2>
<table><thead><tr><th>#</th><th>Name</th><th>Slug</th><th>Price</th><th>Months</th><th>Active</th><th></th></tr></thead>
<tbody>{rows}</tbody></table>
<h2>New tier</h2>
<form method="post" action="/settings/tiers/new">
<label>Name* <input name="name" required></label>
<label>Slug* <input name="slug" required pattern="[a-z0-9_-]+"></label>
<label>Price <input name="price" placeholder="49.99"></label>
<label>Duration (months) <input name="duration_months" value="1"></label>
<label>Features (one per line)<br><textarea name="features" rows="4"></textarea></label>
<button type="submit">Add tier</button>
</form>"#
    );

    page("Settings", flash, &body)
}
