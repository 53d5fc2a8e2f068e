use super::layout::{page, public_page};
use crate::api::flash::Flash;
use crate::storage::{Frequency, SubscriptionTier};
use crate::utils::html::escape;
use strum::IntoEnumIterator;

const SOCIAL_ROWS: usize = 3;
const COMPETITOR_BLOCKS: usize = 3;
const COMPETITOR_SOCIAL_ROWS: usize = 2;

const COUNTRIES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("GB", "United Kingdom"),
    ("CA", "Canada"),
    ("AU", "Australia"),
    ("NZ", "New Zealand"),
    ("IE", "Ireland"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("ES", "Spain"),
    ("IT", "Italy"),
    ("NL", "Netherlands"),
    ("BE", "Belgium"),
    ("SE", "Sweden"),
    ("NO", "Norway"),
    ("DK", "Denmark"),
    ("FI", "Finland"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("CH", "Switzerland"),
    ("AT", "Austria"),
    ("IN", "India"),
    ("JP", "Japan"),
    ("SG", "Singapore"),
    ("AE", "United Arab Emirates"),
    ("ZA", "South Africa"),
    ("BR", "Brazil"),
    ("MX", "Mexico"),
];

/// Where the form posts and how it is framed
pub struct IntakeFormContext<'a> {
    pub action: &'a str,
    pub public: bool,
    pub tiers: &'a [SubscriptionTier],
    pub default_tier: &'a str,
    pub keyword_limit: usize,
    pub country_limit: usize,
}

fn social_rows(prefix: &str, rows: usize) -> String {
    (0..rows)
        .map(|i| {
            format!(
                r#"<div><input name="{p}[{i}][platform]" placeholder="Platform"> <input name="{p}[{i}][handle]" placeholder="Handle"></div>"#,
                p = prefix,
                i = i
            )
        })
        .collect()
}

fn competitor_block(i: usize) -> String {
    format!(
        r#"<fieldset><legend>Competitor {n}</legend>
<label>Name <input name="competitors[{i}][name]"></label>
<label>Website <input name="competitors[{i}][website]"></label>
<label>YouTube <input name="competitors[{i}][youtube]"></label>
<label>Vimeo <input name="competitors[{i}][vimeo]"></label>
<label>Review page <input name="competitors[{i}][review]"></label>
{social}
</fieldset>"#,
        n = i + 1,
        i = i,
        social = social_rows(&format!("competitors[{}][social]", i), COMPETITOR_SOCIAL_ROWS),
    )
}

pub fn intake_form_page(ctx: &IntakeFormContext<'_>, flash: Option<&Flash>) -> String {
    let tier_options: String = ctx
        .tiers
        .iter()
        .map(|t| {
            format!(
                r#"<option value="{}"{}>{} ({})</option>"#,
                escape(&t.slug),
                if t.slug == ctx.default_tier { " selected" } else { "" },
                escape(&t.name),
                t.price_display(),
            )
        })
        .collect();

    let frequency_options: String = Frequency::iter()
        .map(|f| format!(r#"<option value="{f}">{f}</option>"#))
        .collect();

    let country_options: String = COUNTRIES
        .iter()
        .map(|(code, name)| format!(r#"<option value="{}">{}</option>"#, code, name))
        .collect();

    let competitors: String = (0..COMPETITOR_BLOCKS).map(competitor_block).collect();

    let body = format!(
        r#"<form method="post" action="{action}">
<fieldset><legend>Client</legend>
<label>Name* <input name="client_name" required></label>
<label>Website* <input name="client_website" required></label>
<label>Contact name* <input name="contact_name" required></label>
<label>Contact email* <input type="email" name="contact_email" required></label>
<label>Subscription <select name="subscription_tier">{tier_options}</select></label>
<h3>Social handles</h3>
{social}
</fieldset>
{competitors}
<fieldset><legend>Reporting</legend>
<label>Keywords (one per line, up to {keyword_limit})<br><textarea name="keywords" rows="8" cols="60"></textarea></label>
<label>Countries (up to {country_limit})<br><select name="countries[]" multiple size="8">{country_options}</select></label>
<label>Frequency <select name="frequency">{frequency_options}</select></label>
<label><input type="checkbox" name="auto_run" value="on"> Run automatically</label>
<label>Period start <input type="date" name="period_start"></label>
<label>Period end <input type="date" name="period_end"></label>
</fieldset>
<button type="submit">Submit</button>
</form>"#,
        action = escape(ctx.action),
        social = social_rows("social", SOCIAL_ROWS),
        keyword_limit = ctx.keyword_limit,
        country_limit = ctx.country_limit,
    );

    if ctx.public {
        public_page("Client intake", flash, &body)
    } else {
        page("New client", flash, &body)
    }
}
