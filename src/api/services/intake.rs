//! Public intake reached through a shareable link

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};

use super::helpers::{html_page, recover, redirect_with_flash};
use crate::api::flash::Flash;
use crate::api::form::FormFields;
use crate::api::views::{self, IntakeFormContext};
use crate::errors::{AgencyError, Result};
use crate::services::{IntakeService, IntakeSubmission, LinkService, TierService};

pub const THANK_YOU_MESSAGE: &str = "Thank you! Your information has been submitted.";

pub async fn public_form(
    req: HttpRequest,
    links: web::Data<Arc<LinkService>>,
    intake: web::Data<Arc<IntakeService>>,
    tiers: web::Data<Arc<TierService>>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let link = match links.validate_token(&path.into_inner()).await {
        Ok(link) => link,
        Err(e) => return recover(e, "/"),
    };

    let tiers = tiers.list_active_tiers().await?;
    let limits = intake.limits();
    let action = format!("/intake/{}", link.token);
    let ctx = IntakeFormContext {
        action: &action,
        public: true,
        tiers: &tiers,
        default_tier: &limits.default_tier,
        keyword_limit: limits.keyword_limit,
        country_limit: limits.country_limit,
    };
    Ok(html_page(&req, |flash| views::intake_form_page(&ctx, flash)))
}

pub async fn public_submit(
    links: web::Data<Arc<LinkService>>,
    intake: web::Data<Arc<IntakeService>>,
    path: web::Path<String>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse> {
    let link = match links.validate_token(&path.into_inner()).await {
        Ok(link) => link,
        Err(e) => return recover(e, "/"),
    };

    let back = format!("/intake/{}", link.token);
    let submission = IntakeSubmission::from(&FormFields::new(form.into_inner()));

    match intake.submit(&submission, Some(&link)).await {
        Ok(_) => Ok(redirect_with_flash(&back, Flash::success(THANK_YOU_MESSAGE))),
        // Link was switched off between the gate and the write
        Err(e @ AgencyError::InvalidLink(_)) => recover(e, "/"),
        Err(e) => recover(e, &back),
    }
}
