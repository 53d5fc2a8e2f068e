use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};

use super::helpers::{html_page, recover, redirect_with_flash};
use crate::api::flash::Flash;
use crate::api::form::TierFormData;
use crate::api::views;
use crate::errors::Result;
use crate::services::TierService;

const SETTINGS: &str = "/settings";

pub async fn settings_page(
    req: HttpRequest,
    tiers: web::Data<Arc<TierService>>,
) -> Result<HttpResponse> {
    let all = tiers.list_tiers().await?;
    Ok(html_page(&req, |flash| views::settings_page(&all, flash)))
}

pub async fn create_tier(
    tiers: web::Data<Arc<TierService>>,
    form: web::Form<TierFormData>,
) -> Result<HttpResponse> {
    match tiers.create_tier(&form.into_inner().into()).await {
        Ok(tier) => Ok(redirect_with_flash(
            SETTINGS,
            Flash::success(format!("Tier '{}' created.", tier.name)),
        )),
        Err(e) => recover(e, SETTINGS),
    }
}

pub async fn update_tier(
    tiers: web::Data<Arc<TierService>>,
    path: web::Path<i32>,
    form: web::Form<TierFormData>,
) -> Result<HttpResponse> {
    match tiers
        .update_tier(path.into_inner(), &form.into_inner().into())
        .await
    {
        Ok(tier) => Ok(redirect_with_flash(
            SETTINGS,
            Flash::success(format!("Tier '{}' updated.", tier.name)),
        )),
        Err(e) => recover(e, SETTINGS),
    }
}

pub async fn delete_tier(
    tiers: web::Data<Arc<TierService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match tiers.delete_tier(path.into_inner()).await {
        Ok(tier) => Ok(redirect_with_flash(
            SETTINGS,
            Flash::success(format!("Tier '{}' deleted.", tier.name)),
        )),
        Err(e) => recover(e, SETTINGS),
    }
}

pub async fn toggle_tier(
    tiers: web::Data<Arc<TierService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match tiers.toggle_tier(path.into_inner()).await {
        Ok(tier) => Ok(redirect_with_flash(
            SETTINGS,
            Flash::success(format!(
                "Tier '{}' {}.",
                tier.name,
                if tier.is_active { "enabled" } else { "disabled" }
            )),
        )),
        Err(e) => recover(e, SETTINGS),
    }
}
