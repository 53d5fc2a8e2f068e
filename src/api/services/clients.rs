use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};

use super::helpers::{html_page, recover, redirect_with_flash};
use crate::api::flash::Flash;
use crate::api::form::{ClientEditForm, FormFields};
use crate::api::views::{self, IntakeFormContext};
use crate::errors::Result;
use crate::services::{
    ClientService, IntakeService, IntakeSubmission, TierService, deleted_message, updated_message,
};

pub async fn new_client_form(
    req: HttpRequest,
    intake: web::Data<Arc<IntakeService>>,
    tiers: web::Data<Arc<TierService>>,
) -> Result<HttpResponse> {
    let tiers = tiers.list_active_tiers().await?;
    let limits = intake.limits();
    let ctx = IntakeFormContext {
        action: "/clients/new",
        public: false,
        tiers: &tiers,
        default_tier: &limits.default_tier,
        keyword_limit: limits.keyword_limit,
        country_limit: limits.country_limit,
    };
    Ok(html_page(&req, |flash| views::intake_form_page(&ctx, flash)))
}

pub async fn create_client(
    intake: web::Data<Arc<IntakeService>>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse> {
    let fields = FormFields::new(form.into_inner());
    let submission = IntakeSubmission::from(&fields);

    match intake.submit(&submission, None).await {
        Ok(outcome) => Ok(redirect_with_flash(
            "/",
            Flash::success(outcome.success_message()),
        )),
        Err(e) => recover(e, "/clients/new"),
    }
}

pub async fn show_client(
    req: HttpRequest,
    clients: web::Data<Arc<ClientService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match clients.detail(path.into_inner()).await {
        Ok(detail) => Ok(html_page(&req, |flash| {
            views::client_detail_page(&detail, flash)
        })),
        Err(e) => recover(e, "/"),
    }
}

pub async fn edit_client_form(
    req: HttpRequest,
    clients: web::Data<Arc<ClientService>>,
    tiers: web::Data<Arc<TierService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let client = match clients.get_client(path.into_inner()).await {
        Ok(client) => client,
        Err(e) => return recover(e, "/"),
    };
    let tiers = tiers.list_tiers().await?;
    Ok(html_page(&req, |flash| {
        views::edit_client_page(&client, &tiers, flash)
    }))
}

pub async fn update_client(
    clients: web::Data<Arc<ClientService>>,
    path: web::Path<i32>,
    form: web::Form<ClientEditForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match clients.update_client(id, form.into_inner().into()).await {
        Ok(client) => Ok(redirect_with_flash(
            &format!("/clients/{}", client.id),
            Flash::success(updated_message(&client)),
        )),
        Err(e @ crate::errors::AgencyError::NotFound(_)) => recover(e, "/"),
        Err(e) => recover(e, &format!("/clients/{}/edit", id)),
    }
}

pub async fn delete_client(
    clients: web::Data<Arc<ClientService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match clients.delete_client(path.into_inner()).await {
        Ok(client) => Ok(redirect_with_flash(
            "/",
            Flash::success(deleted_message(&client)),
        )),
        Err(e) => recover(e, "/"),
    }
}
