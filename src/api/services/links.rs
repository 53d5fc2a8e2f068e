use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};

use super::helpers::{html_page, recover, redirect_with_flash, request_base_url};
use super::state::UiSettings;
use crate::api::flash::Flash;
use crate::api::form::LinkFormData;
use crate::api::views;
use crate::errors::Result;
use crate::services::LinkService;

pub async fn list_links(
    req: HttpRequest,
    links: web::Data<Arc<LinkService>>,
    settings: web::Data<Arc<UiSettings>>,
) -> Result<HttpResponse> {
    let all = links.list_links().await?;
    let base_url = settings
        .public_base_url
        .clone()
        .unwrap_or_else(|| request_base_url(&req));
    let now = chrono::Utc::now();
    Ok(html_page(&req, |flash| {
        views::links_page(&all, &base_url, now, flash)
    }))
}

pub async fn create_link(
    links: web::Data<Arc<LinkService>>,
    form: web::Form<LinkFormData>,
) -> Result<HttpResponse> {
    match links.create_link(form.into_inner().into()).await {
        Ok(link) => {
            let label = if link.label.is_empty() {
                "Intake link".to_string()
            } else {
                format!("Intake link '{}'", link.label)
            };
            Ok(redirect_with_flash(
                "/links",
                Flash::success(format!("{} created.", label)),
            ))
        }
        Err(e) => recover(e, "/links"),
    }
}

pub async fn toggle_link(
    links: web::Data<Arc<LinkService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match links.toggle_link(path.into_inner()).await {
        Ok(link) => Ok(redirect_with_flash(
            "/links",
            Flash::success(if link.is_active {
                "Link activated."
            } else {
                "Link deactivated."
            }),
        )),
        Err(e) => recover(e, "/links"),
    }
}

pub async fn delete_link(
    links: web::Data<Arc<LinkService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match links.delete_link(path.into_inner()).await {
        Ok(_) => Ok(redirect_with_flash("/links", Flash::success("Link deleted."))),
        Err(e) => recover(e, "/links"),
    }
}
