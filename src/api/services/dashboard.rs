use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};

use super::helpers::html_page;
use crate::api::views;
use crate::errors::Result;
use crate::services::ClientService;

pub async fn dashboard(
    req: HttpRequest,
    clients: web::Data<Arc<ClientService>>,
) -> Result<HttpResponse> {
    let dashboard = clients.dashboard().await?;
    Ok(html_page(&req, |flash| {
        views::dashboard_page(&dashboard, flash)
    }))
}
