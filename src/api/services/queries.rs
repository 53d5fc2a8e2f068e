use std::sync::Arc;

use actix_web::{HttpResponse, web};

use super::helpers::{recover, redirect_with_flash};
use crate::api::flash::Flash;
use crate::errors::Result;
use crate::services::{ClientService, REPORT_QUEUED_MESSAGE, auto_run_message};

pub async fn run_report(
    clients: web::Data<Arc<ClientService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match clients.run_query(path.into_inner()).await {
        Ok((query, _report)) => Ok(redirect_with_flash(
            &format!("/clients/{}", query.client_id),
            Flash::success(REPORT_QUEUED_MESSAGE),
        )),
        Err(e) => recover(e, "/"),
    }
}

pub async fn toggle_auto_run(
    clients: web::Data<Arc<ClientService>>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match clients.toggle_auto_run(path.into_inner()).await {
        Ok(query) => Ok(redirect_with_flash(
            &format!("/clients/{}", query.client_id),
            Flash::success(auto_run_message(&query)),
        )),
        Err(e) => recover(e, "/"),
    }
}
