use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

use crate::api::flash::{Flash, removal_cookie, take_flash};
use crate::errors::{AgencyError, Result};

/// `303 See Other` to `location`, carrying a flash message
pub fn redirect_with_flash(location: &str, flash: Flash) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(flash.to_cookie())
        .finish()
}

/// Turn a user-facing error into a redirect with an error flash.
/// Anything else propagates and becomes a 500.
pub fn recover(err: AgencyError, location: &str) -> Result<HttpResponse> {
    if err.is_user_facing() {
        info!("Request rejected: {}", err);
        Ok(redirect_with_flash(location, Flash::error(err.message())))
    } else {
        Err(err)
    }
}

/// Render an HTML page, consuming any pending flash message
pub fn html_page(req: &HttpRequest, render: impl FnOnce(Option<&Flash>) -> String) -> HttpResponse {
    let flash = take_flash(req);
    let body = render(flash.as_ref());

    let mut builder = HttpResponse::Ok();
    builder.insert_header(ContentType::html());
    if req.cookie(crate::api::flash::FLASH_COOKIE).is_some() {
        builder.cookie(removal_cookie());
    }
    builder.body(body)
}

/// Scheme and host the request came in on, e.g. `http://127.0.0.1:5000`
pub fn request_base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}
