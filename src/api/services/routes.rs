use actix_web::web;

use super::{clients, dashboard, health, intake, links, queries, settings};

/// Mount every page and action
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dashboard::dashboard))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/clients")
                .route("/new", web::get().to(clients::new_client_form))
                .route("/new", web::post().to(clients::create_client))
                .route("/{id}", web::get().to(clients::show_client))
                .route("/{id}/edit", web::get().to(clients::edit_client_form))
                .route("/{id}/edit", web::post().to(clients::update_client))
                .route("/{id}/delete", web::post().to(clients::delete_client)),
        )
        .service(
            web::scope("/queries")
                .route("/{id}/run", web::post().to(queries::run_report))
                .route("/{id}/toggle-auto", web::post().to(queries::toggle_auto_run)),
        )
        .service(
            web::scope("/intake")
                .route("/{token}", web::get().to(intake::public_form))
                .route("/{token}", web::post().to(intake::public_submit)),
        )
        .service(
            web::scope("/links")
                .route("", web::get().to(links::list_links))
                .route("/new", web::post().to(links::create_link))
                .route("/{id}/toggle", web::post().to(links::toggle_link))
                .route("/{id}/delete", web::post().to(links::delete_link)),
        )
        .service(
            web::scope("/settings")
                .route("", web::get().to(settings::settings_page))
                .route("/tiers/new", web::post().to(settings::create_tier))
                .route("/tiers/{id}/edit", web::post().to(settings::update_tier))
                .route("/tiers/{id}/delete", web::post().to(settings::delete_tier))
                .route("/tiers/{id}/toggle", web::post().to(settings::toggle_tier)),
        );
}
