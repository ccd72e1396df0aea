use actix_web::web;

pub mod auth;
pub mod backend_health;
pub mod club;
pub mod matches;
pub mod registration;
pub mod standings;

/// Write endpoints authenticate through the `AuthenticatedUser` extractor;
/// reads are public.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login);

    cfg.service(
        web::scope("/club")
            .service(club::create_club)
            .service(club::get_clubs)
            .service(club::get_club)
            .service(club::update_club)
            .service(club::delete_club)
    );
    cfg.service(
        web::scope("/match")
            .service(matches::record_matches)
            .service(matches::get_matches)
            .service(matches::get_match)
    );
    cfg.service(standings::get_standings);
}
