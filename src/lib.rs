use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use crate::db::establish_connection_pool;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{
    administration, auth, bonus, browsing, cart, keypoints, problems, purchases, replacements,
    reviews, tours,
};

pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

pub const TOURIST_ROLE: &str = "tourist";
pub const GUIDE_ROLE: &str = "guide";
pub const ADMINISTRATOR_ROLE: &str = "administrator";

/// Registers every API handler on the given service config.
///
/// Kept apart from [`run`] so integration tests can mount the same routes.
/// Within each path family, literal segments are registered before `{id}`
/// routes so `/filter` is never swallowed by an id match.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::register)
        .service(auth::interests)
        .service(auth::get_profile)
        .service(auth::update_profile)
        .service(browsing::filtered_tours)
        .service(browsing::categories)
        .service(browsing::published_tours)
        .service(browsing::published_tour)
        .service(browsing::tour_keypoints)
        .service(cart::get_cart)
        .service(cart::clear_cart)
        .service(cart::add_item)
        .service(cart::remove_item)
        .service(purchases::checkout)
        .service(purchases::purchase_history)
        .service(purchases::get_purchase)
        .service(purchases::cancel_purchase)
        .service(bonus::bonus_points)
        .service(bonus::transaction_history)
        .service(problems::report_problem)
        .service(problems::my_problems)
        .service(problems::my_problem)
        .service(problems::guide_problems)
        .service(problems::resolve_problem)
        .service(problems::send_to_administrator)
        .service(problems::problems_under_review)
        .service(problems::return_to_guide)
        .service(problems::reject_problem)
        .service(reviews::create_review)
        .service(reviews::can_review)
        .service(reviews::reviews_for_purchase)
        .service(reviews::reviews_for_tour)
        .service(reviews::tour_statistics)
        .service(reviews::get_review)
        .service(tours::list_tours)
        .service(tours::create_tour)
        .service(tours::get_tour)
        .service(tours::update_tour)
        .service(tours::delete_tour)
        .service(keypoints::create_keypoint)
        .service(keypoints::keypoints_by_tour)
        .service(keypoints::get_keypoint)
        .service(keypoints::update_keypoint)
        .service(keypoints::delete_keypoint)
        .service(replacements::request_replacement)
        .service(replacements::available_replacements)
        .service(replacements::my_requests)
        .service(replacements::replacement_details)
        .service(replacements::accept_replacement)
        .service(replacements::cancel_replacement)
        .service(administration::blocked_users)
        .service(administration::unblock_user);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(web::scope("/api").configure(configure_api))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
