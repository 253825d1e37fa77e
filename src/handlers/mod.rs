use actix_web::middleware::from_fn;
use actix_web::web;

use crate::auth::require_token;

pub mod article;
pub mod auth;
pub mod todo;
pub mod user;

/// Every route the server exposes. `/api/v2` repeats the `/api/v1` surface
/// behind bearer-token authentication.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1").configure(minilog_routes))
        .service(
            web::scope("/api/v2/auth")
                .service(auth::signup)
                .service(auth::login),
        )
        .service(
            web::scope("/api/v2")
                .wrap(from_fn(require_token))
                .service(auth::me)
                .configure(minilog_routes),
        )
        .service(web::scope("/api/todos/v1").configure(todo::v1::routes))
        .service(web::scope("/api/todos/v2").configure(todo::v2::routes));
}

fn minilog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(article::create_article)
        .service(article::get_article)
        .service(article::list_articles_by_author)
        .service(article::update_article)
        .service(article::delete_article)
        .service(article::get_feed)
        .service(user::get_users)
        .service(user::get_user)
        .service(user::create_user)
        .service(user::update_user)
        .service(user::delete_user)
        .service(user::follow)
        .service(user::unfollow)
        .service(user::list_followees);
}
