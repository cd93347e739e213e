//! Route table for the question and answer API.
//!
//! Each path is a single resource so that a request with an unsupported
//! method reaches the resource's default service and receives a plain-text
//! 405 instead of falling through to a 404.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};

use crate::inbound::http::answers::{delete_answer, get_answer};
use crate::inbound::http::questions::{
    create_answer, create_question, delete_question, get_question, list_questions,
};

/// Plain-text body returned for unsupported methods.
pub const METHOD_NOT_ALLOWED_BODY: &str = "method not allowed";

/// Fallback for requests whose method a resource does not support.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .content_type(ContentType::plaintext())
        .body(METHOD_NOT_ALLOWED_BODY)
}

/// Register the question and answer resources.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use backend::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/questions")
            .route(web::get().to(list_questions))
            .route(web::post().to(create_question))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/questions/{id}")
            .route(web::get().to(get_question))
            .route(web::delete().to(delete_question))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/questions/{id}/answers")
            .route(web::post().to(create_answer))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/answers/{id}")
            .route(web::get().to(get_answer))
            .route(web::delete().to(delete_answer))
            .default_service(web::route().to(method_not_allowed)),
    );
}
