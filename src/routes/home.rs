use crate::util::e500;
use actix_web::http::header::ContentType;
use actix_web::{get, HttpResponse};
use askama::Template;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

#[get("/")]
pub async fn home() -> Result<HttpResponse, actix_web::Error> {
    let page = HomeTemplate.render().map_err(e500)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page))
}
