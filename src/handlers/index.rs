// src/handlers/index.rs
use actix_web::http::header::ContentType;
use actix_web::HttpResponse;

// The whole frontend is one self-contained page compiled into the binary.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(include_str!("../../static/index.html"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn index_serves_the_dashboard_page() {
        let app =
            test::init_service(App::new().route("/", web::get().to(index))).await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap().to_str().unwrap(),
            "text/html; charset=utf-8"
        );

        let body = test::read_body(resp).await;
        let page = std::str::from_utf8(&body).unwrap();
        assert!(page.contains("/status"));
        assert!(page.contains("/auth/google"));
    }
}
