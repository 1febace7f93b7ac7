//! HTTP handlers and route configuration.

mod board;
mod contacts;
mod health;

use actix_web::{Scope, web};

use crate::config::RoutePrefixes;

/// Configure all application routes.
///
/// Unmatched methods on a resource are answered with 405 by actix.
pub fn configure_routes(cfg: &mut web::ServiceConfig, prefixes: &RoutePrefixes) {
    cfg.route("/api/health", web::get().to(health::health_check));

    // A scope answers 404 for every path under its prefix, so the module with
    // the longer prefix is mounted first; a root mount always comes last.
    let board = board_scope(&prefixes.board);
    let contacts = contacts_scope(&prefixes.contacts);
    if prefixes.board.len() >= prefixes.contacts.len() {
        cfg.service(board).service(contacts);
    } else {
        cfg.service(contacts).service(board);
    }
}

fn board_scope(prefix: &str) -> Scope {
    web::scope(prefix)
        .route("/", web::get().to(board::post_list_page))
        .service(web::resource("/api/posts/").route(web::get().to(board::list_posts)))
        .service(web::resource("/api/posts/create/").route(web::post().to(board::create_post)))
        .service(
            web::resource("/api/posts/{id}/")
                .route(web::get().to(board::get_post))
                .route(web::put().to(board::update_post))
                .route(web::delete().to(board::delete_post)),
        )
}

fn contacts_scope(prefix: &str) -> Scope {
    web::scope(prefix)
        .route("/", web::get().to(contacts::contact_list))
        .service(
            web::resource("/new/")
                .route(web::get().to(contacts::create_form))
                .route(web::post().to(contacts::create_contact)),
        )
        .service(
            web::resource("/{id}/edit/")
                .route(web::get().to(contacts::update_form))
                .route(web::post().to(contacts::update_contact)),
        )
        .service(
            web::resource("/{id}/delete/")
                .route(web::get().to(contacts::delete_confirm))
                .route(web::post().to(contacts::delete_contact)),
        )
}

/// Build an actix test service over the given state.
#[cfg(test)]
macro_rules! test_app {
    ($state:expr) => {{
        let state: $crate::state::AppState = $state;
        let prefixes = state.prefixes.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(state))
                .configure(move |cfg| $crate::handlers::configure_routes(cfg, &prefixes)),
        )
        .await
    }};
}

#[cfg(test)]
pub(crate) use test_app;

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;

    use crate::config::RoutePrefixes;
    use crate::state::AppState;

    #[actix_rt::test]
    async fn test_board_at_root_leaves_contacts_reachable() {
        let app = test_app!(AppState::for_tests_at(RoutePrefixes::new("/", "/contacts")));

        for uri in ["/", "/api/posts/", "/contacts/", "/contacts/new/", "/api/health"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
        }

        let req = test::TestRequest::post()
            .uri("/contacts/new/")
            .set_form([("name", "Yoon"), ("email", ""), ("phone", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/contacts/");
    }

    #[actix_rt::test]
    async fn test_contacts_at_root_leaves_board_reachable() {
        let app = test_app!(AppState::for_tests_at(RoutePrefixes::new("/board", "/")));

        for uri in ["/", "/new/", "/board/", "/board/api/posts/"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
        }
    }
}
