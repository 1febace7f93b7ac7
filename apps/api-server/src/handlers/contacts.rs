//! Address book: server-rendered list, form and confirm-delete views.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};
use tera::Context;

use pinboard_core::domain::{Contact, ContactDraft, FieldErrors};

use crate::middleware::error::{PageError, PageResult};
use crate::state::AppState;

/// GET {contacts}/
pub async fn contact_list(state: web::Data<AppState>) -> PageResult<HttpResponse> {
    let contacts = state.contacts.list().await?;

    let mut context = page_context(&state);
    context.insert("contacts", &contacts);
    render(&state, "contacts/contact_list.html", &context)
}

/// GET {contacts}/new/
pub async fn create_form(state: web::Data<AppState>) -> PageResult<HttpResponse> {
    let action = format!("{}/new/", state.prefixes.contacts);
    render_form(&state, "New contact", &action, &ContactDraft::default(), &FieldErrors::default())
}

/// POST {contacts}/new/
pub async fn create_contact(
    state: web::Data<AppState>,
    form: web::Form<ContactDraft>,
) -> PageResult<HttpResponse> {
    let draft = form.into_inner();
    let fields = match draft.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            let action = format!("{}/new/", state.prefixes.contacts);
            return render_form(&state, "New contact", &action, &draft, &errors);
        }
    };

    let contact = state.contacts.create(fields).await?;

    tracing::info!(contact_id = contact.id, "Contact created");
    Ok(redirect_to_list(&state))
}

/// GET {contacts}/{id}/edit/
pub async fn update_form(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> PageResult<HttpResponse> {
    let contact = find_contact(&state, path.into_inner()).await?;

    let action = edit_action(&state, contact.id);
    render_form(
        &state,
        "Edit contact",
        &action,
        &ContactDraft::from_contact(&contact),
        &FieldErrors::default(),
    )
}

/// POST {contacts}/{id}/edit/
pub async fn update_contact(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Form<ContactDraft>,
) -> PageResult<HttpResponse> {
    let contact = find_contact(&state, path.into_inner()).await?;

    let draft = form.into_inner();
    let fields = match draft.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            let action = edit_action(&state, contact.id);
            return render_form(&state, "Edit contact", &action, &draft, &errors);
        }
    };

    state.contacts.update(contact.id, fields).await?;

    tracing::info!(contact_id = contact.id, "Contact updated");
    Ok(redirect_to_list(&state))
}

/// GET {contacts}/{id}/delete/ - confirmation step.
pub async fn delete_confirm(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> PageResult<HttpResponse> {
    let contact = find_contact(&state, path.into_inner()).await?;

    let mut context = page_context(&state);
    context.insert("contact", &contact);
    render(&state, "contacts/contact_confirm_delete.html", &context)
}

/// POST {contacts}/{id}/delete/
pub async fn delete_contact(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> PageResult<HttpResponse> {
    let contact = find_contact(&state, path.into_inner()).await?;

    state.contacts.delete(contact.id).await?;

    tracing::info!(contact_id = contact.id, "Contact deleted");
    Ok(redirect_to_list(&state))
}

async fn find_contact(state: &AppState, id: i64) -> PageResult<Contact> {
    state
        .contacts
        .find_by_id(id)
        .await?
        .ok_or(PageError::NotFound)
}

fn page_context(state: &AppState) -> Context {
    let mut context = Context::new();
    context.insert("prefix", &state.prefixes.contacts);
    context
}

fn edit_action(state: &AppState, id: i64) -> String {
    format!("{}/{}/edit/", state.prefixes.contacts, id)
}

fn render_form(
    state: &AppState,
    heading: &str,
    action: &str,
    form: &ContactDraft,
    errors: &FieldErrors,
) -> PageResult<HttpResponse> {
    let mut context = page_context(state);
    context.insert("heading", heading);
    context.insert("action", action);
    context.insert("form", form);
    context.insert("errors", errors);
    render(state, "contacts/contact_form.html", &context)
}

fn render(state: &AppState, template: &str, context: &Context) -> PageResult<HttpResponse> {
    let html = state.templates.render(template, context)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

fn redirect_to_list(state: &AppState) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, format!("{}/", state.prefixes.contacts)))
        .finish()
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};
    use actix_web::test;

    use pinboard_core::domain::ContactFields;

    use crate::handlers::test_app;
    use crate::state::AppState;

    async fn seed(state: &AppState, name: &str) -> i64 {
        state
            .contacts
            .create(ContactFields {
                name: name.to_string(),
                email: Some(format!("{name}@example.com")),
                phone: None,
            })
            .await
            .unwrap()
            .id
    }

    #[actix_rt::test]
    async fn test_create_redirects_to_list() {
        let state = AppState::for_tests();
        let app = test_app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/contacts/new/")
            .set_form([("name", "Kang"), ("email", "kang@example.com"), ("phone", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/contacts/");

        let contacts = state.contacts.list().await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Kang");
        assert_eq!(contacts[0].phone, None);
    }

    #[actix_rt::test]
    async fn test_invalid_email_rerenders_form_without_saving() {
        let state = AppState::for_tests();
        seed(&state, "existing").await;
        let app = test_app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/contacts/new/")
            .set_form([("name", "Lim"), ("email", "not-an-email"), ("phone", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Enter a valid email address."));
        assert!(html.contains("value=\"Lim\""));

        assert_eq!(state.contacts.list().await.unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn test_list_shows_newest_id_first() {
        let state = AppState::for_tests();
        seed(&state, "alpha").await;
        seed(&state, "bravo").await;
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/contacts/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&body).unwrap();

        let bravo = html.find("bravo").unwrap();
        let alpha = html.find("alpha").unwrap();
        assert!(bravo < alpha);
    }

    #[actix_rt::test]
    async fn test_edit_form_is_prefilled_and_update_saves() {
        let state = AppState::for_tests();
        let id = seed(&state, "song").await;
        let app = test_app!(state.clone());

        let req = test::TestRequest::get()
            .uri(&format!("/contacts/{id}/edit/"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("song@example.com"));

        let req = test::TestRequest::post()
            .uri(&format!("/contacts/{id}/edit/"))
            .set_form([("name", "Song"), ("email", ""), ("phone", "010-1234-5678")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let contact = state.contacts.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(contact.name, "Song");
        assert_eq!(contact.email, None);
        assert_eq!(contact.phone.as_deref(), Some("010-1234-5678"));
    }

    #[actix_rt::test]
    async fn test_delete_requires_confirmation_then_removes() {
        let state = AppState::for_tests();
        let id = seed(&state, "oh").await;
        let app = test_app!(state.clone());

        let req = test::TestRequest::get()
            .uri(&format!("/contacts/{id}/delete/"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(state.contacts.find_by_id(id).await.unwrap().is_some());

        let req = test::TestRequest::post()
            .uri(&format!("/contacts/{id}/delete/"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert!(state.contacts.find_by_id(id).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_missing_contact_is_not_found() {
        let app = test_app!(AppState::for_tests());

        for (method, uri) in [
            ("GET", "/contacts/99/edit/"),
            ("POST", "/contacts/99/edit/"),
            ("GET", "/contacts/99/delete/"),
            ("POST", "/contacts/99/delete/"),
        ] {
            let req = if method == "GET" {
                test::TestRequest::get().uri(uri)
            } else {
                test::TestRequest::post()
                    .uri(uri)
                    .set_form([("name", "Nobody"), ("email", ""), ("phone", "")])
            };
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        }
    }
}
