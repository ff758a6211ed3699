use askama::Template;
use axum::{
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use cookie::Cookie;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::session;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

#[derive(Deserialize, Serialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    mfa_required: bool,
}

#[derive(Deserialize)]
struct AuthServiceResponse {
    #[serde(rename = "success")]
    _success: bool,
    data: AuthResponse,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

fn auth_service_url() -> String {
    std::env::var("AUTH_SERVICE_URL")
        .unwrap_or_else(|_| "http://auth.localhost:8080".to_string())
}

pub async fn login_page() -> Html<String> {
    let template = LoginTemplate;
    Html(template.render().unwrap())
}

pub async fn login_handler(Form(form): Form<LoginForm>) -> Result<Response, Html<String>> {
    let login_url = format!(
        "{}/api/v1/auth/login",
        auth_service_url().trim_end_matches('/')
    );

    let client = reqwest::Client::new();
    let response = client
        .post(&login_url)
        .json(&json!({
            "email": form.email,
            "password": form.password,
        }))
        .send()
        .await;

    match response {
        Ok(resp) => {
            let status = resp.status();

            if status.is_success() {
                let body_text = resp.text().await.unwrap_or_default();
                let auth_resp: AuthResponse =
                    match serde_json::from_str::<AuthServiceResponse>(&body_text) {
                        Ok(wrapper) => wrapper.data,
                        Err(e) => {
                            error!("Auth response parse failed: {}", e);
                            let template = ErrorTemplate {
                                message: format!("Parse error: {}", e),
                            };
                            return Err(Html(template.render().unwrap()));
                        }
                    };

                let mut access_cookie = Cookie::new("access_token", auth_resp.access_token.clone());
                access_cookie.set_path("/");
                access_cookie.set_http_only(true);
                access_cookie.set_same_site(cookie::SameSite::Lax);

                let mut refresh_cookie = Cookie::new("refresh_token", auth_resp.refresh_token);
                refresh_cookie.set_path("/");
                refresh_cookie.set_http_only(true);
                refresh_cookie.set_same_site(cookie::SameSite::Lax);

                let mut response = Redirect::to("/services").into_response();
                response.headers_mut().append(
                    header::SET_COOKIE,
                    access_cookie.to_string().parse().unwrap(),
                );
                response.headers_mut().append(
                    header::SET_COOKIE,
                    refresh_cookie.to_string().parse().unwrap(),
                );

                Ok(response)
            } else {
                error!("Auth service error: {}", status);
                let template = ErrorTemplate {
                    message: format!("Login failed: {}", status),
                };
                Err(Html(template.render().unwrap()))
            }
        }
        Err(e) => {
            error!("Request to auth service failed: {}", e);
            let template = ErrorTemplate {
                message: format!("Connection error: {}", e),
            };
            Err(Html(template.render().unwrap()))
        }
    }
}

pub async fn logout_handler() -> Response {
    let mut access_cookie = Cookie::new("access_token", "");
    access_cookie.set_path("/");
    access_cookie.set_http_only(true);
    access_cookie.set_same_site(cookie::SameSite::Lax);

    let mut refresh_cookie = Cookie::new("refresh_token", "");
    refresh_cookie.set_path("/");
    refresh_cookie.set_http_only(true);
    refresh_cookie.set_same_site(cookie::SameSite::Lax);

    let mut response = Redirect::to("/login").into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        access_cookie.to_string().parse().unwrap(),
    );
    response.headers_mut().append(
        header::SET_COOKIE,
        refresh_cookie.to_string().parse().unwrap(),
    );
    // The cached caller location is session state; it goes with the login.
    response.headers_mut().append(
        header::SET_COOKIE,
        session::clear_location_cookie().to_string().parse().unwrap(),
    );

    response
}
