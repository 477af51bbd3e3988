// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Thin HTTP helpers shared by the template renderer and the cloud and agent
// backends. Every non-2xx response becomes a `HttpStatus` error carrying the
// status code and whatever body text could be read.

use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use printroute_core::error::{PrintRouteError, Result};

/// Build the client shared by all backends of one dispatcher.
pub fn build_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|e| PrintRouteError::Transport {
            context: "HTTP client setup".into(),
            detail: e.to_string(),
        })
}

/// Parse an absolute URL, reporting failures as configuration errors.
pub fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| PrintRouteError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn transport(context: &str, err: reqwest::Error) -> PrintRouteError {
    PrintRouteError::Transport {
        context: context.to_string(),
        detail: err.to_string(),
    }
}

/// Pass 2xx responses through; turn anything else into `HttpStatus`.
///
/// The body is read best-effort: a failed read leaves it empty.
pub async fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!(status = status.as_u16(), context, "remote call failed");
    Err(PrintRouteError::HttpStatus {
        context: context.to_string(),
        status: status.as_u16(),
        body,
    })
}

/// `GET` a URL and return its body as text.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let parsed = parse_url(url)?;
    debug!(%parsed, "fetching content as HTML");
    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| transport("content fetch", e))?;
    let response = ensure_success(response, &format!("fetch of {url}")).await?;
    response
        .text()
        .await
        .map_err(|e| transport("content fetch", e))
}

/// `POST` a JSON body and require a 2xx answer.
pub async fn post_json<T: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    body: &T,
    context: &str,
) -> Result<Response> {
    let parsed = parse_url(url)?;
    let response = client
        .post(parsed)
        .json(body)
        .send()
        .await
        .map_err(|e| transport(context, e))?;
    ensure_success(response, context).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use printroute_core::ErrorKind;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_text_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/receipt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>receipt</p>"))
            .mount(&server)
            .await;

        let client = build_client("test").expect("client");
        let html = fetch_text(&client, &format!("{}/receipt", server.uri()))
            .await
            .expect("fetch");
        assert_eq!(html, "<p>receipt</p>");
    }

    #[tokio::test]
    async fn fetch_text_embeds_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;

        let client = build_client("test").expect("client");
        let err = fetch_text(&client, &format!("{}/missing", server.uri()))
            .await
            .expect_err("404 must fail");
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("gone"));
    }

    #[tokio::test]
    async fn relative_url_is_a_configuration_error() {
        let client = build_client("test").expect("client");
        let err = fetch_text(&client, "/receipt/1").await.expect_err("relative");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
