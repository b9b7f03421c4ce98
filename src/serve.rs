//! Local preview server.
//!
//! Every request for the presentation re-renders the slide file, so edits
//! show up on reload without a rebuild step.

use std::path::Path;

use tiny_http::{Header, Response, Server};

use crate::error::{Error, Result};
use crate::pipeline::Pipeline;

const HTML: &str = "text/html; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";

/// A response ready to be sent.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

/// Serve the presentation rendered from `input` until the process is stopped.
pub fn serve(pipeline: &Pipeline<'_>, input: &Path, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let server =
        Server::http(&addr).map_err(|e| Error::Other(format!("failed to start server: {}", e)))?;

    tracing::info!(
        url = %format!("http://localhost:{}", port),
        theme = %pipeline.theme(),
        "serving presentation"
    );
    println!(
        "\n  Serving at http://localhost:{}\n  Press Ctrl+C to stop\n",
        port
    );

    for request in server.incoming_requests() {
        let url = request.url().to_string();
        let reply = handle(pipeline, input, &url);

        let mut response =
            Response::from_string(reply.body.as_str()).with_status_code(reply.status);
        for (name, value) in reply.headers() {
            response.add_header(header(name, value)?);
        }

        request.respond(response)?;
        tracing::debug!(path = %url, status = reply.status, "served");
    }

    Ok(())
}

impl Reply {
    /// Headers sent with the body; responses are never cached.
    pub fn headers(&self) -> [(&'static str, &'static str); 2] {
        [
            ("Content-Type", self.content_type),
            ("Cache-Control", "no-cache"),
        ]
    }
}

/// Produce the reply for a request path.
pub fn handle(pipeline: &Pipeline<'_>, input: &Path, url: &str) -> Reply {
    let path = url.split(['?', '#']).next().unwrap_or_default();

    match path {
        "/" | "/index.html" => match pipeline.render_file(input) {
            Ok(rendered) => Reply {
                status: 200,
                content_type: HTML,
                body: rendered.html,
            },
            Err(e) => {
                tracing::error!(error = %e, "render failed");
                Reply {
                    status: 500,
                    content_type: TEXT,
                    body: format!("Error generating presentation: {}", e),
                }
            }
        },
        _ => Reply {
            status: 404,
            content_type: TEXT,
            body: "404 Not Found".to_string(),
        },
    }
}

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|()| Error::Other(format!("invalid header: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::BuildOptions;
    use crate::theme::ThemeTable;
    use std::fs;
    use test_case::test_case;

    #[test_case("/" ; "root")]
    #[test_case("/index.html" ; "index")]
    #[test_case("/?slide=2" ; "query string")]
    fn serves_presentation(url: &str) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("slides.json");
        fs::write(
            &input,
            r#"{ "title": "Demo", "slides": [{ "type": "quote", "quote": "Hi", "author": "Me" }] }"#,
        )
        .unwrap();
        let themes = ThemeTable::builtin().unwrap();
        let pipeline = Pipeline::load(&themes, &BuildOptions::default()).unwrap();

        let reply = handle(&pipeline, &input, url);

        assert_eq!(reply.status, 200);
        assert_eq!(
            reply.headers(),
            [
                ("Content-Type", "text/html; charset=utf-8"),
                ("Cache-Control", "no-cache"),
            ]
        );
        assert!(reply.body.contains("<title>Demo</title>"));
    }

    #[test]
    fn render_failure_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("slides.json");
        fs::write(&input, "not json").unwrap();
        let themes = ThemeTable::builtin().unwrap();
        let pipeline = Pipeline::load(&themes, &BuildOptions::default()).unwrap();

        let reply = handle(&pipeline, &input, "/");

        assert_eq!(reply.status, 500);
        assert!(reply.headers().contains(&("Cache-Control", "no-cache")));
        assert!(reply.body.starts_with("Error generating presentation: invalid slide document"));
    }

    #[test]
    fn other_paths_not_found() {
        let themes = ThemeTable::builtin().unwrap();
        let pipeline = Pipeline::load(&themes, &BuildOptions::default()).unwrap();

        let reply = handle(&pipeline, Path::new("slides.json"), "/favicon.ico");

        assert_eq!(reply.status, 404);
    }
}
