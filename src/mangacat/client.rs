use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{
    Client, RequestBuilder, StatusCode,
    multipart::{Form, Part},
};
use serde::Serialize;
use serde_json::Value;

use crate::{Res, config::Config, sniff::ImageFile};

/// Most files sent in one multipart request.
pub const BATCH_SIZE: usize = 5;

/// Multipart field every uploaded file is attached to.
pub const FILES_FIELD: &str = "files";

/// Status returned by [`ApiClient::submit_files`] when no batch was lost.
pub const SUCCESS: i32 = 0;

/// Status returned by [`ApiClient::submit_files`] after an empty response.
pub const FAILURE: i32 = 1;

/// HTTP session against the MangaCat API.
///
/// Wraps a single `reqwest::Client`, so every request of an invocation shares
/// one connection pool. All requests carry the configured `User-Agent`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: &Config) -> Res<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Uses an already configured `reqwest::Client`, which is expected to
    /// set the `User-Agent` itself.
    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn post(&self, url: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.post(self.config.endpoint(url));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// POSTs `payload` as JSON and returns the decoded JSON response.
    ///
    /// `url` is either absolute or relative to the API base URL. When a token
    /// is given it is sent as `Authorization: Bearer <token>`.
    ///
    /// # Returns
    ///
    /// - `Some(Value)` - The response body, unchanged
    /// - `None` - The request failed; the reason has been logged
    ///
    /// # Failure Classification
    ///
    /// All of the following are logged at error level and yield `None`:
    /// - The request could not be sent or the body could not be read
    /// - A non-2xx status, logged as `<status> - <message>`
    /// - An empty or non-JSON body, logged verbatim
    ///
    /// Nothing is retried.
    ///
    /// # Example
    ///
    /// ```
    /// let res = client.submit_json("auth/login", &payload, None).await;
    /// if let Some(body) = res {
    ///     println!("{}", body["user"]["token"]);
    /// }
    /// ```
    pub async fn submit_json<T>(&self, url: &str, payload: &T, token: Option<&str>) -> Option<Value>
    where
        T: Serialize + ?Sized,
    {
        let response = match self.post(url, token).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("{}", e);
                return None;
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::error!("{} - {}", status.as_u16(), e);
                return None;
            }
        };

        if !status.is_success() {
            log::error!("{} - {}", status.as_u16(), error_message(status, &body));
            return None;
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(json) => {
                log::debug!("{}", json);
                Some(json)
            }
            Err(_) => {
                if body.trim().is_empty() {
                    log::error!("Empty response body");
                } else {
                    log::error!("{}", body);
                }
                None
            }
        }
    }

    /// Uploads `files` as multipart forms of at most [`BATCH_SIZE`] files each.
    ///
    /// Batches are sent strictly one after another; a batch starts only once
    /// the previous one has completed.
    ///
    /// # Returns
    ///
    /// - `SUCCESS` - No batch came back with an empty body
    /// - `FAILURE` - A batch came back with an empty body, whatever its
    ///   status, or a file of the batch could not be read. The remaining
    ///   batches are not sent.
    ///
    /// A batch that fails in transport, or with a non-2xx status and an error
    /// body, is logged as `<status> - <message>` and the upload continues
    /// with the next batch.
    pub async fn submit_files(&self, url: &str, files: &[ImageFile], token: Option<&str>) -> i32 {
        let batches = files.chunks(BATCH_SIZE);
        let total = batches.len();

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for (index, batch) in batches.enumerate() {
            pb.set_message(format!("Uploading batch {}/{}...", index + 1, total));
            log::info!(
                "Uploading batch {}/{} ({} files).",
                index + 1,
                total,
                batch.len()
            );

            let form = match build_form(batch) {
                Ok(form) => form,
                Err(e) => {
                    pb.finish_and_clear();
                    log::error!("Cannot read batch {}/{}: {}", index + 1, total, e);
                    return FAILURE;
                }
            };
            let response = match self.post(url, token).multipart(form).send().await {
                Ok(response) => response,
                Err(e) => {
                    let code = e.status().map(|s| s.as_u16().to_string());
                    log::error!("{} - {}", code.as_deref().unwrap_or("---"), e);
                    pb.inc(batch.len() as u64);
                    continue;
                }
            };

            let status = response.status();
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(e) => {
                    log::error!("{} - {}", status.as_u16(), e);
                    pb.inc(batch.len() as u64);
                    continue;
                }
            };

            if body.is_empty() {
                pb.finish_and_clear();
                log::error!(
                    "{} - Empty response for batch {}/{}",
                    status.as_u16(),
                    index + 1,
                    total
                );
                return FAILURE;
            }

            if !status.is_success() {
                log::error!(
                    "{} - {}",
                    status.as_u16(),
                    error_message(status, &String::from_utf8_lossy(&body))
                );
                pb.inc(batch.len() as u64);
                continue;
            }

            log::debug!("{}", String::from_utf8_lossy(&body));
            pb.inc(batch.len() as u64);
        }

        pb.finish_and_clear();
        SUCCESS
    }
}

fn build_form(batch: &[ImageFile]) -> Res<Form> {
    let mut form = Form::new();
    for image in batch {
        let part = Part::bytes(image.read_all()?)
            .file_name(image.file_name())
            .mime_str(image.format().mime())?;
        form = form.part(FILES_FIELD, part);
    }
    Ok(form)
}

/// Picks a human readable message out of an error response body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "msg", "error"] {
            if let Some(msg) = json.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        body.to_string()
    }
}
