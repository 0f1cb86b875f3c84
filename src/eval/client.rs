use std::time::Duration;

use async_trait::async_trait;

use crate::config::{EvaluatorConfig, HttpMethod};
use crate::error::{AppError, AppResult};

use super::types::{EvalRequest, EvalResponse};

/// Remote code evaluation. Implementations return the raw response; the
/// interpreter classifies it.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, request: EvalRequest) -> AppResult<EvalResponse>;

    fn name(&self) -> &str {
        "evaluator"
    }
}

/// Evaluator behind an HTTP endpoint returning JSON.
#[derive(Debug, Clone)]
pub struct HttpEvaluator {
    client: reqwest::Client,
    endpoint: String,
    method: HttpMethod,
    expr_param: String,
}

impl HttpEvaluator {
    pub fn from_config(config: &EvaluatorConfig) -> AppResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(AppError::invalid_argument(
                "evaluator endpoint must not be empty",
            ));
        }

        let mut builder = reqwest::Client::builder();
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|source| AppError::transport("failed to build HTTP client", source))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            method: config.method,
            expr_param: config.expr_param.clone(),
        })
    }
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    async fn evaluate(&self, request: EvalRequest) -> AppResult<EvalResponse> {
        let params = [(self.expr_param.as_str(), request.expr.as_str())];
        let builder = match self.method {
            HttpMethod::Get => self.client.get(&self.endpoint).query(&params),
            HttpMethod::Post => self.client.post(&self.endpoint).form(&params),
        };
        let context = format!("{} {}", self.method.as_str(), self.endpoint);

        tracing::debug!(endpoint = %self.endpoint, bytes = request.expr.len(), "sending evaluation");
        let response = builder
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| AppError::transport(context.clone(), source))?;
        let body = response
            .text()
            .await
            .map_err(|source| AppError::transport(context, source))?;

        serde_json::from_str::<EvalResponse>(&body).map_err(|source| {
            AppError::malformed_response(format!("response is not an evaluation record: {source}"))
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::{Evaluator, HttpEvaluator};
    use crate::config::{EvaluatorConfig, HttpMethod};
    use crate::error::AppError;
    use crate::eval::{EvalRequest, EvalResponse};

    /// Serves one canned response and hands back the raw request head.
    async fn serve_once(body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("listener should have addr");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("client should connect");
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut buf).await.expect("request should read");
                if read == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..read]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("response should write");
            String::from_utf8_lossy(&head).into_owned()
        });
        (format!("http://{addr}/eval.json"), handle)
    }

    fn config(endpoint: String) -> EvaluatorConfig {
        EvaluatorConfig {
            endpoint,
            method: HttpMethod::Get,
            ..EvaluatorConfig::default()
        }
    }

    #[tokio::test]
    async fn get_request_sends_expr_query_and_parses_json() {
        let (endpoint, server) = serve_once(r#"{"error": false, "result": "3"}"#).await;
        let evaluator = HttpEvaluator::from_config(&config(endpoint)).expect("client should build");

        let response = evaluator
            .evaluate(EvalRequest::new("(+ 1 2)"))
            .await
            .expect("evaluation should succeed");

        assert_eq!(response, EvalResponse::value("3"));
        let head = server.await.expect("server task should finish");
        assert!(
            head.starts_with("GET /eval.json?expr=%28%2B+1+2%29 "),
            "unexpected request: {head}"
        );
    }

    #[tokio::test]
    async fn non_json_body_is_malformed_response() {
        let (endpoint, server) = serve_once("<html>oops</html>").await;
        let evaluator = HttpEvaluator::from_config(&config(endpoint)).expect("client should build");

        let err = evaluator
            .evaluate(EvalRequest::new("1"))
            .await
            .expect_err("html body must be rejected");

        assert!(matches!(err, AppError::MalformedResponse(_)));
        let _ = server.await;
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let err = HttpEvaluator::from_config(&config(String::new())).expect_err("must reject");
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }
}
