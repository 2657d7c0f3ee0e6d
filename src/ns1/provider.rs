use std::time::Duration;

use serde::de::DeserializeOwned;
use snafu::prelude::*;

use crate::common::{
    key_file_or_string, Answer, ConfigSnafu, Error, Provider, ProviderSnafu, RecordHandle,
    RequestSnafu, ResponseSnafu, Result, SearchHit,
};

use super::models::{APIError, AnswerData, RecordData, RecordUpdate, SearchResult};

pub const PROVIDER_NAME: &str = "NS1";

pub struct Ns1 {
    agent: ureq::Agent,
    api_key: String,
    endpoint: String,
    search_limit: usize,
}

impl Ns1 {
    fn with_headers(&self, req: ureq::Request) -> ureq::Request {
        req.set("X-NSONE-Key", &self.api_key)
            .set("Content-Type", "application/json; charset=utf8")
    }

    fn record_url(&self, domain: &str, kind: &str, zone: &str) -> String {
        format!("{}/zones/{zone}/{domain}/{kind}", self.endpoint)
    }

    /// Sends the request, turning non-success statuses into a `ResponseError`
    /// carrying the provider's message.
    fn send(&self, req: ureq::Request, body: Option<RecordUpdate>) -> Result<ureq::Response> {
        let method = req.method().to_string();
        let url = req.url().to_string();

        tracing::debug!(
            url = url.as_str(),
            method = method.as_str(),
            provider = PROVIDER_NAME,
            "Sending request"
        );

        let resp = match body {
            Some(body) => self.with_headers(req).send_json(body),
            None => self.with_headers(req).call(),
        };

        match resp {
            Ok(resp) => Ok(resp),
            Err(ureq::Error::Status(code, resp)) => {
                let message = resp
                    .into_json::<APIError>()
                    .map(|err| err.message)
                    .unwrap_or_else(|_| "no error message".into());
                ResponseSnafu {
                    message: format!("{method} {url} returned {code}: {message}"),
                }
                .fail()
            }
            Err(err) => Err(err).context(RequestSnafu { url, method }),
        }
    }

    fn read_json<T: DeserializeOwned>(resp: ureq::Response) -> Result<T> {
        resp.into_json()
            .boxed_local()
            .context(ProviderSnafu {
                provider: PROVIDER_NAME,
                message: "Failed to deserialize response",
            })
    }
}

impl Provider for Ns1 {
    fn search_zone(&self, query: &str) -> Result<Vec<SearchHit>> {
        let req = self
            .agent
            .get(&format!("{}/search", self.endpoint))
            .query("q", query)
            .query("type", "record")
            .query("max", &self.search_limit.to_string());

        let results: Vec<SearchResult> = Self::read_json(self.send(req, None)?)?;
        let hits: Vec<SearchHit> = results
            .into_iter()
            .filter_map(SearchResult::into_hit)
            .collect();

        tracing::debug!(
            provider = PROVIDER_NAME,
            query,
            hits = hits.len(),
            "Search completed",
        );
        Ok(hits)
    }

    fn load_record(&self, domain: &str, kind: &str, zone: &str) -> Result<RecordHandle> {
        let req = self.agent.get(&self.record_url(domain, kind, zone));
        let record: RecordData = Self::read_json(self.send(req, None)?)?;
        Ok(record.into())
    }

    fn update_record(&self, record: &RecordHandle, answers: Vec<Answer>) -> Result<()> {
        let req = self
            .agent
            .post(&self.record_url(&record.domain, &record.kind, &record.zone));
        let body = RecordUpdate {
            answers: answers.into_iter().map(AnswerData::from).collect(),
        };

        let resp: RecordData = Self::read_json(self.send(req, Some(body))?)?;

        tracing::debug!(
            provider = PROVIDER_NAME,
            domain = resp.domain.as_str(),
            kind = resp.kind.as_str(),
            answers = resp.answers.len(),
            "Updated record",
        );
        Ok(())
    }
}

impl TryFrom<super::Config> for Ns1 {
    type Error = Error;

    fn try_from(value: super::Config) -> Result<Self> {
        let api_key = key_file_or_string(value.api_key, PROVIDER_NAME.into())?;

        let endpoint = url::Url::parse(&value.endpoint).map_err(|err| {
            ConfigSnafu {
                message: format!("Invalid endpoint {}: {err}", value.endpoint),
                prefix: "ns1.endpoint",
            }
            .build()
        })?;

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(value.timeout))
            .build();

        Ok(Self {
            agent,
            api_key,
            endpoint: endpoint.as_str().trim_end_matches('/').to_string(),
            search_limit: value.search_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Starts a mock NS1 API. The server runs on its own thread, so the
    /// blocking client can be called outside the runtime.
    fn mock_api(mocks: Vec<Mock>) -> (tokio::runtime::Runtime, MockServer) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(async {
            let server = MockServer::start().await;
            for mock in mocks {
                mock.mount(&server).await;
            }
            server
        });
        (rt, server)
    }

    fn client(server: &MockServer) -> Ns1 {
        Ns1::try_from(config(&format!("{}/v1", server.uri()))).unwrap()
    }

    fn record_json(answers: &[&str]) -> serde_json::Value {
        json!({
            "domain": "app.example.com",
            "zone": "example.com",
            "type": "A",
            "answers": answers.iter().map(|a| json!({"answer": [a]})).collect::<Vec<_>>(),
        })
    }

    #[test]
    fn search_sends_query_and_keeps_record_hits() {
        let (_rt, server) = mock_api(vec![Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("q", "app.example.com"))
            .and(query_param("type", "record"))
            .and(query_param("max", "10"))
            .and(header("X-NSONE-Key", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"zone": "example.com"},
                {
                    "domain": "app.example.com",
                    "zone": "example.com",
                    "type": "A",
                    "answers": [{"answer": ["1.2.3.4"]}, {"answer": ["5.6.7.8"]}]
                },
                {
                    "domain": "www.app.example.com",
                    "zone": "example.com",
                    "type": "CNAME",
                    "answers": [{"answer": ["app.example.com"]}]
                }
            ])))
            .expect(1)]);

        let hits = client(&server).search_zone("app.example.com").unwrap();

        assert_eq!(
            hits,
            vec![
                SearchHit {
                    domain: "app.example.com".into(),
                    zone: "example.com".into(),
                    kind: "A".into(),
                    answers: vec!["1.2.3.4".into(), "5.6.7.8".into()],
                },
                SearchHit {
                    domain: "www.app.example.com".into(),
                    zone: "example.com".into(),
                    kind: "CNAME".into(),
                    answers: vec!["app.example.com".into()],
                },
            ]
        );
    }

    #[test]
    fn load_then_update_replaces_the_answer_set() {
        let (_rt, server) = mock_api(vec![
            Mock::given(method("GET"))
                .and(path("/v1/zones/example.com/app.example.com/A"))
                .and(header("X-NSONE-Key", "key"))
                .respond_with(ResponseTemplate::new(200).set_body_json(record_json(&["9.9.9.9"])))
                .expect(1),
            Mock::given(method("POST"))
                .and(path("/v1/zones/example.com/app.example.com/A"))
                .and(header("X-NSONE-Key", "key"))
                .and(body_json(json!({
                    "answers": [{"answer": ["1.2.3.4"]}, {"answer": ["5.6.7.8"]}]
                })))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(record_json(&["1.2.3.4", "5.6.7.8"])),
                )
                .expect(1),
        ]);
        let ns1 = client(&server);

        let record = ns1
            .load_record("app.example.com", "A", "example.com")
            .unwrap();
        assert_eq!(record.answers, vec![Answer::from("9.9.9.9")]);

        ns1.update_record(
            &record,
            vec![Answer::from("1.2.3.4"), Answer::from("5.6.7.8")],
        )
        .unwrap();
    }

    #[test]
    fn error_status_carries_the_provider_message() {
        let (_rt, server) = mock_api(vec![Mock::given(method("GET"))
            .and(path("/v1/zones/example.com/gone.example.com/A"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "record not found"})),
            )]);

        let err = client(&server)
            .load_record("gone.example.com", "A", "example.com")
            .unwrap_err();

        match err {
            Error::ResponseError { message } => {
                assert!(message.contains("returned 404"), "{message}");
                assert!(message.contains("record not found"), "{message}");
            }
            other => panic!("expected a response error, got {other:?}"),
        }
    }

    fn config(endpoint: &str) -> super::super::Config {
        super::super::Config {
            api_key: "key".into(),
            endpoint: endpoint.into(),
            timeout: 5,
            search_limit: 10,
        }
    }

    #[test]
    fn record_urls_are_built_from_the_endpoint() {
        let ns1 = Ns1::try_from(config("https://api.nsone.net/v1/")).unwrap();
        assert_eq!(
            ns1.record_url("app.example.com", "A", "example.com"),
            "https://api.nsone.net/v1/zones/example.com/app.example.com/A"
        );
    }

    #[test]
    fn invalid_endpoint_is_a_config_error() {
        let err = Ns1::try_from(config("not a url")).err().unwrap();
        assert!(matches!(err, Error::ConfigError { .. }));
    }
}
