use crate::common::{Answer, RecordHandle, SearchHit};

#[derive(serde::Deserialize)]
pub(super) struct APIError {
    pub message: String,
}

#[derive(serde::Deserialize, serde::Serialize)]
pub(super) struct AnswerData {
    pub answer: Vec<serde_json::Value>,
}

impl AnswerData {
    /// Renders the rdata fields the way they appear in a zone file.
    fn render(&self) -> String {
        Answer::from(self).rdata.join(" ")
    }
}

impl From<Answer> for AnswerData {
    fn from(value: Answer) -> Self {
        Self {
            answer: value
                .rdata
                .into_iter()
                .map(serde_json::Value::String)
                .collect(),
        }
    }
}

impl From<&AnswerData> for Answer {
    fn from(value: &AnswerData) -> Self {
        Self {
            rdata: value
                .answer
                .iter()
                .map(|field| match field {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        }
    }
}

/// One item of a `/search` response. Zone hits carry no domain or type.
#[derive(serde::Deserialize)]
pub(super) struct SearchResult {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub domain: Option<String>,
    pub zone: Option<String>,
    #[serde(default)]
    pub answers: Vec<AnswerData>,
}

impl SearchResult {
    pub fn into_hit(self) -> Option<SearchHit> {
        Some(SearchHit {
            answers: self.answers.iter().map(AnswerData::render).collect(),
            domain: self.domain?,
            zone: self.zone?,
            kind: self.kind?,
        })
    }
}

#[derive(serde::Deserialize)]
pub(super) struct RecordData {
    #[serde(rename = "type")]
    pub kind: String,
    pub domain: String,
    pub zone: String,
    #[serde(default)]
    pub answers: Vec<AnswerData>,
}

impl From<RecordData> for RecordHandle {
    fn from(value: RecordData) -> Self {
        Self {
            answers: value.answers.iter().map(Answer::from).collect(),
            domain: value.domain,
            zone: value.zone,
            kind: value.kind,
        }
    }
}

#[derive(serde::Serialize)]
pub(super) struct RecordUpdate {
    pub answers: Vec<AnswerData>,
}
