use serde::Serialize;

/// Body of `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub text: &'a str,
}
