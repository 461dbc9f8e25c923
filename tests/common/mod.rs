//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use contract_analyzer::config::Config;
use contract_analyzer::error::{ContractAnalyzerError, Result};
use contract_analyzer::llm::{CompletionClient, CompletionRequest, ContractAnalyzer};
use contract_analyzer::session::{Session, SessionContext};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::sync::Mutex;

/// Build a PDF with one text line per page.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Completion client that records every request and answers with a canned reply.
pub struct RecordingClient {
    reply: std::result::Result<String, String>,
    requests: Mutex<Vec<(String, CompletionRequest)>>,
}

impl RecordingClient {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, CompletionRequest)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for RecordingClient {
    async fn complete(&self, api_key: &str, request: &CompletionRequest) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((api_key.to_string(), request.clone()));
        self.reply
            .clone()
            .map_err(ContractAnalyzerError::Network)
    }
}

pub fn session_with(client: RecordingClient, api_key: Option<&str>) -> Session<RecordingClient> {
    let analyzer = ContractAnalyzer::new(client, &Config::default().completion);
    Session::with_context(analyzer, SessionContext::with_api_key(api_key.map(str::to_string)))
}
