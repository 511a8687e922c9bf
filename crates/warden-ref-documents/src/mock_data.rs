//! Simulated document library for the reference runtime.
//!
//! All data in this module is hardcoded and fictional.

use serde::{Deserialize, Serialize};

use warden_core::DocumentInput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub owner_id: String,
    pub is_public: bool,
}

impl MockDocument {
    /// The title and body as handed to a content generator.
    pub fn to_input(&self) -> DocumentInput {
        DocumentInput {
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

fn doc(id: &str, title: &str, content: &str, owner_id: &str, is_public: bool) -> MockDocument {
    MockDocument {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        owner_id: owner_id.to_string(),
        is_public,
    }
}

pub fn documents() -> Vec<MockDocument> {
    vec![
        doc(
            "1",
            "Getting Started Guide",
            "This is a guide to help you get started with our document management system.",
            "admin-id",
            true,
        ),
        doc(
            "2",
            "Security Policy",
            "This document outlines our security policies and procedures.",
            "admin-id",
            false,
        ),
        doc(
            "3",
            "User Manual",
            "A comprehensive guide for users of our system.",
            "user-id",
            true,
        ),
    ]
}

pub fn get_document(id: &str) -> Option<MockDocument> {
    documents().into_iter().find(|d| d.id == id)
}
