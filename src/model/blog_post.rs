//! Nested records: a [`BlogPost`] owns its [`Author`] by value.

use serde::Serialize;
use serde_json::Value;

use crate::record::{Decode, Email, FieldPath, Fields, Record, ValidationErrors};

/// The author of a post. `email` must look like `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: String,
    pub email: Email,
}

impl Decode for Author {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::open(input, path)?;
        let name = fields.required("name");
        let email = fields.required("email");
        fields.finish(|| Some(Self { name: name?, email: email? }))
    }
}

impl Record for Author {
    const NAME: &'static str = "Author";
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
    pub author: Author,
}

impl Decode for BlogPost {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::open(input, path)?;
        let title = fields.required("title");
        let content = fields.required("content");
        let author = fields.required("author");
        fields.finish(|| {
            Some(Self {
                title: title?,
                content: content?,
                author: author?,
            })
        })
    }
}

impl Record for BlogPost {
    const NAME: &'static str = "BlogPost";
}
