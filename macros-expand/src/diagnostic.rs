//! 诊断
//!
//! 宿主最终看到的是诊断而不是错误值：稳定的错误种类 + 人类可读消息 + 可选的位置。
//!
use std::fmt;

use serde::Serialize;

use crate::context::SourceLocation;
use crate::error::{ErrorKind, ExpansionError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macro_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    pub fn from_error(error: &ExpansionError, location: Option<SourceLocation>) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            macro_name: error.macro_name().map(str::to_string),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        write!(f, "error[{}]: {}", self.kind, self.message)
    }
}
