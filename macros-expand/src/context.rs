use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::config::ExpansionConfig;
use crate::diagnostic::Diagnostic;
use crate::error::ExpansionError;

/// 展开上下文（Expansion Context）
///
/// 由宿主为每个调用点提供，展开器只读：
/// - 展开配置（`ExpansionConfig`）：字段类型策略、单例访问器参数等；
/// - 调用点位置（`SourceLocation`，可选）：用于把错误转换为带位置的诊断。
///
/// 典型用法：
/// ```rust
/// use macros_expand::context::{ExpansionContext, SourceLocation};
///
/// let ctx = ExpansionContext::builder()
///     .location(SourceLocation::new("main.swift", 3, 9))
///     .build();
/// assert_eq!(ctx.location().map(|l| l.to_string()).as_deref(), Some("main.swift:3:9"));
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct ExpansionContext {
    #[builder(default)]
    config: ExpansionConfig,
    location: Option<SourceLocation>,
}

impl ExpansionContext {
    pub fn with_config(config: ExpansionConfig) -> Self {
        Self {
            config,
            location: None,
        }
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// 把展开错误转换为带调用点位置的诊断
    pub fn diagnose(&self, error: &ExpansionError) -> Diagnostic {
        Diagnostic::from_error(error, self.location.clone())
    }
}

/// 调用点位置（1 起始的行列号）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
