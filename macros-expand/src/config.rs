//! 展开配置
//!
//! 所有字段都有默认值（与宿主默认行为一致），JSON 中缺省的字段按默认值补齐。
//!
//! ```
//! use macros_expand::config::{ExpansionConfig, FieldTypePolicy};
//!
//! let cfg = ExpansionConfig::from_json_str(r#"{ "field_types": "descriptor" }"#).unwrap();
//! assert_eq!(cfg.field_types, FieldTypePolicy::Descriptor);
//! assert_eq!(cfg.singleton.accessor_name, "shared");
//! ```
//!
use std::path::{Path, PathBuf};

use macros_syntax::type_descriptor::is_identifier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// `#generateStruct` 字段类型的处理方式
    pub field_types: FieldTypePolicy,
    /// `@Singleton` 的生成参数
    pub singleton: SingletonConfig,
}

/// 字段类型策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTypePolicy {
    /// 原样使用提取到的类型字符串
    #[default]
    Raw,
    /// 按类型描述文法校验，并以规范形式输出
    Descriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingletonConfig {
    /// 静态访问器名
    pub accessor_name: String,
    /// 访问器上的执行上下文属性；为空则不加
    pub executor_attribute: Option<String>,
    /// 已存在同名成员时跳过生成（幂等保护）
    pub skip_existing: bool,
}

impl Default for SingletonConfig {
    fn default() -> Self {
        Self {
            accessor_name: "shared".to_string(),
            executor_attribute: Some("MainActor".to_string()),
            skip_existing: false,
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {field} must be an identifier, found {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },
}

impl ExpansionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// 校验会被拼进生成源码的名字
    pub fn validate(&self) -> Result<(), ConfigError> {
        let singleton = &self.singleton;
        ensure_identifier("singleton.accessor_name", &singleton.accessor_name)?;
        if let Some(attribute) = &singleton.executor_attribute {
            ensure_identifier("singleton.executor_attribute", attribute)?;
        }
        Ok(())
    }
}

fn ensure_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            field,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ExpansionConfig::from_json_str("{}").unwrap(), ExpansionConfig::default());
    }

    #[test]
    fn executor_attribute_can_be_disabled() {
        let cfg = ExpansionConfig::from_json_str(
            r#"{ "singleton": { "executor_attribute": null, "skip_existing": true } }"#,
        )
        .unwrap();
        assert_eq!(cfg.singleton.executor_attribute, None);
        assert!(cfg.singleton.skip_existing);
        assert_eq!(cfg.singleton.accessor_name, "shared");
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(matches!(
            ExpansionConfig::from_json_str(r#"{ "field_types": "strict" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn non_identifier_names_are_rejected() {
        for accessor in ["", "1x", "shared instance", "shared()"] {
            let json = format!(r#"{{ "singleton": {{ "accessor_name": {accessor:?} }} }}"#);
            let err = ExpansionConfig::from_json_str(&json).unwrap_err();
            assert!(
                matches!(
                    &err,
                    ConfigError::InvalidIdentifier { field: "singleton.accessor_name", value } if value == accessor
                ),
                "{err}"
            );
        }

        let err = ExpansionConfig::from_json_str(
            r#"{ "singleton": { "executor_attribute": "@MainActor" } }"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"invalid config: singleton.executor_attribute must be an identifier, found "@MainActor""#
        );

        let cfg = ExpansionConfig::from_json_str(r#"{ "singleton": { "accessor_name": "_instance2" } }"#)
            .unwrap();
        assert_eq!(cfg.singleton.accessor_name, "_instance2");
        assert!(ExpansionConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ExpansionConfig::from_path("/nonexistent/macros.json").unwrap_err();
        assert!(err.to_string().starts_with("read config /nonexistent/macros.json"));
    }
}
