use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 同时处理的文档数量
    pub max_concurrent_documents: usize,
    /// 待导入文档所在目录
    pub input_folder: String,
    /// 导入结果（JSON）输出目录
    pub output_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// tracing 过滤规则，如 `info` 或 `quiz_ingest=debug`
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 8,
            input_folder: "input_docs".to_string(),
            output_folder: "output_json".to_string(),
            verbose_logging: false,
            output_log_file: "ingest_log.txt".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// 以默认值为基础读取环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().overlay_env()
    }

    /// 从 TOML 文件读取，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 完整加载：`QUIZ_CONFIG` 指定的文件（如果有），再由环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("QUIZ_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        base.overlay_env()
    }

    fn overlay_env(self) -> Result<Self, ConfigError> {
        Ok(Self {
            max_concurrent_documents: env_parse(
                "QUIZ_MAX_CONCURRENT_DOCUMENTS",
                self.max_concurrent_documents,
            )?
            .max(1),
            input_folder: std::env::var("QUIZ_INPUT_FOLDER").unwrap_or(self.input_folder),
            output_folder: std::env::var("QUIZ_OUTPUT_FOLDER").unwrap_or(self.output_folder),
            verbose_logging: env_parse("QUIZ_VERBOSE_LOGGING", self.verbose_logging)?,
            output_log_file: std::env::var("QUIZ_OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            log_filter: std::env::var("QUIZ_LOG_FILTER").unwrap_or(self.log_filter),
        })
    }
}

fn env_parse<T: std::str::FromStr>(var_name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: std::any::type_name::<T>().to_string(),
            }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            max_concurrent_documents = 2
            input_folder = "uploads"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_concurrent_documents, 2);
        assert_eq!(config.input_folder, "uploads");
        assert_eq!(config.output_folder, Config::default().output_folder);
        assert!(!config.verbose_logging);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml_str("max_concurrent_documents = \"many\"").is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = Config::from_toml_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }

    #[test]
    fn env_parse_falls_back_to_default() {
        let value: usize = env_parse("QUIZ_TEST_UNSET_VARIABLE_FOR_CONFIG", 5).unwrap();
        assert_eq!(value, 5);
    }
}
