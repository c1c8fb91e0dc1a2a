use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result as AnyResult};
use clap::{Parser, Subcommand};
use macros_expand::config::ExpansionConfig;
use macros_expand::diagnostic::Diagnostic;
use macros_expand::{ExpansionContext, MacroRegistry, SourceLocation};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// 宏展开演示
#[derive(Debug, Parser)]
#[command(name = "macros-demo", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 展开一段宏调用或带属性宏的声明
    Expand {
        /// 源码，如 `#doubleValue(10)` 或 `@Singleton class Foo {}`
        source: String,
        /// 以 JSON 输出结果或诊断
        #[arg(long)]
        json: bool,
        /// JSON 格式的展开配置文件
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// 列出已注册的宏
    List,
}

const SAMPLES: &[&str] = &[
    "#doubleValue(10)",
    "#doubleValue(\"ten\")",
    r#"#generateStruct("Point", fields: ["x": "Int", "y": "Int"])"#,
    r#"#generateStruct("point", fields: ["x": "Int"])"#,
    "@Singleton\nclass NetworkManager {\n    var retries: Int\n}",
    "@Singleton\nstruct Settings {\n}",
];

#[derive(Debug, Serialize)]
struct Report<'a> {
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expanded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic: Option<Diagnostic>,
}

fn main() -> AnyResult<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Expand {
            source,
            json,
            config,
        }) => {
            let config = match config {
                Some(path) => ExpansionConfig::from_path(&path)
                    .with_context(|| format!("loading expansion config {}", path.display()))?,
                None => ExpansionConfig::default(),
            };
            let context = ExpansionContext::builder()
                .config(config)
                .location(SourceLocation::new("<command line>", 1, 1))
                .build();
            let report = expand(&source, &context);
            print_report(&report, json)?;
            Ok(if report.diagnostic.is_some() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Some(Command::List) => {
            let registry = MacroRegistry::standard();
            for name in registry.names() {
                if let Some(entry) = registry.get(name) {
                    println!("{name:<16} {}", entry.role());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let context = ExpansionContext::default();
            for (i, source) in SAMPLES.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_report(&expand(source, &context), false)?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn expand<'a>(source: &'a str, context: &ExpansionContext) -> Report<'a> {
    match MacroRegistry::standard().expand_source(source, context) {
        Ok(expanded) => Report {
            source,
            expanded: Some(expanded),
            diagnostic: None,
        },
        Err(err) => {
            tracing::debug!(error = %err, "expansion failed");
            Report {
                source,
                expanded: None,
                diagnostic: Some(context.diagnose(&err)),
            }
        }
    }
}

fn print_report(report: &Report<'_>, json: bool) -> AnyResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}", report.source);
    if let Some(expanded) = &report.expanded {
        println!("=>\n{expanded}");
    }
    if let Some(diagnostic) = &report.diagnostic {
        println!("{diagnostic}");
    }
    Ok(())
}
