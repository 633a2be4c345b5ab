//! Generator-script builder and serializer.

use crate::dialect::{ConfigSelection, Statement, TransformTerm, FFTX_PACKAGE};
use anyhow::Result;
use std::fmt::Write as _;
use std::io;
use tracing::debug;

#[derive(Debug, Default, Clone)]
pub struct ScriptBuilder {
    statements: Vec<Statement>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn push(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn load_fftx(self) -> Self {
        self.push(Statement::Load {
            package: FFTX_PACKAGE.to_string(),
        })
        .push(Statement::ImportAll {
            package: FFTX_PACKAGE.to_string(),
        })
    }

    pub fn select_config(self, selection: ConfigSelection) -> Self {
        self.push(Statement::SelectConfig(selection))
    }

    pub fn declare_transform(self, term: TransformTerm) -> Self {
        self.push(Statement::DeclareTransform(term))
    }

    pub fn fetch_options(self) -> Self {
        self.push(Statement::FetchOptions)
    }

    pub fn set_option<K: Into<String>, V: Into<String>>(self, key: K, value: V) -> Self {
        self.push(Statement::SetOption {
            key: key.into(),
            value: value.into(),
        })
    }

    pub fn tag_options(self) -> Self {
        self.push(Statement::TagOptions)
    }

    pub fn generate(self) -> Self {
        self.push(Statement::Generate)
    }

    pub fn print_to<F: Into<String>>(self, file_name: F) -> Self {
        self.push(Statement::PrintTo {
            file_name: file_name.into(),
        })
    }

    pub fn blank(self) -> Self {
        self.push(Statement::Blank)
    }

    pub fn build(self) -> GeneratorScript {
        GeneratorScript {
            statements: self.statements,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorScript {
    pub statements: Vec<Statement>,
}

impl GeneratorScript {
    pub fn builder() -> ScriptBuilder {
        ScriptBuilder::new()
    }

    pub fn transform(&self) -> Option<&TransformTerm> {
        self.statements.iter().find_map(|statement| match statement {
            Statement::DeclareTransform(term) => Some(term),
            _ => None,
        })
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for statement in &self.statements {
            emit_statement(&mut text, statement);
        }
        text
    }

    pub fn write_to<W: io::Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        let text = self.to_text();
        sink.write_all(text.as_bytes())?;
        debug!(
            statements = self.statements.len(),
            bytes = text.len(),
            "wrote generator script"
        );
        Ok(())
    }
}

fn emit_statement(text: &mut String, statement: &Statement) {
    let _ = match statement {
        Statement::Load { package } => writeln!(text, "Load({});", package),
        Statement::ImportAll { package } => writeln!(text, "ImportAll({});", package),
        Statement::SelectConfig(selection) => writeln!(
            text,
            "conf := LocalConfig.{}.{}();",
            FFTX_PACKAGE,
            selection.accessor()
        ),
        Statement::DeclareTransform(term) => emit_transform(text, term),
        Statement::FetchOptions => writeln!(text, "opts := conf.getOpts(t);"),
        Statement::SetOption { key, value } => writeln!(text, "opts.{} := \"{}\";", key, value),
        Statement::TagOptions => writeln!(text, "tt := opts.tagIt(t);"),
        Statement::Generate => writeln!(text, "c := opts.fftxGen(tt);"),
        Statement::PrintTo { file_name } => writeln!(
            text,
            "PrintTo(\"{}\", opts.prettyPrint(c));",
            file_name
        ),
        Statement::Blank => writeln!(text),
    };
}

fn emit_transform(text: &mut String, term: &TransformTerm) -> std::fmt::Result {
    writeln!(text, "t := let(ns := {},", term.dimensions_literal())?;
    writeln!(text, "    name := \"{}\",", term.name)?;
    writeln!(
        text,
        "    TFCall({}, rec(fname := name, params := []))",
        term.operator_expr()
    )?;
    writeln!(text, ");")
}
