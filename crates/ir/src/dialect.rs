//! Statement records of the FFTX generator-script language.

use serde::{Deserialize, Serialize};

/// Package loaded and imported by every script.
pub const FFTX_PACKAGE: &str = "fftx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSelection {
    /// `LocalConfig.fftx.defaultConf()`
    Default,
    /// `LocalConfig.fftx.confGPU()`
    Gpu,
}

impl ConfigSelection {
    pub fn accessor(&self) -> &'static str {
        match self {
            ConfigSelection::Default => "defaultConf",
            ConfigSelection::Gpu => "confGPU",
        }
    }
}

/// `TFCall(TRC(MDDFT(ns, k)), rec(fname := name, params := []))` bound in a `let`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformTerm {
    pub dimensions: Vec<usize>,
    pub name: String,
    /// Direction in the generator's own sign convention.
    pub generator_direction: i32,
    pub column_major: bool,
}

impl TransformTerm {
    pub fn dimensions_literal(&self) -> String {
        let dims = self
            .dimensions
            .iter()
            .map(|dim| dim.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}]", dims)
    }

    pub fn operator_expr(&self) -> String {
        let mddft = format!("MDDFT(ns, {})", self.generator_direction);
        if self.column_major {
            format!("TRC(TColMajor({}))", mddft)
        } else {
            format!("TRC({})", mddft)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Load { package: String },
    ImportAll { package: String },
    SelectConfig(ConfigSelection),
    DeclareTransform(TransformTerm),
    FetchOptions,
    SetOption { key: String, value: String },
    TagOptions,
    Generate,
    PrintTo { file_name: String },
    Blank,
}
