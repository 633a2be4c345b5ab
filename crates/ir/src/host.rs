//! Host-side C/CUDA wrapper around accelerator entry points.
//!
//! The accelerator compiler emits `init_<name>_cu`, `<name>_cu` and
//! `destroy_<name>_cu` under C++ linkage. The wrapper re-exports each one
//! as an unmangled `extern "C"` symbol without the `_cu` suffix so the
//! artifact loader can resolve them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io;

pub const ACCELERATOR_SUFFIX: &str = "_cu";
pub const DEVICE_ERROR_CHECK: &str = "checkCudaErrors(cudaGetLastError());";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryPointKind {
    Init,
    Execute,
    Destroy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub kind: EntryPointKind,
    /// Exported, unmangled symbol.
    pub symbol: String,
    /// Accelerator symbol the export forwards to.
    pub target: String,
}

impl EntryPoint {
    fn new(kind: EntryPointKind, name: &str) -> Self {
        let symbol = match kind {
            EntryPointKind::Init => format!("init_{}", name),
            EntryPointKind::Execute => name.to_string(),
            EntryPointKind::Destroy => format!("destroy_{}", name),
        };
        let target = format!("{}{}", symbol, ACCELERATOR_SUFFIX);
        Self {
            kind,
            symbol,
            target,
        }
    }

    fn parameters(&self, scalar: &str) -> String {
        match self.kind {
            EntryPointKind::Execute => format!("{}  *Y, {}  *X", scalar, scalar),
            EntryPointKind::Init | EntryPointKind::Destroy => String::new(),
        }
    }

    fn arguments(&self) -> &'static str {
        match self.kind {
            EntryPointKind::Execute => "Y, X",
            EntryPointKind::Init | EntryPointKind::Destroy => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostWrapper {
    pub generated_by: String,
    pub name: String,
    /// `double` or `float`.
    pub scalar: String,
}

impl HostWrapper {
    pub fn new<G: Into<String>, N: Into<String>, S: Into<String>>(
        generated_by: G,
        name: N,
        scalar: S,
    ) -> Self {
        Self {
            generated_by: generated_by.into(),
            name: name.into(),
            scalar: scalar.into(),
        }
    }

    pub fn entry_points(&self) -> [EntryPoint; 3] {
        [
            EntryPoint::new(EntryPointKind::Init, &self.name),
            EntryPoint::new(EntryPointKind::Execute, &self.name),
            EntryPoint::new(EntryPointKind::Destroy, &self.name),
        ]
    }

    pub fn to_text(&self) -> String {
        let entry_points = self.entry_points();
        let mut text = String::new();

        text.push_str("/*\n");
        let _ = writeln!(
            text,
            " * Host-to-Device C/CUDA Wrapper generated by {}",
            self.generated_by
        );
        text.push_str(" */\n\n");
        text.push_str("#include <helper_cuda.h> \n\n");

        for (index, entry) in entry_points.iter().enumerate() {
            let _ = writeln!(
                text,
                "extern void {}({});",
                entry.target,
                entry.parameters(&self.scalar)
            );
            if index + 1 == entry_points.len() {
                text.push('\n');
            }
        }

        text.push_str("extern \"C\" { \n\n");
        for entry in &entry_points {
            let params = entry.parameters(&self.scalar);
            match entry.kind {
                EntryPointKind::Init => {
                    let _ = writeln!(text, "void {}({}){{", entry.symbol, params);
                }
                EntryPointKind::Execute | EntryPointKind::Destroy => {
                    let _ = writeln!(text, "void {}({}) {{", entry.symbol, params);
                }
            }
            let _ = writeln!(text, "    {}({});", entry.target, entry.arguments());
            if entry.kind == EntryPointKind::Execute {
                let _ = writeln!(text, "    {}", DEVICE_ERROR_CHECK);
            }
            text.push_str("} \n\n");
        }
        text.push_str("}\n");
        text
    }

    pub fn write_to<W: io::Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        sink.write_all(self.to_text().as_bytes())?;
        Ok(())
    }
}
