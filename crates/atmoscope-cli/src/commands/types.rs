//! Command types shared between main and library

use atmoscope_core::tree::AdapterKind;
use clap::ValueEnum;

/// Pipeline stage selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    /// Source packages and their files
    Pkgs,
    /// Lexemes of one file
    Toks,
    /// Parse tree of one file
    Ast,
    /// Lowered representation of the containing package
    Mo,
    /// Analyzed semantic tree of the containing package
    Sem,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pkgs => "pkgs",
            Self::Toks => "toks",
            Self::Ast => "ast",
            Self::Mo => "mo",
            Self::Sem => "sem",
        };
        write!(f, "{s}")
    }
}

impl From<Stage> for AdapterKind {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Pkgs => AdapterKind::Pkgs,
            Stage::Toks => AdapterKind::Toks,
            Stage::Ast => AdapterKind::Ast,
            Stage::Mo => AdapterKind::Mo,
            Stage::Sem => AdapterKind::Sem,
        }
    }
}
