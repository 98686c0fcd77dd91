//! Wire payload types for the server's custom commands
//!
//! Field names and tag values follow the JSON the Atmo server emits, so
//! these types deserialize its `workspace/executeCommand` results
//! directly. Numeric tags come across as plain integers and are decoded
//! through `TryFrom<i64>`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Raised when a payload carries a tag value outside the known set.
#[derive(Debug, Error)]
#[error("unknown {what} tag: {value}")]
pub struct UnknownTag {
    pub what: &'static str,
    pub value: i64,
}

/// A 1-based line/column position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcPos {
    #[serde(rename = "Line")]
    pub line: u32,
    #[serde(rename = "Char")]
    pub char: u32,
}

/// A half-open span between two positions in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcFileSpan {
    #[serde(rename = "Start")]
    pub start: SrcPos,
    #[serde(rename = "End")]
    pub end: SrcPos,
}

impl SrcFileSpan {
    /// Human-readable form used in tree labels: `L1 C2 - L3 C4`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "L{} C{} - L{} C{}",
            self.start.line, self.start.char, self.end.line, self.end.char
        )
    }
}

// ============================================================================
// Source packages
// ============================================================================

/// An in-session source package reported by `getSrcPkgs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrcPkg {
    #[serde(rename = "DirPath")]
    pub dir_path: String,
    #[serde(rename = "Files", default)]
    pub files: Vec<SrcFile>,
}

/// A source file belonging to a package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrcFile {
    #[serde(rename = "FilePath")]
    pub file_path: String,
}

// ============================================================================
// Lexical tokens
// ============================================================================

/// Lexeme kind, as tagged by the server's tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokKind {
    Begin = 1,
    End = 2,
    Comment = 3,
    Brace = 4,
    IdentWord = 5,
    IdentOpish = 6,
    LitRune = 7,
    LitStr = 8,
    LitInt = 9,
    LitFloat = 10,
}

impl TryFrom<i64> for TokKind {
    type Error = UnknownTag;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Begin,
            2 => Self::End,
            3 => Self::Comment,
            4 => Self::Brace,
            5 => Self::IdentWord,
            6 => Self::IdentOpish,
            7 => Self::LitRune,
            8 => Self::LitStr,
            9 => Self::LitInt,
            10 => Self::LitFloat,
            _ => return Err(UnknownTag { what: "token kind", value }),
        })
    }
}

impl<'de> Deserialize<'de> for TokKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::try_from(i64::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}

impl Serialize for TokKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*self as i64)
    }
}

impl std::fmt::Display for TokKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Begin => "Begin",
            Self::End => "End",
            Self::Comment => "Comment",
            Self::Brace => "Brace",
            Self::IdentWord => "IdentWord",
            Self::IdentOpish => "IdentOpish",
            Self::LitRune => "LitRune",
            Self::LitStr => "LitStr",
            Self::LitInt => "LitInt",
            Self::LitFloat => "LitFloat",
        };
        write!(f, "{s}")
    }
}

/// One lexeme of a source file, reported by `getSrcFileToks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tok {
    #[serde(rename = "Kind")]
    pub kind: TokKind,
    #[serde(rename = "Pos")]
    pub pos: SrcPos,
    #[serde(rename = "Src", default)]
    pub src: String,
}

impl Tok {
    /// The half-open span this token covers, derived by walking its source
    /// text from the recorded start position. Newlines advance the line
    /// and reset the column to 1.
    #[must_use]
    pub fn span(&self) -> SrcFileSpan {
        let start = self.pos;
        let mut line = start.line;
        let mut char = start.char;
        for ch in self.src.chars() {
            if ch == '\n' {
                line += 1;
                char = 1;
            } else {
                char += 1;
            }
        }
        SrcFileSpan { start, end: SrcPos { line, char } }
    }
}

/// The span covering a run of tokens: first token's start to last token's
/// end. Returns None for an empty run.
#[must_use]
pub fn toks_span(toks: &[Tok]) -> Option<SrcFileSpan> {
    let first = toks.first()?;
    let last = toks.last()?;
    Some(SrcFileSpan {
        start: first.span().start,
        end: last.span().end,
    })
}

// ============================================================================
// Parse tree
// ============================================================================

/// Parse-tree node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstNodeKind {
    Err = 0,
    Comment = 1,
    Ident = 2,
    Lit = 3,
    Group = 4,
}

impl TryFrom<i64> for AstNodeKind {
    type Error = UnknownTag;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Err,
            1 => Self::Comment,
            2 => Self::Ident,
            3 => Self::Lit,
            4 => Self::Group,
            _ => return Err(UnknownTag { what: "parse node kind", value }),
        })
    }
}

impl<'de> Deserialize<'de> for AstNodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::try_from(i64::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}

impl Serialize for AstNodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*self as i64)
    }
}

impl std::fmt::Display for AstNodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Err => "Err",
            Self::Comment => "Comment",
            Self::Ident => "Ident",
            Self::Lit => "Lit",
            Self::Group => "Group",
        };
        write!(f, "{s}")
    }
}

/// One node of the parse tree, reported by `getSrcFileAst`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstNode {
    #[serde(rename = "Kind")]
    pub kind: AstNodeKind,
    #[serde(rename = "Nodes", default)]
    pub nodes: Vec<AstNode>,
    #[serde(rename = "Toks", default)]
    pub toks: Vec<Tok>,
    #[serde(rename = "Src", default)]
    pub src: String,
    #[serde(rename = "Lit", default)]
    pub lit: Option<serde_json::Value>,
}

impl AstNode {
    /// The source span this node covers, when it carries tokens.
    #[must_use]
    pub fn span(&self) -> Option<SrcFileSpan> {
        toks_span(&self.toks)
    }
}

// ============================================================================
// Intermediate representation
// ============================================================================

/// Primitive-type tag of an intermediate-representation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoPrimTypeTag {
    DictEntry = -1,
    Type = 0,
    Ident = 1,
    NumInt = 2,
    NumUint = 3,
    NumFloat = 4,
    Char = 5,
    Str = 6,
    Err = 7,
    Dict = 8,
    List = 9,
    Call = 10,
    Func = 11,
}

impl TryFrom<i64> for MoPrimTypeTag {
    type Error = UnknownTag;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ok(match value {
            -1 => Self::DictEntry,
            0 => Self::Type,
            1 => Self::Ident,
            2 => Self::NumInt,
            3 => Self::NumUint,
            4 => Self::NumFloat,
            5 => Self::Char,
            6 => Self::Str,
            7 => Self::Err,
            8 => Self::Dict,
            9 => Self::List,
            10 => Self::Call,
            11 => Self::Func,
            _ => return Err(UnknownTag { what: "prim type tag", value }),
        })
    }
}

impl<'de> Deserialize<'de> for MoPrimTypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::try_from(i64::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}

impl Serialize for MoPrimTypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*self as i64)
    }
}

impl std::fmt::Display for MoPrimTypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::DictEntry => "DictEntry",
            Self::Type => "Type",
            Self::Ident => "Ident",
            Self::NumInt => "NumInt",
            Self::NumUint => "NumUint",
            Self::NumFloat => "NumFloat",
            Self::Char => "Char",
            Self::Str => "Str",
            Self::Err => "Err",
            Self::Dict => "Dict",
            Self::List => "List",
            Self::Call => "Call",
            Self::Func => "Func",
        };
        write!(f, "{s}")
    }
}

/// Source provenance attached by the server for display purposes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInfo {
    #[serde(rename = "SrcFilePath", default)]
    pub src_file_path: Option<String>,
    #[serde(rename = "SrcFileSpan", default)]
    pub src_file_span: Option<SrcFileSpan>,
    #[serde(rename = "SrcFileText", default)]
    pub src_file_text: Option<String>,
}

/// One node of the lowered representation, reported by `getSrcPkgMo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoNode {
    #[serde(rename = "PrimTypeTag")]
    pub prim_type_tag: MoPrimTypeTag,
    #[serde(rename = "ClientInfo", default)]
    pub client_info: Option<ClientInfo>,
    #[serde(rename = "Nodes", default)]
    pub nodes: Vec<MoNode>,
}

// ============================================================================
// Semantic tree
// ============================================================================

/// An error recorded on a semantic node by the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemErr {
    #[serde(rename = "Kind", default)]
    pub kind: i64,
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

/// One node of the analyzed tree, reported by `getSrcPackMoSem`.
///
/// Children depend on the value kind; see [`SemVal`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemNode {
    #[serde(rename = "ErrOwn", default)]
    pub err_own: Option<SemErr>,
    #[serde(rename = "ClientInfo", default)]
    pub client_info: Option<ClientInfo>,
    #[serde(rename = "Val")]
    pub val: SemVal,
    #[serde(rename = "DefinitelyUnused", default)]
    pub definitely_unused: bool,
}

/// The value variant of a semantic node, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SemVal {
    Scalar {
        #[serde(rename = "Val", default)]
        val: Option<serde_json::Value>,
    },
    Call {
        #[serde(rename = "Callee")]
        callee: Box<SemNode>,
        #[serde(rename = "Args", default)]
        args: Vec<SemNode>,
    },
    List {
        #[serde(rename = "Items", default)]
        items: Vec<SemNode>,
    },
    Dict {
        #[serde(rename = "Keys", default)]
        keys: Vec<SemNode>,
        #[serde(rename = "Vals", default)]
        vals: Vec<SemNode>,
    },
    Func {
        #[serde(rename = "Params", default)]
        params: Vec<SemNode>,
        /// Absent when the function body is external to the session.
        #[serde(rename = "Body", default)]
        body: Option<Box<SemNode>>,
        #[serde(rename = "IsMacro", default)]
        is_macro: bool,
    },
}

impl SemVal {
    /// The tag string as the server spells it.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar { .. } => "scalar",
            Self::Call { .. } => "call",
            Self::List { .. } => "list",
            Self::Dict { .. } => "dict",
            Self::Func { .. } => "func",
        }
    }
}
