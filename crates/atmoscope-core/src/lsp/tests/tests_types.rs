//! Tests for wire payload decoding and span arithmetic

#![allow(clippy::expect_used)]

use crate::lsp::types::{
    toks_span, AstNode, AstNodeKind, MoNode, MoPrimTypeTag, SemNode, SemVal, SrcPkg, Tok,
    TokKind,
};

#[test]
fn decodes_src_pkgs_payload() {
    let json = r#"[{"DirPath":"/p","Files":[{"FilePath":"/p/a.src"}]}]"#;
    let pkgs: Vec<SrcPkg> = serde_json::from_str(json).expect("decode");
    assert_eq!(pkgs.len(), 1);
    assert_eq!(pkgs[0].dir_path, "/p");
    assert_eq!(pkgs[0].files.len(), 1);
    assert_eq!(pkgs[0].files[0].file_path, "/p/a.src");
}

#[test]
fn decodes_pkg_without_files() {
    let pkgs: Vec<SrcPkg> = serde_json::from_str(r#"[{"DirPath":"/q"}]"#).expect("decode");
    assert!(pkgs[0].files.is_empty());
}

#[test]
fn decodes_tok_payload() {
    let json = r#"[{"Kind":5,"Pos":{"Line":3,"Char":5},"Src":"foo"}]"#;
    let toks: Vec<Tok> = serde_json::from_str(json).expect("decode");
    assert_eq!(toks[0].kind, TokKind::IdentWord);
    assert_eq!(toks[0].pos.line, 3);
    assert_eq!(toks[0].pos.char, 5);
    assert_eq!(toks[0].src, "foo");
}

#[test]
fn rejects_unknown_tok_kind() {
    let json = r#"{"Kind":42,"Pos":{"Line":1,"Char":1},"Src":"x"}"#;
    assert!(serde_json::from_str::<Tok>(json).is_err());
}

#[test]
fn tok_span_is_half_open() {
    // "foo" recorded at line 3 column 5 covers (3,5)..(3,8).
    let tok = Tok {
        kind: TokKind::IdentWord,
        pos: crate::lsp::types::SrcPos { line: 3, char: 5 },
        src: "foo".into(),
    };
    let span = tok.span();
    assert_eq!((span.start.line, span.start.char), (3, 5));
    assert_eq!((span.end.line, span.end.char), (3, 8));
}

#[test]
fn tok_span_follows_newlines() {
    let tok = Tok {
        kind: TokKind::Comment,
        pos: crate::lsp::types::SrcPos { line: 3, char: 5 },
        src: "a\nbc".into(),
    };
    let span = tok.span();
    assert_eq!((span.end.line, span.end.char), (4, 3));
}

#[test]
fn toks_span_covers_first_to_last() {
    let mk = |line, char, src: &str| Tok {
        kind: TokKind::IdentWord,
        pos: crate::lsp::types::SrcPos { line, char },
        src: src.into(),
    };
    let toks = vec![mk(1, 2, "ab"), mk(1, 5, "c"), mk(2, 1, "def")];
    let span = toks_span(&toks).expect("span");
    assert_eq!((span.start.line, span.start.char), (1, 2));
    assert_eq!((span.end.line, span.end.char), (2, 4));

    assert!(toks_span(&[]).is_none());
}

#[test]
fn decodes_ast_payload() {
    let json = r#"[{
        "Kind": 4,
        "Src": "(a b)",
        "Nodes": [
            {"Kind": 2, "Src": "a", "Toks": [{"Kind":5,"Pos":{"Line":1,"Char":2},"Src":"a"}]},
            {"Kind": 0, "Src": "b"}
        ]
    }]"#;
    let nodes: Vec<AstNode> = serde_json::from_str(json).expect("decode");
    assert_eq!(nodes[0].kind, AstNodeKind::Group);
    assert_eq!(nodes[0].nodes.len(), 2);
    assert_eq!(nodes[0].nodes[0].kind, AstNodeKind::Ident);
    assert_eq!(nodes[0].nodes[1].kind, AstNodeKind::Err);
    // Span comes from tokens; the group has none attached here.
    assert!(nodes[0].span().is_none());
    assert!(nodes[0].nodes[0].span().is_some());
}

#[test]
fn decodes_mo_payload() {
    let json = r#"[{
        "PrimTypeTag": 10,
        "ClientInfo": {
            "SrcFilePath": "/p/a.at",
            "SrcFileSpan": {"Start":{"Line":1,"Char":1},"End":{"Line":1,"Char":4}},
            "SrcFileText": "foo"
        },
        "Nodes": [{"PrimTypeTag": 1, "Nodes": []}, {"PrimTypeTag": -1, "Nodes": []}]
    }]"#;
    let nodes: Vec<MoNode> = serde_json::from_str(json).expect("decode");
    assert_eq!(nodes[0].prim_type_tag, MoPrimTypeTag::Call);
    assert_eq!(nodes[0].nodes[0].prim_type_tag, MoPrimTypeTag::Ident);
    assert_eq!(nodes[0].nodes[1].prim_type_tag, MoPrimTypeTag::DictEntry);
    let info = nodes[0].client_info.as_ref().expect("client info");
    assert_eq!(info.src_file_text.as_deref(), Some("foo"));
}

#[test]
fn decodes_sem_scalar_and_call() {
    let json = r#"{
        "Val": {
            "kind": "call",
            "Callee": {"Val": {"kind": "scalar", "Val": "print"}},
            "Args": [
                {"Val": {"kind": "scalar", "Val": 1}, "DefinitelyUnused": true}
            ]
        }
    }"#;
    let node: SemNode = serde_json::from_str(json).expect("decode");
    let SemVal::Call { callee, args } = &node.val else {
        panic!("expected call");
    };
    assert_eq!(callee.val.kind_name(), "scalar");
    assert_eq!(args.len(), 1);
    assert!(args[0].definitely_unused);
    assert!(!node.definitely_unused);
}

#[test]
fn decodes_sem_func_with_external_body() {
    let json = r#"{
        "Val": {"kind": "func", "Params": [{"Val": {"kind": "scalar"}}], "IsMacro": true}
    }"#;
    let node: SemNode = serde_json::from_str(json).expect("decode");
    let SemVal::Func { params, body, is_macro } = &node.val else {
        panic!("expected func");
    };
    assert_eq!(params.len(), 1);
    assert!(body.is_none());
    assert!(is_macro);
}

#[test]
fn decodes_sem_err_own() {
    let json = r#"{
        "ErrOwn": {"Kind": 2, "Code": "E042", "Message": "not in scope"},
        "Val": {"kind": "scalar"}
    }"#;
    let node: SemNode = serde_json::from_str(json).expect("decode");
    let err = node.err_own.expect("err");
    assert_eq!(err.code, "E042");
    assert_eq!(err.message, "not in scope");
}

#[test]
fn numeric_kinds_roundtrip() {
    let json = serde_json::to_string(&TokKind::LitFloat).expect("encode");
    assert_eq!(json, "10");
    let json = serde_json::to_string(&MoPrimTypeTag::DictEntry).expect("encode");
    assert_eq!(json, "-1");
    let back: MoPrimTypeTag = serde_json::from_str("-1").expect("decode");
    assert_eq!(back, MoPrimTypeTag::DictEntry);
}

#[test]
fn span_label_is_one_based_display() {
    let span = crate::lsp::types::SrcFileSpan {
        start: crate::lsp::types::SrcPos { line: 3, char: 5 },
        end: crate::lsp::types::SrcPos { line: 3, char: 8 },
    };
    assert_eq!(span.label(), "L3 C5 - L3 C8");
}
