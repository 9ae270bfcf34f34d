//! Structural properties that must hold for any input.

mod common;

use std::fs;
use std::path::Path;

use nevula_syntax::{ParseOptions, add_text_spans, parse_markup, parse_markup_with};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Inputs that have tripped up resolvers before: crossing markers, raw zones
/// holding other delimiters, and line constructs at the edges of the text.
const CORPUS: &[&str] = &[
    "",
    "\n",
    "> ",
    ">",
    "\r\n> a\r\n",
    "****",
    "** **",
    "***a***",
    "//a*b//c*",
    "__~~**//a//**~~__",
    "**a __b** c__",
    "``a **b`` c**",
    "```\n```",
    "``````",
    "[x: ``y]``",
    "[x: [y: z]]",
    "\\",
    "\\\\**a**",
    "[#]",
    "[#f00][#0f0][#00f]",
    "**[#f00]a** b",
    "> [#f00]a\n> b",
    "https://",
    "<https://a>",
    "✨✨✨",
    ":a::b:",
    "> **a\n> b**",
    "\n> a\n> b\n",
    "2 * 3 * 4 *a *b* c*",
    "//https://a.b//c//",
    "*\u{FE0F}\u{20E3}*",
    "中文 **粗体** ~~删除~~",
];

fn fixtures() -> Vec<String> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    files
        .into_iter()
        .map(|path| fs::read_to_string(path).unwrap())
        .collect()
}

fn all_inputs() -> Vec<String> {
    CORPUS
        .iter()
        .map(|s| s.to_string())
        .chain(fixtures())
        .collect()
}

#[rstest]
#[case(ParseOptions::all())]
#[case(ParseOptions::core())]
fn parsed_trees_are_well_formed(#[case] options: ParseOptions) {
    for text in all_inputs() {
        let tree = parse_markup_with(&text, &options);
        common::check(&text, &tree);
        common::check(&text, &add_text_spans(tree));
    }
}

#[test]
fn filled_tree_reconstructs_the_source() {
    for text in all_inputs() {
        let tree = add_text_spans(parse_markup(&text));
        assert_eq!(common::reconstruct(&text, &tree), text, "for {text:?}");
    }
}

#[test]
fn filling_is_idempotent() {
    for text in all_inputs() {
        let once = add_text_spans(parse_markup(&text));
        let twice = add_text_spans(once.clone());
        assert_eq!(once, twice, "for {text:?}");
    }
}

#[test]
fn filled_children_cover_their_parent() {
    for text in all_inputs() {
        let tree = add_text_spans(parse_markup(&text));
        tree.walk(&mut |e| {
            if e.children.is_empty() {
                return;
            }
            let mut cursor = e.inner_span.start;
            for child in &e.children {
                assert_eq!(child.outer_span.start, cursor, "gap in {text:?}");
                cursor = child.outer_span.end;
            }
            assert_eq!(cursor, e.inner_span.end, "gap at end in {text:?}");
        });
    }
}

#[test]
fn parsing_is_deterministic() {
    for text in all_inputs() {
        assert_eq!(parse_markup(&text), parse_markup(&text));
    }
}

#[test]
fn fixture_chat_message_shape() {
    let text = fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/chat_message.txt"),
    )
    .unwrap();
    let tree = parse_markup(&text);
    let kinds: Vec<_> = tree.children.iter().map(|e| e.kind.name()).collect();
    assert_eq!(kinds, vec!["Blockquote", "Bold", "Code", "Strikethrough", "Underline"]);
}
