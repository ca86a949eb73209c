use super::{extract_outline, find_documents, parse_outline};
use crate::formats::markdown::MarkdownFormat;
use crate::outline::Outline;
use crate::section::{Block, NodeId};
use std::fs;
use std::io::Write;
use tempfile::tempdir;

const TALK: &str = "\
Intro paragraph.

# One

Body one
spans two lines.

- alpha
  - nested
- beta

## One A

```rust
fn main() {}
```

# Two

Closing words.
";

fn parse(source: &str) -> Outline {
    parse_outline(source, "talk", &MarkdownFormat).unwrap()
}

fn titles(outline: &Outline) -> Vec<(String, Option<usize>)> {
    outline
        .iter()
        .map(|(_, s)| (s.title.clone(), s.level))
        .collect()
}

#[test]
fn test_headings_become_sections() {
    let outline = parse(TALK);

    assert_eq!(
        titles(&outline),
        vec![
            ("talk".to_string(), Some(1)),
            ("One".to_string(), Some(2)),
            ("One A".to_string(), Some(3)),
            ("Two".to_string(), Some(2)),
        ]
    );
    assert_eq!(outline.resolve(&"1.1".parse().unwrap()), Some(NodeId(2)));
    assert_eq!(outline.resolve(&"2".parse().unwrap()), Some(NodeId(3)));
}

#[test]
fn test_leading_text_belongs_to_root() {
    let outline = parse(TALK);
    let root = outline.get(outline.root()).unwrap();

    assert_eq!(
        root.body,
        vec![Block::Paragraph {
            text: "Intro paragraph.".to_string()
        }]
    );
}

#[test]
fn test_section_bodies() {
    let outline = parse(TALK);

    let one = outline.get(NodeId(1)).unwrap();
    assert_eq!(one.body.len(), 2);
    assert_eq!(
        one.body[0],
        Block::Paragraph {
            text: "Body one spans two lines.".to_string()
        }
    );

    let roots = outline.list_roots(NodeId(1));
    let texts: Vec<&str> = roots
        .iter()
        .filter_map(|id| outline.item(*id))
        .map(|item| item.text.as_str())
        .collect();
    assert_eq!(texts, vec!["alpha", "beta"]);

    let alpha = outline.item(roots[0]).unwrap();
    assert_eq!(alpha.children.len(), 1);
    assert_eq!(outline.item(alpha.children[0]).unwrap().text, "nested");

    let one_a = outline.get(NodeId(2)).unwrap();
    assert_eq!(
        one_a.body,
        vec![Block::Code {
            language: Some("rust".to_string()),
            text: "fn main() {}".to_string()
        }]
    );

    let two = outline.get(NodeId(3)).unwrap();
    assert_eq!(
        two.body,
        vec![Block::Paragraph {
            text: "Closing words.".to_string()
        }]
    );
}

#[test]
fn test_skipped_heading_levels_nest_one_deeper() {
    let outline = parse("# Top\n\n### Deep\n\n## Middle\n");

    assert_eq!(
        titles(&outline),
        vec![
            ("talk".to_string(), Some(1)),
            ("Top".to_string(), Some(2)),
            ("Deep".to_string(), Some(3)),
            ("Middle".to_string(), Some(3)),
        ]
    );
    assert_eq!(outline.parent(NodeId(3)), Some(NodeId(1)));
}

#[test]
fn test_document_without_headings() {
    let outline = parse("Just some text.\n");

    assert!(!outline.has_sections());
    assert_eq!(outline.get(outline.root()).unwrap().body.len(), 1);
}

#[test]
fn test_extract_outline_names_root_after_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("keynote.md");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "# Hello\n\nWorld").unwrap();

    let outline = extract_outline(&path, &MarkdownFormat).unwrap();
    assert_eq!(outline.get(outline.root()).unwrap().title, "keynote");
    assert_eq!(outline.get(NodeId(1)).unwrap().title, "Hello");
}

#[test]
fn test_find_documents_walks_directories() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("sub")).unwrap();
    fs::create_dir(root.join(".hidden")).unwrap();
    for name in ["b.md", "a.txt", "sub/c.md", ".hidden/d.md"] {
        fs::write(root.join(name), "# x\n").unwrap();
    }

    let found = find_documents(vec![root.to_path_buf()], &["md".to_string()]).unwrap();
    assert_eq!(found, vec![root.join("b.md"), root.join("sub/c.md")]);

    // files named explicitly are kept whatever their extension
    let explicit = find_documents(vec![root.join("a.txt")], &["md".to_string()]).unwrap();
    assert_eq!(explicit, vec![root.join("a.txt")]);
}

#[test]
fn test_find_documents_missing_path() {
    let dir = tempdir().unwrap();
    let err = find_documents(vec![dir.path().join("nope.md")], &["md".to_string()]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn test_setext_headings_become_sections() {
    let outline = parse(
        "Title\n=====\n\nIntro body.\n\nPart\n----\n\nPart body.\n\n# A\n\nA body\n",
    );

    assert_eq!(
        titles(&outline),
        vec![
            ("talk".to_string(), Some(1)),
            ("Title".to_string(), Some(2)),
            ("Part".to_string(), Some(3)),
            ("A".to_string(), Some(2)),
        ]
    );
    assert!(outline.get(outline.root()).unwrap().body.is_empty());
    assert_eq!(
        outline.get(NodeId(1)).unwrap().body,
        vec![Block::Paragraph {
            text: "Intro body.".to_string()
        }]
    );
    assert_eq!(
        outline.get(NodeId(2)).unwrap().body,
        vec![Block::Paragraph {
            text: "Part body.".to_string()
        }]
    );
    assert_eq!(outline.resolve(&"1.1".parse().unwrap()), Some(NodeId(2)));
}

#[test]
fn test_quoted_heading_stays_in_the_quote() {
    let outline = parse("# A\n\n> # Quoted\n> quoted body\n\nafter quote\n\n# B\n");

    assert_eq!(
        titles(&outline),
        vec![
            ("talk".to_string(), Some(1)),
            ("A".to_string(), Some(2)),
            ("B".to_string(), Some(2)),
        ]
    );
    assert_eq!(
        outline.get(NodeId(1)).unwrap().body,
        vec![
            Block::Quote {
                text: "Quoted quoted body".to_string()
            },
            Block::Paragraph {
                text: "after quote".to_string()
            },
        ]
    );
}

#[test]
fn test_list_item_keeps_following_blocks() {
    let outline = parse(
        "# A\n\n- item one\n\n  second para of item\n\n  ```\n  code\n  ```\n- item two\n",
    );

    let roots = outline.list_roots(NodeId(1));
    assert_eq!(roots.len(), 2);

    let one = outline.item(roots[0]).unwrap();
    assert_eq!(one.text, "item one");
    assert_eq!(one.detail.len(), 2);
    assert_eq!(
        one.detail[0],
        Block::Paragraph {
            text: "second para of item".to_string()
        }
    );
    match &one.detail[1] {
        Block::Code { language, text } => {
            assert_eq!(*language, None);
            assert_eq!(text.trim(), "code");
        }
        other => panic!("expected code, got {other:?}"),
    }

    let two = outline.item(roots[1]).unwrap();
    assert_eq!(two.text, "item two");
    assert!(two.detail.is_empty());
}

#[test]
fn test_indented_code_is_code() {
    let outline = parse("# A\n\nText.\n\n    let x = 1;\n    let y = 2;\n\nAfter.\n");

    assert_eq!(
        outline.get(NodeId(1)).unwrap().body,
        vec![
            Block::Paragraph {
                text: "Text.".to_string()
            },
            Block::Code {
                language: None,
                text: "let x = 1;\nlet y = 2;".to_string()
            },
            Block::Paragraph {
                text: "After.".to_string()
            },
        ]
    );
}
