use crate::outline::{ListEntry, Outline, OutlineBuilder};

/// Root plus two sections of two subsections each.
///
/// ```text
/// #0 Talk
/// ├── #1 Section 1        (1)
/// │   ├── #2 Section 1.1  (1.1)
/// │   └── #3 Section 1.2  (1.2)
/// └── #4 Section 2        (2)
///     ├── #5 Section 2.1  (2.1)
///     └── #6 Section 2.2  (2.2)
/// ```
pub(crate) fn binary_outline() -> Outline {
    let mut builder = OutlineBuilder::new("Talk");
    let root = builder.root();
    builder.paragraph(root, "Welcome");

    for i in 1..=2 {
        let section = builder.section(root, format!("Section {i}")).unwrap();
        builder.paragraph(section, format!("Body {i}"));
        for j in 1..=2 {
            let sub = builder.section(section, format!("Section {i}.{j}")).unwrap();
            builder.paragraph(sub, format!("Body {i}.{j}"));
        }
    }

    builder.build()
}

/// Root with an agenda slide holding a nested list, and a closing slide.
///
/// ```text
/// #0 Deck
/// ├── #1 Agenda   items: 0 one ─┬─ 1 one-a
/// │                             └─ 2 one-b
/// │                      3 two
/// │                      4 three
/// └── #2 Close
/// ```
pub(crate) fn listed_outline() -> Outline {
    let mut builder = OutlineBuilder::new("Deck");
    let root = builder.root();

    let agenda = builder.section(root, "Agenda").unwrap();
    builder.paragraph(agenda, "Today we cover:");
    builder.list(
        agenda,
        vec![
            ListEntry::nested(
                "one",
                vec![ListEntry::leaf("one-a"), ListEntry::leaf("one-b")],
            ),
            ListEntry::leaf("two"),
            ListEntry::leaf("three"),
        ],
    );

    let close = builder.section(root, "Close").unwrap();
    builder.paragraph(close, "Thanks");

    builder.build()
}
