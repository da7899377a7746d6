use lesson_markup_engine::{FormatCommand, RenderNode, apply_format, render};
use lesson_markup_syntax::{Align, ParagraphAttrs, Token, serialize, tokenize};
use pretty_assertions::assert_eq;
use rstest::rstest;

const INPUTS: &[&str] = &[
    "",
    "plain text",
    "<p bold>Hello</p></gap id='g1'></p>Tail",
    "<p hint='It\\'s > 3' importance='high'>a</n>b",
    "<p center size='12'>Text</p>",
    "</gap id=\"dq\"></gap id=bad></n ></N><p<p x>",
    "<p 14 color='red'>legacy</p><p 16>size</p>",
    "<<>>'\"</p></p><p>",
    "<p hint='never closed>text",
    "日本語 <p italic>ünïcödé</p> ✓",
];

fn open_indices(tokens: &[Token]) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_paragraph_open())
        .map(|(i, _)| i)
        .collect()
}

fn attrs_at(source: &str, index: usize) -> ParagraphAttrs {
    match &tokenize(source)[index] {
        Token::ParagraphOpen { attrs, .. } => attrs.clone(),
        other => panic!("expected open tag, got {other:?}"),
    }
}

#[test]
fn tokenizing_is_total() {
    for input in INPUTS {
        assert_eq!(serialize(&tokenize(input)), *input);
    }
}

#[rstest]
#[case(FormatCommand::Bold)]
#[case(FormatCommand::Italic)]
#[case(FormatCommand::Underline)]
fn toggles_are_their_own_inverse(#[case] command: FormatCommand) {
    for input in INPUTS {
        let tokens = tokenize(input);
        for open in open_indices(&tokens) {
            let once = apply_format(&tokens, open, &command).unwrap();
            let twice = apply_format(&tokenize(&once), open, &command).unwrap();
            assert_eq!(attrs_at(&twice, open), attrs_at(input, open), "{input}");
        }
    }
}

#[test]
fn color_set_then_cleared_restores_attrs() {
    let input = "<p bold>x</p>";
    let tokens = tokenize(input);
    let set = apply_format(&tokens, 0, &FormatCommand::Color("green".into())).unwrap();
    assert_eq!(attrs_at(&set, 0).color.as_deref(), Some("#43a047"));

    let cleared = apply_format(&tokenize(&set), 0, &FormatCommand::Color(String::new())).unwrap();
    assert_eq!(attrs_at(&cleared, 0), attrs_at(input, 0));
}

#[test]
fn mutation_touches_only_the_target_tag() {
    let commands = [
        FormatCommand::Bold,
        FormatCommand::Align(Align::Right),
        FormatCommand::Color("purple".into()),
        FormatCommand::Size("18".into()),
        FormatCommand::Size(String::new()),
    ];
    for input in INPUTS {
        let tokens = tokenize(input);
        for open in open_indices(&tokens) {
            for command in &commands {
                let out = apply_format(&tokens, open, command).unwrap();
                let after = tokenize(&out);
                assert_eq!(after.len(), tokens.len(), "{input} / {command}");
                for (i, (before, after)) in tokens.iter().zip(&after).enumerate() {
                    if i != open {
                        assert_eq!(before.raw(), after.raw(), "{input} / {command}");
                    }
                }
            }
        }
    }
}

#[test]
fn alignment_stays_exclusive() {
    let sequence = [Align::Center, Align::Right, Align::Right, Align::Left, Align::Center];
    let mut source = "<p right center bold>x</p>".to_string();
    for align in sequence {
        source = apply_format(&tokenize(&source), 0, &FormatCommand::Align(align)).unwrap();
        let raw = tokenize(&source)[0].raw().to_string();
        let keywords = raw
            .trim_start_matches("<p")
            .trim_end_matches('>')
            .split_whitespace()
            .filter(|w| Align::from_keyword(w).is_some())
            .count();
        assert_eq!(keywords, 1, "{raw}");
        assert_eq!(attrs_at(&source, 0).align, align);
    }
    assert!(attrs_at(&source, 0).bold);
}

#[test]
fn right_replaces_center_and_keeps_size() {
    let tokens = tokenize("<p center size='12'>Text</p>");
    let out = apply_format(&tokens, 0, &FormatCommand::Align(Align::Right)).unwrap();
    assert_eq!(out, "<p size='12' right>Text</p>");

    let attrs = attrs_at(&out, 0);
    assert_eq!(attrs.align, Align::Right);
    assert_eq!(attrs.font_size_px, Some(12));

    // Applying it again changes nothing
    let again = apply_format(&tokenize(&out), 0, &FormatCommand::Align(Align::Right)).unwrap();
    assert_eq!(again, out);
}

#[test]
fn empty_color_removes_the_attribute() {
    let tokens = tokenize("<p color='ff0000'>X</p>");
    let out = apply_format(&tokens, 0, &FormatCommand::parse("color", Some("")).unwrap()).unwrap();
    assert_eq!(out, "<p>X</p>");
    assert_eq!(attrs_at(&out, 0).color, None);
}

#[test]
fn unparseable_values_are_stored_verbatim() {
    let out = apply_format(&tokenize("<p>x</p>"), 0, &FormatCommand::Size("huge".into())).unwrap();
    assert_eq!(out, "<p size='huge'>x</p>");
    assert_eq!(attrs_at(&out, 0).font_size_px, None);
}

#[test]
fn gap_resolver_runs_once_per_marker_in_order() {
    for input in INPUTS {
        let expected: Vec<String> = tokenize(input)
            .into_iter()
            .filter_map(|t| match t {
                Token::GapMarker { id, .. } => Some(id),
                _ => None,
            })
            .collect();
        let mut seen = Vec::new();
        let _ = render::<()>(&tokenize(input), &mut |id: &str| {
            seen.push(id.to_string());
            None
        });
        assert_eq!(seen, expected, "{input}");
    }
}

#[test]
fn documented_example_renders_bold_segment_widget_and_tail() {
    let tokens = tokenize("<p bold>Hello</p></gap id='g1'></p>Tail");
    let rendered = render(&tokens, &mut |id: &str| Some(format!("<input {id}>")));

    assert_eq!(rendered.nodes.len(), 3);
    let RenderNode::Paragraph(p) = &rendered.nodes[0] else {
        panic!("expected paragraph");
    };
    assert!(p.attrs.bold);
    assert_eq!(p.text, "Hello");
    assert!(matches!(&rendered.nodes[1], RenderNode::Gap { widget, .. } if widget == "<input g1>"));
    assert!(matches!(&rendered.nodes[2], RenderNode::Text { text, .. } if text == "Tail"));
}
