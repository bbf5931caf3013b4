//! Extraction and rendering against the reference DOM.

use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::dom::{Element, Node};
use crate::{AnnotatedText, Error, ExtractOptions, Markup, invariants};

fn em(text: &str) -> Element {
    Element::new("em").text(text)
}

fn strong(text: &str) -> Element {
    Element::new("strong").text(text)
}

fn code(text: &str) -> Element {
    Element::new("code").text(text)
}

fn span(style: &str, text: &str) -> Element {
    Element::new("span").attr("style", style).text(text)
}

fn link(href: &str) -> Element {
    Element::new("a").attr("href", href)
}

fn br() -> Element {
    Element::line_break()
}

fn p(children: Vec<Node>) -> Node {
    children
        .into_iter()
        .fold(Element::new("p"), |element, child| element.child(child))
        .into()
}

fn extract(root: &Node) -> AnnotatedText {
    let text = AnnotatedText::from_tree(root, &ExtractOptions::default()).unwrap();
    invariants::check(&text);
    text
}

fn extract_subtractive(root: &Node) -> AnnotatedText {
    let text = AnnotatedText::from_tree(root, &ExtractOptions::subtractive()).unwrap();
    invariants::check(&text);
    text
}

// Extraction

#[test]
fn plain_paragraph() {
    let text = extract(&p(vec!["Once upon a time".into()]));
    assert_eq!(text.tag(), "p");
    assert_eq!(text.text(), "Once upon a time");
    assert_eq!(text.len(), 16);
    assert!(text.markups().is_empty());
}

#[test]
fn inline_markup() {
    let text = extract(&p(vec!["Once ".into(), em("upon").into(), " a time".into()]));
    assert_eq!(text.markups(), &[Markup::italic(5, 9)]);
}

#[test]
fn links_keep_their_href() {
    let text = extract(&p(vec![
        "Once ".into(),
        link("http://www.example.com").text("upon a ti").into(),
        "me".into(),
    ]));
    assert_eq!(
        text.markups(),
        &[Markup::link("http://www.example.com", 5, 14)]
    );
}

#[test]
fn inline_styles_become_markups() {
    let text = extract(&p(vec![
        "Once ".into(),
        span("font-weight: bold;", "upon").into(),
        " a ".into(),
        span("font-style: italic;", "time").into(),
    ]));
    assert_eq!(text.markups(), &[Markup::bold(5, 9), Markup::italic(12, 16)]);
}

#[test]
fn markups_are_ordered_by_type_then_start() {
    let text = extract(&p(vec![
        "Blue ".into(),
        em("is").into(),
        " not ".into(),
        code("red").into(),
    ]));
    assert_eq!(text.markups(), &[Markup::code(12, 15), Markup::italic(5, 7)]);

    let text = extract(&p(vec![
        "Blue ".into(),
        em("is").into(),
        " not ".into(),
        em("red").into(),
    ]));
    assert_eq!(text.markups(), &[Markup::italic(5, 7), Markup::italic(12, 15)]);
}

#[test]
fn empty_elements_are_ignored() {
    let text = extract(&p(vec![
        "Once upon".into(),
        Element::new("span").into(),
        " a ".into(),
        link("#raven").into(),
        "midnight dreary".into(),
    ]));
    assert_eq!(text.text(), "Once upon a midnight dreary");
    assert!(text.markups().is_empty());
}

#[test]
fn empty_elements_inside_markup_are_ignored() {
    let text = extract(&p(vec![
        "while ".into(),
        em("I").child(Element::new("span")).into(),
        " pondered, weak and weary".into(),
    ]));
    assert_eq!(text.text(), "while I pondered, weak and weary");
    assert_eq!(text.markups(), &[Markup::italic(6, 7)]);
}

#[test]
fn line_breaks_count_inside_markup() {
    let text = extract(&p(vec![
        "while ".into(),
        em("I").child(br()).into(),
        "pondered, weak and weary".into(),
    ]));
    assert_eq!(text.text(), "while I\npondered, weak and weary");
    assert_eq!(text.markups(), &[Markup::italic(6, 8)]);
}

#[test]
fn one_element_can_declare_several_markups() {
    let text = extract(&p(vec![
        "Blue ".into(),
        link("/")
            .attr("style", "font-weight: bold; font-style: italic")
            .text("is not")
            .into(),
        " red".into(),
    ]));
    assert_eq!(
        text.markups(),
        &[
            Markup::link("/", 5, 11),
            Markup::bold(5, 11),
            Markup::italic(5, 11)
        ]
    );
}

#[test]
fn nested_elements() {
    let text = extract(&p(vec![
        "Blue ".into(),
        link("#")
            .child(em("is ").child(strong("not")))
            .into(),
        " red".into(),
    ]));
    assert_eq!(text.text(), "Blue is not red");
    assert_eq!(
        text.markups(),
        &[
            Markup::link("#", 5, 11),
            Markup::bold(8, 11),
            Markup::italic(5, 11)
        ]
    );
}

#[test]
fn adjacent_elements_of_one_type_merge() {
    let text = extract(&p(vec![
        "Blue ".into(),
        em("is ").into(),
        em("not").into(),
        " red".into(),
    ]));
    assert_eq!(text.markups(), &[Markup::italic(5, 11)]);

    let text = extract(&p(vec![
        "Man ".into(),
        em("I").into(),
        Element::new("i").text(" used").into(),
        Element::new("strong")
            .child(span("font-style:italic;", " to "))
            .into(),
        "be".into(),
    ]));
    assert_eq!(text.text(), "Man I used to be");
    assert_eq!(text.markups(), &[Markup::bold(10, 14), Markup::italic(4, 14)]);
}

#[test]
fn nested_elements_of_one_type_merge() {
    let text = extract(&p(vec![
        "Feels like we ".into(),
        Element::new("em").child(Element::new("i").text("only go")).into(),
        " backwards".into(),
    ]));
    assert_eq!(text.markups(), &[Markup::italic(14, 21)]);
}

#[rstest]
#[case(vec!["One".into(), br().into(), "two".into()], "One\ntwo", vec![])]
#[case(
    vec![strong("One").child(br()).text("two").into()],
    "One\ntwo",
    vec![Markup::bold(0, 7)]
)]
#[case(
    vec!["One".into(), br().into(), "two".into(), br().into(), "three".into(), br().into()],
    "One\ntwo\nthree\n",
    vec![]
)]
fn line_breaks_become_newlines(
    #[case] children: Vec<Node>,
    #[case] expected: &str,
    #[case] markups: Vec<Markup>,
) {
    let text = extract(&p(children));
    assert_eq!(text.text(), expected);
    assert_eq!(text.markups(), markups.as_slice());
}

#[test]
fn root_markups_span_everything() {
    let text = extract(&Node::from(
        Element::new("EM").text("all of ").child(strong("it")),
    ));
    assert_eq!(text.tag(), "em");
    assert_eq!(text.markups(), &[Markup::bold(7, 9), Markup::italic(0, 9)]);
}

#[test]
fn text_roots_are_rejected() {
    let result = AnnotatedText::from_tree(&Node::from("loose"), &ExtractOptions::default());
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn a_line_break_root_is_empty() {
    let text = extract(&Node::from(br()));
    assert_eq!(text.tag(), "br");
    assert_eq!(text.text(), "");
}

// Style subtraction

#[test]
fn additive_mode_ignores_normal_weight() {
    let root = p(vec![Element::new("strong")
        .text("bold ")
        .child(span("font-weight: normal", "plain"))
        .text(" bold")
        .into()]);
    assert_eq!(extract(&root).markups(), &[Markup::bold(0, 15)]);
}

#[test]
fn subtractive_mode_cuts_normal_weight_out() {
    let root = p(vec![Element::new("strong")
        .text("bold ")
        .child(span("font-weight: normal", "plain"))
        .text(" bold")
        .into()]);
    assert_eq!(
        extract_subtractive(&root).markups(),
        &[Markup::bold(0, 5), Markup::bold(10, 15)]
    );
}

#[test]
fn subtractive_mode_cuts_normal_style_out() {
    let root = p(vec![em("a")
        .child(span("font-style: normal", "b"))
        .text("c")
        .into()]);
    assert_eq!(
        extract_subtractive(&root).markups(),
        &[Markup::italic(0, 1), Markup::italic(2, 3)]
    );
}

#[test]
fn inner_declarations_win_in_subtractive_mode() {
    let root = p(vec![Element::new("span")
        .attr("style", "font-weight: 400")
        .text("x ")
        .child(Element::new("b").text("y"))
        .into()]);
    assert_eq!(extract_subtractive(&root).markups(), &[Markup::bold(2, 3)]);
}

#[test]
fn same_element_tag_then_style_in_subtractive_mode() {
    let root = p(vec![Element::new("b")
        .attr("style", "font-weight: lighter")
        .text("light")
        .into()]);
    assert!(extract_subtractive(&root).markups().is_empty());
    assert_eq!(extract(&root).markups(), &[Markup::bold(0, 5)]);
}

// Rendering

fn render_inner(root: &Node) -> String {
    extract(root).to_element().inner_html()
}

#[test]
fn renders_plain_text() {
    let text = AnnotatedText::from_text("Once upon a time");
    let element = text.to_element();
    assert_eq!(element.tag(), "p");
    assert_snapshot!(element.inner_html(), @"Once upon a time");
}

#[test]
fn renders_simple_markups() {
    assert_snapshot!(
        render_inner(&p(vec!["Black ".into(), em("out").into(), " days".into()])),
        @"Black <em>out</em> days"
    );
    assert_snapshot!(
        render_inner(&p(vec![link("#").text("Gold on the ceiling").into()])),
        @r##"<a href="#">Gold on the ceiling</a>"##
    );
    assert_snapshot!(
        render_inner(&p(vec!["The ".into(), em("great ").into(), code("Gatsby").into()])),
        @"The <em>great </em><code>Gatsby</code>"
    );
}

#[test]
fn renders_merged_markups_once() {
    let root = p(vec![
        "Little ".into(),
        Element::new("i").child(em("black")).text(" sub").into(),
        "marine".into(),
    ]);
    assert_snapshot!(render_inner(&root), @"Little <em>black sub</em>marine");
}

#[test]
fn splits_markups_around_higher_types() {
    let root = p(vec![
        em("Dream ").into(),
        Element::new("code").child(em("within a")).into(),
        em(" dream").into(),
    ]);
    let text = extract(&root);
    assert_eq!(text.markups(), &[Markup::code(6, 14), Markup::italic(0, 20)]);
    assert_snapshot!(
        text.to_element().inner_html(),
        @"<em>Dream </em><code><em>within a</em></code><em> dream</em>"
    );
}

#[test]
fn lower_types_become_outer_elements() {
    let root = p(vec![
        link("#").text("Romeo ").into(),
        Element::new("em").child(link("#").text("kiffe")).into(),
        " Juliette".into(),
    ]);
    assert_snapshot!(
        render_inner(&root),
        @r##"<a href="#">Romeo <em>kiffe</em></a> Juliette"##
    );

    let root = p(vec![
        "Éducat".into(),
        Element::new("em")
            .child(Element::new("code").child(link("/somewhere").text("ion nat")))
            .into(),
        "ionale".into(),
    ]);
    assert_snapshot!(
        render_inner(&root),
        @r#"Éducat<a href="/somewhere"><code><em>ion nat</em></code></a>ionale"#
    );
}

#[rstest]
#[case(vec!["One".into(), br().into(), "two".into()], "One<br>two")]
#[case(vec![strong("One").child(br()).text("two").into()], "<strong>One<br>two</strong>")]
#[case(
    vec![strong("One").into(), br().into(), strong("two").into()],
    "<strong>One</strong><br><strong>two</strong>"
)]
#[case(
    vec![br().into(), em("I walked").into(), " the long ".into(), strong("path").into()],
    "<br><em>I walked</em> the long <strong>path</strong>"
)]
#[case(
    vec![code("alone").into(), ", my feet hurt.".into(), br().into()],
    "<code>alone</code>, my feet hurt.<br>"
)]
#[case(
    vec!["One".into(), br().into(), "two".into(), br().into(), "three".into(), br().into()],
    "One<br>two<br>three<br>"
)]
fn renders_newlines_as_line_breaks(#[case] children: Vec<Node>, #[case] expected: &str) {
    assert_eq!(render_inner(&p(children)), expected);
}

#[test]
fn rendering_escapes_text() {
    let mut text = AnnotatedText::new("h2", "a < b & c");
    text.add_markup(Markup::link("/q?x=1&y=2", 0, 1));
    assert_snapshot!(text.to_string(), @r#"<h2><a href="/q?x=1&amp;y=2">a</a> &lt; b &amp; c</h2>"#);
}

#[test]
fn renders_an_empty_text() {
    assert_snapshot!(AnnotatedText::new("h2", "").to_string(), @"<h2></h2>");
}

#[test]
fn render_then_extract_is_stable() {
    let root = p(vec![
        "Blue ".into(),
        link("#")
            .child(em("is ").child(strong("not")))
            .into(),
        " red".into(),
        br().into(),
        code("done").into(),
    ]);
    let text = extract(&root);
    let again = extract(&Node::from(text.to_element()));
    assert_eq!(again, text);
}
