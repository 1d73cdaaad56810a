use css::parse_stylesheet;
use html::{DOM, NodeId, StyleMap, parse_html};
use style_engine::{
    ComputedStyle, StyleError, cascade_order, resolve_styles, ua_stylesheet,
};
use text::{FontSlant, FontWeight};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn first(dom: &DOM, tag: &str) -> NodeId {
    dom.elements().find(|id| dom.tag(*id) == Some(tag)).unwrap()
}

fn prop<'dom>(dom: &'dom DOM, node: NodeId, property: &str) -> &'dom str {
    dom.style(node).unwrap().get(property).unwrap()
}

fn styled(markup: &str, css: &str) -> DOM {
    let mut dom = parse_html(markup);
    let mut rules = ua_stylesheet();
    rules.extend(parse_stylesheet(css));
    resolve_styles(&mut dom, &cascade_order(rules));
    dom
}

#[test]
fn defaults_are_inherited_everywhere() {
    init();
    let mut dom = parse_html("<p>x</p>");
    resolve_styles(&mut dom, &[]);
    for node in dom.descendants(dom.root()) {
        assert_eq!(prop(&dom, node, "font-size"), "16px");
        assert_eq!(prop(&dom, node, "font-style"), "normal");
        assert_eq!(prop(&dom, node, "font-weight"), "normal");
        assert_eq!(prop(&dom, node, "color"), "black");
    }
}

#[test]
fn percentage_font_size_uses_parent_pixels() {
    init();
    let dom = styled(
        r#"<div style="font-size: 20px"><p style="font-size: 50%">x</p></div>"#,
        "",
    );
    let para = first(&dom, "p");
    assert_eq!(prop(&dom, first(&dom, "div"), "font-size"), "20px");
    assert_eq!(prop(&dom, para, "font-size"), "10.0px");
    let text = dom.children(para).next().unwrap();
    assert_eq!(prop(&dom, text, "font-size"), "10.0px");
}

#[test]
fn higher_specificity_wins_regardless_of_source_order() {
    init();
    for css in [
        "div { color: red } body div { color: blue }",
        "body div { color: blue } div { color: red }",
    ] {
        let dom = styled("<div>x</div>", css);
        assert_eq!(prop(&dom, first(&dom, "div"), "color"), "blue", "{css}");
    }
}

#[test]
fn equal_specificity_keeps_source_order() {
    init();
    let dom = styled("<div>x</div>", "div { color: red } div { color: green }");
    assert_eq!(prop(&dom, first(&dom, "div"), "color"), "green");

    let ordered = cascade_order(parse_stylesheet("p a { color: x } p { color: y } a { color: z }"));
    let orders: Vec<u32> = ordered.iter().map(|rule| rule.source_order).collect();
    assert_eq!(orders, vec![1, 2, 0]);
}

#[test]
fn inline_style_beats_rules() {
    init();
    let dom = styled(
        r#"<body><p style="color: purple">x</p></body>"#,
        "body p { color: blue }",
    );
    assert_eq!(prop(&dom, first(&dom, "p"), "color"), "purple");
}

#[test]
fn user_agent_rules_apply_and_inherit() {
    init();
    let dom = styled("<a>link</a><small>tiny</small><b><i>both</i></b>", "");
    let link = first(&dom, "a");
    let link_text = dom.children(link).next().unwrap();
    assert_eq!(prop(&dom, link_text, "color"), "blue");
    assert_eq!(prop(&dom, first(&dom, "small"), "font-size"), "14.4px");
    let italic = first(&dom, "i");
    assert_eq!(prop(&dom, italic, "font-weight"), "bold");
    assert_eq!(prop(&dom, italic, "font-style"), "italic");
}

#[test]
fn computed_style_reads_resolved_maps() {
    init();
    let dom = styled("<pre><b>x</b></pre>", "");
    let bold = ComputedStyle::from_style_map(dom.style(first(&dom, "b")).unwrap()).unwrap();
    assert_eq!(bold.weight, FontWeight::Bold);
    assert_eq!(bold.slant, FontSlant::Roman);
    assert!((bold.font_size_px - 16.0).abs() < f32::EPSILON);
    assert!(!bold.has_background());

    let pre = ComputedStyle::from_style_map(dom.style(first(&dom, "pre")).unwrap()).unwrap();
    assert_eq!(pre.background_color, "gray");
}

#[test]
fn unusable_styles_are_errors() {
    init();
    assert_eq!(
        ComputedStyle::from_style_map(&StyleMap::new()),
        Err(StyleError::Missing {
            property: "font-size"
        })
    );

    let dom = styled(r#"<p style="font-style: wavy">x</p>"#, "");
    let result = ComputedStyle::from_style_map(dom.style(first(&dom, "p")).unwrap());
    assert!(matches!(
        result,
        Err(StyleError::Invalid {
            property: "font-style",
            ..
        })
    ));
}
