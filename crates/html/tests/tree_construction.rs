use html::{DOM, NodeId, parse_fragment, parse_html};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn child_tags(dom: &DOM, id: NodeId) -> Vec<String> {
    dom.children(id)
        .map(|child| {
            dom.tag(child)
                .map_or_else(|| format!("#{}", dom.text(child).unwrap_or_default()), str::to_owned)
        })
        .collect()
}

fn body(dom: &DOM) -> NodeId {
    dom.child_element(dom.root(), "body").unwrap()
}

#[test]
fn missing_structure_is_synthesized() {
    init();
    let dom = parse_html("<p>hi</p>");
    assert_eq!(dom.tag(dom.root()), Some("html"));
    assert_eq!(child_tags(&dom, dom.root()), vec!["body"]);
    let body = body(&dom);
    assert_eq!(child_tags(&dom, body), vec!["p"]);
    let para = dom.child_element(body, "p").unwrap();
    assert_eq!(child_tags(&dom, para), vec!["#hi"]);
}

#[test]
fn head_only_tags_go_to_head() {
    init();
    let dom = parse_html("<title>T</title><p>x");
    assert_eq!(child_tags(&dom, dom.root()), vec!["head", "body"]);
    let head = dom.child_element(dom.root(), "head").unwrap();
    assert_eq!(child_tags(&dom, head), vec!["title"]);
    assert_eq!(dom.inner_html(body(&dom)), "<p>x</p>");
}

#[test]
fn second_body_reopens_the_first() {
    init();
    let dom = parse_html("<body>a</body><body class=late>b</body>");
    assert_eq!(child_tags(&dom, dom.root()), vec!["body"]);
    let body = body(&dom);
    assert_eq!(child_tags(&dom, body), vec!["#a", "#b"]);
    assert_eq!(dom.attribute(body, "class"), Some("late"));
}

#[test]
fn late_html_tag_merges_attributes() {
    init();
    let dom = parse_html("<html lang=en><body>x</body><html class=x>");
    assert_eq!(dom.attribute(dom.root(), "lang"), Some("en"));
    assert_eq!(dom.attribute(dom.root(), "class"), Some("x"));
    assert_eq!(child_tags(&dom, dom.root()), vec!["body"]);
}

#[test]
fn names_are_lower_cased_and_values_kept() {
    init();
    let dom = parse_html(r#"<DIV ID="Main" Title='Two Words'>x</DIV>"#);
    assert_eq!(
        dom.to_html(body(&dom)),
        r#"<body><div id="Main" title="Two Words">x</div></body>"#
    );
}

#[test]
fn text_handling() {
    init();
    let dom = parse_html("<p>1 > 0 &amp;&amp; a &lt; b</p>\n   \n<p>hello <b");
    let body = body(&dom);
    let paras: Vec<NodeId> = dom.children(body).collect();
    assert_eq!(paras.len(), 2);
    assert_eq!(child_tags(&dom, paras[0]), vec!["#1 > 0 && a < b"]);
    assert_eq!(child_tags(&dom, paras[1]), vec!["#hello "]);
}

#[test]
fn comments_doctype_and_void_elements() {
    init();
    let dom = parse_html("<!doctype html><!-- note --><p>a<br>b<img src=x.png></p>");
    let para = dom.child_element(body(&dom), "p").unwrap();
    assert_eq!(child_tags(&dom, para), vec!["#a", "br", "#b", "img"]);
}

#[test]
fn stray_close_tags_never_pop_the_root() {
    init();
    let dom = parse_html("</div></div></html></html>text");
    assert_eq!(dom.tag(dom.root()), Some("html"));
    assert!(dom.text(dom.descendants(dom.root()).last().unwrap()) == Some("text"));
}

#[test]
fn less_than_in_prose_keeps_the_following_text() {
    init();
    let dom = parse_html("<p>1 < 2 ok</p>");
    let para = dom.child_element(body(&dom), "p").unwrap();
    assert_eq!(child_tags(&dom, para), vec!["#1 ", "# 2 ok"]);
}

#[test]
fn unquoted_values_keep_their_trailing_slash() {
    init();
    let dom = parse_html("<a href=http://example.org/>x</a><p>y<br/><img src=\"a.png\"/>z</p>");
    let body = body(&dom);
    let link = dom.child_element(body, "a").unwrap();
    assert_eq!(dom.attribute(link, "href"), Some("http://example.org/"));
    assert_eq!(child_tags(&dom, link), vec!["#x"]);
    let para = dom.child_element(body, "p").unwrap();
    assert_eq!(child_tags(&dom, para), vec!["#y", "br", "img", "#z"]);
    let img = dom.child_element(para, "img").unwrap();
    assert_eq!(dom.attribute(img, "src"), Some("a.png"));
}

#[test]
fn any_input_yields_a_valid_skeleton() {
    init();
    let inputs = [
        "",
        "<",
        ">",
        "<<<>>>",
        "plain text",
        "<head><head><body><head><body>",
        "<script>x</script><body><title>late</title>",
        "<html><html><html>",
        "</head></body><p><div><span>",
        "<meta charset=utf-8><link rel=stylesheet href=a.css>",
        "<p unterminated=\"quote>never closed",
    ];
    for input in inputs {
        let dom = parse_html(input);
        assert_eq!(dom.tag(dom.root()), Some("html"), "input {input:?}");
        let top: Vec<String> = child_tags(&dom, dom.root())
            .into_iter()
            .filter(|tag| tag == "head" || tag == "body")
            .collect();
        assert!(
            top.is_empty() || top == ["head"] || top == ["body"] || top == ["head", "body"],
            "input {input:?} produced {top:?}"
        );
    }
}

#[test]
fn fragment_children_live_under_body() {
    init();
    let (dom, body) = parse_fragment("<b>x</b>y");
    assert_eq!(dom.tag(body), Some("body"));
    assert_eq!(child_tags(&dom, body), vec!["b", "#y"]);
}
