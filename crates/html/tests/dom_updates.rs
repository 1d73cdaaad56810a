use html::{DOMUpdate, parse_fragment, parse_html};

#[test]
fn set_attribute_overwrites_and_lower_cases() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut dom = parse_html("<input name=q value=old>");
    let input = dom.elements().find(|id| dom.tag(*id) == Some("input")).unwrap();
    dom.apply_update(DOMUpdate::SetAttr {
        node: input,
        name: "VALUE".into(),
        value: "new".into(),
    })
    .unwrap();
    assert_eq!(dom.attribute(input, "value"), Some("new"));
    assert_eq!(dom.to_html(input), r#"<input name="q" value="new">"#);
}

#[test]
fn replace_children_with_fragment() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut dom = parse_html("<div><p>old</p><p>older</p></div><span>kept</span>");
    let div = dom.elements().find(|id| dom.tag(*id) == Some("div")).unwrap();
    assert_eq!(dom.len(), 9);

    let (fragment, body) = parse_fragment("new <i>words</i>");
    dom.apply_update(DOMUpdate::ReplaceChildren {
        node: div,
        fragment,
        parent: body,
    })
    .unwrap();

    assert_eq!(dom.inner_html(div), "new <i>words</i>");
    // html, body, div, span, "kept" plus the three new nodes
    assert_eq!(dom.len(), 8);
    for child in dom.children(div) {
        assert_eq!(dom.parent(child), Some(div));
    }
}

#[test]
fn updates_on_text_nodes_fail() {
    let mut dom = parse_html("<p>words</p>");
    let text = dom.descendants(dom.root()).find(|id| dom.text(*id).is_some()).unwrap();
    assert!(dom.set_attribute(text, "id", "x".into()).is_err());
    assert!(dom.replace_children(text, Vec::new()).is_err());
}

#[test]
fn json_snapshot_is_deterministic() {
    let dom = parse_html(r#"<p b="2" a="1">x</p>"#);
    let value = dom.to_json_value();
    assert_eq!(value["tag"], "html");
    let para = &value["children"][0]["children"][0];
    assert_eq!(para["tag"], "p");
    assert_eq!(para["attrs"]["a"], "1");
    assert_eq!(para["children"][0]["text"], "x");
    assert_eq!(dom.to_json_string(), parse_html(r#"<p b="2" a="1">x</p>"#).to_json_string());
}
