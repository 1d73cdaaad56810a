use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use js::{EventKind, NodeHandle, ScriptHost, ScriptRuntime};
use page_handler::{Method, NetError, Page, PageConfig, Request, Response, Session, Transport};
use renderer::PaintCommand;
use url::Url;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serves canned responses and records every request it sees.
#[derive(Clone, Default)]
struct FakeTransport {
    pages: Arc<Mutex<HashMap<String, Response>>>,
    seen: Arc<Mutex<Vec<Request>>>,
}

impl FakeTransport {
    fn serve(&self, url: &str, body: &str) -> &Self {
        self.serve_with(url, body, &[])
    }

    fn serve_with(&self, url: &str, body: &str, headers: &[(&str, &str)]) -> &Self {
        let response = Response {
            status: 200,
            headers: headers
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
            body: body.to_owned(),
        };
        self.pages.lock().unwrap().insert(url.to_owned(), response);
        self
    }

    fn requests(&self) -> Vec<Request> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, NetError>> {
        Box::pin(async move {
            let response = self
                .pages
                .lock()
                .unwrap()
                .get(request.url.as_str())
                .cloned()
                .unwrap_or(Response {
                    status: 404,
                    ..Response::default()
                });
            self.seen.lock().unwrap().push(request);
            Ok(response)
        })
    }
}

/// Records what it is asked to do. `replace <tag> <markup>` scripts set the
/// innerHTML of the first matching element.
#[derive(Clone, Default)]
struct FakeRuntime {
    log: Arc<Mutex<Vec<String>>>,
    prevent: Vec<EventKind>,
}

impl ScriptRuntime for FakeRuntime {
    fn run(&mut self, host: &mut ScriptHost<'_>, source: &str, url: &str) -> anyhow::Result<()> {
        self.log.lock().unwrap().push(format!("run {url}"));
        if let Some(rest) = source.strip_prefix("replace ") {
            let (selector, markup) = rest.split_once(' ').unwrap_or((rest, ""));
            let target = host.query_selector_all(selector)?[0];
            host.set_inner_html(target, markup)?;
        }
        if source == "throw" {
            anyhow::bail!("script threw");
        }
        Ok(())
    }

    fn dispatch_event(
        &mut self,
        host: &mut ScriptHost<'_>,
        target: NodeHandle,
        event: EventKind,
    ) -> anyhow::Result<bool> {
        let tag = host
            .node_of(target)
            .ok()
            .and_then(|node| host.dom().tag(node).map(str::to_owned))
            .unwrap_or_default();
        self.log.lock().unwrap().push(format!("{event} {tag}"));
        Ok(self.prevent.contains(&event))
    }
}

fn page_with(transport: &FakeTransport, runtime: FakeRuntime) -> Page {
    let session = Arc::new(Session::new(transport.clone()));
    Page::new(session, Box::new(runtime), PageConfig::default())
}

fn url(text: &str) -> Url {
    Url::parse(text).unwrap()
}

fn drawn_text(page: &Page) -> Vec<String> {
    page.display_list()
        .items
        .iter()
        .filter_map(|command| match command {
            PaintCommand::DrawText { text, .. } => Some(text.clone()),
            PaintCommand::DrawRect { .. } => None,
        })
        .collect()
}

#[tokio::test]
async fn load_applies_author_styles_and_runs_scripts() {
    init();
    let transport = FakeTransport::default();
    transport
        .serve(
            "http://test/",
            "<link rel=stylesheet href=/site.css><link rel=stylesheet href=/missing.css>\
             <style>b { color: red; }</style>\
             <p>hello <b>world</b></p><script src=/app.js></script><script src=/bad.js></script>",
        )
        .serve("http://test/site.css", "p { background-color: yellow; }")
        .serve("http://test/app.js", "console.log('hi')")
        .serve("http://test/bad.js", "throw");
    let runtime = FakeRuntime::default();
    let log = Arc::clone(&runtime.log);
    let mut page = page_with(&transport, runtime);

    page.load(url("http://test/"), None).await.unwrap();

    assert_eq!(page.url(), Some(&url("http://test/")));
    assert_eq!(page.rules().len(), 10);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["run /app.js".to_owned(), "run /bad.js".to_owned()]
    );
    let items = &page.display_list().items;
    assert!(matches!(
        &items[0],
        PaintCommand::DrawRect { color, .. } if color == "yellow"
    ));
    assert!(items.iter().any(|command| matches!(
        command,
        PaintCommand::DrawText { text, color, .. } if text == "world" && color == "red"
    )));
    assert_eq!(page.counters().reflows_total, 1);
    assert_eq!(page.display_list().generation, 1);
}

#[tokio::test]
async fn cookies_follow_the_host() {
    init();
    let transport = FakeTransport::default();
    transport
        .serve_with(
            "http://test/",
            "<link rel=stylesheet href=/site.css><p>x</p>",
            &[("set-cookie", "session=42; SameSite=Lax")],
        )
        .serve("http://test/site.css", "");
    let session = Session::new(transport.clone());

    let home = url("http://test/");
    session.request(&home, None, None).await.unwrap();
    assert_eq!(session.cookies().get("test").unwrap().value, "session=42");

    session
        .request(&url("http://test/site.css"), Some(&home), None)
        .await
        .unwrap();
    // A cross-site POST must not carry the lax cookie; it 404s but is still sent.
    let cross = session
        .request(&url("http://test/form"), Some(&url("http://other/")), Some("a=1"))
        .await;
    assert!(matches!(cross, Err(NetError::Status { status: 404, .. })));

    let requests = transport.requests();
    let cookie_of = |request: &Request| {
        request
            .headers
            .iter()
            .find(|(name, _)| name == "cookie")
            .map(|(_, value)| value.clone())
    };
    assert_eq!(cookie_of(&requests[0]), None);
    assert_eq!(cookie_of(&requests[1]).as_deref(), Some("session=42"));
    assert_eq!(requests[2].method, Method::Post);
    assert_eq!(cookie_of(&requests[2]), None);
}

#[tokio::test]
async fn encoded_responses_are_rejected() {
    init();
    let transport = FakeTransport::default();
    transport.serve_with("http://test/", "x", &[("content-encoding", "gzip")]);
    let session = Session::new(transport);
    let result = session.request(&url("http://test/"), None, None).await;
    assert!(matches!(
        result,
        Err(NetError::Encoding {
            header: "content-encoding",
            ..
        })
    ));

    let chunked = FakeTransport::default();
    chunked.serve_with("http://test/", "x", &[("transfer-encoding", "chunked")]);
    let session = Session::new(chunked);
    let result = session.request(&url("http://test/"), None, None).await;
    assert!(matches!(
        result,
        Err(NetError::Encoding {
            header: "transfer-encoding",
            ..
        })
    ));
}

#[tokio::test]
async fn failed_navigation_keeps_the_current_page() {
    init();
    let transport = FakeTransport::default();
    transport.serve("http://test/", "<p>still here</p>");
    let mut page = page_with(&transport, FakeRuntime::default());
    page.load(url("http://test/"), None).await.unwrap();

    assert!(page.load(url("http://test/gone"), None).await.is_err());
    assert_eq!(page.url(), Some(&url("http://test/")));
    assert_eq!(page.history().len(), 1);
    assert_eq!(drawn_text(&page), vec!["still", "here"]);
}

#[tokio::test]
async fn clicking_a_link_navigates_and_back_returns() {
    init();
    let transport = FakeTransport::default();
    transport
        .serve("http://test/", "<a href=/next>go</a>")
        .serve("http://test/next", "<p>arrived</p>");
    let runtime = FakeRuntime::default();
    let log = Arc::clone(&runtime.log);
    let mut page = page_with(&transport, runtime);
    page.load(url("http://test/"), None).await.unwrap();

    // The word box of "go" spans y 21..37 from x 13.
    page.click(15.0, 25.0).await.unwrap();
    assert_eq!(page.url(), Some(&url("http://test/next")));
    assert_eq!(page.history().len(), 2);
    assert_eq!(drawn_text(&page), vec!["arrived"]);
    assert_eq!(*log.lock().unwrap(), vec!["click a".to_owned()]);

    page.go_back().await.unwrap();
    assert_eq!(page.url(), Some(&url("http://test/")));
    assert_eq!(page.history().len(), 1);
}

#[tokio::test]
async fn prevented_clicks_do_not_navigate() {
    init();
    let transport = FakeTransport::default();
    transport.serve("http://test/", "<a href=/next>go</a>");
    let runtime = FakeRuntime {
        prevent: vec![EventKind::Click],
        ..FakeRuntime::default()
    };
    let mut page = page_with(&transport, runtime);
    page.load(url("http://test/"), None).await.unwrap();

    page.click(15.0, 25.0).await.unwrap();
    assert_eq!(page.url(), Some(&url("http://test/")));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn typing_into_an_input_and_submitting() {
    init();
    let transport = FakeTransport::default();
    transport
        .serve(
            "http://test/",
            "<form action=/search><input name=q value=old><input name=lang value=\"en us\">\
             <button>Go</button></form>",
        )
        .serve("http://test/search", "<p>results</p>");
    let mut page = page_with(&transport, FakeRuntime::default());
    page.load(url("http://test/"), None).await.unwrap();

    page.click(15.0, 25.0).await.unwrap();
    let focused = page.focus().unwrap();
    assert_eq!(page.dom().attribute(focused, "value"), Some(""));
    page.keypress('h').unwrap();
    page.keypress('i').unwrap();
    assert_eq!(page.dom().attribute(focused, "value"), Some("hi"));
    assert_eq!(drawn_text(&page)[0], "hi");

    // Inputs are 200px wide and separated by an 8px space: the button starts at x 429.
    page.click(430.0, 25.0).await.unwrap();
    let requests = transport.requests();
    let submit = requests.last().unwrap();
    assert_eq!(submit.url.as_str(), "http://test/search");
    assert_eq!(submit.method, Method::Post);
    assert_eq!(submit.body.as_deref(), Some("q=hi&lang=en%20us"));
    assert_eq!(drawn_text(&page), vec!["results"]);
}

#[tokio::test]
async fn keypress_without_focus_does_nothing() {
    init();
    let transport = FakeTransport::default();
    transport.serve("http://test/", "<p><input value=x></p>");
    let mut page = page_with(&transport, FakeRuntime::default());
    page.load(url("http://test/"), None).await.unwrap();
    page.keypress('a').unwrap();
    assert_eq!(page.counters().reflows_total, 1);
}

#[tokio::test]
async fn scripts_can_rewrite_the_document() {
    init();
    let transport = FakeTransport::default();
    transport
        .serve(
            "http://test/",
            "<p>before</p><script src=/rewrite.js></script>",
        )
        .serve("http://test/rewrite.js", "replace p <b>after</b> all");
    let mut page = page_with(&transport, FakeRuntime::default());
    page.load(url("http://test/"), None).await.unwrap();
    assert_eq!(drawn_text(&page), vec!["after", "all"]);
}

#[tokio::test]
async fn scrolling_is_clamped() {
    init();
    let transport = FakeTransport::default();
    let markup = "<p>line</p>".repeat(50);
    transport.serve("http://test/", &markup);
    let mut page = page_with(&transport, FakeRuntime::default());
    page.load(url("http://test/"), None).await.unwrap();

    // 50 lines of 20px, plus both margins, minus a 600px viewport.
    assert!((page.max_scroll() - 436.0).abs() < 1e-3);
    page.scroll_up();
    assert_eq!(page.scroll(), 0.0);
    for _ in 0..10 {
        page.scroll_down();
    }
    assert!((page.scroll() - 436.0).abs() < 1e-3);
    let visible = page.visible_commands();
    assert!(!visible.is_empty());
    assert!(visible.iter().all(|command| command.bottom() >= 0.0));
    page.scroll_up();
    assert!((page.scroll() - 336.0).abs() < 1e-3);
}

#[test]
fn config_clamps_and_derives_layout() {
    let config = PageConfig::new(0.0, 300.0, -5.0, true);
    assert_eq!(config.viewport_width, 1.0);
    assert_eq!(config.scroll_step, 1.0);
    assert!(config.telemetry_enabled);
    let layout = config.layout_config();
    assert_eq!(layout.margin_x, 13.0);
    assert_eq!(layout.input_width, 200.0);
    assert_eq!(PageConfig::default().viewport().height, 600.0);
}
