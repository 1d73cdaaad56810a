//! One browsing context: the loaded document, its styles, scripts and last render.

use std::iter;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context as _, Error, anyhow};
use css::{Rule, parse_stylesheet_with_next};
use html::{DOM, NodeId, parse_html};
use js::{EventKind, ScriptBridge, ScriptHost, ScriptRuntime};
use layouter::{DocumentBox, LayoutError, node_at, render};
use log::{debug, info, trace, warn};
use renderer::{DisplayList, PaintCommand};
use style_engine::{cascade_order, ua_stylesheet};
use tracing::{Instrument as _, info_span};
use url::Url;

use crate::config::PageConfig;
use crate::network::Session;
use crate::resources::{StyleSource, script_sources, stylesheet_sources};
use crate::telemetry::{ReflowCounters, maybe_emit};

/// Result of the last successful reflow.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub document: DocumentBox,
}

pub struct Page {
    session: Arc<Session>,
    runtime: Box<dyn ScriptRuntime>,
    bridge: ScriptBridge,
    config: PageConfig,
    url: Option<Url>,
    dom: DOM,
    /// Cascade-ordered UA and author rules of the current document.
    rules: Vec<Rule>,
    output: Option<RenderOutput>,
    display_list: DisplayList,
    scroll: f32,
    focus: Option<NodeId>,
    history: Vec<Url>,
    counters: ReflowCounters,
}

impl Page {
    pub fn new(session: Arc<Session>, runtime: Box<dyn ScriptRuntime>, config: PageConfig) -> Self {
        Self {
            session,
            runtime,
            bridge: ScriptBridge::new(),
            config,
            url: None,
            dom: DOM::new(),
            rules: cascade_order(ua_stylesheet()),
            output: None,
            display_list: DisplayList::new(),
            scroll: 0.0,
            focus: None,
            history: Vec::new(),
            counters: ReflowCounters::default(),
        }
    }

    /// Navigate to `url`, POSTing `payload` when given.
    ///
    /// Stylesheet and script failures are logged and skipped.
    ///
    /// # Errors
    /// When the document itself cannot be fetched, or the first reflow fails.
    pub async fn load(&mut self, url: Url, payload: Option<String>) -> Result<(), Error> {
        let span = info_span!("page.load", url = %url);
        self.load_document(url, payload).instrument(span).await
    }

    async fn load_document(&mut self, url: Url, payload: Option<String>) -> Result<(), Error> {
        info!("loading {url}");
        let (_, body) = self
            .session
            .request(&url, self.url.as_ref(), payload.as_deref())
            .await
            .with_context(|| format!("fetching {url}"))?;

        self.history.push(url.clone());
        self.url = Some(url.clone());
        self.scroll = 0.0;
        self.focus = None;
        self.dom = parse_html(&body);
        self.bridge.reset();

        self.rules = self.load_rules(&url).await;
        self.run_scripts(&url).await;
        self.reflow()
            .with_context(|| format!("laying out {url}"))?;
        Ok(())
    }

    async fn load_rules(&self, base: &Url) -> Vec<Rule> {
        let mut rules = ua_stylesheet();
        let mut next = u32::try_from(rules.len()).unwrap_or(u32::MAX);
        for source in stylesheet_sources(&self.dom) {
            let text = match source {
                StyleSource::Inline(text) => text,
                StyleSource::Linked(href) => match self.fetch_subresource(base, &href).await {
                    Ok(text) => text,
                    Err(err) => {
                        warn!("skipping stylesheet {href}: {err:#}");
                        continue;
                    }
                },
            };
            let (parsed, after) = parse_stylesheet_with_next(&text, next);
            trace!("{} rules from one stylesheet", parsed.len());
            next = after;
            rules.extend(parsed);
        }
        debug!("{} rules in cascade", rules.len());
        cascade_order(rules)
    }

    async fn run_scripts(&mut self, base: &Url) {
        for src in script_sources(&self.dom) {
            let source = match self.fetch_subresource(base, &src).await {
                Ok(source) => source,
                Err(err) => {
                    warn!("skipping script {src}: {err:#}");
                    continue;
                }
            };
            let mut host = ScriptHost::new(&mut self.bridge, &mut self.dom);
            if let Err(err) = self.runtime.run(&mut host, &source, &src) {
                warn!("script {src} failed: {err:#}");
            }
        }
    }

    async fn fetch_subresource(&self, base: &Url, href: &str) -> Result<String, Error> {
        let url = base
            .join(href)
            .with_context(|| format!("resolving {href} against {base}"))?;
        let (_, body) = self.session.request(&url, Some(base), None).await?;
        Ok(body)
    }

    /// Recompute styles and layout. The previous output is kept when this fails.
    ///
    /// # Errors
    /// The layout error; it is also logged.
    pub fn reflow(&mut self) -> Result<(), LayoutError> {
        let _span = info_span!("page.reflow").entered();
        let started = Instant::now();
        let result = render(
            &mut self.dom,
            &self.rules,
            self.config.viewport(),
            self.session.fonts(),
            &self.config.layout_config(),
        );
        self.counters.reflows_total += 1;
        match result {
            Ok((document, commands)) => {
                self.counters.boxes_last = document.boxes().len() as u64;
                self.counters.paint_commands_last = commands.len() as u64;
                self.counters.layout_time_last_us =
                    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
                self.counters.display_list_generation = self.display_list.replace(commands);
                self.output = Some(RenderOutput { document });
                self.scroll = self.scroll.min(self.max_scroll());
                maybe_emit(self.config.telemetry_enabled, &self.counters);
                Ok(())
            }
            Err(err) => {
                self.counters.failed_reflows_total += 1;
                warn!("reflow failed, keeping the previous render: {err}");
                Err(err)
            }
        }
    }

    /// Height of the laid out document, 0 before the first reflow.
    pub fn document_height(&self) -> f32 {
        self.output
            .as_ref()
            .map_or(0.0, |output| output.document.rect.height)
    }

    pub fn max_scroll(&self) -> f32 {
        (self.document_height() + 2.0 * self.config.margin_y - self.config.viewport_height).max(0.0)
    }

    pub fn scroll_down(&mut self) {
        self.scroll = (self.scroll + self.config.scroll_step).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = (self.scroll - self.config.scroll_step).max(0.0);
    }

    /// Paint commands inside the viewport, in screen coordinates.
    pub fn visible_commands(&self) -> Vec<PaintCommand> {
        self.display_list
            .to_screen(self.scroll, self.config.viewport_height)
    }

    /// Handle a click at screen position `(x, y)`.
    ///
    /// # Errors
    /// Failed navigation or form submission.
    pub async fn click(&mut self, x: f32, y: f32) -> Result<(), Error> {
        self.focus = None;
        let Some(hit) = self
            .output
            .as_ref()
            .and_then(|output| node_at(&output.document, x, y + self.scroll))
        else {
            return Ok(());
        };
        let path: Vec<NodeId> = iter::once(hit).chain(self.dom.ancestors(hit)).collect();
        for node in path {
            let tag = self.dom.tag(node).map(str::to_owned);
            match tag.as_deref() {
                Some("a") => {
                    let Some(href) = self.dom.attribute(node, "href").map(str::to_owned) else {
                        continue;
                    };
                    if self.dispatch(node, EventKind::Click) {
                        return Ok(());
                    }
                    let target = self.resolve(&href)?;
                    return self.load(target, None).await;
                }
                Some("input") => {
                    if self.dispatch(node, EventKind::Click) {
                        return Ok(());
                    }
                    self.dom.set_attribute(node, "value", String::new())?;
                    self.focus = Some(node);
                    self.reflow()?;
                    return Ok(());
                }
                Some("button") => {
                    if self.dispatch(node, EventKind::Click) {
                        return Ok(());
                    }
                    let form = iter::once(node).chain(self.dom.ancestors(node)).find(|candidate| {
                        self.dom.tag(*candidate) == Some("form")
                            && self.dom.attribute(*candidate, "action").is_some()
                    });
                    if let Some(form) = form {
                        return self.submit_form(form).await;
                    }
                    return Ok(());
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Submit `form`: its named inputs are POSTed, url-encoded, to its `action`.
    ///
    /// # Errors
    /// When the form has no resolvable action or the POST fails.
    pub async fn submit_form(&mut self, form: NodeId) -> Result<(), Error> {
        if self.dispatch(form, EventKind::Submit) {
            return Ok(());
        }
        let action = self
            .dom
            .attribute(form, "action")
            .ok_or_else(|| anyhow!("form has no action"))?
            .to_owned();
        let body = form_body(&self.dom, form);
        debug!("submitting {body:?} to {action}");
        let target = self.resolve(&action)?;
        self.load(target, Some(body)).await
    }

    /// Type `ch` into the focused input.
    ///
    /// # Errors
    /// When the focused node has disappeared.
    pub fn keypress(&mut self, ch: char) -> Result<(), Error> {
        let Some(focused) = self.focus else {
            return Ok(());
        };
        if self.dispatch(focused, EventKind::Keydown) {
            return Ok(());
        }
        let mut value = self
            .dom
            .attribute(focused, "value")
            .unwrap_or_default()
            .to_owned();
        value.push(ch);
        self.dom.set_attribute(focused, "value", value)?;
        self.reflow()?;
        Ok(())
    }

    /// Reload the previous entry of the history.
    ///
    /// # Errors
    /// When reloading fails.
    pub async fn go_back(&mut self) -> Result<(), Error> {
        if self.history.len() < 2 {
            return Ok(());
        }
        self.history.pop();
        let Some(back) = self.history.pop() else {
            return Ok(());
        };
        self.load(back, None).await
    }

    /// Let scripts see `event` at `node`. Returns whether the default action was
    /// prevented. Script errors count as not prevented.
    fn dispatch(&mut self, node: NodeId, event: EventKind) -> bool {
        let mut host = ScriptHost::new(&mut self.bridge, &mut self.dom);
        let handle = host.handle_of(node);
        let prevented = match self.runtime.dispatch_event(&mut host, handle, event) {
            Ok(prevented) => prevented,
            Err(err) => {
                warn!("{event} listener failed: {err:#}");
                false
            }
        };
        if host.reflow_requested() && self.reflow().is_err() {
            debug!("{event} listener left the page unrenderable");
        }
        prevented
    }

    fn resolve(&self, href: &str) -> Result<Url, Error> {
        match &self.url {
            Some(base) => base.join(href),
            None => Url::parse(href),
        }
        .with_context(|| format!("invalid link `{href}`"))
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn dom(&self) -> &DOM {
        &self.dom
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn output(&self) -> Option<&RenderOutput> {
        self.output.as_ref()
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    pub fn history(&self) -> &[Url] {
        &self.history
    }

    pub fn counters(&self) -> ReflowCounters {
        self.counters
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }
}

/// `name=value` pairs of the named inputs under `form`, percent-encoded and joined by `&`.
pub fn form_body(dom: &DOM, form: NodeId) -> String {
    dom.descendants(form)
        .filter(|node| dom.tag(*node) == Some("input"))
        .filter_map(|node| {
            let name = dom.attribute(node, "name")?;
            let value = dom.attribute(node, "value").unwrap_or_default();
            Some(format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            ))
        })
        .collect::<Vec<_>>()
        .join("&")
}
