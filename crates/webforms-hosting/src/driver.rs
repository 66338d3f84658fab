//! Phased execution of one page instance.

use std::sync::Arc;

use webforms_core::{
    LifecycleEvent, LifecycleObserver, LifecyclePhase, RequestContext, RequestId, RouteData,
    TimingContext,
};
use webforms_observability::{LogOutput, ObservabilityConfig, StructuredLogger};
use webforms_routing::RouteTable;
use webforms_ui::{HtmlTextWriter, PageError, PageResult};

use crate::context::{PageContext, PageEnvironment};
use crate::page::Page;

/// Markup and metadata produced by a successful run.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub markup: String,
    pub request_id: RequestId,
    /// Name of the matched route, if any.
    pub route_name: Option<String>,
    pub timing: TimingContext,
}

/// Tracks the current phase and refuses out-of-order transitions.
#[derive(Debug)]
struct PhaseTracker {
    phase: LifecyclePhase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            phase: LifecyclePhase::Construct,
        }
    }

    /// Move to the next phase. Unload is reachable from any phase.
    fn advance(&mut self, next: LifecyclePhase) -> PageResult {
        if next != LifecyclePhase::Unload {
            let expected = self.phase.next().unwrap_or(LifecyclePhase::Unload);
            if next != expected {
                return Err(PageError::PhaseOrder {
                    expected,
                    actual: next,
                });
            }
        } else if self.phase == LifecyclePhase::Unload {
            return Err(PageError::PhaseOrder {
                expected: LifecyclePhase::Unload,
                actual: next,
            });
        }
        self.phase = next;
        Ok(())
    }
}

/// Everything one run records besides the page state.
struct RunState<'a> {
    tracker: PhaseTracker,
    timing: TimingContext,
    logger: StructuredLogger,
    observer: Option<&'a dyn LifecycleObserver>,
}

impl RunState<'_> {
    fn notify(&self, event: LifecycleEvent) {
        if let Some(observer) = self.observer {
            observer.on_event(&event, self.timing.elapsed());
        }
    }

    fn enter(&mut self, ctx: &mut PageContext, phase: LifecyclePhase) -> PageResult {
        self.tracker.advance(phase)?;
        ctx.set_phase(phase);
        self.timing.phase_started(phase);
        self.logger
            .debug("Entering phase")
            .phase(phase)
            .emit();
        self.notify(LifecycleEvent::PhaseEntered(phase));
        Ok(())
    }

    fn leave(&mut self, phase: LifecyclePhase) {
        self.timing.phase_finished(phase);
    }
}

/// Runs pages through their lifecycle against a shared route table.
///
/// The driver holds no per-request state; one driver serves every request.
#[derive(Clone)]
pub struct PageLifecycleDriver {
    routes: Arc<RouteTable>,
    observer: Option<Arc<dyn LifecycleObserver>>,
    logging: ObservabilityConfig,
    log_output: LogOutput,
}

impl std::fmt::Debug for PageLifecycleDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageLifecycleDriver")
            .field("routes", &self.routes.len())
            .field("observer", &self.observer.is_some())
            .field("logging", &self.logging)
            .finish()
    }
}

impl PageLifecycleDriver {
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self {
            routes,
            observer: None,
            logging: ObservabilityConfig::default(),
            log_output: LogOutput::Stderr,
        }
    }

    /// Notify an observer of every phase entered and of failures.
    pub fn with_observer(mut self, observer: Arc<dyn LifecycleObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Level and format of per-request logs.
    pub fn with_logging(mut self, logging: ObservabilityConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Where per-request logs are written.
    pub fn with_log_output(mut self, output: LogOutput) -> Self {
        self.log_output = output;
        self
    }

    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.routes
    }

    /// Match the request path, then run the page.
    pub fn run(&self, page: &mut dyn Page, request: RequestContext) -> Result<RenderedPage, PageError> {
        let route_data = self
            .routes
            .match_path(&request.path)
            .map(|m| m.into_route_data());
        self.run_with_route_data(page, request, route_data)
    }

    /// Run the page with route data already matched by the caller.
    ///
    /// Phases run in order, once each. The first hook error aborts the
    /// remaining phases and is returned unmodified; unload still runs and no
    /// markup is returned.
    pub fn run_with_route_data(
        &self,
        page: &mut dyn Page,
        mut request: RequestContext,
        route_data: Option<RouteData>,
    ) -> Result<RenderedPage, PageError> {
        let request_id = request.request_id.clone();
        let route_name = route_data.as_ref().map(|d| d.route_name().to_string());

        let mut logger = self
            .logging
            .logger(request_id.clone())
            .with_output(self.log_output.clone())
            .with_page(page.name());
        if let Some(route) = &route_name {
            logger = logger.with_route(route.as_str());
        }

        let mut run = RunState {
            tracker: PhaseTracker::new(),
            timing: std::mem::take(&mut request.timing),
            logger,
            observer: self.observer.as_deref(),
        };
        run.timing.phase_started(LifecyclePhase::Construct);
        run.notify(LifecycleEvent::PhaseEntered(LifecyclePhase::Construct));

        let env = PageEnvironment::new(Arc::clone(&self.routes), route_data, request);
        let mut ctx = PageContext::new(env);
        run.leave(LifecyclePhase::Construct);

        let result = self.execute(page, &mut ctx, &mut run);

        if let Err(err) = &result {
            let phase = ctx.phase();
            run.logger
                .error("Lifecycle phase failed")
                .phase(phase)
                .field("error", err.to_string())
                .emit();
            run.notify(LifecycleEvent::Failed {
                phase,
                message: err.to_string(),
            });
        }

        // Unload always runs.
        if run.enter(&mut ctx, LifecyclePhase::Unload).is_ok() {
            ctx.unload_controls();
            page.on_unload(&mut ctx);
            run.leave(LifecyclePhase::Unload);
        }

        let markup = result?;
        run.notify(LifecycleEvent::Completed);
        run.logger
            .debug("Page rendered")
            .field("bytes", markup.len())
            .duration("elapsed_ms", run.timing.elapsed())
            .emit();

        Ok(RenderedPage {
            markup,
            request_id,
            route_name,
            timing: run.timing,
        })
    }

    fn execute(
        &self,
        page: &mut dyn Page,
        ctx: &mut PageContext,
        run: &mut RunState<'_>,
    ) -> Result<String, PageError> {
        run.enter(ctx, LifecyclePhase::FrameworkInitialize)?;
        page.framework_initialize(ctx)?;
        ctx.init_controls()?;
        run.leave(LifecyclePhase::FrameworkInitialize);

        run.enter(ctx, LifecyclePhase::Load)?;
        page.on_load(ctx)?;
        ctx.load_controls()?;
        run.leave(LifecyclePhase::Load);

        run.enter(ctx, LifecyclePhase::PreRender)?;
        page.on_pre_render(ctx)?;
        ctx.pre_render_controls()?;
        for id in ctx.finalize_ids() {
            run.logger
                .warn("Duplicate control id among siblings")
                .phase(LifecyclePhase::PreRender)
                .field("id", id)
                .emit();
        }
        run.leave(LifecyclePhase::PreRender);

        run.enter(ctx, LifecyclePhase::Render)?;
        let mut writer = HtmlTextWriter::new();
        page.render(ctx, &mut writer)?;
        run.leave(LifecyclePhase::Render);

        Ok(writer.into_string())
    }
}

/// Run a page type for a request path and return its markup.
pub fn run_page<P: Page + Default>(
    request_path: &str,
    routes: &Arc<RouteTable>,
) -> Result<String, PageError> {
    let mut page = P::default();
    PageLifecycleDriver::new(Arc::clone(routes))
        .run(&mut page, RequestContext::new(request_path))
        .map(|rendered| rendered.markup)
}
