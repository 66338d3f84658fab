//! The page trait.

use webforms_ui::{HtmlTextWriter, PageResult};

use crate::context::PageContext;

/// Root of one request's response.
///
/// Every hook has a no-op default. The driver calls them in a fixed order,
/// once each: `framework_initialize`, `on_load`, `on_pre_render`, `render`,
/// `on_unload`. A page builds its control tree in `framework_initialize`;
/// route data is already attached by then.
pub trait Page: Send {
    /// Name used in logs.
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn framework_initialize(&mut self, _ctx: &mut PageContext) -> PageResult {
        Ok(())
    }

    fn on_load(&mut self, _ctx: &mut PageContext) -> PageResult {
        Ok(())
    }

    fn on_pre_render(&mut self, _ctx: &mut PageContext) -> PageResult {
        Ok(())
    }

    /// Write the page markup. The default renders the control tree.
    fn render(&self, ctx: &PageContext, writer: &mut HtmlTextWriter) -> PageResult {
        ctx.render_controls(writer)
    }

    /// Runs after the controls have unloaded, also when an earlier phase failed.
    fn on_unload(&mut self, _ctx: &mut PageContext) {}
}

impl<P: Page + ?Sized> Page for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn framework_initialize(&mut self, ctx: &mut PageContext) -> PageResult {
        (**self).framework_initialize(ctx)
    }

    fn on_load(&mut self, ctx: &mut PageContext) -> PageResult {
        (**self).on_load(ctx)
    }

    fn on_pre_render(&mut self, ctx: &mut PageContext) -> PageResult {
        (**self).on_pre_render(ctx)
    }

    fn render(&self, ctx: &PageContext, writer: &mut HtmlTextWriter) -> PageResult {
        (**self).render(ctx, writer)
    }

    fn on_unload(&mut self, ctx: &mut PageContext) {
        (**self).on_unload(ctx)
    }
}

/// `my_app::pages::HomePage` -> `HomePage`
fn short_type_name(name: &'static str) -> &'static str {
    let base = name.split('<').next().unwrap_or(name);
    match base.rfind("::") {
        Some(index) => &name[index + 2..],
        None => name,
    }
}
