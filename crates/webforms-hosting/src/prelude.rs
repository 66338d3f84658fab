//! Prelude for page authors.

pub use crate::{
    run_page, EngineConfig, HostError, Page, PageContext, PageHost, PageLifecycleDriver,
    RenderedPage,
};

pub use webforms_core::{route_values, LifecyclePhase, RequestContext, RouteData, RouteValues};
pub use webforms_routing::{RouteError, RouteTable};
pub use webforms_ui::{
    Control, ControlCollection, ControlState, HtmlForm, HtmlTextWriter, HyperLink, Label,
    LiteralControl, PageError, PageResult, PageServices, Panel, TextBox,
};
