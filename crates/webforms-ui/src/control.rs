//! The control capability trait and the owning child collection.

use std::any::Any;
use std::fmt;
use std::ops::{Index, IndexMut};

use webforms_core::{RouteData, RouteValues};
use webforms_routing::RouteError;

use crate::error::PageResult;
use crate::writer::HtmlTextWriter;

/// What a control can ask of the page that owns it.
///
/// Every hook and render call receives the owning page's services, which is
/// how a control anywhere in the tree reaches the route table.
pub trait PageServices {
    /// Application-absolute URL for a named route (`/Category/MyTest`).
    fn get_route_url(&self, route_name: &str, values: &RouteValues) -> Result<String, RouteError>;

    /// Route values captured for this request, absent when no route matched.
    fn route_data(&self) -> Option<&RouteData>;

    /// Path of the current request.
    fn request_path(&self) -> &str;

    /// Resolve an application-relative (`~/`) path.
    fn resolve_url(&self, path: &str) -> String;
}

/// Identifier and children shared by every control.
#[derive(Debug, Default)]
pub struct ControlState {
    id: Option<String>,
    controls: ControlCollection,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            controls: ControlCollection::new(),
        }
    }
}

/// Upcast helper so trait objects can be downcast to concrete controls.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A node in the renderable tree.
///
/// Implementors only provide access to their [`ControlState`]; everything
/// else has a default. The default `render` writes nothing of its own and
/// renders the children in order, which makes any control a composite.
/// Leaf and tag controls override `render`.
pub trait Control: AsAny + Send + fmt::Debug {
    fn state(&self) -> &ControlState;
    fn state_mut(&mut self) -> &mut ControlState;

    /// Explicit or automatic identifier.
    fn id(&self) -> Option<&str> {
        self.state().id.as_deref()
    }

    /// Assign the identifier, overwriting any previous one.
    fn set_id(&mut self, id: String) {
        self.state_mut().id = Some(id);
    }

    fn clear_id(&mut self) {
        self.state_mut().id = None;
    }

    fn controls(&self) -> &ControlCollection {
        &self.state().controls
    }

    fn controls_mut(&mut self) -> &mut ControlCollection {
        &mut self.state_mut().controls
    }

    /// Whether the control must carry an identifier when rendered.
    fn requires_id(&self) -> bool {
        false
    }

    /// Called once the tree is built, children before parents.
    fn on_init(&mut self, _page: &dyn PageServices) -> PageResult {
        Ok(())
    }

    /// Called after tree construction, parents before children.
    fn on_load(&mut self, _page: &dyn PageServices) -> PageResult {
        Ok(())
    }

    /// Last chance to adjust state before rendering, parents before children.
    fn on_pre_render(&mut self, _page: &dyn PageServices) -> PageResult {
        Ok(())
    }

    /// Called during teardown, children before parents.
    fn on_unload(&mut self) {}

    /// Write this control's markup.
    fn render(&self, page: &dyn PageServices, writer: &mut HtmlTextWriter) -> PageResult {
        self.render_children(page, writer)
    }

    /// Render every child in insertion order.
    fn render_children(&self, page: &dyn PageServices, writer: &mut HtmlTextWriter) -> PageResult {
        self.controls().render(page, writer)
    }
}

impl<'a> dyn Control + 'a {
    /// Downcast to a concrete control type.
    pub fn downcast_ref<T: Control>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast to a concrete control type, mutably.
    pub fn downcast_mut<T: Control>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Resolve a route URL through the owning page.
    pub fn get_route_url(
        &self,
        page: &dyn PageServices,
        route_name: &str,
        values: &RouteValues,
    ) -> Result<String, RouteError> {
        page.get_route_url(route_name, values)
    }
}

/// Ordered child sequence. The collection owns its controls.
///
/// A control has exactly one parent: moving it elsewhere means removing it
/// here first, which hands back ownership.
#[derive(Debug, Default)]
pub struct ControlCollection {
    items: Vec<Box<dyn Control>>,
}

impl ControlCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a control, taking ownership.
    pub fn add(&mut self, control: impl Control) {
        self.items.push(Box::new(control));
    }

    /// Append an already boxed control.
    pub fn add_boxed(&mut self, control: Box<dyn Control>) {
        self.items.push(control);
    }

    /// Insert at a position, shifting later controls. An index past the end
    /// appends. Returns the position the control ended up at.
    pub fn insert(&mut self, index: usize, control: Box<dyn Control>) -> usize {
        let index = index.min(self.items.len());
        self.items.insert(index, control);
        index
    }

    /// Detach a control and return it.
    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Control>> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Detach the first control with this identifier.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Box<dyn Control>> {
        let index = self.items.iter().position(|c| c.id() == Some(id))?;
        self.remove(index)
    }

    /// Detach every child.
    pub fn clear(&mut self) -> Vec<Box<dyn Control>> {
        std::mem::take(&mut self.items)
    }

    pub fn get(&self, index: usize) -> Option<&dyn Control> {
        self.items.get(index).map(|c| c.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut dyn Control> {
        match self.items.get_mut(index) {
            Some(c) => Some(c.as_mut()),
            None => None,
        }
    }

    /// First direct child with this identifier.
    pub fn find(&self, id: &str) -> Option<&dyn Control> {
        self.iter().find(|c| c.id() == Some(id))
    }

    /// Search the whole subtree depth-first for an identifier.
    pub fn find_recursive(&self, id: &str) -> Option<&dyn Control> {
        for control in self.iter() {
            if control.id() == Some(id) {
                return Some(control);
            }
            if let Some(found) = control.controls().find_recursive(id) {
                return Some(found);
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Control> {
        self.items.iter().map(|c| c.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Control>> {
        self.items.iter_mut()
    }

    /// Render every control in insertion order.
    pub fn render(&self, page: &dyn PageServices, writer: &mut HtmlTextWriter) -> PageResult {
        for control in &self.items {
            control.render(page, writer)?;
        }
        Ok(())
    }
}

/// Panics when `index` is out of range; use [`ControlCollection::get`] for
/// checked access.
impl Index<usize> for ControlCollection {
    type Output = dyn Control;

    fn index(&self, index: usize) -> &Self::Output {
        self.items[index].as_ref()
    }
}

/// Panics when `index` is out of range; use [`ControlCollection::get_mut`]
/// for checked access.
impl IndexMut<usize> for ControlCollection {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.items[index].as_mut()
    }
}
