use std::sync::Arc;

use webforms_sdk::prelude::*;

fn category_routes() -> RouteTable {
    let mut routes = RouteTable::new();
    routes
        .map_page_route("ProductsByCategoryRoute", "Category/{categoryName}", "~/")
        .unwrap();
    routes
}

#[derive(Default)]
struct GetRouteUrlPage;

impl Page for GetRouteUrlPage {
    fn framework_initialize(&mut self, ctx: &mut PageContext) -> PageResult {
        let id = ctx.get_route_url(
            "ProductsByCategoryRoute",
            &route_values! { "categoryName" => "MyTest" },
        )?;
        ctx.controls_mut().add(Label::new().with_id(id));
        Ok(())
    }
}

#[derive(Default)]
struct GetRouteValuePage;

impl Page for GetRouteValuePage {
    fn framework_initialize(&mut self, ctx: &mut PageContext) -> PageResult {
        let id = ctx
            .require_route_data()?
            .value("categoryName")
            .unwrap_or_default()
            .to_string();
        ctx.controls_mut().add(Label::new().with_id(id));
        Ok(())
    }
}

#[test]
fn map_page_route() {
    let html = run_page::<GetRouteUrlPage>("/", &Arc::new(category_routes())).unwrap();
    assert_eq!(html, r#"<span id="/Category/MyTest"></span>"#);
}

#[test]
fn verify_mapped_route() {
    let html =
        run_page::<GetRouteValuePage>("/category/mycategoryname", &Arc::new(category_routes()))
            .unwrap();
    assert_eq!(html, r#"<span id="mycategoryname"></span>"#);
}

#[test]
fn unmapped_route() {
    let mut routes = category_routes();
    routes
        .map_page_route("ProductsByCategoryRoute2", "Category2/{categoryName}", "~/extra_route")
        .unwrap();

    let html =
        run_page::<GetRouteValuePage>("/category/mycategoryname", &Arc::new(routes)).unwrap();
    assert_eq!(html, r#"<span id="mycategoryname"></span>"#);
}

#[test]
fn route_data_is_required_but_absent() {
    let err = run_page::<GetRouteValuePage>("/", &Arc::new(category_routes())).unwrap_err();
    assert!(matches!(err, PageError::NoRouteData));
}

#[test]
fn host_serves_routed_pages() {
    let mut routes = category_routes();
    routes
        .map_page_route("ProductsByCategoryRoute2", "Category2/{categoryName}", "~/extra_route")
        .unwrap();

    let mut host = PageHost::new(Arc::new(routes))
        .with_log_output(LogOutput::Memory(Default::default()));
    host.register_default::<GetRouteValuePage>("~/");
    host.register_default::<GetRouteUrlPage>("~/extra_route");

    let request = http::Request::builder()
        .uri("/category/mycategoryname")
        .body(())
        .unwrap();
    let response = host.handle(&request);
    assert_eq!(response.status(), http::StatusCode::OK);
    assert_eq!(response.body(), r#"<span id="mycategoryname"></span>"#);

    let rendered = host.render_path("/Category2/anything").unwrap();
    assert_eq!(rendered.markup, r#"<span id="/Category/MyTest"></span>"#);
    assert_eq!(rendered.route_name.as_deref(), Some("ProductsByCategoryRoute2"));
}
