//! Route table inspection commands.

use anyhow::{bail, Result};
use serde::Serialize;
use webforms_core::RouteValues;
use webforms_routing::RouteTable;

use super::{RoutesArgs, RoutesCommand};
use crate::context::Context;

/// Run the routes command.
pub fn run(args: RoutesArgs, ctx: &Context) -> Result<()> {
    let routes = ctx.route_table()?;
    match args.command {
        Some(RoutesCommand::List) | None => list_routes(&routes, ctx),
        Some(RoutesCommand::Match { path }) => match_route(&routes, &path, ctx),
        Some(RoutesCommand::Url { name, values }) => route_url(&routes, &name, &values, ctx),
    }
}

#[derive(Debug, Serialize)]
struct RouteInfo<'a> {
    name: &'a str,
    pattern: &'a str,
    virtual_path: &'a str,
}

#[derive(Debug, Serialize)]
struct MatchInfo<'a> {
    path: &'a str,
    route: Option<&'a str>,
    virtual_path: Option<String>,
    values: RouteValues,
}

#[derive(Debug, Serialize)]
struct UrlInfo<'a> {
    route: &'a str,
    url: String,
}

fn list_routes(routes: &RouteTable, ctx: &Context) -> Result<()> {
    let infos: Vec<RouteInfo<'_>> = routes
        .entries()
        .iter()
        .map(|entry| RouteInfo {
            name: entry.name(),
            pattern: entry.pattern().as_str(),
            virtual_path: entry.virtual_path(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&infos);
        return Ok(());
    }

    ctx.output
        .header(&format!("Routes (application path {})", routes.application_path()));

    if infos.is_empty() {
        ctx.output.warn("No routes configured.");
        return Ok(());
    }

    let widths = [30, 35, 20];
    ctx.output.table_row(&["NAME", "PATTERN", "VIRTUAL PATH"], &widths);
    for info in &infos {
        ctx.output
            .table_row(&[info.name, info.pattern, info.virtual_path], &widths);
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} route(s)", infos.len()));
    Ok(())
}

fn match_route(routes: &RouteTable, path: &str, ctx: &Context) -> Result<()> {
    let info = match routes.match_path(path) {
        Some(matched) => MatchInfo {
            path,
            route: Some(matched.entry.name()),
            virtual_path: Some(routes.resolve_virtual_path(matched.entry.virtual_path())),
            values: matched.values,
        },
        None => MatchInfo {
            path,
            route: None,
            virtual_path: None,
            values: RouteValues::new(),
        },
    };

    if ctx.output.is_json() {
        ctx.output.json(&info);
        return Ok(());
    }

    let Some(route) = info.route else {
        ctx.output.warn(&format!("No route matches {}", path));
        return Ok(());
    };

    ctx.output.success(&format!("{} matches {}", path, route));
    if let Some(virtual_path) = &info.virtual_path {
        ctx.output.kv("page", virtual_path);
    }
    for (key, value) in info.values.iter() {
        ctx.output.kv(key, value);
    }
    Ok(())
}

fn route_url(routes: &RouteTable, name: &str, pairs: &[String], ctx: &Context) -> Result<()> {
    let values = parse_values(pairs)?;
    let url = routes.route_url(name, &values)?;

    if ctx.output.is_json() {
        ctx.output.json(&UrlInfo { route: name, url });
    } else {
        println!("{}", url);
    }
    Ok(())
}

/// Parse `key=value` arguments in order.
fn parse_values(pairs: &[String]) -> Result<RouteValues> {
    let mut values = RouteValues::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Route value '{}' must be written as key=value", pair);
        };
        if key.is_empty() {
            bail!("Route value '{}' has an empty key", pair);
        }
        values.insert(key, value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        let values = parse_values(&["categoryName=MyTest".into(), "page=2".into()]).unwrap();

        assert_eq!(values.get("categoryname"), Some("MyTest"));
        assert_eq!(values.get("page"), Some("2"));
        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["categoryName", "page"]);
    }

    #[test]
    fn test_parse_values_keeps_equals_in_value() {
        let values = parse_values(&["q=a=b".into()]).unwrap();
        assert_eq!(values.get("q"), Some("a=b"));
    }

    #[test]
    fn test_parse_values_rejects_malformed() {
        assert!(parse_values(&["novalue".into()]).is_err());
        assert!(parse_values(&["=x".into()]).is_err());
    }
}
