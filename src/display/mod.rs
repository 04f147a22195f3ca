use std::fmt::Write;

use crate::{models::SearchResultItem, routing::Route, widget::Snapshot};

/// Terminal rendering of the search box: the input line followed by the
/// result list when the dropdown is showing.
pub(crate) fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    let status = if snapshot.loading { " (searching)" } else { "" };
    let _ = writeln!(out, "> {}{}", snapshot.query, status);

    if let Some(error) = &snapshot.last_error {
        let _ = writeln!(out, "  ! {}", error);
    }

    if snapshot.is_visible() {
        for (index, item) in snapshot.results.iter().enumerate() {
            let kind = item.kind.to_string();
            let route = Route::for_item(item);
            let _ = writeln!(out, "  [{index}] {kind:<6} {}  {route}", item.title);
        }
    } else if snapshot.dropdown.is_open() && !snapshot.loading {
        out.push_str("  no results\n");
    }

    out
}

/// One `route  title` line per result, used for one-shot lookups.
pub(crate) fn routes(items: &[SearchResultItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}  {}", Route::for_item(item), item.title))
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::ResultKind, widget::Dropdown};

    fn item(id: &str, title: &str, kind: ResultKind, parent_id: Option<&str>) -> SearchResultItem {
        SearchResultItem {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            image_url: None,
            description: None,
            parent_id: parent_id.map(str::to_string),
        }
    }

    #[test]
    fn test_render_open_results() {
        let snapshot = Snapshot {
            query: "alg".to_string(),
            results: vec![
                item("c1", "Algebra", ResultKind::Course, None),
                item("u1", "Linear", ResultKind::Unit, Some("c1")),
            ],
            dropdown: Dropdown::Open,
            ..Default::default()
        };

        assert_eq!(
            render(&snapshot),
            "> alg\n  [0] COURSE Algebra  /courses/c1\n  [1] UNIT   Linear  /courses/c1/unit/u1\n"
        );
    }

    #[test]
    fn test_render_closed_hides_results() {
        let snapshot = Snapshot {
            query: "alg".to_string(),
            loading: true,
            results: vec![item("c1", "Algebra", ResultKind::Course, None)],
            dropdown: Dropdown::Closed,
            ..Default::default()
        };

        assert_eq!(render(&snapshot), "> alg (searching)\n");
    }

    #[test]
    fn test_render_empty_open() {
        let snapshot = Snapshot {
            query: "zzz".to_string(),
            dropdown: Dropdown::Open,
            ..Default::default()
        };

        assert_eq!(render(&snapshot), "> zzz\n  no results\n");
    }

    #[test]
    fn test_render_error() {
        let snapshot = Snapshot {
            query: "x".to_string(),
            last_error: Some("Search request error: timed out".to_string()),
            ..Default::default()
        };

        assert_eq!(
            render(&snapshot),
            "> x\n  ! Search request error: timed out\n"
        );
    }

    #[test]
    fn test_routes() {
        let items = vec![
            item("l1", "Counting", ResultKind::Lesson, None),
            item("b1", "Bundle", ResultKind::Other, None),
        ];

        assert_eq!(routes(&items), "/lessons/l1  Counting\n/  Bundle");
    }
}
